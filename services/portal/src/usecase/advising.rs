use chrono::Utc;

use advising_domain::advising::{CourseEntry, previously_taken};

use crate::domain::repository::AdvisingRepository;
use crate::domain::types::{AdvisingRecord, AdvisingRevision, AdvisingSummary, NewAdvisingRecord};
use crate::error::PortalError;

/// Student-entered part of an advising sheet.
#[derive(Debug, Clone)]
pub struct AdvisingForm {
    pub last_term: String,
    pub last_gpa: Option<f64>,
    pub prerequisites: Vec<CourseEntry>,
    pub course_plan: Vec<CourseEntry>,
}

impl AdvisingForm {
    fn validate(&self) -> Result<f64, PortalError> {
        if self.last_term.trim().is_empty() {
            return Err(PortalError::MissingFields);
        }
        let gpa = self
            .last_gpa
            .filter(|g| g.is_finite() && *g >= 0.0)
            .ok_or(PortalError::MissingFields)?;
        if !self
            .prerequisites
            .iter()
            .chain(&self.course_plan)
            .all(CourseEntry::is_well_formed)
        {
            return Err(PortalError::InvalidCourseEntry);
        }
        Ok(gpa)
    }
}

async fn reject_taken_courses<A: AdvisingRepository>(
    advising: &A,
    student_email: &str,
    term: &str,
    exclude_id: Option<i32>,
    plan: &[CourseEntry],
) -> Result<(), PortalError> {
    let taken = advising
        .taken_courses(student_email, Some(term), exclude_id)
        .await?;
    let offending = previously_taken(plan, &taken);
    if !offending.is_empty() {
        return Err(PortalError::CoursesAlreadyTaken(offending));
    }
    Ok(())
}

// ── SubmitAdvising ───────────────────────────────────────────────────────────

pub struct SubmitAdvisingUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> SubmitAdvisingUseCase<A> {
    /// Returns the new sheet id.
    pub async fn execute(
        &self,
        student_email: &str,
        term: &str,
        form: AdvisingForm,
    ) -> Result<i32, PortalError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(PortalError::MissingFields);
        }
        let last_gpa = form.validate()?;

        if self
            .advising
            .find_by_term(student_email, term)
            .await?
            .is_some()
        {
            return Err(PortalError::DuplicateTerm(term.to_owned()));
        }
        reject_taken_courses(&self.advising, student_email, term, None, &form.course_plan).await?;

        let id = self
            .advising
            .create(&NewAdvisingRecord {
                student_email: student_email.to_owned(),
                term: term.to_owned(),
                date_submitted: Utc::now(),
                last_term: form.last_term.trim().to_owned(),
                last_gpa,
                prerequisites: form.prerequisites,
                course_plan: form.course_plan,
            })
            .await?;
        tracing::info!(id, term = %term, "advising sheet submitted");
        Ok(id)
    }
}

// ── UpdateAdvising ───────────────────────────────────────────────────────────

pub struct UpdateAdvisingUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> UpdateAdvisingUseCase<A> {
    pub async fn execute(
        &self,
        student_email: &str,
        term: &str,
        form: AdvisingForm,
    ) -> Result<(), PortalError> {
        let last_gpa = form.validate()?;
        let record = self
            .advising
            .find_by_term(student_email, term.trim())
            .await?
            .ok_or(PortalError::AdvisingRecordNotFound)?;
        if !record.status.is_editable() {
            return Err(PortalError::AdvisingLocked);
        }
        reject_taken_courses(
            &self.advising,
            student_email,
            &record.term,
            Some(record.id),
            &form.course_plan,
        )
        .await?;

        self.advising
            .revise(
                record.id,
                &AdvisingRevision {
                    date_submitted: Utc::now(),
                    last_term: form.last_term.trim().to_owned(),
                    last_gpa,
                    prerequisites: form.prerequisites,
                    course_plan: form.course_plan,
                },
            )
            .await
    }
}

// ── GetAdvisingRecord ────────────────────────────────────────────────────────

pub struct GetAdvisingRecordUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> GetAdvisingRecordUseCase<A> {
    pub async fn execute(
        &self,
        student_email: &str,
        term: &str,
    ) -> Result<AdvisingRecord, PortalError> {
        self.advising
            .find_by_term(student_email, term.trim())
            .await?
            .ok_or(PortalError::AdvisingRecordNotFound)
    }
}

// ── ListAdvisingHistory ──────────────────────────────────────────────────────

pub struct ListAdvisingHistoryUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> ListAdvisingHistoryUseCase<A> {
    pub async fn execute(&self, student_email: &str) -> Result<Vec<AdvisingSummary>, PortalError> {
        self.advising.list_by_student(student_email).await
    }
}

// ── TakenCourses ─────────────────────────────────────────────────────────────

pub struct TakenCoursesUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> TakenCoursesUseCase<A> {
    /// Lowercase, deduplicated course names planned outside `current_term`.
    pub async fn execute(
        &self,
        student_email: &str,
        current_term: Option<&str>,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>, PortalError> {
        let current_term = current_term.map(str::trim).filter(|t| !t.is_empty());
        let mut names: Vec<String> = Vec::new();
        for name in self
            .advising
            .taken_courses(student_email, current_term, exclude_id)
            .await?
        {
            let name = name.trim().to_lowercase();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}
