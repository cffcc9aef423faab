use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use advising_core::serde::to_rfc3339_ms;
use advising_domain::advising::{AdvisingStatus, CourseEntry};
use advising_domain::course::CatalogKind;

use crate::domain::types::Course;
use crate::error::PortalError;
use crate::handlers::auth::MessageResponse;
use crate::handlers::session::{AuthSession, StudentSession};
use crate::state::AppState;
use crate::usecase::advising::{
    AdvisingForm, GetAdvisingRecordUseCase, ListAdvisingHistoryUseCase, SubmitAdvisingUseCase,
    TakenCoursesUseCase, UpdateAdvisingUseCase,
};
use crate::usecase::course::ListEnabledCoursesUseCase;

/// GPA as sent by the form: a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum GpaInput {
    Number(f64),
    Text(String),
}

impl GpaInput {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Course lists arrive as loose JSON so a malformed entry maps to
/// `InvalidCourseEntry` instead of a body rejection.
fn parse_entries(values: Vec<Value>) -> Result<Vec<CourseEntry>, PortalError> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(|_| PortalError::InvalidCourseEntry))
        .collect()
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisingFormRequest {
    pub last_term: String,
    #[serde(rename = "lastGPA")]
    pub last_gpa: Option<GpaInput>,
    pub advising_term: String,
    pub prerequisites: Vec<Value>,
    pub course_plan: Vec<Value>,
}

impl AdvisingFormRequest {
    fn into_form(self) -> Result<(String, AdvisingForm), PortalError> {
        let form = AdvisingForm {
            last_term: self.last_term,
            last_gpa: self.last_gpa.as_ref().and_then(GpaInput::value),
            prerequisites: parse_entries(self.prerequisites)?,
            course_plan: parse_entries(self.course_plan)?,
        };
        Ok((self.advising_term, form))
    }
}

// ── POST /advising/submit-advising ───────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAdvisingResponse {
    pub message: &'static str,
    pub advising_history_id: i32,
}

pub async fn submit_advising(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(body): Json<AdvisingFormRequest>,
) -> Result<Json<SubmitAdvisingResponse>, PortalError> {
    let (term, form) = body.into_form()?;
    let usecase = SubmitAdvisingUseCase {
        advising: state.advising_repo(),
    };
    let id = usecase.execute(&session.email, &term, form).await?;
    Ok(Json(SubmitAdvisingResponse {
        message: "Advising form submitted successfully",
        advising_history_id: id,
    }))
}

// ── PUT /advising/advising-history/{term} ────────────────────────────────────

pub async fn update_advising(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(term): Path<String>,
    Json(body): Json<AdvisingFormRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    let (_, form) = body.into_form()?;
    let usecase = UpdateAdvisingUseCase {
        advising: state.advising_repo(),
    };
    usecase.execute(&session.email, &term, form).await?;
    Ok(MessageResponse::new("Advising form updated successfully"))
}

// ── GET /advising/advising-history/{term} ────────────────────────────────────

/// Top-level fields are snake_case; entries keep their submitted `{level, courseName}` shape.
#[derive(Serialize)]
pub struct AdvisingRecordResponse {
    pub last_term: String,
    pub last_gpa: f64,
    pub prerequisites: Vec<CourseEntry>,
    pub course_plan: Vec<CourseEntry>,
    pub status: AdvisingStatus,
    pub admin_message: Option<String>,
}

pub async fn get_advising_record(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(term): Path<String>,
) -> Result<Json<AdvisingRecordResponse>, PortalError> {
    let usecase = GetAdvisingRecordUseCase {
        advising: state.advising_repo(),
    };
    let record = usecase.execute(&session.email, &term).await?;
    Ok(Json(AdvisingRecordResponse {
        last_term: record.last_term,
        last_gpa: record.last_gpa,
        prerequisites: record.prerequisites,
        course_plan: record.course_plan,
        status: record.status,
        admin_message: record.admin_message,
    }))
}

// ── GET /advising/course-catalog, /advising/enabled-courses ──────────────────

#[derive(Serialize)]
pub struct CourseOption {
    pub level: i32,
    pub course_name: String,
}

impl From<Course> for CourseOption {
    fn from(course: Course) -> Self {
        Self {
            level: course.level,
            course_name: course.course_name,
        }
    }
}

async fn enabled_courses(
    state: &AppState,
    kind: CatalogKind,
) -> Result<Json<Vec<CourseOption>>, PortalError> {
    let usecase = ListEnabledCoursesUseCase {
        courses: state.course_repo(),
    };
    let courses = usecase.execute(kind).await?;
    Ok(Json(courses.into_iter().map(CourseOption::from).collect()))
}

pub async fn course_catalog(
    State(state): State<AppState>,
    _session: AuthSession,
) -> Result<Json<Vec<CourseOption>>, PortalError> {
    enabled_courses(&state, CatalogKind::Plan).await
}

pub async fn enabled_prerequisites(
    State(state): State<AppState>,
    _session: AuthSession,
) -> Result<Json<Vec<CourseOption>>, PortalError> {
    enabled_courses(&state, CatalogKind::Prerequisite).await
}

// ── GET /advising/taken-courses ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakenCoursesQuery {
    pub current_term: Option<String>,
    pub exclude_id: Option<String>,
}

pub async fn taken_courses(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<TakenCoursesQuery>,
) -> Result<Json<Vec<String>>, PortalError> {
    // Blank or non-numeric excludeId means no exclusion.
    let exclude_id = query
        .exclude_id
        .as_deref()
        .and_then(|v| v.trim().parse::<i32>().ok());
    let usecase = TakenCoursesUseCase {
        advising: state.advising_repo(),
    };
    let names = usecase
        .execute(&session.email, query.current_term.as_deref(), exclude_id)
        .await?;
    Ok(Json(names))
}

// ── GET /student/advising-history ────────────────────────────────────────────

#[derive(Serialize)]
pub struct AdvisingHistoryItem {
    pub id: i32,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub date: DateTime<Utc>,
    pub term: String,
    pub status: AdvisingStatus,
}

pub async fn advising_history(
    State(state): State<AppState>,
    StudentSession(session): StudentSession,
) -> Result<Json<Vec<AdvisingHistoryItem>>, PortalError> {
    let usecase = ListAdvisingHistoryUseCase {
        advising: state.advising_repo(),
    };
    let items = usecase
        .execute(&session.email)
        .await?
        .into_iter()
        .map(|s| AdvisingHistoryItem {
            id: s.id,
            date: s.date_submitted,
            term: s.term,
            status: s.status,
        })
        .collect();
    Ok(Json(items))
}
