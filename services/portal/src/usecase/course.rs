use advising_domain::course::{CatalogKind, PREREQUISITE_LEVELS};

use crate::domain::repository::CourseRepository;
use crate::domain::types::Course;
use crate::error::PortalError;

// ── ListEnabledCourses ───────────────────────────────────────────────────────

pub struct ListEnabledCoursesUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> ListEnabledCoursesUseCase<C> {
    pub async fn execute(&self, kind: CatalogKind) -> Result<Vec<Course>, PortalError> {
        self.courses.list_enabled(kind).await
    }
}

// ── ListCourses (admin) ──────────────────────────────────────────────────────

pub struct ListCoursesUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> ListCoursesUseCase<C> {
    pub async fn execute(&self, kind: CatalogKind) -> Result<Vec<Course>, PortalError> {
        self.courses.list(kind).await
    }

    /// Prerequisite catalog restricted to the levels a student can list as completed.
    pub async fn prerequisites(&self) -> Result<Vec<Course>, PortalError> {
        let mut courses = self.courses.list(CatalogKind::Prerequisite).await?;
        courses.retain(|c| PREREQUISITE_LEVELS.contains(&c.level));
        Ok(courses)
    }
}

// ── ToggleCourse (admin) ─────────────────────────────────────────────────────

pub struct ToggleCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> ToggleCourseUseCase<C> {
    pub async fn execute(
        &self,
        kind: CatalogKind,
        id: Option<i32>,
        enabled: Option<bool>,
    ) -> Result<(), PortalError> {
        let (Some(id), Some(enabled)) = (id, enabled) else {
            return Err(PortalError::MissingCourseToggle);
        };
        if !self.courses.set_enabled(kind, id, enabled).await? {
            return Err(PortalError::CourseNotFound);
        }
        tracing::info!(course_id = id, enabled, ?kind, "course toggled");
        Ok(())
    }
}
