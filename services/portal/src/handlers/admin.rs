use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use advising_core::serde::to_rfc3339_ms;
use advising_domain::advising::{AdvisingStatus, CourseEntry};
use advising_domain::course::CatalogKind;

use crate::domain::types::{AdvisingSheetSummary, Course};
use crate::error::PortalError;
use crate::handlers::auth::MessageResponse;
use crate::handlers::session::AdminSession;
use crate::state::AppState;
use crate::usecase::admin::{
    DecideAdvisingSheetInput, DecideAdvisingSheetUseCase, GetAdvisingSheetUseCase,
    ListAdvisingSheetsUseCase,
};
use crate::usecase::course::{ListCoursesUseCase, ToggleCourseUseCase};

// ── Course catalogs ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: i32,
    pub level: i32,
    pub course_name: String,
    pub enabled: bool,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            level: course.level,
            course_name: course.course_name,
            enabled: course.enabled,
        }
    }
}

fn course_list(courses: Vec<Course>) -> Json<Vec<CourseResponse>> {
    Json(courses.into_iter().map(CourseResponse::from).collect())
}

/// Toggle body. `/admin/prerequisites/update` sends `courseId`, the others `id`.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ToggleCourseRequest {
    #[serde(alias = "courseId")]
    pub id: Option<i32>,
    pub enabled: Option<bool>,
}

async fn toggle(
    state: &AppState,
    kind: CatalogKind,
    body: ToggleCourseRequest,
) -> Result<Json<MessageResponse>, PortalError> {
    let usecase = ToggleCourseUseCase {
        courses: state.course_repo(),
    };
    usecase.execute(kind, body.id, body.enabled).await?;
    Ok(MessageResponse::new("Course updated successfully"))
}

// GET /admin/courses
pub async fn list_courses(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<CourseResponse>>, PortalError> {
    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
    };
    Ok(course_list(usecase.execute(CatalogKind::Prerequisite).await?))
}

// POST /admin/update-course
pub async fn update_course(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(body): Json<ToggleCourseRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    toggle(&state, CatalogKind::Prerequisite, body).await
}

// GET /admin/prerequisites
pub async fn list_prerequisites(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<CourseResponse>>, PortalError> {
    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
    };
    Ok(course_list(usecase.prerequisites().await?))
}

// POST /admin/prerequisites/update
pub async fn update_prerequisite(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(body): Json<ToggleCourseRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    toggle(&state, CatalogKind::Prerequisite, body).await
}

// GET /admin/course-catalog
pub async fn list_course_catalog(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<CourseResponse>>, PortalError> {
    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
    };
    Ok(course_list(usecase.execute(CatalogKind::Plan).await?))
}

// POST /admin/course-catalog/update
pub async fn update_course_catalog(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(body): Json<ToggleCourseRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    toggle(&state, CatalogKind::Plan, body).await
}

// ── GET /admin/advising-sheets ───────────────────────────────────────────────

/// Sheet columns are snake_case, the student's name fields camelCase.
#[derive(Serialize)]
pub struct AdvisingSheetListItem {
    pub id: i32,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub uin: String,
    pub term: String,
    pub status: AdvisingStatus,
    pub student_email: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub date_submitted: DateTime<Utc>,
}

impl From<AdvisingSheetSummary> for AdvisingSheetListItem {
    fn from(s: AdvisingSheetSummary) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            uin: s.uin,
            term: s.term,
            status: s.status,
            student_email: s.student_email,
            date_submitted: s.date_submitted,
        }
    }
}

pub async fn list_advising_sheets(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<AdvisingSheetListItem>>, PortalError> {
    let usecase = ListAdvisingSheetsUseCase {
        advising: state.advising_repo(),
    };
    let sheets = usecase.execute().await?;
    Ok(Json(sheets.into_iter().map(AdvisingSheetListItem::from).collect()))
}

// ── GET /admin/advising-sheet/{id} ───────────────────────────────────────────

#[derive(Serialize)]
pub struct AdvisingSheetResponse {
    pub id: i32,
    pub student_email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub uin: String,
    pub term: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub date_submitted: DateTime<Utc>,
    pub status: AdvisingStatus,
    pub last_term: String,
    pub last_gpa: f64,
    pub prerequisites: Vec<CourseEntry>,
    pub course_plan: Vec<CourseEntry>,
    pub admin_message: Option<String>,
}

pub async fn get_advising_sheet(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<i32>,
) -> Result<Json<AdvisingSheetResponse>, PortalError> {
    let usecase = GetAdvisingSheetUseCase {
        advising: state.advising_repo(),
    };
    let sheet = usecase.execute(id).await?;
    let record = sheet.record;
    Ok(Json(AdvisingSheetResponse {
        id: record.id,
        student_email: record.student_email,
        first_name: sheet.first_name,
        last_name: sheet.last_name,
        uin: sheet.uin,
        term: record.term,
        date_submitted: record.date_submitted,
        status: record.status,
        last_term: record.last_term,
        last_gpa: record.last_gpa,
        prerequisites: record.prerequisites,
        course_plan: record.course_plan,
        admin_message: record.admin_message,
    }))
}

// ── PUT /admin/advising-sheet/{id} ───────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct DecideAdvisingSheetRequest {
    pub status: Option<String>,
    pub message: Option<String>,
}

pub async fn decide_advising_sheet(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<i32>,
    Json(body): Json<DecideAdvisingSheetRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    let usecase = DecideAdvisingSheetUseCase {
        advising: state.advising_repo(),
        mailer: state.mailer.clone(),
    };
    usecase
        .execute(
            id,
            DecideAdvisingSheetInput {
                status: body.status,
                message: body.message,
            },
        )
        .await?;
    Ok(MessageResponse::new("Advising sheet updated successfully"))
}
