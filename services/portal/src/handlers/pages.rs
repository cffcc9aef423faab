use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::Profile;
use crate::error::PortalError;
use crate::handlers::auth::MessageResponse;
use crate::handlers::session::{AdminSession, AuthSession};
use crate::state::AppState;
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileUseCase};

// ── GET /home ────────────────────────────────────────────────────────────────

pub async fn home(AuthSession(session): AuthSession) -> Json<MessageResponse> {
    MessageResponse::new(format!("Welcome to the home page, {}!", session.email))
}

// ── GET /admin-dashboard ─────────────────────────────────────────────────────

pub async fn admin_dashboard(_admin: AdminSession) -> Json<MessageResponse> {
    MessageResponse::new("Welcome to the admin dashboard!")
}

// ── GET /profile ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub degree: String,
    pub uin: String,
}

impl ProfileResponse {
    fn new(email: String, profile: Profile) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            email,
            department: profile.department,
            degree: profile.degree,
            uin: profile.uin,
        }
    }
}

pub async fn get_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ProfileResponse>, PortalError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(&session.email).await?;
    Ok(Json(ProfileResponse::new(user.email, user.profile)))
}

// ── POST /profile ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub degree: String,
    pub uin: String,
}

#[derive(Serialize)]
pub struct UpdateProfileResponse {
    pub message: &'static str,
    pub profile: ProfileResponse,
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, PortalError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let profile = usecase
        .execute(
            &session.email,
            Profile {
                first_name: body.first_name.trim().to_owned(),
                last_name: body.last_name.trim().to_owned(),
                department: body.department.trim().to_owned(),
                degree: body.degree.trim().to_owned(),
                uin: body.uin.trim().to_owned(),
            },
        )
        .await?;
    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully",
        profile: ProfileResponse::new(session.email, profile),
    }))
}
