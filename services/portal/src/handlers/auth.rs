use axum::{Json, extract::State};
use axum_extra::extract::SignedCookieJar;
use serde::{Deserialize, Serialize};

use advising_domain::otp::OtpAction;
use advising_session::cookie::{clear_session_cookie, set_session_cookie};
use advising_session::extract::SessionCookie;

use crate::domain::types::Profile;
use crate::error::PortalError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::otp::{
    ResendOtpInput, ResendOtpUseCase, VerifyOtpInput, VerifyOtpOutcome, VerifyOtpUseCase,
};
use crate::usecase::password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::usecase::session::LogoutUseCase;
use crate::usecase::signup::{SignupInput, SignupUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    pub message: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

// ── POST /signup ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub degree: String,
    pub uin: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<OtpSentResponse>, PortalError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        pending: state.pending_repo(),
        tickets: state.tickets.clone(),
        domains: state.domains.clone(),
        mailer: state.mailer.clone(),
    };
    let email = usecase
        .execute(SignupInput {
            email: body.email,
            password: body.password,
            profile: Profile {
                first_name: body.first_name,
                last_name: body.last_name,
                department: body.department,
                degree: body.degree,
                uin: body.uin,
            },
        })
        .await?;
    Ok(Json(OtpSentResponse {
        message: "OTP sent. Please verify your email.".to_owned(),
        email,
        is_admin: None,
    }))
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    previous: Option<SessionCookie>,
    jar: SignedCookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(SignedCookieJar, Json<OtpSentResponse>), PortalError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
        mailer: state.mailer.clone(),
    };
    let out = usecase
        .execute(
            LoginInput {
                email: body.email,
                password: body.password,
            },
            previous.as_ref().map(|c| c.0.as_str()),
        )
        .await?;

    let message = if out.resent {
        "OTP resent. Please verify to continue."
    } else {
        "OTP sent. Please verify to continue."
    };
    let jar = set_session_cookie(jar, out.session.id, &state.cookie);
    Ok((
        jar,
        Json(OtpSentResponse {
            message: message.to_owned(),
            email: out.email,
            is_admin: Some(out.is_admin),
        }),
    ))
}

// ── POST /verify-otp ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
    pub action: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    previous: Option<SessionCookie>,
    jar: SignedCookieJar,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<(SignedCookieJar, Json<VerifyOtpResponse>), PortalError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        pending: state.pending_repo(),
        tickets: state.tickets.clone(),
        sessions: state.session_repo(),
    };
    let outcome = usecase
        .execute(
            VerifyOtpInput {
                email: body.email,
                otp: body.otp,
                action: body.action,
            },
            previous.as_ref().map(|c| c.0.as_str()),
        )
        .await?;

    match outcome {
        VerifyOtpOutcome::SignedUp => Ok((
            jar,
            Json(VerifyOtpResponse {
                message: "Sign-up successful! You can now log in.".to_owned(),
                email: None,
                is_admin: None,
            }),
        )),
        VerifyOtpOutcome::LoggedIn { session } => {
            let message = if session.is_admin {
                "Admin login successful!"
            } else {
                "Login successful!"
            };
            let body = VerifyOtpResponse {
                message: message.to_owned(),
                email: Some(session.email),
                is_admin: Some(session.is_admin),
            };
            Ok((set_session_cookie(jar, session.id, &state.cookie), Json(body)))
        }
        VerifyOtpOutcome::PasswordResetAllowed => Ok((
            jar,
            Json(VerifyOtpResponse {
                message: "OTP verified. Proceed to reset password.".to_owned(),
                email: None,
                is_admin: None,
            }),
        )),
    }
}

// ── POST /resend-otp ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ResendOtpRequest {
    pub email: String,
    pub action: String,
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<ResendOtpRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    let usecase = ResendOtpUseCase {
        users: state.user_repo(),
        pending: state.pending_repo(),
        tickets: state.tickets.clone(),
        mailer: state.mailer.clone(),
    };
    let action = usecase
        .execute(ResendOtpInput {
            email: body.email,
            action: body.action,
        })
        .await?;
    let message = match action {
        OtpAction::Signup => "New OTP sent for sign-up.",
        OtpAction::Login => "New OTP sent for login.",
        OtpAction::ForgotPassword => "New OTP sent for forgot-password.",
    };
    Ok(MessageResponse::new(message))
}

// ── POST /change-password ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, PortalError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(ChangePasswordInput {
            email: body.email,
            new_password: body.new_password,
        })
        .await?;
    Ok(MessageResponse::new("Password updated successfully."))
}

// ── POST /logout ─────────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    previous: Option<SessionCookie>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<MessageResponse>), PortalError> {
    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
    };
    usecase.execute(previous.as_ref().map(|c| c.0.as_str())).await?;
    let jar = clear_session_cookie(jar, &state.cookie);
    Ok((jar, MessageResponse::new("Logout successful")))
}
