use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Portal error variants. Messages are part of the wire contract: the frontend shows them verbatim.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Email and password are required.")]
    MissingCredentials,
    #[error(
        "Password must be at least 8 characters long and contain letters, numbers, and special characters."
    )]
    WeakPassword,
    #[error("Sign-up failed: Entered email address format is invalid.")]
    InvalidEmailFormat,
    #[error("Sign-up failed: Entered email address is invalid.")]
    UndeliverableEmail,
    #[error("Sign-up failed: Cannot use admin email for registration.")]
    AdminEmail,
    #[error("User already exists with this email")]
    UserAlreadyExists,
    #[error("Invalid email or user does not exist")]
    UnknownEmail,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("OTP expired. Please request a new OTP.")]
    OtpExpired,
    #[error("Invalid OTP")]
    InvalidOtp,
    #[error(r#"Invalid action. Please specify "signup", "login", or "forgot-password"."#)]
    InvalidAction,
    #[error("Forgot password is not applicable for admin users.")]
    AdminPasswordReset,
    #[error("Advising form for \"{0}\" has already been submitted.")]
    DuplicateTerm(String),
    #[error("The following courses have already been taken in previous terms: {}", .0.join(", "))]
    CoursesAlreadyTaken(Vec<String>),
    #[error("Invalid prerequisite data structure")]
    InvalidCourseEntry,
    #[error("Advising form can only be edited while pending.")]
    AdvisingLocked,
    #[error("Status and message are required")]
    MissingDecision,
    #[error("Invalid status. Must be Pending, Approved, or Rejected.")]
    InvalidStatus,
    #[error("Missing courseId or enabled status")]
    MissingCourseToggle,

    // ── Authentication / authorization ───────────────────────────────────────
    #[error("Unauthorized. Please log in.")]
    Unauthorized,
    #[error("Please verify the OTP sent to your email.")]
    OtpNotVerified,
    #[error("Access denied. Admins only.")]
    AdminOnly,
    #[error("Access denied. Students only.")]
    StudentOnly,

    // ── Not found ────────────────────────────────────────────────────────────
    #[error("User not found")]
    UserNotFound,
    #[error("User not found. Please register again.")]
    PendingSignupNotFound,
    #[error("No record found")]
    AdvisingRecordNotFound,
    #[error("Advising sheet not found")]
    AdvisingSheetNotFound,
    #[error("Course not found")]
    CourseNotFound,

    // ── Infrastructure ───────────────────────────────────────────────────────
    #[error("Error sending email")]
    Mail(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidEmailFormat => "INVALID_EMAIL_FORMAT",
            Self::UndeliverableEmail => "UNDELIVERABLE_EMAIL",
            Self::AdminEmail => "ADMIN_EMAIL",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UnknownEmail => "UNKNOWN_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidAction => "INVALID_ACTION",
            Self::AdminPasswordReset => "ADMIN_PASSWORD_RESET",
            Self::DuplicateTerm(_) => "DUPLICATE_TERM",
            Self::CoursesAlreadyTaken(_) => "COURSES_ALREADY_TAKEN",
            Self::InvalidCourseEntry => "INVALID_COURSE_ENTRY",
            Self::AdvisingLocked => "ADVISING_LOCKED",
            Self::MissingDecision => "MISSING_DECISION",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::MissingCourseToggle => "MISSING_COURSE_TOGGLE",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::OtpNotVerified => "OTP_NOT_VERIFIED",
            Self::AdminOnly => "ADMIN_ONLY",
            Self::StudentOnly => "STUDENT_ONLY",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PendingSignupNotFound => "PENDING_SIGNUP_NOT_FOUND",
            Self::AdvisingRecordNotFound => "ADVISING_RECORD_NOT_FOUND",
            Self::AdvisingSheetNotFound => "ADVISING_SHEET_NOT_FOUND",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::Mail(_) => "MAIL",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::OtpNotVerified => StatusCode::UNAUTHORIZED,
            Self::AdminOnly | Self::StudentOnly => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::PendingSignupNotFound
            | Self::AdvisingRecordNotFound
            | Self::AdvisingSheetNotFound
            | Self::CourseNotFound => StatusCode::NOT_FOUND,
            Self::Mail(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors and already visible in the trace layer.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::Mail(e) => tracing::error!(error = ?e, kind = "MAIL", "mail delivery failed"),
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
