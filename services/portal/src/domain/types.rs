use chrono::{DateTime, Duration, Utc};

use advising_domain::advising::{AdvisingStatus, CourseEntry};
use advising_domain::otp::OTP_TTL_SECS;
use advising_session::cookie::SESSION_TTL_SECS;

/// Personal details collected at signup and editable on the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub degree: String,
    pub uin: String,
}

impl Profile {
    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.department,
            &self.degree,
            &self.uin,
        ]
        .iter()
        .all(|f| !f.trim().is_empty())
    }
}

/// Verified account.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
    pub is_admin: bool,
    pub is_verified: bool,
    /// Outstanding login / forgot-password code.
    pub login_otp: Option<OtpTicket>,
}

/// Signup awaiting email verification.
#[derive(Debug, Clone)]
pub struct PendingSignup {
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// A one-time code and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpTicket {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpTicket {
    pub fn new(code: String, issued_at: DateTime<Utc>) -> Self {
        Self {
            code,
            expires_at: issued_at + Duration::seconds(OTP_TTL_SECS),
        }
    }

    /// Valid up to and including `expires_at`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    pub fn matches(&self, submitted: &str) -> bool {
        self.code == submitted.trim()
    }
}

/// Server-side session. `otp_verified` is false between password check and OTP confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub otp_verified: bool,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        id: String,
        email: String,
        is_admin: bool,
        otp_verified: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            is_admin,
            otp_verified,
            expires_at: now + Duration::seconds(SESSION_TTL_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Stored advising sheet with its course lists in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisingRecord {
    pub id: i32,
    pub student_email: String,
    pub term: String,
    pub date_submitted: DateTime<Utc>,
    pub status: AdvisingStatus,
    pub last_term: String,
    pub last_gpa: f64,
    pub prerequisites: Vec<CourseEntry>,
    pub course_plan: Vec<CourseEntry>,
    pub admin_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAdvisingRecord {
    pub student_email: String,
    pub term: String,
    pub date_submitted: DateTime<Utc>,
    pub last_term: String,
    pub last_gpa: f64,
    pub prerequisites: Vec<CourseEntry>,
    pub course_plan: Vec<CourseEntry>,
}

/// Student edit of a pending sheet. Replaces both course lists.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisingRevision {
    pub date_submitted: DateTime<Utc>,
    pub last_term: String,
    pub last_gpa: f64,
    pub prerequisites: Vec<CourseEntry>,
    pub course_plan: Vec<CourseEntry>,
}

/// Row of a student's own history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisingSummary {
    pub id: i32,
    pub term: String,
    pub status: AdvisingStatus,
    pub date_submitted: DateTime<Utc>,
}

/// Row of the admin sheet list, joined with the student's name and UIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisingSheetSummary {
    pub id: i32,
    pub student_email: String,
    pub first_name: String,
    pub last_name: String,
    pub uin: String,
    pub term: String,
    pub status: AdvisingStatus,
    pub date_submitted: DateTime<Utc>,
}

/// Full sheet as the admin reviews it.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisingSheet {
    pub record: AdvisingRecord,
    pub first_name: String,
    pub last_name: String,
    pub uin: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i32,
    pub level: i32,
    pub course_name: String,
    pub enabled: bool,
}

/// Signup code email subject.
pub const SIGNUP_OTP_SUBJECT: &str = "Your OTP for verification";

/// Login code email subject.
pub const LOGIN_OTP_SUBJECT: &str = "Your OTP for login";
