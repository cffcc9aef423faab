#![allow(async_fn_in_trait)]

use advising_domain::advising::AdvisingStatus;
use advising_domain::course::CatalogKind;

use crate::domain::types::{
    AdvisingRecord, AdvisingRevision, AdvisingSheet, AdvisingSheetSummary, AdvisingSummary,
    Course, NewAdvisingRecord, OtpTicket, OutgoingEmail, PendingSignup, Profile, Session, User,
};
use crate::error::PortalError;

/// Repository for verified accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortalError>;

    async fn create(&self, user: &User) -> Result<(), PortalError>;

    /// Store the login / forgot-password code on the account.
    async fn set_login_otp(&self, email: &str, ticket: &OtpTicket) -> Result<(), PortalError>;

    async fn clear_login_otp(&self, email: &str) -> Result<(), PortalError>;

    /// Returns `false` if no account has this email.
    async fn update_password(&self, email: &str, password_hash: &str)
    -> Result<bool, PortalError>;

    /// Returns `false` if no account has this email.
    async fn update_profile(&self, email: &str, profile: &Profile) -> Result<bool, PortalError>;
}

/// Repository for signups awaiting verification.
pub trait PendingSignupRepository: Send + Sync {
    /// Insert, or replace the pending row for the same email.
    async fn upsert(&self, pending: &PendingSignup) -> Result<(), PortalError>;

    async fn find(&self, email: &str) -> Result<Option<PendingSignup>, PortalError>;

    /// Copy the pending row into `users` as verified and delete it (same transaction).
    /// Returns `false` if there is no pending row.
    async fn promote(&self, email: &str) -> Result<bool, PortalError>;
}

/// Process-local signup codes. Lost on restart.
pub trait SignupTicketStore: Send + Sync {
    /// Replace any previous ticket for `email`.
    async fn put(&self, email: &str, ticket: OtpTicket) -> Result<(), PortalError>;

    async fn get(&self, email: &str) -> Result<Option<OtpTicket>, PortalError>;

    async fn remove(&self, email: &str) -> Result<(), PortalError>;
}

/// Server-side session store.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), PortalError>;

    /// Find an unexpired session by id.
    async fn find_active(&self, id: &str) -> Result<Option<Session>, PortalError>;

    async fn delete(&self, id: &str) -> Result<(), PortalError>;

    /// Delete expired sessions. Returns the number removed.
    async fn purge_expired(&self) -> Result<u64, PortalError>;
}

/// Outbound mail.
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), PortalError>;
}

/// Deliverability check for the domain part of an address.
pub trait DomainVerifier: Send + Sync {
    async fn accepts_mail(&self, domain: &str) -> Result<bool, PortalError>;
}

/// Repository for advising sheets and their course lists.
pub trait AdvisingRepository: Send + Sync {
    async fn find_by_term(
        &self,
        student_email: &str,
        term: &str,
    ) -> Result<Option<AdvisingRecord>, PortalError>;

    /// Planned course names from the student's other sheets.
    ///
    /// `exclude_term` is compared case-insensitively. `exclude_id` skips one sheet.
    async fn taken_courses(
        &self,
        student_email: &str,
        exclude_term: Option<&str>,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>, PortalError>;

    /// Insert the sheet and its course lists atomically. Returns the new id.
    ///
    /// Fails with `DuplicateTerm` if the student already has a sheet for the term.
    async fn create(&self, record: &NewAdvisingRecord) -> Result<i32, PortalError>;

    /// Update the sheet and replace its course lists atomically.
    async fn revise(&self, id: i32, revision: &AdvisingRevision) -> Result<(), PortalError>;

    /// The student's sheets, newest first.
    async fn list_by_student(
        &self,
        student_email: &str,
    ) -> Result<Vec<AdvisingSummary>, PortalError>;

    /// All sheets, newest first.
    async fn list_sheets(&self) -> Result<Vec<AdvisingSheetSummary>, PortalError>;

    async fn find_sheet(&self, id: i32) -> Result<Option<AdvisingSheet>, PortalError>;

    /// Set review outcome. Returns `false` if the sheet does not exist.
    async fn decide(
        &self,
        id: i32,
        status: AdvisingStatus,
        message: &str,
    ) -> Result<bool, PortalError>;
}

/// Repository for both course catalogs.
pub trait CourseRepository: Send + Sync {
    /// All rows, ordered by level then name.
    async fn list(&self, kind: CatalogKind) -> Result<Vec<Course>, PortalError>;

    async fn list_enabled(&self, kind: CatalogKind) -> Result<Vec<Course>, PortalError>;

    /// Returns `false` if no row has this id.
    async fn set_enabled(
        &self,
        kind: CatalogKind,
        id: i32,
        enabled: bool,
    ) -> Result<bool, PortalError>;
}
