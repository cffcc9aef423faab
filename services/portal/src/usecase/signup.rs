use chrono::Utc;

use advising_domain::email::{email_domain, is_valid_email_format, normalize_email};
use advising_domain::password::meets_password_policy;

use crate::crypto::hash_password;
use crate::domain::repository::{
    DomainVerifier, EmailSender, PendingSignupRepository, SignupTicketStore, UserRepository,
};
use crate::domain::types::{PendingSignup, Profile, SIGNUP_OTP_SUBJECT};
use crate::error::PortalError;
use crate::usecase::otp::{issue_ticket, otp_email};

pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

pub struct SignupUseCase<U, P, T, D, M>
where
    U: UserRepository,
    P: PendingSignupRepository,
    T: SignupTicketStore,
    D: DomainVerifier,
    M: EmailSender,
{
    pub users: U,
    pub pending: P,
    pub tickets: T,
    pub domains: D,
    pub mailer: M,
}

impl<U, P, T, D, M> SignupUseCase<U, P, T, D, M>
where
    U: UserRepository,
    P: PendingSignupRepository,
    T: SignupTicketStore,
    D: DomainVerifier,
    M: EmailSender,
{
    /// Stage the signup and email a code. Returns the normalized email.
    pub async fn execute(&self, input: SignupInput) -> Result<String, PortalError> {
        // 1. Shape checks, cheapest first
        if input.email.trim().is_empty() || input.password.is_empty() || !input.profile.is_complete()
        {
            return Err(PortalError::MissingFields);
        }
        if !meets_password_policy(&input.password) {
            return Err(PortalError::WeakPassword);
        }
        let email = normalize_email(&input.email);
        if !is_valid_email_format(&email) {
            return Err(PortalError::InvalidEmailFormat);
        }

        // 2. Domain must accept mail
        let domain = email_domain(&email).ok_or(PortalError::InvalidEmailFormat)?;
        if !self.domains.accepts_mail(domain).await? {
            return Err(PortalError::UndeliverableEmail);
        }

        // 3. Existing accounts
        if let Some(existing) = self.users.find_by_email(&email).await? {
            return Err(if existing.is_admin {
                PortalError::AdminEmail
            } else {
                PortalError::UserAlreadyExists
            });
        }

        // 4. Stage + issue code
        let now = Utc::now();
        self.pending
            .upsert(&PendingSignup {
                email: email.clone(),
                password_hash: hash_password(&input.password)?,
                profile: input.profile,
                created_at: now,
            })
            .await?;

        let ticket = issue_ticket(now);
        let code = ticket.code.clone();
        self.tickets.put(&email, ticket).await?;
        self.mailer
            .send(&otp_email(&email, SIGNUP_OTP_SUBJECT, &code))
            .await?;

        tracing::info!(email = %email, "signup staged");
        Ok(email)
    }
}
