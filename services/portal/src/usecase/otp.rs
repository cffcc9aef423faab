use chrono::{DateTime, Utc};

use advising_domain::email::normalize_email;
use advising_domain::otp::OtpAction;

use crate::crypto::{generate_otp, generate_session_id};
use crate::domain::repository::{
    EmailSender, PendingSignupRepository, SessionRepository, SignupTicketStore, UserRepository,
};
use crate::domain::types::{OtpTicket, OutgoingEmail, Session, User};
use crate::error::PortalError;

/// Mint a fresh code valid for five minutes from `now`.
pub fn issue_ticket(now: DateTime<Utc>) -> OtpTicket {
    OtpTicket::new(generate_otp(), now)
}

pub fn otp_email(to: &str, subject: &str, code: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_owned(),
        subject: subject.to_owned(),
        body: format!("Your OTP is: {code}. It will expire in 5 minutes."),
    }
}

fn parse_action(raw: &str) -> Result<OtpAction, PortalError> {
    raw.trim().parse().map_err(|_| PortalError::InvalidAction)
}

/// Expiry is checked before the code so a late submission always reads as expired.
fn check_ticket(
    ticket: Option<&OtpTicket>,
    submitted: &str,
    now: DateTime<Utc>,
) -> Result<(), PortalError> {
    let ticket = ticket.ok_or(PortalError::OtpExpired)?;
    if !ticket.is_live_at(now) {
        return Err(PortalError::OtpExpired);
    }
    if !ticket.matches(submitted) {
        return Err(PortalError::InvalidOtp);
    }
    Ok(())
}

/// Login and reset codes live on the user row; a row without one never had a code issued.
fn check_login_otp(user: &User, submitted: &str, now: DateTime<Utc>) -> Result<(), PortalError> {
    let ticket = user.login_otp.as_ref().ok_or(PortalError::InvalidOtp)?;
    check_ticket(Some(ticket), submitted, now)
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
    pub action: String,
}

#[derive(Debug)]
pub enum VerifyOtpOutcome {
    /// Pending signup promoted to a verified account.
    SignedUp,
    /// Fully authenticated; the caller should hand out the new session.
    LoggedIn { session: Session },
    /// Caller may proceed to change-password.
    PasswordResetAllowed,
}

pub struct VerifyOtpUseCase<U, P, T, S>
where
    U: UserRepository,
    P: PendingSignupRepository,
    T: SignupTicketStore,
    S: SessionRepository,
{
    pub users: U,
    pub pending: P,
    pub tickets: T,
    pub sessions: S,
}

impl<U, P, T, S> VerifyOtpUseCase<U, P, T, S>
where
    U: UserRepository,
    P: PendingSignupRepository,
    T: SignupTicketStore,
    S: SessionRepository,
{
    /// `previous_session` is the id from the caller's cookie, if any. It is
    /// discarded when a login completes so the verified session gets a fresh id.
    pub async fn execute(
        &self,
        input: VerifyOtpInput,
        previous_session: Option<&str>,
    ) -> Result<VerifyOtpOutcome, PortalError> {
        let action = parse_action(&input.action)?;
        let email = normalize_email(&input.email);
        if email.is_empty() || input.otp.trim().is_empty() {
            return Err(PortalError::MissingFields);
        }
        let now = Utc::now();

        match action {
            OtpAction::Signup => {
                let ticket = self.tickets.get(&email).await?;
                if let Err(e) = check_ticket(ticket.as_ref(), &input.otp, now) {
                    if matches!(e, PortalError::OtpExpired) && ticket.is_some() {
                        self.tickets.remove(&email).await?;
                    }
                    return Err(e);
                }
                if !self.pending.promote(&email).await? {
                    return Err(PortalError::UserNotFound);
                }
                self.tickets.remove(&email).await?;
                tracing::info!(email = %email, "signup verified");
                Ok(VerifyOtpOutcome::SignedUp)
            }
            OtpAction::Login => {
                let user = self.find_user(&email).await?;
                check_login_otp(&user, &input.otp, now)?;
                self.users.clear_login_otp(&email).await?;

                if let Some(previous) = previous_session {
                    self.sessions.delete(previous).await?;
                }
                let session = Session::new(generate_session_id(), email, user.is_admin, true, now);
                self.sessions.create(&session).await?;
                Ok(VerifyOtpOutcome::LoggedIn { session })
            }
            OtpAction::ForgotPassword => {
                let user = self.find_user(&email).await?;
                if user.is_admin {
                    return Err(PortalError::AdminPasswordReset);
                }
                check_login_otp(&user, &input.otp, now)?;
                self.users.clear_login_otp(&email).await?;
                Ok(VerifyOtpOutcome::PasswordResetAllowed)
            }
        }
    }

    async fn find_user(&self, email: &str) -> Result<User, PortalError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(PortalError::UserNotFound)
    }
}

// ── ResendOtp ────────────────────────────────────────────────────────────────

pub struct ResendOtpInput {
    pub email: String,
    pub action: String,
}

pub struct ResendOtpUseCase<U, P, T, M>
where
    U: UserRepository,
    P: PendingSignupRepository,
    T: SignupTicketStore,
    M: EmailSender,
{
    pub users: U,
    pub pending: P,
    pub tickets: T,
    pub mailer: M,
}

impl<U, P, T, M> ResendOtpUseCase<U, P, T, M>
where
    U: UserRepository,
    P: PendingSignupRepository,
    T: SignupTicketStore,
    M: EmailSender,
{
    /// Always mints a new code and expiry. Returns the parsed action.
    pub async fn execute(&self, input: ResendOtpInput) -> Result<OtpAction, PortalError> {
        let action = parse_action(&input.action)?;
        let email = normalize_email(&input.email);
        if email.is_empty() {
            return Err(PortalError::MissingFields);
        }
        let ticket = issue_ticket(Utc::now());

        match action {
            OtpAction::Signup => {
                self.pending
                    .find(&email)
                    .await?
                    .ok_or(PortalError::PendingSignupNotFound)?;
                self.tickets.put(&email, ticket.clone()).await?;
            }
            OtpAction::Login | OtpAction::ForgotPassword => {
                let user = self
                    .users
                    .find_by_email(&email)
                    .await?
                    .ok_or(PortalError::UserNotFound)?;
                if action == OtpAction::ForgotPassword && user.is_admin {
                    return Err(PortalError::AdminPasswordReset);
                }
                self.users.set_login_otp(&email, &ticket).await?;
            }
        }

        let subject = format!("Your new OTP for {action}");
        self.mailer
            .send(&otp_email(&email, &subject, &ticket.code))
            .await?;
        Ok(action)
    }
}
