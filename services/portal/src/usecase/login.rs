use chrono::Utc;

use advising_domain::email::normalize_email;

use crate::crypto::{generate_session_id, verify_password};
use crate::domain::repository::{EmailSender, SessionRepository, UserRepository};
use crate::domain::types::{LOGIN_OTP_SUBJECT, Session};
use crate::error::PortalError;
use crate::usecase::otp::{issue_ticket, otp_email};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub email: String,
    pub is_admin: bool,
    /// A live code already existed and was sent again.
    pub resent: bool,
    /// Unverified session; becomes usable only after OTP verification.
    pub session: Session,
}

pub struct LoginUseCase<U, S, M>
where
    U: UserRepository,
    S: SessionRepository,
    M: EmailSender,
{
    pub users: U,
    pub sessions: S,
    pub mailer: M,
}

impl<U, S, M> LoginUseCase<U, S, M>
where
    U: UserRepository,
    S: SessionRepository,
    M: EmailSender,
{
    pub async fn execute(
        &self,
        input: LoginInput,
        previous_session: Option<&str>,
    ) -> Result<LoginOutcome, PortalError> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(PortalError::MissingCredentials);
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(PortalError::UnknownEmail)?;
        if !verify_password(&input.password, &user.password_hash)? {
            return Err(PortalError::InvalidPassword);
        }

        // Reuse a live code so retries don't invalidate the one already in the inbox.
        let now = Utc::now();
        let (code, resent) = match user.login_otp.filter(|t| t.is_live_at(now)) {
            Some(live) => (live.code, true),
            None => {
                let ticket = issue_ticket(now);
                self.users.set_login_otp(&email, &ticket).await?;
                (ticket.code, false)
            }
        };
        self.mailer
            .send(&otp_email(&email, LOGIN_OTP_SUBJECT, &code))
            .await?;

        if let Some(previous) = previous_session {
            self.sessions.delete(previous).await?;
        }
        let session = Session::new(
            generate_session_id(),
            email.clone(),
            user.is_admin,
            false,
            now,
        );
        self.sessions.create(&session).await?;

        Ok(LoginOutcome {
            email,
            is_admin: user.is_admin,
            resent,
            session,
        })
    }
}
