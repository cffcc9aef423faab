use crate::domain::repository::SessionRepository;
use crate::domain::types::Session;
use crate::error::PortalError;

/// Who may reach a gated endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any OTP-verified session.
    Authenticated,
    /// Verified session of an admin account.
    Admin,
    /// Verified session of a non-admin account.
    Student,
}

// ── Authorize ────────────────────────────────────────────────────────────────

pub struct AuthorizeUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> AuthorizeUseCase<S> {
    pub async fn execute(
        &self,
        session_id: Option<&str>,
        access: Access,
    ) -> Result<Session, PortalError> {
        let id = session_id.ok_or(PortalError::Unauthorized)?;
        let session = self
            .sessions
            .find_active(id)
            .await?
            .ok_or(PortalError::Unauthorized)?;
        if !session.otp_verified {
            return Err(PortalError::OtpNotVerified);
        }
        match access {
            Access::Admin if !session.is_admin => Err(PortalError::AdminOnly),
            Access::Student if session.is_admin => Err(PortalError::StudentOnly),
            _ => Ok(session),
        }
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    /// Succeeds whether or not a session exists.
    pub async fn execute(&self, session_id: Option<&str>) -> Result<(), PortalError> {
        if let Some(id) = session_id {
            self.sessions.delete(id).await?;
        }
        Ok(())
    }
}

// ── PurgeExpiredSessions ─────────────────────────────────────────────────────

pub struct PurgeExpiredSessionsUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> PurgeExpiredSessionsUseCase<S> {
    pub async fn execute(&self) -> Result<u64, PortalError> {
        let removed = self.sessions.purge_expired().await?;
        if removed > 0 {
            tracing::info!(removed, "purged expired sessions");
        }
        Ok(removed)
    }
}
