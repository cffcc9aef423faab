use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;

use advising_session::cookie::CookieSettings;

use crate::infra::db::{
    DbAdvisingRepository, DbCourseRepository, DbPendingSignupRepository, DbSessionRepository,
    DbUserRepository,
};
use crate::infra::dns::DomainCheck;
use crate::infra::mail::Mailer;
use crate::infra::tickets::InMemorySignupTickets;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Signs and verifies the session cookie.
    pub session_key: Key,
    pub cookie: CookieSettings,
    pub tickets: InMemorySignupTickets,
    pub mailer: Mailer,
    pub domains: DomainCheck,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn pending_repo(&self) -> DbPendingSignupRepository {
        DbPendingSignupRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn advising_repo(&self) -> DbAdvisingRepository {
        DbAdvisingRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
