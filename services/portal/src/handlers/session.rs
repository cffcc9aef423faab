//! Session gates for protected routes.
//!
//! Each extractor resolves the signed session cookie against the session store
//! and rejects with the matching `PortalError` when access is not allowed.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::Key;

use advising_session::extract::session_id_from_headers;

use crate::domain::types::Session;
use crate::error::PortalError;
use crate::state::AppState;
use crate::usecase::session::{Access, AuthorizeUseCase};

fn authorize(
    parts: &Parts,
    state: &AppState,
    access: Access,
) -> impl Future<Output = Result<Session, PortalError>> + Send + 'static {
    let id = session_id_from_headers(&parts.headers, Key::from_ref(state));
    let usecase = AuthorizeUseCase {
        sessions: state.session_repo(),
    };
    async move { usecase.execute(id.as_deref(), access).await }
}

/// Any OTP-verified session.
pub struct AuthSession(pub Session);

/// OTP-verified admin session.
pub struct AdminSession(pub Session);

/// OTP-verified student session.
pub struct StudentSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = PortalError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let fut = authorize(parts, state, Access::Authenticated);
        async move { fut.await.map(Self) }
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = PortalError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let fut = authorize(parts, state, Access::Admin);
        async move { fut.await.map(Self) }
    }
}

impl FromRequestParts<AppState> for StudentSession {
    type Rejection = PortalError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let fut = authorize(parts, state, Access::Student);
        async move { fut.await.map(Self) }
    }
}
