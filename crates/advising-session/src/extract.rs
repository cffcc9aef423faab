//! Signed session-id cookie extractor.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use crate::cookie::SESSION_COOKIE;

/// Session id carried by the signed `advising_sid` cookie.
///
/// Returns 401 if the cookie is absent, empty, or its signature does not verify.
/// Whether the id refers to a live session is decided by the service's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie(pub String);

/// Read and verify the session id from request headers.
pub fn session_id_from_headers(headers: &HeaderMap, key: Key) -> Option<String> {
    SignedCookieJar::from_headers(headers, key)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future so the returned
    // future does not capture `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let id = session_id_from_headers(&parts.headers, Key::from_ref(state));
        async move { id.map(Self).ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> OptionalFromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let id = session_id_from_headers(&parts.headers, Key::from_ref(state));
        async move { Ok(id.map(Self)) }
    }
}
