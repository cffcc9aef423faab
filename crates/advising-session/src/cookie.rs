//! Cookie builders for the session id.
//!
//! The cookie is signed with the service's session key, so a client cannot forge an id.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use time::Duration;

/// Cookie name for the session id.
pub const SESSION_COOKIE: &str = "advising_sid";

/// Session lifetime in seconds (1 day). Used for both the cookie Max-Age and the stored record.
pub const SESSION_TTL_SECS: i64 = 86_400;

/// Deployment-dependent cookie attributes.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    /// `Domain` attribute; host-only when `None`.
    pub domain: Option<String>,
    /// `Secure` attribute. Cross-site delivery (`SameSite=None`) requires it, so an
    /// insecure cookie falls back to `SameSite=Lax` for local development.
    pub secure: bool,
}

fn build(value: String, max_age: Duration, settings: &CookieSettings) -> Cookie<'static> {
    let same_site = if settings.secure {
        SameSite::None
    } else {
        SameSite::Lax
    };
    let mut builder = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(settings.secure)
        .same_site(same_site);
    if let Some(domain) = &settings.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// Set the session-id cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::{Key, SameSite, SignedCookieJar};
/// use advising_session::cookie::{set_session_cookie, CookieSettings, SESSION_COOKIE};
///
/// let settings = CookieSettings { domain: Some("example.edu".to_string()), secure: true };
/// let jar = SignedCookieJar::new(Key::generate());
/// let jar = set_session_cookie(jar, "sid123".to_string(), &settings);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "sid123");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.edu"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert_eq!(cookie.same_site(), Some(SameSite::None));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: SignedCookieJar,
    session_id: String,
    settings: &CookieSettings,
) -> SignedCookieJar {
    jar.add(build(
        session_id,
        Duration::seconds(SESSION_TTL_SECS),
        settings,
    ))
}

/// Clear the session-id cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::{Key, SignedCookieJar};
/// use advising_session::cookie::{
///     clear_session_cookie, set_session_cookie, CookieSettings, SESSION_COOKIE,
/// };
///
/// let settings = CookieSettings::default();
/// let jar = SignedCookieJar::new(Key::generate());
/// let jar = set_session_cookie(jar, "sid123".to_string(), &settings);
/// let jar = clear_session_cookie(jar, &settings);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: SignedCookieJar, settings: &CookieSettings) -> SignedCookieJar {
    jar.add(build(String::new(), Duration::ZERO, settings))
}
