use advising_session::cookie::CookieSettings;
use url::Url;

use crate::usecase::bootstrap::AdminSeed;

const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "https://wpproject-frontend.web.app",
    "https://wpproject-frontend.firebaseapp.com",
];

/// Portal service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PortalConfig {
    /// MySQL connection URL. Env var: `DATABASE_URL`, or assembled from `DB_*`.
    pub database_url: String,
    /// TCP port to listen on (default 4000). Env var: `PORT`.
    pub port: u16,
    /// Master secret for the signed session cookie (at least 32 bytes).
    pub session_secret: String,
    pub cookie: CookieSettings,
    pub cors_origins: Vec<String>,
    /// `None` when `EMAIL_USER` is unset; mail is then only logged.
    pub smtp: Option<SmtpConfig>,
    /// MX lookup on signup (default true). Env var: `MX_CHECK`.
    pub mx_check: bool,
    /// Admin account created at startup when `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    pub admin: Option<AdminSeed>,
}

#[derive(Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub user: String,
    pub password: String,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let session_secret = std::env::var("SESSION_SECRET").expect("SESSION_SECRET");
        assert!(
            session_secret.len() >= 32,
            "SESSION_SECRET must be at least 32 bytes"
        );

        Self {
            database_url: database_url(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
            session_secret,
            cookie: CookieSettings {
                domain: std::env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty()),
                secure: flag("COOKIE_SECURE", true),
            },
            cors_origins: cors_origins(),
            smtp: std::env::var("EMAIL_USER").ok().map(|user| SmtpConfig {
                host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_owned()),
                password: std::env::var("EMAIL_PASS").expect("EMAIL_PASS"),
                user,
            }),
            mx_check: flag("MX_CHECK", true),
            admin: admin_seed(),
        }
    }
}

fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }
    let host = std::env::var("DB_HOST").expect("DB_HOST");
    let user = std::env::var("DB_USER").expect("DB_USER");
    let password = std::env::var("DB_PASSWORD").expect("DB_PASSWORD");
    let name = std::env::var("DB_NAME").expect("DB_NAME");
    let port = std::env::var("DB_PORT").unwrap_or_else(|_| "3306".to_owned());
    mysql_url(&host, &port, &name, &user, &password)
}

/// Credentials are percent-encoded so reserved characters stay inside the userinfo.
fn mysql_url(host: &str, port: &str, name: &str, user: &str, password: &str) -> String {
    let mut url = Url::parse(&format!("mysql://{host}:{port}/{name}"))
        .expect("DB_HOST, DB_PORT and DB_NAME must form a valid URL");
    url.set_username(user).expect("DB_USER");
    url.set_password(Some(password)).expect("DB_PASSWORD");
    url.into()
}

fn cors_origins() -> Vec<String> {
    match std::env::var("CORS_ORIGINS") {
        Ok(raw) => parse_origins(&raw),
        Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|o| (*o).to_owned()).collect(),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_owned)
        .collect()
}

fn flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| parse_flag(&v, default))
        .unwrap_or(default)
}

fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn admin_seed() -> Option<AdminSeed> {
    let email = std::env::var("ADMIN_EMAIL").ok()?;
    let password = std::env::var("ADMIN_PASSWORD").ok()?;
    Some(AdminSeed {
        email,
        password,
        first_name: std::env::var("ADMIN_FIRST_NAME").unwrap_or_else(|_| "Admin".to_owned()),
        last_name: std::env::var("ADMIN_LAST_NAME").unwrap_or_else(|_| "User".to_owned()),
    })
}
