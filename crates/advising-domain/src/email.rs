//! Email address normalization and format rules.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Canonical form used as the account key: trimmed and lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Basic address shape check (`local@domain.tld`). Expects a normalized address.
pub fn is_valid_email_format(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}

/// Domain part after the last `@`, if any.
pub fn email_domain(email: &str) -> Option<&str> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|d| !d.is_empty())
}
