//! Password policy.

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Special characters a password may (and must, at least once) contain.
pub const PASSWORD_SPECIALS: &str = "@$!%*#?&";

/// Returns `true` if `password` satisfies the account password policy:
/// at least [`MIN_PASSWORD_LEN`] characters drawn only from ASCII letters, ASCII digits
/// and [`PASSWORD_SPECIALS`], with at least one of each class.
pub fn meets_password_policy(password: &str) -> bool {
    let mut len = 0;
    let (mut letter, mut digit, mut special) = (false, false, false);

    for c in password.chars() {
        len += 1;
        if c.is_ascii_alphabetic() {
            letter = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if PASSWORD_SPECIALS.contains(c) {
            special = true;
        } else {
            return false;
        }
    }

    len >= MIN_PASSWORD_LEN && letter && digit && special
}
