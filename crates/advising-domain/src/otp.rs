//! One-time password flows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of digits in a one-time code.
pub const OTP_DIGITS: usize = 6;

/// Lowest and highest code that can be issued (inclusive).
pub const OTP_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// One-time code validity in seconds (5 minutes).
pub const OTP_TTL_SECS: i64 = 300;

/// The flow a one-time code belongs to.
///
/// Wire format: `"signup"`, `"login"`, `"forgot-password"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpAction {
    Signup,
    Login,
    ForgotPassword,
}

impl OtpAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::ForgotPassword => "forgot-password",
        }
    }
}

impl fmt::Display for OtpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown otp action: {0}")]
pub struct UnknownOtpAction(pub String);

impl FromStr for OtpAction {
    type Err = UnknownOtpAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "login" => Ok(Self::Login),
            "forgot-password" => Ok(Self::ForgotPassword),
            other => Err(UnknownOtpAction(other.to_owned())),
        }
    }
}
