pub mod admin;
pub mod advising;
pub mod bootstrap;
pub mod course;
pub mod login;
pub mod otp;
pub mod password;
pub mod profile;
pub mod session;
pub mod signup;
