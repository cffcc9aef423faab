//! Domain types shared across the advising portal.
//!
//! This crate contains only pure types and rules with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod advising;
pub mod course;
pub mod email;
pub mod otp;
pub mod password;
