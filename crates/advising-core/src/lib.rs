//! Service plumbing shared by advising portal binaries.

pub mod cors;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
