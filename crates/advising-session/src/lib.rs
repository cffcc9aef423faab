//! Session cookie contract shared by portal services.
//!
//! Provides the signed session-id cookie builders and the `SessionCookie` extractor.
//! Session records themselves live in the service's store.

pub mod cookie;
pub mod extract;
