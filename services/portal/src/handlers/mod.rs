pub mod admin;
pub mod advising;
pub mod auth;
pub mod health;
pub mod pages;
pub mod session;
