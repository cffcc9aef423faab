//! sea-orm entities for the advising portal database.

pub mod advising_history;
pub mod course_catalog;
pub mod course_plan;
pub mod courses;
pub mod prerequisites;
pub mod sessions;
pub mod temp_users;
pub mod users;
