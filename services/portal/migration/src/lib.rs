use sea_orm_migration::prelude::*;

mod m20260101_000001_create_users;
mod m20260101_000002_create_temp_users;
mod m20260101_000003_create_sessions;
mod m20260101_000004_create_courses;
mod m20260101_000005_create_course_catalog;
mod m20260101_000006_create_advising_history;
mod m20260101_000007_create_prerequisites;
mod m20260101_000008_create_course_plan;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_users::Migration),
            Box::new(m20260101_000002_create_temp_users::Migration),
            Box::new(m20260101_000003_create_sessions::Migration),
            Box::new(m20260101_000004_create_courses::Migration),
            Box::new(m20260101_000005_create_course_catalog::Migration),
            Box::new(m20260101_000006_create_advising_history::Migration),
            Box::new(m20260101_000007_create_prerequisites::Migration),
            Box::new(m20260101_000008_create_course_plan::Migration),
        ]
    }
}
