use sea_orm::entity::prelude::*;

/// One advising sheet per (student, term).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "advising_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_email: String,
    pub term: String,
    pub date_submitted: chrono::DateTime<chrono::Utc>,
    /// `Pending`, `Approved` or `Rejected`.
    pub status: String,
    pub last_term: String,
    pub last_gpa: f64,
    pub admin_message: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentEmail",
        to = "super::users::Column::Email"
    )]
    Student,
    #[sea_orm(has_many = "super::prerequisites::Entity")]
    Prerequisites,
    #[sea_orm(has_many = "super::course_plan::Entity")]
    CoursePlan,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::prerequisites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prerequisites.def()
    }
}

impl Related<super::course_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoursePlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
