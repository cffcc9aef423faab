use sea_orm::entity::prelude::*;

/// Course-plan catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub level: i32,
    pub course_name: String,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
