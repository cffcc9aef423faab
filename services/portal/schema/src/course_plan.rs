use sea_orm::entity::prelude::*;

/// Course planned on an advising sheet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_plan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub advising_history_id: i32,
    /// Order within the sheet, starting at 0.
    pub position: i32,
    pub course_level: i32,
    pub course_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::advising_history::Entity",
        from = "Column::AdvisingHistoryId",
        to = "super::advising_history::Column::Id"
    )]
    AdvisingHistory,
}

impl Related<super::advising_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvisingHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
