use sea_orm::entity::prelude::*;

/// Verified account. Login one-time codes live on the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub degree: String,
    pub uin: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub otp: Option<String>,
    /// Epoch milliseconds.
    pub otp_expiration: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::advising_history::Entity")]
    AdvisingHistory,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::advising_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvisingHistory.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
