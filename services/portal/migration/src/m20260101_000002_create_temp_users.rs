use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TempUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TempUsers::Email)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TempUsers::Password).string_len(255).not_null())
                    .col(ColumnDef::new(TempUsers::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(TempUsers::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(TempUsers::Department).string_len(100).not_null())
                    .col(ColumnDef::new(TempUsers::Degree).string_len(100).not_null())
                    .col(ColumnDef::new(TempUsers::Uin).string_len(32).not_null())
                    .col(
                        ColumnDef::new(TempUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TempUsers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TempUsers {
    Table,
    Email,
    Password,
    FirstName,
    LastName,
    Department,
    Degree,
    Uin,
    CreatedAt,
}
