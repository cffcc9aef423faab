use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prerequisites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Prerequisites::AdvisingHistoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Prerequisites::Position).integer().not_null())
                    .col(ColumnDef::new(Prerequisites::CourseLevel).integer().not_null())
                    .col(ColumnDef::new(Prerequisites::CourseName).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Prerequisites::Table, Prerequisites::AdvisingHistoryId)
                            .to(AdvisingHistory::Table, AdvisingHistory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prerequisites::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prerequisites {
    Table,
    Id,
    AdvisingHistoryId,
    Position,
    CourseLevel,
    CourseName,
}

#[derive(Iden)]
enum AdvisingHistory {
    Table,
    Id,
}
