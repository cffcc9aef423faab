use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoursePlan::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoursePlan::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CoursePlan::AdvisingHistoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CoursePlan::Position).integer().not_null())
                    .col(ColumnDef::new(CoursePlan::CourseLevel).integer().not_null())
                    .col(ColumnDef::new(CoursePlan::CourseName).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePlan::Table, CoursePlan::AdvisingHistoryId)
                            .to(AdvisingHistory::Table, AdvisingHistory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoursePlan::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CoursePlan {
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
