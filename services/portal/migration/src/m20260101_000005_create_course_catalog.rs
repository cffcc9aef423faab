use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseCatalog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseCatalog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseCatalog::Level).integer().not_null())
                    .col(ColumnDef::new(CourseCatalog::CourseName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(CourseCatalog::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseCatalog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseCatalog {
    Table,
    Id,
    Level,
    CourseName,
    Enabled,
}
