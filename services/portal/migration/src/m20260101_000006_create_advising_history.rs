use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdvisingHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdvisingHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdvisingHistory::StudentEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdvisingHistory::Term).string_len(64).not_null())
                    .col(
                        ColumnDef::new(AdvisingHistory::DateSubmitted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdvisingHistory::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(AdvisingHistory::LastTerm)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdvisingHistory::LastGpa).double().not_null())
                    .col(ColumnDef::new(AdvisingHistory::AdminMessage).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdvisingHistory::Table, AdvisingHistory::StudentEmail)
                            .to(Users::Table, Users::Email)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AdvisingHistory::Table)
                    .col(AdvisingHistory::StudentEmail)
                    .col(AdvisingHistory::Term)
                    .unique()
                    .name("uq_advising_history_student_term")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdvisingHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdvisingHistory {
    Table,
    Id,
    StudentEmail,
    Term,
    DateSubmitted,
    Status,
    LastTerm,
    LastGpa,
    AdminMessage,
}

#[derive(Iden)]
enum Users {
    Table,
    Email,
}
