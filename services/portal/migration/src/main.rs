use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(advising_portal_migration::Migrator).await;
}
