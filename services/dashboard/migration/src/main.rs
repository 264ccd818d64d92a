use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(tvlink_dashboard_migration::Migrator).await;
}
