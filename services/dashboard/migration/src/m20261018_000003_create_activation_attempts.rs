use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivationAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivationAttempts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::VisitorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::Code)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::Method)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::Outcome)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::Success)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::Message)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationAttempts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivationAttempts::Table, ActivationAttempts::VisitorId)
                            .to(Visitors::Table, Visitors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ActivationAttempts::Table)
                    .col(ActivationAttempts::VisitorId)
                    .col(ActivationAttempts::CreatedAt)
                    .name("idx_activation_attempts_visitor_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_activation_attempts_visitor_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ActivationAttempts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActivationAttempts {
    Table,
    Id,
    VisitorId,
    Code,
    Method,
    Outcome,
    Success,
    Message,
    CreatedAt,
}

#[derive(Iden)]
enum Visitors {
    Table,
    Id,
}
