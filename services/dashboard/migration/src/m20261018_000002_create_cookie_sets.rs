use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CookieSets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CookieSets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CookieSets::VisitorId).uuid().not_null())
                    .col(ColumnDef::new(CookieSets::Label).string().not_null())
                    .col(ColumnDef::new(CookieSets::Filename).string().not_null())
                    .col(ColumnDef::new(CookieSets::Cookies).json_binary().not_null())
                    .col(
                        ColumnDef::new(CookieSets::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CookieSets::ValidationStatus)
                            .string_len(16)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(CookieSets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CookieSets::Table, CookieSets::VisitorId)
                            .to(Visitors::Table, Visitors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CookieSets::Table)
                    .col(CookieSets::VisitorId)
                    .col(CookieSets::Active)
                    .name("idx_cookie_sets_visitor_id_active")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cookie_sets_visitor_id_active")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(CookieSets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CookieSets {
    Table,
    Id,
    VisitorId,
    Label,
    Filename,
    Cookies,
    Active,
    ValidationStatus,
    CreatedAt,
}

#[derive(Iden)]
enum Visitors {
    Table,
    Id,
}
