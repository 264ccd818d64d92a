use sea_orm_migration::prelude::*;

mod m20261018_000001_create_visitors;
mod m20261018_000002_create_cookie_sets;
mod m20261018_000003_create_activation_attempts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_visitors::Migration),
            Box::new(m20261018_000002_create_cookie_sets::Migration),
            Box::new(m20261018_000003_create_activation_attempts::Migration),
        ]
    }
}
