//! Migrator registering the subscriber schema in dependency order:
//! users, then addresses, then services. Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241121_000001_create_users;
mod m20241121_000002_create_addresses;
mod m20241121_000003_create_services;
mod m20241121_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241121_000001_create_users::Migration),
            Box::new(m20241121_000002_create_addresses::Migration),
            Box::new(m20241121_000003_create_services::Migration),
            // Indexes should always be applied last
            Box::new(m20241121_000004_add_indexes::Migration),
        ]
    }
}
