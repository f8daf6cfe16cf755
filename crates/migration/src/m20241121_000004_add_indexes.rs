use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Addresses: index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_user")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await?;

        // Services: index on address_id
        manager
            .create_index(
                Index::create()
                    .name("idx_services_address")
                    .table(Services::Table)
                    .col(Services::AddressId)
                    .to_owned(),
            )
            .await?;

        // Services: one service of each type per address
        manager
            .create_index(
                Index::create()
                    .name("uniq_services_address_type")
                    .table(Services::Table)
                    .col(Services::AddressId)
                    .col(Services::Type)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_services_address_type").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_address").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_addresses_user").table(Addresses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Addresses { Table, UserId }

#[derive(DeriveIden)]
enum Services { Table, AddressId, Type }
