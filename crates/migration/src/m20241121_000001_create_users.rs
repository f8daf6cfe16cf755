//! Create `users` table.
//!
//! Root of the ownership tree; username and email are unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Username, 255).unique_key())
                    .col(string_len(Users::Password, 255))
                    .col(string_len(Users::Phone, 20))
                    .col(string_len(Users::Email, 255).unique_key())
                    .col(string_len(Users::Language, 5).default("uk"))
                    .col(string_len(Users::Theme, 20).default("light"))
                    .col(string_len_null(Users::DeviceId, 255))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .col(timestamp_with_time_zone(Users::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    Phone,
    Email,
    Language,
    Theme,
    DeviceId,
    CreatedAt,
    UpdatedAt,
}
