//! Create `scenes` table.
//! `device_id` is deliberately not a foreign key: the service checks the
//! parent device before writes, and only device deletion cascades here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scenes::Table)
                    .if_not_exists()
                    .col(string_len(Scenes::Id, 24).primary_key())
                    .col(string_len(Scenes::Name, 100).not_null())
                    .col(string_len(Scenes::DeviceId, 24).not_null())
                    .col(timestamp_with_time_zone(Scenes::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Scenes::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Scenes::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Scenes {
    Table,
    Id,
    Name,
    DeviceId,
    CreatedAt,
    UpdatedAt,
}
