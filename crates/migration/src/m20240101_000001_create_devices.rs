//! Create `devices` table.
//! The IP address is unique across all devices.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(string_len(Devices::Id, 24).primary_key())
                    .col(string_len(Devices::Name, 100).not_null())
                    .col(string_len(Devices::Ip, 15).not_null())
                    .col(timestamp_with_time_zone(Devices::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Devices::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_devices_ip")
                    .table(Devices::Table)
                    .col(Devices::Ip)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Devices::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Devices {
    Table,
    Id,
    Name,
    Ip,
    CreatedAt,
    UpdatedAt,
}
