use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20240101_000002_create_location_table::Location,
    m20240101_000003_create_app_user_table::AppUser,
    m20240101_000005_create_lookup_tables::{DeviceStatus, DeviceType},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(pk_auto(Device::DeviceId))
                    .col(string_len(Device::DeviceName, 150))
                    .col(string_len_uniq(Device::SerialNumber, 100))
                    .col(integer(Device::DeviceTypeId))
                    .col(integer(Device::DeviceStatusId))
                    .col(integer(Device::LocationId))
                    .col(integer(Device::CreatedByUserId))
                    .col(timestamp_with_time_zone(Device::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Device::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_device_type_id")
                            .from(Device::Table, Device::DeviceTypeId)
                            .to(DeviceType::Table, DeviceType::DeviceTypeId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_device_status_id")
                            .from(Device::Table, Device::DeviceStatusId)
                            .to(DeviceStatus::Table, DeviceStatus::DeviceStatusId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_location_id")
                            .from(Device::Table, Device::LocationId)
                            .to(Location::Table, Location::LocationId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_created_by_user_id")
                            .from(Device::Table, Device::CreatedByUserId)
                            .to(AppUser::Table, AppUser::AppUserId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Filters on the device list
        for (name, column) in [
            ("idx_device_device_status_id", Device::DeviceStatusId),
            ("idx_device_device_type_id", Device::DeviceTypeId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Device::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Device {
    Table,
    DeviceId,
    DeviceName,
    SerialNumber,
    DeviceTypeId,
    DeviceStatusId,
    LocationId,
    CreatedByUserId,
    CreatedAt,
    UpdatedAt,
}
