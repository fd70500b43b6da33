//! Reference tables for device types, device statuses, device conditions and
//! loan statuses.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeviceType::Table)
                    .if_not_exists()
                    .col(pk_auto(DeviceType::DeviceTypeId))
                    .col(string_len_uniq(DeviceType::DeviceTypeName, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeviceStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(DeviceStatus::DeviceStatusId))
                    .col(string_len_uniq(DeviceStatus::StatusName, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeviceCondition::Table)
                    .if_not_exists()
                    .col(pk_auto(DeviceCondition::DeviceConditionId))
                    .col(string_len_uniq(DeviceCondition::DeviceConditionName, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LoanStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(LoanStatus::LoanStatusId))
                    .col(string_len_uniq(LoanStatus::LoanStatusName, 50))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoanStatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceCondition::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceStatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DeviceType {
    Table,
    DeviceTypeId,
    DeviceTypeName,
}

#[derive(DeriveIden)]
pub enum DeviceStatus {
    Table,
    DeviceStatusId,
    StatusName,
}

#[derive(DeriveIden)]
pub enum DeviceCondition {
    Table,
    DeviceConditionId,
    DeviceConditionName,
}

#[derive(DeriveIden)]
pub enum LoanStatus {
    Table,
    LoanStatusId,
    LoanStatusName,
}
