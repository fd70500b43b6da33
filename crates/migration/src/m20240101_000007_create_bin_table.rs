use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20240101_000002_create_location_table::Location, m20240101_000003_create_app_user_table::AppUser};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bin::Table)
                    .if_not_exists()
                    .col(pk_auto(Bin::BinId))
                    .col(string_len_uniq(Bin::AssetTag, 50))
                    .col(string_len_null(Bin::BinContents, 255))
                    .col(integer(Bin::CreatedByUserId))
                    .col(integer(Bin::LocationId))
                    .col(timestamp_with_time_zone(Bin::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Bin::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bin_created_by_user_id")
                            .from(Bin::Table, Bin::CreatedByUserId)
                            .to(AppUser::Table, AppUser::AppUserId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bin_location_id")
                            .from(Bin::Table, Bin::LocationId)
                            .to(Location::Table, Location::LocationId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bin {
    Table,
    BinId,
    AssetTag,
    BinContents,
    CreatedByUserId,
    LocationId,
    CreatedAt,
    UpdatedAt,
}
