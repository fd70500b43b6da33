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
                    .table(UserLocationAccess::Table)
                    .if_not_exists()
                    .col(integer(UserLocationAccess::AppUserId))
                    .col(integer(UserLocationAccess::LocationId))
                    .primary_key(
                        Index::create()
                            .col(UserLocationAccess::AppUserId)
                            .col(UserLocationAccess::LocationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_location_access_app_user_id")
                            .from(UserLocationAccess::Table, UserLocationAccess::AppUserId)
                            .to(AppUser::Table, AppUser::AppUserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_location_access_location_id")
                            .from(UserLocationAccess::Table, UserLocationAccess::LocationId)
                            .to(Location::Table, Location::LocationId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_location_access_location_id")
                    .table(UserLocationAccess::Table)
                    .col(UserLocationAccess::LocationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLocationAccess::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserLocationAccess {
    Table,
    AppUserId,
    LocationId,
}
