use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(pk_auto(Location::LocationId))
                    .col(string_len(Location::LocationName, 150))
                    .col(string_len_null(Location::StreetAddress, 255))
                    .col(string_len_null(Location::City, 100))
                    .col(string_len_null(Location::State, 2))
                    .col(string_len_null(Location::ZipCode, 10))
                    .col(string_len_null(Location::ContactNumber, 20))
                    .col(timestamp_with_time_zone(Location::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Location::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Location::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Location {
    Table,
    LocationId,
    LocationName,
    StreetAddress,
    City,
    State,
    ZipCode,
    ContactNumber,
    CreatedAt,
    UpdatedAt,
}
