use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_user_role_table::UserRole;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AppUser::AppUserId))
                    .col(string_len(AppUser::FullName, 100))
                    .col(string_len(AppUser::AppUserFullName, 100))
                    .col(string_len_uniq(AppUser::Email, 100))
                    .col(text(AppUser::PasswordHash))
                    .col(integer(AppUser::UserRoleId))
                    .col(string_len_null(AppUser::DlNum, 50))
                    .col(string_len_null(AppUser::DlState, 2))
                    .col(string_len_null(AppUser::StreetAddress, 255))
                    .col(string_len_null(AppUser::City, 100))
                    .col(string_len_null(AppUser::State, 2))
                    .col(string_len_null(AppUser::ZipCode, 10))
                    .col(string_len_null(AppUser::ContactNumber, 20))
                    .col(date_null(AppUser::DateOfBirth))
                    .col(timestamp_with_time_zone(AppUser::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(AppUser::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_user_user_role_id")
                            .from(AppUser::Table, AppUser::UserRoleId)
                            .to(UserRole::Table, UserRole::UserRoleId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_app_user_user_role_id")
                    .table(AppUser::Table)
                    .col(AppUser::UserRoleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AppUser {
    Table,
    AppUserId,
    FullName,
    AppUserFullName,
    Email,
    PasswordHash,
    UserRoleId,
    DlNum,
    DlState,
    StreetAddress,
    City,
    State,
    ZipCode,
    ContactNumber,
    DateOfBirth,
    CreatedAt,
    UpdatedAt,
}
