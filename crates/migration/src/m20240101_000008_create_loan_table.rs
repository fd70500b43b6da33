use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20240101_000003_create_app_user_table::AppUser,
    m20240101_000005_create_lookup_tables::{DeviceCondition, LoanStatus},
    m20240101_000007_create_bin_table::Bin,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Loan::Table)
                    .if_not_exists()
                    .col(pk_auto(Loan::LoanId))
                    .col(integer(Loan::BinId))
                    .col(integer(Loan::LoanStatusId))
                    .col(integer(Loan::CitizenId))
                    .col(integer(Loan::EmployeeId))
                    .col(timestamp_with_time_zone(Loan::StartAt))
                    .col(timestamp_with_time_zone(Loan::DueAt))
                    .col(timestamp_with_time_zone_null(Loan::ReturnedAt))
                    .col(integer(Loan::LoanConditionId))
                    .col(text_null(Loan::LoanConditionNotes))
                    .col(integer_null(Loan::ReturnConditionId))
                    .col(text_null(Loan::ReturnConditionNotes))
                    .col(decimal_len_null(Loan::DamageFee, 10, 2))
                    .col(boolean_null(Loan::AllAccessoriesReturned))
                    .col(text_null(Loan::MissingAccessories))
                    .col(text_null(Loan::Notes))
                    .col(timestamp_with_time_zone(Loan::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Loan::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_bin_id")
                            .from(Loan::Table, Loan::BinId)
                            .to(Bin::Table, Bin::BinId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_loan_status_id")
                            .from(Loan::Table, Loan::LoanStatusId)
                            .to(LoanStatus::Table, LoanStatus::LoanStatusId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_citizen_id")
                            .from(Loan::Table, Loan::CitizenId)
                            .to(AppUser::Table, AppUser::AppUserId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_employee_id")
                            .from(Loan::Table, Loan::EmployeeId)
                            .to(AppUser::Table, AppUser::AppUserId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_loan_condition_id")
                            .from(Loan::Table, Loan::LoanConditionId)
                            .to(DeviceCondition::Table, DeviceCondition::DeviceConditionId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_return_condition_id")
                            .from(Loan::Table, Loan::ReturnConditionId)
                            .to(DeviceCondition::Table, DeviceCondition::DeviceConditionId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_loan_bin_id", Loan::BinId),
            ("idx_loan_citizen_id", Loan::CitizenId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Loan::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Loan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Loan {
    Table,
    LoanId,
    BinId,
    LoanStatusId,
    CitizenId,
    EmployeeId,
    StartAt,
    DueAt,
    ReturnedAt,
    LoanConditionId,
    LoanConditionNotes,
    ReturnConditionId,
    ReturnConditionNotes,
    DamageFee,
    AllAccessoriesReturned,
    MissingAccessories,
    Notes,
    CreatedAt,
    UpdatedAt,
}
