//! Loan Entity
//!
//! A bin checked out to a citizen by an employee. A loan is active while
//! `returned_at` is unset and returned once it is set.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "loan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub loan_id:                  i32,
    pub bin_id:                   i32,
    pub loan_status_id:           i32,
    pub citizen_id:               i32,
    pub employee_id:              i32,
    pub start_at:                 chrono::DateTime<chrono::Utc>,
    pub due_at:                   chrono::DateTime<chrono::Utc>,
    pub returned_at:              Option<chrono::DateTime<chrono::Utc>>,
    pub loan_condition_id:        i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub loan_condition_notes:     Option<String>,
    pub return_condition_id:      Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub return_condition_notes:   Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub damage_fee:               Option<Decimal>,
    pub all_accessories_returned: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub missing_accessories:      Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes:                    Option<String>,
    pub created_at:               chrono::DateTime<chrono::Utc>,
    pub updated_at:               chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bin::Entity",
        from = "Column::BinId",
        to = "super::bin::Column::BinId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Bin,
    #[sea_orm(
        belongs_to = "super::loan_status::Entity",
        from = "Column::LoanStatusId",
        to = "super::loan_status::Column::LoanStatusId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    LoanStatus,
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::CitizenId",
        to = "super::app_user::Column::AppUserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Citizen,
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::EmployeeId",
        to = "super::app_user::Column::AppUserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::device_condition::Entity",
        from = "Column::LoanConditionId",
        to = "super::device_condition::Column::DeviceConditionId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    LoanCondition,
    #[sea_orm(
        belongs_to = "super::device_condition::Entity",
        from = "Column::ReturnConditionId",
        to = "super::device_condition::Column::DeviceConditionId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ReturnCondition,
}

impl Related<super::bin::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bin.def() }
}

impl Related<super::loan_status::Entity> for Entity {
    fn to() -> RelationDef { Relation::LoanStatus.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A loan stays active until a return time is recorded.
    pub fn is_active(&self) -> bool { self.returned_at.is_none() }
}
