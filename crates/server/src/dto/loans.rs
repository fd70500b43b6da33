//! # Loan Data Transfer Objects
//!
//! Loan bodies use snake_case keys. Requests also accept the camelCase
//! spelling of each key (`binId`, `dueAt`, ...) used by older clients.
//!
//! Dates in requests are calendar dates (`2025-09-21`) stored as midnight UTC.

use chrono::NaiveDate;
use entity::loan;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Request to open a loan
///
/// Every reference is optional at the serde level so that a missing one is
/// reported as `Missing required fields` rather than by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateLoanRequest {
    #[serde(alias = "binId")]
    pub bin_id:               Option<i32>,
    #[serde(alias = "loanStatusId")]
    pub loan_status_id:       Option<i32>,
    #[serde(alias = "citizenId")]
    pub citizen_id:           Option<i32>,
    #[serde(alias = "employeeId")]
    pub employee_id:          Option<i32>,
    #[serde(alias = "dueAt")]
    pub due_at:               Option<NaiveDate>,
    #[serde(alias = "loanConditionId")]
    pub loan_condition_id:    Option<i32>,
    #[serde(alias = "loanConditionNotes")]
    pub loan_condition_notes: Option<String>,
    pub notes:                Option<String>,
}

/// Full replacement of a loan; absent optional fields are cleared
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplaceLoanRequest {
    #[serde(alias = "binId")]
    pub bin_id:                   Option<i32>,
    #[serde(alias = "loanStatusId")]
    pub loan_status_id:           Option<i32>,
    #[serde(alias = "citizenId")]
    pub citizen_id:               Option<i32>,
    #[serde(alias = "employeeId")]
    pub employee_id:              Option<i32>,
    #[serde(alias = "startAt")]
    pub start_at:                 Option<NaiveDate>,
    #[serde(alias = "dueAt")]
    pub due_at:                   Option<NaiveDate>,
    #[serde(alias = "returnedAt")]
    pub returned_at:              Option<NaiveDate>,
    #[serde(alias = "loanConditionId")]
    pub loan_condition_id:        Option<i32>,
    #[serde(alias = "loanConditionNotes")]
    pub loan_condition_notes:     Option<String>,
    #[serde(alias = "returnConditionId")]
    pub return_condition_id:      Option<i32>,
    #[serde(alias = "returnConditionNotes")]
    pub return_condition_notes:   Option<String>,
    #[serde(alias = "damageFee")]
    pub damage_fee:               Option<Decimal>,
    #[serde(alias = "allAccessoriesReturned")]
    pub all_accessories_returned: Option<bool>,
    #[serde(alias = "missingAccessories")]
    pub missing_accessories:      Option<String>,
    pub notes:                    Option<String>,
}

/// Partial update of a loan; only present fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateLoanRequest {
    #[serde(alias = "loanStatusId")]
    pub loan_status_id:           Option<i32>,
    #[serde(alias = "returnedAt")]
    pub returned_at:              Option<NaiveDate>,
    #[serde(alias = "returnConditionId", alias = "returnCondition")]
    pub return_condition_id:      Option<i32>,
    #[serde(alias = "returnConditionNotes")]
    pub return_condition_notes:   Option<String>,
    #[serde(alias = "damageFee")]
    pub damage_fee:               Option<Decimal>,
    #[serde(alias = "allAccessoriesReturned")]
    pub all_accessories_returned: Option<bool>,
    #[serde(alias = "missingAccessories")]
    pub missing_accessories:      Option<String>,
    pub notes:                    Option<String>,
}

/// A loan with the names of its status and conditions resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResponse {
    pub loan_id:                  i32,
    pub bin_id:                   i32,
    pub loan_status_id:           i32,
    pub loan_status_name:         Option<String>,
    pub citizen_id:               i32,
    pub employee_id:              i32,
    pub start_at:                 String,
    pub due_at:                   String,
    pub returned_at:              Option<String>,
    pub loan_condition_id:        i32,
    pub loan_condition_name:      Option<String>,
    pub loan_condition_notes:     Option<String>,
    pub return_condition_id:      Option<i32>,
    pub return_condition_name:    Option<String>,
    pub return_condition_notes:   Option<String>,
    /// A JSON number, not the default string encoding
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub damage_fee:               Option<Decimal>,
    pub all_accessories_returned: Option<bool>,
    pub missing_accessories:      Option<String>,
    pub notes:                    Option<String>,
    pub created_at:               String,
    pub updated_at:               String,
}

/// Resolved names for a loan's foreign keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanNames {
    pub loan_status:      Option<String>,
    pub loan_condition:   Option<String>,
    pub return_condition: Option<String>,
}

impl LoanResponse {
    pub fn new(model: loan::Model, names: LoanNames) -> Self {
        Self {
            loan_id: model.loan_id,
            bin_id: model.bin_id,
            loan_status_id: model.loan_status_id,
            loan_status_name: names.loan_status,
            citizen_id: model.citizen_id,
            employee_id: model.employee_id,
            start_at: timestamp(&model.start_at),
            due_at: timestamp(&model.due_at),
            returned_at: model.returned_at.as_ref().map(timestamp),
            loan_condition_id: model.loan_condition_id,
            loan_condition_name: names.loan_condition,
            loan_condition_notes: model.loan_condition_notes,
            return_condition_id: model.return_condition_id,
            return_condition_name: names.return_condition,
            return_condition_notes: model.return_condition_notes,
            damage_fee: model.damage_fee,
            all_accessories_returned: model.all_accessories_returned,
            missing_accessories: model.missing_accessories,
            notes: model.notes,
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }
}
