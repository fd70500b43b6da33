//! # Loan Handlers
//!
//! A loan checks a bin out to a citizen on behalf of an employee. It stays
//! active until `returned_at` is recorded, either by a PATCH during check-in or
//! by a full replacement.
//!
//! Calendar dates supplied by clients are stored as midnight UTC. Every
//! response resolves the names of the loan status and both condition grades.

use std::collections::HashMap;

use axum::{Json, http::StatusCode};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use entity::{AppUser, Bin, DeviceCondition, Loan, LoanStatus, loan};
use error::{AppError, DataResponse, MessageResponse, Result};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::find_reference;
use crate::{
    AppState,
    dto::loans::{CreateLoanRequest, LoanNames, LoanResponse, ReplaceLoanRequest, UpdateLoanRequest},
    middleware::auth::AuthenticatedUser,
};

const MISSING_FIELDS: &str = "Missing required fields";

fn loan_not_found() -> AppError { AppError::not_found("Loan not found") }

/// Midnight UTC of a calendar date.
fn start_of_day(date: NaiveDate) -> DateTime<Utc> { date.and_time(NaiveTime::MIN).and_utc() }

/// Reject negative fees, fees with sub-cent precision and fees the column cannot hold.
/// Largest value a `NUMERIC(10, 2)` column holds.
const MAX_DAMAGE_FEE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn check_damage_fee(fee: Option<Decimal>) -> Result<Option<Decimal>> {
    let Some(fee) = fee
    else {
        return Ok(None);
    };

    if fee < Decimal::ZERO {
        return Err(AppError::bad_request("Damage fee must not be negative"));
    }
    if fee.normalize().scale() > 2 {
        return Err(AppError::bad_request("Damage fee must have at most 2 decimal places"));
    }
    if fee > MAX_DAMAGE_FEE {
        return Err(AppError::bad_request("Damage fee must not exceed 99999999.99"));
    }
    Ok(Some(fee))
}

/// Status and condition names keyed by id.
struct NameIndex {
    statuses:   HashMap<i32, String>,
    conditions: HashMap<i32, String>,
}

impl NameIndex {
    async fn load<C: ConnectionTrait>(db: &C) -> Result<Self> {
        let statuses = LoanStatus::find()
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.loan_status_id, s.loan_status_name))
            .collect();
        let conditions = DeviceCondition::find()
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.device_condition_id, c.device_condition_name))
            .collect();

        Ok(Self {
            statuses,
            conditions,
        })
    }

    fn names_for(&self, loan: &loan::Model) -> LoanNames {
        LoanNames {
            loan_status:      self.statuses.get(&loan.loan_status_id).cloned(),
            loan_condition:   self.conditions.get(&loan.loan_condition_id).cloned(),
            return_condition: loan
                .return_condition_id
                .and_then(|id| self.conditions.get(&id).cloned()),
        }
    }

    fn respond(&self, loan: loan::Model) -> LoanResponse {
        let names = self.names_for(&loan);
        LoanResponse::new(loan, names)
    }
}

/// The references every loan carries, checked in a fixed order.
struct LoanReferences {
    bin_id:            i32,
    loan_status_id:    i32,
    citizen_id:        i32,
    employee_id:       i32,
    loan_condition_id: i32,
}

impl LoanReferences {
    async fn verify<C: ConnectionTrait>(&self, db: &C) -> Result<()> {
        find_reference::<Bin, _>(db, self.bin_id, "Invalid bin ID").await?;
        find_reference::<LoanStatus, _>(db, self.loan_status_id, "Invalid status ID").await?;
        find_reference::<AppUser, _>(db, self.citizen_id, "Invalid citizen ID").await?;
        find_reference::<AppUser, _>(db, self.employee_id, "Invalid employee ID").await?;
        find_reference::<DeviceCondition, _>(db, self.loan_condition_id, "Invalid loan condition ID").await?;
        Ok(())
    }
}

async fn find_loan(state: &AppState, id: i32) -> Result<loan::Model> {
    Loan::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(loan_not_found)
}

/// Open a loan
///
/// # Errors
///
/// - 400 `Missing required fields` when any reference or `due_at` is absent
/// - 400 `Invalid ... ID` for the first reference that does not exist
pub async fn create_loan(
    state: &AppState,
    actor: &AuthenticatedUser,
    req: CreateLoanRequest,
) -> Result<(StatusCode, Json<DataResponse<LoanResponse>>)> {
    let (
        Some(bin_id),
        Some(loan_status_id),
        Some(citizen_id),
        Some(employee_id),
        Some(due_at),
        Some(loan_condition_id),
    ) = (
        req.bin_id,
        req.loan_status_id,
        req.citizen_id,
        req.employee_id,
        req.due_at,
        req.loan_condition_id,
    )
    else {
        return Err(AppError::bad_request(MISSING_FIELDS));
    };

    LoanReferences {
        bin_id,
        loan_status_id,
        citizen_id,
        employee_id,
        loan_condition_id,
    }
    .verify(&state.db)
    .await?;

    let now = Utc::now();
    let loan = loan::ActiveModel {
        bin_id: Set(bin_id),
        loan_status_id: Set(loan_status_id),
        citizen_id: Set(citizen_id),
        employee_id: Set(employee_id),
        start_at: Set(now),
        due_at: Set(start_of_day(due_at)),
        returned_at: Set(None),
        loan_condition_id: Set(loan_condition_id),
        loan_condition_notes: Set(req.loan_condition_notes),
        return_condition_id: Set(None),
        return_condition_notes: Set(None),
        damage_fee: Set(None),
        all_accessories_returned: Set(None),
        missing_accessories: Set(None),
        notes: Set(req.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(
        loan_id = %loan.loan_id,
        bin_id = %loan.bin_id,
        actor = %actor.email,
        "Loan created"
    );

    let names = NameIndex::load(&state.db).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Loan created successfully", names.respond(loan))),
    ))
}

/// List every loan
pub async fn list_loans(state: &AppState) -> Result<Json<DataResponse<Vec<LoanResponse>>>> {
    let loans = Loan::find()
        .order_by_asc(loan::Column::LoanId)
        .all(&state.db)
        .await?;

    let names = NameIndex::load(&state.db).await?;
    let data = loans.into_iter().map(|loan| names.respond(loan)).collect();

    Ok(Json(DataResponse::new("Loans retrieved successfully", data)))
}

/// Get a single loan by ID
pub async fn get_loan(state: &AppState, id: i32) -> Result<Json<DataResponse<LoanResponse>>> {
    let loan = find_loan(state, id).await?;
    let names = NameIndex::load(&state.db).await?;

    Ok(Json(DataResponse::new("Loan retrieved successfully", names.respond(loan))))
}

/// Replace every field of a loan
///
/// Optional fields absent from the request are cleared.
pub async fn replace_loan(
    state: &AppState,
    actor: &AuthenticatedUser,
    id: i32,
    req: ReplaceLoanRequest,
) -> Result<Json<DataResponse<LoanResponse>>> {
    let loan = find_loan(state, id).await?;

    let (
        Some(bin_id),
        Some(loan_status_id),
        Some(citizen_id),
        Some(employee_id),
        Some(start_at),
        Some(due_at),
        Some(loan_condition_id),
    ) = (
        req.bin_id,
        req.loan_status_id,
        req.citizen_id,
        req.employee_id,
        req.start_at,
        req.due_at,
        req.loan_condition_id,
    )
    else {
        return Err(AppError::bad_request(MISSING_FIELDS));
    };

    LoanReferences {
        bin_id,
        loan_status_id,
        citizen_id,
        employee_id,
        loan_condition_id,
    }
    .verify(&state.db)
    .await?;

    if let Some(condition_id) = req.return_condition_id {
        find_reference::<DeviceCondition, _>(&state.db, condition_id, "Invalid return condition ID").await?;
    }
    let damage_fee = check_damage_fee(req.damage_fee)?;

    let mut active: loan::ActiveModel = loan.into();
    active.bin_id = Set(bin_id);
    active.loan_status_id = Set(loan_status_id);
    active.citizen_id = Set(citizen_id);
    active.employee_id = Set(employee_id);
    active.start_at = Set(start_of_day(start_at));
    active.due_at = Set(start_of_day(due_at));
    active.returned_at = Set(req.returned_at.map(start_of_day));
    active.loan_condition_id = Set(loan_condition_id);
    active.loan_condition_notes = Set(req.loan_condition_notes);
    active.return_condition_id = Set(req.return_condition_id);
    active.return_condition_notes = Set(req.return_condition_notes);
    active.damage_fee = Set(damage_fee);
    active.all_accessories_returned = Set(req.all_accessories_returned);
    active.missing_accessories = Set(req.missing_accessories);
    active.notes = Set(req.notes);
    active.updated_at = Set(Utc::now());

    let loan = active.update(&state.db).await?;

    info!(loan_id = %id, actor = %actor.email, returned = !loan.is_active(), "Loan replaced");

    let names = NameIndex::load(&state.db).await?;
    Ok(Json(DataResponse::new("Loan replaced successfully", names.respond(loan))))
}

/// Apply the fields present in the request to a loan
///
/// This is how a loan is checked in: `returned_at` together with the return
/// condition, fees and accessory notes.
pub async fn update_loan(
    state: &AppState,
    actor: &AuthenticatedUser,
    id: i32,
    req: UpdateLoanRequest,
) -> Result<Json<DataResponse<LoanResponse>>> {
    let loan = find_loan(state, id).await?;
    let was_active = loan.is_active();

    let mut active: loan::ActiveModel = loan.into();

    if let Some(status_id) = req.loan_status_id {
        find_reference::<LoanStatus, _>(&state.db, status_id, "Invalid loan status ID").await?;
        active.loan_status_id = Set(status_id);
    }
    if let Some(returned_at) = req.returned_at {
        active.returned_at = Set(Some(start_of_day(returned_at)));
    }
    if let Some(condition_id) = req.return_condition_id {
        find_reference::<DeviceCondition, _>(&state.db, condition_id, "Invalid return condition ID").await?;
        active.return_condition_id = Set(Some(condition_id));
    }
    if let Some(notes) = req.return_condition_notes {
        active.return_condition_notes = Set(Some(notes));
    }
    if let Some(fee) = check_damage_fee(req.damage_fee)? {
        active.damage_fee = Set(Some(fee));
    }
    if let Some(all_returned) = req.all_accessories_returned {
        active.all_accessories_returned = Set(Some(all_returned));
    }
    if let Some(missing) = req.missing_accessories {
        active.missing_accessories = Set(Some(missing));
    }
    if let Some(notes) = req.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now());

    let loan = active.update(&state.db).await?;

    if was_active && !loan.is_active() {
        info!(loan_id = %id, actor = %actor.email, "Loan returned");
    }
    else {
        info!(loan_id = %id, actor = %actor.email, "Loan updated");
    }

    let names = NameIndex::load(&state.db).await?;
    Ok(Json(DataResponse::new("Loan updated successfully", names.respond(loan))))
}

/// Delete a loan
pub async fn delete_loan(state: &AppState, actor: &AuthenticatedUser, id: i32) -> Result<Json<MessageResponse>> {
    let result = Loan::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(loan_not_found());
    }

    info!(loan_id = %id, actor = %actor.email, "Loan deleted");
    Ok(Json(MessageResponse::new("Loan deleted successfully")))
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn test_start_of_day_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 21).unwrap();
        let ts = start_of_day(date);

        assert_eq!(ts.date_naive(), date);
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.minute(), 0);
        assert_eq!(ts.to_rfc3339(), "2025-09-21T00:00:00+00:00");
    }

    #[test]
    fn test_damage_fee_accepts_cents() {
        assert_eq!(check_damage_fee(None).unwrap(), None);
        assert_eq!(
            check_damage_fee(Some(Decimal::new(1250, 2))).unwrap(),
            Some(Decimal::new(1250, 2))
        );
        assert_eq!(check_damage_fee(Some(Decimal::ZERO)).unwrap(), Some(Decimal::ZERO));
        // trailing zeros do not count as precision
        assert!(check_damage_fee(Some(Decimal::new(12500, 3))).is_ok());
    }

    #[test]
    fn test_damage_fee_rejects_negative_and_sub_cent() {
        let err = check_damage_fee(Some(Decimal::new(-1, 0))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = check_damage_fee(Some(Decimal::new(1001, 3))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_damage_fee_rejects_values_beyond_column_range() {
        assert_eq!(
            check_damage_fee(Some(Decimal::new(9_999_999_999, 2))).unwrap(),
            Some(Decimal::new(9_999_999_999, 2))
        );

        let err = check_damage_fee(Some(Decimal::new(100_000_000, 0))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Damage fee must not exceed 99999999.99");
        assert_eq!(MAX_DAMAGE_FEE, Decimal::new(9_999_999_999, 2));

        let err = check_damage_fee(Some(Decimal::new(10_i64.pow(12), 0))).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_names_for_resolves_return_condition_only_when_set() {
        let index = NameIndex {
            statuses:   HashMap::from([(1, "Active".to_string())]),
            conditions: HashMap::from([(1, "Good".to_string()), (2, "Damaged".to_string())]),
        };
        let now = Utc::now();
        let mut loan = loan::Model {
            loan_id: 1,
            bin_id: 1,
            loan_status_id: 1,
            citizen_id: 1,
            employee_id: 2,
            start_at: now,
            due_at: now,
            returned_at: None,
            loan_condition_id: 1,
            loan_condition_notes: None,
            return_condition_id: None,
            return_condition_notes: None,
            damage_fee: None,
            all_accessories_returned: None,
            missing_accessories: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let names = index.names_for(&loan);
        assert_eq!(names.loan_status.as_deref(), Some("Active"));
        assert_eq!(names.loan_condition.as_deref(), Some("Good"));
        assert!(names.return_condition.is_none());

        loan.return_condition_id = Some(2);
        assert_eq!(index.names_for(&loan).return_condition.as_deref(), Some("Damaged"));
    }
}
