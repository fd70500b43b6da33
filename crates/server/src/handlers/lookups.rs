//! # Lookup Handlers
//!
//! Device types, device statuses, device conditions and loan statuses are
//! small id/name tables with identical endpoints. [`LookupTable`] describes
//! where each one keeps its columns and the handlers are written once against
//! it.

use axum::{Json, http::StatusCode};
use entity::{
    DeviceCondition,
    DeviceStatus,
    DeviceType,
    LoanStatus,
    device_condition,
    device_status,
    device_type,
    loan_status,
};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    IntoActiveModel,
    QueryFilter,
    QueryOrder,
    Set,
};
use tracing::info;
use validator::Validate;

use super::non_blank;
use crate::{
    AppState,
    dto::lookups::{LookupRequest, LookupResponse},
};

/// An id/name table exposed through the lookup endpoints.
pub trait LookupTable: EntityTrait {
    /// Human readable name used in error messages
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    fn name_column() -> Self::Column;

    fn to_response(model: Self::Model) -> LookupResponse;

    fn new_row(name: String) -> Self::ActiveModel;
}

impl LookupTable for DeviceType {
    const LABEL: &'static str = "Device type";

    fn id_column() -> Self::Column { device_type::Column::DeviceTypeId }

    fn name_column() -> Self::Column { device_type::Column::DeviceTypeName }

    fn to_response(model: Self::Model) -> LookupResponse {
        LookupResponse {
            id:   model.device_type_id,
            name: model.device_type_name,
        }
    }

    fn new_row(name: String) -> Self::ActiveModel {
        device_type::ActiveModel {
            device_type_name: Set(name),
            ..Default::default()
        }
    }
}

impl LookupTable for DeviceStatus {
    const LABEL: &'static str = "Device status";

    fn id_column() -> Self::Column { device_status::Column::DeviceStatusId }

    fn name_column() -> Self::Column { device_status::Column::StatusName }

    fn to_response(model: Self::Model) -> LookupResponse {
        LookupResponse {
            id:   model.device_status_id,
            name: model.status_name,
        }
    }

    fn new_row(name: String) -> Self::ActiveModel {
        device_status::ActiveModel {
            status_name: Set(name),
            ..Default::default()
        }
    }
}

impl LookupTable for DeviceCondition {
    const LABEL: &'static str = "Device condition";

    fn id_column() -> Self::Column { device_condition::Column::DeviceConditionId }

    fn name_column() -> Self::Column { device_condition::Column::DeviceConditionName }

    fn to_response(model: Self::Model) -> LookupResponse {
        LookupResponse {
            id:   model.device_condition_id,
            name: model.device_condition_name,
        }
    }

    fn new_row(name: String) -> Self::ActiveModel {
        device_condition::ActiveModel {
            device_condition_name: Set(name),
            ..Default::default()
        }
    }
}

impl LookupTable for LoanStatus {
    const LABEL: &'static str = "Loan status";

    fn id_column() -> Self::Column { loan_status::Column::LoanStatusId }

    fn name_column() -> Self::Column { loan_status::Column::LoanStatusName }

    fn to_response(model: Self::Model) -> LookupResponse {
        LookupResponse {
            id:   model.loan_status_id,
            name: model.loan_status_name,
        }
    }

    fn new_row(name: String) -> Self::ActiveModel {
        loan_status::ActiveModel {
            loan_status_name: Set(name),
            ..Default::default()
        }
    }
}

fn lookup_not_found<T: LookupTable>(id: i32) -> AppError {
    AppError::not_found(format!("{} not found with ID {}", T::LABEL, id))
}

/// List every value of a lookup table ordered by id
pub async fn list_lookups<T: LookupTable>(state: &AppState) -> Result<Json<Vec<LookupResponse>>> {
    let rows = T::find()
        .order_by_asc(T::id_column())
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(T::to_response).collect()))
}

/// Get a single lookup value by ID
pub async fn get_lookup<T: LookupTable>(state: &AppState, id: i32) -> Result<Json<LookupResponse>> {
    let row = T::find()
        .filter(T::id_column().eq(id))
        .one(&state.db)
        .await?
        .ok_or_else(|| lookup_not_found::<T>(id))?;

    Ok(Json(T::to_response(row)))
}

/// Add a lookup value
///
/// # Errors
///
/// - 400 when the name is missing or blank
/// - 409 when the name is taken
pub async fn create_lookup<T>(state: &AppState, req: LookupRequest) -> Result<(StatusCode, Json<LookupResponse>)>
where
    T: LookupTable,
    T::Model: IntoActiveModel<T::ActiveModel>,
    T::ActiveModel: Send,
{
    req.validate()?;

    let name = non_blank(req.name).ok_or_else(|| AppError::bad_request(format!("{} name cannot be empty", T::LABEL)))?;

    let existing = T::find()
        .filter(T::name_column().eq(name.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict(format!("{} '{}' already exists", T::LABEL, name)));
    }

    let row = T::new_row(name).insert(&state.db).await?;
    let response = T::to_response(row);

    info!(table = T::LABEL, id = %response.id, name = %response.name, "Lookup value created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete a lookup value
///
/// Values still referenced by devices or loans cannot be deleted (409).
pub async fn delete_lookup<T: LookupTable>(state: &AppState, id: i32) -> Result<StatusCode> {
    let result = T::delete_many()
        .filter(T::id_column().eq(id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(lookup_not_found::<T>(id));
    }

    info!(table = T::LABEL, id = %id, "Lookup value deleted");
    Ok(StatusCode::NO_CONTENT)
}
