//! # API Router Configuration
//!
//! Configures API routes for the Loantrack application.
//!
//! Every `/api` route passes through the authentication middleware, which
//! decides from the method and path whether the route is public, Admin only
//! or open to Admin and Employee.

use axum::{
    Json,
    Router,
    extract::{Extension, Request, State as AxumState},
    http::StatusCode,
    middleware::{self, Next},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use entity::{DeviceCondition, DeviceStatus, DeviceType, LoanStatus};
use error::{DataResponse, MessageResponse, Result};
use sea_orm::IntoActiveModel;

use crate::{
    AppState,
    dto::{
        app_users::{AppUserListQuery, AppUserResponse, CreateAppUserRequest, UpdateAppUserRequest},
        auth::LoginRequest,
        bins::{BinResponse, CreateBinRequest, UpdateBinRequest},
        devices::{CreateDeviceRequest, DeviceListQuery, DeviceResponse, UpdateDeviceRequest},
        loans::{CreateLoanRequest, LoanResponse, ReplaceLoanRequest, UpdateLoanRequest},
        locations::{LocationListQuery, LocationRequest, LocationResponse, LocationSummary},
        lookups::{LookupRequest, LookupResponse},
        user_location_access::{AccessResponse, CreateAccessRequest, UpdateAccessRequest},
        user_roles::{CreateUserRoleRequest, UpdateUserRoleRequest, UserRoleResponse},
    },
    extract::{ApiJson, ApiPath, ApiQuery},
    handlers::{
        app_users,
        bins,
        devices,
        loans,
        locations,
        lookups::{self, LookupTable},
        user_location_access,
        user_roles,
    },
    middleware::{
        auth::{AuthenticatedUser, auth_middleware},
        request_id::request_id_middleware,
        security_headers::{cors_middleware, security_headers_middleware},
    },
};

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and config
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Auth
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        // User roles
        .route("/api/user-roles", get(list_user_roles_handler).post(create_user_role_handler))
        .route(
            "/api/user-roles/:id",
            get(get_user_role_handler)
                .patch(update_user_role_handler)
                .delete(delete_user_role_handler),
        )
        // App users
        .route("/api/app-users", get(list_app_users_handler).post(create_app_user_handler))
        .route(
            "/api/app-users/:id",
            get(get_app_user_handler)
                .put(update_app_user_handler)
                .delete(delete_app_user_handler),
        )
        // Locations
        .route("/api/locations", get(list_locations_handler).post(create_location_handler))
        .route(
            "/api/locations/:id",
            get(get_location_handler)
                .put(update_location_handler)
                .delete(delete_location_handler),
        )
        // Devices
        .route("/api/devices", get(list_devices_handler).post(create_device_handler))
        .route(
            "/api/devices/:id",
            get(get_device_handler)
                .put(update_device_handler)
                .delete(delete_device_handler),
        )
        // Lookups
        .route(
            "/api/device-types",
            get(list_lookups_handler::<DeviceType>).post(create_lookup_handler::<DeviceType>),
        )
        .route(
            "/api/device-types/:id",
            get(get_lookup_handler::<DeviceType>).delete(delete_lookup_handler::<DeviceType>),
        )
        .route(
            "/api/device-statuses",
            get(list_lookups_handler::<DeviceStatus>).post(create_lookup_handler::<DeviceStatus>),
        )
        .route(
            "/api/device-statuses/:id",
            get(get_lookup_handler::<DeviceStatus>).delete(delete_lookup_handler::<DeviceStatus>),
        )
        .route(
            "/api/device-conditions",
            get(list_lookups_handler::<DeviceCondition>).post(create_lookup_handler::<DeviceCondition>),
        )
        .route(
            "/api/device-conditions/:id",
            get(get_lookup_handler::<DeviceCondition>).delete(delete_lookup_handler::<DeviceCondition>),
        )
        .route(
            "/api/loan-statuses",
            get(list_lookups_handler::<LoanStatus>).post(create_lookup_handler::<LoanStatus>),
        )
        .route(
            "/api/loan-statuses/:id",
            get(get_lookup_handler::<LoanStatus>).delete(delete_lookup_handler::<LoanStatus>),
        )
        // Bins
        .route("/api/bins", get(list_bins_handler).post(create_bin_handler))
        .route(
            "/api/bins/:id",
            get(get_bin_handler)
                .put(update_bin_handler)
                .delete(delete_bin_handler),
        )
        // Loans
        .route("/api/loans", get(list_loans_handler).post(create_loan_handler))
        .route(
            "/api/loans/:id",
            get(get_loan_handler)
                .put(replace_loan_handler)
                .patch(update_loan_handler)
                .delete(delete_loan_handler),
        )
        // User location access
        .route(
            "/api/user-locations-access",
            get(list_access_handler).post(create_access_handler),
        )
        .route(
            "/api/user-locations-access/:user_id/:location_id",
            get(get_access_handler)
                .put(update_access_handler)
                .delete(delete_access_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

// Auth

/// Wrapper handler for login endpoint that uses State extractor
async fn login_handler(
    AxumState(state): AxumState<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    crate::auth::handlers::login_handler_inner(&state, jar, req).await
}

/// Wrapper handler for logout endpoint that uses State extractor
async fn logout_handler(
    AxumState(state): AxumState<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    crate::auth::handlers::logout_handler_inner(&state, jar).await
}

// User roles

async fn list_user_roles_handler(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<UserRoleResponse>>> {
    user_roles::list_user_roles(&state).await
}

async fn get_user_role_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<UserRoleResponse>> {
    user_roles::get_user_role(&state, id).await
}

async fn create_user_role_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateUserRoleRequest>,
) -> Result<(StatusCode, Json<UserRoleResponse>)> {
    user_roles::create_user_role(&state, req).await
}

async fn update_user_role_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateUserRoleRequest>,
) -> Result<Json<UserRoleResponse>> {
    user_roles::update_user_role(&state, id, req).await
}

async fn delete_user_role_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode> {
    user_roles::delete_user_role(&state, id).await
}

// App users

async fn list_app_users_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<AppUserListQuery>,
) -> Result<Json<Vec<AppUserResponse>>> {
    app_users::list_app_users(&state, query).await
}

async fn get_app_user_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AppUserResponse>> {
    app_users::get_app_user(&state, id).await
}

async fn create_app_user_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateAppUserRequest>,
) -> Result<(StatusCode, Json<AppUserResponse>)> {
    app_users::create_app_user(&state, req).await
}

async fn update_app_user_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateAppUserRequest>,
) -> Result<Json<AppUserResponse>> {
    app_users::update_app_user(&state, id, req).await
}

async fn delete_app_user_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode> {
    app_users::delete_app_user(&state, id).await
}

// Locations

async fn list_locations_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<LocationListQuery>,
) -> Result<Json<Vec<LocationResponse>>> {
    locations::list_locations(&state, query).await
}

async fn get_location_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<LocationSummary>> {
    locations::get_location(&state, id).await
}

async fn create_location_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<LocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>)> {
    locations::create_location(&state, req).await
}

async fn update_location_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<LocationRequest>,
) -> Result<Json<LocationResponse>> {
    locations::update_location(&state, id, req).await
}

async fn delete_location_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode> {
    locations::delete_location(&state, id).await
}

// Devices

async fn list_devices_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<DeviceListQuery>,
) -> Result<Json<Vec<DeviceResponse>>> {
    devices::list_devices(&state, query).await
}

async fn get_device_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<DeviceResponse>> {
    devices::get_device(&state, id).await
}

async fn create_device_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceResponse>)> {
    devices::create_device(&state, req).await
}

async fn update_device_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateDeviceRequest>,
) -> Result<Json<DeviceResponse>> {
    devices::update_device(&state, id, req).await
}

async fn delete_device_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode> {
    devices::delete_device(&state, id).await
}

// Lookups

async fn list_lookups_handler<T: LookupTable>(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<LookupResponse>>> {
    lookups::list_lookups::<T>(&state).await
}

async fn get_lookup_handler<T: LookupTable>(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<LookupResponse>> {
    lookups::get_lookup::<T>(&state, id).await
}

async fn create_lookup_handler<T>(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<LookupRequest>,
) -> Result<(StatusCode, Json<LookupResponse>)>
where
    T: LookupTable,
    T::Model: IntoActiveModel<T::ActiveModel>,
    T::ActiveModel: Send,
{
    lookups::create_lookup::<T>(&state, req).await
}

async fn delete_lookup_handler<T: LookupTable>(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode> {
    lookups::delete_lookup::<T>(&state, id).await
}

// Bins

async fn list_bins_handler(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<BinResponse>>> {
    bins::list_bins(&state).await
}

async fn get_bin_handler(AxumState(state): AxumState<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<BinResponse>> {
    bins::get_bin(&state, id).await
}

async fn create_bin_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateBinRequest>,
) -> Result<(StatusCode, Json<BinResponse>)> {
    bins::create_bin(&state, req).await
}

async fn update_bin_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateBinRequest>,
) -> Result<Json<BinResponse>> {
    bins::update_bin(&state, id, req).await
}

async fn delete_bin_handler(AxumState(state): AxumState<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode> {
    bins::delete_bin(&state, id).await
}

// Loans

async fn list_loans_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse<Vec<LoanResponse>>>> {
    loans::list_loans(&state).await
}

async fn get_loan_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<DataResponse<LoanResponse>>> {
    loans::get_loan(&state, id).await
}

async fn create_loan_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateLoanRequest>,
) -> Result<(StatusCode, Json<DataResponse<LoanResponse>>)> {
    loans::create_loan(&state, &user, req).await
}

async fn replace_loan_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<ReplaceLoanRequest>,
) -> Result<Json<DataResponse<LoanResponse>>> {
    loans::replace_loan(&state, &user, id, req).await
}

async fn update_loan_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateLoanRequest>,
) -> Result<Json<DataResponse<LoanResponse>>> {
    loans::update_loan(&state, &user, id, req).await
}

async fn delete_loan_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>> {
    loans::delete_loan(&state, &user, id).await
}

// User location access

async fn list_access_handler(AxumState(state): AxumState<AppState>) -> Result<Json<Vec<AccessResponse>>> {
    user_location_access::list_access(&state).await
}

async fn get_access_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath((user_id, location_id)): ApiPath<(i32, i32)>,
) -> Result<Json<AccessResponse>> {
    user_location_access::get_access(&state, user_id, location_id).await
}

async fn create_access_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateAccessRequest>,
) -> Result<(StatusCode, Json<AccessResponse>)> {
    user_location_access::create_access(&state, req).await
}

async fn update_access_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath((user_id, location_id)): ApiPath<(i32, i32)>,
    ApiJson(req): ApiJson<UpdateAccessRequest>,
) -> Result<Json<AccessResponse>> {
    user_location_access::update_access(&state, user_id, location_id, req).await
}

async fn delete_access_handler(
    AxumState(state): AxumState<AppState>,
    ApiPath((user_id, location_id)): ApiPath<(i32, i32)>,
) -> Result<StatusCode> {
    user_location_access::delete_access(&state, user_id, location_id).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// Layers, outermost first: request id and request logging, CORS, security
/// headers.
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and config
///
/// # Returns
///
/// Main router with health checks and API routes
pub fn create_app_router(state: AppState) -> Router {
    let cors = state.cors.clone();
    let enable_tls = state.enable_tls;

    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            security_headers_middleware(request, next, enable_tls)
        }))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            cors_middleware(request, next, cors.clone())
        }))
        .layer(middleware::from_fn(request_id_middleware))
}
