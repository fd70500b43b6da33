//! # Common Test Utilities
//!
//! Provides shared test infrastructure: an in-memory database with the real
//! schema and reference seeds, the application router, signing keys and
//! fixtures for users, locations and bins.

#![allow(dead_code)]

use std::sync::Once;

use ::auth::{JwtConfig, JwtKeys, hash_password, secrecy::{ExposeSecret, SecretString}};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::Utc;
use entity::{app_user, bin, location};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DbConn, Set};
use serde_json::Value;
use server::{AppState, create_app_router};
use tower::ServiceExt;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Seeded role ids, in seed order
pub const ADMIN_ROLE: i32 = 1;
pub const EMPLOYEE_ROLE: i32 = 2;
pub const CITIZEN_ROLE: i32 = 3;

/// Password shared by every fixture user
pub const PASSWORD: &str = "correct-horse-battery";

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Keys from the auth crate's test fixtures
pub fn test_keys() -> JwtKeys {
    JwtKeys::from_pem(
        include_bytes!("../../../auth/tests/fixtures/jwt_private.pem"),
        include_bytes!("../../../auth/tests/fixtures/jwt_public.pem"),
        JwtConfig::default(),
    )
    .unwrap()
}

/// Migrated and seeded in-memory SQLite database.
///
/// A single connection keeps every query on the same memory database.
pub async fn test_db() -> DbConn {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    migration::migrate_and_seed(&db).await.unwrap();
    db
}

/// Test fixture for an app user
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub full_name: String,
    pub email:     String,
    pub password:  String,
    pub role_id:   i32,
}

impl Default for UserFixture {
    fn default() -> Self {
        Self {
            full_name: "Test User".to_string(),
            email:     "test@example.com".to_string(),
            password:  PASSWORD.to_string(),
            role_id:   EMPLOYEE_ROLE,
        }
    }
}

impl UserFixture {
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
    }

    pub fn with_role(mut self, role_id: i32) -> Self {
        self.role_id = role_id;
        self
    }

    pub async fn insert(&self, db: &DbConn) -> app_user::Model {
        let hash = hash_password(&SecretString::from(self.password.clone()), None).unwrap();
        let now = Utc::now();

        app_user::ActiveModel {
            full_name: Set(self.full_name.clone()),
            app_user_full_name: Set(self.full_name.clone()),
            email: Set(self.email.clone()),
            password_hash: Set(hash.expose_secret().to_string()),
            user_role_id: Set(self.role_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }
}

pub async fn insert_location(db: &DbConn, name: &str) -> location::Model {
    let now = Utc::now();
    location::ActiveModel {
        location_name: Set(name.to_string()),
        street_address: Set(Some("1 Main St".to_string())),
        city: Set(Some("Springfield".to_string())),
        state: Set(Some("IL".to_string())),
        zip_code: Set(Some("62701".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_bin(db: &DbConn, asset_tag: &str, created_by: i32, location_id: i32) -> bin::Model {
    let now = Utc::now();
    bin::ActiveModel {
        asset_tag: Set(asset_tag.to_string()),
        bin_contents: Set(Some("Laptop, charger".to_string())),
        created_by_user_id: Set(created_by),
        location_id: Set(location_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// A decoded response
#[derive(Debug)]
pub struct TestResponse {
    pub status:  StatusCode,
    pub headers: HeaderMap,
    /// JSON body, a JSON string for plain text, `Null` when empty
    pub body:    Value,
}

impl TestResponse {
    pub fn error(&self) -> &str { self.body["error"].as_str().unwrap_or_default() }

    pub fn message(&self) -> &str { self.body["message"].as_str().unwrap_or_default() }
}

/// The application with one user per role.
pub struct TestApp {
    pub state:    AppState,
    pub router:   Router,
    pub admin:    app_user::Model,
    pub employee: app_user::Model,
    pub citizen:  app_user::Model,
}

impl TestApp {
    pub async fn new() -> Self {
        init_test_env();

        let db = test_db().await;
        let admin = UserFixture::default()
            .with_email("admin@example.com")
            .with_name("Ada Admin")
            .with_role(ADMIN_ROLE)
            .insert(&db)
            .await;
        let employee = UserFixture::default()
            .with_email("employee@example.com")
            .with_name("Eve Employee")
            .with_role(EMPLOYEE_ROLE)
            .insert(&db)
            .await;
        let citizen = UserFixture::default()
            .with_email("citizen@example.com")
            .with_name("Cy Citizen")
            .with_role(CITIZEN_ROLE)
            .insert(&db)
            .await;

        let state = AppState::new(db, test_keys());
        let router = create_app_router(state.clone());

        Self {
            state,
            router,
            admin,
            employee,
            citizen,
        }
    }

    pub fn db(&self) -> &DbConn { &self.state.db }

    pub fn admin_token(&self) -> String { self.state.jwt.issue_token(&self.admin.email, "Admin").unwrap() }

    pub fn employee_token(&self) -> String { self.state.jwt.issue_token(&self.employee.email, "Employee").unwrap() }

    pub fn citizen_token(&self) -> String { self.state.jwt.issue_token(&self.citizen.email, "Citizen").unwrap() }

    /// Send a request with an optional Bearer token and JSON body.
    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => {
                builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap()
            },
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        }
        else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse { self.request(Method::GET, uri, Some(token), None).await }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}
