//! Cross-cutting middleware as seen through the assembled application router.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::TestApp;
use server::{CorsConfig, create_app_router};

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/loans")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type, authorization")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_preflight_from_frontend_origin() {
    let app = TestApp::new().await;

    let response = app.send(preflight("http://localhost:5173")).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let headers = &response.headers;
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "3600");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "content-type, authorization"
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_preflight_from_unknown_origin_is_forbidden() {
    let app = TestApp::new().await;

    let response = app.send(preflight("http://evil.example")).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_configured_origins_replace_default() {
    let app = TestApp::new().await;
    let state = app
        .state
        .clone()
        .with_cors(CorsConfig::from_origin_list("https://admin.example.org, https://ops.example.org"));
    let router = create_app_router(state);

    let response = tower::ServiceExt::oneshot(router.clone(), preflight("https://ops.example.org"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = tower::ServiceExt::oneshot(router, preflight("http://localhost:5173"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_simple_request_gets_cors_and_security_headers() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/bins")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.employee_token()))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    let headers = &response.headers;
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_some());
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
}

#[tokio::test]
async fn test_hsts_only_with_tls() {
    let app = TestApp::new().await;
    let router = create_app_router(app.state.clone().with_tls(true));

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();

    assert!(response.headers().get(header::STRICT_TRANSPORT_SECURITY).is_some());
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    let generated = response.headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(!generated.is_empty());

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-supplied-id-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.headers.get("x-request-id").unwrap(), "client-supplied-id-123");
}

#[tokio::test]
async fn test_errors_carry_request_id_and_code() {
    let app = TestApp::new().await;

    let response = app.get("/api/loans/999", &app.employee_token()).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["code"], "NOT_FOUND");
    assert!(response.headers.get("x-request-id").is_some());
}
