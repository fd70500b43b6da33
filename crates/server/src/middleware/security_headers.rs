//! # Security Headers Middleware
//!
//! Adds standard security headers to all HTTP responses following
//! OWASP recommended practices, and answers cross-origin requests from the
//! configured front-end origins.

use axum::{
    body::Body,
    extract::Request,
    http::{self, StatusCode, header::HeaderName},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Front-end origin allowed when nothing else is configured
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// CORS configuration for the API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any, `*.example.com` any subdomain
    pub allowed_origins:   Vec<String>,
    /// Allowed HTTP methods
    pub allowed_methods:   Vec<http::Method>,
    /// Allowed request headers; `*` mirrors whatever the preflight asks for
    pub allowed_headers:   Vec<String>,
    /// Headers the browser may read from responses
    pub exposed_headers:   Vec<String>,
    /// Whether cookies may be sent cross-origin
    pub allow_credentials: bool,
    /// Maximum age for preflight cache (seconds)
    pub max_age:           u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins:   vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            allowed_methods:   vec![
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::PATCH,
                http::Method::DELETE,
                http::Method::OPTIONS,
            ],
            allowed_headers:   vec!["*".to_string()],
            exposed_headers:   vec![logging::REQUEST_ID_HEADER.to_string()],
            allow_credentials: true,
            max_age:           3600,
        }
    }
}

impl CorsConfig {
    /// Build a configuration from a comma separated origin list.
    ///
    /// Blank entries are ignored; an empty list falls back to
    /// [`DEFAULT_ALLOWED_ORIGIN`].
    pub fn from_origin_list(origins: &str) -> Self {
        let allowed_origins: Vec<String> = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if allowed_origins.is_empty() {
            return Self::default();
        }

        Self {
            allowed_origins,
            ..Self::default()
        }
    }
}

/// Extract the origin header from a request
fn get_request_origin(request: &Request) -> Option<String> {
    request
        .headers()
        .get(http::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Check if an origin is allowed
///
/// `*.example.com` matches subdomains only; a `*` not followed by a dot is taken literally.
fn is_origin_allowed(origin: &str, allowed_origins: &[String]) -> bool {
    allowed_origins.iter().any(|allowed| {
        if allowed == "*" {
            true
        }
        else if let Some(suffix) = allowed.strip_prefix('*')
            && suffix.starts_with('.')
        {
            origin.ends_with(suffix)
        }
        else {
            origin == allowed
        }
    })
}

/// Safely insert a header value, returning true on success
fn insert_header(headers: &mut http::HeaderMap, name: &str, value: &str) -> bool {
    if let (Ok(name), Ok(value)) = (
        name.parse::<HeaderName>(),
        value.parse::<http::HeaderValue>(),
    ) {
        headers.insert(name, value);
        true
    }
    else {
        tracing::warn!("Failed to insert header: {} = {}", name, value);
        false
    }
}

/// Security headers middleware
///
/// Adds the following security headers to all responses:
/// - Content-Security-Policy: Restricts resource loading origins
/// - X-Frame-Options: Prevents clickjacking
/// - X-Content-Type-Options: Prevents MIME sniffing
/// - Referrer-Policy: Controls referrer information
/// - Strict-Transport-Security: Forces HTTPS (only if TLS is enabled)
/// - Cache-Control: Prevents caching of API responses
pub async fn security_headers_middleware(request: Request, next: Next, enable_tls: bool) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    insert_header(
        headers,
        "Content-Security-Policy",
        "default-src 'none'; frame-ancestors 'none'",
    );
    insert_header(headers, "X-Frame-Options", "DENY");
    insert_header(headers, "X-Content-Type-Options", "nosniff");
    insert_header(
        headers,
        "Referrer-Policy",
        "strict-origin-when-cross-origin",
    );

    // Browsers only honour HSTS over HTTPS
    if enable_tls {
        insert_header(
            headers,
            "Strict-Transport-Security",
            "max-age=31536000; includeSubDomains",
        );
    }

    insert_header(headers, "Cache-Control", "no-store");

    response
}

/// Value for `Access-Control-Allow-Headers` on a preflight
fn allowed_headers_value(config: &CorsConfig, request: &Request) -> Option<String> {
    if config.allowed_headers.iter().any(|h| h == "*") {
        return request
            .headers()
            .get(http::header::ACCESS_CONTROL_REQUEST_HEADERS)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
    }

    Some(config.allowed_headers.join(", "))
}

/// CORS middleware for handling cross-origin requests
///
/// Preflight (OPTIONS) requests from an allowed origin are answered with 204;
/// preflights from any other origin get 403. Other requests run normally and
/// gain CORS headers when their origin is allowed.
pub async fn cors_middleware(request: Request, next: Next, config: CorsConfig) -> Response {
    let origin = get_request_origin(&request);

    if request.method() == http::Method::OPTIONS &&
        let Some(ref req_origin) = origin &&
        is_origin_allowed(req_origin, &config.allowed_origins)
    {
        let mut response = (StatusCode::NO_CONTENT, Body::empty()).into_response();
        let allow_headers = allowed_headers_value(&config, &request);
        let headers = response.headers_mut();

        insert_header(headers, "Access-Control-Allow-Origin", req_origin);
        insert_header(headers, "Vary", "Origin");

        let allowed_methods_value = config
            .allowed_methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        insert_header(
            headers,
            "Access-Control-Allow-Methods",
            &allowed_methods_value,
        );

        if let Some(ref value) = allow_headers {
            insert_header(headers, "Access-Control-Allow-Headers", value);
        }

        if config.allow_credentials {
            insert_header(headers, "Access-Control-Allow-Credentials", "true");
        }

        insert_header(
            headers,
            "Access-Control-Max-Age",
            &config.max_age.to_string(),
        );

        return response;
    }

    if request.method() == http::Method::OPTIONS && origin.is_some() {
        tracing::debug!(origin = ?origin, "Rejected CORS preflight");
        return (StatusCode::FORBIDDEN, Body::empty()).into_response();
    }

    let mut response = next.run(request).await;

    if let Some(ref req_origin) = origin &&
        is_origin_allowed(req_origin, &config.allowed_origins)
    {
        let headers = response.headers_mut();
        insert_header(headers, "Access-Control-Allow-Origin", req_origin);
        insert_header(headers, "Vary", "Origin");

        let exposed_headers_value = config.exposed_headers.join(", ");
        insert_header(
            headers,
            "Access-Control-Expose-Headers",
            &exposed_headers_value,
        );

        if config.allow_credentials {
            insert_header(headers, "Access-Control-Allow-Credentials", "true");
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    async fn dummy_handler() -> &'static str { "OK" }

    fn cors_app(config: CorsConfig) -> Router {
        Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(move |req, next| {
                cors_middleware(req, next, config.clone())
            }))
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(|req, next| {
                security_headers_middleware(req, next, true)
            }));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
        assert_eq!(headers.get("cache-control").unwrap(), "no-store");
        assert!(headers.get("strict-transport-security").unwrap().to_str().unwrap().contains("max-age=31536000"));
    }

    #[tokio::test]
    async fn test_security_headers_hsts_disabled() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(|req, next| {
                security_headers_middleware(req, next, false)
            }));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert!(!response.headers().contains_key("strict-transport-security"));
    }

    #[tokio::test]
    async fn test_cors_allows_default_origin_with_credentials() {
        let request = Request::builder()
            .uri("/test")
            .header("Origin", DEFAULT_ALLOWED_ORIGIN)
            .body(Body::empty())
            .unwrap();

        let response = cors_app(CorsConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            DEFAULT_ALLOWED_ORIGIN
        );
        assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
        assert!(headers.get("access-control-expose-headers").unwrap().to_str().unwrap().contains("x-request-id"));
    }

    #[tokio::test]
    async fn test_cors_preflight_mirrors_requested_headers() {
        let request = Request::builder()
            .uri("/test")
            .method("OPTIONS")
            .header("Origin", DEFAULT_ALLOWED_ORIGIN)
            .header("Access-Control-Request-Method", "PATCH")
            .header("Access-Control-Request-Headers", "content-type, x-custom")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(CorsConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "content-type, x-custom"
        );
        assert!(headers.get("access-control-allow-methods").unwrap().to_str().unwrap().contains("PATCH"));
        assert_eq!(headers.get("access-control-max-age").unwrap(), "3600");
    }

    #[tokio::test]
    async fn test_cors_preflight_from_unknown_origin_is_forbidden() {
        let request = Request::builder()
            .uri("/test")
            .method("OPTIONS")
            .header("Origin", "http://evil.example")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(CorsConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_cors_disallows_unknown_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://trusted-domain.com".to_string()],
            ..Default::default()
        };

        let request = Request::builder()
            .uri("/test")
            .header("Origin", "http://untrusted-domain.com")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(config).oneshot(request).await.unwrap();

        // Still served, but without CORS headers
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[test]
    fn test_wildcard_subdomain_origin() {
        let allowed = vec!["*.loantrack.org".to_string()];
        assert!(is_origin_allowed("https://admin.loantrack.org", &allowed));
        assert!(!is_origin_allowed("https://loantrack.com", &allowed));
        assert!(!is_origin_allowed("https://evilloantrack.org", &allowed));
    }

    #[test]
    fn test_wildcard_without_dot_is_literal() {
        let allowed = vec!["*loantrack.org".to_string()];
        assert!(!is_origin_allowed("https://evilloantrack.org", &allowed));
        assert!(!is_origin_allowed("https://admin.loantrack.org", &allowed));
    }

    #[test]
    fn test_from_origin_list() {
        let config = CorsConfig::from_origin_list(" https://a.example , ,https://b.example");
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(config.allow_credentials);

        assert_eq!(CorsConfig::from_origin_list("  "), CorsConfig::default());
    }
}
