//! # Request Id Middleware
//!
//! Tags every request with a [`RequestId`], runs it inside a span carrying
//! that id, echoes the id on the response and logs the outcome.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use logging::{REQUEST_ID_HEADER, RequestId, log_api_request};
use tracing::Instrument;

/// Request id and access log middleware
///
/// A well-formed `X-Request-ID` header from the caller is kept; otherwise a
/// fresh id is generated. The id is stored in request extensions for
/// handlers that want it.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let incoming = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let request_id = RequestId::from_header_or_new(incoming);

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %path);
    let started = Instant::now();

    let mut response = next.run(request).instrument(span).await;

    let duration = started.elapsed().as_millis();
    log_api_request!(method, path, response.status().as_u16(), duration, request_id);

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
