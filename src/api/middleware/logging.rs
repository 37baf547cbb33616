//! Request logging with credential redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderPolicy {
    Show,
    Redact,
    Skip,
}

fn header_policy(name: &str) -> HeaderPolicy {
    match name {
        "authorization" | "proxy-authorization" | "cookie" | "x-admin-token" => {
            HeaderPolicy::Redact
        }
        "content-type" | "content-length" | "user-agent" | "referer" | "x-forwarded-for" => {
            HeaderPolicy::Show
        }
        _ => HeaderPolicy::Skip,
    }
}

fn loggable_headers(headers: &HeaderMap) -> String {
    let mut parts = Vec::new();

    for (name, value) in headers {
        let shown = match header_policy(name.as_str()) {
            HeaderPolicy::Skip => continue,
            HeaderPolicy::Redact => "[REDACTED]",
            HeaderPolicy::Show => value.to_str().unwrap_or("[invalid]"),
        };
        parts.push(format!("{}={}", name, shown));
    }

    parts.join(", ")
}

/// Logs each request and its outcome; redirects also log their target
///
/// Runs inside `TraceLayer`, which owns the request span.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    info!(
        method = %method,
        route = %route,
        request_id = %request_id,
        headers = %loggable_headers(request.headers()),
        "Request received"
    );

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(method = %method, route = %route, status = status.as_u16(), elapsed_ms, request_id = %request_id, "Request failed");
    } else if let Some(location) = response.headers().get(header::LOCATION) {
        info!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            location = location.to_str().unwrap_or("[invalid]"),
            elapsed_ms,
            request_id = %request_id,
            "Request redirected"
        );
    } else {
        info!(method = %method, route = %route, status = status.as_u16(), elapsed_ms, request_id = %request_id, "Request completed");
    }

    response
}
