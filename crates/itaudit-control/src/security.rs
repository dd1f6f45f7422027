use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::Instrument;

use crate::auth::{SESSION_COOKIE_NAME, validate_session};
use crate::config::ControlConfig;
use crate::error::json_error;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
}

// Middleware: tag every request with an id, echo it back, and run the
// handler inside a span carrying it.
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let id = incoming_request_id(req.headers())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut resp = next.run(req).instrument(span).await;
    if let Ok(v) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    resp
}

fn is_unsafe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn origin_is_allowed(config: &ControlConfig, headers: &HeaderMap) -> bool {
    // Missing Origin means a non-browser client (curl, scripts).
    let origin = match headers.get(axum::http::header::ORIGIN) {
        Some(v) => match v.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        },
        None => return true,
    };

    config.allowed_origins.iter().any(|a| a == origin)
}

// Middleware: reject state-changing browser requests from foreign origins.
// The session cookie is SameSite=Lax, this closes the remaining gap for
// same-site subdomains.
pub async fn origin_guard(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if is_unsafe_method(req.method()) && !origin_is_allowed(&state.config, req.headers()) {
        return json_error(StatusCode::FORBIDDEN, "Origin not allowed");
    }
    next.run(req).await
}

// Middleware: require a valid session cookie when the deployment asks for it.
pub async fn session_guard(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.require_session {
        return next.run(req).await;
    }

    let jar = CookieJar::from_headers(req.headers());
    let session = jar
        .get(SESSION_COOKIE_NAME)
        .and_then(|c| validate_session(&state.config, c.value()).ok());

    match session {
        Some(s) => {
            req.extensions_mut().insert(s);
            next.run(req).await
        }
        None => json_error(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}
