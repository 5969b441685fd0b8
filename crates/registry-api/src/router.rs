//! Axum router construction and the per-request fault boundary.
//!
//! Every request lands in [`handle_request`]: the first path segment picks
//! the resource, the body is read in full, and the dispatcher produces the
//! response. Faults returned by the dispatcher and panics caught by
//! [`CatchPanicLayer`] both become a 500 so one bad request never takes
//! the server down.

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::dispatch::dispatch;
use crate::error::internal_error;
use crate::response::ApiResponse;
use crate::state::AppState;

/// The only resource registered on the server.
pub const PERSON_RESOURCE: &str = "person";

/// Build the complete Axum router for the People Registry server.
///
/// All paths and methods go through [`handle_request`]; routing by
/// resource and method happens there so that unknown paths and methods get
/// JSON error bodies instead of Axum's defaults.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle one request end to end.
pub async fn handle_request(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let segments = path_segments(parts.uri.path());

    info!(
        method = %parts.method,
        content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-"),
        path = parts.uri.path(),
        "request received"
    );

    let Some((resource, rest)) = segments
        .split_first()
        .filter(|(resource, _)| resource.as_str() == PERSON_RESOURCE)
    else {
        return ApiResponse::not_found(
            "The resource doesn't exist on the server",
            Some(json!({ "path": segments })),
        )
        .into_response();
    };

    let bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiResponse::bad_request(
                "Request body could not be read",
                Some(json!({ "error": e.to_string() })),
            )
            .into_response();
        }
    };
    debug!(
        resource = resource.as_str(),
        length = bytes.len(),
        body = %String::from_utf8_lossy(&bytes),
        "request body read"
    );

    match dispatch(&state.people, &parts.method, &parts.headers, rest, &bytes) {
        Ok(response) => response.into_response(),
        Err(fault) => {
            error!(kind = fault.kind(), error = %fault, "request failed with an unexpected fault");
            fault.into_response()
        }
    }
}

/// Split a URL path into its segments, dropping only the leading slash.
///
/// `/person/` yields `["person", ""]`; the root path yields `[""]`.
fn path_segments(path: &str) -> Vec<String> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(str::to_owned)
        .collect()
}

/// Turn a panic caught during request handling into a 500.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| String::from("unknown panic"));
    error!(panic = %message, "request handler panicked");
    internal_error("Panic", message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_keep_empty_trailing_segment() {
        assert_eq!(path_segments("/person"), vec!["person"]);
        assert_eq!(path_segments("/person/"), vec!["person", ""]);
        assert_eq!(path_segments("/person/a/b"), vec!["person", "a", "b"]);
        assert_eq!(path_segments("/"), vec![""]);
    }

    #[test]
    fn panic_payloads_become_messages() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("kaboom")));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
