//! Unexpected faults raised while handling a request.
//!
//! Expected failures (bad path, bad id, bad JSON, unknown record) never show
//! up here; they are answered directly with an [`ApiResponse`]. An
//! [`ApiError`] is everything else. It travels up to the single fault
//! boundary per request, which turns it into a 500 via
//! [`ApiError::into_api_response`] or its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::response::{IntoResponse, Response};
use registry_store::StoreError;
use serde_json::{Map, Value};

use crate::response::ApiResponse;

/// Message of every 500 produced from a fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Faults that abort request handling.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The person store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading the JSON body failed for a reason other than malformed input.
    #[error("{0}")]
    Json(#[source] serde_json::Error),

    /// A fault deliberately raised to exercise the 500 path.
    #[error("{0}")]
    InjectedFault(&'static str),
}

impl ApiError {
    /// Short name of the fault category, used as the key in the 500 body's
    /// `details`.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Store(_) => "StoreError",
            Self::Json(_) => "JsonError",
            Self::InjectedFault(_) => "InjectedFault",
        }
    }

    /// Build the 500 response for this fault: `{kind: message}` details.
    pub fn into_api_response(self) -> ApiResponse {
        internal_error(self.kind(), self.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_api_response().into_response()
    }
}

/// 500 response with a single `{kind: message}` detail entry.
pub fn internal_error(kind: &str, message: String) -> ApiResponse {
    let mut details = Map::new();
    details.insert(kind.to_owned(), Value::String(message));
    ApiResponse::internal_error(INTERNAL_ERROR_MESSAGE, Some(Value::Object(details)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn injected_fault_becomes_500_with_kind_and_message() {
        let response = ApiError::InjectedFault("Expelliarmus!").into_api_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body_json(),
            json!({
                "message": "Internal server error",
                "details": {"InjectedFault": "Expelliarmus!"},
            })
        );
    }

    #[test]
    fn store_fault_uses_store_kind() {
        let error = ApiError::from(StoreError::Poisoned("read"));
        assert_eq!(error.kind(), "StoreError");
        let body = error.into_api_response().body_json();
        assert_eq!(body["details"]["StoreError"], "store lock poisoned during read");
    }
}
