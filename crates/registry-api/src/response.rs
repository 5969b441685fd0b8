//! Transport-independent HTTP outcomes.
//!
//! Every request ends as exactly one [`ApiResponse`]: a status code, an
//! optional content type, and a body that is either a raw success payload,
//! an error payload, or nothing at all. Each outcome kind has its own
//! constructor which pins the status and content type, so handlers never
//! assemble those by hand.
//!
//! # Outcomes
//!
//! | Constructor | Status | Content-Type | Body |
//! |-------------|--------|--------------|------|
//! | [`ApiResponse::ok`] | 200 | `application/json` | payload |
//! | [`ApiResponse::created`] | 201 | `application/json` | payload |
//! | [`ApiResponse::no_content`] | 204 | none | `{}` |
//! | [`ApiResponse::bad_request`] | 400 | `application/json` | `{message, details?}` |
//! | [`ApiResponse::not_found`] | 404 | `application/json` | `{message, details?}` |
//! | [`ApiResponse::method_not_allowed`] | 405 | `application/json` | `{message, details?}` |
//! | [`ApiResponse::internal_error`] | 500 | `application/json` | `{message, details?}` |

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// Media type of every response that carries a body.
pub const APPLICATION_JSON: &str = "application/json";

/// Error body: a human-readable message plus optional structured details.
///
/// Rendered by [`ApiResponse::body_json`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// What went wrong.
    pub message: String,
    /// Structured context, omitted from the wire when absent.
    pub details: Option<Value>,
}

/// The body shape of an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A success payload written to the wire as-is.
    Payload(Value),
    /// An error payload.
    Error(ErrorPayload),
    /// No content. Rendered as an empty JSON object.
    Empty,
}

/// An immutable HTTP outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: ResponseBody,
}

impl ApiResponse {
    const fn success(status: StatusCode, payload: Value) -> Self {
        Self {
            status,
            content_type: Some(APPLICATION_JSON),
            body: ResponseBody::Payload(payload),
        }
    }

    fn error(status: StatusCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            status,
            content_type: Some(APPLICATION_JSON),
            body: ResponseBody::Error(ErrorPayload {
                message: message.into(),
                details,
            }),
        }
    }

    /// 200 OK with `payload` as the body.
    pub const fn ok(payload: Value) -> Self {
        Self::success(StatusCode::OK, payload)
    }

    /// 201 Created with `payload` (usually `{id}`) as the body.
    pub const fn created(payload: Value) -> Self {
        Self::success(StatusCode::CREATED, payload)
    }

    /// 204 No Content. No content type, empty body.
    pub const fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            content_type: None,
            body: ResponseBody::Empty,
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::error(StatusCode::BAD_REQUEST, message, details)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::error(StatusCode::NOT_FOUND, message, details)
    }

    /// 405 Method Not Allowed.
    pub fn method_not_allowed(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::error(StatusCode::METHOD_NOT_ALLOWED, message, details)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, message, details)
    }

    /// The HTTP status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The declared content type, if any.
    pub const fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// The body shape.
    pub const fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// The body as the JSON value that goes on the wire.
    pub fn body_json(&self) -> Value {
        match &self.body {
            ResponseBody::Payload(payload) => payload.clone(),
            ResponseBody::Error(error) => {
                let mut object = Map::new();
                object.insert("message".to_owned(), Value::String(error.message.clone()));
                if let Some(details) = &error.details {
                    object.insert("details".to_owned(), details.clone());
                }
                Value::Object(object)
            }
            ResponseBody::Empty => Value::Object(Map::new()),
        }
    }

    /// Render to wire parts: status, headers, and the JSON-encoded body.
    ///
    /// The `content-type` header is present iff a content type is declared.
    pub fn serialize(&self) -> (StatusCode, HeaderMap, Bytes) {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = self.content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        let bytes = Bytes::from(self.body_json().to_string());
        (self.status, headers, bytes)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let (status, headers, bytes) = self.serialize();
        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}
