//! Per-request validation checks.
//!
//! A [`RequestValidator`] is built fresh for every request and borrowed by
//! exactly one handler call. Each check either yields its typed output or
//! the [`ApiResponse`] to answer with. Handlers chain checks with `?`, so
//! the first failing check decides the response and nothing after it runs,
//! storage access included.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use registry_store::StoreError;
use registry_types::record::missing_fields;
use registry_types::{PersonId, Record};
use serde_json::error::Category;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::dispatch::Verb;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// Why a handler stopped before producing its success response.
#[derive(Debug)]
pub enum Rejection {
    /// An expected failure, already shaped as the response to send.
    Invalid(ApiResponse),
    /// An unexpected fault for the caller's fault boundary.
    Fault(ApiError),
}

impl Rejection {
    /// Answer expected failures with their response and pass faults on.
    pub fn settle(self) -> Result<ApiResponse, ApiError> {
        match self {
            Self::Invalid(response) => Ok(response),
            Self::Fault(error) => Err(error),
        }
    }
}

impl From<ApiResponse> for Rejection {
    fn from(response: ApiResponse) -> Self {
        Self::Invalid(response)
    }
}

impl From<ApiError> for Rejection {
    fn from(error: ApiError) -> Self {
        Self::Fault(error)
    }
}

impl From<StoreError> for Rejection {
    fn from(error: StoreError) -> Self {
        Self::Fault(ApiError::Store(error))
    }
}

/// Validation checks scoped to one request.
#[derive(Debug, Clone, Copy)]
pub struct RequestValidator<'a> {
    verb: Verb,
    headers: &'a HeaderMap,
    path: &'a [String],
}

impl<'a> RequestValidator<'a> {
    /// Scope a validator to one request. `path` holds the segments after
    /// the resource prefix.
    pub const fn new(verb: Verb, headers: &'a HeaderMap, path: &'a [String]) -> Self {
        Self {
            verb,
            headers,
            path,
        }
    }

    /// Path segments after the resource prefix.
    pub const fn path(&self) -> &'a [String] {
        self.path
    }

    /// Require between `min` and `max` path segments (inclusive).
    ///
    /// An unexpected path shape means nothing lives at that URL, so the
    /// failure is a 404 rather than a 400.
    pub fn check_path(&self, min: usize, max: usize) -> Result<(), ApiResponse> {
        if (min..=max).contains(&self.path.len()) {
            Ok(())
        } else {
            Err(ApiResponse::not_found(
                format!("Invalid resource for {}", self.verb),
                Some(json!({ "path": self.path })),
            ))
        }
    }

    /// Require a `content-type` header whose media type is `expected`.
    ///
    /// Parameters such as `; charset=utf-8` are ignored and the media type
    /// is compared case-insensitively. The match is exact: suffixed types
    /// like `application/json-patch+json` are rejected even though they
    /// contain `expected` as a substring.
    pub fn check_content_type(&self, expected: &str) -> Result<(), ApiResponse> {
        let actual = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        if actual.is_some_and(|value| media_type(value).eq_ignore_ascii_case(expected)) {
            Ok(())
        } else {
            Err(ApiResponse::bad_request(
                format!("Unsupported request content type for {}", self.verb),
                Some(json!({ "content-type": actual, "expected": expected })),
            ))
        }
    }

    /// Require the first path segment to be a hyphenated UUID.
    pub fn check_id(&self) -> Result<PersonId, ApiResponse> {
        let raw = self.path.first().map(String::as_str);
        raw.and_then(PersonId::parse_hyphenated).ok_or_else(|| {
            ApiResponse::bad_request("Invalid person Id", Some(json!({ "id": raw })))
        })
    }

    /// Parse `body` as a JSON object.
    ///
    /// Malformed, truncated, or non-object JSON is answered with a 400 whose
    /// details name the parser's error category. Any other parser failure is
    /// a fault.
    pub fn check_json_object(&self, body: &[u8]) -> Result<Record, Rejection> {
        match serde_json::from_slice::<Record>(body) {
            Ok(object) => Ok(object),
            Err(error) => match error.classify() {
                Category::Io => Err(Rejection::Fault(ApiError::Json(error))),
                category => {
                    debug!(verb = %self.verb, ?category, %error, "request body is not a JSON object");
                    let mut details = Map::new();
                    details.insert(format!("{category:?}"), Value::String(error.to_string()));
                    Err(Rejection::Invalid(ApiResponse::bad_request(
                        "JSON parse failed",
                        Some(Value::Object(details)),
                    )))
                }
            },
        }
    }

    /// Require every field in `required` to be present in `object`.
    ///
    /// The failure lists all absent fields in the order of `required`.
    pub fn all_object_fields_present(
        &self,
        object: &Record,
        required: &[&str],
    ) -> Result<(), ApiResponse> {
        let missing = missing_fields(object, required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiResponse::bad_request(
                format!("Not all mandatory fields provided for {}", self.verb),
                Some(json!({ "missing": missing })),
            ))
        }
    }
}

/// The media type of a `content-type` value, without parameters.
fn media_type(value: &str) -> &str {
    value
        .split_once(';')
        .map_or(value, |(essence, _params)| essence)
        .trim()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderValue, StatusCode};
    use registry_types::REQUIRED_FIELDS;

    use super::*;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_owned()).collect()
    }

    fn json_headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    fn rejected(result: Result<Record, Rejection>) -> ApiResponse {
        match result {
            Err(Rejection::Invalid(response)) => response,
            other => ApiResponse::internal_error(format!("unexpected: {other:?}"), None),
        }
    }

    #[test]
    fn path_within_bounds_passes() {
        let headers = HeaderMap::new();
        let path = segments(&["a"]);
        let validator = RequestValidator::new(Verb::Get, &headers, &path);
        assert!(validator.check_path(1, 1).is_ok());
        assert!(validator.check_path(0, 2).is_ok());
    }

    #[test]
    fn path_out_of_bounds_is_not_found() {
        let headers = HeaderMap::new();
        let path = segments(&["a", "b"]);
        let validator = RequestValidator::new(Verb::Get, &headers, &path);
        let response = validator.check_path(1, 1).unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.body_json(),
            json!({"message": "Invalid resource for GET", "details": {"path": ["a", "b"]}})
        );
    }

    #[test]
    fn content_type_with_parameters_passes() {
        let headers = json_headers("Application/JSON; charset=utf-8");
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        assert!(validator.check_content_type("application/json").is_ok());
    }

    #[test]
    fn missing_content_type_is_bad_request() {
        let headers = HeaderMap::new();
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        let response = validator.check_content_type("application/json").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body_json(),
            json!({
                "message": "Unsupported request content type for POST",
                "details": {"content-type": null, "expected": "application/json"},
            })
        );
    }

    #[test]
    fn wrong_content_type_reports_actual_value() {
        let headers = json_headers("text/plain");
        let validator = RequestValidator::new(Verb::Put, &headers, &[]);
        let response = validator.check_content_type("application/json").unwrap_err();
        assert_eq!(response.body_json()["details"]["content-type"], "text/plain");
        assert_eq!(
            response.body_json()["message"],
            "Unsupported request content type for PUT"
        );
    }

    #[test]
    fn json_suffix_types_do_not_match() {
        let headers = json_headers("application/json-patch+json");
        let validator = RequestValidator::new(Verb::Patch, &headers, &[]);
        assert!(validator.check_content_type("application/json").is_err());
    }

    #[test]
    fn valid_id_is_returned() {
        let headers = HeaderMap::new();
        let id = PersonId::generate();
        let path = segments(&[&id.to_string()]);
        let validator = RequestValidator::new(Verb::Delete, &headers, &path);
        assert_eq!(validator.check_id().unwrap(), id);
    }

    #[test]
    fn invalid_id_is_bad_request() {
        let headers = HeaderMap::new();
        let path = segments(&["not-a-uuid"]);
        let validator = RequestValidator::new(Verb::Get, &headers, &path);
        let response = validator.check_id().unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body_json(),
            json!({"message": "Invalid person Id", "details": {"id": "not-a-uuid"}})
        );
    }

    #[test]
    fn json_object_is_parsed() {
        let headers = HeaderMap::new();
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        let object = validator
            .check_json_object(br#"{"name": "John Silver", "age": 42}"#)
            .unwrap();
        assert_eq!(object.get("age"), Some(&json!(42)));
    }

    #[test]
    fn malformed_json_reports_syntax_category() {
        let headers = HeaderMap::new();
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        let response = rejected(validator.check_json_object(b"{name: 1}"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.body_json();
        assert_eq!(body["message"], "JSON parse failed");
        assert!(body["details"]["Syntax"].is_string());
    }

    #[test]
    fn empty_body_reports_eof_category() {
        let headers = HeaderMap::new();
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        let response = rejected(validator.check_json_object(b""));
        assert!(response.body_json()["details"]["Eof"].is_string());
    }

    #[test]
    fn non_object_json_reports_data_category() {
        let headers = HeaderMap::new();
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        let response = rejected(validator.check_json_object(b"[1, 2, 3]"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.body_json()["details"]["Data"].is_string());
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let headers = HeaderMap::new();
        let validator = RequestValidator::new(Verb::Post, &headers, &[]);
        let object = validator.check_json_object(br#"{"age": 3}"#).unwrap();
        let response = validator
            .all_object_fields_present(&object, &REQUIRED_FIELDS)
            .unwrap_err();
        assert_eq!(
            response.body_json(),
            json!({
                "message": "Not all mandatory fields provided for POST",
                "details": {"missing": ["name", "hobbies"]},
            })
        );
    }

    #[test]
    fn first_failure_wins_when_chained() {
        let headers = HeaderMap::new();
        let path = segments(&["not-a-uuid", "extra"]);
        let validator = RequestValidator::new(Verb::Put, &headers, &path);

        let chained = || -> Result<(), Rejection> {
            validator.check_path(1, 1)?;
            validator.check_id()?;
            validator.check_content_type("application/json")?;
            Ok(())
        };

        let response = chained().unwrap_err().settle().unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
