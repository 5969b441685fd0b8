//! Method dispatch for the person resource.

use axum::http::{HeaderMap, Method};
use serde_json::json;
use tracing::debug;

use crate::error::ApiError;
use crate::handler::PersonHandler;
use crate::response::ApiResponse;
use crate::validator::{Rejection, RequestValidator};

/// The HTTP methods the person resource answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`: list or read.
    Get,
    /// `POST`: create.
    Post,
    /// `PUT`: replace.
    Put,
    /// `PATCH`: merge.
    Patch,
    /// `DELETE`: remove.
    Delete,
}

impl Verb {
    /// Map an HTTP method onto a supported verb.
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            Method::PUT => Some(Self::Put),
            Method::PATCH => Some(Self::Patch),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    /// The method name as it appears on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for Verb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route one request to the handler operation for its method.
///
/// `path` holds the segments after the resource prefix and `body` the
/// complete request body. Unsupported methods are answered with 405 before
/// any validation happens. Faults are returned, not answered: turning them
/// into a 500 is the caller's job.
pub fn dispatch(
    handler: &PersonHandler,
    method: &Method,
    headers: &HeaderMap,
    path: &[String],
    body: &[u8],
) -> Result<ApiResponse, ApiError> {
    let Some(verb) = Verb::from_method(method) else {
        return Ok(ApiResponse::method_not_allowed(
            "Method not supported",
            Some(json!({ "method": method.as_str() })),
        ));
    };

    let validator = RequestValidator::new(verb, headers, path);
    let outcome = match verb {
        Verb::Get => handler.get(&validator),
        Verb::Post => handler.create(&validator, body),
        Verb::Put => handler.replace(&validator, body),
        Verb::Patch => handler.merge(&validator, body),
        Verb::Delete => handler.remove(&validator),
    };

    outcome.or_else(|rejection| {
        if let Rejection::Invalid(response) = &rejection {
            debug!(%verb, status = response.status().as_u16(), "request rejected");
        }
        rejection.settle()
    })
}
