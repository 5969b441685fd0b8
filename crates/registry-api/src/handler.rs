//! Business logic for the `/person` resource.
//!
//! One operation per verb. Each runs its validation checks in a fixed order
//! and only touches the store once every check has passed.
//!
//! | Verb | Path | Checks |
//! |------|------|--------|
//! | `GET` | `/person` | none |
//! | `GET` | `/person/{id}` | path(1,1), id |
//! | `POST` | `/person` | path(0,0), content type, JSON object, required fields |
//! | `PUT` | `/person/{id}` | path(1,1), id, content type, JSON object, required fields |
//! | `PATCH` | `/person/{id}` | path(1,1), id, content type, JSON object |
//! | `DELETE` | `/person/{id}` | path(1,1), id |

use std::sync::Arc;

use registry_store::PersonStore;
use registry_types::record::merge;
use registry_types::{PersonId, REQUIRED_FIELDS};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::response::{ApiResponse, APPLICATION_JSON};
use crate::validator::{Rejection, RequestValidator};

/// A `name` that makes `POST` fail with a fault instead of creating a
/// record. Lets clients and tests exercise the 500 path on demand.
pub const FAULT_INJECTION_NAME: &str = "Harry Potter";

/// Message of the fault raised for [`FAULT_INJECTION_NAME`].
pub const FAULT_INJECTION_MESSAGE: &str = "Expelliarmus!";

/// Handler for the person resource, bound to a store.
#[derive(Clone)]
pub struct PersonHandler {
    store: Arc<dyn PersonStore>,
}

impl PersonHandler {
    /// Bind a handler to `store`.
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    /// `GET /person`: every stored record as a JSON array.
    pub fn list(&self, validator: &RequestValidator<'_>) -> Result<ApiResponse, Rejection> {
        validator.check_path(0, 0)?;
        let records = self.store.list()?;
        Ok(ApiResponse::ok(Value::Array(
            records.into_iter().map(Value::Object).collect(),
        )))
    }

    /// `GET /person/{id}`. An empty path lists instead.
    pub fn get(&self, validator: &RequestValidator<'_>) -> Result<ApiResponse, Rejection> {
        if validator.path().is_empty() {
            return self.list(validator);
        }
        validator.check_path(1, 1)?;
        let id = validator.check_id()?;

        Ok(match self.store.read(id)? {
            Some(record) => ApiResponse::ok(Value::Object(record)),
            None => person_not_found(id),
        })
    }

    /// `POST /person`: store a new record and answer with its id.
    pub fn create(
        &self,
        validator: &RequestValidator<'_>,
        body: &[u8],
    ) -> Result<ApiResponse, Rejection> {
        validator.check_path(0, 0)?;
        validator.check_content_type(APPLICATION_JSON)?;
        let object = validator.check_json_object(body)?;
        validator.all_object_fields_present(&object, &REQUIRED_FIELDS)?;

        // Intentional: this name is a fault-injection hook, not a business rule.
        if object.get("name").and_then(Value::as_str) == Some(FAULT_INJECTION_NAME) {
            return Err(ApiError::InjectedFault(FAULT_INJECTION_MESSAGE).into());
        }

        let id = self.store.create(object)?;
        info!(%id, "person created");
        Ok(ApiResponse::created(json!({ "id": id })))
    }

    /// `PUT /person/{id}`: replace the whole record.
    pub fn replace(
        &self,
        validator: &RequestValidator<'_>,
        body: &[u8],
    ) -> Result<ApiResponse, Rejection> {
        validator.check_path(1, 1)?;
        let id = validator.check_id()?;
        validator.check_content_type(APPLICATION_JSON)?;
        let object = validator.check_json_object(body)?;
        validator.all_object_fields_present(&object, &REQUIRED_FIELDS)?;

        Ok(match self.store.update(id, object)? {
            Some(record) => {
                info!(%id, "person replaced");
                ApiResponse::ok(Value::Object(record))
            }
            None => person_not_found(id),
        })
    }

    /// `PATCH /person/{id}`: shallow-merge the given fields into the record.
    pub fn merge(
        &self,
        validator: &RequestValidator<'_>,
        body: &[u8],
    ) -> Result<ApiResponse, Rejection> {
        validator.check_path(1, 1)?;
        let id = validator.check_id()?;
        validator.check_content_type(APPLICATION_JSON)?;
        let patch = validator.check_json_object(body)?;

        let Some(existing) = self.store.read(id)? else {
            return Ok(person_not_found(id));
        };

        // The record may be deleted between the read and the write.
        Ok(match self.store.update(id, merge(existing, patch))? {
            Some(record) => {
                info!(%id, "person merged");
                ApiResponse::ok(Value::Object(record))
            }
            None => person_not_found(id),
        })
    }

    /// `DELETE /person/{id}`.
    pub fn remove(&self, validator: &RequestValidator<'_>) -> Result<ApiResponse, Rejection> {
        validator.check_path(1, 1)?;
        let id = validator.check_id()?;

        if self.store.delete(id)? {
            info!(%id, "person deleted");
            Ok(ApiResponse::no_content())
        } else {
            Ok(person_not_found(id))
        }
    }
}

fn person_not_found(id: PersonId) -> ApiResponse {
    ApiResponse::not_found("Person not found", Some(json!({ "id": id })))
}
