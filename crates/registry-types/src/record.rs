//! Person records.
//!
//! A [`Record`] is an opaque JSON object. The store never looks inside it;
//! only the request handlers care about the mandatory [`REQUIRED_FIELDS`].

use serde_json::{Map, Value};

/// One stored person: a mapping of field name to JSON value.
pub type Record = Map<String, Value>;

/// Fields a full person representation must carry (POST and PUT).
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "age", "hobbies"];

/// Return the entries of `required` that are absent from `record`,
/// preserving the order of `required`.
pub fn missing_fields<'a>(record: &Record, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| !record.contains_key(*field))
        .collect()
}

/// Shallow merge: every top-level field of `patch` overrides the field of
/// the same name in `base`; fields only present in `base` survive.
pub fn merge(mut base: Record, patch: Record) -> Record {
    for (key, value) in patch {
        base.insert(key, value);
    }
    base
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => Record::new(),
        }
    }

    #[test]
    fn no_missing_fields_for_full_record() {
        let person = record(json!({"name": "John Silver", "age": 42, "hobbies": ["maps"]}));
        assert!(missing_fields(&person, &REQUIRED_FIELDS).is_empty());
    }

    #[test]
    fn missing_fields_keep_required_order() {
        let person = record(json!({"age": 42}));
        assert_eq!(missing_fields(&person, &REQUIRED_FIELDS), vec!["name", "hobbies"]);
    }

    #[test]
    fn null_value_counts_as_present() {
        let person = record(json!({"name": null, "age": null, "hobbies": null}));
        assert!(missing_fields(&person, &REQUIRED_FIELDS).is_empty());
    }

    #[test]
    fn merge_overrides_and_preserves() {
        let base = record(json!({"name": "John Silver", "age": 42, "hobbies": ["maps"]}));
        let patch = record(json!({"age": 43, "ship": "Hispaniola"}));
        let merged = merge(base, patch);
        assert_eq!(
            Value::Object(merged),
            json!({"name": "John Silver", "age": 43, "hobbies": ["maps"], "ship": "Hispaniola"})
        );
    }

    #[test]
    fn merge_is_shallow() {
        let base = record(json!({"address": {"city": "Bristol", "street": "Spyglass"}}));
        let patch = record(json!({"address": {"city": "London"}}));
        let merged = merge(base, patch);
        assert_eq!(Value::Object(merged), json!({"address": {"city": "London"}}));
    }
}
