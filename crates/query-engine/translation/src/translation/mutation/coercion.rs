//! Normalize insert and update payloads before they are stored.

use std::fmt;

use query_engine_metadata::metadata::{SemanticType, TypeInfo};

use crate::translation::datetime;
use crate::translation::error::Error;
use crate::translation::input::{Data, InputValue};

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Produces fresh identifiers for inserted rows.
pub trait IdGenerator: fmt::Debug + Send + Sync {
    fn generate(&self) -> String;
}

/// Time-ordered UUIDs (version 7): sortable and collision resistant.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn generate(&self) -> String {
        uuid::Uuid::now_v7().to_string()
    }
}

/// Build the row to insert:
/// `{id: explicit id or a fresh one, createdAt: now, updatedAt: now, ...input}`.
///
/// Only the bookkeeping fields the table declares are added. Input values override the
/// defaults, except that an explicit id always wins. Unset input fields are dropped and
/// dates are truncated to whole seconds.
pub fn prepare_insert(
    table: &TypeInfo,
    input: &Data,
    explicit_id: Option<&str>,
    ids: &dyn IdGenerator,
    now: &str,
) -> Result<Data, Error> {
    let mut row = Data::new();
    if table.field_type(ID_FIELD).is_some() {
        let id = explicit_id.map_or_else(|| ids.generate(), ToString::to_string);
        row.insert(ID_FIELD, InputValue::Value(id.into()));
    }
    for field in [CREATED_AT_FIELD, UPDATED_AT_FIELD] {
        if table.field_type(field).is_some() {
            row.insert(field, InputValue::Value(now.into()));
        }
    }

    for (field, value) in truncate_dates(table, input)?.values() {
        if field == ID_FIELD && explicit_id.is_some() {
            continue;
        }
        row.insert(field, InputValue::Value(value.clone()));
    }
    Ok(row)
}

/// Build the values to update. The caller's payload is left untouched.
///
/// Every date present in the payload is truncated to whole seconds, dropping the
/// fraction and any time zone suffix.
pub fn prepare_update(table: &TypeInfo, data: &Data) -> Result<Data, Error> {
    truncate_dates(table, data)
}

fn truncate_dates(table: &TypeInfo, data: &Data) -> Result<Data, Error> {
    let mut prepared = Data::new();
    for (field, value) in data.iter() {
        let value = match (table.field_type(field), value) {
            (Some(SemanticType::DateTime), InputValue::Value(serde_json::Value::String(s))) => {
                InputValue::Value(datetime::truncate_to_seconds(s)?.into())
            }
            _ => value.clone(),
        };
        prepared.insert(field, value);
    }
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct FixedId;

    impl IdGenerator for FixedId {
        fn generate(&self) -> String {
            "generated".to_string()
        }
    }

    fn user() -> TypeInfo {
        TypeInfo::table(
            "User",
            [
                ("id", SemanticType::Id),
                ("email", SemanticType::String),
                ("createdAt", SemanticType::DateTime),
            ],
        )
    }

    fn value<'a>(data: &'a Data, field: &str) -> Option<&'a serde_json::Value> {
        data.get(field).and_then(InputValue::as_value)
    }

    #[test]
    fn test_insert_fills_in_bookkeeping_fields() {
        let input = Data::new().with("email", "a@x.com");
        let row = prepare_insert(&user(), &input, None, &FixedId, "2024-01-01T00:00:00").unwrap();
        assert_eq!(value(&row, "id"), Some(&json!("generated")));
        assert_eq!(value(&row, "createdAt"), Some(&json!("2024-01-01T00:00:00")));
        // User declares no updatedAt
        assert_eq!(row.get("updatedAt"), None);
        assert_eq!(value(&row, "email"), Some(&json!("a@x.com")));
    }

    #[test]
    fn test_explicit_id_is_never_overwritten() {
        let input = Data::new().with("id", "from-input");
        let row = prepare_insert(&user(), &input, Some("u1"), &FixedId, "now").unwrap();
        assert_eq!(value(&row, "id"), Some(&json!("u1")));

        let row = prepare_insert(&user(), &input, None, &FixedId, "now").unwrap();
        assert_eq!(value(&row, "id"), Some(&json!("from-input")));
    }

    #[test]
    fn test_update_truncates_dates_without_touching_the_payload() {
        let data = Data::new()
            .with("createdAt", "2024-01-01T00:00:00.123Z")
            .with("email", "b@x.com");
        let prepared = prepare_update(&user(), &data).unwrap();
        assert_eq!(value(&prepared, "createdAt"), Some(&json!("2024-01-01T00:00:00")));
        assert_eq!(value(&data, "createdAt"), Some(&json!("2024-01-01T00:00:00.123Z")));
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids = UuidV7Generator;
        assert_ne!(ids.generate(), ids.generate());
    }
}
