//! Errors for translation.

use query_engine_metadata::metadata::{CatalogError, SemanticType};
use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    SchemaResolution(#[from] CatalogError),
    #[error("Unsupported Operator '{key}' for table '{table}'")]
    UnsupportedOperator { key: String, table: String },
    #[error("condition key '{key}' matches more than one field of table '{table}'")]
    AmbiguousConditionKey { key: String, table: String },
    #[error("field '{field}' of table '{table}' has type {semantic_type} and cannot be filtered or stored")]
    UnsupportedFieldType {
        table: String,
        field: String,
        semantic_type: SemanticType,
    },
    #[error("value {value} does not fit field '{field}' of type {semantic_type}")]
    TypeMismatch {
        field: String,
        semantic_type: SemanticType,
        value: serde_json::Value,
    },
    #[error("invalid date time '{0}'")]
    InvalidDateTime(String),
    #[error("nothing to update in table '{0}'")]
    EmptyUpdate(String),
    #[error("expected a json object, got {0}")]
    NotAnObject(serde_json::Value),
}
