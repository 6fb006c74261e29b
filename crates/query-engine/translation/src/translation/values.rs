//! Handle the translation of literal values.

use query_engine_metadata::metadata::SemanticType;
use query_engine_sql::sql;

use super::error::Error;

/// The scalar type DateTime values are cast to when written.
const TIMESTAMP_TYPE: &str = "timestamp";

/// A json value resolved against the semantic type of the field it is used with.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Id(String),
    String(String),
    Enum(String),
    Number(Number),
    Boolean(bool),
    DateTime(String),
    Json(serde_json::Value),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Resolve a json value against a field's semantic type.
///
/// Relations and unclassified fields never hold values of their own.
pub fn type_value(
    table: &str,
    field: &str,
    semantic_type: SemanticType,
    value: &serde_json::Value,
) -> Result<TypedValue, Error> {
    let mismatch = || Error::TypeMismatch {
        field: field.to_string(),
        semantic_type,
        value: value.clone(),
    };
    match (semantic_type, value) {
        (SemanticType::Relation | SemanticType::Unknown, _) => Err(Error::UnsupportedFieldType {
            table: table.to_string(),
            field: field.to_string(),
            semantic_type,
        }),
        (_, serde_json::Value::Null) => Ok(TypedValue::Null),
        (SemanticType::Json, value) => Ok(TypedValue::Json(value.clone())),
        (SemanticType::Id, serde_json::Value::String(s)) => Ok(TypedValue::Id(s.clone())),
        (SemanticType::String, serde_json::Value::String(s)) => Ok(TypedValue::String(s.clone())),
        (SemanticType::Enum, serde_json::Value::String(s)) => Ok(TypedValue::Enum(s.clone())),
        (SemanticType::DateTime, serde_json::Value::String(s)) => {
            Ok(TypedValue::DateTime(s.clone()))
        }
        (SemanticType::Boolean, serde_json::Value::Bool(b)) => Ok(TypedValue::Boolean(*b)),
        (SemanticType::Number, serde_json::Value::Number(n)) => n
            .as_i64()
            .map(Number::Int)
            .or_else(|| n.as_f64().map(Number::Float))
            .map(TypedValue::Number)
            .ok_or_else(mismatch),
        _ => Err(mismatch()),
    }
}

impl TypedValue {
    /// The text of string-like values, used by substring matching.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Id(s) | TypedValue::String(s) | TypedValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a bound parameter (or `NULL`), for comparisons.
    pub fn into_sql_value(self) -> sql::ast::Value {
        match self {
            TypedValue::Id(s)
            | TypedValue::String(s)
            | TypedValue::Enum(s)
            | TypedValue::DateTime(s) => sql::ast::Value::String(s),
            TypedValue::Number(Number::Int(i)) => sql::ast::Value::Int8(i),
            TypedValue::Number(Number::Float(f)) => sql::ast::Value::Float8(f),
            TypedValue::Boolean(b) => sql::ast::Value::Bool(b),
            TypedValue::Json(json) => sql::ast::Value::JsonValue(json),
            TypedValue::Null => sql::ast::Value::Null,
        }
    }

    /// The value as written by an INSERT or UPDATE.
    ///
    /// Dates are cast to `timestamp` and json is bound as json.
    pub fn into_write_expression(self) -> sql::ast::Expression {
        match self {
            TypedValue::DateTime(s) => sql::ast::Expression::Cast {
                expression: Box::new(sql::ast::Expression::Value(sql::ast::Value::String(s))),
                r#type: sql::ast::ScalarType(TIMESTAMP_TYPE.to_string()),
            },
            value => sql::ast::Expression::Value(value.into_sql_value()),
        }
    }
}
