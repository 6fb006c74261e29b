//! Inputs to translation: filter conditions and insert/update payloads.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;

use super::error::Error;

/// A value supplied for a condition key or a payload field.
///
/// `Unset` is never rendered: a condition key or payload field holding it is skipped.
/// It is distinct from `Value(Null)`, which is an explicit SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum InputValue {
    #[default]
    Unset,
    Value(serde_json::Value),
}

impl InputValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, InputValue::Unset)
    }

    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            InputValue::Unset => None,
            InputValue::Value(value) => Some(value),
        }
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        InputValue::Value(value)
    }
}

/// A flat filter object: condition keys mapped to values.
///
/// Keys are kept ordered so that the same condition always renders the same SQL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Condition(BTreeMap<String, InputValue>);

impl Condition {
    pub fn new() -> Condition {
        Condition::default()
    }

    /// Add a condition key with a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, InputValue::Value(value.into()));
        self
    }

    /// Add a condition key whose value is unset.
    #[must_use]
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.insert(key, InputValue::Unset);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: InputValue) {
        self.0.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a condition from a json object, such as a serialized where-input struct.
    pub fn from_json(value: serde_json::Value) -> Result<Condition, Error> {
        match value {
            serde_json::Value::Object(object) => Ok(Condition(
                object
                    .into_iter()
                    .map(|(key, value)| (key, InputValue::Value(value)))
                    .collect(),
            )),
            other => Err(Error::NotAnObject(other)),
        }
    }
}

/// An insert or update payload: field names mapped to values, in the order given.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Data(IndexMap<String, InputValue>);

impl Data {
    pub fn new() -> Data {
        Data::default()
    }

    /// Add a field with a value.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(field, InputValue::Value(value.into()));
        self
    }

    /// Add a field whose value is unset.
    #[must_use]
    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.insert(field, InputValue::Unset);
        self
    }

    /// Set a field, replacing any previous value but keeping its position.
    pub fn insert(&mut self, field: impl Into<String>, value: InputValue) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&InputValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Fields that hold a value, skipping unset ones.
    pub fn values(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.iter()
            .filter_map(|(field, value)| value.as_value().map(|value| (field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a payload from a json object, such as a serialized create-input struct.
    pub fn from_json(value: serde_json::Value) -> Result<Data, Error> {
        match value {
            serde_json::Value::Object(object) => Ok(Data(
                object
                    .into_iter()
                    .map(|(field, value)| (field, InputValue::Value(value)))
                    .collect(),
            )),
            other => Err(Error::NotAnObject(other)),
        }
    }
}
