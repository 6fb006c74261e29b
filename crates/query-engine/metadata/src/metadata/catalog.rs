//! The schema catalog: every introspected type, keyed by name.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::database::TypeInfo;

/// A caller referenced a table or field the catalog does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown table '{0}'")]
    UnknownTable(String),
    #[error("unknown field '{field}' in table '{table}'")]
    UnknownField { table: String, field: String },
}

/// Mapping from a type name to its information.
///
/// A catalog is built once and is read-only afterwards, so it can be shared freely
/// between any number of in-flight operations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<String, TypeInfo>);

impl Catalog {
    pub fn empty() -> Catalog {
        Catalog(BTreeMap::new())
    }

    /// Build a catalog from a set of types. A later type replaces an earlier one of the same name.
    pub fn new(types: impl IntoIterator<Item = TypeInfo>) -> Catalog {
        Catalog(
            types
                .into_iter()
                .map(|type_info| (type_info.name.clone(), type_info))
                .collect(),
        )
    }

    pub fn lookup_type(&self, name: &str) -> Option<&TypeInfo> {
        self.0.get(name)
    }

    /// Look up a persisted table. Types that are not tables are not CRUD targets.
    pub fn lookup_table(&self, name: &str) -> Result<&TypeInfo, CatalogError> {
        self.lookup_type(name)
            .filter(|type_info| type_info.is_table())
            .ok_or_else(|| CatalogError::UnknownTable(name.to_string()))
    }

    /// All persisted tables, ordered by name.
    pub fn tables(&self) -> impl Iterator<Item = &TypeInfo> {
        self.0.values().filter(|type_info| type_info.is_table())
    }

    /// All types, tables and reference types alike, ordered by name.
    pub fn types(&self) -> impl Iterator<Item = &TypeInfo> {
        self.0.values()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
