//! Metadata information regarding introspected types and their fields.

use std::fmt;

use enum_iterator::Sequence;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;

/// The semantic types a field can be classified as.
///
/// The semantic type drives both predicate rendering and projection rendering,
/// so every field has exactly one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum SemanticType {
    #[serde(rename = "ID")]
    Id,
    String,
    Number,
    DateTime,
    Enum,
    Boolean,
    Relation,
    Json,
    Unknown,
}

impl SemanticType {
    /// Map the name of an introspected scalar onto a semantic type.
    pub fn from_scalar_name(name: &str) -> Option<SemanticType> {
        match name {
            "ID" | "UUID" => Some(SemanticType::Id),
            "String" => Some(SemanticType::String),
            "Int" | "Float" | "Long" | "Decimal" | "BigInt" => Some(SemanticType::Number),
            "DateTime" => Some(SemanticType::DateTime),
            "Boolean" => Some(SemanticType::Boolean),
            "Json" => Some(SemanticType::Json),
            _ => None,
        }
    }

    /// Whether values of this type live in a column of the table itself.
    ///
    /// Relations and unclassified fields are never selected, returned or written directly.
    pub fn is_storable(self) -> bool {
        !matches!(self, SemanticType::Relation | SemanticType::Unknown)
    }

    /// The name of the type as it appears in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            SemanticType::Id => "ID",
            SemanticType::String => "String",
            SemanticType::Number => "Number",
            SemanticType::DateTime => "DateTime",
            SemanticType::Enum => "Enum",
            SemanticType::Boolean => "Boolean",
            SemanticType::Relation => "Relation",
            SemanticType::Json => "Json",
            SemanticType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether an introspected type is persisted as a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A persisted entity, exposed as a CRUD target.
    Table,
    /// Any other introspected type (inputs, enums, payloads). Kept as reference data only.
    Reference,
}

/// Mapping from a field name to its semantic type, in declaration order.
pub type FieldsInfo = IndexMap<String, SemanticType>;

/// Information about an introspected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: FieldsInfo,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub input_fields: FieldsInfo,
}

impl TypeInfo {
    /// A persisted table with the given fields.
    pub fn table<N, F>(name: impl Into<String>, fields: F) -> TypeInfo
    where
        N: Into<String>,
        F: IntoIterator<Item = (N, SemanticType)>,
    {
        TypeInfo {
            name: name.into(),
            kind: TypeKind::Table,
            fields: fields
                .into_iter()
                .map(|(field, semantic_type)| (field.into(), semantic_type))
                .collect(),
            input_fields: IndexMap::new(),
        }
    }

    /// A type kept only as reference data.
    pub fn reference<N, F>(name: impl Into<String>, fields: F) -> TypeInfo
    where
        N: Into<String>,
        F: IntoIterator<Item = (N, SemanticType)>,
    {
        TypeInfo {
            kind: TypeKind::Reference,
            ..TypeInfo::table(name, fields)
        }
    }

    pub fn is_table(&self) -> bool {
        self.kind == TypeKind::Table
    }

    pub fn field_type(&self, field: &str) -> Option<SemanticType> {
        self.fields.get(field).copied()
    }

    /// Look up the semantic type of a field, failing if the type does not declare it.
    pub fn lookup_field(&self, field: &str) -> Result<SemanticType, CatalogError> {
        self.field_type(field)
            .ok_or_else(|| CatalogError::UnknownField {
                table: self.name.clone(),
                field: field.to_string(),
            })
    }

    /// Fields that can be selected and returned, in declaration order.
    pub fn storable_fields(&self) -> impl Iterator<Item = (&str, SemanticType)> {
        self.fields
            .iter()
            .filter(|(_, semantic_type)| semantic_type.is_storable())
            .map(|(name, semantic_type)| (name.as_str(), *semantic_type))
    }
}
