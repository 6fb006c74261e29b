//! The schema service seam and the shapes it answers with.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while talking to a schema service.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("invalid introspection endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("introspection request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("introspection query returned errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("introspection query returned no data")]
    MissingData,
    #[error("type '{0}' is not declared by the schema service")]
    TypeNotFound(String),
}

/// The kind of an introspected type or type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// A reference to a type, possibly wrapped in `NON_NULL` or `LIST`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumValue {
    pub name: String,
}

/// A field or input field of an introspected type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IntrospectedField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterfaceRef {
    pub name: String,
}

/// Everything the compiler needs to know about one declared type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectedType {
    pub name: String,
    #[serde(default)]
    pub interfaces: Option<Vec<InterfaceRef>>,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectedField>>,
    #[serde(default)]
    pub input_fields: Option<Vec<IntrospectedField>>,
}

impl IntrospectedType {
    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces
            .iter()
            .flatten()
            .any(|declared| declared.name == interface)
    }
}

/// A service that can describe the types of a schema.
#[async_trait]
pub trait SchemaService: Send + Sync {
    /// The names of all declared types.
    async fn type_names(&self) -> Result<Vec<String>, IntrospectionError>;

    /// The fields, input fields and interfaces of one type, or `None` if it is not declared.
    async fn type_definition(
        &self,
        name: &str,
    ) -> Result<Option<IntrospectedType>, IntrospectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_introspected_type() {
        let introspected: IntrospectedType = serde_json::from_value(serde_json::json!({
            "name": "User",
            "interfaces": [{ "name": "Node" }],
            "fields": [
                {
                    "name": "id",
                    "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID" } }
                },
                {
                    "name": "posts",
                    "type": { "kind": "LIST", "name": null, "ofType": { "kind": "NON_NULL", "name": null } }
                }
            ],
            "inputFields": null
        }))
        .unwrap();

        assert!(introspected.implements("Node"));
        assert!(!introspected.implements("Edge"));
        let fields = introspected.fields.unwrap();
        assert_eq!(fields[0].type_ref.kind, TypeKind::NonNull);
        assert_eq!(
            fields[0].type_ref.of_type.as_ref().and_then(|t| t.name.as_deref()),
            Some("ID")
        );
        assert_eq!(introspected.input_fields, None);
    }
}
