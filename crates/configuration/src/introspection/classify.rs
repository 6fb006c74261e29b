//! Classify introspected fields into semantic types.

use query_engine_metadata::metadata::SemanticType;
use thiserror::Error;

use super::service::{IntrospectedField, TypeKind, TypeRef};

/// A field whose shape could not be classified. The field is kept as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot classify field '{field}' of type '{type_name}': {reason}")]
pub struct ClassificationWarning {
    pub type_name: String,
    pub field: String,
    pub reason: String,
}

/// Classify a field of an object type.
///
/// In order of precedence:
/// - `NON_NULL` around a scalar: that scalar
/// - `NON_NULL` around an enum: Enum
/// - a list, or an object (wrapped or not): Relation
/// - a nullable enum: Enum
/// - a nullable scalar: that scalar
pub fn classify_field(
    type_name: &str,
    field: &IntrospectedField,
) -> Result<SemanticType, ClassificationWarning> {
    let warning = |reason: String| ClassificationWarning {
        type_name: type_name.to_string(),
        field: field.name.clone(),
        reason,
    };

    let type_ref = &field.type_ref;
    match type_ref.kind {
        TypeKind::NonNull => {
            let inner = type_ref
                .of_type
                .as_deref()
                .ok_or_else(|| warning("NON_NULL without a wrapped type".to_string()))?;
            match inner.kind {
                TypeKind::Scalar => scalar(inner).map_err(warning),
                TypeKind::Enum => Ok(SemanticType::Enum),
                TypeKind::List | TypeKind::Object => Ok(SemanticType::Relation),
                other => Err(warning(format!("unsupported wrapped kind {other:?}"))),
            }
        }
        TypeKind::List | TypeKind::Object => Ok(SemanticType::Relation),
        TypeKind::Enum => Ok(SemanticType::Enum),
        TypeKind::Scalar => scalar(type_ref).map_err(warning),
        other => Err(warning(format!("unsupported kind {other:?}"))),
    }
}

/// Classify a declared input field. Only scalar inputs are kept.
pub fn classify_input_field(field: &IntrospectedField) -> Option<SemanticType> {
    let type_ref = match field.type_ref.kind {
        TypeKind::NonNull => field.type_ref.of_type.as_deref()?,
        _ => &field.type_ref,
    };
    match type_ref.kind {
        TypeKind::Scalar => scalar(type_ref).ok(),
        _ => None,
    }
}

fn scalar(type_ref: &TypeRef) -> Result<SemanticType, String> {
    let name = type_ref
        .name
        .as_deref()
        .ok_or_else(|| "scalar without a name".to_string())?;
    SemanticType::from_scalar_name(name).ok_or_else(|| format!("unknown scalar '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(type_ref: serde_json::Value) -> IntrospectedField {
        serde_json::from_value(serde_json::json!({ "name": "f", "type": type_ref })).unwrap()
    }

    #[test]
    fn test_precedence() {
        let cases = [
            (
                serde_json::json!({"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "DateTime"}}),
                SemanticType::DateTime,
            ),
            (
                serde_json::json!({"kind": "NON_NULL", "ofType": {"kind": "ENUM", "name": "Role"}}),
                SemanticType::Enum,
            ),
            (
                serde_json::json!({"kind": "NON_NULL", "ofType": {"kind": "LIST"}}),
                SemanticType::Relation,
            ),
            (
                serde_json::json!({"kind": "LIST", "ofType": {"kind": "OBJECT", "name": "Post"}}),
                SemanticType::Relation,
            ),
            (
                serde_json::json!({"kind": "OBJECT", "name": "User"}),
                SemanticType::Relation,
            ),
            (
                serde_json::json!({"kind": "SCALAR", "name": "Json"}),
                SemanticType::Json,
            ),
            (
                serde_json::json!({"kind": "ENUM", "name": "Role"}),
                SemanticType::Enum,
            ),
        ];

        for (type_ref, expected) in cases {
            assert_eq!(classify_field("User", &field(type_ref)), Ok(expected));
        }
    }

    #[test]
    fn test_unknown_shapes_are_warnings() {
        let warning =
            classify_field("User", &field(serde_json::json!({"kind": "SCALAR", "name": "Upload"})))
                .unwrap_err();
        assert_eq!(warning.field, "f");
        assert_eq!(warning.reason, "unknown scalar 'Upload'");

        assert!(classify_field("User", &field(serde_json::json!({"kind": "UNION", "name": "U"})))
            .is_err());
    }

    #[test]
    fn test_input_fields_keep_only_scalars() {
        assert_eq!(
            classify_input_field(&field(
                serde_json::json!({"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}})
            )),
            Some(SemanticType::String)
        );
        assert_eq!(
            classify_input_field(&field(
                serde_json::json!({"kind": "INPUT_OBJECT", "name": "PostWhereInput"})
            )),
            None
        );
    }
}
