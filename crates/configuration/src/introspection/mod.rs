//! Compile a schema catalog by introspecting a schema service.

pub mod classify;
pub mod compiler;
pub mod graphql;
pub mod service;

pub use classify::{classify_field, classify_input_field, ClassificationWarning};
pub use compiler::{CompileReport, IntrospectionCompiler, TypeFailure, DEFAULT_MARKER_INTERFACE};
pub use graphql::GraphQlSchemaService;
pub use service::{IntrospectedField, IntrospectedType, IntrospectionError, SchemaService, TypeRef};
