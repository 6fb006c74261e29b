//! Build a schema catalog from a schema service.

use std::collections::BTreeMap;

use query_engine_metadata::metadata::{Catalog, FieldsInfo, SemanticType, TypeInfo, TypeKind};
use tracing::{info_span, Instrument};

use super::classify::{classify_field, classify_input_field, ClassificationWarning};
use super::service::{IntrospectedType, IntrospectionError, SchemaService};

/// Types implementing this interface are persisted tables unless configured otherwise.
pub const DEFAULT_MARKER_INTERFACE: &str = "Node";

/// A type that could not be introspected. It is absent from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFailure {
    pub type_name: String,
    pub error: String,
}

/// Diagnostics of the last compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// The persisted tables of the compiled catalog.
    pub tables: Vec<String>,
    pub warnings: Vec<ClassificationWarning>,
    pub failures: Vec<TypeFailure>,
}

/// Compiles schema catalogs, caching every type it has resolved.
///
/// The cache belongs to the compiler, so a type is fetched at most once per compiler.
#[derive(Debug)]
pub struct IntrospectionCompiler<S> {
    service: S,
    marker_interface: String,
    cache: BTreeMap<String, CachedType>,
    report: CompileReport,
}

/// A resolved type and the warnings raised while classifying its fields.
#[derive(Debug)]
struct CachedType {
    type_info: TypeInfo,
    warnings: Vec<ClassificationWarning>,
}

impl<S: SchemaService> IntrospectionCompiler<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            marker_interface: DEFAULT_MARKER_INTERFACE.to_string(),
            cache: BTreeMap::new(),
            report: CompileReport::default(),
        }
    }

    #[must_use]
    pub fn with_marker_interface(mut self, marker_interface: impl Into<String>) -> Self {
        self.marker_interface = marker_interface.into();
        self
    }

    pub fn report(&self) -> &CompileReport {
        &self.report
    }

    /// Compile a catalog of every declared type.
    ///
    /// Failing to list the types aborts the compile. Failing to fetch one type is recorded
    /// in the report and the remaining types are still compiled. The report is replaced on
    /// every compile; warnings of cached types are reported again.
    pub async fn compile(&mut self) -> Result<Catalog, IntrospectionError> {
        let names = self
            .service
            .type_names()
            .instrument(info_span!("List types"))
            .await?;

        let mut report = CompileReport::default();
        // GraphQL meta types describe the schema itself.
        for name in names.iter().filter(|name| !name.starts_with("__")) {
            let resolved = self.resolve_type(name).await.map(|_| ());
            if let Err(error) = resolved {
                tracing::warn!(type_name = name, %error, "cannot introspect type");
                report.failures.push(TypeFailure {
                    type_name: name.clone(),
                    error: error.to_string(),
                });
            }
        }

        let catalog = Catalog::new(self.cache.values().map(|cached| cached.type_info.clone()));
        report.tables = catalog.tables().map(|table| table.name.clone()).collect();
        report.warnings = self
            .cache
            .values()
            .flat_map(|cached| cached.warnings.iter().cloned())
            .collect();
        for table in catalog.tables() {
            tracing::info!(table = table.name, fields = ?table.fields, "compiled table");
        }
        self.report = report;
        Ok(catalog)
    }

    /// Resolve one type, from the cache when it was resolved before.
    pub async fn resolve_type(&mut self, name: &str) -> Result<&TypeInfo, IntrospectionError> {
        if !self.cache.contains_key(name) {
            let introspected = self
                .service
                .type_definition(name)
                .instrument(info_span!("Introspect type", type_name = name))
                .await?
                .ok_or_else(|| IntrospectionError::TypeNotFound(name.to_string()))?;
            let cached = self.compile_type(&introspected);
            self.cache.insert(name.to_string(), cached);
        }
        self.cache
            .get(name)
            .map(|cached| &cached.type_info)
            .ok_or_else(|| IntrospectionError::TypeNotFound(name.to_string()))
    }

    fn compile_type(&self, introspected: &IntrospectedType) -> CachedType {
        let mut warnings = Vec::new();
        let fields: FieldsInfo = introspected
            .fields
            .iter()
            .flatten()
            .map(|field| {
                let semantic_type = classify_field(&introspected.name, field).unwrap_or_else(|warning| {
                    tracing::warn!(%warning);
                    warnings.push(warning);
                    SemanticType::Unknown
                });
                (field.name.clone(), semantic_type)
            })
            .collect();

        let input_fields: FieldsInfo = introspected
            .input_fields
            .iter()
            .flatten()
            .filter_map(|field| {
                classify_input_field(field).map(|semantic_type| (field.name.clone(), semantic_type))
            })
            .collect();

        let kind = if introspected.implements(&self.marker_interface) {
            TypeKind::Table
        } else {
            TypeKind::Reference
        };

        CachedType {
            type_info: TypeInfo {
                name: introspected.name.clone(),
                kind,
                fields,
                input_fields,
            },
            warnings,
        }
    }
}
