//! Helpers for processing requests and building SQL.

use query_engine_metadata::metadata::{Catalog, TypeInfo};
use query_engine_sql::sql;

use super::error::Error;

/// Static information from the catalog and configuration.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    catalog: &'a Catalog,
    schema: &'a str,
}

impl<'a> Env<'a> {
    /// Create a new Env over a catalog and the database schema its tables live in.
    pub fn new(catalog: &'a Catalog, schema: &'a str) -> Env<'a> {
        Env { catalog, schema }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn schema(&self) -> &'a str {
        self.schema
    }

    /// Lookup a persisted table in the catalog.
    pub fn lookup_table(&self, name: &str) -> Result<&'a TypeInfo, Error> {
        Ok(self.catalog.lookup_table(name)?)
    }

    /// Reference a table in the configured schema.
    pub fn db_table(&self, table: &TypeInfo) -> sql::ast::TableReference {
        sql::helpers::make_db_table(self.schema, &table.name)
    }

    pub(crate) fn schema_name(&self) -> sql::ast::SchemaName {
        sql::ast::SchemaName(self.schema.to_string())
    }

    pub(crate) fn table_name(table: &TypeInfo) -> sql::ast::TableName {
        sql::ast::TableName(table.name.clone())
    }
}
