//! Per-table CRUD operations over a compiled catalog.

use std::sync::Arc;

use query_engine_metadata::metadata::{Catalog, TypeInfo};
use query_engine_sql::sql::execution_plan::ExecutionPlan;
use query_engine_translation::translation::helpers::Env;
use query_engine_translation::translation::input::{Condition, Data};
use query_engine_translation::translation::mutation::{self, IdGenerator, UuidV7Generator};
use query_engine_translation::translation::query::{self as translate, Selection};
use schema_bridge_configuration::Configuration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgConnection, PgPool};

use crate::error::Error;
use crate::query::{self, Query};
use crate::state::{self, InitializationError};

/// A catalog, the schema its tables live in, and a pool to reach them.
///
/// Cloning is cheap: the catalog, the pool and the id generator are shared.
#[derive(Debug, Clone)]
pub struct SchemaBridge {
    catalog: Arc<Catalog>,
    schema: String,
    pool: PgPool,
    ids: Arc<dyn IdGenerator>,
}

impl SchemaBridge {
    pub fn new(catalog: Arc<Catalog>, schema: impl Into<String>, pool: PgPool) -> Self {
        SchemaBridge {
            catalog,
            schema: schema.into(),
            pool,
            ids: Arc::new(UuidV7Generator),
        }
    }

    /// Create the pool described by a runtime configuration and bridge its catalog.
    pub async fn connect(configuration: &Configuration) -> Result<Self, InitializationError> {
        let pool = state::create_pool(configuration).await?;
        Ok(SchemaBridge::new(
            configuration.catalog.clone(),
            configuration.schema.clone(),
            pool,
        ))
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The accessor of a persisted table.
    pub fn table(&self, name: &str) -> Result<TableAccessor<'_>, Error> {
        let table = self.env().lookup_table(name)?;
        Ok(TableAccessor {
            bridge: self,
            table,
        })
    }

    fn env(&self) -> Env<'_> {
        Env::new(&self.catalog, &self.schema)
    }
}

/// CRUD operations on one table.
///
/// Every operation accepts an optional transaction. When one is given the statement runs on
/// it and nothing else: accessors never begin, commit or roll back transactions.
#[derive(Debug, Clone, Copy)]
pub struct TableAccessor<'a> {
    bridge: &'a SchemaBridge,
    table: &'a TypeInfo,
}

impl<'a> TableAccessor<'a> {
    pub fn name(&self) -> &'a str {
        &self.table.name
    }

    pub fn type_info(&self) -> &'a TypeInfo {
        self.table
    }

    /// The columns returned after an insert or update.
    pub fn return_columns(&self) -> Vec<String> {
        translate::return_columns(self.table)
    }

    pub fn plan_query_one(
        &self,
        condition: &Condition,
        selection: &Selection,
    ) -> Result<ExecutionPlan, Error> {
        Ok(translate::translate(
            &self.bridge.env(),
            self.name(),
            condition,
            selection,
            Some(1),
        )?)
    }

    pub fn plan_insert(&self, input: &Data, explicit_id: Option<&str>) -> Result<ExecutionPlan, Error> {
        Ok(mutation::translate_insert(
            &self.bridge.env(),
            self.name(),
            input,
            explicit_id,
            self.bridge.ids.as_ref(),
        )?)
    }

    pub fn plan_update(&self, condition: &Condition, data: &Data) -> Result<ExecutionPlan, Error> {
        Ok(mutation::translate_update(
            &self.bridge.env(),
            self.name(),
            condition,
            data,
        )?)
    }

    pub fn plan_delete(&self, condition: &Condition) -> Result<ExecutionPlan, Error> {
        Ok(mutation::translate_delete(
            &self.bridge.env(),
            self.name(),
            condition,
        )?)
    }

    /// The first row matching a unique condition, if any.
    pub async fn query_one(
        &self,
        condition: &Condition,
        selection: &Selection,
        tx: Option<&mut PgConnection>,
    ) -> Result<Option<serde_json::Value>, Error> {
        let plan = self.plan_query_one(condition, selection)?;
        let rows = query::fetch_rows(&self.bridge.pool, tx, &plan).await?;
        Ok(rows.into_iter().next())
    }

    /// All rows matching a condition, as a query that has not run yet.
    ///
    /// The transaction, if any, is given when the query is fetched.
    pub fn query_many(&self, condition: &Condition, selection: &Selection) -> Result<Query, Error> {
        let select = translate::translate_select(
            &self.bridge.env(),
            self.name(),
            condition,
            selection,
            None,
        )?;
        Ok(Query::new(
            self.bridge.catalog.clone(),
            self.bridge.schema.clone(),
            self.bridge.pool.clone(),
            self.table.name.clone(),
            select,
        ))
    }

    /// Insert one row and return it as stored.
    pub async fn insert(
        &self,
        input: &Data,
        tx: Option<&mut PgConnection>,
        explicit_id: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let plan = self.plan_insert(input, explicit_id)?;
        let rows = query::fetch_rows(&self.bridge.pool, tx, &plan).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NoRowReturned(self.table.name.clone()))
    }

    /// Update the rows matching a condition and return the first of them as stored.
    ///
    /// Every matching row is updated; the condition is expected to be unique.
    pub async fn update_one(
        &self,
        condition: &Condition,
        data: &Data,
        tx: Option<&mut PgConnection>,
    ) -> Result<Option<serde_json::Value>, Error> {
        let plan = self.plan_update(condition, data)?;
        let rows = query::fetch_rows(&self.bridge.pool, tx, &plan).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete the rows matching a condition and return how many were removed.
    pub async fn delete(
        &self,
        condition: &Condition,
        tx: Option<&mut PgConnection>,
    ) -> Result<u64, Error> {
        let plan = self.plan_delete(condition)?;
        query::execute_count(&self.bridge.pool, tx, &plan).await
    }
}

/// Read a returned row into a typed row.
pub fn decode_row<T: DeserializeOwned>(table: &str, row: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(row).map_err(|error| Error::RowShape {
        table: table.to_string(),
        error,
    })
}

/// Turn a typed row into a payload. Absent fields are left out.
pub fn encode_data<T: Serialize>(table: &str, row: &T) -> Result<Data, Error> {
    let value = serde_json::to_value(row).map_err(|error| Error::RowShape {
        table: table.to_string(),
        error,
    })?;
    Ok(Data::from_json(value)?)
}

/// Turn a typed row into an equality condition on its present fields.
pub fn encode_condition<T: Serialize>(table: &str, row: &T) -> Result<Condition, Error> {
    let value = serde_json::to_value(row).map_err(|error| Error::RowShape {
        table: table.to_string(),
        error,
    })?;
    Ok(Condition::from_json(value)?)
}
