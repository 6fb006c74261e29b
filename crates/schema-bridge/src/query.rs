//! Composable queries over one root table.

use std::sync::Arc;

use query_engine_execution::query as execution;
use query_engine_metadata::metadata::Catalog;
use query_engine_sql::sql;
use query_engine_translation::translation::error as translation;
use query_engine_translation::translation::helpers::Env;
use query_engine_translation::translation::input::Condition;
use query_engine_translation::translation::query::translate_predicates;
use sqlx::postgres::{PgConnection, PgPool};

use crate::error::Error;

pub use query_engine_sql::sql::ast::OrderByDirection;

/// A SELECT on a table that has not run yet.
///
/// Joins, extra conditions, sub-selects, ordering and paging can be attached before it is
/// executed with [`Query::fetch_all`] or [`Query::fetch_optional`]. The root table is aliased
/// by its own name, and so is a joined table unless it is joined under an explicit alias.
/// Aliases are unique within a query.
#[derive(Debug, Clone)]
pub struct Query {
    catalog: Arc<Catalog>,
    schema: String,
    pool: PgPool,
    table: String,
    /// `(alias, table)` of every join
    joined: Vec<(String, String)>,
    select: sql::ast::Select,
}

impl Query {
    pub(crate) fn new(
        catalog: Arc<Catalog>,
        schema: String,
        pool: PgPool,
        table: String,
        select: sql::ast::Select,
    ) -> Self {
        Query {
            catalog,
            schema,
            pool,
            table,
            joined: Vec::new(),
            select,
        }
    }

    /// The root table of the query.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Keep only rows of the root table that have a matching row in another table.
    pub fn inner_join(self, table: &str, field: &str, on_field: &str) -> Result<Self, Error> {
        self.join(table, table, field, on_field, sql::ast::Join::InnerJoin)
    }

    /// Attach another table without dropping rows of the root table that have no match.
    pub fn left_join(self, table: &str, field: &str, on_field: &str) -> Result<Self, Error> {
        self.join(table, table, field, on_field, sql::ast::Join::LeftOuterJoin)
    }

    /// [`Query::inner_join`] under an alias, for self-joins or joining a table twice.
    pub fn inner_join_as(
        self,
        table: &str,
        alias: &str,
        field: &str,
        on_field: &str,
    ) -> Result<Self, Error> {
        self.join(table, alias, field, on_field, sql::ast::Join::InnerJoin)
    }

    /// [`Query::left_join`] under an alias, for self-joins or joining a table twice.
    pub fn left_join_as(
        self,
        table: &str,
        alias: &str,
        field: &str,
        on_field: &str,
    ) -> Result<Self, Error> {
        self.join(table, alias, field, on_field, sql::ast::Join::LeftOuterJoin)
    }

    fn join(
        mut self,
        table_name: &str,
        alias_name: &str,
        field: &str,
        on_field: &str,
        make_join: fn(sql::ast::TableJoin) -> sql::ast::Join,
    ) -> Result<Self, Error> {
        if self.joined_table(alias_name).is_some() {
            return Err(Error::DuplicateJoin(alias_name.to_string()));
        }
        let env = Env::new(&self.catalog, &self.schema);
        let root = env.lookup_table(&self.table)?;
        let table = env.lookup_table(table_name)?;
        root.lookup_field(field).map_err(translation::Error::from)?;
        table.lookup_field(on_field).map_err(translation::Error::from)?;

        let root_alias = sql::helpers::make_table_alias(root.name.clone());
        let alias = sql::helpers::make_table_alias(alias_name.to_string());
        let on = sql::ast::Expression::BinaryOperation {
            left: Box::new(sql::helpers::make_column(Some(&root_alias), field)),
            operator: sql::ast::BinaryOperator::Equals,
            right: Box::new(sql::helpers::make_column(Some(&alias), on_field)),
        };
        self.select.joins.push(make_join(sql::ast::TableJoin {
            reference: env.db_table(table),
            alias,
            on,
        }));
        self.joined.push((alias_name.to_string(), table.name.clone()));
        Ok(self)
    }

    /// The table behind an alias of this query.
    fn joined_table(&self, alias: &str) -> Option<&str> {
        if alias == self.table {
            return Some(&self.table);
        }
        self.joined
            .iter()
            .find(|(joined, _)| joined == alias)
            .map(|(_, table)| table.as_str())
    }

    /// Add a condition on the root table or on a joined table, named by its alias.
    pub fn filter(mut self, alias: &str, condition: &Condition) -> Result<Self, Error> {
        let table = self
            .joined_table(alias)
            .ok_or_else(|| Error::UnknownJoin(alias.to_string()))?
            .to_string();
        let table_alias = sql::helpers::make_table_alias(alias.to_string());
        let env = Env::new(&self.catalog, &self.schema);
        let predicates = translate_predicates(&env, &table, condition, Some(&table_alias))?;
        self.and_where(predicates);
        Ok(self)
    }

    /// Keep only rows whose `field` is among the rows selected by another query.
    ///
    /// The other query should select a single column.
    pub fn where_in(mut self, field: &str, subquery: Query) -> Result<Self, Error> {
        let env = Env::new(&self.catalog, &self.schema);
        env.lookup_table(&self.table)?
            .lookup_field(field)
            .map_err(translation::Error::from)?;

        let alias = sql::helpers::make_table_alias(self.table.clone());
        let predicate = sql::ast::Expression::InSelect {
            left: Box::new(sql::helpers::make_column(Some(&alias), field)),
            select: Box::new(subquery.select),
        };
        self.and_where(vec![predicate]);
        Ok(self)
    }

    /// Order by a field of the root table. Orderings apply in the order they are added.
    pub fn order_by(mut self, field: &str, direction: OrderByDirection) -> Result<Self, Error> {
        let env = Env::new(&self.catalog, &self.schema);
        env.lookup_table(&self.table)?
            .lookup_field(field)
            .map_err(translation::Error::from)?;

        let alias = sql::helpers::make_table_alias(self.table.clone());
        self.select.order_by.elements.push(sql::ast::OrderByElement {
            target: sql::helpers::make_column(Some(&alias), field),
            direction,
        });
        Ok(self)
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.select.limit.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.select.limit.offset = Some(offset);
        self
    }

    /// The SELECT this query runs, before its rows are wrapped as json.
    pub fn to_sql(&self) -> sql::string::SQL {
        sql::execution_plan::select_to_sql(&self.select)
    }

    pub fn into_plan(self) -> sql::execution_plan::ExecutionPlan {
        sql::execution_plan::simple_exec_plan(
            self.table,
            sql::execution_plan::Statement::Select(self.select),
        )
    }

    /// Run the query, inside the given transaction if there is one.
    pub async fn fetch_all(
        self,
        tx: Option<&mut PgConnection>,
    ) -> Result<Vec<serde_json::Value>, Error> {
        let pool = self.pool.clone();
        fetch_rows(&pool, tx, &self.into_plan()).await
    }

    /// Run the query for its first row only.
    pub async fn fetch_optional(
        self,
        tx: Option<&mut PgConnection>,
    ) -> Result<Option<serde_json::Value>, Error> {
        let rows = self.limit(1).fetch_all(tx).await?;
        Ok(rows.into_iter().next())
    }

    fn and_where(&mut self, predicates: Vec<sql::ast::Expression>) {
        let current = std::mem::replace(&mut self.select.where_.0, sql::helpers::true_expr());
        let mut all = Vec::with_capacity(predicates.len() + 1);
        if current != sql::helpers::true_expr() {
            all.push(current);
        }
        all.extend(predicates);
        self.select.where_ = sql::ast::Where(sql::helpers::conjoin(all));
    }
}

/// Run a row-returning plan on the transaction if one is given, on the pool otherwise.
pub(crate) async fn fetch_rows(
    pool: &PgPool,
    tx: Option<&mut PgConnection>,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<Vec<serde_json::Value>, Error> {
    let rows = match tx {
        Some(connection) => execution::fetch_rows(connection, plan).await?,
        None => execution::fetch_rows(pool, plan).await?,
    };
    Ok(rows)
}

/// Run a plan for the number of rows it affected, on the transaction if one is given.
pub(crate) async fn execute_count(
    pool: &PgPool,
    tx: Option<&mut PgConnection>,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<u64, Error> {
    let count = match tx {
        Some(connection) => execution::execute_count(connection, plan).await?,
        None => execution::execute_count(pool, plan).await?,
    };
    Ok(count)
}
