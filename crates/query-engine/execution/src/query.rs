//! Execute an execution plan against the database.

use sqlx::Row;
use tracing::{info_span, Instrument};

use query_engine_sql::sql;
use query_engine_sql::sql::string::Param;

use crate::error::Error;

/// Run a row-returning plan and collect its rows as json objects.
///
/// `executor` is either a pool or a connection the caller holds, such as an open
/// transaction; it is used as given.
pub async fn fetch_rows<'c, E>(
    executor: E,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<Vec<serde_json::Value>, Error>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    if !plan.statement.returns_rows() {
        return Err(Error::NotARowStatement(plan.root_table.clone()));
    }
    let query = plan.query_sql();

    tracing::info!(
        table = plan.root_table,
        generated_sql = query.sql,
        params = ?&query.params,
    );

    let rows: Vec<sqlx::postgres::PgRow> = build_query_with_params(&query)
        .fetch_all(executor)
        .instrument(info_span!("Database request", table = plan.root_table))
        .await?;

    let rows = rows
        .iter()
        .map(|row| row.try_get::<serde_json::Value, _>(sql::helpers::ROW_COLUMN))
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    tracing::debug!(rows_returned = rows.len());
    Ok(rows)
}

/// Run a plan and return the number of rows it affected.
pub async fn execute_count<'c, E>(
    executor: E,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<u64, Error>
where
    E: sqlx::Executor<'c, Database = sqlx::Postgres>,
{
    let query = plan.query_sql();

    tracing::info!(
        table = plan.root_table,
        generated_sql = query.sql,
        params = ?&query.params,
    );

    let result = build_query_with_params(&query)
        .execute(executor)
        .instrument(info_span!("Database request", table = plan.root_table))
        .await?;

    Ok(result.rows_affected())
}

/// Create a SQLx query based on our SQL query and bind our parameters in order.
fn build_query_with_params(
    query: &sql::string::SQL,
) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .params
        .iter()
        .fold(sqlx::query(query.sql.as_str()), |sqlx_query, param| {
            match param {
                Param::String(s) => sqlx_query.bind(s),
                Param::Int(i) => sqlx_query.bind(i),
                Param::Float(f) => sqlx_query.bind(f),
                Param::Json(json) => sqlx_query.bind(json),
            }
        })
}
