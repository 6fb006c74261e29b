//! Translate a single-table query to an execution plan.

pub mod fields;
pub mod filtering;

use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;
use crate::translation::input::Condition;
pub use fields::{return_columns, Selection};

/// Translate a query on a table to a SELECT.
///
/// The table is aliased by its own name and every column is qualified with it, so that
/// further joins can be attached to the select without ambiguity.
pub fn translate_select(
    env: &Env,
    table_name: &str,
    condition: &Condition,
    selection: &Selection,
    limit: Option<u32>,
) -> Result<sql::ast::Select, Error> {
    let table = env.lookup_table(table_name)?;
    let alias = sql::helpers::make_table_alias(table.name.clone());

    let mut select = sql::helpers::simple_select(fields::translate_selection(
        table,
        selection,
        Some(&alias),
    ));
    select.from = Some(sql::ast::From::Table {
        reference: env.db_table(table),
        alias: alias.clone(),
    });
    select.where_ = sql::ast::Where(filtering::translate_expression(
        table,
        condition,
        Some(&alias),
    )?);
    select.limit = sql::ast::Limit {
        limit,
        offset: None,
    };
    Ok(select)
}

/// Translate a query on a table to an execution plan.
pub fn translate(
    env: &Env,
    table_name: &str,
    condition: &Condition,
    selection: &Selection,
    limit: Option<u32>,
) -> Result<sql::execution_plan::ExecutionPlan, Error> {
    let select = translate_select(env, table_name, condition, selection, limit)?;
    let plan = sql::execution_plan::simple_exec_plan(
        table_name.to_string(),
        sql::execution_plan::Statement::Select(select),
    );
    tracing::debug!(table = table_name, "translated query");
    Ok(plan)
}

/// Translate a condition on a table to one predicate per key that holds a value.
pub fn translate_predicates(
    env: &Env,
    table_name: &str,
    condition: &Condition,
    alias: Option<&sql::ast::TableAlias>,
) -> Result<Vec<sql::ast::Expression>, Error> {
    let table = env.lookup_table(table_name)?;
    filtering::translate_condition(table, condition, alias)
}

/// Expand every field of a table into a type-aware column expression.
pub fn expand(
    env: &Env,
    table_name: &str,
    alias: Option<&sql::ast::TableAlias>,
) -> Result<Vec<(sql::ast::ColumnAlias, sql::ast::Expression)>, Error> {
    let table = env.lookup_table(table_name)?;
    Ok(fields::expand_fields(table, alias))
}
