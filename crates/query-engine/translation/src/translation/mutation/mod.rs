//! Translate inserts, updates and deletes to execution plans.

pub mod coercion;

use query_engine_metadata::metadata::TypeInfo;
use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::{simple_exec_plan, ExecutionPlan, Statement};

use crate::translation::datetime;
use crate::translation::error::Error;
use crate::translation::helpers::Env;
use crate::translation::input::{Condition, Data};
use crate::translation::query::{fields, filtering};
use crate::translation::values;
pub use coercion::{IdGenerator, UuidV7Generator};

/// Translate an insert of one row. Every stored column is returned.
pub fn translate_insert(
    env: &Env,
    table_name: &str,
    input: &Data,
    explicit_id: Option<&str>,
    ids: &dyn IdGenerator,
) -> Result<ExecutionPlan, Error> {
    let table = env.lookup_table(table_name)?;
    let row = coercion::prepare_insert(table, input, explicit_id, ids, &datetime::now())?;
    let (columns, row_values) = write_values(table, &row)?.into_iter().unzip();

    let insert = sql::ast::Insert {
        schema: env.schema_name(),
        table: Env::table_name(table),
        columns,
        values: row_values,
        returning: fields::returning(table),
    };
    Ok(simple_exec_plan(
        table.name.clone(),
        Statement::Insert(insert),
    ))
}

/// Translate an update of every row matching a condition. Every stored column is returned.
pub fn translate_update(
    env: &Env,
    table_name: &str,
    condition: &Condition,
    data: &Data,
) -> Result<ExecutionPlan, Error> {
    let table = env.lookup_table(table_name)?;
    let data = coercion::prepare_update(table, data)?;
    let set = write_values(table, &data)?;
    if set.is_empty() {
        return Err(Error::EmptyUpdate(table.name.clone()));
    }

    let update = sql::ast::Update {
        schema: env.schema_name(),
        table: Env::table_name(table),
        set,
        where_: sql::ast::Where(filtering::translate_expression(table, condition, None)?),
        returning: fields::returning(table),
    };
    Ok(simple_exec_plan(
        table.name.clone(),
        Statement::Update(update),
    ))
}

/// Translate a delete of every row matching a condition.
pub fn translate_delete(
    env: &Env,
    table_name: &str,
    condition: &Condition,
) -> Result<ExecutionPlan, Error> {
    let table = env.lookup_table(table_name)?;
    let delete = sql::ast::Delete {
        schema: env.schema_name(),
        table: Env::table_name(table),
        where_: sql::ast::Where(filtering::translate_expression(table, condition, None)?),
    };
    Ok(simple_exec_plan(
        table.name.clone(),
        Statement::Delete(delete),
    ))
}

/// Resolve every set field of a payload to a column and the expression written to it.
fn write_values(
    table: &TypeInfo,
    data: &Data,
) -> Result<Vec<(sql::ast::ColumnName, sql::ast::Expression)>, Error> {
    data.values()
        .map(|(field, value)| -> Result<_, Error> {
            let semantic_type = table.lookup_field(field)?;
            let typed = values::type_value(&table.name, field, semantic_type, value)?;
            Ok((
                sql::ast::ColumnName(field.to_string()),
                typed.into_write_expression(),
            ))
        })
        .collect()
}
