//! Describe the SQL execution plan.

use super::ast;
use super::helpers;
use super::string;

#[derive(Debug, Clone, PartialEq)]
/// Definition of an execution plan to be run against the database.
pub struct ExecutionPlan {
    /// The table the statement operates on, for logging.
    pub root_table: String,
    /// The statement.
    pub statement: Statement,
}

/// The statement an execution plan runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(ast::Select),
    Insert(ast::Insert),
    Update(ast::Update),
    Delete(ast::Delete),
}

impl Statement {
    /// Whether the statement produces rows, as opposed to an affected-row count.
    pub fn returns_rows(&self) -> bool {
        !matches!(self, Statement::Delete(_))
    }
}

impl ExecutionPlan {
    /// Extract the query component as SQL.
    ///
    /// Row-returning statements are wrapped so that every row comes back
    /// as a single json object in the `row` column.
    pub fn query_sql(&self) -> string::SQL {
        match &self.statement {
            Statement::Select(select) => {
                select_to_sql(&helpers::select_rows_as_json(select.clone()))
            }
            Statement::Insert(insert) => select_to_sql(&helpers::mutation_rows_as_json(
                ast::CTExpr::Insert(insert.clone()),
            )),
            Statement::Update(update) => select_to_sql(&helpers::mutation_rows_as_json(
                ast::CTExpr::Update(update.clone()),
            )),
            Statement::Delete(delete) => {
                let mut sql = string::SQL::new();
                delete.to_sql(&mut sql);
                sql
            }
        }
    }

    /// The statement as SQL, without the json row wrapping.
    pub fn raw_sql(&self) -> string::SQL {
        let mut sql = string::SQL::new();
        match &self.statement {
            Statement::Select(select) => select.to_sql(&mut sql),
            Statement::Insert(insert) => insert.to_sql(&mut sql),
            Statement::Update(update) => update.to_sql(&mut sql),
            Statement::Delete(delete) => delete.to_sql(&mut sql),
        }
        sql
    }
}

pub fn select_to_sql(select: &ast::Select) -> string::SQL {
    let mut sql = string::SQL::new();
    select.to_sql(&mut sql);
    sql
}

/// A simple execution plan with only a root table and a statement.
pub fn simple_exec_plan(root_table: String, statement: Statement) -> ExecutionPlan {
    ExecutionPlan {
        root_table,
        statement,
    }
}
