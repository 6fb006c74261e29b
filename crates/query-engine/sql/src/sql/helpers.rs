//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

/// The column a row is returned in when rows are returned as json objects.
pub const ROW_COLUMN: &str = "row";

const ROW_TABLE_ALIAS: &str = "_row";
const MUTATED_TABLE_ALIAS: &str = "_mutated";

// Empty clauses //

/// An empty `WITH` clause.
pub fn empty_with() -> With {
    With {
        common_table_expressions: vec![],
    }
}

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// Conjoin a list of predicates. An empty list is `true`.
pub fn conjoin(predicates: Vec<Expression>) -> Expression {
    predicates
        .into_iter()
        .reduce(|left, right| Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(true_expr)
}

// Aliasing //

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: String) -> TableAlias {
    TableAlias { name }
}

/// A reference to a column, qualified by a table alias when one is given.
pub fn make_column(alias: Option<&TableAlias>, name: &str) -> Expression {
    let name = ColumnName(name.to_string());
    Expression::ColumnReference(match alias {
        Some(alias) => ColumnReference::TableColumn {
            table: TableReference::AliasedTable(alias.clone()),
            name,
        },
        None => ColumnReference::Column(name),
    })
}

/// Reference a table in a schema.
pub fn make_db_table(schema: &str, table: &str) -> TableReference {
    TableReference::DBTable {
        schema: SchemaName(schema.to_string()),
        table: TableName(table.to_string()),
    }
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>) -> Select {
    Select {
        with: empty_with(),
        select_list: SelectList(select_list),
        from: None,
        joins: vec![],
        where_: Where(empty_where()),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Wrap a select so that each of its rows is returned as a single json object:
///
/// `SELECT row_to_json("_row") AS "row" FROM (<select>) AS "_row"`
pub fn select_rows_as_json(select: Select) -> Select {
    let row_alias = make_table_alias(ROW_TABLE_ALIAS.to_string());
    let mut outer = simple_select(vec![(
        make_column_alias(ROW_COLUMN.to_string()),
        Expression::RowToJson(TableReference::AliasedTable(row_alias.clone())),
    )]);
    outer.from = Some(From::Select {
        select: Box::new(select),
        alias: row_alias,
    });
    outer
}

/// Wrap a mutation with a RETURNING clause so that each returned row is a single json object:
///
/// `WITH "_mutated" AS (<mutation>) SELECT row_to_json("_mutated") AS "row" FROM "_mutated" AS "_mutated"`
pub fn mutation_rows_as_json(statement: CTExpr) -> Select {
    let mutated_alias = make_table_alias(MUTATED_TABLE_ALIAS.to_string());
    let mutated = TableReference::AliasedTable(mutated_alias.clone());
    let mut outer = simple_select(vec![(
        make_column_alias(ROW_COLUMN.to_string()),
        Expression::RowToJson(mutated.clone()),
    )]);
    outer.with = With {
        common_table_expressions: vec![CommonTableExpression {
            alias: mutated_alias.clone(),
            statement,
        }],
    };
    outer.from = Some(From::Table {
        reference: mutated,
        alias: mutated_alias,
    });
    outer
}
