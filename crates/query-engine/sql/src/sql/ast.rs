//! The SQL statements the translator produces, as a tree.
//!
//! Only the constructs needed for single-table reads and writes are modelled.

/// Common table expressions preceding a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub common_table_expressions: Vec<CommonTableExpression>,
}

/// `alias AS (statement)`
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub alias: TableAlias,
    pub statement: CTExpr,
}

/// A statement usable inside a common table expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CTExpr {
    Insert(Insert),
    Update(Update),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub with: With,
    pub select_list: SelectList,
    pub from: Option<From>,
    pub joins: Vec<Join>,
    pub where_: Where,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// A single-row INSERT. An empty column list inserts the default values.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub schema: SchemaName,
    pub table: TableName,
    pub columns: Vec<ColumnName>,
    pub values: Vec<Expression>,
    pub returning: Returning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub schema: SchemaName,
    pub table: TableName,
    pub set: Vec<(ColumnName, Expression)>,
    pub where_: Where,
    pub returning: Returning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub schema: SchemaName,
    pub table: TableName,
    pub where_: Where,
}

/// Columns returned by a write. Nothing is returned when the list is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Returning(pub SelectList);

/// `expression AS alias, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectList(pub Vec<(ColumnAlias, Expression)>);

#[derive(Debug, Clone, PartialEq)]
pub enum From {
    /// `schema.table AS alias`
    Table {
        reference: TableReference,
        alias: TableAlias,
    },
    /// `(SELECT ...) AS alias`
    Select {
        select: Box<Select>,
        alias: TableAlias,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Join {
    LeftOuterJoin(TableJoin),
    InnerJoin(TableJoin),
}

/// A table joined onto the current FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub struct TableJoin {
    pub reference: TableReference,
    pub alias: TableAlias,
    pub on: Expression,
}

/// Rendered only when it is not the constant `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Expression);

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: Expression,
    pub direction: OrderByDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// An expression appearing in a select list, a predicate or a written value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    UnaryOperation {
        expression: Box<Expression>,
        operator: UnaryOperator,
    },
    /// `left IN (SELECT ...)`
    InSelect {
        left: Box<Expression>,
        select: Box<Select>,
    },
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// `EXTRACT(EPOCH FROM ...)`
    ExtractEpoch(Box<Expression>),
    /// `row_to_json(relation)`, one json object per row
    RowToJson(TableReference),
    ColumnReference(ColumnReference),
    Value(Value),
    Cast {
        expression: Box<Expression>,
        r#type: ScalarType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    IsNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    LessThan,
    GreaterThan,
}

/// Functions the translator calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    Strpos,
    ToChar,
    ToTimestamp,
}

/// A constant. Caller supplied values become numbered parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A small integer constant, inlined.
    Int4(i32),
    Int8(i64),
    Float8(f64),
    Bool(bool),
    String(String),
    Null,
    JsonValue(serde_json::Value),
    /// A constant string written by us (never user input), inlined as a quoted literal.
    Literal(&'static str),
}

/// The target of a cast, always quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(pub String);

/// A table in a FROM or JOIN clause, or the qualifier of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableReference {
    /// `"schema"."table"`
    DBTable {
        schema: SchemaName,
        table: TableName,
    },
    AliasedTable(TableAlias),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnReference {
    /// `"alias"."column"`, used wherever more than one table is in scope
    TableColumn {
        table: TableReference,
        name: ColumnName,
    },
    /// `"column"`, in updates and deletes
    Column(ColumnName),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableAlias {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAlias {
    pub name: String,
}
