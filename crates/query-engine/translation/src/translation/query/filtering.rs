//! Translate a flat condition object to SQL predicates.

use query_engine_metadata::metadata::{SemanticType, TypeInfo};
use query_engine_sql::sql;

use crate::translation::datetime::DATE_TEMPLATE;
use crate::translation::error::Error;
use crate::translation::input::Condition;
use crate::translation::values::{self, TypedValue};

/// The operator a condition key applies to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    /// an exact field name
    Equals,
    /// `<field>_lt`
    LessThan,
    /// `<field>_contains`, an exact substring match
    Contains,
}

/// Condition key suffixes and the operators they select.
pub const CONDITION_SUFFIXES: [(&str, ConditionOperator); 2] = [
    ("_lt", ConditionOperator::LessThan),
    ("_contains", ConditionOperator::Contains),
];

/// A condition key resolved against a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedKey<'a> {
    pub field: &'a str,
    pub semantic_type: SemanticType,
    pub operator: ConditionOperator,
}

/// Resolve a condition key to exactly one field and operator.
///
/// A key may name a field directly or name a field followed by a known suffix.
/// Both readings are considered; a key that fits neither, or both, is rejected.
pub fn resolve_key<'a>(table: &'a TypeInfo, key: &'a str) -> Result<ResolvedKey<'a>, Error> {
    let direct = table
        .fields
        .get_key_value(key)
        .map(|(field, semantic_type)| ResolvedKey {
            field: field.as_str(),
            semantic_type: *semantic_type,
            operator: ConditionOperator::Equals,
        });

    let suffixed = CONDITION_SUFFIXES.iter().filter_map(|(suffix, operator)| {
        let field = key.strip_suffix(suffix)?;
        let (field, semantic_type) = table.fields.get_key_value(field)?;
        Some(ResolvedKey {
            field: field.as_str(),
            semantic_type: *semantic_type,
            operator: *operator,
        })
    });

    let mut candidates = direct.into_iter().chain(suffixed);
    match (candidates.next(), candidates.next()) {
        (Some(resolved), None) => Ok(resolved),
        (None, _) => Err(Error::UnsupportedOperator {
            key: key.to_string(),
            table: table.name.clone(),
        }),
        (Some(_), Some(_)) => Err(Error::AmbiguousConditionKey {
            key: key.to_string(),
            table: table.name.clone(),
        }),
    }
}

/// Translate a condition to one predicate per key that holds a value.
///
/// Every key is resolved, so an unknown key fails even when its value is unset.
/// Columns are qualified by `alias` when one is given.
pub fn translate_condition(
    table: &TypeInfo,
    condition: &Condition,
    alias: Option<&sql::ast::TableAlias>,
) -> Result<Vec<sql::ast::Expression>, Error> {
    let mut predicates = vec![];
    for (key, value) in condition.iter() {
        let resolved = resolve_key(table, key)?;
        let Some(value) = value.as_value() else {
            continue;
        };
        let typed = values::type_value(&table.name, resolved.field, resolved.semantic_type, value)?;
        let column = sql::helpers::make_column(alias, resolved.field);
        predicates.push(translate_predicate(column, &resolved, typed, value)?);
    }
    Ok(predicates)
}

/// Translate a condition to a single boolean expression. An empty condition is `true`.
pub fn translate_expression(
    table: &TypeInfo,
    condition: &Condition,
    alias: Option<&sql::ast::TableAlias>,
) -> Result<sql::ast::Expression, Error> {
    translate_condition(table, condition, alias).map(sql::helpers::conjoin)
}

/// `column IN (select)`.
pub fn where_in_select(
    column: sql::ast::Expression,
    select: sql::ast::Select,
) -> sql::ast::Expression {
    sql::ast::Expression::InSelect {
        left: Box::new(column),
        select: Box::new(select),
    }
}

fn translate_predicate(
    column: sql::ast::Expression,
    resolved: &ResolvedKey,
    typed: TypedValue,
    raw: &serde_json::Value,
) -> Result<sql::ast::Expression, Error> {
    let mismatch = || Error::TypeMismatch {
        field: resolved.field.to_string(),
        semantic_type: resolved.semantic_type,
        value: raw.clone(),
    };

    match (resolved.operator, typed) {
        (ConditionOperator::Contains, typed) => {
            let text = typed.as_text().ok_or_else(mismatch)?.to_string();
            // strpos(column, value) > 0
            Ok(sql::ast::Expression::BinaryOperation {
                left: Box::new(sql::ast::Expression::FunctionCall {
                    function: sql::ast::Function::Strpos,
                    args: vec![
                        column,
                        sql::ast::Expression::Value(sql::ast::Value::String(text)),
                    ],
                }),
                operator: sql::ast::BinaryOperator::GreaterThan,
                right: Box::new(sql::ast::Expression::Value(sql::ast::Value::Int4(0))),
            })
        }
        (ConditionOperator::Equals, TypedValue::Null) => Ok(sql::ast::Expression::UnaryOperation {
            expression: Box::new(column),
            operator: sql::ast::UnaryOperator::IsNull,
        }),
        (ConditionOperator::LessThan, TypedValue::Null) => Err(mismatch()),
        (operator, TypedValue::DateTime(literal)) => Ok(sql::ast::Expression::BinaryOperation {
            left: Box::new(sql::ast::Expression::ExtractEpoch(Box::new(column))),
            operator: comparison(operator),
            right: Box::new(sql::ast::Expression::ExtractEpoch(Box::new(
                sql::ast::Expression::FunctionCall {
                    function: sql::ast::Function::ToTimestamp,
                    args: vec![
                        sql::ast::Expression::Value(sql::ast::Value::String(literal)),
                        sql::ast::Expression::Value(sql::ast::Value::Literal(DATE_TEMPLATE)),
                    ],
                },
            ))),
        }),
        (operator, typed) => Ok(sql::ast::Expression::BinaryOperation {
            left: Box::new(column),
            operator: comparison(operator),
            right: Box::new(sql::ast::Expression::Value(typed.into_sql_value())),
        }),
    }
}

fn comparison(operator: ConditionOperator) -> sql::ast::BinaryOperator {
    match operator {
        ConditionOperator::LessThan => sql::ast::BinaryOperator::LessThan,
        ConditionOperator::Equals | ConditionOperator::Contains => {
            sql::ast::BinaryOperator::Equals
        }
    }
}
