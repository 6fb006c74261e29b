//! Expand a field selection into column expressions.

use query_engine_metadata::metadata::{SemanticType, TypeInfo};
use query_engine_sql::sql;

use crate::translation::datetime::DATE_TEMPLATE;

/// The fields a query selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every storable field, rendered according to its semantic type.
    #[default]
    All,
    /// The named fields, selected verbatim.
    ///
    /// Unlike `All`, no date formatting or json cast is applied and the names are not
    /// checked against the catalog.
    Fields(Vec<String>),
}

impl Selection {
    pub fn fields<I, S>(fields: I) -> Selection
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Fields(fields.into_iter().map(Into::into).collect())
    }
}

/// Expand every field of a table into a type-aware column expression, in catalog order.
///
/// - DateTime: `to_char(col, 'YYYY-MM-DD HH24:MI:SS:MSZ')`
/// - Json: `cast(col as "json")`
/// - Relation, Unknown: omitted
/// - anything else: the plain column
pub fn expand_fields(
    table: &TypeInfo,
    alias: Option<&sql::ast::TableAlias>,
) -> Vec<(sql::ast::ColumnAlias, sql::ast::Expression)> {
    table
        .storable_fields()
        .map(|(field, semantic_type)| {
            let column = sql::helpers::make_column(alias, field);
            let expression = match semantic_type {
                SemanticType::DateTime => sql::ast::Expression::FunctionCall {
                    function: sql::ast::Function::ToChar,
                    args: vec![
                        column,
                        sql::ast::Expression::Value(sql::ast::Value::Literal(DATE_TEMPLATE)),
                    ],
                },
                SemanticType::Json => sql::ast::Expression::Cast {
                    expression: Box::new(column),
                    r#type: sql::ast::ScalarType("json".to_string()),
                },
                _ => column,
            };
            (sql::helpers::make_column_alias(field.to_string()), expression)
        })
        .collect()
}

/// Translate a selection to a select list.
pub fn translate_selection(
    table: &TypeInfo,
    selection: &Selection,
    alias: Option<&sql::ast::TableAlias>,
) -> Vec<(sql::ast::ColumnAlias, sql::ast::Expression)> {
    match selection {
        Selection::All => expand_fields(table, alias),
        Selection::Fields(fields) => fields
            .iter()
            .map(|field| {
                (
                    sql::helpers::make_column_alias(field.clone()),
                    sql::helpers::make_column(alias, field),
                )
            })
            .collect(),
    }
}

/// The columns returned by an insert or update: every storable field, in catalog order.
pub fn return_columns(table: &TypeInfo) -> Vec<String> {
    table
        .storable_fields()
        .map(|(field, _)| field.to_string())
        .collect()
}

pub(crate) fn returning(table: &TypeInfo) -> sql::ast::Returning {
    sql::ast::Returning(sql::ast::SelectList(
        return_columns(table)
            .into_iter()
            .map(|field| {
                let column = sql::helpers::make_column(None, &field);
                (sql::helpers::make_column_alias(field), column)
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> TypeInfo {
        TypeInfo::table(
            "Post",
            [
                ("id", SemanticType::Id),
                ("createdAt", SemanticType::DateTime),
                ("meta", SemanticType::Json),
                ("author", SemanticType::Relation),
                ("shape", SemanticType::Unknown),
            ],
        )
    }

    fn render(list: Vec<(sql::ast::ColumnAlias, sql::ast::Expression)>) -> String {
        let mut sql = sql::string::SQL::new();
        sql::ast::SelectList(list).to_sql(&mut sql);
        sql.sql
    }

    #[test]
    fn test_expand_is_type_aware() {
        let alias = sql::helpers::make_table_alias("Post".to_string());
        insta::assert_snapshot!(
            render(expand_fields(&post(), Some(&alias))),
            @r#""Post"."id" AS "id", to_char("Post"."createdAt", 'YYYY-MM-DD HH24:MI:SS:MSZ') AS "createdAt", cast("Post"."meta" as "json") AS "meta""#
        );
    }

    #[test]
    fn test_explicit_fields_are_verbatim() {
        let selection = Selection::fields(["createdAt", "author"]);
        insta::assert_snapshot!(
            render(translate_selection(&post(), &selection, None)),
            @r#""createdAt" AS "createdAt", "author" AS "author""#
        );
    }

    #[test]
    fn test_return_columns_skip_relations_and_unknowns() {
        assert_eq!(return_columns(&post()), vec!["id", "createdAt", "meta"]);
    }
}
