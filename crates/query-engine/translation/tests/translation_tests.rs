mod common;

use query_engine_metadata::metadata::{CatalogError, SemanticType};
use query_engine_sql::sql;
use query_engine_sql::sql::string::Param;
use query_engine_translation::translation::datetime;
use query_engine_translation::translation::error::Error;
use query_engine_translation::translation::helpers::Env;
use query_engine_translation::translation::input::{Condition, Data};
use query_engine_translation::translation::mutation;
use query_engine_translation::translation::query::{self, filtering, Selection};
use similar_asserts::assert_eq;

mod select {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn select_all_fields_with_substring_match() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new().with("email_contains", "x.com");

        let plan = query::translate(&env, "User", &condition, &Selection::All, Some(1)).unwrap();
        let (sql, params) = common::render(&plan);

        assert_eq!(
            sql,
            r#"SELECT "User"."id" AS "id", "User"."email" AS "email", to_char("User"."createdAt", 'YYYY-MM-DD HH24:MI:SS:MSZ') AS "createdAt", cast("User"."meta" as "json") AS "meta" FROM "public"."User" AS "User" WHERE (strpos("User"."email", $1) > 0) LIMIT 1"#
        );
        assert_eq!(params, vec![Param::String("x.com".to_string())]);
    }

    #[test]
    fn select_compares_dates_by_epoch() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new()
            .with("published", true)
            .with("createdAt_lt", "2024-01-01 00:00:00:000Z");

        let plan = query::translate(
            &env,
            "Post",
            &condition,
            &Selection::fields(["id"]),
            None,
        )
        .unwrap();
        let (sql, params) = common::render(&plan);

        assert_eq!(
            sql,
            r#"SELECT "Post"."id" AS "id" FROM "public"."Post" AS "Post" WHERE ((EXTRACT(EPOCH FROM "Post"."createdAt") < EXTRACT(EPOCH FROM to_timestamp($1, 'YYYY-MM-DD HH24:MI:SS:MSZ'))) AND ("Post"."published" = true))"#
        );
        assert_eq!(
            params,
            vec![Param::String("2024-01-01 00:00:00:000Z".to_string())]
        );
    }

    #[test]
    fn select_null_equality_renders_is_null() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new().with("authorId", serde_json::Value::Null);

        let select =
            query::translate_select(&env, "Post", &condition, &Selection::fields(["id"]), None)
                .unwrap();
        let sql = sql::execution_plan::select_to_sql(&select);

        assert_eq!(
            sql.sql,
            r#"SELECT "Post"."id" AS "id" FROM "public"."Post" AS "Post" WHERE ("Post"."authorId" IS NULL)"#
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn select_rows_are_returned_as_json() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);

        let plan = query::translate(
            &env,
            "Post",
            &Condition::new(),
            &Selection::fields(["id", "title"]),
            None,
        )
        .unwrap();

        assert_eq!(
            plan.query_sql().sql,
            r#"SELECT row_to_json("_row") AS "row" FROM (SELECT "Post"."id" AS "id", "Post"."title" AS "title" FROM "public"."Post" AS "Post") AS "_row""#
        );
    }

    #[test]
    fn select_with_where_in_subquery() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);

        let authors = query::translate_select(
            &env,
            "Post",
            &Condition::new().with("published", true),
            &Selection::fields(["authorId"]),
            None,
        )
        .unwrap();
        let mut users = query::translate_select(
            &env,
            "User",
            &Condition::new(),
            &Selection::fields(["id"]),
            None,
        )
        .unwrap();
        let user = sql::helpers::make_table_alias("User".to_string());
        users.where_ = sql::ast::Where(filtering::where_in_select(
            sql::helpers::make_column(Some(&user), "id"),
            authors,
        ));

        assert_eq!(
            sql::execution_plan::select_to_sql(&users).sql,
            r#"SELECT "User"."id" AS "id" FROM "public"."User" AS "User" WHERE ("User"."id" IN (SELECT "Post"."authorId" AS "authorId" FROM "public"."Post" AS "Post" WHERE ("Post"."published" = true)))"#
        );
    }
}

mod predicates {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn one_predicate_per_key_with_a_value() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new()
            .with("title", "hello")
            .with("views_lt", 10)
            .with("status", "DRAFT")
            .unset("authorId")
            .unset("createdAt_lt");

        let predicates = query::translate_predicates(&env, "Post", &condition, None).unwrap();
        assert_eq!(predicates.len(), 3);
    }

    #[test]
    fn unknown_condition_keys_are_rejected() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new().with("bogus_field", 1);

        let error = query::translate_predicates(&env, "User", &condition, None).unwrap_err();
        assert_eq!(
            error,
            Error::UnsupportedOperator {
                key: "bogus_field".to_string(),
                table: "User".to_string(),
            }
        );
        assert!(error.to_string().contains("bogus_field"));
    }

    #[test]
    fn unknown_and_reference_tables_are_rejected() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);

        for table in ["Comment", "PostWhereInput"] {
            assert_eq!(
                query::translate_predicates(&env, table, &Condition::new(), None),
                Err(Error::SchemaResolution(CatalogError::UnknownTable(
                    table.to_string()
                )))
            );
        }
    }

    #[test]
    fn substring_match_needs_text() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new().with("views_contains", 1);

        assert_eq!(
            query::translate_predicates(&env, "Post", &condition, None),
            Err(Error::TypeMismatch {
                field: "views".to_string(),
                semantic_type: SemanticType::Number,
                value: serde_json::json!(1),
            })
        );
    }
}

mod mutations {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn insert_fills_in_id_and_timestamps() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let input = Data::new().with("email", "a@x.com");

        let plan =
            mutation::translate_insert(&env, "User", &input, None, &common::FixedId("u1")).unwrap();
        let (sql, params) = common::render(&plan);

        assert_eq!(
            sql,
            r#"INSERT INTO "public"."User" ("id", "createdAt", "email") VALUES ($1, cast($2 as "timestamp"), $3) RETURNING "id" AS "id", "email" AS "email", "createdAt" AS "createdAt", "meta" AS "meta""#
        );
        assert_eq!(params[0], Param::String("u1".to_string()));
        assert_eq!(params[2], Param::String("a@x.com".to_string()));
        let Param::String(created_at) = &params[1] else {
            panic!("createdAt is bound as a string: {params:?}");
        };
        assert_eq!(
            &datetime::truncate_to_seconds(created_at).unwrap(),
            created_at
        );
    }

    #[test]
    fn insert_uses_an_explicit_id_verbatim() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let input = Data::new().with("id", "ignored").with("title", "hi");

        let plan = mutation::translate_insert(
            &env,
            "Post",
            &input,
            Some("p1"),
            &common::FixedId("generated"),
        )
        .unwrap();
        let (_, params) = common::render(&plan);

        assert_eq!(params[0], Param::String("p1".to_string()));
        assert!(!params.contains(&Param::String("ignored".to_string())));
        assert!(!params.contains(&Param::String("generated".to_string())));
    }

    #[test]
    fn insert_rejects_relations_and_unknown_fields() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let ids = common::FixedId("u1");

        assert_eq!(
            mutation::translate_insert(&env, "User", &Data::new().with("posts", "p1"), None, &ids),
            Err(Error::UnsupportedFieldType {
                table: "User".to_string(),
                field: "posts".to_string(),
                semantic_type: SemanticType::Relation,
            })
        );
        assert_eq!(
            mutation::translate_insert(&env, "User", &Data::new().with("nickname", "x"), None, &ids),
            Err(Error::SchemaResolution(CatalogError::UnknownField {
                table: "User".to_string(),
                field: "nickname".to_string(),
            }))
        );
    }

    #[test]
    fn update_truncates_dates_to_seconds() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new().with("id", "p1");
        let data = Data::new()
            .with("createdAt", "2024-01-01T00:00:00.123Z")
            .with("views", 3);

        let plan = mutation::translate_update(&env, "Post", &condition, &data).unwrap();
        let (sql, params) = common::render(&plan);

        assert_eq!(
            sql,
            r#"UPDATE "public"."Post" SET "createdAt" = cast($1 as "timestamp"), "views" = $2 WHERE ("id" = $3) RETURNING "id" AS "id", "title" AS "title", "published" AS "published", "views" AS "views", "status" AS "status", "authorId" AS "authorId", "createdAt" AS "createdAt", "updatedAt" AS "updatedAt""#
        );
        assert_eq!(
            params,
            vec![
                Param::String("2024-01-01T00:00:00".to_string()),
                Param::Int(3),
                Param::String("p1".to_string()),
            ]
        );
    }

    #[test]
    fn update_with_nothing_to_set_is_rejected() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let data = Data::new().unset("title");

        assert_eq!(
            mutation::translate_update(&env, "Post", &Condition::new(), &data),
            Err(Error::EmptyUpdate("Post".to_string()))
        );
    }

    #[test]
    fn update_binds_json_as_json() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let data = Data::new().with("meta", serde_json::json!({"theme": "dark"}));

        let plan = mutation::translate_update(
            &env,
            "User",
            &Condition::new().with("email", "a@x.com"),
            &data,
        )
        .unwrap();
        let (_, params) = common::render(&plan);

        assert_eq!(
            params[0],
            Param::Json(serde_json::json!({"theme": "dark"}))
        );
    }

    #[test]
    fn delete_uses_unqualified_predicates() {
        let catalog = common::catalog();
        let env = Env::new(&catalog, common::SCHEMA);
        let condition = Condition::new().with("title_contains", "rust");

        let plan = mutation::translate_delete(&env, "Post", &condition).unwrap();

        insta::assert_snapshot!(
            plan.query_sql().sql,
            @r#"DELETE FROM "public"."Post" WHERE (strpos("title", $1) > 0)"#
        );
    }
}
