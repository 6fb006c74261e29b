use query_engine_translation::translation::error::Error as TranslationError;
use schema_bridge_cli::{run, translate, Command, Context};
use schema_bridge_configuration::environment::EmptyEnvironment;
use schema_bridge_configuration::{parse_configuration, write_parsed_configuration, ParsedConfiguration};

fn context(dir: &tempfile::TempDir) -> Context<EmptyEnvironment> {
    Context {
        context_path: dir.path().to_path_buf(),
        environment: EmptyEnvironment,
    }
}

fn configured() -> ParsedConfiguration {
    let mut parsed = ParsedConfiguration::initial();
    parsed.catalog = serde_json::from_value(serde_json::json!({
        "User": {
            "name": "User",
            "kind": "table",
            "fields": { "id": "ID", "email": "String", "createdAt": "DateTime" }
        }
    }))
    .unwrap();
    parsed
}

#[tokio::test]
async fn initialize_writes_a_configuration_once() {
    let dir = tempfile::tempdir().unwrap();

    run(Command::Initialize, context(&dir)).await.unwrap();
    assert!(dir.path().join("configuration.json").exists());
    assert!(dir.path().join("schema.json").exists());
    assert_eq!(
        parse_configuration(dir.path()).await.unwrap(),
        ParsedConfiguration::initial()
    );

    let again = run(Command::Initialize, context(&dir)).await;
    assert!(again.unwrap_err().to_string().contains("already exists"));
}

#[tokio::test]
async fn introspect_needs_an_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    run(Command::Initialize, context(&dir)).await.unwrap();

    let error = run(Command::Introspect, context(&dir)).await.unwrap_err();
    assert!(error
        .to_string()
        .contains("SCHEMA_BRIDGE_INTROSPECTION_ENDPOINT"));
}

#[tokio::test]
async fn generate_writes_the_accessor_module() {
    let dir = tempfile::tempdir().unwrap();
    write_parsed_configuration(&configured(), dir.path())
        .await
        .unwrap();
    let output = dir.path().join("src").join("schema.rs");

    run(
        Command::Generate {
            output: output.clone(),
        },
        context(&dir),
    )
    .await
    .unwrap();

    let source = std::fs::read_to_string(output).unwrap();
    assert!(source.starts_with("// @generated"));
    assert!(source.contains("pub const USER"));
}

#[test]
fn translate_prints_sql_and_params() {
    let output = translate(
        &configured(),
        "User",
        r#"{"email_contains": "x.com"}"#,
        vec!["id".to_string(), "email".to_string()],
        Some(5),
    )
    .unwrap();

    assert!(output.contains(r#""public"."User""#));
    assert!(output.contains("strpos"));
    assert!(output.ends_with(r#"[(1, String("x.com"))]"#));
}

#[test]
fn translate_rejects_unknown_keys() {
    let error = translate(&configured(), "User", r#"{"bogus_field": 1}"#, vec![], None)
        .unwrap_err();
    assert_eq!(
        error.downcast_ref::<TranslationError>(),
        Some(&TranslationError::UnsupportedOperator {
            key: "bogus_field".to_string(),
            table: "User".to_string(),
        })
    );
}
