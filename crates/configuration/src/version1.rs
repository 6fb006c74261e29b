//! The version 1 configuration format and the operations on it.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use query_engine_metadata::metadata::Catalog;

use crate::connection_settings::{DatabaseConnectionSettings, IntrospectionSettings};
use crate::environment::Environment;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::introspection::{GraphQlSchemaService, IntrospectionCompiler, SchemaService};
use crate::values::PoolSettings;

pub const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// Initial configuration, just enough to connect to a database and introspect the schema
/// service. The catalog is filled in by `configure`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    pub version: u32,
    pub connection_settings: DatabaseConnectionSettings,
    pub introspection: IntrospectionSettings,
    #[serde(skip_serializing_if = "PoolSettings::is_default")]
    #[serde(default)]
    pub pool_settings: PoolSettings,
    #[serde(default)]
    pub catalog: Catalog,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            connection_settings: DatabaseConnectionSettings::empty(),
            introspection: IntrospectionSettings::empty(),
            pool_settings: PoolSettings::default(),
            catalog: Catalog::empty(),
        }
    }

    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }
}

#[derive(Deserialize)]
struct VersionTag {
    version: u32,
}

/// Introspect the configured schema service and return a configuration with a fresh catalog.
pub async fn configure(
    args: &ParsedConfiguration,
    environment: impl Environment,
) -> anyhow::Result<ParsedConfiguration> {
    let endpoint = args.introspection.endpoint.resolve(&environment)?;
    let bearer_token = args
        .introspection
        .bearer_token
        .as_ref()
        .map(|token| token.resolve(&environment))
        .transpose()?;

    let service = GraphQlSchemaService::new(&endpoint, bearer_token)?;
    configure_with_service(args, service).await
}

/// Like `configure`, against any schema service.
pub async fn configure_with_service(
    args: &ParsedConfiguration,
    service: impl SchemaService,
) -> anyhow::Result<ParsedConfiguration> {
    let mut compiler = IntrospectionCompiler::new(service)
        .with_marker_interface(args.introspection.marker_interface.clone());
    let catalog = compiler.compile().await?;

    let report = compiler.report();
    tracing::info!(
        tables = report.tables.len(),
        warnings = report.warnings.len(),
        failures = report.failures.len(),
        "introspection finished"
    );

    Ok(ParsedConfiguration {
        version: CURRENT_VERSION,
        connection_settings: args.connection_settings.clone(),
        introspection: args.introspection.clone(),
        pool_settings: args.pool_settings.clone(),
        catalog,
    })
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = fs::read_to_string(&configuration_file)
        .await
        .map_err(|error| ParseConfigurationError::IoError {
            file_path: configuration_file.clone(),
            error,
        })?;

    let parse_error = |error: serde_json::Error| ParseConfigurationError::ParseError {
        file_path: configuration_file.clone(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    };

    let VersionTag { version } =
        serde_json::from_str(&configuration_file_contents).map_err(parse_error)?;
    if version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            file_path: configuration_file.clone(),
            version,
        });
    }

    serde_json::from_str(&configuration_file_contents).map_err(parse_error)
}

/// Write the parsed configuration into a directory on disk, along with its JSON schema.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).await?;

    fs::write(
        out_dir.join(CONFIGURATION_FILENAME),
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )
    .await?;

    // create the jsonschema file
    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        out_dir.join(CONFIGURATION_JSONSCHEMA_FILENAME),
        serde_json::to_string_pretty(&output)? + "\n",
    )
    .await?;

    Ok(())
}
