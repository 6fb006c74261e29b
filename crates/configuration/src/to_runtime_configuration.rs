//! Convert a parsed configuration into the runtime configuration.

use std::sync::Arc;

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::ConnectionUri;
use crate::version1::ParsedConfiguration;

/// Convert the parsed configuration to the runtime configuration
/// used by table accessors, resolving secrets against the environment.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let ConnectionUri(connection_uri) = &parsed_config.connection_settings.connection_uri;
    let connection_uri = connection_uri.resolve(&environment).map_err(|error| {
        MakeRuntimeConfigurationError::UnresolvedSecret {
            setting: "connectionUri",
            error,
        }
    })?;

    Ok(Configuration {
        catalog: Arc::new(parsed_config.catalog),
        schema: parsed_config.connection_settings.schema,
        connection_uri,
        pool_settings: parsed_config.pool_settings,
    })
}
