//! Database and introspection connection settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::introspection::DEFAULT_MARKER_INTERFACE;
use crate::values::{ConnectionUri, Secret};

pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "SCHEMA_BRIDGE_DATABASE_URL";
pub const DEFAULT_INTROSPECTION_ENDPOINT_VARIABLE: &str = "SCHEMA_BRIDGE_INTROSPECTION_ENDPOINT";
pub const DEFAULT_SCHEMA: &str = "public";

/// Database connection settings.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSettings {
    /// Connection string for a Postgres-compatible database.
    pub connection_uri: ConnectionUri,
    /// The database schema the tables live in.
    #[serde(default = "schema_default")]
    pub schema: String,
}

impl DatabaseConnectionSettings {
    pub fn empty() -> Self {
        Self {
            connection_uri: ConnectionUri(Secret::from_environment(
                DEFAULT_CONNECTION_URI_VARIABLE,
            )),
            schema: schema_default(),
        }
    }
}

/// Where and how to introspect the schema service.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSettings {
    /// The GraphQL endpoint of the schema service.
    pub endpoint: Secret,
    /// Sent as a bearer token with every introspection request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<Secret>,
    /// Types implementing this interface are persisted tables.
    #[serde(default = "marker_interface_default")]
    pub marker_interface: String,
}

impl IntrospectionSettings {
    pub fn empty() -> Self {
        Self {
            endpoint: Secret::from_environment(DEFAULT_INTROSPECTION_ENDPOINT_VARIABLE),
            bearer_token: None,
            marker_interface: marker_interface_default(),
        }
    }
}

fn schema_default() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn marker_interface_default() -> String {
    DEFAULT_MARKER_INTERFACE.to_string()
}
