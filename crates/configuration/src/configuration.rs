//! Runtime configuration.

use std::sync::Arc;

use query_engine_metadata::metadata::Catalog;

use crate::values::PoolSettings;

/// The 'Configuration' type collects all the information necessary to serve requests at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which resolves secrets against the environment.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub catalog: Arc<Catalog>,
    pub schema: String,
    pub connection_uri: String,
    pub pool_settings: PoolSettings,
}
