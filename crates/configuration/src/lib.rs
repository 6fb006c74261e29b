pub mod configuration;
pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod introspection;
pub mod to_runtime_configuration;
pub mod values;
pub mod version1;

pub use configuration::Configuration;
pub use values::{ConnectionUri, PoolSettings, Secret};
pub use version1::{
    configure, configure_with_service, parse_configuration, write_parsed_configuration,
    ParsedConfiguration,
};

pub use to_runtime_configuration::make_runtime_configuration;
