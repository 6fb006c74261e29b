//! The CLI for schema-bridge.
//!
//! It manages the configuration directory, generates typed accessors and shows the SQL that
//! queries translate to.

use std::env;
use std::path::PathBuf;

use clap::Parser;

use schema_bridge_cli::*;
use schema_bridge_configuration::environment::ProcessEnvironment;

/// The schema-bridge CLI.
#[derive(Debug, Parser)]
#[command(name = "schema-bridge", version, about)]
pub struct Args {
    /// The path to the configuration. Defaults to the current directory.
    #[arg(long = "context", env = "SCHEMA_BRIDGE_CONTEXT", value_name = "DIRECTORY")]
    pub context_path: Option<PathBuf>,
    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

/// The application entrypoint. It pulls information from the environment and then calls the
/// [run] function. The library remains unaware of the environment, so that we can more easily
/// test it.
#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let context_path = match args.context_path {
        None => env::current_dir()?,
        Some(path) => path,
    };
    let context = Context {
        context_path,
        environment: ProcessEnvironment,
    };
    run(args.subcommand, context).await?;
    Ok(())
}
