//! The CLI can do a few things. This provides a central point where those things are routed and
//! then done, making it easier to test this crate deterministically.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tokio::fs;

use query_engine_sql::sql;
use query_engine_translation::translation::helpers::Env;
use query_engine_translation::translation::input::Condition;
use query_engine_translation::translation::query::{self, Selection};
use schema_bridge_configuration::environment::Environment;
use schema_bridge_configuration::version1::CONFIGURATION_FILENAME;
use schema_bridge_configuration::{self as configuration, ParsedConfiguration};

/// The various contextual bits and bobs we need to run.
pub struct Context<E: Environment> {
    pub context_path: PathBuf,
    pub environment: E,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Initialize a configuration in the current (empty) directory.
    Initialize,
    /// Introspect the schema service and update the catalog in the configuration.
    Introspect,
    /// Write the typed accessor module for the catalog.
    Generate {
        /// Where to write the generated Rust source.
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the SELECT a query on a table translates to.
    Translate {
        #[arg(long)]
        table: String,
        /// A json object of condition keys, such as `{"email_contains": "x.com"}`.
        #[arg(long, default_value = "{}")]
        condition: String,
        /// The fields to select, all stored fields if omitted.
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

/// Run a command in a given directory.
pub async fn run(command: Command, context: Context<impl Environment>) -> anyhow::Result<()> {
    match command {
        Command::Initialize => initialize(&context.context_path).await?,
        Command::Introspect => introspect(context).await?,
        Command::Generate { output } => generate(&context.context_path, &output).await?,
        Command::Translate {
            table,
            condition,
            fields,
            limit,
        } => {
            let parsed = configuration::parse_configuration(&context.context_path).await?;
            println!("{}", translate(&parsed, &table, &condition, fields, limit)?);
        }
    };
    Ok(())
}

/// Initialize an empty directory with an initial configuration.
///
/// An empty configuration contains default settings and options, and is expected to be filled
/// with information such as the catalog by running `introspect`.
///
/// This expects a configuration with a valid connection URI.
async fn initialize(context_path: &Path) -> anyhow::Result<()> {
    let configuration_file = context_path.join(CONFIGURATION_FILENAME);
    if fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "a configuration already exists at {}",
            configuration_file.display()
        );
    }

    configuration::write_parsed_configuration(&ParsedConfiguration::initial(), context_path)
        .await?;
    tracing::info!(path = %context_path.display(), "initialized configuration");
    Ok(())
}

/// Update the configuration in the current directory by introspecting the schema service.
async fn introspect(context: Context<impl Environment>) -> anyhow::Result<()> {
    let input = configuration::parse_configuration(&context.context_path).await?;
    let output = configuration::configure(&input, &context.environment).await?;
    configuration::write_parsed_configuration(&output, &context.context_path).await?;
    tracing::info!(
        tables = output.catalog.tables().count(),
        types = output.catalog.len(),
        "updated catalog"
    );
    Ok(())
}

async fn generate(context_path: &Path, output: &Path) -> anyhow::Result<()> {
    let parsed = configuration::parse_configuration(context_path).await?;
    let source = schema_bridge::generate::generate_module(&parsed.catalog);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(output, source).await?;
    tracing::info!(output = %output.display(), "generated accessors");
    Ok(())
}

/// The formatted SELECT of a query and its numbered parameters.
pub fn translate(
    parsed: &ParsedConfiguration,
    table: &str,
    condition: &str,
    fields: Vec<String>,
    limit: Option<u32>,
) -> anyhow::Result<String> {
    let condition = Condition::from_json(serde_json::from_str(condition)?)?;
    let selection = if fields.is_empty() {
        Selection::All
    } else {
        Selection::Fields(fields)
    };

    let env = Env::new(&parsed.catalog, &parsed.connection_settings.schema);
    let select = query::translate_select(&env, table, &condition, &selection, limit)?;
    let sql = sql::execution_plan::select_to_sql(&select);

    let params: Vec<(usize, &sql::string::Param)> = sql
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, p))
        .collect();

    let pretty = sqlformat::format(
        &sql.sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    );

    Ok(format!("{pretty}\n\n{params:?}"))
}
