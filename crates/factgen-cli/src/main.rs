mod logging;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use factgen_core::{Error as CoreError, GeneratorConfig, load_config, load_targets};
use factgen_generate::{GenerationEngine, GenerationError};
use thiserror::Error;

const DEFAULT_TARGETS: &str = "testdata/targets.json";
const DEFAULT_OUT: &str = "testdata/facts.json";
const DEFAULTS_NOTE: &str = "Every flag is optional. Running `factgen` with no arguments \
reads testdata/targets.json and writes 10,000 facts to testdata/facts.json with seed 1984 \
and the built-in max values and merge lists; flags, --config and RUST_LOG only override \
those defaults.";

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "factgen",
    version,
    about = "Generate randomized fact fixtures from a targets corpus",
    after_help = DEFAULTS_NOTE
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write facts for a targets corpus (default command).
    #[command(after_help = DEFAULTS_NOTE)]
    Generate(GenerateArgs),
    /// Print the JSON Schema of the targets corpus.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Targets corpus to read.
    #[arg(long, default_value = DEFAULT_TARGETS)]
    targets: PathBuf,
    /// Facts file to write (JSON Lines).
    #[arg(long, default_value = DEFAULT_OUT)]
    out: PathBuf,
    /// Optional TOML file overriding seed, count, max values and merge lists.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            targets: PathBuf::from(DEFAULT_TARGETS),
            out: PathBuf::from(DEFAULT_OUT),
            config: None,
        }
    }
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Write the schema to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json)?;

    match cli.command.unwrap_or_else(|| Command::Generate(GenerateArgs::default())) {
        Command::Generate(args) => run_generate(args),
        Command::Schema(args) => run_schema(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        targets,
        out,
        config,
    } = args;

    let config = match config {
        Some(path) => load_config(&path)?,
        None => GeneratorConfig::default(),
    };

    tracing::info!(event = "run_started", targets = %targets.display(), out = %out.display());

    let targets = load_targets(&targets)?;
    let report = GenerationEngine::new(config).run(&targets, &out)?;

    // Attribute report for the operator; not part of the facts file.
    println!("{}", serde_json::to_string(&report.attributes)?);

    tracing::info!(
        event = "run_finished",
        status = "success",
        facts = report.facts_written,
        duration_ms = report.duration_ms
    );

    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = factgen_core::targets_json_schema();
    let json = serde_json::to_string_pretty(&schema)?;

    match args.out.as_deref() {
        Some(path) => write_schema(path, &json)?,
        None => println!("{json}"),
    }

    Ok(())
}

fn write_schema(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, format!("{json}\n"))?;
    tracing::info!(event = "schema_written", path = %path.display());
    Ok(())
}
