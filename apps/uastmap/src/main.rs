use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use uastmap_config::AppConfig;

mod audit;
mod classify;
mod enhance;
mod generate;
mod validate;

#[derive(Parser)]
#[command(name = "uastmap")]
#[command(about = "Generate and maintain UAST mapping files", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./uastmap.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draft, enhance and validate a map for every grammar
    Generate(generate::GenerateArgs),

    /// Add the language header and missing fields to an existing draft
    Enhance(enhance::EnhanceArgs),

    /// Check map files against the UAST schema
    Validate(validate::ValidateArgs),

    /// Show the type, roles and token strategy inferred for rule names
    Classify(classify::ClassifyArgs),

    /// List map files that do not start with a language header
    Audit(audit::AuditArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level.to_lowercase();
        config.validate()?;
    }
    uastmap_config::logging::initialize(&config);

    match cli.command {
        Command::Generate(args) => generate::run(args, config),
        Command::Enhance(args) => enhance::run(args, config),
        Command::Validate(args) => validate::run(args, config),
        Command::Classify(args) => classify::run(args),
        Command::Audit(args) => audit::run(args, config),
    }
}

/// Load the validator from an explicit schema, or from the configured one.
///
/// With `optional`, a missing configured schema yields `None` instead of an error.
fn load_validator(
    explicit: Option<PathBuf>,
    config: &AppConfig,
    optional: bool,
) -> Result<Option<uastmap_core::SchemaValidator>> {
    let path = match explicit {
        Some(path) => path,
        None if optional && !config.schema_path.is_file() => {
            tracing::debug!(
                schema = %config.schema_path.display(),
                "No UAST schema found, skipping validation"
            );
            return Ok(None);
        }
        None => config.schema_path.clone(),
    };

    let validator = uastmap_core::SchemaValidator::from_path(&path)
        .with_context(|| format!("Failed to load UAST schema from {}", path.display()))?;
    Ok(Some(validator))
}
