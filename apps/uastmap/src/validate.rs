use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uastmap_config::AppConfig;

#[derive(Args)]
pub struct ValidateArgs {
    /// Map files to check
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// UAST schema (default: configured schema)
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, config: AppConfig) -> Result<ExitCode> {
    let validator = crate::load_validator(args.schema, &config, false)?
        .context("UAST schema is required for validation")?;

    let mut invalid = 0;
    for file in &args.files {
        let content = match std::fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                println!("{} {}: {}", "✗".red(), file.display(), e);
                invalid += 1;
                continue;
            }
        };

        let outcome = validator.validate_uast_map(&content, language_of(file));
        if outcome.is_valid() {
            println!("{} {}", "✓".green(), file.display());
        } else {
            println!("{} {}: {}", "✗".red(), file.display(), outcome.message());
            invalid += 1;
        }
    }

    if invalid > 0 {
        println!(
            "\n{}",
            format!("{} of {} maps invalid", invalid, args.files.len()).red()
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// File stem, which is the grammar directory name for generated maps
fn language_of(file: &Path) -> &str {
    file.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
}
