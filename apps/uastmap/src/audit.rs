use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use uastmap_config::AppConfig;
use uastmap_driver::audit_existing_maps;

#[derive(Args)]
pub struct AuditArgs {
    /// Directory holding map files (default: configured output directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

/// Exits non-zero when any map lacks its language header or cannot be read.
pub fn run(args: AuditArgs, config: AppConfig) -> Result<ExitCode> {
    let output_dir = args.output_dir.unwrap_or(config.output_dir);
    let audit = audit_existing_maps(&output_dir, &config.map_extension)
        .with_context(|| format!("Failed to audit {}", output_dir.display()))?;

    print!("{}", audit);

    Ok(if audit.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
