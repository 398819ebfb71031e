use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use uastmap_config::AppConfig;
use uastmap_driver::{audit_existing_maps, GenerationDriver, RunReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Root holding one directory per grammar
    #[arg(long, value_name = "DIR")]
    grammars_dir: Option<PathBuf>,

    /// Where map files are written
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// UAST schema used for validation
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Draft producer executable
    #[arg(long, value_name = "PROGRAM")]
    drafter: Option<String>,

    /// Only generate these grammar directories (repeatable)
    #[arg(long = "lang", value_name = "DIR")]
    langs: Vec<String>,

    /// How the run report is printed
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report_format: ReportFormat,

    /// Skip the audit of existing map files
    #[arg(long)]
    no_audit: bool,
}

impl GenerateArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.grammars_dir {
            config.grammars_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(schema) = &self.schema {
            config.schema_path = schema.clone();
        }
        if let Some(program) = &self.drafter {
            config.drafter.program = program.clone();
        }
    }
}

pub fn run(args: GenerateArgs, mut config: AppConfig) -> Result<ExitCode> {
    args.apply(&mut config);
    config.validate()?;

    // Schema problems abort before any language is touched
    let driver = GenerationDriver::from_config(&config)
        .context("Failed to prepare UAST map generation")?
        .with_languages(args.langs);

    let mut report = driver.run().context("UAST map generation failed")?;

    // Maps are already written; an audit failure must not hide the report
    if !args.no_audit {
        match audit_existing_maps(&config.output_dir, &config.map_extension) {
            Ok(audit) => report.audit = Some(audit),
            Err(e) => error!(error = %e, "Failed to audit existing UAST maps"),
        }
    }

    match args.report_format {
        ReportFormat::Console => print_console(&report),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_console(report: &RunReport) {
    print!("{}", report);

    let status = format!(
        "{} processed, {} skipped, {} errors, {} validation warnings",
        report.processed.len(),
        report.skipped.len(),
        report.errors.len(),
        report.validation_warnings.len()
    );
    if report.has_errors() {
        println!("\n{} {}", "✗".red(), status);
    } else if !report.validation_warnings.is_empty() {
        println!("\n{} {}", "!".yellow(), status);
    } else {
        println!("\n{} {}", "✓".green(), status);
    }
}
