use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use uastmap_config::AppConfig;
use uastmap_core::{LanguageRegistry, MappingEnhancer, SectionFormatter};

#[derive(Args)]
pub struct EnhanceArgs {
    /// Draft mapping file
    file: PathBuf,

    /// Grammar directory name the draft belongs to (e.g. c_sharp)
    #[arg(long, value_name = "DIR")]
    lang: String,

    /// Rewrite the file instead of printing to stdout
    #[arg(long)]
    in_place: bool,

    /// UAST schema used to validate the result (default: configured schema, if present)
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,
}

pub fn run(args: EnhanceArgs, config: AppConfig) -> Result<ExitCode> {
    let draft = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let pattern = LanguageRegistry::builtin().pattern_for(&args.lang);
    if pattern.claims_no_files() {
        eprintln!(
            "{} '{}' has no extensions or files registered; header will name no files",
            "warning:".yellow().bold(),
            args.lang
        );
    }

    let formatted = SectionFormatter.ensure_language_section(&draft, &pattern);
    let enhanced = MappingEnhancer::default().enhance(&formatted);

    if let Some(validator) = crate::load_validator(args.schema, &config, true)? {
        let outcome = validator.validate_uast_map(&enhanced.text, &pattern.canonical_name);
        if !outcome.is_valid() {
            eprintln!(
                "{} {}: {}",
                "warning:".yellow().bold(),
                args.file.display(),
                outcome.message()
            );
        }
    }

    if args.in_place {
        std::fs::write(&args.file, &enhanced.text)
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
        eprintln!(
            "{} {} ({} rules, {} tokens added, {} roles added, {} types corrected)",
            "✓".green(),
            args.file.display(),
            enhanced.stats.rules,
            enhanced.stats.tokens_added,
            enhanced.stats.roles_added,
            enhanced.stats.types_corrected
        );
    } else {
        print!("{}", enhanced.text);
    }

    Ok(ExitCode::SUCCESS)
}
