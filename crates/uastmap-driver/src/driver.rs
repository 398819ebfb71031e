//! Generation driver
//!
//! Visits every language directory under the grammars root in name order.
//! For each language the registry knows files for, the first node-type
//! catalog found below its directory is drafted by the external producer,
//! then formatted, enhanced and validated before the map is written.
//!
//! Only startup problems abort a run. A language that fails to draft or to
//! write is recorded in the report and the run moves on.

use crate::drafter::{CommandDrafter, DraftProducer, DraftRequest};
use crate::error::DriverError;
use crate::report::{LanguageMessage, ProcessedLanguage, RunReport};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uastmap_config::AppConfig;
use uastmap_core::{
    LanguagePattern, LanguageRegistry, MappingEnhancer, SchemaValidator, SectionFormatter,
    ValidationOutcome,
};
use walkdir::WalkDir;

/// Paths and names a run works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSettings {
    pub grammars_dir: PathBuf,
    pub output_dir: PathBuf,
    pub catalog_filename: String,
    pub map_extension: String,
}

impl DriverSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            grammars_dir: config.grammars_dir.clone(),
            output_dir: config.output_dir.clone(),
            catalog_filename: config.catalog_filename.clone(),
            map_extension: config.map_extension.clone(),
        }
    }

    pub fn output_path(&self, dir: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", dir, self.map_extension))
    }
}

pub struct GenerationDriver<D> {
    settings: DriverSettings,
    registry: LanguageRegistry,
    formatter: SectionFormatter,
    enhancer: MappingEnhancer,
    validator: SchemaValidator,
    drafter: D,
    only: Option<BTreeSet<String>>,
}

impl GenerationDriver<CommandDrafter> {
    /// Driver using the configured schema and drafting command.
    ///
    /// Fails when the schema cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, DriverError> {
        let validator = SchemaValidator::from_path(&config.schema_path)?;
        Ok(Self::new(
            DriverSettings::from_config(config),
            validator,
            CommandDrafter::from_config(&config.drafter),
        ))
    }
}

impl<D: DraftProducer> GenerationDriver<D> {
    pub fn new(settings: DriverSettings, validator: SchemaValidator, drafter: D) -> Self {
        Self {
            settings,
            registry: LanguageRegistry::builtin(),
            formatter: SectionFormatter,
            enhancer: MappingEnhancer::default(),
            validator,
            drafter,
            only: None,
        }
    }

    /// Restrict the run to the given grammar directory names. An empty list
    /// keeps every language.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let only: BTreeSet<String> = languages.into_iter().map(Into::into).collect();
        self.only = if only.is_empty() { None } else { Some(only) };
        self
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    pub fn run(&self) -> Result<RunReport, DriverError> {
        std::fs::create_dir_all(&self.settings.output_dir).map_err(|source| {
            DriverError::OutputDir {
                path: self.settings.output_dir.clone(),
                source,
            }
        })?;

        let languages = self.language_dirs()?;
        self.warn_unmatched_filter(&languages);

        info!(
            grammars_dir = %self.settings.grammars_dir.display(),
            languages = languages.len(),
            "Starting UAST map generation"
        );

        let mut report = RunReport::default();
        for lang in &languages {
            if !self.is_selected(lang) {
                continue;
            }
            self.visit_language(lang, &mut report);
        }

        info!(
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            errors = report.errors.len(),
            validation_warnings = report.validation_warnings.len(),
            "UAST map generation finished"
        );

        Ok(report)
    }

    fn visit_language(&self, lang: &str, report: &mut RunReport) {
        let pattern = self.registry.pattern_for(lang);

        if pattern.claims_no_files() {
            info!(lang = %lang, "Skipping language with no extensions or files defined");
            report.skipped.push(lang.to_string());
            return;
        }

        let catalogs = self.find_catalogs(&self.settings.grammars_dir.join(lang));
        let Some(catalog) = catalogs.first() else {
            info!(
                lang = %lang,
                catalog = %self.settings.catalog_filename,
                "No node-type catalog found, skipping"
            );
            report.skipped.push(lang.to_string());
            return;
        };

        if catalogs.len() > 1 {
            warn!(
                lang = %lang,
                using = %catalog.display(),
                ignored = catalogs.len() - 1,
                "Multiple node-type catalogs found, using the first"
            );
        }

        match self.generate(lang, &pattern, catalog) {
            Ok((processed, outcome)) => {
                if !outcome.is_valid() {
                    let message = outcome.message();
                    warn!(lang = %lang, issues = %message, "Validation failed");
                    report
                        .validation_warnings
                        .push(LanguageMessage::new(lang, message));
                }
                report.processed.push(processed);
            }
            Err(e) => {
                error!(lang = %lang, error = %e, "Failed to generate UAST map");
                report
                    .errors
                    .push(LanguageMessage::new(lang, format!("Error generating {}: {}", lang, e)));
            }
        }
    }

    /// Draft, format, enhance and validate one language, then write its map.
    fn generate(
        &self,
        lang: &str,
        pattern: &LanguagePattern,
        catalog: &Path,
    ) -> Result<(ProcessedLanguage, ValidationOutcome), DriverError> {
        let output = self.settings.output_path(lang);
        info!(
            lang = %lang,
            language = %pattern.canonical_name,
            catalog = %catalog.display(),
            output = %output.display(),
            "Generating UAST map"
        );

        let draft = self
            .drafter
            .draft(&DraftRequest::new(catalog.to_path_buf(), pattern))?;

        let formatted = self.formatter.ensure_language_section(&draft, pattern);
        let enhanced = self.enhancer.enhance(&formatted);
        debug!(
            lang = %lang,
            rules = enhanced.stats.rules,
            tokens_added = enhanced.stats.tokens_added,
            roles_added = enhanced.stats.roles_added,
            types_corrected = enhanced.stats.types_corrected,
            "Enhanced draft"
        );

        let outcome = self
            .validator
            .validate_uast_map(&enhanced.text, &pattern.canonical_name);

        std::fs::write(&output, &enhanced.text).map_err(|e| DriverError::io(&output, e))?;

        let processed = ProcessedLanguage {
            lang: lang.to_string(),
            canonical_name: pattern.canonical_name.clone(),
            extension_count: pattern.extensions.len(),
            file_count: pattern.filenames.len(),
            output,
            stats: enhanced.stats,
        };

        Ok((processed, outcome))
    }

    /// Directory names under the grammars root, sorted
    pub fn language_dirs(&self) -> Result<Vec<String>, DriverError> {
        let root = &self.settings.grammars_dir;
        let entries = std::fs::read_dir(root).map_err(|source| DriverError::GrammarsDir {
            path: root.clone(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DriverError::GrammarsDir {
                path: root.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => dirs.push(name),
                Err(name) => warn!(dir = ?name, "Skipping non UTF-8 directory name"),
            }
        }

        dirs.sort();
        Ok(dirs)
    }

    /// Every catalog file below `lang_dir`, in walk order sorted by file name
    pub fn find_catalogs(&self, lang_dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(lang_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(dir = %lang_dir.display(), error = %e, "Error while searching for catalogs");
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry.file_name() == self.settings.catalog_filename.as_str()
            })
            .map(|entry| entry.into_path())
            .collect()
    }

    fn is_selected(&self, lang: &str) -> bool {
        self.only.as_ref().is_none_or(|only| only.contains(lang))
    }

    fn warn_unmatched_filter(&self, languages: &[String]) {
        let Some(only) = &self.only else {
            return;
        };
        for wanted in only {
            if !languages.iter().any(|lang| lang == wanted) {
                warn!(lang = %wanted, "Requested language has no grammar directory");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DraftError;
    use std::fs;
    use tempfile::TempDir;
    use uastmap_core::SchemaEnums;

    struct EchoDrafter;

    impl DraftProducer for EchoDrafter {
        fn draft(&self, request: &DraftRequest) -> Result<String, DraftError> {
            Ok(format!(
                "{name} <- ({name}) => uast(\n    type: \"Block\"\n)\n",
                name = request.canonical_name
            ))
        }
    }

    fn validator() -> SchemaValidator {
        SchemaValidator::new(
            SchemaEnums::from_json_str(
                r#"{"definitions": {"NodeType": {"enum": ["Block"]}, "Role": {"enum": ["Body"]}}}"#,
            )
            .unwrap(),
        )
    }

    fn settings(root: &Path) -> DriverSettings {
        DriverSettings {
            grammars_dir: root.join("grammars"),
            output_dir: root.join("out"),
            catalog_filename: "node-types.json".to_string(),
            map_extension: "uastmap".to_string(),
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = AppConfig::default();
        let settings = DriverSettings::from_config(&config);
        assert_eq!(settings.output_path("go"), config.output_path("go"));
    }

    #[test]
    fn test_from_config_requires_schema() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig {
            schema_path: tmp.path().join("missing-schema.json"),
            ..AppConfig::default()
        };
        let err = GenerationDriver::from_config(&config).err().unwrap();
        assert!(matches!(err, DriverError::Schema(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_language_dirs_sorted_and_files_ignored() {
        let tmp = TempDir::new().unwrap();
        let grammars = tmp.path().join("grammars");
        for dir in ["rust", "go", "bash"] {
            fs::create_dir_all(grammars.join(dir)).unwrap();
        }
        fs::write(grammars.join("README.md"), "grammars").unwrap();

        let driver = GenerationDriver::new(settings(tmp.path()), validator(), EchoDrafter);
        assert_eq!(driver.language_dirs().unwrap(), vec!["bash", "go", "rust"]);
    }

    #[test]
    fn test_find_catalogs_is_recursive_and_ordered() {
        let tmp = TempDir::new().unwrap();
        let lang = tmp.path().join("grammars/typescript");
        fs::create_dir_all(lang.join("typescript/src")).unwrap();
        fs::create_dir_all(lang.join("tsx/src")).unwrap();
        fs::write(lang.join("typescript/src/node-types.json"), "[]").unwrap();
        fs::write(lang.join("tsx/src/node-types.json"), "[]").unwrap();
        fs::write(lang.join("tsx/src/grammar.json"), "{}").unwrap();

        let driver = GenerationDriver::new(settings(tmp.path()), validator(), EchoDrafter);
        let catalogs = driver.find_catalogs(&lang);
        assert_eq!(
            catalogs,
            vec![
                lang.join("tsx/src/node-types.json"),
                lang.join("typescript/src/node-types.json"),
            ]
        );
    }

    #[test]
    fn test_missing_grammars_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let driver = GenerationDriver::new(settings(tmp.path()), validator(), EchoDrafter);
        let err = driver.run().unwrap_err();
        assert!(matches!(err, DriverError::GrammarsDir { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_filter_selects_languages() {
        let tmp = TempDir::new().unwrap();
        for dir in ["go", "rust"] {
            let lang = tmp.path().join("grammars").join(dir);
            fs::create_dir_all(&lang).unwrap();
            fs::write(lang.join("node-types.json"), "[]").unwrap();
        }

        let report = GenerationDriver::new(settings(tmp.path()), validator(), EchoDrafter)
            .with_languages(["rust", "zig"])
            .run()
            .unwrap();

        assert_eq!(report.processed.len(), 1);
        assert_eq!(report.processed[0].lang, "rust");
        assert!(report.skipped.is_empty());
        assert!(!tmp.path().join("out/go.uastmap").exists());
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let tmp = TempDir::new().unwrap();
        let driver = GenerationDriver::new(settings(tmp.path()), validator(), EchoDrafter)
            .with_languages(Vec::<String>::new());
        assert!(driver.is_selected("go"));
    }
}
