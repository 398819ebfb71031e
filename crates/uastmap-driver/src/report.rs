//! Run report
//!
//! Every language visited by a run lands in exactly one of `processed`,
//! `skipped` or `errors`. A processed language may additionally carry a
//! validation warning; its map was still written.

use crate::audit::MapAudit;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use uastmap_core::EnhanceStats;

const RULE: &str = "==================================================";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedLanguage {
    /// Grammar directory name
    pub lang: String,
    pub canonical_name: String,
    pub extension_count: usize,
    pub file_count: usize,
    pub output: PathBuf,
    pub stats: EnhanceStats,
}

/// A message scoped to one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageMessage {
    pub lang: String,
    pub message: String,
}

impl LanguageMessage {
    pub fn new(lang: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub processed: Vec<ProcessedLanguage>,
    pub skipped: Vec<String>,
    pub errors: Vec<LanguageMessage>,
    pub validation_warnings: Vec<LanguageMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<MapAudit>,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "UAST MAP GENERATION SUMMARY")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Successfully processed: {} languages", self.processed.len())?;
        writeln!(f, "Skipped: {} languages", self.skipped.len())?;
        writeln!(f, "Errors: {} languages", self.errors.len())?;
        writeln!(
            f,
            "Validation warnings: {} languages",
            self.validation_warnings.len()
        )?;

        if !self.processed.is_empty() {
            writeln!(f, "\nProcessed languages:")?;
            for p in &self.processed {
                writeln!(
                    f,
                    "  - {} -> {} ({} extensions, {} files)",
                    p.lang, p.canonical_name, p.extension_count, p.file_count
                )?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(f, "\nSkipped languages:")?;
            for lang in &self.skipped {
                writeln!(f, "  - {}", lang)?;
            }
        }

        write_messages(f, "Errors", &self.errors)?;
        write_messages(f, "Validation warnings", &self.validation_warnings)?;

        if let Some(audit) = &self.audit {
            write!(f, "\n{}", audit)?;
        }

        Ok(())
    }
}

fn write_messages(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    messages: &[LanguageMessage],
) -> fmt::Result {
    if messages.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n{}:", title)?;
    for m in messages {
        writeln!(f, "  - {}: {}", m.lang, m.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> RunReport {
        RunReport {
            processed: vec![ProcessedLanguage {
                lang: "c_sharp".to_string(),
                canonical_name: "csharp".to_string(),
                extension_count: 1,
                file_count: 0,
                output: PathBuf::from("out/c_sharp.uastmap"),
                stats: EnhanceStats::default(),
            }],
            skipped: vec!["mystery".to_string()],
            errors: vec![LanguageMessage::new("go", "Error generating go: boom")],
            validation_warnings: vec![LanguageMessage::new(
                "c_sharp",
                "Line 4: Invalid UAST type 'Widget'",
            )],
            audit: None,
        }
    }

    #[test]
    fn test_console_summary() {
        assert_eq!(
            sample().to_string(),
            "\
==================================================
UAST MAP GENERATION SUMMARY
==================================================
Successfully processed: 1 languages
Skipped: 1 languages
Errors: 1 languages
Validation warnings: 1 languages

Processed languages:
  - c_sharp -> csharp (1 extensions, 0 files)

Skipped languages:
  - mystery

Errors:
  - go: Error generating go: boom

Validation warnings:
  - c_sharp: Line 4: Invalid UAST type 'Widget'
"
        );
    }

    #[test]
    fn test_empty_report_has_only_counts() {
        let text = RunReport::default().to_string();
        assert_eq!(text.lines().count(), 7);
        assert!(!RunReport::default().has_errors());
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["processed"][0]["canonicalName"], "csharp");
        assert_eq!(json["processed"][0]["stats"]["tokens_added"], 0);
        assert_eq!(json["skipped"][0], "mystery");
        assert_eq!(json["validationWarnings"][0]["lang"], "c_sharp");
        assert!(json.get("audit").is_none());
    }
}
