//! Language header normalization
//!
//! Every map must open with exactly one header line naming the language and
//! the files it claims:
//!
//! ```text
//! [language "dockerfile", extensions: ".dockerfile", files: "Dockerfile"]
//!
//! ...rules...
//! ```
//!
//! Drafts may already carry a header (possibly stale); it is dropped together
//! with every line up to and including the next blank line.

use crate::dsl::{self, is_blank, is_language_header};
use crate::language::LanguagePattern;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SectionFormatter;

impl SectionFormatter {
    /// Replace any existing header in `content` with one built from `pattern`.
    ///
    /// Empty or whitespace-only content is returned unchanged.
    pub fn ensure_language_section(&self, content: &str, pattern: &LanguagePattern) -> String {
        if is_blank(content) {
            return content.to_string();
        }

        let body = self.strip_language_sections(content);
        let header = self.render_header(pattern);

        debug!(language = %pattern.canonical_name, "Writing language header");

        if body.is_empty() {
            format!("{}\n", header)
        } else {
            format!("{}\n\n{}\n", header, body)
        }
    }

    /// Drop every header block, then trim surrounding blank lines.
    pub fn strip_language_sections(&self, content: &str) -> String {
        let mut kept = Vec::new();
        let mut skipping = false;

        for line in content.lines() {
            if is_language_header(line) {
                skipping = true;
                continue;
            }
            if skipping {
                if is_blank(line) {
                    skipping = false;
                }
                continue;
            }
            kept.push(line);
        }

        kept.join("\n").trim().to_string()
    }

    /// `[language "<name>", extensions: "...", files: "..."]`
    pub fn render_header(&self, pattern: &LanguagePattern) -> String {
        let mut parts = vec![format!(
            "{}\"{}\"",
            dsl::LANGUAGE_HEADER_MARKER,
            pattern.canonical_name
        )];

        if !pattern.extensions.is_empty() {
            parts.push(format!("extensions: {}", dsl::quoted_list(&pattern.extensions)));
        }

        if !pattern.filenames.is_empty() {
            parts.push(format!("files: {}", dsl::quoted_list(&pattern.filenames)));
        }

        format!("{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;
    use pretty_assertions::assert_eq;

    fn pattern(name: &str, extensions: &[&str], filenames: &[&str]) -> LanguagePattern {
        LanguagePattern {
            canonical_name: name.to_string(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
            filenames: filenames.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_header_variants() {
        let formatter = SectionFormatter;
        assert_eq!(
            formatter.render_header(&pattern("go", &[".go"], &[])),
            r#"[language "go", extensions: ".go"]"#
        );
        assert_eq!(
            formatter.render_header(&LanguageRegistry::builtin().pattern_for("dockerfile")),
            r#"[language "dockerfile", extensions: ".dockerfile", files: "Dockerfile"]"#
        );
        assert_eq!(
            formatter.render_header(&pattern("gosum", &[], &["go.sum"])),
            r#"[language "gosum", files: "go.sum"]"#
        );
        assert_eq!(
            formatter.render_header(&pattern("bare", &[], &[])),
            r#"[language "bare"]"#
        );
    }

    #[test]
    fn test_adds_header_to_headerless_draft() {
        let out = SectionFormatter.ensure_language_section(
            "block <- (block) => uast(\n    type: \"Block\"\n)\n",
            &pattern("go", &[".go"], &[]),
        );
        assert_eq!(
            out,
            "[language \"go\", extensions: \".go\"]\n\nblock <- (block) => uast(\n    type: \"Block\"\n)\n"
        );
    }

    #[test]
    fn test_replaces_existing_header() {
        let draft = "[language \"x\"]\n\nrule <- (rule) => uast(\n)\n";
        let once = SectionFormatter.ensure_language_section(draft, &pattern("x", &[".x"], &[]));
        let again = SectionFormatter.ensure_language_section(&once, &pattern("y", &[".y"], &[]));

        assert_eq!(
            again,
            "[language \"y\", extensions: \".y\"]\n\nrule <- (rule) => uast(\n)\n"
        );
        assert!(!again.contains("\"x\""));
    }

    #[test]
    fn test_multiline_header_block_is_dropped() {
        let draft = "[language \"old\",\n  extensions: \".o\"]\n\nrule <- (rule) => uast(\n)";
        let out = SectionFormatter.ensure_language_section(draft, &pattern("new", &[], &[]));
        assert_eq!(out, "[language \"new\"]\n\nrule <- (rule) => uast(\n)\n");
    }

    #[test]
    fn test_many_headers_collapse_to_one() {
        let draft = "a <- (a) => uast(\n)\n\n[language \"one\"]\n\n[language \"two\"]\n\nb <- (b) => uast(\n)\n";
        let out = SectionFormatter.ensure_language_section(draft, &pattern("go", &[".go"], &[]));
        assert_eq!(out.lines().filter(|l| is_language_header(l)).count(), 1);
        assert!(out.starts_with("[language \"go\""));
        assert!(out.contains("a <- (a)"));
        assert!(out.contains("b <- (b)"));
    }

    #[test]
    fn test_blank_content_is_untouched() {
        let p = pattern("go", &[".go"], &[]);
        assert_eq!(SectionFormatter.ensure_language_section("", &p), "");
        assert_eq!(SectionFormatter.ensure_language_section("  \n\t\n", &p), "  \n\t\n");
    }

    #[test]
    fn test_header_only_draft() {
        let out = SectionFormatter
            .ensure_language_section("[language \"go\"]\n", &pattern("go", &[".go"], &[]));
        assert_eq!(out, "[language \"go\", extensions: \".go\"]\n");
    }
}
