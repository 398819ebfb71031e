//! Format, enhance and validate a realistic draft end to end.

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use uastmap_core::classify::{RoleClassifier, TYPE_TABLES};
use uastmap_core::{
    LanguageRegistry, MappingEnhancer, SchemaValidator, SectionFormatter, ValidationIssue,
};

fn fixture_schema() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/uast-schema.json")
}

const GO_DRAFT: &str = r#"source_file <- (source_file) => uast(
    type: "File",
    children: "package_clause", "function_declaration"
)

function_declaration <- (function_declaration) => uast(
    type: "Function",
    children: "identifier", "block"
)

if_statement <- (if_statement) => uast(
    type: "If",
    children: "block"
)

for_statement <- (for_statement) => uast(
    type: "If",
    children: "block"
)

return_statement <- (return_statement) => uast(
    type: "Synthetic"
)

comment <- (comment) => uast(
    type: "Comment"
)

iota <- (iota) => uast(
    type: "Synthetic"
)
"#;

#[test]
fn test_go_draft_pipeline() {
    let pattern = LanguageRegistry::builtin().pattern_for("go");
    let formatted = SectionFormatter.ensure_language_section(GO_DRAFT, &pattern);
    let enhanced = MappingEnhancer::default().enhance(&formatted);

    assert_eq!(enhanced.stats.rules, 7);
    assert_eq!(enhanced.stats.tokens_added, 7);
    // File and the fallback type carry no roles
    assert_eq!(enhanced.stats.roles_added, 5);
    // for_statement's stray If and return_statement's fallback
    assert_eq!(enhanced.stats.types_corrected, 2);

    let text = &enhanced.text;
    assert!(text.starts_with("[language \"go\", extensions: \".go\"]\n\n"));
    assert!(text.contains(
        "function_declaration <- (function_declaration) => uast(\n    token: \"child:identifier\",\n    roles: \"Function\", \"Declaration\",\n    type: \"Function\","
    ));
    assert!(text.contains("for_statement <- (for_statement) => uast(\n    token: \"self\",\n    roles: \"Loop\",\n    type: \"Loop\","));
    assert!(text.contains("    type: \"Return\"\n"));
    assert!(text.contains("iota <- (iota) => uast(\n    token: \"self\",\n    type: \"Synthetic\"\n)"));

    let validator = SchemaValidator::from_path(&fixture_schema()).unwrap();
    let outcome = validator.validate_uast_map(text, "go");
    assert!(outcome.is_valid(), "{}", outcome.message());
}

#[test]
fn test_pipeline_is_stable_on_its_own_output() {
    let pattern = LanguageRegistry::builtin().pattern_for("go");
    let enhancer = MappingEnhancer::default();

    let first = enhancer.enhance_text(&SectionFormatter.ensure_language_section(GO_DRAFT, &pattern));
    let second = enhancer.enhance_text(&SectionFormatter.ensure_language_section(&first, &pattern));

    assert_eq!(second, first);
}

#[test]
fn test_unknown_type_in_draft_is_reported_not_fixed() {
    let draft = "widget <- (widget) => uast(\n    type: \"Widget\"\n)\n";
    let pattern = LanguageRegistry::builtin().pattern_for("go");
    let text = MappingEnhancer::default()
        .enhance_text(&SectionFormatter.ensure_language_section(draft, &pattern));

    let validator = SchemaValidator::from_path(&fixture_schema()).unwrap();
    let outcome = validator.validate_uast_map(&text, "go");

    assert_eq!(
        outcome.issues,
        vec![ValidationIssue::InvalidType {
            line: 5,
            uast_type: "Widget".to_string(),
        }]
    );
}

#[test]
fn test_every_inferred_type_and_role_is_in_schema() {
    let validator = SchemaValidator::from_path(&fixture_schema()).unwrap();
    let enums = validator.enums();
    let roles = RoleClassifier;

    for uast_type in TYPE_TABLES.known_types() {
        assert!(enums.is_valid_type(uast_type), "type {uast_type} not in schema");
        for role in roles.classify("function_name", uast_type) {
            assert!(enums.is_valid_role(role), "role {role} not in schema");
        }
        for role in roles.classify("identifier", uast_type) {
            assert!(enums.is_valid_role(role), "role {role} not in schema");
        }
    }
}

#[test]
fn test_filename_only_language_header() {
    let pattern = LanguageRegistry::builtin().pattern_for("gosum");
    let text = SectionFormatter.ensure_language_section(
        "checksum <- (checksum) => uast(\n    type: \"Literal\"\n)\n",
        &pattern,
    );
    assert!(text.starts_with("[language \"gosum\", files: \"go.sum\"]\n\n"));
}
