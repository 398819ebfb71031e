//! Schema validation of mapping files
//!
//! The UAST schema is a JSON document whose `definitions.NodeType.enum` and
//! `definitions.Role.enum` arrays list every permitted node type and role.
//! Both are loaded once; a map is then checked for structure (content,
//! header, at least one mapping) and for every `type:` / `roles:` value.

use crate::dsl::{self, MAPPING_CALL_MARKER};
use crate::error::SchemaError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    definitions: SchemaDefinitions,
}

#[derive(Debug, Default, Deserialize)]
struct SchemaDefinitions {
    #[serde(rename = "NodeType")]
    node_type: Option<EnumDefinition>,
    #[serde(rename = "Role")]
    role: Option<EnumDefinition>,
}

#[derive(Debug, Deserialize)]
struct EnumDefinition {
    #[serde(rename = "enum", default)]
    values: Vec<String>,
}

fn required_enum(
    definition: Option<EnumDefinition>,
    name: &'static str,
) -> Result<BTreeSet<String>, SchemaError> {
    let values: BTreeSet<String> = definition
        .map(|d| d.values)
        .unwrap_or_default()
        .into_iter()
        .collect();
    if values.is_empty() {
        return Err(SchemaError::missing_enum(name));
    }
    Ok(values)
}

/// Permitted node types and roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEnums {
    valid_types: BTreeSet<String>,
    valid_roles: BTreeSet<String>,
}

impl SchemaEnums {
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        Ok(Self {
            valid_types: required_enum(document.definitions.node_type, "NodeType")?,
            valid_roles: required_enum(document.definitions.role, "Role")?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        debug!(path = %path.display(), "Loading UAST schema");
        let json = std::fs::read_to_string(path).map_err(|e| SchemaError::read(path, e))?;
        let enums = Self::from_json_str(&json)?;
        info!(
            types = enums.valid_types.len(),
            roles = enums.valid_roles.len(),
            "UAST schema loaded"
        );
        Ok(enums)
    }

    pub fn is_valid_type(&self, uast_type: &str) -> bool {
        self.valid_types.contains(uast_type)
    }

    pub fn is_valid_role(&self, role: &str) -> bool {
        self.valid_roles.contains(role)
    }
}

/// One reason a map failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyContent,
    MissingLanguageSection,
    NoMappings,
    InvalidType { line: usize, uast_type: String },
    InvalidRoles { line: usize, roles: Vec<String> },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => f.write_str("Empty content"),
            Self::MissingLanguageSection => f.write_str("Missing language section"),
            Self::NoMappings => f.write_str("No UAST mappings found"),
            Self::InvalidType { line, uast_type } => {
                write!(f, "Line {}: Invalid UAST type '{}'", line, uast_type)
            }
            Self::InvalidRoles { line, roles } => {
                write!(f, "Line {}: Invalid UAST roles [{}]", line, roles.join(", "))
            }
        }
    }
}

/// Result of validating one map. Never fatal: an invalid map is still written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Every issue, joined into one line
    pub fn message(&self) -> String {
        if self.is_valid() {
            return "Valid".to_string();
        }
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checks mapping files against the loaded schema enums.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    enums: SchemaEnums,
}

impl SchemaValidator {
    pub fn new(enums: SchemaEnums) -> Self {
        Self { enums }
    }

    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        SchemaEnums::load(path).map(Self::new)
    }

    pub fn enums(&self) -> &SchemaEnums {
        &self.enums
    }

    pub fn validate_uast_map(&self, content: &str, lang_name: &str) -> ValidationOutcome {
        if dsl::is_blank(content) {
            return ValidationOutcome {
                issues: vec![ValidationIssue::EmptyContent],
            };
        }

        let mut issues = Vec::new();

        if !content.starts_with(dsl::LANGUAGE_HEADER_MARKER) {
            issues.push(ValidationIssue::MissingLanguageSection);
        }

        if !content.contains(MAPPING_CALL_MARKER) {
            issues.push(ValidationIssue::NoMappings);
        }

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;

            if let Some(uast_type) = dsl::type_value(line) {
                if !uast_type.is_empty() && !self.enums.is_valid_type(uast_type) {
                    issues.push(ValidationIssue::InvalidType {
                        line: line_no,
                        uast_type: uast_type.to_string(),
                    });
                }
            }

            if let Some(roles) = dsl::roles_values(line) {
                let invalid: Vec<String> = roles
                    .into_iter()
                    .filter(|role| !self.enums.is_valid_role(role))
                    .map(str::to_string)
                    .collect();
                if !invalid.is_empty() {
                    issues.push(ValidationIssue::InvalidRoles {
                        line: line_no,
                        roles: invalid,
                    });
                }
            }
        }

        debug!(
            language = %lang_name,
            issues = issues.len(),
            "Validated UAST map"
        );

        ValidationOutcome { issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SCHEMA: &str = r#"{
        "definitions": {
            "NodeType": { "type": "string", "enum": ["If", "Block", "Synthetic", "Function"] },
            "Role": { "type": "string", "enum": ["Condition", "Body", "Function", "Declaration"] }
        }
    }"#;

    fn validator() -> SchemaValidator {
        SchemaValidator::new(SchemaEnums::from_json_str(SCHEMA).unwrap())
    }

    #[test]
    fn test_valid_map() {
        let map = "[language \"go\", extensions: \".go\"]\n\nblock <- (block) => uast(\n    token: \"self\",\n    roles: \"Body\",\n    type: \"Block\"\n)\n";
        let outcome = validator().validate_uast_map(map, "go");
        assert!(outcome.is_valid());
        assert_eq!(outcome.message(), "Valid");
    }

    #[test]
    fn test_unknown_type_is_named() {
        let map = "[language \"go\"]\n\nx <- (x) => uast(\n    type: \"Widget\"\n)";
        let outcome = validator().validate_uast_map(map, "go");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.message(), "Line 4: Invalid UAST type 'Widget'");
    }

    #[test]
    fn test_invalid_roles_bare_and_bracketed() {
        let map = "[language \"go\"]\n\nx <- (x) => uast(\n    roles: \"Body\", \"Gadget\",\n    roles: [\"Sprocket\"]\n)";
        let outcome = validator().validate_uast_map(map, "go");
        assert_eq!(
            outcome.issues,
            vec![
                ValidationIssue::InvalidRoles {
                    line: 4,
                    roles: vec!["Gadget".to_string()],
                },
                ValidationIssue::InvalidRoles {
                    line: 5,
                    roles: vec!["Sprocket".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_violations_are_concatenated() {
        let map = "x <- (x)\n    type: \"Widget\"";
        let outcome = validator().validate_uast_map(map, "go");
        assert_eq!(
            outcome.message(),
            "Missing language section; No UAST mappings found; Line 2: Invalid UAST type 'Widget'"
        );
    }

    #[test]
    fn test_empty_content() {
        let outcome = validator().validate_uast_map("  \n", "go");
        assert_eq!(outcome.issues, vec![ValidationIssue::EmptyContent]);
    }

    #[test]
    fn test_missing_role_enum_is_fatal() {
        let err = SchemaEnums::from_json_str(
            r#"{"definitions": {"NodeType": {"enum": ["If"]}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingEnum { name: "Role" }));
    }

    #[test]
    fn test_empty_type_enum_is_fatal() {
        let err = SchemaEnums::from_json_str(
            r#"{"definitions": {"NodeType": {"enum": []}, "Role": {"enum": ["Body"]}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingEnum { name: "NodeType" }));
    }

    #[test]
    fn test_corrupt_json_is_fatal() {
        assert!(matches!(
            SchemaEnums::from_json_str("{not json").unwrap_err(),
            SchemaError::Json(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();

        let validator = SchemaValidator::from_path(file.path()).unwrap();
        assert!(validator.enums().is_valid_type("Function"));
        assert!(validator.enums().is_valid_role("Declaration"));
        assert!(!validator.enums().is_valid_role("Name"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = SchemaValidator::from_path(Path::new("/nonexistent/uast-schema.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Read { .. }));
    }
}
