//! Canonical type to structural roles

/// Rule-name fragments that mark an identifier as the name of its parent
const NAME_PATTERNS: &[&str] = &["function_name", "method_name", "class_name"];

/// Maps a (rule name, canonical type) pair to its roles.
///
/// Dispatch is on the type; the rule name is only consulted for identifiers.
/// Types without a role mapping yield no roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleClassifier;

impl RoleClassifier {
    pub fn classify(&self, rule_name: &str, uast_type: &str) -> Vec<&'static str> {
        match uast_type {
            "Function" | "Method" => vec!["Function", "Declaration"],
            "Class" | "Interface" | "Struct" | "Enum" => vec!["Declaration"],
            "Variable" => vec!["Variable", "Declaration"],
            "Parameter" => vec!["Parameter"],
            "Identifier" => vec![identifier_role(rule_name)],
            "Call" => vec!["Call"],
            "Assignment" => vec!["Assignment"],
            "If" => vec!["Condition"],
            "Loop" => vec!["Loop"],
            "Switch" | "Case" => vec!["Branch"],
            "Return" => vec!["Return"],
            "Break" => vec!["Break"],
            "Continue" => vec!["Continue"],
            "Block" => vec!["Body"],
            "Import" => vec!["Import"],
            "Comment" => vec!["Comment"],
            "DocString" => vec!["Doc"],
            "Literal" => vec!["Literal"],
            "BinaryOp" | "UnaryOp" => vec!["Operator"],
            _ => Vec::new(),
        }
    }
}

fn identifier_role(rule_name: &str) -> &'static str {
    let lower = rule_name.to_lowercase();
    if NAME_PATTERNS.iter().any(|pattern| lower.contains(pattern)) {
        "Name"
    } else {
        "Reference"
    }
}
