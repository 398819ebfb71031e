//! Rule name to token-extraction strategy

use serde::Serialize;
use std::fmt;

/// Which text of a matched node supplies its token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenStrategy {
    /// The node's own source text
    #[serde(rename = "self")]
    SelfText,
    /// The text of the node's identifier child
    #[serde(rename = "child:identifier")]
    ChildIdentifier,
}

impl TokenStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStrategy::SelfText => "self",
            TokenStrategy::ChildIdentifier => "child:identifier",
        }
    }
}

impl fmt::Display for TokenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule-name categories, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Identifier,
    Literal,
    Declaration,
    Statement,
    Expression,
    Keyword,
}

const IDENTIFIER_PATTERNS: &[&str] = &[
    "identifier",
    "name",
    "variable_name",
    "function_name",
    "class_name",
    "type_name",
    "field_identifier",
    "package_identifier",
];

const LITERAL_PATTERNS: &[&str] = &[
    "string_literal",
    "number_literal",
    "boolean_literal",
    "null_literal",
    "integer_literal",
    "float_literal",
    "imaginary_literal",
];

const DECLARATION_PATTERNS: &[&str] = &[
    "function_declaration",
    "class_declaration",
    "variable_declaration",
    "type_declaration",
    "method_declaration",
    "interface_declaration",
    "enum_declaration",
    "struct_declaration",
];

const STATEMENT_PATTERNS: &[&str] = &[
    "if_statement",
    "for_statement",
    "while_statement",
    "switch_statement",
    "return_statement",
    "break_statement",
    "continue_statement",
    "assignment_statement",
];

const EXPRESSION_PATTERNS: &[&str] = &[
    "binary_expression",
    "unary_expression",
    "call_expression",
    "function_call",
    "method_call",
];

/// Matched whole, not as substrings
const KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "return", "break", "continue", "goto", "var", "const", "type",
    "func", "struct", "interface", "map", "chan", "select", "defer", "go", "range", "fallthrough",
    "default", "case", "else", "true", "false", "nil",
];

impl TokenCategory {
    pub fn of(rule_name: &str) -> Option<Self> {
        let lower = rule_name.to_lowercase();
        let contains_any = |patterns: &[&str]| patterns.iter().any(|p| lower.contains(p));

        if contains_any(IDENTIFIER_PATTERNS) {
            Some(Self::Identifier)
        } else if contains_any(LITERAL_PATTERNS) {
            Some(Self::Literal)
        } else if contains_any(DECLARATION_PATTERNS) {
            Some(Self::Declaration)
        } else if contains_any(STATEMENT_PATTERNS) {
            Some(Self::Statement)
        } else if contains_any(EXPRESSION_PATTERNS) {
            Some(Self::Expression)
        } else if KEYWORDS.contains(&lower.as_str()) {
            Some(Self::Keyword)
        } else {
            None
        }
    }

    pub fn strategy(&self) -> TokenStrategy {
        match self {
            Self::Declaration => TokenStrategy::ChildIdentifier,
            _ => TokenStrategy::SelfText,
        }
    }
}

/// Picks a token strategy; unrecognized rules fall back to the node's own text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenClassifier;

impl TokenClassifier {
    pub fn classify(&self, rule_name: &str) -> TokenStrategy {
        TokenCategory::of(rule_name)
            .map(|category| category.strategy())
            .unwrap_or(TokenStrategy::SelfText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_use_identifier_child() {
        let tokens = TokenClassifier;
        assert_eq!(tokens.classify("function_declaration"), TokenStrategy::ChildIdentifier);
        assert_eq!(tokens.classify("class_declaration"), TokenStrategy::ChildIdentifier);
        assert_eq!(
            tokens.classify("lexical_variable_declaration"),
            TokenStrategy::ChildIdentifier
        );
    }

    #[test]
    fn test_identifier_category_is_checked_first() {
        // Contains "name" before the declaration pattern is considered
        assert_eq!(
            TokenCategory::of("namespace_declaration"),
            Some(TokenCategory::Identifier)
        );
        assert_eq!(TokenClassifier.classify("namespace_declaration"), TokenStrategy::SelfText);
    }

    #[test]
    fn test_categories() {
        assert_eq!(TokenCategory::of("string_literal"), Some(TokenCategory::Literal));
        assert_eq!(TokenCategory::of("if_statement"), Some(TokenCategory::Statement));
        assert_eq!(TokenCategory::of("call_expression"), Some(TokenCategory::Expression));
        assert_eq!(TokenCategory::of("defer"), Some(TokenCategory::Keyword));
        assert_eq!(TokenCategory::of("deferred"), None);
    }

    #[test]
    fn test_unknown_rules_default_to_self() {
        assert_eq!(TokenClassifier.classify("unknown_widget_thing"), TokenStrategy::SelfText);
        assert_eq!(TokenClassifier.classify(""), TokenStrategy::SelfText);
    }

    #[test]
    fn test_strategy_text() {
        assert_eq!(TokenStrategy::SelfText.to_string(), "self");
        assert_eq!(TokenStrategy::ChildIdentifier.as_str(), "child:identifier");
        assert_eq!(
            serde_json::to_string(&TokenStrategy::ChildIdentifier).unwrap(),
            "\"child:identifier\""
        );
    }
}
