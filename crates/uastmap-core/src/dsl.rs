//! Line-level recognizers for the mapping DSL
//!
//! The generator never parses the mapping language as a grammar. It only
//! recognizes a handful of constructs, one line at a time:
//!
//! ```text
//! [language "go", extensions: ".go"]
//!
//! function_declaration <- (function_declaration) => uast(
//!     type: "Function",
//!     token: "child:identifier",
//!     roles: "Function", "Declaration",
//!     children: "block", "identifier"
//! )
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Opens the language header line
pub const LANGUAGE_HEADER_MARKER: &str = "[language ";

/// Separates the rule name from its pattern
pub const RULE_DELIMITER: &str = "<-";

/// Marks a rule that maps to a UAST node
pub const MAPPING_CALL_MARKER: &str = "=> uast(";

/// Opens the parenthesized block holding the node fields
pub const BLOCK_OPEN_MARKER: &str = "uast(";

static TYPE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\btype:\s*"([^"]*)""#).expect("valid type field regex"));

static TOKEN_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btoken:").expect("valid token field regex"));

static ROLES_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\broles:").expect("valid roles field regex"));

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid quote regex"));

pub fn is_language_header(line: &str) -> bool {
    line.trim_start().starts_with(LANGUAGE_HEADER_MARKER)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Name of the rule declared on `line`.
///
/// Returns an empty name unless the line holds exactly one `<-`.
pub fn extract_rule_name(line: &str) -> &str {
    let mut parts = line.split(RULE_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(_), None) => name.trim(),
        _ => "",
    }
}

pub fn has_token_field(line: &str) -> bool {
    TOKEN_FIELD.is_match(line)
}

pub fn has_roles_field(line: &str) -> bool {
    ROLES_FIELD.is_match(line)
}

/// Value of a `type: "..."` field on `line`
pub fn type_value(line: &str) -> Option<&str> {
    TYPE_FIELD
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite the value of the `type:` field on `line`, leaving the rest intact.
pub fn replace_type_value(line: &str, new_type: &str) -> Option<String> {
    let value = TYPE_FIELD.captures(line)?.get(1)?;
    let mut rewritten = String::with_capacity(line.len() + new_type.len());
    rewritten.push_str(&line[..value.start()]);
    rewritten.push_str(new_type);
    rewritten.push_str(&line[value.end()..]);
    Some(rewritten)
}

/// Role names listed on a `roles:` line.
///
/// Accepts both `roles: "A", "B",` and `roles: ["A", "B"]`.
pub fn roles_values(line: &str) -> Option<Vec<&str>> {
    let field = ROLES_FIELD.find(line)?;
    let rest = line[field.end()..].trim_start();
    let list = match rest.strip_prefix('[') {
        Some(inner) => inner.split(']').next().unwrap_or(inner),
        None => rest,
    };
    Some(
        QUOTED
            .captures_iter(list)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect(),
    )
}

/// Leading whitespace of `line`, reused as indentation for inserted fields
pub fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// `"a", "b", "c"`
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply the parentheses in `text` to `depth`.
///
/// Stops as soon as the depth reaches zero; anything after the closing
/// parenthesis belongs to no block. Parentheses inside double-quoted strings
/// are ignored.
pub fn track_depth(mut depth: usize, text: &str) -> usize {
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }

    depth
}
