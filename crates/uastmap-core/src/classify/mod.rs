//! Rule classification
//!
//! Three stateless classifiers infer the metadata a draft rule is missing:
//! - [`TypeClassifier`] - canonical node type from the rule name
//! - [`RoleClassifier`] - structural roles from the canonical type
//! - [`TokenClassifier`] - token-extraction strategy from the rule name
//!
//! [`RuleClassifier`] runs all three once per rule.

mod roles;
mod token;
mod types;

pub use roles::RoleClassifier;
pub use token::{TokenCategory, TokenClassifier, TokenStrategy};
pub use types::{TypeClassifier, TypeTables, FALLBACK_TYPE, TYPE_TABLES};

use serde::Serialize;

/// Everything inferred for one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub uast_type: &'static str,
    pub token_strategy: TokenStrategy,
    pub roles: Vec<&'static str>,
}

/// Runs the type, role and token classifiers for a rule name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier {
    types: TypeClassifier,
    roles: RoleClassifier,
    tokens: TokenClassifier,
}

impl RuleClassifier {
    pub fn new(tables: &'static TypeTables) -> Self {
        Self {
            types: TypeClassifier::new(tables),
            roles: RoleClassifier,
            tokens: TokenClassifier,
        }
    }

    pub fn classify(&self, rule_name: &str) -> Classification {
        let uast_type = self.types.classify(rule_name);
        Classification {
            uast_type,
            token_strategy: self.tokens.classify(rule_name),
            roles: self.roles.classify(rule_name, uast_type),
        }
    }
}
