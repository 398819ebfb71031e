//! Core of the UAST mapping generator
//!
//! Takes the draft mapping text emitted for a grammar, infers the semantic
//! metadata the draft is missing, rewrites the draft in place and checks the
//! result against the UAST schema.
//!
//! Pipeline, leaves first:
//! - [`language`] - static registry of grammar directories and their file patterns
//! - [`classify`] - rule name to canonical type, roles and token strategy
//! - [`section`] - guarantees a single `[language ...]` header
//! - [`enhancer`] - patches every `uast(...)` block with `token:` / `roles:` fields
//! - [`schema`] - validates emitted types and roles against the schema enums

pub mod classify;
pub mod dsl;
pub mod enhancer;
pub mod error;
pub mod language;
pub mod schema;
pub mod section;

pub use classify::{Classification, RuleClassifier, TokenStrategy, FALLBACK_TYPE};
pub use enhancer::{EnhanceStats, Enhanced, MappingEnhancer};
pub use error::SchemaError;
pub use language::{LanguagePattern, LanguageRegistry};
pub use schema::{SchemaEnums, SchemaValidator, ValidationIssue, ValidationOutcome};
pub use section::SectionFormatter;
