//! Rule name to canonical UAST type

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::trace;

/// Type assigned when a rule name matches nothing
pub const FALLBACK_TYPE: &str = "Synthetic";

const EXACT_TYPES: &[(&str, &str)] = &[
    // File and root nodes
    ("file", "File"),
    ("program", "File"),
    ("source_file", "File"),
    // Identifiers
    ("identifier", "Identifier"),
    ("blank_identifier", "Identifier"),
    ("field_identifier", "Identifier"),
    ("package_identifier", "Identifier"),
    ("type_identifier", "Identifier"),
    ("variable_identifier", "Identifier"),
    // Literals
    ("string_literal", "Literal"),
    ("number_literal", "Literal"),
    ("integer_literal", "Literal"),
    ("float_literal", "Literal"),
    ("boolean_literal", "Literal"),
    ("null_literal", "Literal"),
    ("imaginary_literal", "Literal"),
    // Functions and methods
    ("function_declaration", "Function"),
    ("function_definition", "Function"),
    ("method_declaration", "Method"),
    ("method_definition", "Method"),
    ("function_type", "Function"),
    ("lambda_expression", "Lambda"),
    ("arrow_function", "Lambda"),
    ("anonymous_function", "Lambda"),
    // Classes and structs
    ("class_declaration", "Class"),
    ("class_definition", "Class"),
    ("struct_declaration", "Struct"),
    ("struct_definition", "Struct"),
    ("interface_declaration", "Interface"),
    ("interface_definition", "Interface"),
    ("enum_declaration", "Enum"),
    ("enum_definition", "Enum"),
    ("enum_member", "EnumMember"),
    // Variables and parameters
    ("variable_declaration", "Variable"),
    ("parameter", "Parameter"),
    ("field_declaration", "Field"),
    ("property_declaration", "Property"),
    ("getter", "Getter"),
    ("setter", "Setter"),
    // Control flow
    ("if_statement", "If"),
    ("for_statement", "Loop"),
    ("while_statement", "Loop"),
    ("do_while_statement", "Loop"),
    ("switch_statement", "Switch"),
    ("case_statement", "Case"),
    ("return_statement", "Return"),
    ("break_statement", "Break"),
    ("continue_statement", "Continue"),
    ("throw_statement", "Throw"),
    ("try_statement", "Try"),
    ("catch_clause", "Catch"),
    ("finally_clause", "Finally"),
    // Operators
    ("binary_expression", "BinaryOp"),
    ("unary_expression", "UnaryOp"),
    ("assignment_statement", "Assignment"),
    ("assignment_expression", "Assignment"),
    // Calls and expressions
    ("call_expression", "Call"),
    ("function_call", "Call"),
    ("method_call", "Call"),
    ("await_expression", "Await"),
    ("yield_expression", "Yield"),
    // Blocks and statements
    ("block", "Block"),
    ("expression_statement", "Synthetic"),
    ("statement", "Synthetic"),
    // Imports and packages
    ("import_declaration", "Import"),
    ("import_statement", "Import"),
    ("package_declaration", "Package"),
    ("module_declaration", "Module"),
    ("namespace_declaration", "Namespace"),
    // Comments and documentation
    ("comment", "Comment"),
    ("doc_string", "DocString"),
    ("documentation_comment", "DocString"),
    // Types and annotations
    ("type_annotation", "TypeAnnotation"),
    ("type_declaration", "Synthetic"),
    ("cast_expression", "Cast"),
    // Collections
    ("array_type", "List"),
    ("slice_type", "List"),
    ("map_type", "Dict"),
    ("list_expression", "List"),
    ("dict_expression", "Dict"),
    ("set_expression", "Set"),
    ("tuple_expression", "Tuple"),
    ("key_value_pair", "KeyValue"),
    ("index_expression", "Index"),
    ("slice_expression", "Slice"),
    ("spread_element", "Spread"),
    // Decorators and attributes
    ("decorator", "Decorator"),
    ("attribute", "Attribute"),
    ("annotation", "Attribute"),
    // Generators and comprehensions
    ("generator_function", "Generator"),
    ("list_comprehension", "Comprehension"),
    ("dict_comprehension", "Comprehension"),
    ("set_comprehension", "Comprehension"),
    // Pattern matching
    ("pattern", "Pattern"),
    ("match_statement", "Match"),
    // Bare keywords carry no structure of their own
    ("if", "Synthetic"),
    ("for", "Synthetic"),
    ("while", "Synthetic"),
    ("return", "Synthetic"),
    ("break", "Synthetic"),
    ("continue", "Synthetic"),
    ("goto", "Synthetic"),
    ("var", "Synthetic"),
    ("const", "Synthetic"),
    ("type", "Synthetic"),
    ("func", "Synthetic"),
    ("struct", "Synthetic"),
    ("interface", "Synthetic"),
    ("map", "Synthetic"),
    ("chan", "Synthetic"),
    ("select", "Synthetic"),
    ("defer", "Synthetic"),
    ("go", "Synthetic"),
    ("range", "Synthetic"),
    ("fallthrough", "Synthetic"),
    ("default", "Synthetic"),
    ("case", "Synthetic"),
    ("switch", "Synthetic"),
    ("else", "Synthetic"),
    ("true", "Synthetic"),
    ("false", "Synthetic"),
    ("nil", "Synthetic"),
];

/// Scanned in order; the first suffix that matches wins.
const SUFFIX_TYPES: &[(&str, &str)] = &[
    // Statements
    ("_statement", "Synthetic"),
    ("_expression", "Synthetic"),
    ("_declaration", "Synthetic"),
    // Identifiers and literals
    ("_identifier", "Identifier"),
    ("_literal", "Literal"),
    // Types and annotations
    ("_type", "Synthetic"),
    ("_annotation", "TypeAnnotation"),
    // Calls and operations
    ("_call", "Call"),
    ("_operation", "Synthetic"),
    ("_operator", "Synthetic"),
    // Blocks and structures
    ("_block", "Block"),
    ("_body", "Block"),
    // Collections
    ("_list", "List"),
    ("_array", "List"),
    ("_dict", "Dict"),
    ("_map", "Dict"),
    ("_set", "Set"),
    ("_tuple", "Tuple"),
    // Functions and methods
    ("_function", "Function"),
    ("_method", "Method"),
    ("_lambda", "Lambda"),
    // Classes and structs
    ("_class", "Class"),
    ("_struct", "Struct"),
    ("_interface", "Interface"),
    ("_enum", "Enum"),
    // Variables and fields
    ("_variable", "Variable"),
    ("_field", "Field"),
    ("_property", "Property"),
    ("_parameter", "Parameter"),
    // Control flow
    ("_if", "If"),
    ("_for", "Loop"),
    ("_while", "Loop"),
    ("_switch", "Switch"),
    ("_case", "Case"),
    ("_return", "Return"),
    ("_break", "Break"),
    ("_continue", "Continue"),
    ("_throw", "Throw"),
    ("_try", "Try"),
    ("_catch", "Catch"),
    ("_finally", "Finally"),
    // Imports and modules
    ("_import", "Import"),
    ("_package", "Package"),
    ("_module", "Module"),
    ("_namespace", "Namespace"),
    // Comments and documentation
    ("_comment", "Comment"),
    ("_doc", "DocString"),
    // Decorators and attributes
    ("_decorator", "Decorator"),
    ("_attribute", "Attribute"),
    // Generators and comprehensions
    ("_generator", "Generator"),
    ("_comprehension", "Comprehension"),
    // Pattern matching
    ("_pattern", "Pattern"),
    ("_match", "Match"),
];

/// Process-wide classification tables, built once on first use.
pub static TYPE_TABLES: Lazy<TypeTables> = Lazy::new(TypeTables::builtin);

/// Exact-name and suffix tables behind [`TypeClassifier`].
#[derive(Debug)]
pub struct TypeTables {
    exact: HashMap<&'static str, &'static str>,
    suffixes: &'static [(&'static str, &'static str)],
}

impl TypeTables {
    fn builtin() -> Self {
        Self {
            exact: EXACT_TYPES.iter().copied().collect(),
            suffixes: SUFFIX_TYPES,
        }
    }

    pub fn exact(&self, rule_name: &str) -> Option<&'static str> {
        self.exact.get(rule_name).copied()
    }

    pub fn suffix(&self, rule_name: &str) -> Option<&'static str> {
        let lower = rule_name.to_lowercase();
        self.suffixes
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|(_, uast_type)| *uast_type)
    }

    /// Every type the tables can produce, fallback included
    pub fn known_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.exact
            .values()
            .chain(self.suffixes.iter().map(|(_, t)| t))
            .copied()
            .chain(std::iter::once(FALLBACK_TYPE))
    }
}

/// Resolves a rule name to a canonical type: exact name, then suffix, then
/// [`FALLBACK_TYPE`].
#[derive(Debug, Clone, Copy)]
pub struct TypeClassifier {
    tables: &'static TypeTables,
}

impl TypeClassifier {
    pub fn new(tables: &'static TypeTables) -> Self {
        Self { tables }
    }

    pub fn classify(&self, rule_name: &str) -> &'static str {
        if let Some(uast_type) = self.tables.exact(rule_name) {
            return uast_type;
        }
        if let Some(uast_type) = self.tables.suffix(rule_name) {
            return uast_type;
        }
        trace!(rule = %rule_name, "No type match, using fallback");
        FALLBACK_TYPE
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new(&TYPE_TABLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let classifier = TypeClassifier::default();
        assert_eq!(classifier.classify("function_declaration"), "Function");
        assert_eq!(classifier.classify("if_statement"), "If");
        assert_eq!(classifier.classify("source_file"), "File");
    }

    #[test]
    fn test_exact_match_beats_suffix() {
        let classifier = TypeClassifier::default();
        // `_statement` would say Synthetic
        assert_eq!(classifier.classify("return_statement"), "Return");
        // `_type` would say Synthetic
        assert_eq!(classifier.classify("array_type"), "List");
        // `_expression` would say Synthetic
        assert_eq!(classifier.classify("call_expression"), "Call");
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let classifier = TypeClassifier::default();
        // No exact hit, `_statement` suffix matches case-insensitively
        assert_eq!(classifier.classify("IF_STATEMENT"), "Synthetic");
        assert_eq!(classifier.classify("Generic_Identifier"), "Identifier");
    }

    #[test]
    fn test_suffix_table_order_breaks_ties() {
        let classifier = TypeClassifier::default();
        assert_eq!(classifier.classify("else_if"), "If");
        assert_eq!(classifier.classify("shorthand_property_identifier"), "Identifier");
        // Ends with `_type_annotation`: only `_annotation` matches at the end
        assert_eq!(classifier.classify("return_type_annotation"), "TypeAnnotation");
        // `_expression` is declared before `_call`
        assert_eq!(classifier.classify("macro_call_expression"), "Synthetic");
    }

    #[test]
    fn test_fallback() {
        let classifier = TypeClassifier::default();
        assert_eq!(classifier.classify("unknown_widget_thing"), FALLBACK_TYPE);
        assert_eq!(classifier.classify(""), FALLBACK_TYPE);
    }

    #[test]
    fn test_known_types_include_fallback() {
        assert!(TYPE_TABLES.known_types().any(|t| t == FALLBACK_TYPE));
        assert!(TYPE_TABLES.known_types().any(|t| t == "Comprehension"));
    }
}
