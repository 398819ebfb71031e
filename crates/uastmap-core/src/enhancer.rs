//! In-place enhancement of draft mapping text
//!
//! For every rule, the enhancer locates the `uast(...)` block that follows
//! the rule header and patches it:
//! - inserts `token: "<strategy>",` unless the block already has a token field
//! - inserts `roles: "<r1>", "<r2>",` unless the block already has roles, or
//!   no roles were inferred
//! - corrects a `type:` value that is clearly wrong (a stray `"If"`, or the
//!   generic fallback where a specific type is known)
//!
//! New fields go immediately before the first direct field of the block and
//! copy its indentation. Everything else is passed through byte for byte, so
//! running the enhancer on its own output changes nothing.

use crate::classify::{Classification, RuleClassifier, FALLBACK_TYPE};
use crate::dsl::{self, BLOCK_OPEN_MARKER, MAPPING_CALL_MARKER, RULE_DELIMITER};
use serde::Serialize;
use tracing::{debug, info};

/// Counters for one enhancement pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnhanceStats {
    /// Mapping blocks visited
    pub rules: usize,
    pub tokens_added: usize,
    pub roles_added: usize,
    pub types_corrected: usize,
}

/// Rewritten text and what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhanced {
    pub text: String,
    pub stats: EnhanceStats,
}

/// Parenthesis state of a mapping block scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    OutsideBlock,
    InBlock(usize),
}

impl BlockState {
    /// State after the line holding the block-open marker, or `None` if the
    /// line opens no block.
    pub fn open(line: &str) -> Option<Self> {
        let start = line.find(BLOCK_OPEN_MARKER)? + BLOCK_OPEN_MARKER.len();
        Some(Self::from_depth(dsl::track_depth(1, &line[start..])))
    }

    /// State after feeding one more line of the block.
    pub fn advance(self, line: &str) -> Self {
        match self {
            Self::OutsideBlock => Self::OutsideBlock,
            Self::InBlock(depth) => Self::from_depth(dsl::track_depth(depth, line)),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::OutsideBlock => 0,
            Self::InBlock(depth) => *depth,
        }
    }

    fn from_depth(depth: usize) -> Self {
        if depth == 0 {
            Self::OutsideBlock
        } else {
            Self::InBlock(depth)
        }
    }
}

/// Lines of one `uast(...)` block, from the opening line through the line
/// that closes it.
#[derive(Debug)]
pub struct MappingBlock<'a> {
    lines: &'a [&'a str],
    /// Nesting depth after each line
    depths: Vec<usize>,
    /// False when input ended before the block closed
    pub terminated: bool,
}

impl<'a> MappingBlock<'a> {
    /// Collect the block opening at `lines[0]`.
    ///
    /// An unterminated block runs to the end of `lines`.
    pub fn collect(lines: &'a [&'a str]) -> Option<Self> {
        let mut state = BlockState::open(lines.first()?)?;
        let mut depths = vec![state.depth()];

        for line in &lines[1..] {
            if state == BlockState::OutsideBlock {
                break;
            }
            state = state.advance(line);
            depths.push(state.depth());
        }

        Some(Self {
            lines: &lines[..depths.len()],
            terminated: state == BlockState::OutsideBlock,
            depths,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_token_field(&self) -> bool {
        self.lines.iter().any(|line| dsl::has_token_field(line))
    }

    pub fn has_roles_field(&self) -> bool {
        self.lines.iter().any(|line| dsl::has_roles_field(line))
    }

    /// Index of the first line that is a direct field of the block: it
    /// starts at depth 1 and does not close the block.
    pub fn first_field_line(&self) -> Option<usize> {
        (1..self.lines.len()).find(|&i| self.depths[i - 1] == 1 && self.depths[i] >= 1)
    }
}

/// Where the scan stands between blocks
#[derive(Debug)]
enum ScanState<'a> {
    /// Between rules
    Outside,
    /// A rule header was seen; its block has not opened yet
    AwaitingBlock { rule_name: &'a str },
}

/// Patches draft mapping text with inferred metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingEnhancer {
    classifier: RuleClassifier,
}

impl MappingEnhancer {
    pub fn new(classifier: RuleClassifier) -> Self {
        Self { classifier }
    }

    /// Enhance `content` and return only the rewritten text.
    pub fn enhance_text(&self, content: &str) -> String {
        self.enhance(content).text
    }

    pub fn enhance(&self, content: &str) -> Enhanced {
        let mut stats = EnhanceStats::default();

        if dsl::is_blank(content) {
            return Enhanced {
                text: content.to_string(),
                stats,
            };
        }

        info!(
            rules = content.matches(MAPPING_CALL_MARKER).count(),
            "Enhancing UAST mappings"
        );

        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let lines: Vec<&str> = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let mut output: Vec<String> = Vec::with_capacity(lines.len());
        let mut state = ScanState::Outside;
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index];

            let rule_name = match state {
                ScanState::Outside => {
                    if dsl::is_language_header(line) || dsl::is_blank(line) {
                        output.push(line.to_string());
                        index += 1;
                        continue;
                    }
                    if !is_rule_header(line) {
                        output.push(line.to_string());
                        index += 1;
                        continue;
                    }
                    dsl::extract_rule_name(line)
                }
                ScanState::AwaitingBlock { rule_name } => {
                    // A later header, complete or not, abandons a rule whose block never opened
                    if line.contains(RULE_DELIMITER) {
                        dsl::extract_rule_name(line)
                    } else {
                        rule_name
                    }
                }
            };

            match MappingBlock::collect(&lines[index..]) {
                Some(block) => {
                    self.rewrite_block(rule_name, &block, &mut output, &mut stats);
                    index += block.len();
                    state = ScanState::Outside;
                }
                None => {
                    output.push(line.to_string());
                    index += 1;
                    state = ScanState::AwaitingBlock { rule_name };
                }
            }
        }

        debug!(
            rules = stats.rules,
            tokens_added = stats.tokens_added,
            roles_added = stats.roles_added,
            types_corrected = stats.types_corrected,
            "Enhancement completed"
        );

        Enhanced {
            text: output.join(line_ending),
            stats,
        }
    }

    fn rewrite_block(
        &self,
        rule_name: &str,
        block: &MappingBlock<'_>,
        output: &mut Vec<String>,
        stats: &mut EnhanceStats,
    ) {
        let classification = self.classifier.classify(rule_name);
        let insert_at = block.first_field_line();
        let needs_token = !block.has_token_field();
        let needs_roles = !block.has_roles_field() && !classification.roles.is_empty();

        stats.rules += 1;
        if !block.terminated {
            debug!(rule = %rule_name, "Mapping block not closed before end of input");
        }

        for (i, line) in block.lines.iter().enumerate() {
            if Some(i) == insert_at {
                let indent = dsl::indentation(line);
                if needs_token {
                    output.push(format!(
                        "{}token: \"{}\",",
                        indent, classification.token_strategy
                    ));
                    stats.tokens_added += 1;
                    debug!(
                        rule = %rule_name,
                        token = %classification.token_strategy,
                        "Added token strategy"
                    );
                }
                if needs_roles {
                    output.push(format!(
                        "{}roles: {},",
                        indent,
                        dsl::quoted_list(&classification.roles)
                    ));
                    stats.roles_added += 1;
                    debug!(rule = %rule_name, roles = ?classification.roles, "Added roles");
                }
            }

            match corrected_type_line(line, rule_name, &classification) {
                Some(fixed) => {
                    stats.types_corrected += 1;
                    debug!(rule = %rule_name, uast_type = %classification.uast_type, "Corrected type");
                    output.push(fixed);
                }
                None => output.push(line.to_string()),
            }
        }
    }
}

fn is_rule_header(line: &str) -> bool {
    line.contains(RULE_DELIMITER) || line.contains(MAPPING_CALL_MARKER)
}

/// Rewritten line when its `type:` value must change.
///
/// Only two values are ever overridden: `"If"` on a rule that is not an if
/// rule, and the fallback type where classification found something better.
fn corrected_type_line(
    line: &str,
    rule_name: &str,
    classification: &Classification,
) -> Option<String> {
    let current = dsl::type_value(line)?;
    let inferred = classification.uast_type;

    let stray_if = current == "If" && !matches!(rule_name, "if" | "if_statement");
    let upgradable = current == FALLBACK_TYPE && inferred != FALLBACK_TYPE;

    if (stray_if || upgradable) && current != inferred {
        dsl::replace_type_value(line, inferred)
    } else {
        None
    }
}
