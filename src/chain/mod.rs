//! Transmission-path parsing
//!
//! Converts free-form causal-chain text into structured step sequences.
//! A path text holds one chain per line:
//!
//! ```text
//! 公司签订合同 → 提升产能 → 带动业绩增长（合同金额大）
//! 政策发布 -> 扩大市场
//! ```
//!
//! Each line becomes a [`ParsedChain`]: its arrow-separated steps, each
//! flagged as a result node or not, plus the first parenthetical as the
//! chain's reason. Parsing is total: every string input produces a value.
//!
//! # Example
//!
//! ```
//! use pathchain::chain::parse_multiple_chains;
//!
//! let chains = parse_multiple_chains("A → B → C（测试理由）\\nD -> E");
//! assert_eq!(chains.len(), 2);
//! assert_eq!(chains[0].reason.as_deref(), Some("测试理由"));
//! assert!(chains[0].steps[2].is_result);
//! ```

mod keywords;
pub mod pattern;

pub use keywords::{ResultKeywords, DEFAULT_RESULT_KEYWORDS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// One node of a causal chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStep {
    /// Cleaned segment text
    pub text: String,
    /// Whether this node is an outcome rather than an intermediate cause
    pub is_result: bool,
}

impl ChainStep {
    pub fn new(text: impl Into<String>, is_result: bool) -> Self {
        Self {
            text: text.into(),
            is_result,
        }
    }
}

/// A single parsed chain line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChain {
    pub steps: Vec<ChainStep>,
    /// Rationale taken from the first parenthetical in the line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ParsedChain {
    /// Steps classified as results
    pub fn result_steps(&self) -> impl Iterator<Item = &ChainStep> {
        self.steps.iter().filter(|s| s.is_result)
    }

    /// True when the line had no usable segments (e.g. only a parenthetical)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for ParsedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            if idx > 0 {
                write!(f, " {} ", pattern::ARROW)?;
            }
            f.write_str(&step.text)?;
        }
        if let Some(reason) = &self.reason {
            write!(f, "（{}）", reason)?;
        }
        Ok(())
    }
}

/// Chain parser with a configurable result keyword set.
///
/// `ChainParser::default()` reproduces the stock classification. The parser
/// holds no mutable state, so one instance can be shared freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainParser {
    keywords: ResultKeywords,
}

impl ChainParser {
    pub fn new(keywords: ResultKeywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &ResultKeywords {
        &self.keywords
    }

    /// Parse a path text that may hold several chains.
    ///
    /// Escaped newlines (`\` + `n`) are treated as real newlines. Lines are
    /// trimmed and blank lines skipped; each remaining line yields exactly
    /// one chain, in input order.
    pub fn parse(&self, path_text: &str) -> Vec<ParsedChain> {
        let normalized = pattern::normalize_newlines(path_text);

        let chains: Vec<ParsedChain> = normalized
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_line(line))
            .collect();

        tracing::trace!(chains = chains.len(), "parsed path text");
        chains
    }

    /// Parse one chain line.
    ///
    /// The first parenthetical becomes the reason and every parenthetical
    /// is removed before splitting on arrows. A step is a result when it is
    /// last or contains a result keyword.
    pub fn parse_line(&self, line: &str) -> ParsedChain {
        let reason = pattern::first_parenthetical(line).map(str::to_string);
        let stripped = pattern::strip_parentheticals(line);

        let texts: Vec<String> = pattern::split_arrows(stripped.trim())
            .into_iter()
            .map(|segment| segment.replace(pattern::ESCAPED_NEWLINE, " ").trim().to_string())
            .filter(|segment| !segment.is_empty())
            .collect();

        let last = texts.len().saturating_sub(1);
        let steps = texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                let is_result = idx == last || self.keywords.matches(&text);
                ChainStep { text, is_result }
            })
            .collect();

        ParsedChain { steps, reason }
    }
}

fn default_parser() -> &'static ChainParser {
    static PARSER: OnceLock<ChainParser> = OnceLock::new();
    PARSER.get_or_init(ChainParser::default)
}

/// Parse a multi-line path text with the default keyword set.
pub fn parse_multiple_chains(path_text: &str) -> Vec<ParsedChain> {
    default_parser().parse(path_text)
}

/// Parse a single chain line with the default keyword set.
pub fn parse_chain_text(line: &str) -> ParsedChain {
    default_parser().parse_line(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(text: &str, is_result: bool) -> ChainStep {
        ChainStep::new(text, is_result)
    }

    #[test]
    fn test_fullwidth_reason() {
        let chain = parse_chain_text("A → B → C（测试理由）");
        assert_eq!(
            chain.steps,
            vec![step("A", false), step("B", false), step("C", true)]
        );
        assert_eq!(chain.reason.as_deref(), Some("测试理由"));
    }

    #[test]
    fn test_ascii_arrow_without_reason() {
        let chain = parse_chain_text("A -> B");
        assert_eq!(chain.steps, vec![step("A", false), step("B", true)]);
        assert_eq!(chain.reason, None);
    }

    #[test]
    fn test_keyword_result_before_last() {
        let chains = parse_multiple_chains("公司签订合同 → 提升产能 → 带动业绩增长\n政策发布 → 扩大市场");
        assert_eq!(chains.len(), 2);
        assert_eq!(
            chains[0].steps,
            vec![
                step("公司签订合同", false),
                step("提升产能", true),
                step("带动业绩增长", true),
            ]
        );
        assert_eq!(
            chains[1].steps,
            vec![step("政策发布", false), step("扩大市场", true)]
        );
    }

    #[test]
    fn test_only_first_parenthetical_is_reason() {
        let chain = parse_chain_text("A (first) → B (second) → C");
        assert_eq!(chain.reason.as_deref(), Some("first"));
        assert_eq!(
            chain.steps,
            vec![step("A", false), step("B", false), step("C", true)]
        );
    }

    #[test]
    fn test_single_step_without_separator() {
        let chains = parse_multiple_chains("  just one node  ");
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].steps, vec![step("just one node", true)]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_multiple_chains("").is_empty());
        assert!(parse_multiple_chains("   \n\t\n").is_empty());
        assert!(parse_multiple_chains("\\n\\n  \\n").is_empty());
    }

    #[test]
    fn test_escaped_newlines_split_chains() {
        let chains = parse_multiple_chains("A → B\\nC → D");
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[1].steps[0].text, "C");
    }

    #[test]
    fn test_escaped_newline_inside_line_becomes_space() {
        let chain = parse_chain_text("A\\nB → C");
        assert_eq!(chain.steps[0].text, "A B");
    }

    #[test]
    fn test_unbalanced_parenthesis_kept_in_text() {
        let chain = parse_chain_text("A (unclosed → B");
        assert_eq!(chain.reason, None);
        assert_eq!(chain.steps, vec![step("A (unclosed", false), step("B", true)]);
    }

    #[test]
    fn test_nested_parenthesis_first_closer() {
        let chain = parse_chain_text("A (b (c) d) → E");
        assert_eq!(chain.reason.as_deref(), Some("b (c"));
        assert_eq!(chain.steps, vec![step("A  d)", false), step("E", true)]);
    }

    #[test]
    fn test_reason_only_line_has_no_steps() {
        let chain = parse_chain_text("（only a reason）");
        assert!(chain.is_empty());
        assert_eq!(chain.reason.as_deref(), Some("only a reason"));
    }

    #[test]
    fn test_empty_segments_dropped() {
        let chain = parse_chain_text("→ A →→ B ->");
        assert_eq!(chain.steps, vec![step("A", false), step("B", true)]);
    }

    #[test]
    fn test_custom_keywords() {
        let parser = ChainParser::new(ResultKeywords::new(["margin"]));
        let chain = parser.parse_line("price hike -> margin expansion -> earnings");
        assert_eq!(
            chain.steps,
            vec![
                step("price hike", false),
                step("margin expansion", true),
                step("earnings", true),
            ]
        );

        let chain = parser.parse_line("提升产能 → 收入");
        assert!(!chain.steps[0].is_result);
    }

    #[test]
    fn test_result_steps_and_display() {
        let chain = parse_chain_text("签约 -> 提升产能 -> 利润（订单充足）");
        let results: Vec<_> = chain.result_steps().map(|s| s.text.as_str()).collect();
        assert_eq!(results, vec!["提升产能", "利润"]);
        assert_eq!(chain.to_string(), "签约 → 提升产能 → 利润（订单充足）");
    }

    #[test]
    fn test_serialized_shape() {
        let chain = parse_chain_text("A -> B");
        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "steps": [
                    { "text": "A", "isResult": false },
                    { "text": "B", "isResult": true }
                ]
            })
        );
    }
}
