//! Chain parsing checked against a regular-expression reference model
//!
//! The reference reproduces the classic regex formulation of the parser:
//! reason `[（(]([^）)]+)[）)]`, global removal of the same pattern, and
//! splitting on `\s*(?:→|->)\s*`. The hand-written parser must agree with it
//! on arbitrary input.

use pathchain::{parse_chain_text, parse_multiple_chains, ChainStep, ParsedChain};
use proptest::prelude::*;
use regex_lite::Regex;

const KEYWORDS: [&str; 5] = ["增长", "提升", "提高", "改善", "优化"];

struct ReferenceParser {
    paren: Regex,
    arrow: Regex,
}

impl ReferenceParser {
    fn new() -> Self {
        Self {
            paren: Regex::new(r"[（(]([^）)]+)[）)]").unwrap(),
            arrow: Regex::new(r"\s*(?:→|->)\s*").unwrap(),
        }
    }

    fn parse_line(&self, line: &str) -> ParsedChain {
        let reason = self
            .paren
            .captures(line)
            .map(|caps| caps.get(1).unwrap().as_str().to_string());
        let clean = self.paren.replace_all(line, "");
        let texts: Vec<String> = self
            .arrow
            .split(clean.trim())
            .map(|s| s.replace("\\n", " ").trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let n = texts.len();
        let steps = texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                let is_result = idx + 1 == n || KEYWORDS.iter().any(|k| text.contains(k));
                ChainStep { text, is_result }
            })
            .collect();
        ParsedChain { steps, reason }
    }

    fn parse(&self, path_text: &str) -> Vec<ParsedChain> {
        path_text
            .replace("\\n", "\n")
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_line(line))
            .collect()
    }
}

fn path_text() -> impl Strategy<Value = String> {
    let tokens = vec![
        "A", "B", "公司", "增长", "提升", "合同", " ", "  ", "\t", "→", "->", "-", ">", "(", ")",
        "（", "）", "\n", "\\n", "\\", "n", "　",
    ];
    prop::collection::vec(prop::sample::select(tokens), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn agrees_with_reference(text in path_text()) {
        let reference = ReferenceParser::new();
        prop_assert_eq!(parse_multiple_chains(&text), reference.parse(&text));
    }

    #[test]
    fn single_line_agrees_with_reference(text in path_text()) {
        let reference = ReferenceParser::new();
        prop_assert_eq!(parse_chain_text(&text), reference.parse_line(&text));
    }

    #[test]
    fn one_chain_per_nonblank_line(text in path_text()) {
        let normalized = text.replace("\\n", "\n");
        let expected = normalized.split('\n').filter(|l| !l.trim().is_empty()).count();
        prop_assert_eq!(parse_multiple_chains(&text).len(), expected);
    }

    #[test]
    fn escaping_newlines_is_transparent(text in path_text()) {
        let escaped = text.replace('\n', "\\n");
        prop_assert_eq!(parse_multiple_chains(&text), parse_multiple_chains(&escaped));
    }

    #[test]
    fn last_step_is_always_result(text in path_text()) {
        for chain in parse_multiple_chains(&text) {
            if let Some(last) = chain.steps.last() {
                prop_assert!(last.is_result);
            }
        }
    }
}

#[test]
fn blank_inputs_yield_nothing() {
    for input in ["", " ", "\n\n", "\\n", " \t \\n \n "] {
        assert!(parse_multiple_chains(input).is_empty(), "input {:?}", input);
    }
}

#[test]
fn contract_announcement_path() {
    let text = "XX公司 → 签订设备采购合同 → 采购高价值设备 → 提升生产能力 → 增加市场销售 → 带动业绩增长（合同金额大，覆盖多年）";
    let chains = parse_multiple_chains(text);
    assert_eq!(chains.len(), 1);

    let chain = &chains[0];
    assert_eq!(chain.reason.as_deref(), Some("合同金额大，覆盖多年"));
    let flags: Vec<bool> = chain.steps.iter().map(|s| s.is_result).collect();
    assert_eq!(flags, vec![false, false, false, true, false, true]);
    assert_eq!(chain.steps[5].text, "带动业绩增长");
}

#[test]
fn two_parentheticals_keep_first_reason() {
    let chain = parse_chain_text("政策出台（利好）→ 需求释放 (短期) → 收入");
    assert_eq!(chain.reason.as_deref(), Some("利好"));
    let texts: Vec<&str> = chain.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["政策出台", "需求释放", "收入"]);
}
