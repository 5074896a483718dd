//! Plain-text rendering of parsed chains and analysis reports

use crate::analysis::{field_label, AnalysisResponse, SourceQuote};
use crate::chain::{pattern::ARROW, ChainParser, ParsedChain};
use serde_json::Value;
use std::fmt::Write;

/// Output format for the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const RESULT_MARK: &str = "⭐ ";
const REASON_MARK: &str = "💡 ";

/// Render one chain. `index` is zero-based; the header shows it one-based.
pub fn render_chain(chain: &ParsedChain, index: usize) -> String {
    let mut out = format!("链路 {}\n", index + 1);

    let steps: Vec<String> = chain
        .steps
        .iter()
        .map(|step| {
            if step.is_result {
                format!("{}{}", RESULT_MARK, step.text)
            } else {
                step.text.clone()
            }
        })
        .collect();
    out.push_str(&steps.join(&format!(" {} ", ARROW)));
    out.push('\n');

    if let Some(reason) = &chain.reason {
        out.push_str(REASON_MARK);
        out.push_str(reason);
        out.push('\n');
    }

    out
}

/// Render every chain, separated by blank lines.
pub fn render_chains(chains: &[ParsedChain]) -> String {
    chains
        .iter()
        .enumerate()
        .map(|(idx, chain)| render_chain(chain, idx))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a complete analysis report.
pub fn render_report(response: &AnalysisResponse, parser: &ChainParser) -> String {
    let mut out = String::new();

    let label = response.event_type.label();
    match response.event_type.icon() {
        Some(icon) => section(&mut out, &format!("📊 分析结果 · {} {}", icon, label)),
        None => section(&mut out, &format!("📊 分析结果 · {}", label)),
    }

    section(&mut out, "💡 核心解读");
    let interpretation = &response.interpretation;
    let _ = writeln!(out, "{}", interpretation.core_content);
    let _ = writeln!(
        out,
        "情绪: {}  置信度: {}%",
        interpretation.sentiment, interpretation.confidence
    );

    section(&mut out, "🔗 传导链路");
    let chains = response.chains_with(parser);
    if chains.is_empty() {
        out.push_str("（无）\n");
    } else {
        out.push_str(&render_chains(&chains));
    }

    section(&mut out, "⚠️ 风险提示");
    for risk in &response.risks {
        let _ = writeln!(out, "- {}", risk);
    }
    if !response.general_risks.is_empty() {
        let _ = writeln!(out, "一般风险: {}", response.general_risks.join("、"));
    }

    if !response.extracted_facts.is_empty() {
        section(&mut out, "📋 提取的事实");
        for (key, value) in &response.extracted_facts {
            render_fact(&mut out, key, value);
        }
    }

    out.push('\n');
    if !response.disclaimer.is_empty() {
        let _ = writeln!(out, "{}", response.disclaimer);
    }
    let _ = writeln!(
        out,
        "追踪ID: {} | 耗时: {}ms",
        response.trace_id, response.latency_ms
    );

    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(title);
    out.push('\n');
}

fn render_fact(out: &mut String, key: &str, value: &Value) {
    let label = field_label(key);

    if key == "source_quotes" {
        let quotes: Vec<SourceQuote> = serde_json::from_value(value.clone()).unwrap_or_default();
        if quotes.is_empty() {
            return;
        }
        let _ = writeln!(out, "{}:", label);
        for quote in quotes {
            let _ = writeln!(out, "  📄 「{}」", quote.quote);
            if !quote.why.is_empty() {
                let _ = writeln!(out, "     {}", quote.why);
            }
        }
        return;
    }

    if let Some(text) = fact_text(value) {
        let _ = writeln!(out, "{}: {}", label, text);
    }
}

/// Flatten a fact value for display; null and empty values are skipped.
fn fact_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(fact_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("、"))
            }
        }
        other => Some(other.to_string()),
    }
}
