//! Per-event typed views of `extracted_facts`

use super::types::{EventType, SourceQuote};
use super::AnalysisError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MajorContractFacts {
    pub company: Option<String>,
    pub counterparty: Option<String>,
    pub amount: Option<String>,
    pub scope: Option<String>,
    pub duration: Option<String>,
    pub sign_date: Option<String>,
    pub conditions: Option<String>,
    pub materiality: Option<String>,
    pub source_quotes: Vec<SourceQuote>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryPolicyFacts {
    pub policy_title: Option<String>,
    pub issuer: Option<String>,
    pub target_domain: Option<String>,
    pub key_measures: Vec<String>,
    pub timeline: Option<String>,
    pub constraints: Vec<String>,
    pub source_quotes: Vec<SourceQuote>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningsForecastFacts {
    pub company: Option<String>,
    pub period: Option<String>,
    pub revenue_range: Option<String>,
    pub profit_range: Option<String>,
    pub profit_yoy: Option<String>,
    pub profit_qoq: Option<String>,
    pub non_gaap_profit_range: Option<String>,
    pub drivers: Vec<String>,
    pub one_off_items: Option<String>,
    pub source_quotes: Vec<SourceQuote>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPriceIncreaseFacts {
    pub company: Option<String>,
    pub products: Vec<String>,
    pub price_change: Option<String>,
    pub effective_date: Option<String>,
    pub reasons: Vec<String>,
    pub pass_through: Option<String>,
    pub source_quotes: Vec<SourceQuote>,
}

/// Facts decoded according to the response's event type
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedFacts {
    MajorContract(MajorContractFacts),
    IndustryPolicy(IndustryPolicyFacts),
    EarningsForecast(EarningsForecastFacts),
    ProductPriceIncrease(ProductPriceIncreaseFacts),
    /// Custom event types keep the raw object
    Untyped(Map<String, Value>),
}

impl ExtractedFacts {
    pub fn decode(event_type: &EventType, raw: &Map<String, Value>) -> Result<Self, AnalysisError> {
        let value = Value::Object(raw.clone());
        let facts = match event_type {
            EventType::MajorContract => Self::MajorContract(serde_json::from_value(value)?),
            EventType::IndustryPolicy => Self::IndustryPolicy(serde_json::from_value(value)?),
            EventType::EarningsForecast => Self::EarningsForecast(serde_json::from_value(value)?),
            EventType::ProductPriceIncrease => {
                Self::ProductPriceIncrease(serde_json::from_value(value)?)
            }
            EventType::Other(_) => Self::Untyped(raw.clone()),
        };
        Ok(facts)
    }

    /// Quotes backing the facts, whatever the event type
    pub fn source_quotes(&self) -> Vec<SourceQuote> {
        match self {
            Self::MajorContract(f) => f.source_quotes.clone(),
            Self::IndustryPolicy(f) => f.source_quotes.clone(),
            Self::EarningsForecast(f) => f.source_quotes.clone(),
            Self::ProductPriceIncrease(f) => f.source_quotes.clone(),
            Self::Untyped(raw) => raw
                .get("source_quotes")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
        }
    }
}

/// Display label for a fact key.
///
/// Unknown keys are title-cased with underscores as spaces.
pub fn field_label(key: &str) -> String {
    let known = match key {
        "company" => "公司名称",
        "counterparty" => "合作方",
        "amount" => "合同金额",
        "scope" => "合同范围",
        "duration" => "履行期限",
        "sign_date" => "签订日期",
        "conditions" => "合同条件",
        "materiality" => "重要性说明",
        "policy_name" | "policy_title" => "政策名称",
        "issuing_authority" | "issuer" => "发布机构",
        "target_year" => "目标年份",
        "key_targets" => "关键目标",
        "support_measures" | "key_measures" => "支持措施",
        "regulatory_requirements" => "监管要求",
        "forecast_year" => "预告年份",
        "net_profit_range" => "归母净利润",
        "net_profit_growth" => "净利润增长",
        "adjusted_net_profit_range" => "扣非净利润",
        "adjusted_net_profit_growth" => "扣非增长",
        "growth_drivers" => "增长驱动",
        "previous_year_net_profit" => "上年净利润",
        "product_category" => "产品类别",
        "price_increase_range" => "提价幅度",
        "effective_date" => "生效日期",
        "reasons" => "提价原因",
        "source_quotes" => "来源引用",
        _ => return title_case(key),
    };
    known.to_string()
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
