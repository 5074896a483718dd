//! Wire types exchanged with the announcement analysis service

use crate::chain::{ChainParser, ParsedChain};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::facts::ExtractedFacts;
use super::AnalysisError;

/// Envelope code the service uses for success
pub const SUCCESS_CODE: i64 = 200;

/// Announcement category submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    MajorContract,
    IndustryPolicy,
    EarningsForecast,
    ProductPriceIncrease,
    /// Any category the client does not know about
    Other(String),
}

impl EventType {
    pub const KNOWN: [EventType; 4] = [
        EventType::MajorContract,
        EventType::IndustryPolicy,
        EventType::EarningsForecast,
        EventType::ProductPriceIncrease,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventType::MajorContract => "major_contract",
            EventType::IndustryPolicy => "industry_policy",
            EventType::EarningsForecast => "earnings_forecast",
            EventType::ProductPriceIncrease => "product_price_increase",
            EventType::Other(s) => s,
        }
    }

    /// Display label; unknown categories show their raw name
    pub fn label(&self) -> &str {
        match self {
            EventType::MajorContract => "重大合同",
            EventType::IndustryPolicy => "行业政策",
            EventType::EarningsForecast => "业绩预告",
            EventType::ProductPriceIncrease => "产品提价",
            EventType::Other(s) => s,
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            EventType::MajorContract => Some("📄"),
            EventType::IndustryPolicy => Some("📜"),
            EventType::EarningsForecast => Some("📈"),
            EventType::ProductPriceIncrease => Some("💰"),
            EventType::Other(_) => None,
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "major_contract" => EventType::MajorContract,
            "industry_policy" => EventType::IndustryPolicy,
            "earnings_forecast" => EventType::EarningsForecast,
            "product_price_increase" => EventType::ProductPriceIncrease,
            _ => EventType::Other(s),
        }
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        EventType::from(s.to_string())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall tone of an announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
    Unknown,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Mixed => "mixed",
            Sentiment::Unknown => "unknown",
        }
    }
}

impl From<String> for Sentiment {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            "mixed" => Sentiment::Mixed,
            _ => Sentiment::Unknown,
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.as_str().to_string()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline reading of the announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub core_content: String,
    pub sentiment: Sentiment,
    /// Confidence percentage, 0-100
    pub confidence: f64,
}

/// A verbatim quote backing an extracted fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuote {
    pub quote: String,
    #[serde(default)]
    pub why: String,
}

/// Result of analyzing one announcement.
///
/// `extracted_facts` is kept as a raw JSON object because its shape depends
/// on `event_type`; use [`facts`](Self::facts) for the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub event_type: EventType,
    pub interpretation: Interpretation,
    #[serde(default)]
    pub extracted_facts: serde_json::Map<String, serde_json::Value>,
    /// Transmission path narrative, one chain per line
    pub path_text: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub general_risks: Vec<String>,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub trace_id: String,
    #[serde(default)]
    pub latency_ms: f64,
}

impl AnalysisResponse {
    /// Parse `path_text` with the default keyword set
    pub fn chains(&self) -> Vec<ParsedChain> {
        crate::chain::parse_multiple_chains(&self.path_text)
    }

    pub fn chains_with(&self, parser: &ChainParser) -> Vec<ParsedChain> {
        parser.parse(&self.path_text)
    }

    /// Decode `extracted_facts` according to `event_type`
    pub fn facts(&self) -> Result<ExtractedFacts, AnalysisError> {
        ExtractedFacts::decode(&self.event_type, &self.extracted_facts)
    }
}

/// Request body for `POST /analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub event_type: EventType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(event_type: EventType, text: impl Into<String>) -> Self {
        Self {
            event_type,
            text: text.into(),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

/// `{code, message, data}` wrapper around every API payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Unwrap the payload, turning a failure code or missing data into an error
    pub fn into_result(self) -> Result<T, AnalysisError> {
        if !self.is_success() {
            return Err(AnalysisError::Api {
                code: self.code,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| AnalysisError::UnexpectedShape("envelope has no data".into()))
    }
}

/// A stored conversation message with its analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub trace_id: String,
    #[serde(rename = "type")]
    pub message_type: EventType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub response: AnalysisResponse,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub llm_base_url: String,
    pub llm_model: String,
}
