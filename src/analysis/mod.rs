//! Analysis service payloads
//!
//! The transmission path text arrives in the `path_text` field of the
//! analysis service's JSON response. This module models that response and
//! the shapes it travels in:
//!
//! - a bare [`AnalysisResponse`]
//! - a stored [`Message`] carrying the response
//! - either of the above inside an [`ApiEnvelope`] (`{code, message, data}`)
//!
//! [`load_response`] accepts all of them.

mod facts;
mod types;

pub use facts::{
    field_label, EarningsForecastFacts, ExtractedFacts, IndustryPolicyFacts, MajorContractFacts,
    ProductPriceIncreaseFacts,
};
pub use types::{
    AnalysisResponse, AnalyzeRequest, ApiEnvelope, EventType, HealthCheckResponse,
    Interpretation, Message, Sentiment, SourceQuote, SUCCESS_CODE,
};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding analysis payloads
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Unexpected payload: {0}")]
    UnexpectedShape(String),
}

/// Result type for analysis payload operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Decode an analysis response from any supported payload shape.
pub fn load_response(json: &str) -> AnalysisResult<AnalysisResponse> {
    let value: Value = serde_json::from_str(json)?;
    response_from_value(value)
}

/// Same as [`load_response`] for an already parsed JSON value.
pub fn response_from_value(mut value: Value) -> AnalysisResult<AnalysisResponse> {
    if !value.is_object() {
        return Err(AnalysisError::UnexpectedShape(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    if is_envelope(&value) {
        let envelope: ApiEnvelope<Value> = serde_json::from_value(value)?;
        tracing::debug!(code = envelope.code, "unwrapping API envelope");
        value = envelope.into_result()?;
    }

    if value.get("response").is_some_and(Value::is_object) {
        let message: Message = serde_json::from_value(value)?;
        tracing::debug!(id = %message.id, "unwrapping stored message");
        return Ok(message.response);
    }

    Ok(serde_json::from_value(value)?)
}

fn is_envelope(value: &Value) -> bool {
    value.get("code").is_some_and(Value::is_i64) && value.get("path_text").is_none()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
