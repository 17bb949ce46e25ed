// src/message.rs
use serde::{Deserialize, Serialize, de::Error as _};
use serde_json::Value;

use crate::services::chatbot::ChatReply;
use crate::services::decoding::DecodingOverrides;

/// Body of `POST /chat`. `message` is optional at the wire level so that a
/// missing field is reported as a bad request rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub options: Option<DecodingOverrides>,
}

impl ChatRequest {
    /// Parse a request body. Only objects are accepted: the derived
    /// deserializer would also match an array to the fields by position.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("request body must be a JSON object"));
        }
        if let Some(options) = value.get("options") {
            if !(options.is_object() || options.is_null()) {
                return Err(serde_json::Error::custom("options must be a JSON object"));
            }
        }
        serde_json::from_value(value)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        let (sentiment, confidence) = match reply.sentiment {
            Some(s) => (Some(s.label), Some(s.score)),
            None => (None, None),
        };
        Self {
            response: reply.response,
            sentiment,
            confidence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
