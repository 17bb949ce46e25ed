// src/services/inference_client.rs
//! HTTP client for a hosted inference backend speaking the Hugging Face
//! Inference API shape: `POST {base}/models/{model}` with `{"inputs", "parameters"}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decoding::DecodingConfig;
use super::generator::{InferenceError, InferenceFuture, TextGenerator};
use super::sentiment::{Sentiment, SentimentClassifier, top_sentiment};

#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
    return_full_text: Option<bool>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters<'a>,
    options: RequestOptions,
}

#[derive(Serialize)]
struct GenerateParameters<'a> {
    #[serde(flatten)]
    decoding: &'a DecodingConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_full_text: Option<bool>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

const OPTIONS: RequestOptions = RequestOptions { wait_for_model: true };

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateOutput {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyOutput {
    Nested(Vec<Vec<Sentiment>>),
    Flat(Vec<Sentiment>),
}

impl InferenceClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_token: None,
            return_full_text: None,
        }
    }

    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    pub fn with_return_full_text(mut self, return_full_text: Option<bool>) -> Self {
        self.return_full_text = return_full_text;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }

    async fn post<B: Serialize>(&self, body: &B) -> Result<Value, InferenceError> {
        let mut request = self.http.post(self.endpoint()).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value = serde_json::from_str::<Value>(&text).ok();

        // The backend reports model failures as `{"error": ...}`, sometimes with a 2xx status.
        if let Some(message) = value.as_ref().and_then(backend_error) {
            tracing::warn!(model = %self.model, status = status.as_u16(), "inference backend error: {message}");
            return Err(InferenceError::Backend(message));
        }
        if !status.is_success() {
            return Err(InferenceError::Status { status: status.as_u16(), body: text });
        }

        value.ok_or_else(|| InferenceError::InvalidResponse(format!("body is not JSON: {text}")))
    }

    pub async fn generate_text(&self, prompt: &str, config: &DecodingConfig) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                decoding: config,
                return_full_text: self.return_full_text,
            },
            options: OPTIONS,
        };
        tracing::debug!(model = %self.model, ?config, "requesting generation");

        let value = self.post(&body).await?;
        parse_generated_text(value)
    }

    pub async fn classify_text(&self, text: &str) -> Result<Sentiment, InferenceError> {
        let body = ClassifyRequest { inputs: text, options: OPTIONS };
        let value = self.post(&body).await?;
        parse_sentiment(value)
    }
}

impl TextGenerator for InferenceClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn generate<'a>(&'a self, prompt: &'a str, config: &'a DecodingConfig) -> InferenceFuture<'a, String> {
        Box::pin(self.generate_text(prompt, config))
    }
}

impl SentimentClassifier for InferenceClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn classify<'a>(&'a self, text: &'a str) -> InferenceFuture<'a, Sentiment> {
        Box::pin(self.classify_text(text))
    }
}

fn backend_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_generated_text(value: Value) -> Result<String, InferenceError> {
    let output: GenerateOutput =
        serde_json::from_value(value).map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

    let generated = match output {
        GenerateOutput::Batch(items) => items.into_iter().next().ok_or(InferenceError::EmptyOutput)?,
        GenerateOutput::Single(item) => item,
    };

    let text = generated.generated_text.trim();
    if text.is_empty() {
        return Err(InferenceError::EmptyOutput);
    }
    Ok(text.to_string())
}

fn parse_sentiment(value: Value) -> Result<Sentiment, InferenceError> {
    let output: ClassifyOutput =
        serde_json::from_value(value).map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

    let scores = match output {
        ClassifyOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        ClassifyOutput::Flat(scores) => scores,
    };
    top_sentiment(scores).ok_or(InferenceError::EmptyOutput)
}
