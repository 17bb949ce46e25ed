// src/services/chatbot.rs
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;

use super::decoding::{DecodingConfig, DecodingError, DecodingOverrides};
use super::generator::{InferenceError, TextGenerator};
use super::inference_client::InferenceClient;
use super::sentiment::{Sentiment, SentimentClassifier};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No message provided")]
    EmptyMessage,
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub sentiment: Option<Sentiment>,
}

// Plain-text rendering used by the CLI: the reply, then `LABEL (score)` when classified.
impl std::fmt::Display for ChatReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.response)?;
        if let Some(sentiment) = &self.sentiment {
            write!(f, "\n{} ({:.4})", sentiment.label, sentiment.score)?;
        }
        Ok(())
    }
}

/// The loaded generation (and optional sentiment) backends plus the decoding preset.
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
    classifier: Option<Arc<dyn SentimentClassifier>>,
    decoding: DecodingConfig,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("generator", &self.generator.model_name())
            .field("classifier", &self.classifier.as_ref().map(|c| c.model_name()))
            .field("decoding", &self.decoding)
            .finish()
    }
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>, decoding: DecodingConfig) -> Self {
        Self {
            generator,
            classifier: None,
            decoding,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn SentimentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Wire up remote backends as described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let generator = InferenceClient::new(http.clone(), &config.inference_base_url, config.generation_model())
            .with_api_token(config.inference_api_token.clone())
            .with_return_full_text(config.variant.return_full_text());

        let mut service = Self::new(Arc::new(generator), config.variant.preset());

        if config.sentiment_enabled() {
            let classifier = InferenceClient::new(http, &config.inference_base_url, &config.sentiment_model)
                .with_api_token(config.inference_api_token.clone());
            service = service.with_classifier(Arc::new(classifier));
        }

        tracing::info!(?service, variant = %config.variant, "chat service ready");
        Ok(service)
    }

    pub fn decoding(&self) -> &DecodingConfig {
        &self.decoding
    }

    pub fn sentiment_enabled(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn resolve_decoding(&self, overrides: Option<&DecodingOverrides>) -> Result<DecodingConfig, DecodingError> {
        let config = match overrides {
            Some(o) => self.decoding.clone().with_overrides(o),
            None => self.decoding.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Generate a reply for one user message. Generation and classification run
    /// concurrently; the first failure ends the request.
    pub async fn generate_reply(
        &self,
        message: &str,
        overrides: Option<&DecodingOverrides>,
    ) -> Result<ChatReply, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let decoding = self.resolve_decoding(overrides)?;
        let generation = self.generator.generate(message, &decoding);

        let reply = match &self.classifier {
            Some(classifier) => {
                let (response, sentiment) = tokio::try_join!(generation, classifier.classify(message))?;
                ChatReply {
                    response,
                    sentiment: Some(sentiment),
                }
            }
            None => ChatReply {
                response: generation.await?,
                sentiment: None,
            },
        };

        match &reply.sentiment {
            Some(s) => tracing::info!(input = message, sentiment = %s.label, confidence = s.score, "processed input"),
            None => tracing::info!(input = message, "processed input"),
        }

        Ok(reply)
    }
}
