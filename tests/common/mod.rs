#![allow(dead_code)]

pub mod backend;

use std::sync::{Arc, Mutex};

use serenio_chatbot::services::{
    chatbot::ChatService,
    decoding::{DecodingConfig, Variant},
    generator::{InferenceError, InferenceFuture, TextGenerator},
    sentiment::{Sentiment, SentimentClassifier},
};
use serenio_chatbot::state::AppState;

/// Generator that answers with a fixed reply (or a backend error) and
/// remembers what it was asked.
#[derive(Default)]
pub struct StubGenerator {
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<(String, DecodingConfig)>>,
}

impl StubGenerator {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn last_call(&self) -> Option<(String, DecodingConfig)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl TextGenerator for StubGenerator {
    fn model_name(&self) -> &str {
        "stub/generator"
    }

    fn generate<'a>(&'a self, prompt: &'a str, config: &'a DecodingConfig) -> InferenceFuture<'a, String> {
        Box::pin(async move {
            self.calls.lock().unwrap().push((prompt.to_string(), config.clone()));
            match &self.fail_with {
                Some(msg) => Err(InferenceError::Backend(msg.clone())),
                None => Ok(format!("You said: {prompt}")),
            }
        })
    }
}

pub struct StubClassifier {
    pub result: Result<Sentiment, String>,
}

impl StubClassifier {
    pub fn labelling(label: &str, score: f64) -> Self {
        Self {
            result: Ok(Sentiment::new(label, score)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl SentimentClassifier for StubClassifier {
    fn model_name(&self) -> &str {
        "stub/classifier"
    }

    fn classify<'a>(&'a self, _text: &'a str) -> InferenceFuture<'a, Sentiment> {
        let result = self.result.clone().map_err(InferenceError::Backend);
        Box::pin(async move { result })
    }
}

pub fn chat_service(generator: Arc<StubGenerator>, classifier: Option<StubClassifier>) -> ChatService {
    let service = ChatService::new(generator, Variant::Blenderbot.preset());
    match classifier {
        Some(c) => service.with_classifier(Arc::new(c)),
        None => service,
    }
}

pub fn app_state(generator: Arc<StubGenerator>, classifier: Option<StubClassifier>) -> Arc<AppState> {
    Arc::new(AppState::new(chat_service(generator, classifier)))
}
