// src/services/sentiment.rs
use serde::{Deserialize, Serialize};

use super::generator::InferenceFuture;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

impl Sentiment {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self { label: label.into(), score }.normalized()
    }

    // Labels are reported upper-case, scores are kept inside [0, 1].
    fn normalized(self) -> Self {
        let score = if self.score.is_nan() { 0.0 } else { self.score.clamp(0.0, 1.0) };
        Self {
            label: self.label.trim().to_uppercase(),
            score,
        }
    }
}

/// Pick the most confident label out of a classifier's score list.
pub fn top_sentiment(scores: impl IntoIterator<Item = Sentiment>) -> Option<Sentiment> {
    scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(Sentiment::normalized)
}

pub trait SentimentClassifier: Send + Sync {
    fn model_name(&self) -> &str;

    fn classify<'a>(&'a self, text: &'a str) -> InferenceFuture<'a, Sentiment>;
}
