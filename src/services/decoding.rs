// src/services/decoding.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_NEW_TOKENS_LIMIT: u32 = 1024;

/// Which model family the service fronts. Each one carries its own decoding preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Open-domain seq2seq dialogue model, beam search with sampling.
    #[default]
    Blenderbot,
    /// Causal LM tuned on counselling conversations, nucleus sampling.
    MentalHealth,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown chat variant {0:?}, expected `blenderbot` or `mental-health`")]
pub struct UnknownVariant(pub String);

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Blenderbot => "blenderbot",
            Variant::MentalHealth => "mental-health",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Variant::Blenderbot => "facebook/blenderbot-400M-distill",
            Variant::MentalHealth => "thrishala/mental_health_chatbot",
        }
    }

    pub fn sentiment_by_default(&self) -> bool {
        matches!(self, Variant::Blenderbot)
    }

    // Causal models echo the prompt unless told otherwise.
    pub fn return_full_text(&self) -> Option<bool> {
        match self {
            Variant::Blenderbot => None,
            Variant::MentalHealth => Some(false),
        }
    }

    pub fn preset(&self) -> DecodingConfig {
        match self {
            Variant::Blenderbot => DecodingConfig {
                max_new_tokens: 100,
                do_sample: true,
                num_beams: Some(5),
                temperature: None,
                top_k: None,
                top_p: None,
                repetition_penalty: None,
            },
            Variant::MentalHealth => DecodingConfig {
                max_new_tokens: 150,
                do_sample: true,
                num_beams: None,
                temperature: Some(0.7),
                top_k: Some(50),
                top_p: Some(0.9),
                repetition_penalty: Some(1.2),
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "blenderbot" => Ok(Variant::Blenderbot),
            "mental-health" => Ok(Variant::MentalHealth),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Hyperparameters forwarded to the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodingConfig {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_beams: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
}

/// Per-request tweaks layered on top of a preset. Absent fields keep the preset value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodingOverrides {
    pub max_new_tokens: Option<u32>,
    pub do_sample: Option<bool>,
    pub num_beams: Option<u32>,
    pub temperature: Option<f64>,
    pub top_k: Option<u32>,
    pub top_p: Option<f64>,
    pub repetition_penalty: Option<f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodingError {
    #[error("max_new_tokens must be between 1 and 1024, got {0}")]
    MaxNewTokens(u32),
    #[error("num_beams must be at least 1")]
    NumBeams,
    #[error("temperature must be positive, got {0}")]
    Temperature(f64),
    #[error("top_k must be at least 1")]
    TopK,
    #[error("top_p must be in (0, 1], got {0}")]
    TopP(f64),
    #[error("repetition_penalty must be positive, got {0}")]
    RepetitionPenalty(f64),
}

impl DecodingConfig {
    pub fn with_overrides(mut self, overrides: &DecodingOverrides) -> Self {
        if let Some(v) = overrides.max_new_tokens {
            self.max_new_tokens = v;
        }
        if let Some(v) = overrides.do_sample {
            self.do_sample = v;
        }
        self.num_beams = overrides.num_beams.or(self.num_beams);
        self.temperature = overrides.temperature.or(self.temperature);
        self.top_k = overrides.top_k.or(self.top_k);
        self.top_p = overrides.top_p.or(self.top_p);
        self.repetition_penalty = overrides.repetition_penalty.or(self.repetition_penalty);
        self
    }

    pub fn validate(&self) -> Result<(), DecodingError> {
        if self.max_new_tokens == 0 || self.max_new_tokens > MAX_NEW_TOKENS_LIMIT {
            return Err(DecodingError::MaxNewTokens(self.max_new_tokens));
        }
        if self.num_beams == Some(0) {
            return Err(DecodingError::NumBeams);
        }
        if let Some(t) = self.temperature {
            if t.is_nan() || t <= 0.0 {
                return Err(DecodingError::Temperature(t));
            }
        }
        if self.top_k == Some(0) {
            return Err(DecodingError::TopK);
        }
        if let Some(p) = self.top_p {
            if p.is_nan() || p <= 0.0 || p > 1.0 {
                return Err(DecodingError::TopP(p));
            }
        }
        if let Some(r) = self.repetition_penalty {
            if r.is_nan() || r <= 0.0 {
                return Err(DecodingError::RepetitionPenalty(r));
            }
        }
        Ok(())
    }
}
