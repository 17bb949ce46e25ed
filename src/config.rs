// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::services::decoding::Variant;

pub const DEFAULT_PORT: u16 = 7000;
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub variant: Variant,
    /// Explicit model id; falls back to the variant's default.
    pub generation_model: Option<String>,
    /// Explicit switch; falls back to the variant's default.
    pub sentiment_enabled: Option<bool>,
    pub sentiment_model: String,
    pub inference_base_url: String,
    pub inference_api_token: Option<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            variant: Variant::default(),
            generation_model: None,
            sentiment_enabled: None,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            inference_base_url: DEFAULT_INFERENCE_BASE_URL.to_string(),
            inference_api_token: None,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(variant) = get("CHAT_VARIANT") {
            config.variant = variant.parse().map_err(|e: crate::services::decoding::UnknownVariant| {
                ConfigError::Invalid {
                    key: "CHAT_VARIANT",
                    value: variant.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        config.generation_model = get("GENERATION_MODEL");
        if let Some(enabled) = get("SENTIMENT_ENABLED") {
            config.sentiment_enabled = Some(parse_bool("SENTIMENT_ENABLED", &enabled)?);
        }
        if let Some(model) = get("SENTIMENT_MODEL") {
            config.sentiment_model = model;
        }
        if let Some(url) = get("INFERENCE_BASE_URL") {
            config.inference_base_url = url;
        }
        config.inference_api_token = get("INFERENCE_API_TOKEN");
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: secs.clone(),
                reason: e.to_string(),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn generation_model(&self) -> &str {
        self.generation_model
            .as_deref()
            .unwrap_or_else(|| self.variant.default_model())
    }

    pub fn sentiment_enabled(&self) -> bool {
        self.sentiment_enabled
            .unwrap_or_else(|| self.variant.sentiment_by_default())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// URL to reach a listener from this machine; wildcard binds show as `localhost`.
pub fn local_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{addr}")
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
