//! Process configuration.
//!
//! Everything secret or deployment-specific is read once at startup and
//! passed explicitly into the components that need it; nothing reads the
//! environment at request time.

use anyhow::Context;
use std::env;
use std::time::Duration;

use crate::classifier::ClassifierConfig;

pub struct Config {
    pub bind_addr: String,
    pub classifier: ClassifierConfig,
    /// RapidAPI key for the real YouTube comment download API. Normally
    /// absent, which keeps that path a stub.
    pub rapidapi_key: Option<String>,
    /// Artificial latency for the synthetic comment source.
    pub synthetic_delay: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let base_url = env::var("CLASSIFIER_BASE_URL")
            .context("CLASSIFIER_BASE_URL must be set")?
            .trim_end_matches('/')
            .to_string();
        let api_key = env::var("CLASSIFIER_API_KEY").context("CLASSIFIER_API_KEY must be set")?;
        // The reference deployment uses one anon key for both headers.
        let bearer_token = env::var("CLASSIFIER_BEARER_TOKEN").unwrap_or_else(|_| api_key.clone());

        let synthetic_delay_ms: u64 = env::var("SYNTHETIC_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1500);

        Ok(Self {
            bind_addr,
            classifier: ClassifierConfig {
                base_url,
                bearer_token,
                api_key,
            },
            rapidapi_key: env::var("RAPIDAPI_KEY").ok().filter(|k| !k.is_empty()),
            synthetic_delay: Duration::from_millis(synthetic_delay_ms),
        })
    }
}
