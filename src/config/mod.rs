use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Runtime configuration, populated once at startup and passed down by
/// reference. Handlers never read the process environment directly.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base URL of the inference service hosting the fitted pipeline and
    /// the trained slot classifier.
    pub inference_url: String,
    pub gemini_api_key: String,
    pub gemini_url: String,
    pub gemini_model: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value: {}", e))?,

            inference_url: env::var("INFERENCE_URL")
                .map_err(|_| anyhow::anyhow!("INFERENCE_URL must be set"))?,

            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?,

            gemini_url: env::var("GEMINI_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),

            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-exp".to_string()),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid REQUEST_TIMEOUT_SECS value: {}", e))?,
        })
    }

    /// Bound on every outbound call. Gemini latency is the only one the
    /// service does not control, so nothing is awaited without this cap.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
