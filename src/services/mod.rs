pub mod features;
pub mod gemini;
pub mod insights;
pub mod predictor;
pub mod slots;

use std::sync::Arc;

use crate::config::Config;

/// Read-only per-process state handed to every handler. Nothing in here
/// mutates after startup, so concurrent requests need no locking.
pub struct AppState {
    pub config: Config,
    pub predictor: Arc<dyn predictor::Predictor>,
    pub generative: Arc<dyn insights::GenerativeClient>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let predictor = Arc::new(predictor::HttpPredictor::new(
            &config.inference_url,
            config.request_timeout(),
        )?);
        let generative = Arc::new(gemini::GeminiClient::new(&config)?);

        Ok(Self {
            config,
            predictor,
            generative,
        })
    }

    /// State with caller-supplied collaborators, used by tests to swap in
    /// stubs without touching the network.
    pub fn with_clients(
        config: Config,
        predictor: Arc<dyn predictor::Predictor>,
        generative: Arc<dyn insights::GenerativeClient>,
    ) -> Self {
        Self {
            config,
            predictor,
            generative,
        }
    }
}
