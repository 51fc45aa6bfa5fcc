use std::sync::Arc;

use tracing::warn;

use crate::config::Config;
use crate::llm::{AnthropicClient, DemoClient, LlmClient};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    /// Pick the generator backend: the real API when a key is
    /// configured, the canned demo client otherwise.
    pub fn from_config(config: &Config) -> Self {
        let llm: Arc<dyn LlmClient> = match &config.anthropic_api_key {
            Some(key) => Arc::new(AnthropicClient::new(
                key.as_str(),
                config.anthropic_model.as_str(),
            )),
            None => {
                warn!("ANTHROPIC_API_KEY not set, serving static demo responses");
                Arc::new(DemoClient)
            }
        };

        Self { llm }
    }

    pub fn with_client(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}
