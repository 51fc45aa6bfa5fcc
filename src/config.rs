use std::env;

use once_cell::sync::Lazy;

/// Runtime configuration, read once from the environment.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        Self {
            host: env::var("ARCHFLOW_HOST").unwrap_or_else(|_| default_host()),
            port: env::var("ARCHFLOW_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or_else(default_port),
            anthropic_api_key: api_key,
            anthropic_model: env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| default_model()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| default_cors_origins())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_cors_origins() -> String {
    "http://localhost:5173".to_string()
}
