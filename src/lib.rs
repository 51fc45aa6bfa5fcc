pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{ArchError, Result};
pub use models::{AIResponse, GraphAction, GraphState};
