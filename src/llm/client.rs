//! LLM client trait

use async_trait::async_trait;

use crate::error::Result;

/// A text-generation backend. Implementations own transport concerns
/// (auth, retries); callers only see prompt in, raw text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name, for logs
    fn provider(&self) -> &str;

    /// Model name, for logs
    fn model(&self) -> &str;

    /// Run one completion and return the raw response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
