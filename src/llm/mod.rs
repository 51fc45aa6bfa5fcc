//! Generator collaborator: prompt construction, provider clients, and
//! response parsing. The validation core never calls into this module;
//! the request layer wires the two together.

mod anthropic;
mod client;
mod demo;
pub mod prompt;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use demo::DemoClient;

use crate::error::{ArchError, Result};
use crate::models::{AIResponse, ChatMessage, GraphState};

/// Ask the model for a from-scratch architecture.
pub async fn call_generate(client: &dyn LlmClient, user_prompt: &str) -> Result<AIResponse> {
    let user = prompt::build_generate_prompt(user_prompt);
    let text = client.complete(prompt::SYSTEM_PROMPT, &user).await?;
    parse_response(&text)
}

/// Ask the model for a minimal patch against an existing graph.
pub async fn call_modify(
    client: &dyn LlmClient,
    graph: &GraphState,
    user_prompt: &str,
    history: &[ChatMessage],
) -> Result<AIResponse> {
    let user = prompt::build_modify_prompt(graph, user_prompt, history)?;
    let text = client.complete(prompt::SYSTEM_PROMPT, &user).await?;
    parse_response(&text)
}

/// Parse raw model output into a typed response. Models occasionally
/// wrap the JSON in markdown fences despite instructions; strip them
/// before the strict parse. A failure here rejects the whole batch.
pub fn parse_response(raw: &str) -> Result<AIResponse> {
    let text = strip_code_fences(raw);
    serde_json::from_str(text)
        .map_err(|err| ArchError::InvalidFormat(format!("not a valid action batch: {err}")))
}

fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the fence line itself (possibly carrying a language tag).
        text = match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest,
        };
        if let Some(body) = text.trim_end().strip_suffix("```") {
            text = body;
        }
        text = text.trim();
    }
    text
}
