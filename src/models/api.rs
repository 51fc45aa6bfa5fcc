//! Request/response DTOs for the HTTP surface.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::actions::AIResponse;
use super::graph::GraphState;

/// One turn of the chat history sent along with a modify request
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModifyRequest {
    pub graph: GraphState,
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GenerateResponse {
    pub ai_response: AIResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModifyResponse {
    pub ai_response: AIResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub detail: String,
}
