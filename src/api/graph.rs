//! Generate/modify endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use crate::api::AppState;
use crate::llm;
use crate::models::{
    ErrorResponse, GenerateRequest, GenerateResponse, ModifyRequest, ModifyResponse,
};
use crate::services::validate_response;

// POST /api/generate
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    match llm::call_generate(state.llm.as_ref(), &req.prompt).await {
        Ok(ai_response) => {
            let (ai_response, rejected) = validate_response(ai_response, None);
            info!(
                accepted = ai_response.actions.len(),
                dropped = rejected.len(),
                "sanitized generate batch"
            );
            Json(GenerateResponse { ai_response }).into_response()
        }
        Err(err) => {
            error!("Generate failed: {err}");
            bad_gateway(format!("AI generation failed: {err}"))
        }
    }
}

// POST /api/modify
pub async fn modify_graph(
    State(state): State<AppState>,
    Json(req): Json<ModifyRequest>,
) -> Response {
    match llm::call_modify(state.llm.as_ref(), &req.graph, &req.prompt, &req.history).await {
        Ok(ai_response) => {
            let (ai_response, rejected) = validate_response(ai_response, Some(&req.graph));
            info!(
                accepted = ai_response.actions.len(),
                dropped = rejected.len(),
                "sanitized modify batch"
            );
            Json(ModifyResponse { ai_response }).into_response()
        }
        Err(err) => {
            error!("Modify failed: {err}");
            bad_gateway(format!("AI modification failed: {err}"))
        }
    }
}

fn bad_gateway(detail: String) -> Response {
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse { detail })).into_response()
}
