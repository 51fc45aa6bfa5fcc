pub mod graph;
pub mod state;

pub use state::AppState;

use axum::routing::{get, post};
use axum::{Json, Router};

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(graph::generate_graph))
        .route("/api/modify", post(graph::modify_graph))
        .with_state(state)
}
