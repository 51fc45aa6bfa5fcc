//! Deterministic fallback used when no API key is configured.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::client::LlmClient;

/// Returns a canned demo architecture regardless of the prompt, so the
/// frontend stays usable without credentials.
pub struct DemoClient;

#[async_trait]
impl LlmClient for DemoClient {
    fn provider(&self) -> &str {
        "demo"
    }

    fn model(&self) -> &str {
        "static"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        Ok(demo_response_json())
    }
}

fn demo_response_json() -> String {
    serde_json::json!({
        "thought_process": "No API key configured. Returning a demo architecture.",
        "actions": [
            {
                "op": "add_node",
                "id": "node_gateway_api_01",
                "type": "gateway",
                "position": {"x": 0.0, "y": 200.0},
                "data": {"label": "API Gateway", "nodeType": "gateway", "tech": "nginx"},
            },
            {
                "op": "add_node",
                "id": "node_service_app_01",
                "type": "service",
                "position": {"x": 400.0, "y": 100.0},
                "data": {"label": "App Service", "nodeType": "service", "tech": "node"},
            },
            {
                "op": "add_node",
                "id": "node_database_main_01",
                "type": "database",
                "position": {"x": 800.0, "y": 100.0},
                "data": {"label": "Main DB", "nodeType": "database", "tech": "postgres"},
            },
            {
                "op": "add_node",
                "id": "node_cache_session_01",
                "type": "cache",
                "position": {"x": 800.0, "y": 300.0},
                "data": {"label": "Session Cache", "nodeType": "cache", "tech": "redis"},
            },
            {
                "op": "add_edge",
                "id": "edge_gateway_app_01",
                "source": "node_gateway_api_01",
                "target": "node_service_app_01",
                "data": {"label": "routes traffic", "protocol": "http"},
            },
            {
                "op": "add_edge",
                "id": "edge_app_db_01",
                "source": "node_service_app_01",
                "target": "node_database_main_01",
                "data": {"label": "reads/writes", "protocol": "tcp"},
            },
            {
                "op": "add_edge",
                "id": "edge_app_cache_01",
                "source": "node_service_app_01",
                "target": "node_cache_session_01",
                "data": {"label": "caches sessions", "protocol": "tcp"},
            },
        ],
        "summary": "Demo architecture: Gateway -> App Service -> Postgres + Redis (no API key configured)",
    })
    .to_string()
}
