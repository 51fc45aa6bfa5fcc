//! Graph edit actions proposed by the model.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::graph::{EdgeData, NodeData, NodeType, Position, Protocol, Provider, Tech};

/// Partial node payload carried by `update_node`. Every field is
/// optional; absent fields leave the node untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "nodeType", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    #[serde(default, deserialize_with = "super::graph::de_provider", skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, deserialize_with = "super::graph::de_tech", skip_serializing_if = "Option::is_none")]
    pub tech: Option<Tech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Partial edge payload carried by `update_edge`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EdgePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "super::graph::de_protocol", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

/// One proposed edit to the diagram, discriminated by `op`. An
/// unrecognized `op` or a missing required field fails deserialization
/// of the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GraphAction {
    AddNode {
        id: String,
        #[serde(rename = "type")]
        node_type: NodeType,
        position: Position,
        data: NodeData,
    },
    RemoveNode {
        id: String,
    },
    UpdateNode {
        id: String,
        data: NodePatch,
    },
    MoveNode {
        id: String,
        position: Position,
    },
    AddEdge {
        id: String,
        source: String,
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<EdgeData>,
    },
    RemoveEdge {
        id: String,
    },
    UpdateEdge {
        id: String,
        data: EdgePatch,
    },
}

impl GraphAction {
    /// Wire name of the operation, matching the `op` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddNode { .. } => "add_node",
            Self::RemoveNode { .. } => "remove_node",
            Self::UpdateNode { .. } => "update_node",
            Self::MoveNode { .. } => "move_node",
            Self::AddEdge { .. } => "add_edge",
            Self::RemoveEdge { .. } => "remove_edge",
            Self::UpdateEdge { .. } => "update_edge",
        }
    }

    /// Id of the node or edge this action targets.
    pub fn id(&self) -> &str {
        match self {
            Self::AddNode { id, .. }
            | Self::RemoveNode { id }
            | Self::UpdateNode { id, .. }
            | Self::MoveNode { id, .. }
            | Self::AddEdge { id, .. }
            | Self::RemoveEdge { id }
            | Self::UpdateEdge { id, .. } => id,
        }
    }
}

/// The unit exchanged with the model: rationale, an ordered action
/// batch, and a one-line summary. Action order is significant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AIResponse {
    pub thought_process: String,
    pub actions: Vec<GraphAction>,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_node() {
        let action: GraphAction = serde_json::from_value(serde_json::json!({
            "op": "add_node",
            "id": "node_service_auth_01",
            "type": "service",
            "position": {"x": 500.0, "y": 100.0},
            "data": {"label": "Auth Service", "nodeType": "service", "tech": "go"},
        }))
        .unwrap();

        match action {
            GraphAction::AddNode { id, node_type, position, data } => {
                assert_eq!(id, "node_service_auth_01");
                assert_eq!(node_type, NodeType::Service);
                assert_eq!(position.x, 500.0);
                assert_eq!(data.tech, Some(Tech::Go));
            }
            other => panic!("expected add_node, got {}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_op_fails() {
        let parsed: Result<GraphAction, _> = serde_json::from_value(serde_json::json!({
            "op": "explode_node",
            "id": "n1",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_required_field_fails() {
        // add_edge without a target
        let parsed: Result<GraphAction, _> = serde_json::from_value(serde_json::json!({
            "op": "add_edge",
            "id": "e1",
            "source": "n1",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_discriminator_round_trip() {
        let action = GraphAction::RemoveEdge { id: "e1".to_string() };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["op"], "remove_edge");
        assert_eq!(value["id"], "e1");
    }

    #[test]
    fn test_update_node_partial_patch() {
        let action: GraphAction = serde_json::from_value(serde_json::json!({
            "op": "update_node",
            "id": "n1",
            "data": {"replicas": 3},
        }))
        .unwrap();

        match action {
            GraphAction::UpdateNode { data, .. } => {
                assert_eq!(data.replicas, Some(3));
                assert_eq!(data.label, None);
            }
            other => panic!("expected update_node, got {}", other.kind()),
        }
    }

    #[test]
    fn test_ai_response_parse() {
        let response: AIResponse = serde_json::from_value(serde_json::json!({
            "thought_process": "Adding a cache.",
            "actions": [
                {"op": "add_node", "id": "node_cache_01", "type": "cache",
                 "position": {"x": 750.0, "y": 0.0},
                 "data": {"label": "Cache", "nodeType": "cache", "tech": "redis"}},
                {"op": "add_edge", "id": "edge_app_cache_01",
                 "source": "node_service_app_01", "target": "node_cache_01",
                 "data": {"label": "caches sessions", "protocol": "tcp"}},
            ],
            "summary": "Added a Redis cache",
        }))
        .unwrap();

        assert_eq!(response.actions.len(), 2);
        assert_eq!(response.actions[0].kind(), "add_node");
        assert_eq!(response.actions[1].id(), "edge_app_cache_01");
    }
}
