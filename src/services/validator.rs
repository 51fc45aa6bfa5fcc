//! Sequential validation of proposed action batches.
//!
//! The model's output cannot be trusted to be internally consistent:
//! it may add the same id twice, wire edges to nodes it never created,
//! or update entities that do not exist. Each batch is therefore
//! filtered action by action against a virtual graph state before the
//! frontend is allowed to apply it.

use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use crate::models::{AIResponse, GraphAction, GraphState, Position};
use crate::services::placement::resolve_position;

/// Working snapshot of one validation pass: the ids known so far and
/// the canvas positions already taken. Seeded from the caller's graph
/// and updated as actions are accepted, so later actions in a batch
/// may refer to entities created earlier in the same batch.
#[derive(Debug, Default)]
pub struct VirtualState {
    pub node_ids: HashSet<String>,
    pub edge_ids: HashSet<String>,
    pub positions: Vec<Position>,
}

impl VirtualState {
    pub fn from_graph(graph: Option<&GraphState>) -> Self {
        let Some(graph) = graph else {
            return Self::default();
        };

        Self {
            node_ids: graph.nodes.iter().map(|n| n.id.clone()).collect(),
            edge_ids: graph.edges.iter().map(|e| e.id.clone()).collect(),
            positions: graph.nodes.iter().map(|n| n.position).collect(),
        }
    }
}

/// Why an action was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    DuplicateNode,
    DuplicateEdge,
    NodeNotFound,
    EdgeNotFound,
    SourceNotFound { source: String },
    TargetNotFound { target: String },
}

/// One dropped action, kept as data so callers and tests can inspect
/// the rejection trail without parsing log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAction {
    pub op: &'static str,
    pub id: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::DuplicateNode => {
                write!(f, "Duplicate node ID: {}, skipping {}", self.id, self.op)
            }
            RejectReason::DuplicateEdge => {
                write!(f, "Duplicate edge ID: {}, skipping {}", self.id, self.op)
            }
            RejectReason::NodeNotFound => {
                write!(f, "Node not found for {}: {}, skipping", self.op, self.id)
            }
            RejectReason::EdgeNotFound => {
                write!(f, "Edge not found for {}: {}, skipping", self.op, self.id)
            }
            RejectReason::SourceNotFound { source } => {
                write!(f, "Edge source not found: {}, skipping {}", source, self.id)
            }
            RejectReason::TargetNotFound { target } => {
                write!(f, "Edge target not found: {}, skipping {}", target, self.id)
            }
        }
    }
}

/// Walk `actions` in order, keeping each one that is consistent with
/// `state` and dropping the rest. Accepted actions mutate the state;
/// rejected actions leave it untouched. Accepted `add_node` positions
/// are corrected for overlap before the id is registered.
///
/// Rejections are fail-open: each is logged and recorded, and the walk
/// continues with the next action.
pub fn filter_actions(
    actions: Vec<GraphAction>,
    state: &mut VirtualState,
) -> (Vec<GraphAction>, Vec<RejectedAction>) {
    let mut accepted = Vec::with_capacity(actions.len());
    let mut rejected = Vec::new();

    for mut action in actions {
        let op = action.kind();

        let verdict = match &mut action {
            GraphAction::AddNode { id, position, .. } => {
                if state.node_ids.contains(id.as_str()) {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::DuplicateNode,
                    })
                } else {
                    *position = resolve_position(*position, &state.positions);
                    state.positions.push(*position);
                    state.node_ids.insert(id.clone());
                    Ok(())
                }
            }
            GraphAction::RemoveNode { id } => {
                // Connected edges are NOT cascaded: the batch (or the
                // caller) is expected to remove them explicitly.
                if state.node_ids.remove(id.as_str()) {
                    Ok(())
                } else {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::NodeNotFound,
                    })
                }
            }
            GraphAction::UpdateNode { id, .. } | GraphAction::MoveNode { id, .. } => {
                if state.node_ids.contains(id.as_str()) {
                    Ok(())
                } else {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::NodeNotFound,
                    })
                }
            }
            GraphAction::AddEdge {
                id, source, target, ..
            } => {
                if state.edge_ids.contains(id.as_str()) {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::DuplicateEdge,
                    })
                } else if !state.node_ids.contains(source.as_str()) {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::SourceNotFound {
                            source: source.clone(),
                        },
                    })
                } else if !state.node_ids.contains(target.as_str()) {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::TargetNotFound {
                            target: target.clone(),
                        },
                    })
                } else {
                    state.edge_ids.insert(id.clone());
                    Ok(())
                }
            }
            GraphAction::RemoveEdge { id } => {
                if state.edge_ids.remove(id.as_str()) {
                    Ok(())
                } else {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::EdgeNotFound,
                    })
                }
            }
            GraphAction::UpdateEdge { id, .. } => {
                if state.edge_ids.contains(id.as_str()) {
                    Ok(())
                } else {
                    Err(RejectedAction {
                        op,
                        id: id.clone(),
                        reason: RejectReason::EdgeNotFound,
                    })
                }
            }
        };

        match verdict {
            Ok(()) => accepted.push(action),
            Err(rejection) => {
                warn!("{rejection}");
                rejected.push(rejection);
            }
        }
    }

    (accepted, rejected)
}

/// Sanitize a full model response against an optional current graph.
/// Rationale and summary pass through unchanged; the action list is
/// replaced by the accepted subsequence in its original relative order.
pub fn validate_response(
    mut response: AIResponse,
    current_graph: Option<&GraphState>,
) -> (AIResponse, Vec<RejectedAction>) {
    let mut state = VirtualState::from_graph(current_graph);
    let (accepted, rejected) = filter_actions(std::mem::take(&mut response.actions), &mut state);
    response.actions = accepted;
    (response, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeData, NodeType};
    use serde_json::json;

    fn graph(value: serde_json::Value) -> GraphState {
        serde_json::from_value(value).unwrap()
    }

    fn one_node_graph() -> GraphState {
        graph(json!({
            "nodes": [
                {"id": "n1", "position": {"x": 0.0, "y": 0.0},
                 "data": {"label": "App", "nodeType": "service"}},
            ],
            "edges": [],
        }))
    }

    fn add_node(id: &str, x: f64, y: f64) -> GraphAction {
        GraphAction::AddNode {
            id: id.to_string(),
            node_type: NodeType::Service,
            position: Position { x, y },
            data: NodeData {
                label: id.to_string(),
                node_type: NodeType::Service,
                provider: None,
                tech: None,
                replicas: None,
                region: None,
                description: None,
                port: None,
            },
        }
    }

    fn add_edge(id: &str, source: &str, target: &str) -> GraphAction {
        GraphAction::AddEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_snapshot_from_nothing_is_empty() {
        let state = VirtualState::from_graph(None);
        assert!(state.node_ids.is_empty());
        assert!(state.edge_ids.is_empty());
        assert!(state.positions.is_empty());
    }

    #[test]
    fn test_snapshot_from_graph() {
        let g = graph(json!({
            "nodes": [
                {"id": "n1", "position": {"x": 0.0, "y": 0.0},
                 "data": {"label": "A", "nodeType": "service"}},
                {"id": "n2", "position": {"x": 400.0, "y": 0.0},
                 "data": {"label": "B", "nodeType": "database"}},
            ],
            "edges": [{"id": "e1", "source": "n1", "target": "n2"}],
        }));
        let state = VirtualState::from_graph(Some(&g));
        assert_eq!(state.node_ids.len(), 2);
        assert_eq!(state.edge_ids.len(), 1);
        assert_eq!(state.positions.len(), 2);
    }

    #[test]
    fn test_duplicate_add_node_against_existing_graph_dropped() {
        let g = one_node_graph();
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, rejected) =
            filter_actions(vec![add_node("n1", 500.0, 500.0)], &mut state);

        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, "n1");
        assert_eq!(rejected[0].reason, RejectReason::DuplicateNode);
    }

    #[test]
    fn test_duplicate_add_node_within_batch_dropped() {
        let mut state = VirtualState::from_graph(None);
        let (accepted, rejected) = filter_actions(
            vec![add_node("n1", 0.0, 0.0), add_node("n1", 900.0, 900.0)],
            &mut state,
        );

        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);
        // The first occurrence won; its position is still tracked.
        assert_eq!(state.positions.len(), 1);
    }

    #[test]
    fn test_dangling_edge_source_dropped_with_warning() {
        let g = one_node_graph();
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, rejected) =
            filter_actions(vec![add_edge("e1", "missing", "n1")], &mut state);

        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, "e1");
        assert_eq!(
            rejected[0].reason,
            RejectReason::SourceNotFound { source: "missing".to_string() }
        );
        assert!(state.edge_ids.is_empty());
    }

    #[test]
    fn test_edge_may_reference_node_added_earlier_in_batch() {
        let g = one_node_graph();
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, rejected) = filter_actions(
            vec![add_node("n2", 1000.0, 1000.0), add_edge("e1", "n2", "n1")],
            &mut state,
        );

        assert_eq!(accepted.len(), 2);
        assert!(rejected.is_empty());
        assert!(state.edge_ids.contains("e1"));
    }

    #[test]
    fn test_order_preserved_across_rejections() {
        let mut state = VirtualState::from_graph(None);
        let (accepted, _) = filter_actions(
            vec![
                add_node("a", 0.0, 0.0),
                add_node("a", 0.0, 0.0),
                add_node("b", 1000.0, 0.0),
                add_edge("e1", "a", "b"),
                add_edge("e2", "a", "ghost"),
                add_node("c", 2000.0, 0.0),
            ],
            &mut state,
        );

        let ids: Vec<&str> = accepted.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["a", "b", "e1", "c"]);
    }

    #[test]
    fn test_rejection_does_not_mutate_state() {
        let g = one_node_graph();
        let mut state = VirtualState::from_graph(Some(&g));

        // Unknown removals and updates must leave the state intact.
        let (accepted, rejected) = filter_actions(
            vec![
                GraphAction::RemoveNode { id: "ghost".to_string() },
                GraphAction::RemoveEdge { id: "ghost".to_string() },
                GraphAction::MoveNode {
                    id: "ghost".to_string(),
                    position: Position { x: 1.0, y: 1.0 },
                },
            ],
            &mut state,
        );

        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 3);
        assert!(state.node_ids.contains("n1"));
        assert_eq!(state.positions.len(), 1);
    }

    #[test]
    fn test_remove_node_frees_id_for_reuse() {
        let g = one_node_graph();
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, rejected) = filter_actions(
            vec![
                GraphAction::RemoveNode { id: "n1".to_string() },
                add_node("n1", 600.0, 600.0),
            ],
            &mut state,
        );

        assert_eq!(accepted.len(), 2);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_remove_node_does_not_cascade_edges() {
        let g = graph(json!({
            "nodes": [
                {"id": "n1", "position": {"x": 0.0, "y": 0.0},
                 "data": {"label": "A", "nodeType": "service"}},
                {"id": "n2", "position": {"x": 400.0, "y": 0.0},
                 "data": {"label": "B", "nodeType": "database"}},
            ],
            "edges": [{"id": "e1", "source": "n1", "target": "n2"}],
        }));
        let mut state = VirtualState::from_graph(Some(&g));

        let (accepted, rejected) = filter_actions(
            vec![
                GraphAction::RemoveNode { id: "n1".to_string() },
                GraphAction::UpdateEdge {
                    id: "e1".to_string(),
                    data: Default::default(),
                },
            ],
            &mut state,
        );

        // e1 still resolves even though its source node is gone.
        assert_eq!(accepted.len(), 2);
        assert!(rejected.is_empty());
        assert!(state.edge_ids.contains("e1"));
    }

    #[test]
    fn test_accepted_add_node_position_corrected() {
        let g = one_node_graph();
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, _) = filter_actions(vec![add_node("n2", 50.0, 50.0)], &mut state);

        match &accepted[0] {
            GraphAction::AddNode { position, .. } => {
                assert_eq!(*position, Position { x: 200.0, y: 50.0 });
            }
            other => panic!("expected add_node, got {}", other.kind()),
        }
        // The corrected position is what gets tracked.
        assert_eq!(state.positions[1], Position { x: 200.0, y: 50.0 });
    }

    #[test]
    fn test_duplicate_edge_id_dropped() {
        let g = graph(json!({
            "nodes": [
                {"id": "n1", "position": {"x": 0.0, "y": 0.0},
                 "data": {"label": "A", "nodeType": "service"}},
                {"id": "n2", "position": {"x": 400.0, "y": 0.0},
                 "data": {"label": "B", "nodeType": "database"}},
            ],
            "edges": [{"id": "e1", "source": "n1", "target": "n2"}],
        }));
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, rejected) = filter_actions(vec![add_edge("e1", "n1", "n2")], &mut state);

        assert!(accepted.is_empty());
        assert_eq!(rejected[0].reason, RejectReason::DuplicateEdge);
    }

    #[test]
    fn test_remove_edge_then_read_fails() {
        let g = graph(json!({
            "nodes": [
                {"id": "n1", "position": {"x": 0.0, "y": 0.0},
                 "data": {"label": "A", "nodeType": "service"}},
                {"id": "n2", "position": {"x": 400.0, "y": 0.0},
                 "data": {"label": "B", "nodeType": "database"}},
            ],
            "edges": [{"id": "e1", "source": "n1", "target": "n2"}],
        }));
        let mut state = VirtualState::from_graph(Some(&g));
        let (accepted, rejected) = filter_actions(
            vec![
                GraphAction::RemoveEdge { id: "e1".to_string() },
                GraphAction::UpdateEdge {
                    id: "e1".to_string(),
                    data: Default::default(),
                },
            ],
            &mut state,
        );

        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].reason, RejectReason::EdgeNotFound);
    }

    #[test]
    fn test_validate_response_passes_text_through() {
        let response = AIResponse {
            thought_process: "reasoning".to_string(),
            actions: vec![add_node("n1", 0.0, 0.0), add_node("n1", 0.0, 0.0)],
            summary: "summary".to_string(),
        };

        let (sanitized, rejected) = validate_response(response, None);
        assert_eq!(sanitized.thought_process, "reasoning");
        assert_eq!(sanitized.summary, "summary");
        assert_eq!(sanitized.actions.len(), 1);
        assert_eq!(rejected.len(), 1);
    }
}
