pub mod actions;
pub mod api;
pub mod graph;

pub use actions::{AIResponse, EdgePatch, GraphAction, NodePatch};
pub use api::{
    ChatMessage, ErrorResponse, GenerateRequest, GenerateResponse, ModifyRequest, ModifyResponse,
};
pub use graph::{
    EdgeData, GraphEdge, GraphNode, GraphState, NodeData, NodeType, Position, Protocol, Provider,
    Tech,
};
