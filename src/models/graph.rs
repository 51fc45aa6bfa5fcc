//! Graph data model shared with the canvas frontend.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{ArchError, Result};

/// A point on the infinite 2D canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Architecture node categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Service,
    Database,
    Cache,
    Queue,
    Gateway,
    LoadBalancer,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Database => "database",
            Self::Cache => "cache",
            Self::Queue => "queue",
            Self::Gateway => "gateway",
            Self::LoadBalancer => "load_balancer",
        }
    }
}

/// Cloud provider tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    Supabase,
    Vercel,
    Cloudflare,
}

impl Provider {
    /// Resolve a free-form provider string to a canonical value.
    pub fn resolve(raw: &str) -> Option<Self> {
        match fold(raw).as_str() {
            "aws" | "amazon" | "amazon_web_services" => Some(Self::Aws),
            "gcp" | "google" | "google_cloud" => Some(Self::Gcp),
            "azure" | "microsoft_azure" => Some(Self::Azure),
            "supabase" => Some(Self::Supabase),
            "vercel" => Some(Self::Vercel),
            "cloudflare" => Some(Self::Cloudflare),
            _ => None,
        }
    }
}

/// Supported technology tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tech {
    Postgres,
    Mysql,
    Mongodb,
    Redis,
    Memcached,
    Kafka,
    Rabbitmq,
    Sqs,
    Python,
    Go,
    Node,
    Rust,
    Java,
    Nginx,
    Envoy,
    Kong,
}

impl Tech {
    /// Resolve a free-form technology string to a canonical value.
    pub fn resolve(raw: &str) -> Option<Self> {
        match fold(raw).as_str() {
            "postgres" | "postgresql" | "pgsql" => Some(Self::Postgres),
            "mysql" => Some(Self::Mysql),
            "mongodb" | "mongo" => Some(Self::Mongodb),
            "redis" => Some(Self::Redis),
            "memcached" | "memcache" => Some(Self::Memcached),
            "kafka" | "apache_kafka" => Some(Self::Kafka),
            "rabbitmq" | "rabbit_mq" | "rabbit" => Some(Self::Rabbitmq),
            "sqs" | "amazon_sqs" | "aws_sqs" => Some(Self::Sqs),
            "python" => Some(Self::Python),
            "go" | "golang" => Some(Self::Go),
            "node" | "nodejs" | "node_js" => Some(Self::Node),
            "rust" => Some(Self::Rust),
            "java" => Some(Self::Java),
            "nginx" => Some(Self::Nginx),
            "envoy" | "envoy_proxy" => Some(Self::Envoy),
            "kong" => Some(Self::Kong),
            _ => None,
        }
    }
}

/// Edge communication protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Http,
    Grpc,
    Ws,
    Tcp,
    Amqp,
    Kafka,
}

impl Protocol {
    /// Resolve a free-form protocol string to a canonical value.
    pub fn resolve(raw: &str) -> Option<Self> {
        match fold(raw).as_str() {
            "http" | "https" | "rest" => Some(Self::Http),
            "grpc" => Some(Self::Grpc),
            "ws" | "wss" | "websocket" | "websockets" | "web_socket" => Some(Self::Ws),
            "tcp" => Some(Self::Tcp),
            "amqp" => Some(Self::Amqp),
            "kafka" => Some(Self::Kafka),
            _ => None,
        }
    }
}

/// Case-fold and collapse separators so "Node.js", "node js" and
/// "NODE-JS" all land on "node_js" before the alias lookup.
fn fold(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| match c {
            '-' | '.' | ' ' | '/' => '_',
            other => other,
        })
        .collect()
}

pub(crate) fn de_provider<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<Provider>, D::Error> {
    Ok(Option::<String>::deserialize(de)?
        .as_deref()
        .and_then(Provider::resolve))
}

pub(crate) fn de_tech<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<Tech>, D::Error> {
    Ok(Option::<String>::deserialize(de)?
        .as_deref()
        .and_then(Tech::resolve))
}

pub(crate) fn de_protocol<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<Protocol>, D::Error> {
    Ok(Option::<String>::deserialize(de)?
        .as_deref()
        .and_then(Protocol::resolve))
}

/// Payload carried by every node. Unresolvable provider/tech values are
/// cleared during deserialization, never rejected.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "nodeType")]
    pub node_type: NodeType,
    #[serde(default, deserialize_with = "de_provider", skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, deserialize_with = "de_tech", skip_serializing_if = "Option::is_none")]
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

/// Optional payload carried by an edge
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "de_protocol", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub position: Position,
    pub data: NodeData,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

/// A full diagram snapshot. The backend never owns one of these long
/// term; callers send it in and keep the authoritative copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GraphState {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphState {
    /// Verify the structural invariants: node ids pairwise distinct,
    /// edge ids pairwise distinct, every edge endpoint present.
    pub fn check(&self) -> Result<()> {
        let mut node_ids = std::collections::HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(ArchError::InvalidGraph(format!(
                    "duplicate node id: {}",
                    node.id
                )));
            }
        }

        let mut edge_ids = std::collections::HashSet::new();
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(ArchError::InvalidGraph(format!(
                    "duplicate edge id: {}",
                    edge.id
                )));
            }
            if !node_ids.contains(edge.source.as_str()) {
                return Err(ArchError::InvalidGraph(format!(
                    "edge {} references missing source {}",
                    edge.id, edge.source
                )));
            }
            if !node_ids.contains(edge.target.as_str()) {
                return Err(ArchError::InvalidGraph(format!(
                    "edge {} references missing target {}",
                    edge.id, edge.target
                )));
            }
        }

        Ok(())
    }
}
