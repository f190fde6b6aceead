//! Error types for graph and mesh operations.

use crate::types::{ConnectionId, NodeId};

/// Errors raised by graph validation and persistence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Unknown connection {0}")]
    UnknownConnection(ConnectionId),

    #[error("Connection {0}: endpoints do not share a surface")]
    NoSharedSurface(ConnectionId),

    #[error("Connection {0}: portal lies outside the shared surface")]
    PortalOutOfBounds(ConnectionId),

    #[error("Node {node}: outgoing entry {connection} is not a live connection sourced at the node")]
    DanglingOutgoing { node: NodeId, connection: ConnectionId },

    #[error("Record {record}: index {index} out of range ({len} entries)")]
    InvalidRecordIndex { record: usize, index: u32, len: usize },
}

/// Errors raised while extracting wall/floor/ceiling geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The span sweep reached a state a consistent graph cannot produce
    #[error("Span sweep inconsistency on node {node} face {face}: {reason}")]
    SpanInvariant {
        node: NodeId,
        face: String,
        reason: String,
    },

    #[error("Degenerate mesh: {0}")]
    Degenerate(String),
}
