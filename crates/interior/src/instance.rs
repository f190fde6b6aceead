//! Baked, immutable interior graph.
//!
//! Produced by the bake pipeline. Ids equal array positions; there is no
//! id indirection and nothing is removed after creation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};
use crate::view::GraphView;

/// Runtime snapshot of a baked graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInstance {
    pub nodes: Vec<NodeData>,
    pub connections: Vec<ConnectionData>,
    /// Debug names keyed by packed id
    pub node_names: BTreeMap<NodeId, String>,
    pub connection_names: BTreeMap<ConnectionId, String>,
}

impl GraphInstance {
    /// Get a node by id. Panics if out of range.
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }

    /// Get a connection by id. Panics if out of range.
    pub fn connection(&self, id: ConnectionId) -> &ConnectionData {
        &self.connections[id.0 as usize]
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node_names.get(&id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl GraphView for GraphInstance {
    fn node_ids(&self) -> Vec<NodeId> {
        (0..self.nodes.len() as u32).map(NodeId).collect()
    }

    fn connection_ids(&self) -> Vec<ConnectionId> {
        (0..self.connections.len() as u32).map(ConnectionId).collect()
    }

    fn try_node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0 as usize)
    }

    fn try_connection(&self, id: ConnectionId) -> Option<&ConnectionData> {
        self.connections.get(id.0 as usize)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
