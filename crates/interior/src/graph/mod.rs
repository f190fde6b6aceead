//! Authoring-time interior graph
//!
//! Nodes and connections live in slot arrays. Stable external ids map to
//! slot indices through `node_map`/`connection_map`, so removing an entry
//! only clears its slot and drops its id; nothing is renumbered until the
//! graph is packed.

mod editing;
pub(crate) mod packing;
mod queries;
mod validation;

use std::collections::BTreeMap;

use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};

pub use packing::{IdRemap, PackedGraph};

/// Interior graph being edited
#[derive(Debug, Clone, Default)]
pub struct InteriorGraph {
    /// Node slots; `None` once the node has been removed
    pub(crate) node_data: Vec<Option<NodeData>>,
    /// Connection slots; `None` once the connection has been removed
    pub(crate) conn_data: Vec<Option<ConnectionData>>,
    pub(crate) node_map: BTreeMap<NodeId, usize>,
    pub(crate) connection_map: BTreeMap<ConnectionId, usize>,
    /// Ids are never reused within a session
    pub(crate) next_node_id: u32,
    pub(crate) next_connection_id: u32,
    pub(crate) node_names: BTreeMap<NodeId, String>,
    pub(crate) connection_names: BTreeMap<ConnectionId, String>,
}

impl InteriorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Debug name of a node, if it is live
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node_names.get(&id).map(String::as_str)
    }

    /// Debug name of a connection, if it is live
    pub fn connection_name(&self, id: ConnectionId) -> Option<&str> {
        self.connection_names.get(&id).map(String::as_str)
    }

    /// Number of allocated node slots, live or abandoned
    pub fn node_slot_count(&self) -> usize {
        self.node_data.len()
    }

    /// Number of allocated connection slots, live or abandoned
    pub fn connection_slot_count(&self) -> usize {
        self.conn_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}
