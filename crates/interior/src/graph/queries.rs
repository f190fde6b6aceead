//! Lookup methods for InteriorGraph.

use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};
use crate::view::GraphView;

use super::InteriorGraph;

impl InteriorGraph {
    /// All live node ids, ascending
    pub fn all_nodes(&self) -> Vec<NodeId> {
        self.node_map.keys().copied().collect()
    }

    /// All live connection ids, ascending
    pub fn all_connections(&self) -> Vec<ConnectionId> {
        self.connection_map.keys().copied().collect()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    pub fn contains_connection(&self, id: ConnectionId) -> bool {
        self.connection_map.contains_key(&id)
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        let idx = *self.node_map.get(&id)?;
        self.node_data.get(idx)?.as_ref()
    }

    /// Get a connection by id
    pub fn connection(&self, id: ConnectionId) -> Option<&ConnectionData> {
        let idx = *self.connection_map.get(&id)?;
        self.conn_data.get(idx)?.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let idx = *self.node_map.get(&id)?;
        self.node_data.get_mut(idx)?.as_mut()
    }

    pub(crate) fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut ConnectionData> {
        let idx = *self.connection_map.get(&id)?;
        self.conn_data.get_mut(idx)?.as_mut()
    }

    /// First connection exactly matching the ordered pair `(src, dest)`
    pub fn find_first_connection(&self, src: NodeId, dest: NodeId) -> Option<ConnectionId> {
        self.connection_map.iter().find_map(|(&cid, &idx)| {
            self.conn_data[idx]
                .as_ref()
                .filter(|c| c.src == src && c.dest == dest)
                .map(|_| cid)
        })
    }
}

impl GraphView for InteriorGraph {
    fn node_ids(&self) -> Vec<NodeId> {
        self.all_nodes()
    }

    fn connection_ids(&self) -> Vec<ConnectionId> {
        self.all_connections()
    }

    fn try_node(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id)
    }

    fn try_connection(&self, id: ConnectionId) -> Option<&ConnectionData> {
        self.connection(id)
    }

    fn node_count(&self) -> usize {
        self.node_map.len()
    }

    fn connection_count(&self) -> usize {
        self.connection_map.len()
    }
}
