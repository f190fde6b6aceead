//! Editing interface for InteriorGraph.
//!
//! Every method preserves the graph invariants: outgoing lists only name live
//! connections and removed ids disappear from every lookup. Unknown ids are a
//! caller error reported as `false`/`None`, never a panic.

use glam::Vec3;
use tracing::{debug, trace};

use crate::aabb::PlanarArea;
use crate::shared_surface::test_for_shared_surface;
use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};

use super::InteriorGraph;

impl InteriorGraph {
    /// Add a node spanning `min..max` and return its fresh id.
    ///
    /// Overlap with existing nodes is allowed.
    pub fn add_node(&mut self, min: Vec3, max: Vec3) -> NodeId {
        let idx = self.node_data.len();
        self.node_data.push(Some(NodeData::new(min, max)));

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.node_map.insert(id, idx);
        self.node_names.insert(id, format!("Node {}", id));

        trace!("add_node: {} -> slot {} ({:?}..{:?})", id, idx, min, max);
        id
    }

    /// Add a connection from `n1` to `n2` whose portal is `area`.
    ///
    /// Duplicates of an existing `(n1, n2)` pair are permitted here; use
    /// `connect_nodes` for the checked variant.
    pub fn add_connection(&mut self, n1: NodeId, n2: NodeId, area: &PlanarArea) -> ConnectionId {
        let idx = self.conn_data.len();
        self.conn_data.push(Some(ConnectionData::from_area(n1, n2, area)));

        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        self.connection_map.insert(id, idx);
        self.connection_names.insert(id, format!("Connection {}", id));

        if let Some(src) = self.node_mut(n1) {
            src.outgoing.push(id);
        } else {
            debug!("add_connection: source {} is not a live node", n1);
        }

        trace!("add_connection: {} ({} -> {})", id, n1, n2);
        id
    }

    /// Connect two nodes through their full shared surface.
    ///
    /// Returns `None` without modifying the graph if either node is unknown,
    /// a `(n1, n2)` connection already exists, or the nodes do not share a
    /// surface within `epsilon`.
    pub fn connect_nodes(&mut self, n1: NodeId, n2: NodeId, epsilon: f32) -> Option<ConnectionId> {
        let a = self.node(n1)?.aabb();
        let b = self.node(n2)?.aabb();

        if self.find_first_connection(n1, n2).is_some() {
            debug!("connect_nodes: {} -> {} already connected", n1, n2);
            return None;
        }

        let Some(surface) = test_for_shared_surface(&a, &b, epsilon) else {
            debug!("connect_nodes: {} and {} share no surface", n1, n2);
            return None;
        };

        Some(self.add_connection(n1, n2, &surface))
    }

    /// Remove a node and every connection into or out of it.
    ///
    /// Returns false if the id is unknown.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(&idx) = self.node_map.get(&id) else {
            return false;
        };

        let connections: Vec<ConnectionId> = self
            .connection_map
            .iter()
            .filter(|&(_, &cidx)| self.conn_data[cidx].as_ref().is_some_and(|c| c.involves(id)))
            .map(|(&cid, _)| cid)
            .collect();
        for cid in &connections {
            self.remove_connection(*cid);
        }

        // The slot is abandoned rather than compacted; packing renumbers
        self.node_data[idx] = None;
        self.node_names.remove(&id);
        self.node_map.remove(&id);

        trace!("remove_node: {} ({} connections)", id, connections.len());
        true
    }

    /// Remove a connection, detaching it from both endpoints.
    ///
    /// Returns false if the id is unknown.
    pub fn remove_connection(&mut self, id: ConnectionId) -> bool {
        let Some(idx) = self.connection_map.remove(&id) else {
            return false;
        };

        if let Some(conn) = self.conn_data[idx].take() {
            for endpoint in [conn.src, conn.dest] {
                if let Some(nd) = self.node_mut(endpoint) {
                    nd.outgoing.retain(|&out| out != id);
                }
            }
        }
        self.connection_names.remove(&id);

        trace!("remove_connection: {}", id);
        true
    }

    /// Remove every connection from `n1` to `n2`, returning how many were removed.
    ///
    /// Directional: connections from `n2` to `n1` are kept.
    pub fn remove_connections(&mut self, n1: NodeId, n2: NodeId) -> usize {
        let mut count = 0;
        while let Some(cid) = self.find_first_connection(n1, n2) {
            let removed = self.remove_connection(cid);
            debug_assert!(removed, "found connection must be removable");
            count += 1;
        }
        count
    }

    /// Replace a node's data in place. Returns false if the id is unknown.
    pub fn set_node_data(&mut self, id: NodeId, data: NodeData) -> bool {
        match self.node_mut(id) {
            Some(nd) => {
                *nd = data;
                true
            }
            None => false,
        }
    }

    /// Replace a connection's data in place. Returns false if the id is unknown.
    pub fn set_connection_data(&mut self, id: ConnectionId, data: ConnectionData) -> bool {
        match self.connection_mut(id) {
            Some(cd) => {
                *cd = data;
                true
            }
            None => false,
        }
    }
}
