//! Persisted graph records.
//!
//! Records reference each other purely by array position. Saving packs the
//! graph so positions are dense; loading rebuilds ids equal to positions.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aabb::Aabb;
use crate::error::GraphError;
use crate::graph::{InteriorGraph, PackedGraph};
use crate::types::{ConnectionData, NodeData, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub min: Vec3,
    pub max: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Position of the source node record
    pub src: u32,
    /// Position of the destination node record
    pub dest: u32,
    pub portal: Aabb,
}

/// Serializable form of an authored graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedGraph {
    pub nodes: Vec<NodeRecord>,
    pub connections: Vec<ConnectionRecord>,
    /// Parallel to `nodes`
    #[serde(default)]
    pub node_names: Vec<String>,
    /// Parallel to `connections`
    #[serde(default)]
    pub connection_names: Vec<String>,
}

impl PersistedGraph {
    pub fn from_graph(graph: &InteriorGraph) -> Self {
        let (packed, _) = graph.pack();
        let persisted = Self {
            nodes: packed
                .nodes
                .iter()
                .map(|nd| NodeRecord {
                    min: nd.min,
                    max: nd.max,
                })
                .collect(),
            connections: packed
                .connections
                .iter()
                .map(|cd| ConnectionRecord {
                    src: cd.src.0,
                    dest: cd.dest.0,
                    portal: cd.portal,
                })
                .collect(),
            node_names: packed.node_names,
            connection_names: packed.connection_names,
        };
        debug!(
            "persist: saved {} nodes, {} connections",
            persisted.nodes.len(),
            persisted.connections.len()
        );
        persisted
    }

    /// Rebuild an editable graph.
    ///
    /// Fails with [`GraphError::InvalidRecordIndex`] if a connection record
    /// names a node position that does not exist.
    pub fn to_graph(&self) -> Result<InteriorGraph, GraphError> {
        let packed = PackedGraph {
            nodes: self
                .nodes
                .iter()
                .map(|rec| NodeData::new(rec.min, rec.max))
                .collect(),
            connections: self
                .connections
                .iter()
                .map(|rec| ConnectionData::new(NodeId(rec.src), NodeId(rec.dest), rec.portal))
                .collect(),
            node_names: self.node_names.clone(),
            connection_names: self.connection_names.clone(),
        };
        InteriorGraph::from_packed(packed)
    }
}
