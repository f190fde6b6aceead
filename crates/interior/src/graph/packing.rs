//! Packing: renumber sparse ids into dense, position-as-id arrays.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::GraphError;
use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};

use super::InteriorGraph;

/// Old-id to packed-id mapping produced by packing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdRemap {
    pub nodes: BTreeMap<NodeId, NodeId>,
    pub connections: BTreeMap<ConnectionId, ConnectionId>,
}

/// A graph whose ids equal array positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedGraph {
    pub nodes: Vec<NodeData>,
    pub connections: Vec<ConnectionData>,
    /// Parallel to `nodes`
    pub node_names: Vec<String>,
    /// Parallel to `connections`
    pub connection_names: Vec<String>,
}

/// Condense sparse node/connection maps into dense arrays.
///
/// Ids are assigned in ascending order of the old ids. Connections whose
/// source or destination is missing are dropped before connection ids are
/// assigned, and outgoing lists are filtered through the remap, so the
/// result never refers to a dropped connection.
pub(crate) fn condense(
    nodes: BTreeMap<NodeId, NodeData>,
    connections: BTreeMap<ConnectionId, ConnectionData>,
) -> (Vec<NodeData>, Vec<ConnectionData>, IdRemap) {
    let mut remap = IdRemap::default();
    for (packed, &old) in nodes.keys().enumerate() {
        remap.nodes.insert(old, NodeId(packed as u32));
    }

    let total_connections = connections.len();
    let live: Vec<(ConnectionId, ConnectionData)> = connections
        .into_iter()
        .filter(|(_, c)| remap.nodes.contains_key(&c.src) && remap.nodes.contains_key(&c.dest))
        .collect();
    if live.len() != total_connections {
        debug!(
            "condense: dropped {} connections with missing endpoints",
            total_connections - live.len()
        );
    }
    for (packed, (old, _)) in live.iter().enumerate() {
        remap.connections.insert(*old, ConnectionId(packed as u32));
    }

    let packed_nodes: Vec<NodeData> = nodes
        .into_values()
        .map(|mut nd| {
            nd.outgoing = nd
                .outgoing
                .iter()
                .filter_map(|out| remap.connections.get(out).copied())
                .collect();
            nd
        })
        .collect();

    let packed_connections: Vec<ConnectionData> = live
        .into_iter()
        .map(|(_, mut cd)| {
            cd.src = remap.nodes[&cd.src];
            cd.dest = remap.nodes[&cd.dest];
            cd
        })
        .collect();

    (packed_nodes, packed_connections, remap)
}

impl InteriorGraph {
    /// Pack the live graph into dense arrays.
    ///
    /// The graph itself is not modified.
    pub fn pack(&self) -> (PackedGraph, IdRemap) {
        let nodes: BTreeMap<NodeId, NodeData> = self
            .node_map
            .keys()
            .filter_map(|&id| self.node(id).map(|nd| (id, nd.clone())))
            .collect();
        let connections: BTreeMap<ConnectionId, ConnectionData> = self
            .connection_map
            .keys()
            .filter_map(|&id| self.connection(id).map(|cd| (id, cd.clone())))
            .collect();

        let (nodes, connections, remap) = condense(nodes, connections);

        let node_names = remap
            .nodes
            .keys()
            .map(|id| self.node_names.get(id).cloned().unwrap_or_default())
            .collect();
        let connection_names = remap
            .connections
            .keys()
            .map(|id| self.connection_names.get(id).cloned().unwrap_or_default())
            .collect();

        (
            PackedGraph {
                nodes,
                connections,
                node_names,
                connection_names,
            },
            remap,
        )
    }

    /// Rebuild an editable graph from packed arrays.
    ///
    /// Ids equal array positions, outgoing lists are rebuilt from connection
    /// sources and the id counters resume after the last record. Missing
    /// names are regenerated.
    pub fn from_packed(packed: PackedGraph) -> Result<Self, GraphError> {
        let node_count = packed.nodes.len();
        for (record, cd) in packed.connections.iter().enumerate() {
            for endpoint in [cd.src, cd.dest] {
                if endpoint.0 as usize >= node_count {
                    return Err(GraphError::InvalidRecordIndex {
                        record,
                        index: endpoint.0,
                        len: node_count,
                    });
                }
            }
        }

        let mut graph = InteriorGraph::new();
        for (idx, mut nd) in packed.nodes.into_iter().enumerate() {
            nd.outgoing.clear();
            let id = NodeId(idx as u32);
            graph.node_data.push(Some(nd));
            graph.node_map.insert(id, idx);
            let name = packed
                .node_names
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("Node {}", id));
            graph.node_names.insert(id, name);
        }

        for (idx, cd) in packed.connections.into_iter().enumerate() {
            let id = ConnectionId(idx as u32);
            if let Some(Some(src)) = graph.node_data.get_mut(cd.src.0 as usize) {
                src.outgoing.push(id);
            }
            graph.conn_data.push(Some(cd));
            graph.connection_map.insert(id, idx);
            let name = packed
                .connection_names
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("Connection {}", id));
            graph.connection_names.insert(id, name);
        }

        graph.next_node_id = graph.node_map.len() as u32;
        graph.next_connection_id = graph.connection_map.len() as u32;
        Ok(graph)
    }
}
