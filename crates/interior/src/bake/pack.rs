//! Final bake stage: condense the build graph into a runtime instance.

use std::collections::BTreeMap;

use tracing::debug;

use crate::graph::packing::condense;
use crate::instance::GraphInstance;
use crate::types::ConnectionId;

use super::BuildGraph;

/// Pack a build graph into a dense [`GraphInstance`].
///
/// Ids are assigned in ascending order of build ids. Connections with a
/// missing endpoint are dropped. Node names gain the packed index and the
/// final outgoing count, as `"{name}:{index}-({outgoing})"`.
pub fn pack_build_graph(build: BuildGraph) -> GraphInstance {
    let BuildGraph {
        nodes,
        connections,
        node_names: build_names,
        ..
    } = build;

    let (nodes, connections, remap) = condense(nodes, connections);

    let mut node_names = BTreeMap::new();
    for (old, &new) in &remap.nodes {
        let base = build_names
            .get(old)
            .cloned()
            .unwrap_or_else(|| format!("Node {}", old));
        let outgoing = nodes[new.0 as usize].outgoing.len();
        node_names.insert(new, format!("{}:{}-({})", base, new, outgoing));
    }

    let connection_names: BTreeMap<ConnectionId, String> = connections
        .iter()
        .enumerate()
        .map(|(idx, cd)| {
            let id = ConnectionId(idx as u32);
            (id, format!("Connection {} ({} -> {})", id, cd.src, cd.dest))
        })
        .collect();

    debug!(
        "pack_build_graph: {} nodes, {} connections",
        nodes.len(),
        connections.len()
    );

    GraphInstance {
        nodes,
        connections,
        node_names,
        connection_names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aabb::Aabb;
    use crate::types::{ConnectionData, NodeData, NodeId};
    use glam::Vec3;

    #[test]
    fn test_pack_regenerates_names() {
        let mut build = BuildGraph::new();
        let a = build.insert_node(NodeData::new(Vec3::ZERO, Vec3::ONE), "Hall[0][0][0]".into());
        let b = build.insert_node(
            NodeData::new(Vec3::X, Vec3::new(2.0, 1.0, 1.0)),
            "Hall[1][0][0]".into(),
        );
        build.insert_connection(ConnectionData::new(a, b, Aabb::new(Vec3::X, Vec3::ONE)));
        build.nodes.remove(&a);

        let inst = pack_build_graph(build);
        assert_eq!(inst.nodes.len(), 1);
        assert!(inst.connections.is_empty());
        assert_eq!(inst.node_name(NodeId(0)), Some("Hall[1][0][0]:0-(0)"));
    }

    #[test]
    fn test_pack_is_deterministic() {
        let build = || {
            let mut build = BuildGraph::new();
            for i in 0..5 {
                let x = i as f32;
                build.insert_node(
                    NodeData::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 1.0, 1.0)),
                    format!("cell {}", i),
                );
            }
            for i in 0..4 {
                let x = i as f32 + 1.0;
                let portal = Aabb::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x, 1.0, 1.0));
                build.insert_connection(ConnectionData::new(NodeId(i), NodeId(i + 1), portal));
            }
            build.nodes.remove(&NodeId(2));
            build
        };

        let first = pack_build_graph(build());
        let second = pack_build_graph(build());
        assert_eq!(first, second);
        // 0->1 and 3->4 survive; 1->2 and 2->3 lose an endpoint
        assert_eq!(first.connections.len(), 2);
        assert_eq!(first.connections[1].src, NodeId(2));
        assert_eq!(first.connections[1].dest, NodeId(3));
        assert_eq!(first.node_name(NodeId(0)), Some("cell 0:0-(1)"));
    }
}
