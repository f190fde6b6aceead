//! Graph bake pipeline
//!
//! Turns an authored graph into a packed runtime [`GraphInstance`]:
//! 1. **Subdivide** every authored node into a regular grid of cells, connect
//!    neighbouring cells and promote authored portals onto the cells they touch
//! 2. **Cull** cells whose center the visibility oracle reports as hidden
//! 3. **Pack** the surviving sparse ids into dense arrays
//!
//! The authored graph is only read. Each stage works on a [`BuildGraph`]
//! keyed by sparse ids so removals never renumber anything until packing.

mod cull;
mod pack;
mod subdivide;

use std::collections::BTreeMap;

use glam::Vec3;
use interior_config::{BakeSettings, CollisionChannel};
use tracing::info;

use crate::graph::InteriorGraph;
use crate::instance::GraphInstance;
use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};

pub use cull::remove_hidden_nodes;
pub use pack::pack_build_graph;
pub use subdivide::subdivide;

/// Answers whether a world-space point is occluded by static geometry.
///
/// Supplied by the host environment, which captures whatever world context
/// it needs. Queries are synchronous and side-effect free.
pub trait VisibilityOracle {
    fn is_point_hidden(&self, point: Vec3, channel: CollisionChannel) -> bool;
}

impl<F> VisibilityOracle for F
where
    F: Fn(Vec3, CollisionChannel) -> bool,
{
    fn is_point_hidden(&self, point: Vec3, channel: CollisionChannel) -> bool {
        self(point, channel)
    }
}

/// Oracle for worlds without occluding geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverHidden;

impl VisibilityOracle for NeverHidden {
    fn is_point_hidden(&self, _point: Vec3, _channel: CollisionChannel) -> bool {
        false
    }
}

/// Intermediate sparse graph used between bake stages
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    pub nodes: BTreeMap<NodeId, NodeData>,
    pub connections: BTreeMap<ConnectionId, ConnectionData>,
    pub node_names: BTreeMap<NodeId, String>,
    next_node_id: u32,
    next_connection_id: u32,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under a fresh sequential id
    pub fn insert_node(&mut self, data: NodeData, name: String) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(id, data);
        self.node_names.insert(id, name);
        id
    }

    /// Insert a connection under a fresh sequential id and register it as
    /// outgoing on its source.
    pub fn insert_connection(&mut self, data: ConnectionData) -> ConnectionId {
        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        if let Some(src) = self.nodes.get_mut(&data.src) {
            src.outgoing.push(id);
        }
        self.connections.insert(id, data);
        id
    }
}

/// Bake an authored graph into a runtime instance.
///
/// An empty authored graph yields an empty instance.
pub fn build_graph(
    graph: &InteriorGraph,
    settings: &BakeSettings,
    oracle: &impl VisibilityOracle,
) -> GraphInstance {
    let mut build = subdivide(graph, settings);
    let subdivided = build.nodes.len();

    let culled = remove_hidden_nodes(&mut build, oracle, settings.collision_channel);
    let instance = pack_build_graph(build);

    info!(
        "build_graph: {} authored nodes -> {} cells, {} hidden, {} nodes / {} connections packed",
        graph.node_map.len(),
        subdivided,
        culled,
        instance.nodes.len(),
        instance.connections.len()
    );
    instance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aabb::{PlanarArea, Rect2};
    use crate::axis::{Axis, Direction, FaceId};
    use crate::mesh::split_face;
    use crate::view::GraphView;
    use interior_config::{MeshSettings, SHARED_SURFACE_EPSILON};

    #[test]
    fn test_empty_graph_bakes_to_empty_instance() {
        let graph = InteriorGraph::new();
        let inst = build_graph(&graph, &BakeSettings::new(4, 2), &NeverHidden);
        assert!(inst.is_empty());
        assert!(inst.connections.is_empty());
    }

    #[test]
    fn test_single_node_without_subdivision() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let inst = build_graph(&graph, &BakeSettings::default(), &NeverHidden);

        assert_eq!(inst.nodes.len(), 1);
        assert!(inst.connections.is_empty());
        assert_eq!(inst.node_name(NodeId(0)), Some("Node 0[0][0][0]:0-(0)"));
    }

    #[test]
    fn test_single_node_with_unmatched_portal() {
        let mut graph = InteriorGraph::new();
        let room = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let portal = PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 300.0,
            min: Vec3::new(300.0, 100.0, 100.0),
            max: Vec3::new(300.0, 200.0, 200.0),
        };
        graph.add_connection(room, room, &portal);

        let inst = build_graph(&graph, &BakeSettings::default(), &NeverHidden);
        assert_eq!(inst.nodes.len(), 1);
        assert!(inst.connections.is_empty());
        assert!(inst.nodes[0].outgoing.is_empty());

        // The authored +X wall is cut around the opening, with no slivers
        let settings = MeshSettings::default();
        let face = FaceId::new(Axis::X, Direction::Positive);
        let rects = split_face(&graph, room, face, &settings).unwrap();
        assert_eq!(rects.len(), 4);
        let area: f32 = rects.iter().map(Rect2::area).sum();
        assert_eq!(area, 300.0 * 300.0 - 100.0 * 100.0);
        for rc in &rects {
            assert!(rc.size().min_element() > settings.epsilon);
        }
    }

    #[test]
    fn test_hidden_neighbour_is_culled_with_its_portal() {
        let mut graph = InteriorGraph::new();
        let room = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let closet = graph.add_node(Vec3::new(300.0, 100.0, 0.0), Vec3::new(400.0, 200.0, 300.0));
        graph.connect_nodes(room, closet, SHARED_SURFACE_EPSILON).unwrap();

        // Everything beyond x = 300 is inside solid geometry
        let oracle = |p: Vec3, _channel: CollisionChannel| p.x > 300.0;
        let inst = build_graph(&graph, &BakeSettings::default(), &oracle);

        assert_eq!(inst.nodes.len(), 1);
        assert!(inst.connections.is_empty());
        assert!(inst.nodes[0].outgoing.is_empty());
    }

    #[test]
    fn test_subdivided_pair_keeps_consistent_references() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::new(200.0, 200.0, 100.0));
        let b = graph.add_node(Vec3::new(200.0, 0.0, 0.0), Vec3::new(400.0, 200.0, 100.0));
        graph.connect_nodes(a, b, SHARED_SURFACE_EPSILON).unwrap();

        // Hide one corner cell of the first room
        let oracle = |p: Vec3, _channel: CollisionChannel| p.x < 100.0 && p.y < 100.0;
        let inst = build_graph(&graph, &BakeSettings::new(2, 1), &oracle);

        assert_eq!(inst.nodes.len(), 7);
        for (idx, nd) in inst.nodes.iter().enumerate() {
            for &out in &nd.outgoing {
                assert_eq!(inst.connection(out).src, NodeId(idx as u32));
            }
        }
        for cd in &inst.connections {
            assert!(inst.try_node(cd.src).is_some());
            assert!(inst.try_node(cd.dest).is_some());
        }
        // Every connection is listed as outgoing exactly once
        let listed: usize = inst.nodes.iter().map(|nd| nd.outgoing.len()).sum();
        assert_eq!(listed, inst.connections.len());
    }
}
