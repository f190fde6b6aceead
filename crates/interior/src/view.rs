//! Read-only graph queries shared by the authoring graph and baked instances.

use glam::Vec3;
use interior_config::FACE_MATCH_TOLERANCE;

use crate::axis::FaceId;
use crate::types::{ConnectionData, ConnectionId, NodeData, NodeId};

/// Read access to a node/connection graph.
///
/// Implementors supply id enumeration and lookup; adjacency and face queries
/// are derived from those.
pub trait GraphView {
    /// Live node ids, ascending
    fn node_ids(&self) -> Vec<NodeId>;

    /// Live connection ids, ascending
    fn connection_ids(&self) -> Vec<ConnectionId>;

    fn try_node(&self, id: NodeId) -> Option<&NodeData>;

    fn try_connection(&self, id: ConnectionId) -> Option<&ConnectionData>;

    fn node_count(&self) -> usize {
        self.node_ids().len()
    }

    fn connection_count(&self) -> usize {
        self.connection_ids().len()
    }

    /// Destinations of the node's outgoing connections
    fn adjacent_nodes(&self, src: NodeId) -> Vec<NodeId> {
        self.node_out_connections(src)
            .into_iter()
            .filter_map(|cid| self.try_connection(cid).map(|c| c.dest))
            .collect()
    }

    /// The node's stored outgoing list
    fn node_out_connections(&self, id: NodeId) -> Vec<ConnectionId> {
        self.try_node(id)
            .map(|nd| nd.outgoing.clone())
            .unwrap_or_default()
    }

    /// Connections whose destination is the node
    fn node_in_connections(&self, id: NodeId) -> Vec<ConnectionId> {
        self.connection_ids()
            .into_iter()
            .filter(|&cid| self.try_connection(cid).is_some_and(|c| c.dest == id))
            .collect()
    }

    /// Connections touching the node at either end, without duplicates
    fn all_node_connections(&self, id: NodeId) -> Vec<ConnectionId> {
        // connection_ids() is ascending and unique, so a filter cannot duplicate
        self.connection_ids()
            .into_iter()
            .filter(|&cid| self.try_connection(cid).is_some_and(|c| c.involves(id)))
            .collect()
    }

    /// Connections whose portal sits on the given face of the node
    fn connections_on_face(&self, id: NodeId, face: FaceId) -> Vec<ConnectionId> {
        self.connections_on_face_within(id, face, FACE_MATCH_TOLERANCE)
    }

    /// As `connections_on_face`, with an explicit face-match tolerance.
    ///
    /// A portal is on the face when its center coordinate on the face axis is
    /// within `tolerance` of the face coordinate.
    fn connections_on_face_within(
        &self,
        id: NodeId,
        face: FaceId,
        tolerance: f32,
    ) -> Vec<ConnectionId> {
        let Some(nd) = self.try_node(id) else {
            return Vec::new();
        };
        let face_value = nd.face_axis_value(face.axis, face.dir);
        let i = face.axis.index();

        self.all_node_connections(id)
            .into_iter()
            .filter(|&cid| {
                self.try_connection(cid)
                    .is_some_and(|c| (c.portal.center()[i] - face_value).abs() <= tolerance)
            })
            .collect()
    }

    /// First node (lowest id) containing the point
    fn node_from_position(&self, pos: Vec3) -> Option<NodeId> {
        self.node_ids()
            .into_iter()
            .find(|&id| self.try_node(id).is_some_and(|nd| nd.contains_point(pos)))
    }
}
