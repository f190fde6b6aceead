//! Editor manipulation of nodes, faces and portals
//!
//! These are the geometric edits an editor issues inside its own undo
//! transaction. Each one either applies completely or leaves the graph
//! untouched and reports `false`.
//!
//! Snapping moves a selection to the next distinct boundary of the
//! reference nodes in the requested direction:
//! 1. Collect the distinct boundary values of the selection along the axis
//! 2. Collect the same for the reference nodes
//! 3. Walk both lists in the snap direction and take the smallest offset
//!    that is larger than the editor epsilon

use glam::Vec3;
use interior_config::{EditorSettings, SHARED_SURFACE_EPSILON};
use tracing::{debug, trace};

use crate::aabb::{Aabb, PlanarArea};
use crate::axis::{Axis, Direction, FaceId, NodeFaceRef};
use crate::graph::InteriorGraph;
use crate::shared_surface::test_for_shared_surface;
use crate::types::{ConnectionId, NodeId};

/// Which node boundaries contribute to a distinct-value list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremity {
    /// Smallest minimum over all nodes
    OverallMinimum,
    /// Largest maximum over all nodes
    OverallMaximum,
    OverallExtremes,
    /// Every node's minimum
    IndividualMinimum,
    /// Every node's maximum
    IndividualMaximum,
    IndividualExtremes,
}

impl Extremity {
    fn minimums(self) -> Option<bool> {
        match self {
            Extremity::OverallMinimum | Extremity::OverallExtremes => Some(false),
            Extremity::IndividualMinimum | Extremity::IndividualExtremes => Some(true),
            _ => None,
        }
    }

    fn maximums(self) -> Option<bool> {
        match self {
            Extremity::OverallMaximum | Extremity::OverallExtremes => Some(false),
            Extremity::IndividualMaximum | Extremity::IndividualExtremes => Some(true),
            _ => None,
        }
    }
}

/// Add a node next to an anchor.
///
/// Without an anchor a default-size cube is centered on the origin. With an
/// anchor node the new node copies its size and is offset by that size along
/// every axis; with an anchor face it is placed flush against that face.
pub fn spawn_node_near(
    graph: &mut InteriorGraph,
    anchor: Option<(NodeId, Option<FaceId>)>,
    settings: &EditorSettings,
) -> NodeId {
    let mut center = Vec3::ZERO;
    let mut size = Vec3::splat(settings.default_node_size);

    if let Some((id, face)) = anchor {
        match graph.node(id) {
            Some(nd) => {
                let offset = match face {
                    Some(face) => {
                        let extent = nd.size()[face.axis.index()];
                        face.axis.vector(extent * face.dir.multiplier())
                    }
                    None => nd.size(),
                };
                center = nd.center() + offset;
                size = nd.size();
            }
            None => debug!("spawn_node_near: anchor {} is not a live node", id),
        }
    }

    let aabb = Aabb::from_center_half_size(center, size * 0.5);
    graph.add_node(aabb.min, aabb.max)
}

/// Translate every listed node. Unknown ids are skipped.
pub fn translate_nodes(graph: &mut InteriorGraph, ids: &[NodeId], offset: Vec3) {
    for &id in ids {
        let Some(mut nd) = graph.node(id).cloned() else {
            continue;
        };
        nd.offset(offset);
        graph.set_node_data(id, nd);
    }
    trace!("translate_nodes: {} nodes by {:?}", ids.len(), offset);
}

/// Move a single face by `offset` along its axis (world direction).
///
/// Refused when the node would end up no larger than the minimum node size
/// along that axis.
pub fn translate_face(
    graph: &mut InteriorGraph,
    face_ref: NodeFaceRef,
    offset: f32,
    settings: &EditorSettings,
) -> bool {
    let Some(mut nd) = graph.node(face_ref.node).cloned() else {
        return false;
    };
    let FaceId { axis, dir } = face_ref.face;
    nd.extend(axis, dir, offset * dir.multiplier());

    if nd.size()[axis.index()] <= settings.minimum_node_size {
        debug!(
            "translate_face: node {} would shrink below {} on {:?}",
            face_ref.node, settings.minimum_node_size, axis
        );
        return false;
    }
    graph.set_node_data(face_ref.node, nd)
}

/// Sorted boundary values of the nodes along `axis`, merging values closer
/// than `epsilon`.
pub fn distinct_axis_values(
    graph: &InteriorGraph,
    ids: &[NodeId],
    axis: Axis,
    extremity: Extremity,
    epsilon: f32,
) -> Vec<f32> {
    let i = axis.index();
    let mut minimums: Vec<f32> = Vec::new();
    let mut maximums: Vec<f32> = Vec::new();

    for nd in ids.iter().filter_map(|&id| graph.node(id)) {
        match extremity.minimums() {
            Some(true) => minimums.push(nd.min[i]),
            Some(false) => match minimums.first_mut() {
                Some(current) => *current = current.min(nd.min[i]),
                None => minimums.push(nd.min[i]),
            },
            None => {}
        }
        match extremity.maximums() {
            Some(true) => maximums.push(nd.max[i]),
            Some(false) => match maximums.first_mut() {
                Some(current) => *current = current.max(nd.max[i]),
                None => maximums.push(nd.max[i]),
            },
            None => {}
        }
    }

    let mut values = minimums;
    values.append(&mut maximums);
    values.sort_by(f32::total_cmp);
    values.dedup_by(|later, earlier| (*later - *earlier).abs() <= epsilon);
    values
}

/// Smallest positive offset moving any of `values` onto a later reference
/// value in direction `dir`.
///
/// Both lists must be sorted ascending. The result is a magnitude; zero
/// means there is nothing to snap to.
pub fn next_snap_offset(values: &[f32], reference: &[f32], dir: Direction, epsilon: f32) -> f32 {
    if values.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let m = dir.multiplier();
    let ordered = |list: &[f32]| -> Vec<f32> {
        match dir {
            Direction::Positive => list.iter().map(|v| v * m).collect(),
            Direction::Negative => list.iter().rev().map(|v| v * m).collect(),
        }
    };
    let values = ordered(values);
    let reference = ordered(reference);

    let mut closest = 0.0f32;
    let mut r = 0;
    for v in &values {
        while r < reference.len() {
            let offset = reference[r] - v;
            if offset > epsilon {
                if closest == 0.0 || offset < closest {
                    closest = offset;
                }
                break;
            }
            r += 1;
        }
    }
    closest
}

/// Live nodes not in `ids`
pub fn node_complement(graph: &InteriorGraph, ids: &[NodeId]) -> Vec<NodeId> {
    graph
        .all_nodes()
        .into_iter()
        .filter(|id| !ids.contains(id))
        .collect()
}

/// Snap nodes to the next boundary of the other nodes along `axis`.
///
/// Returns the applied offset, zero if nothing moved.
pub fn snap_nodes(
    graph: &mut InteriorGraph,
    ids: &[NodeId],
    axis: Axis,
    dir: Direction,
    settings: &EditorSettings,
) -> f32 {
    let reference = node_complement(graph, ids);
    let extremity = Extremity::IndividualExtremes;
    let values = distinct_axis_values(graph, ids, axis, extremity, settings.epsilon);
    let ref_values = distinct_axis_values(graph, &reference, axis, extremity, settings.epsilon);

    let offset = next_snap_offset(&values, &ref_values, dir, settings.epsilon) * dir.multiplier();
    if offset != 0.0 {
        translate_nodes(graph, ids, axis.vector(offset));
    }
    offset
}

/// Snap one face to the next boundary of the other nodes along its axis.
///
/// Returns true if the face moved.
pub fn snap_face(
    graph: &mut InteriorGraph,
    face_ref: NodeFaceRef,
    dir: Direction,
    settings: &EditorSettings,
) -> bool {
    let Some(nd) = graph.node(face_ref.node) else {
        return false;
    };
    let FaceId { axis, dir: side } = face_ref.face;
    let values = [nd.face_axis_value(axis, side)];

    let reference = node_complement(graph, &[face_ref.node]);
    let extremity = Extremity::IndividualExtremes;
    let ref_values = distinct_axis_values(graph, &reference, axis, extremity, settings.epsilon);

    let offset = next_snap_offset(&values, &ref_values, dir, settings.epsilon);
    offset != 0.0 && translate_face(graph, face_ref, offset * dir.multiplier(), settings)
}

/// Shared surface of a connection's endpoints
fn connection_surface(
    graph: &InteriorGraph,
    cid: ConnectionId,
    epsilon: f32,
) -> Option<PlanarArea> {
    let cd = graph.connection(cid)?;
    let src = graph.node(cd.src)?.aabb();
    let dest = graph.node(cd.dest)?.aabb();
    let surface = test_for_shared_surface(&src, &dest, epsilon);
    if surface.is_none() {
        debug!("connection {} endpoints no longer share a surface", cid);
    }
    surface
}

/// Replace a portal if it stays within the shared surface
fn try_set_portal(
    graph: &mut InteriorGraph,
    cid: ConnectionId,
    portal: Aabb,
    epsilon: f32,
) -> bool {
    let Some(surface) = connection_surface(graph, cid, epsilon) else {
        return false;
    };
    if !surface.contains_box(&portal) {
        trace!("portal {} edit rejected: outside shared surface", cid);
        return false;
    }
    let Some(mut cd) = graph.connection(cid).cloned() else {
        return false;
    };
    cd.portal = portal;
    graph.set_connection_data(cid, cd)
}

/// Move a portal within its shared surface
pub fn translate_portal(
    graph: &mut InteriorGraph,
    cid: ConnectionId,
    offset: Vec3,
    settings: &EditorSettings,
) -> bool {
    let Some(cd) = graph.connection(cid) else {
        return false;
    };
    let portal = cd.portal.shifted(offset);
    try_set_portal(graph, cid, portal, settings.epsilon)
}

/// Scale a portal about its center; each half extent is multiplied by
/// `1 + scale`.
pub fn resize_portal(
    graph: &mut InteriorGraph,
    cid: ConnectionId,
    scale: Vec3,
    settings: &EditorSettings,
) -> bool {
    let Some(cd) = graph.connection(cid) else {
        return false;
    };
    let half_size = cd.portal.half_size() * (Vec3::ONE + scale);
    let portal = Aabb::from_center_half_size(cd.portal.center(), half_size);
    try_set_portal(graph, cid, portal, settings.epsilon)
}

/// Slide a portal flush with the edge of its shared surface.
///
/// Portals never move along the surface's fixed axis. Returns true if the
/// portal moved.
pub fn snap_portal(
    graph: &mut InteriorGraph,
    cid: ConnectionId,
    axis: Axis,
    dir: Direction,
    settings: &EditorSettings,
) -> bool {
    let Some(surface) = connection_surface(graph, cid, settings.epsilon) else {
        return false;
    };
    if axis == surface.fixed_axis {
        return false;
    }
    let Some(cd) = graph.connection(cid) else {
        return false;
    };

    let i = axis.index();
    let delta = match dir {
        Direction::Positive => surface.max[i] - cd.portal.max[i],
        Direction::Negative => surface.min[i] - cd.portal.min[i],
    };
    if delta.abs() <= SHARED_SURFACE_EPSILON {
        return false;
    }
    translate_portal(graph, cid, axis.vector(delta), settings)
}
