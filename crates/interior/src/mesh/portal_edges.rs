//! Portal edge events for the face sweep.

use std::cmp::Ordering;

use crate::axis::FaceId;
use crate::types::NodeId;
use crate::view::GraphView;

/// Kind of edge event. `End` sorts before `Begin` at equal coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeKind {
    End,
    Begin,
}

/// Lateral extent of a portal on a face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralExtent {
    pub min: f32,
    pub max: f32,
}

/// A portal boundary crossed by the longitudinal sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEvent {
    /// Longitudinal coordinate of the boundary
    pub axis_value: f32,
    pub kind: EdgeKind,
    pub extent: LateralExtent,
}

impl EdgeEvent {
    fn sweep_order(&self, other: &Self) -> Ordering {
        self.axis_value
            .total_cmp(&other.axis_value)
            .then(self.kind.cmp(&other.kind))
    }
}

/// Begin/end events for every portal on a face, in sweep order.
///
/// Events run along the face's longitudinal axis and carry the portal's
/// lateral extent.
pub fn generate_portal_edges(
    view: &impl GraphView,
    node: NodeId,
    face: FaceId,
    tolerance: f32,
) -> Vec<EdgeEvent> {
    let [longitudinal, lateral] = face.axis.others();
    let (lo, la) = (longitudinal.index(), lateral.index());

    let mut events: Vec<EdgeEvent> = view
        .connections_on_face_within(node, face, tolerance)
        .into_iter()
        .filter_map(|cid| view.try_connection(cid))
        .flat_map(|cd| {
            let extent = LateralExtent {
                min: cd.portal.min[la],
                max: cd.portal.max[la],
            };
            [
                EdgeEvent {
                    axis_value: cd.portal.min[lo],
                    kind: EdgeKind::Begin,
                    extent,
                },
                EdgeEvent {
                    axis_value: cd.portal.max[lo],
                    kind: EdgeKind::End,
                    extent,
                },
            ]
        })
        .collect();

    // Stable, so coincident events keep their portal order
    events.sort_by(EdgeEvent::sweep_order);
    events
}
