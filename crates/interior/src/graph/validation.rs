//! Invariant checks for InteriorGraph.

use crate::aabb::PlanarArea;
use crate::error::GraphError;
use crate::shared_surface::test_for_shared_surface;

use super::InteriorGraph;

impl InteriorGraph {
    /// Validate the graph invariants.
    ///
    /// Checks that:
    /// 1. Every outgoing entry names a live connection sourced at its node
    /// 2. Every connection's endpoints are live nodes
    /// 3. Every connection's endpoints share a surface within `epsilon`
    /// 4. Every portal lies within that shared surface on both free axes
    pub fn validate(&self, epsilon: f32) -> Result<(), GraphError> {
        for &id in self.node_map.keys() {
            let Some(nd) = self.node(id) else {
                return Err(GraphError::UnknownNode(id));
            };
            for &out in &nd.outgoing {
                if !self.connection(out).is_some_and(|c| c.src == id) {
                    return Err(GraphError::DanglingOutgoing {
                        node: id,
                        connection: out,
                    });
                }
            }
        }

        for &cid in self.connection_map.keys() {
            let Some(cd) = self.connection(cid) else {
                return Err(GraphError::UnknownConnection(cid));
            };
            let src = self.node(cd.src).ok_or(GraphError::UnknownNode(cd.src))?;
            let dest = self.node(cd.dest).ok_or(GraphError::UnknownNode(cd.dest))?;

            let surface = test_for_shared_surface(&src.aabb(), &dest.aabb(), epsilon)
                .ok_or(GraphError::NoSharedSurface(cid))?;
            let widened = widen(&surface, epsilon);
            if !widened.contains_box(&cd.portal) {
                return Err(GraphError::PortalOutOfBounds(cid));
            }
        }

        Ok(())
    }
}

/// Grow the free-axis extents of an area by `epsilon` to absorb rounding.
fn widen(area: &PlanarArea, epsilon: f32) -> PlanarArea {
    let mut widened = *area;
    for axis in area.fixed_axis.others() {
        widened.min[axis.index()] -= epsilon;
        widened.max[axis.index()] += epsilon;
    }
    widened
}
