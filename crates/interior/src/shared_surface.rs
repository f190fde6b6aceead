//! Shared-surface test between two axis-aligned boxes.
//!
//! Two boxes share a surface when they abut on exactly one axis (their
//! boundaries coincide within epsilon) and overlap by more than epsilon on
//! the other two. The shared surface is the rectangle where they touch.

use glam::Vec3;

use crate::aabb::{Aabb, PlanarArea};
use crate::axis::{ALL_AXES, Axis};

/// Relationship of two boxes along a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRelation {
    /// Separated by more than epsilon
    Disjoint,
    /// Boundaries coincide within epsilon
    Aligned,
    /// Intervals overlap by more than epsilon
    Overlapping,
}

/// Signed gap between the two boxes along `axis`.
///
/// Measured from the far end of the box with the smaller minimum to the near
/// end of the other. Positive when separated, negative when overlapping.
/// Equal minimums measure against the nearer of the two maximums.
pub fn relative_axis_separation(axis: Axis, a: &Aabb, b: &Aabb) -> f32 {
    let i = axis.index();
    if a.min[i] < b.min[i] {
        b.min[i] - a.max[i]
    } else if b.min[i] < a.min[i] {
        a.min[i] - b.max[i]
    } else {
        a.min[i] - a.max[i].min(b.max[i])
    }
}

/// Classify the relationship of two boxes along `axis`.
pub fn relative_axis_state(axis: Axis, a: &Aabb, b: &Aabb, epsilon: f32) -> AxisRelation {
    let separation = relative_axis_separation(axis, a, b);
    if separation > epsilon {
        AxisRelation::Disjoint
    } else if separation < -epsilon {
        AxisRelation::Overlapping
    } else {
        AxisRelation::Aligned
    }
}

/// Test whether two boxes share a surface and compute it.
///
/// Returns `None` unless exactly one axis is aligned and the other two
/// overlap. The result is symmetric in `a` and `b`.
pub fn test_for_shared_surface(a: &Aabb, b: &Aabb, epsilon: f32) -> Option<PlanarArea> {
    let mut aligned: Option<Axis> = None;
    for axis in ALL_AXES {
        match relative_axis_state(axis, a, b, epsilon) {
            AxisRelation::Aligned if aligned.is_none() => aligned = Some(axis),
            AxisRelation::Overlapping => {}
            _ => return None,
        }
    }
    let fixed_axis = aligned?;

    let f = fixed_axis.index();
    let fixed_value = if a.min[f] < b.min[f] {
        a.max[f]
    } else if b.min[f] < a.min[f] {
        b.max[f]
    } else {
        a.max[f].min(b.max[f])
    };

    let mut min = Vec3::ZERO;
    let mut max = Vec3::ZERO;
    min[f] = fixed_value;
    max[f] = fixed_value;
    for axis in fixed_axis.others() {
        let i = axis.index();
        min[i] = a.min[i].max(b.min[i]);
        max[i] = a.max[i].min(b.max[i]);
    }

    Some(PlanarArea {
        fixed_axis,
        fixed_value,
        min,
        max,
    })
}
