//! Axis-aligned boxes and planar areas.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::axis::Axis;

/// Axis-aligned bounding box.
///
/// `min[i] <= max[i]` is expected on every axis but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min/max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from a center point and half extents.
    pub fn from_center_half_size(center: Vec3, half_size: Vec3) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Get the center of this AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extent on each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half extent on each axis.
    pub fn half_size(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Check if this AABB contains a point (boundary inclusive).
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Translate by `offset`.
    pub fn shifted(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Check that this box lies within `[min, max]` on a single axis.
    pub fn is_within_bounds(&self, axis: Axis, min: f32, max: f32) -> bool {
        let i = axis.index();
        self.min[i] >= min && self.max[i] <= max
    }
}

/// A rectangle on the plane `fixed_axis == fixed_value`.
///
/// `min`/`max` are full 3D corners; both carry `fixed_value` on the fixed axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarArea {
    pub fixed_axis: Axis,
    pub fixed_value: f32,
    pub min: Vec3,
    pub max: Vec3,
}

impl PlanarArea {
    /// The area as a zero-thickness box.
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }

    /// Extents on the two free axes, in `Axis::others` order.
    pub fn free_extents(&self) -> [(f32, f32); 2] {
        self.fixed_axis
            .others()
            .map(|axis| (self.min[axis.index()], self.max[axis.index()]))
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        let [(a0, a1), (b0, b1)] = self.free_extents();
        (a1 - a0) * (b1 - b0)
    }

    /// Check that `portal` lies within this area on both free axes.
    pub fn contains_box(&self, portal: &Aabb) -> bool {
        self.fixed_axis.others().into_iter().all(|axis| {
            portal.is_within_bounds(axis, self.min[axis.index()], self.max[axis.index()])
        })
    }
}

/// 2D axis-aligned rectangle in face-local coordinates.
///
/// X is longitudinal, Y lateral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect2 {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn area(&self) -> f32 {
        let size = self.size();
        size.x * size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_inclusive() {
        let b = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
        assert!(b.contains_point(Vec3::splat(5.0)));
        assert!(b.contains_point(Vec3::new(10.0, 0.0, 10.0)));
        assert!(!b.contains_point(Vec3::new(10.1, 5.0, 5.0)));
    }

    #[test]
    fn test_planar_area_contains_box() {
        let area = PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 5.0,
            min: Vec3::new(5.0, 0.0, 0.0),
            max: Vec3::new(5.0, 10.0, 10.0),
        };
        assert_eq!(area.area(), 100.0);

        let inside = Aabb::new(Vec3::new(5.0, 2.0, 2.0), Vec3::new(5.0, 4.0, 4.0));
        let outside = inside.shifted(Vec3::new(0.0, 7.0, 0.0));
        assert!(area.contains_box(&inside));
        assert!(!area.contains_box(&outside));
    }
}
