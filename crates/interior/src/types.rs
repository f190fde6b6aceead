//! Node and connection records shared by the authoring graph and baked instances.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aabb::{Aabb, PlanarArea};
use crate::axis::{ALL_AXES, Axis, Direction, FaceId};

/// Type-safe node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Type-safe connection identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An axis-aligned room/cell volume
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    pub min: Vec3,
    pub max: Vec3,
    /// Connections originating at this node
    pub outgoing: Vec<ConnectionId>,
}

impl NodeData {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            outgoing: Vec::new(),
        }
    }

    pub fn from_aabb(aabb: Aabb) -> Self {
        Self::new(aabb.min, aabb.max)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_size(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Volume in double precision
    pub fn volume(&self) -> f64 {
        let extent = self.size();
        extent.x as f64 * extent.y as f64 * extent.z as f64
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.aabb().contains_point(point)
    }

    /// Coordinate of the given face along its axis
    pub fn face_axis_value(&self, axis: Axis, dir: Direction) -> f32 {
        match dir {
            Direction::Positive => self.max[axis.index()],
            Direction::Negative => self.min[axis.index()],
        }
    }

    pub fn face_center(&self, axis: Axis, dir: Direction) -> Vec3 {
        let mut center = self.center();
        center[axis.index()] = self.face_axis_value(axis, dir);
        center
    }

    /// Outward-facing unit normal of a face
    pub fn face_normal(&self, axis: Axis, dir: Direction) -> Vec3 {
        axis.vector(dir.multiplier())
    }

    /// Unit tangent of a face.
    ///
    /// Positive faces run along the longitudinal axis, negative faces along
    /// the lateral one, matching the swapped winding of extracted quads.
    pub fn face_tangent(&self, axis: Axis, dir: Direction) -> Vec3 {
        let [longitudinal, lateral] = axis.others();
        match dir {
            Direction::Positive => longitudinal.unit(),
            Direction::Negative => lateral.unit(),
        }
    }

    /// The face rectangle as a planar area
    pub fn face_area(&self, face: FaceId) -> PlanarArea {
        let value = self.face_axis_value(face.axis, face.dir);
        let mut min = self.min;
        let mut max = self.max;
        min[face.axis.index()] = value;
        max[face.axis.index()] = value;
        PlanarArea {
            fixed_axis: face.axis,
            fixed_value: value,
            min,
            max,
        }
    }

    /// Translate the node
    pub fn offset(&mut self, offset: Vec3) {
        self.min += offset;
        self.max += offset;
    }

    /// Move one face outwards by `amount` (inwards when negative)
    pub fn extend(&mut self, axis: Axis, dir: Direction, amount: f32) {
        let i = axis.index();
        match dir {
            Direction::Positive => self.max[i] += amount,
            Direction::Negative => self.min[i] -= amount,
        }
    }
}

/// A rectangular opening from `src` into `dest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionData {
    pub src: NodeId,
    pub dest: NodeId,
    /// Zero extent on the shared axis
    pub portal: Aabb,
}

impl ConnectionData {
    pub fn new(src: NodeId, dest: NodeId, portal: Aabb) -> Self {
        Self { src, dest, portal }
    }

    pub fn from_area(src: NodeId, dest: NodeId, area: &PlanarArea) -> Self {
        Self::new(src, dest, area.to_aabb())
    }

    /// The portal as a planar area, fixed on its thinnest axis
    pub fn portal_area(&self) -> PlanarArea {
        let size = self.portal.size();
        let fixed_axis = ALL_AXES
            .into_iter()
            .min_by(|a, b| size[a.index()].total_cmp(&size[b.index()]))
            .unwrap_or(Axis::X);
        PlanarArea {
            fixed_axis,
            fixed_value: self.portal.min[fixed_axis.index()],
            min: self.portal.min,
            max: self.portal.max,
        }
    }

    /// True if the connection touches `node` at either end
    pub fn involves(&self, node: NodeId) -> bool {
        self.src == node || self.dest == node
    }
}
