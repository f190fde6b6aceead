//! Principal axes, directions along them and node face identifiers.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// One of the three principal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
}

/// All axes in index order
pub const ALL_AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

/// Both directions, positive first
pub const BOTH_DIRECTIONS: [Direction; 2] = [Direction::Positive, Direction::Negative];

impl Axis {
    /// Index of this axis into a `Vec3`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two axes orthogonal to this one, in cyclic order.
    ///
    /// X -> (Y, Z), Y -> (Z, X), Z -> (X, Y). The first is the longitudinal
    /// axis of a face, the second the lateral one.
    #[inline]
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Vector with `value` on this axis and zero elsewhere
    pub fn vector(self, value: f32) -> Vec3 {
        self.unit() * value
    }
}

impl Direction {
    /// +1 for positive, -1 for negative
    #[inline]
    pub fn multiplier(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// One of the six sides of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId {
    pub axis: Axis,
    pub dir: Direction,
}

impl FaceId {
    pub fn new(axis: Axis, dir: Direction) -> Self {
        Self { axis, dir }
    }

    /// All six faces, axis-major with positive before negative
    pub fn all() -> impl Iterator<Item = FaceId> {
        ALL_AXES
            .into_iter()
            .flat_map(|axis| BOTH_DIRECTIONS.into_iter().map(move |dir| FaceId { axis, dir }))
    }

    /// Face on the other side of the box along the same axis
    pub fn opposite(self) -> Self {
        Self {
            axis: self.axis,
            dir: self.dir.opposite(),
        }
    }

    /// Bit index used for per-face smoothing groups (0..6)
    pub fn smoothing_index(self) -> u32 {
        let base = self.axis.index() as u32;
        match self.dir {
            Direction::Positive => base,
            Direction::Negative => base + ALL_AXES.len() as u32,
        }
    }
}

/// A face of a specific node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeFaceRef {
    pub node: NodeId,
    pub face: FaceId,
}

impl NodeFaceRef {
    pub fn new(node: NodeId, axis: Axis, dir: Direction) -> Self {
        Self {
            node,
            face: FaceId::new(axis, dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_axes_are_cyclic() {
        assert_eq!(Axis::X.others(), [Axis::Y, Axis::Z]);
        assert_eq!(Axis::Y.others(), [Axis::Z, Axis::X]);
        assert_eq!(Axis::Z.others(), [Axis::X, Axis::Y]);
        for axis in ALL_AXES {
            assert!(!axis.others().contains(&axis));
        }
    }

    #[test]
    fn test_all_faces_unique_smoothing_bits() {
        let bits: Vec<u32> = FaceId::all().map(FaceId::smoothing_index).collect();
        assert_eq!(bits, vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_axis_vector() {
        assert_eq!(Axis::Y.vector(3.0), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(Axis::Z.vector(-1.0)[Axis::Z.index()], -1.0);
    }
}
