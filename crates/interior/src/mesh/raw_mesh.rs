//! Engine-neutral triangle soup produced by mesh extraction.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Surface material slot, by face orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum MaterialKind {
    Floor = 0,
    Wall = 1,
    Ceiling = 2,
}

impl MaterialKind {
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// One triangle corner: a vertex reference plus its texture coordinate.
///
/// Laid out for direct upload; see [`RawMesh::wedge_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Wedge {
    pub index: u32,
    pub uv: [f32; 2],
}

/// Indexed triangle mesh with per-triangle material and smoothing data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    pub vertex_positions: Vec<Vec3>,
    /// Three per triangle
    pub wedges: Vec<Wedge>,
    /// One per triangle
    pub face_materials: Vec<MaterialKind>,
    /// One per triangle, a single bit per box face
    pub face_smoothing_masks: Vec<u32>,
}

impl RawMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.face_materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
    }

    /// Append a quad as two triangles, `(0, 2, 1)` and `(0, 3, 2)`.
    ///
    /// `uv_of` maps a corner position to its texture coordinate.
    pub fn push_quad(
        &mut self,
        corners: [Vec3; 4],
        material: MaterialKind,
        smoothing_mask: u32,
        uv_of: impl Fn(Vec3) -> Vec2,
    ) {
        let base = self.vertex_positions.len() as u32;
        self.vertex_positions.extend_from_slice(&corners);

        for tri in [[0, 2, 1], [0, 3, 2]] {
            for corner in tri {
                self.wedges.push(Wedge {
                    index: base + corner,
                    uv: uv_of(corners[corner as usize]).to_array(),
                });
            }
            self.face_materials.push(material);
            self.face_smoothing_masks.push(smoothing_mask);
        }
    }

    /// Corner positions of a triangle
    pub fn triangle(&self, tri: usize) -> Option<[Vec3; 3]> {
        let wedges = self.wedges.get(tri * 3..tri * 3 + 3)?;
        let mut out = [Vec3::ZERO; 3];
        for (slot, wedge) in out.iter_mut().zip(wedges) {
            *slot = *self.vertex_positions.get(wedge.index as usize)?;
        }
        Some(out)
    }

    /// Unit normal of a triangle from its winding
    pub fn triangle_normal(&self, tri: usize) -> Option<Vec3> {
        let [a, b, c] = self.triangle(tri)?;
        (b - a).cross(c - a).try_normalize()
    }

    /// Total surface area
    pub fn surface_area(&self) -> f32 {
        (0..self.triangle_count())
            .filter_map(|tri| self.triangle(tri))
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum()
    }

    /// The wedge stream as raw bytes
    pub fn wedge_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.wedges)
    }

    /// Check that the mesh is usable.
    ///
    /// The mesh must be non-empty, per-triangle arrays must agree in length,
    /// every wedge must reference an existing vertex and every position must
    /// be finite.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.is_empty() || self.vertex_positions.is_empty() {
            return Err(MeshError::Degenerate("mesh has no geometry".into()));
        }
        if self.wedges.len() % 3 != 0 {
            return Err(MeshError::Degenerate(format!(
                "{} wedges do not form whole triangles",
                self.wedges.len()
            )));
        }
        let triangles = self.wedges.len() / 3;
        if self.face_materials.len() != triangles || self.face_smoothing_masks.len() != triangles {
            return Err(MeshError::Degenerate(format!(
                "{} triangles but {} materials and {} smoothing masks",
                triangles,
                self.face_materials.len(),
                self.face_smoothing_masks.len()
            )));
        }
        let vertex_count = self.vertex_positions.len();
        if let Some(bad) = self.wedges.iter().find(|w| w.index as usize >= vertex_count) {
            return Err(MeshError::Degenerate(format!(
                "wedge references vertex {} of {}",
                bad.index, vertex_count
            )));
        }
        if self.vertex_positions.iter().any(|p| !p.is_finite()) {
            return Err(MeshError::Degenerate("non-finite vertex position".into()));
        }
        Ok(())
    }
}
