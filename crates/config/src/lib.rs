//! Shared configuration for the interior editor
//!
//! This crate is the single source of truth for the tolerances and tunables
//! used while authoring an interior graph, baking it into a runtime instance
//! and extracting wall/floor/ceiling geometry from it.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Absolute distance under which two box boundaries count as coincident
pub const SHARED_SURFACE_EPSILON: f32 = 1.0e-4;

/// Tolerance used by interactive edits (snapping, connection pre-checks)
pub const EDITOR_EPSILON: f32 = 0.1;

/// Smallest extent a node may be resized to along any axis
pub const MINIMUM_NODE_SIZE: f32 = 10.0;

/// Edge length of a freshly spawned node
pub const DEFAULT_NODE_SIZE: f32 = 300.0;

/// Tolerance when matching a portal center against a node face coordinate
pub const FACE_MATCH_TOLERANCE: f32 = 0.01;

/// Tolerance used by the span sweep and for discarding sliver rectangles
pub const MESH_EPSILON: f32 = 0.01;

/// World units covered by one texture repeat
pub const TEX_REPEAT_UNITS: f32 = 100.0;

/// Largest per-axis subdivision count a bake will use
pub const MAX_SUBDIVISION: u32 = 64;

/// Settings for interactive graph editing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct EditorSettings {
    /// Tolerance for snapping and shared-surface checks made by the editor
    pub epsilon: f32,
    /// Minimum node extent on any axis
    pub minimum_node_size: f32,
    /// Size of a node spawned with nothing selected
    pub default_node_size: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            epsilon: EDITOR_EPSILON,
            minimum_node_size: MINIMUM_NODE_SIZE,
            default_node_size: DEFAULT_NODE_SIZE,
        }
    }
}

/// Collision channel the visibility oracle tests against during a bake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionChannel {
    #[default]
    WorldStatic,
    WorldDynamic,
    Visibility,
}

/// Settings for baking an authored graph into a runtime instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct BakeSettings {
    /// Sub-cells per node along X and along Y
    pub subdivision_xy: u32,
    /// Sub-cells per node along Z (usually coarser than XY)
    pub subdivision_z: u32,
    /// Channel passed to the visibility oracle
    pub collision_channel: CollisionChannel,
    /// Tolerance for the shared-surface tests used to promote authored portals
    pub surface_epsilon: f32,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            subdivision_xy: 1,
            subdivision_z: 1,
            collision_channel: CollisionChannel::default(),
            surface_epsilon: SHARED_SURFACE_EPSILON,
        }
    }
}

impl BakeSettings {
    /// Create bake settings with the given subdivision counts
    pub fn new(subdivision_xy: u32, subdivision_z: u32) -> Self {
        Self {
            subdivision_xy,
            subdivision_z,
            ..Self::default()
        }
    }

    /// Subdivision counts clamped to `1..=MAX_SUBDIVISION`
    pub fn subdivision_counts(&self) -> (u32, u32) {
        (
            self.subdivision_xy.clamp(1, MAX_SUBDIVISION),
            self.subdivision_z.clamp(1, MAX_SUBDIVISION),
        )
    }

    /// Number of sub-cells each authored node is split into
    pub fn cells_per_node(&self) -> u32 {
        let (xy, z) = self.subdivision_counts();
        xy * xy * z
    }
}

/// Settings for wall/floor/ceiling mesh extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct MeshSettings {
    /// Tolerance for span matching and sliver rejection
    pub epsilon: f32,
    /// Tolerance when deciding which face a portal sits on
    pub face_match_tolerance: f32,
    /// Divisor applied to planar coordinates to produce UVs
    pub tex_repeat_units: f32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            epsilon: MESH_EPSILON,
            face_match_tolerance: FACE_MATCH_TOLERANCE,
            tex_repeat_units: TEX_REPEAT_UNITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let editor = EditorSettings::default();
        assert_eq!(editor.epsilon, EDITOR_EPSILON);
        assert_eq!(editor.minimum_node_size, MINIMUM_NODE_SIZE);
        assert_eq!(editor.default_node_size, DEFAULT_NODE_SIZE);

        let mesh = MeshSettings::default();
        assert_eq!(mesh.tex_repeat_units, 100.0);
        assert_eq!(mesh.epsilon, 0.01);
    }

    #[test]
    fn test_subdivision_counts_clamp_zero() {
        let bake = BakeSettings::new(0, 0);
        assert_eq!(bake.subdivision_counts(), (1, 1));
        assert_eq!(bake.cells_per_node(), 1);

        let bake = BakeSettings::new(3, 2);
        assert_eq!(bake.cells_per_node(), 18);
        assert_eq!(bake.collision_channel, CollisionChannel::WorldStatic);
    }

    #[test]
    fn test_subdivision_counts_clamp_large() {
        let bake = BakeSettings::new(u32::MAX, 100_000);
        assert_eq!(bake.subdivision_counts(), (MAX_SUBDIVISION, MAX_SUBDIVISION));
        assert_eq!(bake.cells_per_node(), MAX_SUBDIVISION.pow(3));
    }

    #[test]
    fn test_bake_settings_from_json_uses_fields() {
        let json = r#"{"subdivision_xy":4,"subdivision_z":2,"collision_channel":"Visibility","surface_epsilon":0.001}"#;
        let bake: BakeSettings = serde_json::from_str(json).unwrap();
        assert_eq!(bake.subdivision_counts(), (4, 2));
        assert_eq!(bake.collision_channel, CollisionChannel::Visibility);
    }
}
