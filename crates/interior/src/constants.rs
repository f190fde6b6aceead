//! Canonical tolerances and sizes, re-exported from the settings crate.

pub use interior_config::{
    DEFAULT_NODE_SIZE, EDITOR_EPSILON, FACE_MATCH_TOLERANCE, MAX_SUBDIVISION, MESH_EPSILON,
    MINIMUM_NODE_SIZE, SHARED_SURFACE_EPSILON, TEX_REPEAT_UNITS,
};
