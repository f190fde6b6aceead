//! Interior spatial graph - authoring model, bake pipeline and mesh extraction
//!
//! This crate provides:
//! - [`graph::InteriorGraph`] - Editable node/connection graph with stable ids
//! - [`shared_surface`] - Shared-surface test used to establish adjacency
//! - [`bake`] - Subdivide, cull and pack an authored graph into a [`instance::GraphInstance`]
//! - [`mesh`] - Wall/floor/ceiling extraction through a per-face span sweep
//! - [`manipulation`] - Editor edits: spawning, translating, snapping
//! - [`selection`] - Editor selection model
//! - [`persist`] - Position-indexed records for saving and loading

pub mod aabb;
pub mod axis;
pub mod bake;
pub mod constants;
pub mod error;
pub mod graph;
pub mod instance;
pub mod manipulation;
pub mod mesh;
pub mod persist;
pub mod selection;
pub mod shared_surface;
pub mod types;
pub mod view;

pub use aabb::{Aabb, PlanarArea, Rect2};
pub use axis::{ALL_AXES, Axis, BOTH_DIRECTIONS, Direction, FaceId, NodeFaceRef};
pub use bake::{BuildGraph, NeverHidden, VisibilityOracle, build_graph};
pub use constants::*;
pub use error::{GraphError, MeshError};
pub use graph::{IdRemap, InteriorGraph, PackedGraph};
pub use instance::GraphInstance;
pub use mesh::{MaterialKind, RawMesh, convert_graph_to_mesh, split_face};
pub use persist::{ConnectionRecord, NodeRecord, PersistedGraph};
pub use selection::{Selection, SelectionKind, SelectionSet};
pub use shared_surface::{AxisRelation, test_for_shared_surface};
pub use types::{ConnectionData, ConnectionId, NodeData, NodeId};
pub use view::GraphView;

pub use interior_config::{BakeSettings, CollisionChannel, EditorSettings, MeshSettings};
