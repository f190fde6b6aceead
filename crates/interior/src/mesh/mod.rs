//! Wall/floor/ceiling mesh extraction
//!
//! Every face of every node is swept along its longitudinal axis. Portals
//! on the face open gaps in a set of active lateral spans; whatever stays
//! solid is emitted as rectangles, which become quads:
//! - Faces on Z become floors (negative) or ceilings (positive)
//! - Every other face is a wall
//! - UVs are the planar coordinates divided by the texel repeat, with the
//!   lower-indexed in-plane axis mapped to U

mod portal_edges;
mod spans;
mod raw_mesh;

#[cfg(feature = "bevy")]
mod bevy_mesh;

use glam::{Vec2, Vec3};
use interior_config::MeshSettings;
use tracing::{debug, warn};

use crate::aabb::Rect2;
use crate::axis::{Axis, Direction, FaceId};
use crate::error::MeshError;
use crate::types::NodeId;
use crate::view::GraphView;

pub use portal_edges::{EdgeEvent, EdgeKind, LateralExtent, generate_portal_edges};
pub use raw_mesh::{MaterialKind, RawMesh, Wedge};
pub use spans::{Span, SpanFault, merge_spans, split_or_contract_spans};

#[cfg(feature = "bevy")]
pub use bevy_mesh::to_bevy_mesh;

/// Material slot for a face
pub fn face_material(face: FaceId) -> MaterialKind {
    match (face.axis, face.dir) {
        (Axis::Z, Direction::Positive) => MaterialKind::Ceiling,
        (Axis::Z, Direction::Negative) => MaterialKind::Floor,
        _ => MaterialKind::Wall,
    }
}

/// Split a node face into the solid rectangles left around its portals.
///
/// Rectangles are in face-local coordinates (X longitudinal, Y lateral).
/// Rectangles not larger than `settings.epsilon` in both dimensions are
/// discarded.
pub fn split_face(
    view: &impl GraphView,
    node: NodeId,
    face: FaceId,
    settings: &MeshSettings,
) -> Result<Vec<Rect2>, MeshError> {
    let Some(nd) = view.try_node(node) else {
        return Ok(Vec::new());
    };
    let [longitudinal, lateral] = face.axis.others();
    let (lo, la) = (longitudinal.index(), lateral.index());

    let fault = |err: SpanFault| {
        warn!("split_face: node {} face {:?}: {}", node, face, err);
        MeshError::SpanInvariant {
            node,
            face: format!("{:?}", face),
            reason: err.to_string(),
        }
    };

    let events = generate_portal_edges(view, node, face, settings.face_match_tolerance);
    let mut active = vec![Span::new(nd.min[la], nd.max[la], nd.min[lo])];
    let mut rects = Vec::new();

    for event in &events {
        match event.kind {
            EdgeKind::End => {
                let closed =
                    merge_spans(&mut active, &event.extent, event.axis_value, settings.epsilon)
                        .map_err(fault)?;
                rects.extend(closed);
            }
            EdgeKind::Begin => {
                let closed = split_or_contract_spans(&mut active, &event.extent, event.axis_value)
                    .map_err(fault)?;
                rects.extend(closed);
            }
        }
    }

    let [last] = active.as_slice() else {
        return Err(fault(SpanFault::Unclosed(active.len())));
    };
    rects.push(last.to_rect(nd.max[lo]));

    rects.retain(|rc| {
        let size = rc.size();
        size.x.abs() > settings.epsilon && size.y.abs() > settings.epsilon
    });
    Ok(rects)
}

/// Extract wall/floor/ceiling geometry for every node of a graph.
///
/// Fails if any face sweep is inconsistent or the result is not a valid
/// mesh (an empty graph produces no geometry and therefore fails).
pub fn convert_graph_to_mesh(
    view: &impl GraphView,
    settings: &MeshSettings,
) -> Result<RawMesh, MeshError> {
    let mut mesh = RawMesh::new();

    for node in view.node_ids() {
        let Some(nd) = view.try_node(node) else {
            continue;
        };
        for face in FaceId::all() {
            let rects = split_face(view, node, face, settings)?;
            let plane = nd.face_axis_value(face.axis, face.dir);
            for rc in &rects {
                emit_quad(&mut mesh, face, plane, rc, settings.tex_repeat_units);
            }
        }
    }

    debug!(
        "convert_graph_to_mesh: {} nodes -> {} vertices, {} triangles",
        view.node_count(),
        mesh.vertex_positions.len(),
        mesh.triangle_count()
    );

    mesh.validate()?;
    Ok(mesh)
}

fn emit_quad(mesh: &mut RawMesh, face: FaceId, plane: f32, rc: &Rect2, tex_repeat: f32) {
    let [longitudinal, lateral] = face.axis.others();
    let (lo, la, f) = (longitudinal.index(), lateral.index(), face.axis.index());

    let mut min = Vec3::ZERO;
    min[lo] = rc.min.x;
    min[la] = rc.min.y;
    min[f] = plane;
    let mut max = min;
    max[lo] = rc.max.x;
    max[la] = rc.max.y;

    let mut planar1 = Vec3::ZERO;
    planar1[lo] = max[lo] - min[lo];
    let mut planar2 = Vec3::ZERO;
    planar2[la] = max[la] - min[la];
    // Negative faces swap tangents so the winding faces outwards
    if face.dir == Direction::Negative {
        std::mem::swap(&mut planar1, &mut planar2);
    }

    let (u, v) = (lo.min(la), lo.max(la));
    let uv_of = |p: Vec3| Vec2::new(p[u], p[v]) / tex_repeat;

    mesh.push_quad(
        [min, min + planar2, max, min + planar1],
        face_material(face),
        1 << face.smoothing_index(),
        uv_of,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aabb::PlanarArea;
    use crate::graph::InteriorGraph;
    use crate::types::NodeData;

    /// 300³ room with a neighbour on +X and a centered 100×100 portal
    fn room_with_portal() -> (InteriorGraph, NodeId, NodeId) {
        let mut graph = InteriorGraph::new();
        let room = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let hall = graph.add_node(Vec3::new(300.0, 0.0, 0.0), Vec3::new(600.0, 300.0, 300.0));
        let portal = PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 300.0,
            min: Vec3::new(300.0, 100.0, 100.0),
            max: Vec3::new(300.0, 200.0, 200.0),
        };
        graph.add_connection(room, hall, &portal);
        (graph, room, hall)
    }

    fn total_area(rects: &[Rect2]) -> f32 {
        rects.iter().map(Rect2::area).sum()
    }

    #[test]
    fn test_face_without_portals_is_one_rect() {
        let (graph, room, _) = room_with_portal();
        let face = FaceId::new(Axis::Y, Direction::Positive);
        let rects = split_face(&graph, room, face, &MeshSettings::default()).unwrap();

        // Y faces run along Z, then X
        assert_eq!(rects, vec![Rect2::new(Vec2::ZERO, Vec2::splat(300.0))]);
    }

    #[test]
    fn test_face_around_centered_portal() {
        let (graph, room, _) = room_with_portal();
        let face = FaceId::new(Axis::X, Direction::Positive);
        let rects = split_face(&graph, room, face, &MeshSettings::default()).unwrap();

        // Strip before, two beside, strip after
        assert_eq!(rects.len(), 4);
        assert_eq!(total_area(&rects), 300.0 * 300.0 - 100.0 * 100.0);
        for rc in &rects {
            let inside_portal = rc.min.x >= 100.0
                && rc.max.x <= 200.0
                && rc.min.y >= 100.0
                && rc.max.y <= 200.0;
            assert!(!inside_portal);
        }
    }

    #[test]
    fn test_portal_through_whole_face_leaves_two_strips() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let b = graph.add_node(Vec3::new(300.0, 0.0, 0.0), Vec3::new(600.0, 300.0, 300.0));
        // Full-height opening across y 100..200
        let portal = PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 300.0,
            min: Vec3::new(300.0, 100.0, 0.0),
            max: Vec3::new(300.0, 200.0, 300.0),
        };
        graph.add_connection(a, b, &portal);

        let face = FaceId::new(Axis::X, Direction::Positive);
        let rects = split_face(&graph, a, face, &MeshSettings::default()).unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(total_area(&rects), 300.0 * 300.0 - 100.0 * 300.0);
    }

    #[test]
    fn test_abutting_portals() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let b = graph.add_node(Vec3::new(300.0, 0.0, 0.0), Vec3::new(600.0, 300.0, 300.0));
        for (y0, y1) in [(50.0, 150.0), (150.0, 250.0)] {
            let portal = PlanarArea {
                fixed_axis: Axis::X,
                fixed_value: 300.0,
                min: Vec3::new(300.0, y0, 0.0),
                max: Vec3::new(300.0, y1, 100.0),
            };
            graph.add_connection(a, b, &portal);
        }

        let face = FaceId::new(Axis::X, Direction::Positive);
        let rects = split_face(&graph, a, face, &MeshSettings::default()).unwrap();
        assert!((total_area(&rects) - (300.0 * 300.0 - 200.0 * 100.0)).abs() < 1e-2);
    }

    #[test]
    fn test_inconsistent_portal_is_an_error() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let b = graph.add_node(Vec3::new(300.0, 0.0, 0.0), Vec3::new(600.0, 300.0, 300.0));
        let c = graph.add_connection(a, b, &PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 300.0,
            min: Vec3::new(300.0, 100.0, 100.0),
            max: Vec3::new(300.0, 200.0, 200.0),
        });
        // Lateral extent entirely outside the face
        let mut cd = graph.connection(c).unwrap().clone();
        cd.portal.min.z = 400.0;
        cd.portal.max.z = 500.0;
        graph.set_connection_data(c, cd);

        let face = FaceId::new(Axis::X, Direction::Positive);
        let err = split_face(&graph, a, face, &MeshSettings::default()).unwrap_err();
        assert!(matches!(err, MeshError::SpanInvariant { node, .. } if node == a));
        assert!(convert_graph_to_mesh(&graph, &MeshSettings::default()).is_err());
    }

    #[test]
    fn test_mesh_of_room_with_portal() {
        let (graph, room, hall) = room_with_portal();
        let mesh = convert_graph_to_mesh(&graph, &MeshSettings::default()).unwrap();

        // Each room: 5 solid faces plus 4 fragments around the portal
        assert_eq!(mesh.triangle_count(), 2 * (5 + 4) * 2);
        let face_area = 300.0 * 300.0;
        let expected = 2.0 * (6.0 * face_area - 100.0 * 100.0);
        assert!((mesh.surface_area() - expected).abs() < 1.0);

        let floors = mesh.face_materials.iter().filter(|m| **m == MaterialKind::Floor).count();
        let ceilings = mesh.face_materials.iter().filter(|m| **m == MaterialKind::Ceiling).count();
        assert_eq!(floors, 4);
        assert_eq!(ceilings, 4);
        assert!(graph.try_node(room).is_some() && graph.try_node(hall).is_some());
    }

    #[test]
    fn test_winding_matches_face_normal() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::new(300.0, 200.0, 100.0));
        let mesh = convert_graph_to_mesh(&graph, &MeshSettings::default()).unwrap();
        let nd = NodeData::new(Vec3::ZERO, Vec3::new(300.0, 200.0, 100.0));

        // One quad per face, in FaceId::all order
        for (i, face) in FaceId::all().enumerate() {
            let expected = nd.face_normal(face.axis, face.dir);
            for tri in [2 * i, 2 * i + 1] {
                let normal = mesh.triangle_normal(tri).unwrap();
                assert!((normal - expected).length() < 1e-5, "{:?}", face);
                assert_eq!(mesh.face_smoothing_masks[tri], 1 << face.smoothing_index());
            }
        }
    }

    #[test]
    fn test_uvs_put_z_on_v() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::new(300.0, 200.0, 100.0));
        let settings = MeshSettings::default();
        let mesh = convert_graph_to_mesh(&graph, &settings).unwrap();

        for wedge in &mesh.wedges {
            let p = mesh.vertex_positions[wedge.index as usize];
            let uv = Vec2::from_array(wedge.uv) * settings.tex_repeat_units;
            // Walls on X map (Y, Z); walls on Y map (X, Z); floors map (X, Y)
            assert!(uv.x == p.x || uv.x == p.y);
            assert!(uv.y == p.y || uv.y == p.z);
        }
    }

    #[test]
    fn test_empty_graph_fails_validation() {
        let graph = InteriorGraph::new();
        assert!(matches!(
            convert_graph_to_mesh(&graph, &MeshSettings::default()),
            Err(MeshError::Degenerate(_))
        ));
    }
}
