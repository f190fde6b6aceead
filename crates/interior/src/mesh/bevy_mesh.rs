//! Conversion of extracted interior meshes into Bevy meshes.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use super::RawMesh;

/// Build a Bevy triangle-list mesh from an extracted mesh.
///
/// Wedges are unrolled into one vertex each so that per-wedge UVs and
/// per-triangle normals survive; indices are sequential.
pub fn to_bevy_mesh(raw: &RawMesh) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(raw.wedges.len());
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(raw.wedges.len());
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(raw.wedges.len());

    for tri in 0..raw.triangle_count() {
        let (Some(corners), Some(normal)) = (raw.triangle(tri), raw.triangle_normal(tri)) else {
            continue;
        };
        for (corner, wedge) in corners.iter().zip(&raw.wedges[tri * 3..tri * 3 + 3]) {
            positions.push(corner.to_array());
            normals.push(normal.to_array());
            uvs.push(wedge.uv);
        }
    }

    let indices: Vec<u32> = (0..positions.len() as u32).collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InteriorGraph;
    use crate::mesh::convert_graph_to_mesh;
    use glam::Vec3;
    use interior_config::MeshSettings;

    #[test]
    fn test_single_room_to_bevy_mesh() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let raw = convert_graph_to_mesh(&graph, &MeshSettings::default()).unwrap();
        let mesh = to_bevy_mesh(&raw);

        assert_eq!(mesh.count_vertices(), 36);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(36));
    }
}
