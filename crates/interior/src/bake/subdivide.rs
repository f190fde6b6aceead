//! Subdivision of authored nodes into grid cells.

use std::collections::BTreeMap;

use glam::{UVec3, Vec3};
use interior_config::BakeSettings;
use tracing::debug;

use crate::aabb::Aabb;
use crate::axis::{ALL_AXES, Direction, FaceId};
use crate::graph::InteriorGraph;
use crate::shared_surface::test_for_shared_surface;
use crate::types::{ConnectionData, NodeData, NodeId};

use super::BuildGraph;

/// Cells of one authored node, in `x`-major, then `y`, then `z` order
struct CellGrid {
    counts: UVec3,
    ids: Vec<NodeId>,
}

impl CellGrid {
    fn index(&self, coord: UVec3) -> usize {
        let (y_len, z_len) = (self.counts.y as usize, self.counts.z as usize);
        (coord.x as usize * y_len + coord.y as usize) * z_len + coord.z as usize
    }

    fn get(&self, coord: UVec3) -> Option<NodeId> {
        if coord.cmpge(self.counts).any() {
            return None;
        }
        self.ids.get(self.index(coord)).copied()
    }
}

/// Grid coordinates in the same order as `CellGrid::ids`
fn grid_coords(counts: UVec3) -> impl Iterator<Item = UVec3> {
    (0..counts.x).flat_map(move |x| {
        (0..counts.y).flat_map(move |y| (0..counts.z).map(move |z| UVec3::new(x, y, z)))
    })
}

/// Split every authored node into `xy × xy × z` equal cells.
///
/// Cells of one node are linked to their grid face-neighbours in both
/// directions through the full shared face. Each authored connection is
/// carried over, in its authored direction, to every pair of source and
/// destination cells whose faces overlap on the authored portal.
pub fn subdivide(graph: &InteriorGraph, settings: &BakeSettings) -> BuildGraph {
    let (xy, z) = settings.subdivision_counts();
    let counts = UVec3::new(xy, xy, z);
    let mut build = BuildGraph::new();
    let mut grids: BTreeMap<NodeId, CellGrid> = BTreeMap::new();

    for id in graph.all_nodes() {
        let Some(nd) = graph.node(id) else {
            continue;
        };
        let base_name = graph
            .node_name(id)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Node {}", id));
        let grid = split_node(&mut build, nd, &base_name, counts);
        link_grid_neighbours(&mut build, &grid);
        grids.insert(id, grid);
    }

    let mut promoted = 0;
    for cid in graph.all_connections() {
        let Some(cd) = graph.connection(cid) else {
            continue;
        };
        let (Some(src_grid), Some(dest_grid)) = (grids.get(&cd.src), grids.get(&cd.dest)) else {
            continue;
        };
        promoted += promote_portal(
            &mut build,
            &cd.portal,
            src_grid,
            dest_grid,
            settings.surface_epsilon,
        );
    }

    debug!(
        "subdivide: {} cells, {} connections ({} from authored portals)",
        build.nodes.len(),
        build.connections.len(),
        promoted
    );
    build
}

fn split_node(build: &mut BuildGraph, nd: &NodeData, base_name: &str, counts: UVec3) -> CellGrid {
    let step = nd.size() / counts.as_vec3();
    let mut grid = CellGrid {
        counts,
        ids: Vec::with_capacity(counts.x as usize * counts.y as usize * counts.z as usize),
    };

    for coord in grid_coords(counts) {
        let min = nd.min + step * coord.as_vec3();
        // The far cell ends exactly on the authored boundary
        let max = Vec3::select(
            (coord + UVec3::ONE).cmpeq(counts),
            nd.max,
            nd.min + step * (coord + UVec3::ONE).as_vec3(),
        );
        let name = format!("{}[{}][{}][{}]", base_name, coord.x, coord.y, coord.z);
        grid.ids.push(build.insert_node(NodeData::new(min, max), name));
    }
    grid
}

fn link_grid_neighbours(build: &mut BuildGraph, grid: &CellGrid) {
    for coord in grid_coords(grid.counts) {
        let Some(cell) = grid.get(coord) else {
            continue;
        };
        for axis in ALL_AXES {
            let Some(neighbour) = grid.get(coord + axis.unit().as_uvec3()) else {
                continue;
            };
            let Some(portal) = build
                .nodes
                .get(&cell)
                .map(|nd| nd.face_area(FaceId::new(axis, Direction::Positive)).to_aabb())
            else {
                continue;
            };
            build.insert_connection(ConnectionData::new(cell, neighbour, portal));
            build.insert_connection(ConnectionData::new(neighbour, cell, portal));
        }
    }
}

/// Returns the number of connections created.
///
/// A pair is linked only when the two cells themselves share a surface on
/// the plane of the authored portal.
fn promote_portal(
    build: &mut BuildGraph,
    portal: &Aabb,
    src_grid: &CellGrid,
    dest_grid: &CellGrid,
    epsilon: f32,
) -> usize {
    let touching = |grid: &CellGrid, build: &BuildGraph| -> Vec<(NodeId, Aabb, Aabb)> {
        grid.ids
            .iter()
            .filter_map(|id| {
                let cell = build.nodes.get(id)?.aabb();
                let area = test_for_shared_surface(&cell, portal, epsilon)?;
                Some((*id, cell, area.to_aabb()))
            })
            .collect()
    };
    let src_cells = touching(src_grid, build);
    let dest_cells = touching(dest_grid, build);

    let mut created = 0;
    for (src, src_cell, src_face) in &src_cells {
        for (dest, dest_cell, dest_face) in &dest_cells {
            let Some(shared) = test_for_shared_surface(src_cell, dest_cell, epsilon) else {
                continue;
            };
            let Some(overlap) = test_for_shared_surface(src_face, dest_face, epsilon) else {
                continue;
            };
            if shared.fixed_axis != overlap.fixed_axis
                || (shared.fixed_value - overlap.fixed_value).abs() > epsilon
            {
                continue;
            }
            build.insert_connection(ConnectionData::from_area(*src, *dest, &overlap));
            created += 1;
        }
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use interior_config::SHARED_SURFACE_EPSILON;

    #[test]
    fn test_cells_tile_the_authored_node() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::new(300.0, 300.0, 200.0));
        let build = subdivide(&graph, &BakeSettings::new(3, 2));

        assert_eq!(build.nodes.len(), 18);
        let total: f64 = build.nodes.values().map(NodeData::volume).sum();
        assert!((total - 300.0 * 300.0 * 200.0).abs() < 1.0);

        let first = &build.nodes[&NodeId(0)];
        assert_eq!(first.min, Vec3::ZERO);
        assert_eq!(first.max, Vec3::new(100.0, 100.0, 100.0));
        assert_eq!(build.node_names[&NodeId(0)], "Node 0[0][0][0]");
        assert_eq!(build.node_names[&NodeId(17)], "Node 0[2][2][1]");
    }

    #[test]
    fn test_grid_neighbours_connect_both_ways() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::new(200.0, 200.0, 100.0));
        let build = subdivide(&graph, &BakeSettings::new(2, 1));

        // 2x2x1 grid: 4 neighbour pairs, two directions each
        assert_eq!(build.connections.len(), 8);
        for (cid, cd) in &build.connections {
            assert!(build.nodes[&cd.src].outgoing.contains(cid));
            let a = build.nodes[&cd.src].aabb();
            let b = build.nodes[&cd.dest].aabb();
            let shared = test_for_shared_surface(&a, &b, SHARED_SURFACE_EPSILON).unwrap();
            assert_eq!(shared.to_aabb(), cd.portal);
        }
    }

    #[test]
    fn test_authored_portal_is_promoted_to_touching_cells() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::new(200.0, 200.0, 100.0));
        let b = graph.add_node(Vec3::new(200.0, 0.0, 0.0), Vec3::new(400.0, 200.0, 100.0));
        // Portal only across the lower half in Y
        let area = crate::aabb::PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 200.0,
            min: Vec3::new(200.0, 20.0, 0.0),
            max: Vec3::new(200.0, 80.0, 100.0),
        };
        graph.add_connection(a, b, &area);

        let build = subdivide(&graph, &BakeSettings::new(2, 1));
        let promoted: Vec<&ConnectionData> = build
            .connections
            .values()
            .filter(|cd| cd.portal.min.x == 200.0 && cd.portal.max.x == 200.0)
            .collect();

        assert_eq!(promoted.len(), 1);
        let cd = promoted[0];
        assert_eq!(build.node_names[&cd.src], "Node 0[1][0][0]");
        assert_eq!(build.node_names[&cd.dest], "Node 1[0][0][0]");
        assert_eq!(cd.portal.min, Vec3::new(200.0, 20.0, 0.0));
        assert_eq!(cd.portal.max, Vec3::new(200.0, 80.0, 100.0));
    }

    #[test]
    fn test_portal_without_abutting_destination_is_dropped() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::splat(300.0));
        let area = crate::aabb::PlanarArea {
            fixed_axis: Axis::X,
            fixed_value: 300.0,
            min: Vec3::new(300.0, 100.0, 100.0),
            max: Vec3::new(300.0, 200.0, 200.0),
        };
        graph.add_connection(a, a, &area);

        let build = subdivide(&graph, &BakeSettings::default());
        assert_eq!(build.nodes.len(), 1);
        assert!(build.connections.is_empty());

        let build = subdivide(&graph, &BakeSettings::new(3, 1));
        for cd in build.connections.values() {
            assert_ne!(cd.src, cd.dest);
            assert!(cd.portal.min.x < 300.0);
        }
    }

    #[test]
    fn test_zero_subdivision_is_clamped() {
        let mut graph = InteriorGraph::new();
        graph.add_node(Vec3::ZERO, Vec3::ONE);
        let build = subdivide(&graph, &BakeSettings::new(0, 0));
        assert_eq!(build.nodes.len(), 1);
        assert!(build.connections.is_empty());
    }
}
