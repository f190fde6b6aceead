//! Removal of cells the visibility oracle reports as hidden.

use interior_config::CollisionChannel;
use tracing::{debug, trace};

use crate::types::NodeId;

use super::{BuildGraph, VisibilityOracle};

/// Remove every node whose center is hidden, along with its outgoing
/// connections. Returns the number of nodes removed.
///
/// Connections that merely end at a removed node are left in place; packing
/// drops them once the surviving node set is known.
pub fn remove_hidden_nodes(
    build: &mut BuildGraph,
    oracle: &impl VisibilityOracle,
    channel: CollisionChannel,
) -> usize {
    let hidden: Vec<NodeId> = build
        .nodes
        .iter()
        .filter(|(_, nd)| oracle.is_point_hidden(nd.center(), channel))
        .map(|(&id, _)| id)
        .collect();

    for id in &hidden {
        let Some(nd) = build.nodes.remove(id) else {
            continue;
        };
        for out in &nd.outgoing {
            build.connections.remove(out);
        }
        build.node_names.remove(id);
        trace!("remove_hidden_nodes: culled {} ({} outgoing)", id, nd.outgoing.len());
    }

    debug!(
        "remove_hidden_nodes: {} of {} nodes hidden",
        hidden.len(),
        build.nodes.len() + hidden.len()
    );
    hidden.len()
}
