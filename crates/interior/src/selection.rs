//! Editor selection model.

use serde::{Deserialize, Serialize};

use crate::axis::NodeFaceRef;
use crate::types::{ConnectionId, NodeId};
use crate::view::GraphView;

/// A single selectable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    Node(NodeId),
    Face(NodeFaceRef),
    Portal(ConnectionId),
}

/// Kind of a [`Selection`], used to filter selection queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionKind {
    Node,
    Face,
    Portal,
}

impl SelectionKind {
    pub const ALL: [SelectionKind; 3] =
        [SelectionKind::Node, SelectionKind::Face, SelectionKind::Portal];
}

impl Selection {
    pub fn kind(&self) -> SelectionKind {
        match self {
            Selection::Node(_) => SelectionKind::Node,
            Selection::Face(_) => SelectionKind::Face,
            Selection::Portal(_) => SelectionKind::Portal,
        }
    }

    /// Node the selection belongs to, if any
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Selection::Node(id) => Some(*id),
            Selection::Face(face) => Some(face.node),
            Selection::Portal(_) => None,
        }
    }
}

/// Ordered set of selected elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSet {
    items: Vec<Selection>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Returns false if it was already selected.
    pub fn select(&mut self, item: Selection) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an element. Returns false if it was not selected.
    pub fn deselect(&mut self, item: &Selection) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s != item);
        self.items.len() != before
    }

    /// Select the element if unselected, otherwise deselect it
    pub fn toggle(&mut self, item: Selection) {
        if !self.deselect(&item) {
            self.items.push(item);
        }
    }

    pub fn contains(&self, item: &Selection) -> bool {
        self.items.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clear every element of the given kinds
    pub fn clear(&mut self, kinds: &[SelectionKind]) {
        self.items.retain(|s| !kinds.contains(&s.kind()));
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    /// Number of selected elements of the given kinds
    pub fn count(&self, kinds: &[SelectionKind]) -> usize {
        self.items.iter().filter(|s| kinds.contains(&s.kind())).count()
    }

    /// True if anything of the given kinds is selected
    pub fn has_any(&self, kinds: &[SelectionKind]) -> bool {
        self.items.iter().any(|s| kinds.contains(&s.kind()))
    }

    /// True if `kind` is selected and nothing else is
    pub fn is_exclusive(&self, kind: SelectionKind) -> bool {
        self.has_any(&[kind]) && self.items.iter().all(|s| s.kind() == kind)
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.items
            .iter()
            .filter_map(|s| match s {
                Selection::Node(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn faces(&self) -> Vec<NodeFaceRef> {
        self.items
            .iter()
            .filter_map(|s| match s {
                Selection::Face(face) => Some(*face),
                _ => None,
            })
            .collect()
    }

    pub fn portals(&self) -> Vec<ConnectionId> {
        self.items
            .iter()
            .filter_map(|s| match s {
                Selection::Portal(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// First selected node, falling back to the node of the first selected face
    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes()
            .first()
            .copied()
            .or_else(|| self.faces().first().map(|f| f.node))
    }

    /// Live nodes of `view` that are not selected, directly or through a face
    pub fn node_complement(&self, view: &impl GraphView) -> Vec<NodeId> {
        view.node_ids()
            .into_iter()
            .filter(|id| !self.items.iter().any(|s| s.node() == Some(*id)))
            .collect()
    }

    /// Live connections of `view` whose portals are not selected
    pub fn portal_complement(&self, view: &impl GraphView) -> Vec<ConnectionId> {
        view.connection_ids()
            .into_iter()
            .filter(|id| !self.contains(&Selection::Portal(*id)))
            .collect()
    }

    /// Drop selections whose node or connection no longer exists
    pub fn retain_live(&mut self, view: &impl GraphView) {
        self.items.retain(|s| match s {
            Selection::Node(id) => view.try_node(*id).is_some(),
            Selection::Face(face) => view.try_node(face.node).is_some(),
            Selection::Portal(id) => view.try_connection(*id).is_some(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, Direction};
    use crate::graph::InteriorGraph;
    use glam::Vec3;
    use interior_config::SHARED_SURFACE_EPSILON;

    #[test]
    fn test_select_and_counts() {
        let mut sel = SelectionSet::new();
        assert!(sel.select(Selection::Node(NodeId(0))));
        assert!(!sel.select(Selection::Node(NodeId(0))));
        sel.select(Selection::Portal(ConnectionId(3)));

        assert_eq!(sel.count(&[SelectionKind::Node]), 1);
        assert_eq!(sel.count(&SelectionKind::ALL), 2);
        assert!(sel.has_any(&[SelectionKind::Portal]));
        assert!(!sel.is_exclusive(SelectionKind::Node));

        sel.clear(&[SelectionKind::Portal]);
        assert!(sel.is_exclusive(SelectionKind::Node));
        assert!(!sel.is_exclusive(SelectionKind::Face));
    }

    #[test]
    fn test_toggle() {
        let mut sel = SelectionSet::new();
        let face = Selection::Face(NodeFaceRef::new(NodeId(1), Axis::Z, Direction::Negative));
        sel.toggle(face);
        assert!(sel.contains(&face));
        sel.toggle(face);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_first_node_falls_back_to_face() {
        let mut sel = SelectionSet::new();
        assert_eq!(sel.first_node(), None);
        sel.select(Selection::Face(NodeFaceRef::new(NodeId(4), Axis::X, Direction::Positive)));
        assert_eq!(sel.first_node(), Some(NodeId(4)));
        sel.select(Selection::Node(NodeId(2)));
        assert_eq!(sel.first_node(), Some(NodeId(2)));
    }

    #[test]
    fn test_complements_and_retain_live() {
        let mut graph = InteriorGraph::new();
        let a = graph.add_node(Vec3::ZERO, Vec3::ONE);
        let b = graph.add_node(Vec3::X, Vec3::new(2.0, 1.0, 1.0));
        let c = graph.add_node(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
        let ab = graph.connect_nodes(a, b, SHARED_SURFACE_EPSILON).unwrap();
        let bc = graph.connect_nodes(b, c, SHARED_SURFACE_EPSILON).unwrap();

        let mut sel = SelectionSet::new();
        sel.select(Selection::Node(a));
        sel.select(Selection::Face(NodeFaceRef::new(c, Axis::X, Direction::Positive)));
        sel.select(Selection::Portal(ab));
        assert_eq!(sel.node_complement(&graph), vec![b]);
        assert_eq!(sel.portal_complement(&graph), vec![bc]);

        graph.remove_node(a);
        sel.retain_live(&graph);
        assert_eq!(sel.count(&SelectionKind::ALL), 1);
    }
}
