use crate::clipper::enums::{EndType, JoinType, Orientation};
use crate::geometry::polygon::Polygon;

/// Output polygon together with the polygons nested directly inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonNode {
    pub polygon: Polygon,
    pub children: Vec<PolygonNode>,
}

impl PolygonNode {
    pub fn new(polygon: Polygon) -> Self {
        Self {
            polygon,
            children: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.polygon.is_open
    }

    /// Closed nodes wound clockwise are holes of their parent.
    pub fn is_hole(&self) -> bool {
        !self.polygon.is_open && self.polygon.orientation() == Orientation::Clockwise
    }

    pub fn join_type(&self) -> JoinType {
        self.polygon.join_type
    }

    pub fn end_type(&self) -> EndType {
        self.polygon.end_type
    }

    pub fn add_child(&mut self, child: PolygonNode) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, itself included.
    pub fn total_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PolygonNode::total_count)
            .sum::<usize>()
    }
}

/// Forest of outer boundaries, holes and polylines produced by a clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonTree {
    pub children: Vec<PolygonNode>,
}

impl PolygonTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_child(&mut self, child: PolygonNode) {
        self.children.push(child);
    }

    pub fn total_count(&self) -> usize {
        self.children.iter().map(PolygonNode::total_count).sum()
    }
}
