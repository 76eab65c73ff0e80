use std::cmp::Ordering;

use crate::clipper::t_edge::TEdgeArena;
use crate::geometry::point::Point;

/// Crossing of two active edges found inside the current scanbeam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectNode {
    pub edge1: usize,
    pub edge2: usize,
    pub pt: Point,
}

impl IntersectNode {
    pub fn new(edge1: usize, edge2: usize, pt: Point) -> Self {
        Self { edge1, edge2, pt }
    }

    /// Bottom-most crossing first, then left to right.
    pub fn sort(a: &IntersectNode, b: &IntersectNode) -> Ordering {
        b.pt.y.cmp(&a.pt.y).then(a.pt.x.cmp(&b.pt.x))
    }

    pub fn edges_adjacent(&self, edges: &TEdgeArena) -> bool {
        edges[self.edge1].next_in_sel == Some(self.edge2)
            || edges[self.edge1].prev_in_sel == Some(self.edge2)
    }
}
