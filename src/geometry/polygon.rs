use std::ops::{Deref, DerefMut};

use crate::clipper::enums::{EndType, JoinType, Orientation};
use crate::geometry::point::Point;
use crate::geometry::polygon_tree::{PolygonNode, PolygonTree};

/// Ordered loop (or polyline when `is_open`) of integer points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub is_open: bool,
    pub join_type: JoinType,
    pub end_type: EndType,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Polyline with butt ends.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            is_open: true,
            join_type: JoinType::Square,
            end_type: EndType::OpenButt,
        }
    }

    /// Signed shoelace area, positive for counter-clockwise loops.
    pub fn area(&self) -> f64 {
        let count = self.points.len();

        if count < 3 {
            return 0.0;
        }

        let mut acc = 0.0;
        let mut prev = self.points[count - 1];

        for point in self.points.iter() {
            acc += (prev.x as f64 + point.x as f64) * (prev.y as f64 - point.y as f64);
            prev = *point;
        }

        -acc * 0.5
    }

    pub fn orientation(&self) -> Orientation {
        if self.area() >= 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Rotates the loop so the point with the lowest y (then lowest x) comes first.
    pub fn order_bottom_left_first(&mut self) {
        let first = self
            .points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.y.cmp(&b.y).then(a.x.cmp(&b.x)))
            .map(|(index, _)| index);

        if let Some(index) = first {
            self.points.rotate_left(index);
        }
    }
}

impl Deref for Polygon {
    type Target = Vec<Point>;

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for Polygon {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Polygon::from_points(points)
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Polygon::from_points(iter.into_iter().collect())
    }
}

/// Collection of polygons, holes carrying the opposite orientation to outers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonPath {
    polygons: Vec<Polygon>,
}

impl PolygonPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summed signed area of the closed members.
    pub fn area(&self) -> f64 {
        self.polygons
            .iter()
            .filter(|polygon| !polygon.is_open)
            .map(Polygon::area)
            .sum()
    }

    /// Pre-order flattening of a tree.
    pub fn from_tree(tree: &PolygonTree) -> Self {
        fn visit(node: &PolygonNode, out: &mut Vec<Polygon>) {
            out.push(node.polygon.clone());
            for child in node.children.iter() {
                visit(child, out);
            }
        }

        let mut polygons = Vec::with_capacity(tree.total_count());

        for node in tree.children.iter() {
            visit(node, &mut polygons);
        }

        Self { polygons }
    }

    pub fn into_inner(self) -> Vec<Polygon> {
        self.polygons
    }
}

impl Deref for PolygonPath {
    type Target = Vec<Polygon>;

    fn deref(&self) -> &Self::Target {
        &self.polygons
    }
}

impl DerefMut for PolygonPath {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.polygons
    }
}

impl From<Polygon> for PolygonPath {
    fn from(polygon: Polygon) -> Self {
        Self {
            polygons: vec![polygon],
        }
    }
}

impl From<Vec<Polygon>> for PolygonPath {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }
}

impl FromIterator<Polygon> for PolygonPath {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self {
            polygons: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i64) -> Polygon {
        vec![
            Point::new(0, 0),
            Point::new(size, 0),
            Point::new(size, size),
            Point::new(0, size),
        ]
        .into()
    }

    #[test]
    fn test_area_and_orientation() {
        let mut polygon = square(10);
        assert_eq!(polygon.area(), 100.0);
        assert_eq!(polygon.orientation(), Orientation::CounterClockwise);

        polygon.reverse();
        assert_eq!(polygon.area(), -100.0);
        assert_eq!(polygon.orientation(), Orientation::Clockwise);
    }

    #[test]
    fn test_bowtie_area_cancels() {
        let bowtie: Polygon = vec![
            Point::new(0, 0),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 10),
        ]
        .into();

        assert_eq!(bowtie.area(), 0.0);
    }

    #[test]
    fn test_order_bottom_left_first() {
        let mut polygon: Polygon = vec![
            Point::new(10, 10),
            Point::new(0, 10),
            Point::new(0, 0),
            Point::new(10, 0),
        ]
        .into();

        polygon.order_bottom_left_first();
        assert_eq!(polygon[0], Point::new(0, 0));
        assert_eq!(polygon[1], Point::new(10, 0));
    }

    #[test]
    fn test_path_area_counts_holes_negative() {
        let mut hole = square(4);
        hole.reverse();
        let path: PolygonPath = vec![square(10), hole, Polygon::open(vec![Point::new(0, 0), Point::new(5, 5)])].into();

        assert_eq!(path.area(), 84.0);
    }
}
