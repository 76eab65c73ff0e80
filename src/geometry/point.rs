use std::fmt;
use std::ops::{Add, Sub};

use crate::clipper::int128::Int128;

/// Integer point in clipping space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline(always)]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// True when the lines (pt1, pt2) and (pt2, pt3) have exactly the same slope.
    pub fn slopes_equal(pt1: &Point, pt2: &Point, pt3: &Point) -> bool {
        Int128::mul(pt1.y - pt2.y, pt2.x - pt3.x) == Int128::mul(pt1.x - pt2.x, pt2.y - pt3.y)
    }

    /// True when the lines (pt1, pt2) and (pt3, pt4) are parallel.
    pub fn slopes_equal4(pt1: &Point, pt2: &Point, pt3: &Point, pt4: &Point) -> bool {
        Int128::mul(pt1.y - pt2.y, pt3.x - pt4.x) == Int128::mul(pt1.x - pt2.x, pt3.y - pt4.y)
    }

    /// True when `pt2` lies strictly between `pt1` and `pt3` on their common line.
    pub fn is_between(pt1: &Point, pt2: &Point, pt3: &Point) -> bool {
        if pt1 == pt3 || pt1 == pt2 || pt3 == pt2 {
            false
        } else if pt1.x != pt3.x {
            (pt2.x > pt1.x) == (pt2.x < pt3.x)
        } else {
            (pt2.y > pt1.y) == (pt2.y < pt3.y)
        }
    }

    pub fn distance_sqr(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;

        dx * dx + dy * dy
    }

    pub fn close_to(&self, other: &Point, dist_sqrd: f64) -> bool {
        self.distance_sqr(other) <= dist_sqrd
    }

    fn distance_from_line_sqrd(&self, ln1: &Point, ln2: &Point) -> f64 {
        let a = ln1.y as f64 - ln2.y as f64;
        let b = ln2.x as f64 - ln1.x as f64;
        let c = a * ln1.x as f64 + b * ln1.y as f64;
        let c = a * self.x as f64 + b * self.y as f64 - c;

        (c * c) / (a * a + b * b)
    }

    /// Near-collinearity test that measures the distance of whichever point
    /// lies geometrically between the other two.
    pub fn slopes_near_collinear(pt1: &Point, pt2: &Point, pt3: &Point, dist_sqrd: f64) -> bool {
        if (pt1.x as f64 - pt2.x as f64).abs() > (pt1.y as f64 - pt2.y as f64).abs() {
            if (pt1.x > pt2.x) == (pt1.x < pt3.x) {
                pt1.distance_from_line_sqrd(pt2, pt3) < dist_sqrd
            } else if (pt2.x > pt1.x) == (pt2.x < pt3.x) {
                pt2.distance_from_line_sqrd(pt1, pt3) < dist_sqrd
            } else {
                pt3.distance_from_line_sqrd(pt1, pt2) < dist_sqrd
            }
        } else if (pt1.y > pt2.y) == (pt1.y < pt3.y) {
            pt1.distance_from_line_sqrd(pt2, pt3) < dist_sqrd
        } else if (pt2.y > pt1.y) == (pt2.y < pt3.y) {
            pt2.distance_from_line_sqrd(pt1, pt3) < dist_sqrd
        } else {
            pt3.distance_from_line_sqrd(pt1, pt2) < dist_sqrd
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
