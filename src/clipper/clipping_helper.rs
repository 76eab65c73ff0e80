use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::clipper::clipper::{ClipSolution, Clipper};
use crate::clipper::clipper_base::range_test;
use crate::clipper::clipper_config::ClipperConfig;
use crate::clipper::enums::{ClipType, PolyFillType};
use crate::clipper::int128::Int128;
use crate::geometry::point::Point;
use crate::geometry::polygon::{Polygon, PolygonPath};

fn simplify_config() -> ClipperConfig {
    ClipperConfig {
        strictly_simple: true,
        subject_fill_type: PolyFillType::EvenOdd,
        ..ClipperConfig::default()
    }
}

/// Resolves self-intersections of `path` by a self-union. Regions covered an
/// even number of times are left out, so a pentagram yields its five tips.
pub fn simplify_polygon<S: ClipSolution>(path: &PolygonPath, solution: &mut S) -> bool {
    Clipper::with_config(simplify_config()).execute(ClipType::Union, path, &PolygonPath::new(), solution)
}

/// Side of the directed line `a -> b` that `pt` lies on, computed exactly.
fn side_of(a: &Point, b: &Point, pt: &Point) -> Ordering {
    Int128::cmp_products(b.x - a.x, pt.y - a.y, pt.x - a.x, b.y - a.y)
}

fn on_segment(a: &Point, b: &Point, pt: &Point) -> bool {
    side_of(a, b, pt) == Ordering::Equal
        && pt.x >= a.x.min(b.x)
        && pt.x <= a.x.max(b.x)
        && pt.y >= a.y.min(b.y)
        && pt.y <= a.y.max(b.y)
}

/// Winding number of `pt` with respect to the closed loop `points`, or `None`
/// when `pt` lies on the loop. Coordinates must pass `range_test`.
pub(crate) fn winding_number(points: &[Point], pt: &Point) -> Option<i32> {
    let count = points.len();

    if count < 3 {
        return Some(0);
    }

    let mut result = 0;
    let mut prev = &points[count - 1];

    for point in points.iter() {
        if on_segment(prev, point, pt) {
            return None;
        }

        if prev.y <= pt.y {
            if point.y > pt.y && side_of(prev, point, pt) == Ordering::Greater {
                result += 1;
            }
        } else if point.y <= pt.y && side_of(prev, point, pt) == Ordering::Less {
            result -= 1;
        }

        prev = point;
    }

    Some(result)
}

/// True when every vertex of `candidate` lies inside or on the closed
/// polygons of `subject` under the non-zero rule. Coordinates outside the
/// clipping range give `false`.
pub fn contains(subject: &PolygonPath, candidate: &PolygonPath) -> bool {
    let all_points = subject.iter().chain(candidate.iter()).flat_map(|polygon| polygon.iter());

    if let Err(error) = all_points.map(range_test).collect::<Result<(), _>>() {
        warn!(%error, "contains skipped");
        return false;
    }

    let mut has_points = false;

    for polygon in candidate.iter() {
        for pt in polygon.iter() {
            has_points = true;

            let mut winding = 0;

            for outline in subject.iter().filter(|outline| !outline.is_open) {
                match winding_number(outline, pt) {
                    None => {
                        winding = 1;
                        break;
                    }
                    Some(value) => winding += value,
                }
            }

            if winding == 0 {
                debug!(%pt, "candidate vertex outside subject");
                return false;
            }
        }
    }

    has_points
}

impl Polygon {
    /// Replaces the loop by the largest polygon of its simplification.
    /// The loop is emptied when nothing survives.
    pub fn simplify(&mut self) {
        let mut solution = PolygonPath::new();
        let source = PolygonPath::from(self.clone());

        simplify_polygon(&source, &mut solution);

        let largest = solution.into_inner().into_iter().max_by(|a, b| {
            a.area()
                .abs()
                .partial_cmp(&b.area().abs())
                .unwrap_or(Ordering::Equal)
        });

        self.points = largest.map(|polygon| polygon.points).unwrap_or_default();
    }
}
