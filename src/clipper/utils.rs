use crate::clipper::out_pt::OutPtArena;
use crate::geometry::point::Point;
use crate::geometry::polygon::{Polygon, PolygonPath};

const UNVISITED: usize = 0;
const VISITED: usize = 1;

// the visited mark lives in `idx`; an exclusion clears it on the predecessor
fn exclude(ring: &mut OutPtArena, op: usize) -> usize {
    let prev = ring.exclude(op);
    ring[prev].idx = UNVISITED;
    prev
}

/// Removes vertices closer than `distance` to a neighbour, spikes, and
/// vertices within `distance` of the line through their neighbours.
/// Loops left with fewer than three vertices come back empty.
pub fn clean_polygon(path: &[Point], distance: f64) -> Vec<Point> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut ring = OutPtArena::new();
    let head = ring.create(UNVISITED, *first);

    for pt in rest.iter() {
        ring.insert_before(head, *pt);
    }

    let dist_sqrd = distance * distance;
    let mut size = path.len();
    let mut op = head;

    while ring[op].idx == UNVISITED && ring.next(op) != ring.prev(op) {
        let pt = ring.point(op);
        let prev_pt = ring.point(ring.prev(op));
        let next_pt = ring.point(ring.next(op));

        if pt.close_to(&prev_pt, dist_sqrd) {
            op = exclude(&mut ring, op);
            size -= 1;
        } else if prev_pt.close_to(&next_pt, dist_sqrd) {
            let next = ring.next(op);
            exclude(&mut ring, next);
            op = exclude(&mut ring, op);
            size -= 2;
        } else if Point::slopes_near_collinear(&prev_pt, &pt, &next_pt, dist_sqrd) {
            op = exclude(&mut ring, op);
            size -= 1;
        } else {
            ring[op].idx = VISITED;
            op = ring.next(op);
        }
    }

    if size < 3 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(size);

    for _ in 0..size {
        result.push(ring.point(op));
        op = ring.next(op);
    }

    result
}

pub fn clean_polygons(paths: &PolygonPath, distance: f64) -> PolygonPath {
    paths
        .iter()
        .map(|polygon| Polygon {
            points: clean_polygon(polygon, distance),
            ..polygon.clone()
        })
        .collect()
}
