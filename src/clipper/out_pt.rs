use std::ops::{Index, IndexMut};

use crate::clipper::constants::HORIZONTAL;
use crate::clipper::int128::Int128;
use crate::geometry::point::Point;

/// Vertex of an output ring. `idx` is the output record the ring was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutPt {
    pub idx: usize,
    pub pt: Point,
    pub next: usize,
    pub prev: usize,
}

/// Storage for every output vertex of one clip. Rings are circular
/// doubly-linked lists threaded through the arena by index; unlinked
/// vertices simply stop being reachable.
#[derive(Debug, Default)]
pub struct OutPtArena {
    points: Vec<OutPt>,
}

impl Index<usize> for OutPtArena {
    type Output = OutPt;

    fn index(&self, index: usize) -> &OutPt {
        &self.points[index]
    }
}

impl IndexMut<usize> for OutPtArena {
    fn index_mut(&mut self, index: usize) -> &mut OutPt {
        &mut self.points[index]
    }
}

fn get_dx(pt1: &Point, pt2: &Point) -> f64 {
    if pt1.y == pt2.y {
        HORIZONTAL
    } else {
        (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
    }
}

impl OutPtArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Single vertex ring.
    pub fn create(&mut self, idx: usize, pt: Point) -> usize {
        let index = self.points.len();

        self.points.push(OutPt {
            idx,
            pt,
            next: index,
            prev: index,
        });

        index
    }

    #[inline(always)]
    pub fn next(&self, index: usize) -> usize {
        self.points[index].next
    }

    #[inline(always)]
    pub fn prev(&self, index: usize) -> usize {
        self.points[index].prev
    }

    #[inline(always)]
    pub fn point(&self, index: usize) -> Point {
        self.points[index].pt
    }

    /// Inserts a new vertex holding `pt` just before `op`.
    pub fn insert_before(&mut self, op: usize, pt: Point) -> usize {
        let idx = self.points[op].idx;
        let prev = self.points[op].prev;
        let index = self.points.len();

        self.points.push(OutPt {
            idx,
            pt,
            next: op,
            prev,
        });
        self.points[prev].next = index;
        self.points[op].prev = index;

        index
    }

    /// Copy of `op` linked next to it.
    pub fn duplicate(&mut self, op: usize, insert_after: bool) -> usize {
        let source = self.points[op];
        let index = self.points.len();

        if insert_after {
            self.points.push(OutPt {
                next: source.next,
                prev: op,
                ..source
            });
            self.points[source.next].prev = index;
            self.points[op].next = index;
        } else {
            self.points.push(OutPt {
                next: op,
                prev: source.prev,
                ..source
            });
            self.points[source.prev].next = index;
            self.points[op].prev = index;
        }

        index
    }

    /// Unlinks `op` from its ring and returns its predecessor.
    pub fn exclude(&mut self, op: usize) -> usize {
        let OutPt { next, prev, .. } = self.points[op];

        self.points[prev].next = next;
        self.points[next].prev = prev;

        prev
    }

    pub fn reverse(&mut self, start: usize) {
        let mut current = start;

        loop {
            let point = &mut self.points[current];
            std::mem::swap(&mut point.next, &mut point.prev);
            // the old next is now prev
            current = point.prev;

            if current == start {
                break;
            }
        }
    }

    pub fn point_count(&self, start: Option<usize>) -> usize {
        let Some(start) = start else {
            return 0;
        };

        let mut result = 0;
        let mut current = start;

        loop {
            result += 1;
            current = self.points[current].next;

            if current == start {
                break;
            }
        }

        result
    }

    /// Signed area of the ring read along `prev` links, positive when that
    /// order is counter-clockwise.
    pub fn area(&self, start: usize) -> f64 {
        let mut acc = 0.0;
        let mut current = start;

        loop {
            let op = &self.points[current];
            let prev = &self.points[op.prev];
            acc += (prev.pt.x as f64 + op.pt.x as f64) * (prev.pt.y as f64 - op.pt.y as f64);
            current = op.next;

            if current == start {
                break;
            }
        }

        acc * 0.5
    }

    pub fn set_idx(&mut self, start: usize, idx: usize) {
        let mut current = start;

        loop {
            self.points[current].idx = idx;
            current = self.points[current].next;

            if current == start {
                break;
            }
        }
    }

    /// Vertices of the ring in output order.
    pub fn export(&self, start: usize) -> Vec<Point> {
        let count = self.point_count(Some(start));
        let mut result = Vec::with_capacity(count);
        let mut current = self.points[start].prev;

        for _ in 0..count {
            result.push(self.points[current].pt);
            current = self.points[current].prev;
        }

        result
    }

    /// 1 inside, 0 outside, -1 on the boundary of the ring.
    pub fn point_in_polygon(&self, pt: &Point, start: usize) -> i32 {
        let mut result = 0;
        let mut current = start;

        loop {
            let op = self.points[current].pt;
            let next = self.points[self.points[current].next].pt;

            if next.y == pt.y
                && (next.x == pt.x || (op.y == pt.y && ((next.x > pt.x) == (op.x < pt.x))))
            {
                return -1;
            }

            if (op.y < pt.y) != (next.y < pt.y) {
                let crosses = if op.x >= pt.x {
                    next.x > pt.x || {
                        match cross_sign(&op, &next, pt) {
                            None => return -1,
                            Some(positive) => positive == (next.y > op.y),
                        }
                    }
                } else if next.x > pt.x {
                    match cross_sign(&op, &next, pt) {
                        None => return -1,
                        Some(positive) => positive == (next.y > op.y),
                    }
                } else {
                    false
                };

                if crosses {
                    result = 1 - result;
                }
            }

            current = self.points[current].next;

            if current == start {
                break;
            }
        }

        result
    }

    /// True when every vertex of ring `inner` is inside or on ring `outer`,
    /// deciding on the first vertex that is not on the boundary.
    pub fn poly2_contains_poly1(&self, inner: usize, outer: usize) -> bool {
        let mut current = inner;

        loop {
            let res = self.point_in_polygon(&self.points[current].pt, outer);

            if res >= 0 {
                return res > 0;
            }

            current = self.points[current].next;

            if current == inner {
                break;
            }
        }

        true
    }

    /// Lowest vertex of the ring (largest y, then smallest x). Ties between
    /// distinct touching vertices go to the one whose edges are steeper.
    pub fn get_bottom_pt(&self, start: usize) -> usize {
        let mut result = start;
        let mut dups: Option<usize> = None;
        let mut current = self.points[start].next;

        while current != result {
            let p = self.points[current].pt;
            let best = self.points[result].pt;

            if p.y > best.y {
                result = current;
                dups = None;
            } else if p.y == best.y && p.x <= best.x {
                if p.x < best.x {
                    dups = None;
                    result = current;
                } else if self.points[current].next != result && self.points[current].prev != result {
                    dups = Some(current);
                }
            }

            current = self.points[current].next;
        }

        if let Some(mut dup) = dups {
            while dup != current {
                if !self.first_is_bottom_pt(current, dup) {
                    result = dup;
                }

                dup = self.points[dup].next;

                while self.points[dup].pt != self.points[result].pt {
                    dup = self.points[dup].next;
                }
            }
        }

        result
    }

    fn neighbour_dx(&self, op: usize, forward: bool) -> f64 {
        let pt = self.points[op].pt;
        let step = |index: usize| {
            if forward {
                self.points[index].next
            } else {
                self.points[index].prev
            }
        };
        let mut current = step(op);

        while self.points[current].pt == pt && current != op {
            current = step(current);
        }

        get_dx(&pt, &self.points[current].pt).abs()
    }

    pub fn first_is_bottom_pt(&self, btm_pt1: usize, btm_pt2: usize) -> bool {
        let dx1p = self.neighbour_dx(btm_pt1, false);
        let dx1n = self.neighbour_dx(btm_pt1, true);
        let dx2p = self.neighbour_dx(btm_pt2, false);
        let dx2n = self.neighbour_dx(btm_pt2, true);

        if dx1p.max(dx1n) == dx2p.max(dx2n) && dx1p.min(dx1n) == dx2p.min(dx2n) {
            self.area(btm_pt1) > 0.0
        } else {
            (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
        }
    }
}

/// Sign of the cross product of (op - pt) and (next - pt); `None` when zero.
fn cross_sign(op: &Point, next: &Point, pt: &Point) -> Option<bool> {
    match Int128::cmp_products(op.x - pt.x, next.y - pt.y, next.x - pt.x, op.y - pt.y) {
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(true),
        std::cmp::Ordering::Less => Some(false),
    }
}
