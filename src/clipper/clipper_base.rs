use tracing::warn;

use crate::clipper::constants::HI_RANGE;
use crate::clipper::enums::{Direction, PolyType};
use crate::clipper::error::ClipperError;
use crate::clipper::local_minima::{LocalMinima, LocalMinimaList};
use crate::clipper::scanbeam::Scanbeam;
use crate::clipper::t_edge::{TEdge, TEdgeArena};
use crate::geometry::point::Point;
use crate::geometry::polygon::Polygon;

/// Rejects points whose coordinates exceed the range the exact predicates support.
pub fn range_test(pt: &Point) -> Result<(), ClipperError> {
    if pt.x > HI_RANGE || pt.x < -HI_RANGE || pt.y > HI_RANGE || pt.y < -HI_RANGE {
        Err(ClipperError::CoordinateOutOfRange { x: pt.x, y: pt.y })
    } else {
        Ok(())
    }
}

/// Turns input paths into edge rings and registers their bounds.
#[derive(Debug, Default)]
pub struct ClipperBase {
    pub edges: TEdgeArena,
    pub minima: LocalMinimaList,
    pub has_open_paths: bool,
    preserve_collinear: bool,
}

impl ClipperBase {
    pub fn new(preserve_collinear: bool) -> Self {
        Self {
            preserve_collinear,
            ..Self::default()
        }
    }

    /// Adds every path of `polygons`. Degenerate paths and open clip paths
    /// are skipped; returns whether any bound was built.
    pub fn add_paths(&mut self, polygons: &[Polygon], poly_type: PolyType) -> Result<bool, ClipperError> {
        let mut result = false;

        for polygon in polygons {
            match self.add_path(polygon, poly_type) {
                Ok(added) => result |= added,
                Err(ClipperError::OpenClipPath) => {
                    warn!(points = polygon.len(), "skipping open clip path");
                }
                Err(error) => return Err(error),
            }
        }

        Ok(result)
    }

    pub fn add_path(&mut self, polygon: &Polygon, poly_type: PolyType) -> Result<bool, ClipperError> {
        let closed = !polygon.is_open;

        if !closed && poly_type == PolyType::Clip {
            return Err(ClipperError::OpenClipPath);
        }

        let path = &polygon.points;

        if path.is_empty() {
            return Ok(false);
        }

        let mut high = path.len() - 1;

        if closed {
            while high > 0 && path[high] == path[0] {
                high -= 1;
            }
        }

        while high > 0 && path[high] == path[high - 1] {
            high -= 1;
        }

        if (closed && high < 2) || (!closed && high < 1) {
            return Ok(false);
        }

        for pt in path[..=high].iter() {
            range_test(pt)?;
        }

        // 1. ring of edges, one per vertex
        let base = self.edges.len();

        for i in 0..=high {
            let next = base + if i == high { 0 } else { i + 1 };
            let prev = base + if i == 0 { high } else { i - 1 };
            let mut edge = TEdge::new(base + i, path[i], next, prev);
            edge.join_type = polygon.join_type;
            edge.end_type = polygon.end_type;
            self.edges.push(edge);
        }

        // 2. drop duplicate vertices and, for closed paths, collinear ones
        let mut start = base;
        let mut e = start;
        let mut loop_stop = start;

        loop {
            let next = self.edges[e].next;
            let prev = self.edges[e].prev;

            // matching start and end points are allowed on open paths
            if self.edges[e].curr == self.edges[next].curr && (closed || next != start) {
                if e == next {
                    break;
                }
                if e == start {
                    start = next;
                }
                e = self.remove_edge(e);
                loop_stop = e;
                continue;
            }

            if prev == next {
                break;
            }

            let prev_pt = self.edges[prev].curr;
            let pt = self.edges[e].curr;
            let next_pt = self.edges[next].curr;

            if closed
                && Point::slopes_equal(&prev_pt, &pt, &next_pt)
                && (!self.preserve_collinear || !Point::is_between(&prev_pt, &pt, &next_pt))
            {
                if e == start {
                    start = next;
                }
                e = self.remove_edge(e);
                e = self.edges[e].prev;
                loop_stop = e;
                continue;
            }

            e = next;

            if e == loop_stop || (!closed && self.edges[e].next == start) {
                break;
            }
        }

        if (!closed && e == self.edges[e].next) || (closed && self.edges[e].prev == self.edges[e].next) {
            self.edges.truncate(base);
            return Ok(false);
        }

        if !closed {
            self.has_open_paths = true;
            let skip = self.edges[start].prev;
            self.edges[skip].is_skip = true;
        }

        // 3. bottom, top and slope of every edge
        let mut is_flat = true;
        e = start;

        loop {
            let next = self.edges[e].next;
            let next_curr = self.edges[next].curr;
            self.edges[e].init_bounds(next_curr, poly_type);
            e = next;

            if is_flat && self.edges[e].curr.y != self.edges[start].curr.y {
                is_flat = false;
            }

            if e == start {
                break;
            }
        }

        // 4. bounds into the minima list
        if is_flat {
            if closed {
                self.edges.truncate(base);
                return Ok(false);
            }

            let skip = self.edges[e].prev;
            self.edges[skip].is_skip = true;
            self.edges[e].side = Direction::Right;
            self.edges[e].wind_delta = 0;
            let minima = LocalMinima::new(self.edges[e].bot.y, None, Some(e));

            loop {
                let prev = self.edges[e].prev;
                if self.edges[e].bot.x != self.edges[prev].top.x {
                    self.edges[e].reverse_horizontal();
                }

                let next = self.edges[e].next;
                if self.edges[next].is_skip {
                    break;
                }

                self.edges[e].next_in_lml = Some(next);
                e = next;
            }

            self.minima.insert(minima);

            return Ok(true);
        }

        // open paths whose ends meet would otherwise never find a minimum
        let prev = self.edges[e].prev;
        if self.edges[prev].bot == self.edges[prev].top {
            e = self.edges[e].next;
        }

        let mut e_min: Option<usize> = None;

        loop {
            e = self.find_next_loc_min(e);

            if Some(e) == e_min {
                break;
            }

            if e_min.is_none() {
                e_min = Some(e);
            }

            // e and e.prev share the minimum; the steeper one starts the left bound
            let prev = self.edges[e].prev;
            let (left_bound, right_bound, left_is_forward) = if self.edges[e].dx < self.edges[prev].dx {
                (prev, e, false)
            } else {
                (e, prev, true)
            };

            let y = self.edges[e].bot.y;

            let wind_delta = if !closed {
                0
            } else if self.edges[left_bound].next == right_bound {
                -1
            } else {
                1
            };
            self.edges[left_bound].wind_delta = wind_delta;
            self.edges[right_bound].wind_delta = -wind_delta;

            e = self.process_bound(left_bound, left_is_forward);
            if self.edges[e].is_skip {
                e = self.process_bound(e, left_is_forward);
            }

            let mut e2 = self.process_bound(right_bound, !left_is_forward);
            if self.edges[e2].is_skip {
                e2 = self.process_bound(e2, !left_is_forward);
            }

            let left = (!self.edges[left_bound].is_skip).then_some(left_bound);
            let right = if left.is_some() && self.edges[right_bound].is_skip {
                None
            } else {
                Some(right_bound)
            };

            self.minima.insert(LocalMinima::new(y, left, right));

            if !left_is_forward {
                e = e2;
            }
        }

        Ok(true)
    }

    fn remove_edge(&mut self, e: usize) -> usize {
        let next = self.edges[e].next;
        let prev = self.edges[e].prev;

        self.edges[prev].next = next;
        self.edges[next].prev = prev;

        next
    }

    fn find_next_loc_min(&self, mut e: usize) -> usize {
        loop {
            loop {
                let edge = &self.edges[e];
                if edge.bot == self.edges[edge.prev].bot && edge.curr != edge.top {
                    break;
                }
                e = edge.next;
            }

            let prev = self.edges[e].prev;

            if !self.edges[e].is_horizontal() && !self.edges[prev].is_horizontal() {
                break;
            }

            while self.edges[self.edges[e].prev].is_horizontal() {
                e = self.edges[e].prev;
            }

            let e2 = e;

            while self.edges[e].is_horizontal() {
                e = self.edges[e].next;
            }

            let prev = self.edges[e].prev;

            // only an intermediate horizontal
            if self.edges[e].top.y == self.edges[prev].bot.y {
                continue;
            }

            let e2_prev = self.edges[e2].prev;

            if self.edges[e2_prev].bot.x < self.edges[e].bot.x {
                e = e2;
            }

            break;
        }

        e
    }

    fn step(&self, e: usize, forward: bool) -> usize {
        if forward {
            self.edges[e].next
        } else {
            self.edges[e].prev
        }
    }

    /// Links one bound through `next_in_lml` and returns the first edge past it.
    fn process_bound(&mut self, mut e: usize, forward: bool) -> usize {
        let mut result = e;

        if self.edges[e].is_skip {
            // edges beyond a skip edge form a further bound of their own
            while self.edges[e].top.y == self.edges[self.step(e, forward)].bot.y {
                e = self.step(e, forward);
            }

            // top horizontals belong to the opposite bound
            while e != result && self.edges[e].is_horizontal() {
                e = self.step(e, !forward);
            }

            if e == result {
                return self.step(e, forward);
            }

            e = self.step(result, forward);
            self.edges[e].wind_delta = 0;
            self.edges[e].side = Direction::Right;
            let minima = LocalMinima::new(self.edges[e].bot.y, None, Some(e));
            result = self.process_bound(e, forward);
            self.minima.insert(minima);

            return result;
        }

        if self.edges[e].is_horizontal() {
            // e may follow a skip edge, or consecutive horizontals may turn back
            let start = self.step(e, !forward);

            if self.edges[start].is_horizontal() {
                if self.edges[start].bot.x != self.edges[e].bot.x
                    && self.edges[start].top.x != self.edges[e].bot.x
                {
                    self.edges[e].reverse_horizontal();
                }
            } else if self.edges[start].bot.x != self.edges[e].bot.x {
                self.edges[e].reverse_horizontal();
            }
        }

        let start = e;

        loop {
            let next = self.step(result, forward);
            if self.edges[result].top.y != self.edges[next].bot.y || self.edges[next].is_skip {
                break;
            }
            result = next;
        }

        let beyond = self.step(result, forward);

        if self.edges[result].is_horizontal() && !self.edges[beyond].is_skip {
            // a top horizontal stays in this bound only when it turns away from the next bound
            let mut horz = result;

            while self.edges[self.step(horz, !forward)].is_horizontal() {
                horz = self.step(horz, !forward);
            }

            let before = self.step(horz, !forward);
            let before_x = self.edges[before].top.x;
            let beyond_x = self.edges[beyond].top.x;

            let take = if forward {
                before_x > beyond_x
            } else {
                before_x >= beyond_x
            };

            if take {
                result = before;
            }
        }

        loop {
            let is_last = e == result;

            if !is_last {
                let next = self.step(e, forward);
                self.edges[e].next_in_lml = Some(next);
            }

            let behind = self.step(e, !forward);

            if self.edges[e].is_horizontal()
                && e != start
                && self.edges[e].bot.x != self.edges[behind].top.x
            {
                self.edges[e].reverse_horizontal();
            }

            if is_last {
                break;
            }

            e = self.step(e, forward);
        }

        self.step(result, forward)
    }

    /// Queues every minima row and reports whether there is anything to sweep.
    pub fn reset(&mut self, scanbeam: &mut Scanbeam) -> bool {
        self.minima.reset();
        scanbeam.clear();

        for minima in self.minima.iter() {
            scanbeam.insert(minima.y);
        }

        let bounds: Vec<(Option<usize>, Direction)> = self
            .minima
            .iter()
            .flat_map(|minima| [(minima.left_bound, Direction::Left), (minima.right_bound, Direction::Right)])
            .collect();

        for (bound, side) in bounds {
            if let Some(e) = bound {
                let edge = &mut self.edges[e];
                edge.curr = edge.bot;
                edge.side = side;
                edge.out_idx = None;
            }
        }

        !self.minima.is_empty()
    }
}
