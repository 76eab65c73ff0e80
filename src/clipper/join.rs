use crate::clipper::enums::Direction;
use crate::clipper::out_rec::OutRecList;
use crate::geometry::point::Point;

/// Pending merge of two output vertices whose edges overlap. `off_pt` is a
/// second point on the shared line, or equal to both vertices for a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub out_pt1: usize,
    pub out_pt2: usize,
    pub off_pt: Point,
}

impl Join {
    pub fn new(out_pt1: usize, out_pt2: usize, off_pt: Point) -> Self {
        Self {
            out_pt1,
            out_pt2,
            off_pt,
        }
    }
}

/// Horizontal output edge kept alive for one scanbeam so that later
/// horizontals on the same row can join with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostJoin {
    pub out_pt: usize,
    pub off_pt: Point,
}

/// Overlap of the x-ranges [a1, a2] and [b1, b2] given in any order.
pub fn get_overlap(a1: i64, a2: i64, b1: i64, b2: i64) -> Option<(i64, i64)> {
    let (left, right) = match (a1 < a2, b1 < b2) {
        (true, true) => (a1.max(b1), a2.min(b2)),
        (true, false) => (a1.max(b2), a2.min(b1)),
        (false, true) => (a2.max(b1), a1.min(b2)),
        (false, false) => (a2.max(b2), a1.min(b1)),
    };

    (left < right).then_some((left, right))
}

pub fn horz_segments_overlap(seg1a: i64, seg1b: i64, seg2a: i64, seg2b: i64) -> bool {
    let (seg1a, seg1b) = if seg1a > seg1b { (seg1b, seg1a) } else { (seg1a, seg1b) };
    let (seg2a, seg2b) = if seg2a > seg2b { (seg2b, seg2a) } else { (seg2a, seg2b) };

    seg1a < seg2b && seg2a < seg1b
}

impl OutRecList {
    /// Cross links `op1` and `op2` so their rings become one (or one ring
    /// splits in two), duplicating both vertices. Returns the new pair.
    fn link_join(&mut self, op1: usize, op2: usize, reverse: bool) -> (usize, usize) {
        let points = &mut self.points;

        if reverse {
            let op1b = points.duplicate(op1, false);
            let op2b = points.duplicate(op2, true);
            points[op1].prev = op2;
            points[op2].next = op1;
            points[op1b].next = op2b;
            points[op2b].prev = op1b;
            (op1, op1b)
        } else {
            let op1b = points.duplicate(op1, true);
            let op2b = points.duplicate(op2, false);
            points[op1].next = op2;
            points[op2].prev = op1;
            points[op1b].prev = op2b;
            points[op2b].next = op1b;
            (op1, op1b)
        }
    }

    /// Walks from `op` while vertices sit on `pt`.
    fn skip_same(&self, op: usize, pt: Point, forward: bool) -> usize {
        let step = |index: usize| {
            if forward {
                self.points.next(index)
            } else {
                self.points.prev(index)
            }
        };
        let mut result = step(op);

        while result != op && self.points.point(result) == pt {
            result = step(result);
        }

        result
    }

    /// Moves along a horizontal run towards `pt`, then splits at `pt`.
    fn join_horz_side(
        &mut self,
        mut op: usize,
        direction: Direction,
        pt: Point,
        discard_left: bool,
    ) -> (usize, usize) {
        let (insert_after, advance) = match direction {
            Direction::Right => (!discard_left, discard_left),
            Direction::Left => (discard_left, !discard_left),
        };

        loop {
            let next = self.points.point(self.points.next(op));
            let current = self.points.point(op);
            let inside = match direction {
                Direction::Right => next.x <= pt.x && next.x >= current.x,
                Direction::Left => next.x >= pt.x && next.x <= current.x,
            };

            if !(inside && next.y == pt.y) {
                break;
            }

            op = self.points.next(op);
        }

        if advance && self.points.point(op).x != pt.x {
            op = self.points.next(op);
        }

        let mut opb = self.points.duplicate(op, insert_after);

        if self.points.point(opb) != pt {
            op = opb;
            self.points[op].pt = pt;
            opb = self.points.duplicate(op, insert_after);
        }

        (op, opb)
    }

    fn join_horz(
        &mut self,
        op1: usize,
        op1b: usize,
        op2: usize,
        op2b: usize,
        pt: Point,
        discard_left: bool,
    ) -> bool {
        let direction = |a: usize, b: usize| {
            if self.points.point(a).x > self.points.point(b).x {
                Direction::Left
            } else {
                Direction::Right
            }
        };
        let dir1 = direction(op1, op1b);
        let dir2 = direction(op2, op2b);

        if dir1 == dir2 {
            return false;
        }

        let (op1, op1b) = self.join_horz_side(op1, dir1, pt, discard_left);
        let (op2, op2b) = self.join_horz_side(op2, dir2, pt, discard_left);
        let points = &mut self.points;

        if (dir1 == Direction::Right) == discard_left {
            points[op1].prev = op2;
            points[op2].next = op1;
            points[op1b].next = op2b;
            points[op2b].prev = op1b;
        } else {
            points[op1].next = op2;
            points[op2].prev = op1;
            points[op1b].prev = op2b;
            points[op2b].next = op1b;
        }

        true
    }

    /// Performs one join. On success `join.out_pt1`/`out_pt2` name a vertex
    /// of each resulting ring.
    pub fn join_points(&mut self, join: &mut Join, rec1: usize, rec2: usize) -> bool {
        let mut op1 = join.out_pt1;
        let mut op2 = join.out_pt2;
        let off_pt = join.off_pt;
        let pt1 = self.points.point(op1);
        let is_horizontal = pt1.y == off_pt.y;

        if is_horizontal && off_pt == pt1 && off_pt == self.points.point(op2) {
            // edges only touch at a vertex
            if rec1 != rec2 {
                return false;
            }

            let op1b = self.skip_same(op1, off_pt, true);
            let reverse1 = self.points.point(op1b).y > off_pt.y;
            let op2b = self.skip_same(op2, off_pt, true);
            let reverse2 = self.points.point(op2b).y > off_pt.y;

            if reverse1 == reverse2 {
                return false;
            }

            let (out_pt1, out_pt2) = self.link_join(op1, op2, reverse1);
            join.out_pt1 = out_pt1;
            join.out_pt2 = out_pt2;

            return true;
        }

        if is_horizontal {
            // the overlap may be anywhere along both horizontal runs
            let mut op1b = op1;
            while self.points.point(self.points.prev(op1)).y == self.points.point(op1).y
                && self.points.prev(op1) != op1b
                && self.points.prev(op1) != op2
            {
                op1 = self.points.prev(op1);
            }
            while self.points.point(self.points.next(op1b)).y == self.points.point(op1b).y
                && self.points.next(op1b) != op1
                && self.points.next(op1b) != op2
            {
                op1b = self.points.next(op1b);
            }
            if self.points.next(op1b) == op1 || self.points.next(op1b) == op2 {
                return false;
            }

            let mut op2b = op2;
            while self.points.point(self.points.prev(op2)).y == self.points.point(op2).y
                && self.points.prev(op2) != op2b
                && self.points.prev(op2) != op1b
            {
                op2 = self.points.prev(op2);
            }
            while self.points.point(self.points.next(op2b)).y == self.points.point(op2b).y
                && self.points.next(op2b) != op2
                && self.points.next(op2b) != op1
            {
                op2b = self.points.next(op2b);
            }
            if self.points.next(op2b) == op2 || self.points.next(op2b) == op1 {
                return false;
            }

            let [p1, p1b, p2, p2b] = [op1, op1b, op2, op2b].map(|op| self.points.point(op));

            let Some((left, right)) = get_overlap(p1.x, p1b.x, p2.x, p2b.x) else {
                return false;
            };

            let within = |pt: &Point| pt.x >= left && pt.x <= right;

            // a spike forms on the discarded side; keep op1 and op2 off it
            let (pt, discard_left) = if within(&p1) {
                (p1, p1.x > p1b.x)
            } else if within(&p2) {
                (p2, p2.x > p2b.x)
            } else if within(&p1b) {
                (p1b, p1b.x > p1.x)
            } else {
                (p2b, p2b.x > p2.x)
            };

            join.out_pt1 = op1;
            join.out_pt2 = op2;

            return self.join_horz(op1, op1b, op2, op2b, pt, discard_left);
        }

        // out_pt1 and out_pt2 share the bottom of the overlap, off_pt is above
        let Some(reverse1) = self.join_direction(op1, off_pt) else {
            return false;
        };
        let Some(reverse2) = self.join_direction(op2, off_pt) else {
            return false;
        };

        let op1b = self.join_neighbour(op1, reverse1);
        let op2b = self.join_neighbour(op2, reverse2);

        if op1b == op1 || op2b == op2 || op1b == op2b || (rec1 == rec2 && reverse1 == reverse2) {
            return false;
        }

        let (out_pt1, out_pt2) = self.link_join(op1, op2, reverse1);
        join.out_pt1 = out_pt1;
        join.out_pt2 = out_pt2;

        true
    }

    fn join_neighbour(&self, op: usize, reverse: bool) -> usize {
        self.skip_same(op, self.points.point(op), !reverse)
    }

    /// Whether the shared edge runs along `prev` links from `op`; `None` when
    /// neither neighbour lies on the line towards `off_pt`.
    fn join_direction(&self, op: usize, off_pt: Point) -> Option<bool> {
        let pt = self.points.point(op);
        let runs_along = |neighbour: usize| {
            let neighbour_pt = self.points.point(neighbour);
            neighbour_pt.y <= pt.y && Point::slopes_equal(&pt, &neighbour_pt, &off_pt)
        };

        if runs_along(self.join_neighbour(op, false)) {
            Some(false)
        } else if runs_along(self.join_neighbour(op, true)) {
            Some(true)
        } else {
            None
        }
    }

    pub fn join_common_edges(&mut self, joins: &mut [Join], reverse_solution: bool) {
        for join in joins.iter_mut() {
            let rec1 = self.get_out_rec(self.points[join.out_pt1].idx);
            let mut rec2 = self.get_out_rec(self.points[join.out_pt2].idx);

            if self[rec1].pts.is_none() || self[rec2].pts.is_none() {
                continue;
            }

            if self[rec1].is_open || self[rec2].is_open {
                continue;
            }

            let hole_state_rec = if rec1 == rec2 {
                rec1
            } else if self.out_rec1_right_of_out_rec2(rec1, rec2) {
                rec2
            } else if self.out_rec1_right_of_out_rec2(rec2, rec1) {
                rec1
            } else {
                self.get_lowermost_rec(rec1, rec2)
            };

            if !self.join_points(join, rec1, rec2) {
                continue;
            }

            if rec1 == rec2 {
                // the ring split in two
                self[rec1].pts = Some(join.out_pt1);
                self[rec1].bottom_pt = None;
                rec2 = self.create();
                self[rec2].pts = Some(join.out_pt2);
                self.update_out_pt_idxs(rec2);

                if self.poly2_contains_poly1(rec2, rec1) {
                    self[rec2].is_hole = !self[rec1].is_hole;
                    self[rec2].first_left = Some(rec1);
                    self.fixup_first_lefts2(rec2, rec1);
                    self.fix_orientation(rec2, reverse_solution);
                } else if self.poly2_contains_poly1(rec1, rec2) {
                    self[rec2].is_hole = self[rec1].is_hole;
                    self[rec1].is_hole = !self[rec2].is_hole;
                    self[rec2].first_left = self[rec1].first_left;
                    self[rec1].first_left = Some(rec2);
                    self.fixup_first_lefts2(rec1, rec2);
                    self.fix_orientation(rec1, reverse_solution);
                } else {
                    self[rec2].is_hole = self[rec1].is_hole;
                    self[rec2].first_left = self[rec1].first_left;
                    self.fixup_first_lefts1(rec1, rec2);
                }
            } else {
                // two rings became one
                self[rec2].pts = None;
                self[rec2].bottom_pt = None;
                self[rec2].idx = self[rec1].idx;

                self[rec1].is_hole = self[hole_state_rec].is_hole;
                if hole_state_rec == rec2 {
                    self[rec1].first_left = self[rec2].first_left;
                }
                self[rec2].first_left = Some(rec1);

                self.fixup_first_lefts3(rec2, rec1);
            }
        }
    }
}
