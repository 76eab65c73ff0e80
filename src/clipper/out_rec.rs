use std::ops::{Index, IndexMut};

use crate::clipper::enums::{Direction, EndType, JoinType};
use crate::clipper::out_pt::OutPtArena;
use crate::geometry::point::Point;
use crate::geometry::polygon::Polygon;

/// One output polygon under construction.
///
/// `idx` equals the record's own position until the record is merged into
/// another; then it names the survivor and `pts` is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutRec {
    pub idx: usize,
    pub is_hole: bool,
    pub is_open: bool,
    pub first_left: Option<usize>,
    pub pts: Option<usize>,
    pub bottom_pt: Option<usize>,
    pub join_type: JoinType,
    pub end_type: EndType,
}

impl OutRec {
    pub fn new(idx: usize) -> Self {
        Self {
            idx,
            is_hole: false,
            is_open: false,
            first_left: None,
            pts: None,
            bottom_pt: None,
            join_type: JoinType::default(),
            end_type: EndType::default(),
        }
    }
}

/// Output records of one clip together with the vertices they own.
#[derive(Debug, Default)]
pub struct OutRecList {
    recs: Vec<OutRec>,
    pub points: OutPtArena,
}

impl Index<usize> for OutRecList {
    type Output = OutRec;

    fn index(&self, index: usize) -> &OutRec {
        &self.recs[index]
    }
}

impl IndexMut<usize> for OutRecList {
    fn index_mut(&mut self, index: usize) -> &mut OutRec {
        &mut self.recs[index]
    }
}

impl OutRecList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.recs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutRec> {
        self.recs.iter()
    }

    pub fn create(&mut self) -> usize {
        let idx = self.recs.len();
        self.recs.push(OutRec::new(idx));
        idx
    }

    /// New record whose ring is the single vertex `pt`.
    pub fn create_with_point(&mut self, pt: Point, is_open: bool) -> (usize, usize) {
        let idx = self.create();
        let op = self.points.create(idx, pt);

        self.recs[idx].is_open = is_open;
        self.recs[idx].pts = Some(op);

        (idx, op)
    }

    /// Follows merge redirections to the live record.
    pub fn get_out_rec(&self, idx: usize) -> usize {
        let mut result = idx;

        while self.recs[result].idx != result {
            result = self.recs[result].idx;
        }

        result
    }

    /// Adds `pt` at the left (front) or right (back) end of the record's
    /// ring. A point equal to that end is not repeated.
    pub fn add_point(&mut self, rec: usize, pt: Point, to_front: bool) -> usize {
        let Some(op) = self.recs[rec].pts else {
            let op = self.points.create(rec, pt);
            self.recs[rec].pts = Some(op);
            return op;
        };

        if to_front && pt == self.points.point(op) {
            return op;
        }

        let back = self.points.prev(op);

        if !to_front && pt == self.points.point(back) {
            return back;
        }

        let new_op = self.points.insert_before(op, pt);

        if to_front {
            self.recs[rec].pts = Some(new_op);
        }

        new_op
    }

    /// Vertex at the given end of the record's ring.
    pub fn last_point(&self, rec: usize, side: Direction) -> Option<usize> {
        let pts = self.recs[rec].pts?;

        Some(match side {
            Direction::Left => pts,
            Direction::Right => self.points.prev(pts),
        })
    }

    pub fn area(&self, rec: usize) -> f64 {
        self.recs[rec]
            .pts
            .map_or(0.0, |pts| self.points.area(pts))
    }

    pub fn reverse(&mut self, rec: usize) {
        if let Some(pts) = self.recs[rec].pts {
            self.points.reverse(pts);
        }
    }

    pub fn point_count(&self, rec: usize) -> usize {
        self.points.point_count(self.recs[rec].pts)
    }

    /// Gives the ring the winding implied by its hole state.
    pub fn fix_orientation(&mut self, rec: usize, reverse_solution: bool) {
        let out_rec = &self.recs[rec];

        if out_rec.pts.is_none() || out_rec.is_open {
            return;
        }

        if (out_rec.is_hole ^ reverse_solution) == (self.area(rec) > 0.0) {
            self.reverse(rec);
        }
    }

    pub fn fix_orientations(&mut self, reverse_solution: bool) {
        for rec in 0..self.recs.len() {
            self.fix_orientation(rec, reverse_solution);
        }
    }

    pub fn update_out_pt_idxs(&mut self, rec: usize) {
        if let Some(pts) = self.recs[rec].pts {
            self.points.set_idx(pts, rec);
        }
    }

    fn bottom_pt(&mut self, rec: usize) -> Option<usize> {
        if self.recs[rec].bottom_pt.is_none() {
            let pts = self.recs[rec].pts?;
            self.recs[rec].bottom_pt = Some(self.points.get_bottom_pt(pts));
        }

        self.recs[rec].bottom_pt
    }

    /// Record whose bottom vertex is lower, used to inherit hole state on merges.
    pub fn get_lowermost_rec(&mut self, rec1: usize, rec2: usize) -> usize {
        let (Some(op1), Some(op2)) = (self.bottom_pt(rec1), self.bottom_pt(rec2)) else {
            return rec1;
        };

        let pt1 = self.points.point(op1);
        let pt2 = self.points.point(op2);

        if pt1.y != pt2.y {
            return if pt1.y > pt2.y { rec1 } else { rec2 };
        }

        if pt1.x != pt2.x {
            return if pt1.x < pt2.x { rec1 } else { rec2 };
        }

        if self.points.next(op1) == op1 {
            rec2
        } else if self.points.next(op2) == op2 || self.points.first_is_bottom_pt(op1, op2) {
            rec1
        } else {
            rec2
        }
    }

    /// True when `rec2` is an ancestor of `rec1` through `first_left`.
    pub fn out_rec1_right_of_out_rec2(&self, rec1: usize, rec2: usize) -> bool {
        let mut current = self.recs[rec1].first_left;

        while let Some(rec) = current {
            if rec == rec2 {
                return true;
            }
            current = self.recs[rec].first_left;
        }

        false
    }

    /// Nearest `first_left` ancestor that still owns points.
    pub fn parse_first_left(&self, first_left: Option<usize>) -> Option<usize> {
        let mut current = first_left;

        while let Some(rec) = current {
            if self.recs[rec].pts.is_some() {
                break;
            }
            current = self.recs[rec].first_left;
        }

        current
    }

    pub fn poly2_contains_poly1(&self, inner: usize, outer: usize) -> bool {
        match (self.recs[inner].pts, self.recs[outer].pts) {
            (Some(inner), Some(outer)) => self.points.poly2_contains_poly1(inner, outer),
            _ => false,
        }
    }

    /// Splices the ring of `rec2` onto `rec1`. `side1`/`side2` are the sides
    /// of the two edges meeting at the local maximum.
    pub fn append(&mut self, rec1: usize, rec2: usize, side1: Direction, side2: Direction) {
        let hole_state_rec = if self.out_rec1_right_of_out_rec2(rec1, rec2) {
            rec2
        } else if self.out_rec1_right_of_out_rec2(rec2, rec1) {
            rec1
        } else {
            self.get_lowermost_rec(rec1, rec2)
        };

        let (Some(p1_lft), Some(p2_lft)) = (self.recs[rec1].pts, self.recs[rec2].pts) else {
            return;
        };
        let p1_rt = self.points.prev(p1_lft);
        let p2_rt = self.points.prev(p2_lft);

        match (side1, side2) {
            (Direction::Left, Direction::Left) => {
                // z y x a b c
                self.points.reverse(p2_lft);
                self.points[p2_lft].next = p1_lft;
                self.points[p1_lft].prev = p2_lft;
                self.points[p1_rt].next = p2_rt;
                self.points[p2_rt].prev = p1_rt;
                self.recs[rec1].pts = Some(p2_rt);
            }
            (Direction::Left, Direction::Right) => {
                // x y z a b c
                self.points[p2_rt].next = p1_lft;
                self.points[p1_lft].prev = p2_rt;
                self.points[p2_lft].prev = p1_rt;
                self.points[p1_rt].next = p2_lft;
                self.recs[rec1].pts = Some(p2_lft);
            }
            (Direction::Right, Direction::Right) => {
                // a b c z y x
                self.points.reverse(p2_lft);
                self.points[p1_rt].next = p2_rt;
                self.points[p2_rt].prev = p1_rt;
                self.points[p2_lft].next = p1_lft;
                self.points[p1_lft].prev = p2_lft;
            }
            (Direction::Right, Direction::Left) => {
                // a b c x y z
                self.points[p1_rt].next = p2_lft;
                self.points[p2_lft].prev = p1_rt;
                self.points[p1_lft].prev = p2_rt;
                self.points[p2_rt].next = p1_lft;
            }
        }

        self.recs[rec1].bottom_pt = None;

        if hole_state_rec == rec2 {
            if self.recs[rec2].first_left != Some(rec1) {
                self.recs[rec1].first_left = self.recs[rec2].first_left;
            }
            self.recs[rec1].is_hole = self.recs[rec2].is_hole;
        }

        let survivor = self.recs[rec1].idx;
        let obsolete = &mut self.recs[rec2];
        obsolete.pts = None;
        obsolete.bottom_pt = None;
        obsolete.first_left = Some(rec1);
        obsolete.idx = survivor;
    }

    /// Re-parents records left of `old_rec` that now lie inside `new_rec`.
    pub fn fixup_first_lefts1(&mut self, old_rec: usize, new_rec: usize) {
        for rec in 0..self.recs.len() {
            let first_left = self.parse_first_left(self.recs[rec].first_left);

            if self.recs[rec].pts.is_some()
                && first_left == Some(old_rec)
                && self.poly2_contains_poly1(rec, new_rec)
            {
                self.recs[rec].first_left = Some(new_rec);
            }
        }
    }

    /// A ring split into `inner` nested in `outer`; records owned by either
    /// (or by the outer's owner) are re-parented by containment.
    pub fn fixup_first_lefts2(&mut self, inner: usize, outer: usize) {
        let orfl = self.recs[outer].first_left;

        for rec in 0..self.recs.len() {
            if self.recs[rec].pts.is_none() || rec == outer || rec == inner {
                continue;
            }

            let first_left = self.parse_first_left(self.recs[rec].first_left);

            if first_left != orfl && first_left != Some(inner) && first_left != Some(outer) {
                continue;
            }

            if self.poly2_contains_poly1(rec, inner) {
                self.recs[rec].first_left = Some(inner);
            } else if self.poly2_contains_poly1(rec, outer) {
                self.recs[rec].first_left = Some(outer);
            } else if self.recs[rec].first_left == Some(inner)
                || self.recs[rec].first_left == Some(outer)
            {
                self.recs[rec].first_left = orfl;
            }
        }
    }

    /// Moves every record owned by `old_rec` to `new_rec` unconditionally.
    pub fn fixup_first_lefts3(&mut self, old_rec: usize, new_rec: usize) {
        for rec in 0..self.recs.len() {
            let first_left = self.parse_first_left(self.recs[rec].first_left);

            if self.recs[rec].pts.is_some() && first_left == Some(old_rec) {
                self.recs[rec].first_left = Some(new_rec);
            }
        }
    }

    /// Drops duplicate vertices, spikes and (unless preserved) collinear
    /// vertices. Rings that collapse below three vertices are discarded.
    pub fn fixup_out_polygon(&mut self, rec: usize, preserve_collinear: bool) {
        self.recs[rec].bottom_pt = None;

        let Some(mut pp) = self.recs[rec].pts else {
            return;
        };
        let mut last_ok: Option<usize> = None;

        loop {
            let prev = self.points.prev(pp);
            let next = self.points.next(pp);

            if prev == pp || prev == next {
                self.recs[rec].pts = None;
                return;
            }

            let pt = self.points.point(pp);
            let prev_pt = self.points.point(prev);
            let next_pt = self.points.point(next);

            if pt == next_pt
                || pt == prev_pt
                || (Point::slopes_equal(&prev_pt, &pt, &next_pt)
                    && (!preserve_collinear || !Point::is_between(&prev_pt, &pt, &next_pt)))
            {
                last_ok = None;
                pp = self.points.exclude(pp);
            } else if Some(pp) == last_ok {
                break;
            } else {
                if last_ok.is_none() {
                    last_ok = Some(pp);
                }
                pp = next;
            }
        }

        self.recs[rec].pts = Some(pp);
    }

    /// Drops consecutive duplicate vertices of a polyline.
    pub fn fixup_out_polyline(&mut self, rec: usize) {
        let Some(start) = self.recs[rec].pts else {
            return;
        };

        let mut pp = start;
        let mut last_pp = self.points.prev(pp);

        while pp != last_pp {
            pp = self.points.next(pp);
            let prev = self.points.prev(pp);

            if self.points.point(pp) == self.points.point(prev) {
                if pp == last_pp {
                    last_pp = prev;
                }
                self.points.exclude(pp);
                pp = prev;
            }
        }

        if pp == self.points.prev(pp) {
            self.recs[rec].pts = None;
        }
    }

    /// Splits closed rings wherever two non-adjacent vertices coincide.
    pub fn do_simple_polygons(&mut self) {
        let mut i = 0;

        while i < self.recs.len() {
            let rec = i;
            i += 1;

            let Some(start) = self.recs[rec].pts else {
                continue;
            };

            if self.recs[rec].is_open {
                continue;
            }

            let mut op = start;

            loop {
                let mut op2 = self.points.next(op);

                while Some(op2) != self.recs[rec].pts {
                    if self.points.point(op) == self.points.point(op2)
                        && self.points.next(op2) != op
                        && self.points.prev(op2) != op
                    {
                        let op3 = self.points.prev(op);
                        let op4 = self.points.prev(op2);
                        self.points[op].prev = op4;
                        self.points[op4].next = op;
                        self.points[op2].prev = op3;
                        self.points[op3].next = op2;

                        self.recs[rec].pts = Some(op);
                        let rec2 = self.create();
                        self.recs[rec2].pts = Some(op2);
                        self.update_out_pt_idxs(rec2);

                        if self.poly2_contains_poly1(rec2, rec) {
                            self.recs[rec2].is_hole = !self.recs[rec].is_hole;
                            self.recs[rec2].first_left = Some(rec);
                            self.fixup_first_lefts2(rec2, rec);
                        } else if self.poly2_contains_poly1(rec, rec2) {
                            self.recs[rec2].is_hole = self.recs[rec].is_hole;
                            self.recs[rec].is_hole = !self.recs[rec2].is_hole;
                            self.recs[rec2].first_left = self.recs[rec].first_left;
                            self.recs[rec].first_left = Some(rec2);
                            self.fixup_first_lefts2(rec, rec2);
                        } else {
                            self.recs[rec2].is_hole = self.recs[rec].is_hole;
                            self.recs[rec2].first_left = self.recs[rec].first_left;
                            self.fixup_first_lefts1(rec, rec2);
                        }

                        op2 = op;
                    }

                    op2 = self.points.next(op2);
                }

                op = self.points.next(op);

                if Some(op) == self.recs[rec].pts {
                    break;
                }
            }
        }
    }

    /// Links a record to the nearest owner of the opposite hole state that
    /// still has points.
    pub fn fix_hole_linkage(&mut self, rec: usize) {
        let Some(first_left) = self.recs[rec].first_left else {
            return;
        };

        let is_hole = self.recs[rec].is_hole;

        if is_hole != self.recs[first_left].is_hole && self.recs[first_left].pts.is_some() {
            return;
        }

        let mut orfl = Some(first_left);

        while let Some(owner) = orfl {
            if self.recs[owner].is_hole != is_hole && self.recs[owner].pts.is_some() {
                break;
            }
            orfl = self.recs[owner].first_left;
        }

        self.recs[rec].first_left = orfl;
    }

    pub fn export(&self, rec: usize) -> Option<Polygon> {
        let out_rec = &self.recs[rec];
        let pts = out_rec.pts?;

        Some(Polygon {
            points: self.points.export(pts),
            is_open: out_rec.is_open,
            join_type: out_rec.join_type,
            end_type: out_rec.end_type,
        })
    }
}
