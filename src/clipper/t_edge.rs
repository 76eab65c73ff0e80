use std::ops::{Index, IndexMut};

use crate::clipper::clipper_config::ClipRules;
use crate::clipper::constants::HORIZONTAL;
use crate::clipper::enums::{ClipType, Direction, EndType, JoinType, PolyFillType, PolyType};
use crate::clipper::error::ClipperError;
use crate::clipper::int128::Int128;
use crate::clipper::scanbeam::Scanbeam;
use crate::geometry::point::Point;
use crate::utils::round::round_to_i64;

/// One boundary segment of an input path in sweep space.
///
/// `bot.y >= top.y`; `next`/`prev` form the static ring of the source path
/// while the `*_in_ael`/`*_in_sel` links only encode list membership.
#[derive(Debug, Clone)]
pub struct TEdge {
    pub bot: Point,
    pub curr: Point,
    pub top: Point,
    pub delta: Point,
    pub dx: f64,
    pub poly_typ: PolyType,
    pub side: Direction,
    pub wind_delta: i32,
    pub wind_cnt: i32,
    pub wind_cnt2: i32,
    pub out_idx: Option<usize>,
    pub is_skip: bool,
    pub index: usize,
    pub next: usize,
    pub prev: usize,
    pub next_in_lml: Option<usize>,
    pub next_in_ael: Option<usize>,
    pub prev_in_ael: Option<usize>,
    pub next_in_sel: Option<usize>,
    pub prev_in_sel: Option<usize>,
    pub join_type: JoinType,
    pub end_type: EndType,
}

impl TEdge {
    pub fn new(index: usize, curr: Point, next: usize, prev: usize) -> Self {
        Self {
            bot: Point::default(),
            curr,
            top: Point::default(),
            delta: Point::default(),
            dx: 0.0,
            poly_typ: PolyType::Subject,
            side: Direction::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: None,
            is_skip: false,
            index,
            next,
            prev,
            next_in_lml: None,
            next_in_ael: None,
            prev_in_ael: None,
            next_in_sel: None,
            prev_in_sel: None,
            join_type: JoinType::default(),
            end_type: EndType::default(),
        }
    }

    pub fn init_bounds(&mut self, next_curr: Point, poly_typ: PolyType) {
        if self.curr.y >= next_curr.y {
            self.bot = self.curr;
            self.top = next_curr;
        } else {
            self.top = self.curr;
            self.bot = next_curr;
        }

        self.set_dx();
        self.poly_typ = poly_typ;
    }

    pub fn set_dx(&mut self) {
        self.delta = self.top - self.bot;
        self.dx = if self.delta.y == 0 {
            HORIZONTAL
        } else {
            self.delta.x as f64 / self.delta.y as f64
        };
    }

    #[inline(always)]
    pub fn is_horizontal(&self) -> bool {
        self.delta.y == 0
    }

    pub fn reverse_horizontal(&mut self) {
        std::mem::swap(&mut self.top.x, &mut self.bot.x);
    }

    pub fn top_x(&self, current_y: i64) -> i64 {
        if current_y == self.top.y {
            self.top.x
        } else {
            self.bot.x + round_to_i64(self.dx * (current_y - self.bot.y) as f64)
        }
    }

    #[inline(always)]
    pub fn is_maxima(&self, y: i64) -> bool {
        self.top.y == y && self.next_in_lml.is_none()
    }

    #[inline(always)]
    pub fn is_intermediate(&self, y: i64) -> bool {
        self.top.y == y && self.next_in_lml.is_some()
    }

    pub fn slopes_equal(&self, other: &TEdge) -> bool {
        Int128::mul_eq(self.delta.y, other.delta.x, self.delta.x, other.delta.y)
    }

    /// Travel direction and x-extent of a horizontal edge.
    pub fn horz_direction(&self) -> (Direction, i64, i64) {
        if self.bot.x < self.top.x {
            (Direction::Right, self.bot.x, self.top.x)
        } else {
            (Direction::Left, self.top.x, self.bot.x)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeList {
    Active,
    Sorted,
}

/// Arena of every edge built for one clip, plus the heads of the active
/// (AEL) and sorted (SEL) edge lists threaded through it.
#[derive(Debug, Default)]
pub struct TEdgeArena {
    edges: Vec<TEdge>,
    pub active: Option<usize>,
    pub sorted: Option<usize>,
}

impl Index<usize> for TEdgeArena {
    type Output = TEdge;

    fn index(&self, index: usize) -> &TEdge {
        &self.edges[index]
    }
}

impl IndexMut<usize> for TEdgeArena {
    fn index_mut(&mut self, index: usize) -> &mut TEdge {
        &mut self.edges[index]
    }
}

impl TEdgeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn push(&mut self, edge: TEdge) -> usize {
        self.edges.push(edge);
        self.edges.len() - 1
    }

    pub fn truncate(&mut self, len: usize) {
        self.edges.truncate(len);
    }

    fn next_in(&self, edge: usize, list: EdgeList) -> Option<usize> {
        match list {
            EdgeList::Active => self.edges[edge].next_in_ael,
            EdgeList::Sorted => self.edges[edge].next_in_sel,
        }
    }

    fn prev_in(&self, edge: usize, list: EdgeList) -> Option<usize> {
        match list {
            EdgeList::Active => self.edges[edge].prev_in_ael,
            EdgeList::Sorted => self.edges[edge].prev_in_sel,
        }
    }

    fn set_next_in(&mut self, edge: usize, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.edges[edge].next_in_ael = value,
            EdgeList::Sorted => self.edges[edge].next_in_sel = value,
        }
    }

    fn set_prev_in(&mut self, edge: usize, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.edges[edge].prev_in_ael = value,
            EdgeList::Sorted => self.edges[edge].prev_in_sel = value,
        }
    }

    fn set_head(&mut self, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.active = value,
            EdgeList::Sorted => self.sorted = value,
        }
    }

    fn head(&self, list: EdgeList) -> Option<usize> {
        match list {
            EdgeList::Active => self.active,
            EdgeList::Sorted => self.sorted,
        }
    }

    /// Next edge of the AEL in the given travel direction.
    pub fn next_in_ael(&self, edge: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Right => self.edges[edge].next_in_ael,
            Direction::Left => self.edges[edge].prev_in_ael,
        }
    }

    fn e2_inserts_before_e1(&self, e1: usize, e2: usize) -> bool {
        let edge1 = &self.edges[e1];
        let edge2 = &self.edges[e2];

        if edge2.curr.x == edge1.curr.x {
            if edge2.top.y > edge1.top.y {
                edge2.top.x < edge1.top_x(edge2.top.y)
            } else {
                edge1.top.x > edge2.top_x(edge1.top.y)
            }
        } else {
            edge2.curr.x < edge1.curr.x
        }
    }

    /// Coincident edges keep their insertion order, so ties resolve to the
    /// lower arena index on the left.
    pub fn insert_edge_into_ael(&mut self, edge: usize, start_edge: Option<usize>) {
        let Some(active) = self.active else {
            self.edges[edge].prev_in_ael = None;
            self.edges[edge].next_in_ael = None;
            self.active = Some(edge);
            return;
        };

        if start_edge.is_none() && self.e2_inserts_before_e1(active, edge) {
            self.edges[edge].prev_in_ael = None;
            self.edges[edge].next_in_ael = Some(active);
            self.edges[active].prev_in_ael = Some(edge);
            self.active = Some(edge);
            return;
        }

        let mut start = start_edge.unwrap_or(active);

        while let Some(next) = self.edges[start].next_in_ael {
            if self.e2_inserts_before_e1(next, edge) {
                break;
            }
            start = next;
        }

        let next = self.edges[start].next_in_ael;
        self.edges[edge].next_in_ael = next;
        if let Some(next) = next {
            self.edges[next].prev_in_ael = Some(edge);
        }
        self.edges[edge].prev_in_ael = Some(start);
        self.edges[start].next_in_ael = Some(edge);
    }

    fn delete_from(&mut self, edge: usize, list: EdgeList) {
        let prev = self.prev_in(edge, list);
        let next = self.next_in(edge, list);

        if prev.is_none() && next.is_none() && self.head(list) != Some(edge) {
            return;
        }

        match prev {
            Some(prev) => self.set_next_in(prev, list, next),
            None => self.set_head(list, next),
        }

        if let Some(next) = next {
            self.set_prev_in(next, list, prev);
        }

        self.set_next_in(edge, list, None);
        self.set_prev_in(edge, list, None);
    }

    pub fn delete_from_ael(&mut self, edge: usize) {
        self.delete_from(edge, EdgeList::Active);
    }

    pub fn delete_from_sel(&mut self, edge: usize) {
        self.delete_from(edge, EdgeList::Sorted);
    }

    /// Additions go to the front; horizontal processing order does not depend on it.
    pub fn add_edge_to_sel(&mut self, edge: usize) {
        self.edges[edge].prev_in_sel = None;
        self.edges[edge].next_in_sel = self.sorted;

        if let Some(sorted) = self.sorted {
            self.edges[sorted].prev_in_sel = Some(edge);
        }

        self.sorted = Some(edge);
    }

    pub fn pop_edge_from_sel(&mut self) -> Option<usize> {
        let edge = self.sorted?;
        self.delete_from_sel(edge);
        Some(edge)
    }

    pub fn copy_ael_to_sel(&mut self) {
        let mut current = self.active;
        self.sorted = current;

        while let Some(edge) = current {
            self.edges[edge].prev_in_sel = self.edges[edge].prev_in_ael;
            self.edges[edge].next_in_sel = self.edges[edge].next_in_ael;
            current = self.edges[edge].next_in_ael;
        }
    }

    fn swap_positions(&mut self, edge1: usize, edge2: usize, list: EdgeList) {
        // either edge may already have been removed from the list
        if self.next_in(edge1, list) == self.prev_in(edge1, list)
            || self.next_in(edge2, list) == self.prev_in(edge2, list)
        {
            return;
        }

        if self.next_in(edge1, list) == Some(edge2) {
            let next = self.next_in(edge2, list);
            if let Some(next) = next {
                self.set_prev_in(next, list, Some(edge1));
            }
            let prev = self.prev_in(edge1, list);
            if let Some(prev) = prev {
                self.set_next_in(prev, list, Some(edge2));
            }
            self.set_prev_in(edge2, list, prev);
            self.set_next_in(edge2, list, Some(edge1));
            self.set_prev_in(edge1, list, Some(edge2));
            self.set_next_in(edge1, list, next);
        } else if self.next_in(edge2, list) == Some(edge1) {
            let next = self.next_in(edge1, list);
            if let Some(next) = next {
                self.set_prev_in(next, list, Some(edge2));
            }
            let prev = self.prev_in(edge2, list);
            if let Some(prev) = prev {
                self.set_next_in(prev, list, Some(edge1));
            }
            self.set_prev_in(edge1, list, prev);
            self.set_next_in(edge1, list, Some(edge2));
            self.set_prev_in(edge2, list, Some(edge1));
            self.set_next_in(edge2, list, next);
        } else {
            let next = self.next_in(edge1, list);
            let prev = self.prev_in(edge1, list);

            let next2 = self.next_in(edge2, list);
            self.set_next_in(edge1, list, next2);
            if let Some(next2) = next2 {
                self.set_prev_in(next2, list, Some(edge1));
            }

            let prev2 = self.prev_in(edge2, list);
            self.set_prev_in(edge1, list, prev2);
            if let Some(prev2) = prev2 {
                self.set_next_in(prev2, list, Some(edge1));
            }

            self.set_next_in(edge2, list, next);
            if let Some(next) = next {
                self.set_prev_in(next, list, Some(edge2));
            }

            self.set_prev_in(edge2, list, prev);
            if let Some(prev) = prev {
                self.set_next_in(prev, list, Some(edge2));
            }
        }

        if self.prev_in(edge1, list).is_none() {
            self.set_head(list, Some(edge1));
        } else if self.prev_in(edge2, list).is_none() {
            self.set_head(list, Some(edge2));
        }
    }

    pub fn swap_positions_in_ael(&mut self, edge1: usize, edge2: usize) {
        self.swap_positions(edge1, edge2, EdgeList::Active);
    }

    pub fn swap_positions_in_sel(&mut self, edge1: usize, edge2: usize) {
        self.swap_positions(edge1, edge2, EdgeList::Sorted);
    }

    /// Replaces `edge` in the AEL by the next edge of its bound and returns it.
    pub fn update_edge_into_ael(
        &mut self,
        edge: usize,
        scanbeam: &mut Scanbeam,
    ) -> Result<usize, ClipperError> {
        let next = self.edges[edge]
            .next_in_lml
            .ok_or(ClipperError::InvalidBoundUpdate { edge })?;
        let ael_prev = self.edges[edge].prev_in_ael;
        let ael_next = self.edges[edge].next_in_ael;
        let source = self.edges[edge].clone();

        match ael_prev {
            Some(prev) => self.edges[prev].next_in_ael = Some(next),
            None => self.active = Some(next),
        }

        if let Some(ael_next) = ael_next {
            self.edges[ael_next].prev_in_ael = Some(next);
        }

        let result = &mut self.edges[next];
        result.out_idx = source.out_idx;
        result.side = source.side;
        result.wind_delta = source.wind_delta;
        result.wind_cnt = source.wind_cnt;
        result.wind_cnt2 = source.wind_cnt2;
        result.curr = result.bot;
        result.prev_in_ael = ael_prev;
        result.next_in_ael = ael_next;

        if !result.is_horizontal() {
            scanbeam.insert(result.top.y);
        }

        Ok(next)
    }

    pub fn set_winding_count(&mut self, edge: usize, rules: &ClipRules) {
        let poly_typ = self.edges[edge].poly_typ;
        let wind_delta = self.edges[edge].wind_delta;

        // nearest preceding closed edge of the same operand
        let mut current = self.edges[edge].prev_in_ael;
        while let Some(e) = current {
            if self.edges[e].poly_typ == poly_typ && self.edges[e].wind_delta != 0 {
                break;
            }
            current = self.edges[e].prev_in_ael;
        }

        let mut wind_cnt2_start = match current {
            None => {
                self.edges[edge].wind_cnt = if wind_delta == 0 {
                    if rules.fill_type(poly_typ) == PolyFillType::Negative {
                        -1
                    } else {
                        1
                    }
                } else {
                    wind_delta
                };
                self.edges[edge].wind_cnt2 = 0;
                self.active
            }
            Some(e) if wind_delta == 0 && rules.clip_type != ClipType::Union => {
                self.edges[edge].wind_cnt = 1;
                self.edges[edge].wind_cnt2 = self.edges[e].wind_cnt2;
                self.edges[e].next_in_ael
            }
            Some(e) if rules.is_even_odd(poly_typ) => {
                self.edges[edge].wind_cnt = if wind_delta == 0 {
                    // open paths only count while outside their own operand
                    let mut inside = true;
                    let mut e2 = self.edges[e].prev_in_ael;
                    while let Some(prev) = e2 {
                        if self.edges[prev].poly_typ == self.edges[e].poly_typ
                            && self.edges[prev].wind_delta != 0
                        {
                            inside = !inside;
                        }
                        e2 = self.edges[prev].prev_in_ael;
                    }
                    if inside {
                        0
                    } else {
                        1
                    }
                } else {
                    wind_delta
                };
                self.edges[edge].wind_cnt2 = self.edges[e].wind_cnt2;
                self.edges[e].next_in_ael
            }
            Some(e) => {
                let prev_cnt = self.edges[e].wind_cnt;
                let prev_delta = self.edges[e].wind_delta;

                self.edges[edge].wind_cnt = if prev_cnt * prev_delta < 0 {
                    // leaving the previous polygon
                    if prev_cnt.abs() > 1 {
                        if prev_delta * wind_delta < 0 {
                            prev_cnt
                        } else {
                            prev_cnt + wind_delta
                        }
                    } else if wind_delta == 0 {
                        1
                    } else {
                        wind_delta
                    }
                } else if wind_delta == 0 {
                    if prev_cnt < 0 {
                        prev_cnt - 1
                    } else {
                        prev_cnt + 1
                    }
                } else if prev_delta * wind_delta < 0 {
                    prev_cnt
                } else {
                    prev_cnt + wind_delta
                };
                self.edges[edge].wind_cnt2 = self.edges[e].wind_cnt2;
                self.edges[e].next_in_ael
            }
        };

        let even_odd_alt = rules.is_even_odd(poly_typ.opposite());

        while let Some(e) = wind_cnt2_start {
            if e == edge {
                break;
            }

            let delta = self.edges[e].wind_delta;
            let target = &mut self.edges[edge].wind_cnt2;

            if even_odd_alt {
                if delta != 0 {
                    *target = if *target == 0 { 1 } else { 0 };
                }
            } else {
                *target += delta;
            }

            wind_cnt2_start = self.edges[e].next_in_ael;
        }
    }

    /// Whether `edge` is currently a boundary of the solution.
    pub fn is_contributing(&self, edge: usize, rules: &ClipRules) -> bool {
        let e = &self.edges[edge];
        let fill_type = rules.fill_type(e.poly_typ);
        let fill_type2 = rules.alt_fill_type(e.poly_typ);

        let own_filled = match fill_type {
            PolyFillType::EvenOdd => e.wind_delta != 0 || e.wind_cnt == 1,
            PolyFillType::NonZero => e.wind_cnt.abs() == 1,
            PolyFillType::Positive => e.wind_cnt == 1,
            PolyFillType::Negative => e.wind_cnt == -1,
        };

        if !own_filled {
            return false;
        }

        let inside_other = || match fill_type2 {
            PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 != 0,
            PolyFillType::Positive => e.wind_cnt2 > 0,
            PolyFillType::Negative => e.wind_cnt2 < 0,
        };

        let outside_other = || match fill_type2 {
            PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 == 0,
            PolyFillType::Positive => e.wind_cnt2 <= 0,
            PolyFillType::Negative => e.wind_cnt2 >= 0,
        };

        match rules.clip_type {
            ClipType::Intersection => inside_other(),
            ClipType::Union => outside_other(),
            ClipType::Difference => match e.poly_typ {
                PolyType::Subject => outside_other(),
                PolyType::Clip => inside_other(),
            },
            ClipType::Xor => e.wind_delta != 0 || outside_other(),
        }
    }

    pub fn maxima_pair(&self, edge: usize) -> Option<usize> {
        let e = &self.edges[edge];

        if self.edges[e.next].top == e.top && self.edges[e.next].next_in_lml.is_none() {
            Some(e.next)
        } else if self.edges[e.prev].top == e.top && self.edges[e.prev].next_in_lml.is_none() {
            Some(e.prev)
        } else {
            None
        }
    }

    /// Maxima pair that is still usable: not a skip edge and still active (or horizontal).
    pub fn maxima_pair_ex(&self, edge: usize) -> Option<usize> {
        let result = self.maxima_pair(edge)?;
        let pair = &self.edges[result];

        if pair.is_skip || (pair.next_in_ael == pair.prev_in_ael && !pair.is_horizontal()) {
            None
        } else {
            Some(result)
        }
    }

    pub fn intersect_point(&self, e1: usize, e2: usize) -> Point {
        let edge1 = &self.edges[e1];
        let edge2 = &self.edges[e2];

        // equal dx despite unequal slopes is possible with huge coordinates
        if edge1.dx == edge2.dx || edge1.slopes_equal(edge2) {
            let y = edge1.curr.y;
            return Point::new(edge1.top_x(y), y);
        }

        let mut ip = Point::default();

        if edge1.delta.x == 0 {
            ip.x = edge1.bot.x;
            ip.y = if edge2.is_horizontal() {
                edge2.bot.y
            } else {
                let b2 = edge2.bot.y as f64 - edge2.bot.x as f64 / edge2.dx;
                round_to_i64(ip.x as f64 / edge2.dx + b2)
            };
        } else if edge2.delta.x == 0 {
            ip.x = edge2.bot.x;
            ip.y = if edge1.is_horizontal() {
                edge1.bot.y
            } else {
                let b1 = edge1.bot.y as f64 - edge1.bot.x as f64 / edge1.dx;
                round_to_i64(ip.x as f64 / edge1.dx + b1)
            };
        } else {
            let b1 = edge1.bot.x as f64 - edge1.bot.y as f64 * edge1.dx;
            let b2 = edge2.bot.x as f64 - edge2.bot.y as f64 * edge2.dx;
            let q = (b2 - b1) / (edge1.dx - edge2.dx);

            ip.y = round_to_i64(q);
            ip.x = if edge1.dx.abs() < edge2.dx.abs() {
                round_to_i64(edge1.dx * q + b1)
            } else {
                round_to_i64(edge2.dx * q + b2)
            };
        }

        if ip.y < edge1.top.y || ip.y < edge2.top.y {
            ip.y = edge1.top.y.max(edge2.top.y);
            ip.x = if edge1.dx.abs() < edge2.dx.abs() {
                edge1.top_x(ip.y)
            } else {
                edge2.top_x(ip.y)
            };
        }

        // never below the bottom of the current scanbeam
        if ip.y > edge1.curr.y {
            ip.y = edge1.curr.y;
            ip.x = if edge1.dx.abs() > edge2.dx.abs() {
                edge2.top_x(ip.y)
            } else {
                edge1.top_x(ip.y)
            };
        }

        ip
    }
}
