use std::mem;

use tracing::{debug, trace, warn};

use crate::clipper::clipper_base::ClipperBase;
use crate::clipper::clipper_config::{ClipRules, ClipperConfig};
use crate::clipper::enums::{ClipType, Direction, PolyFillType, PolyType};
use crate::clipper::error::ClipperError;
use crate::clipper::intersect_node::IntersectNode;
use crate::clipper::join::{horz_segments_overlap, GhostJoin, Join};
use crate::clipper::local_minima::LocalMinimaList;
use crate::clipper::out_rec::OutRecList;
use crate::clipper::scanbeam::Scanbeam;
use crate::clipper::t_edge::TEdgeArena;
use crate::geometry::point::Point;
use crate::geometry::polygon::PolygonPath;
use crate::geometry::polygon_tree::{PolygonNode, PolygonTree};

/// Output shape a clip can be written into.
pub trait ClipSolution {
    fn clear_solution(&mut self);

    /// Fills the solution from the finished output records.
    fn build(&mut self, out_recs: &mut OutRecList);
}

impl ClipSolution for PolygonTree {
    fn clear_solution(&mut self) {
        self.clear();
    }

    fn build(&mut self, out_recs: &mut OutRecList) {
        self.clear();

        let count = out_recs.len();
        let mut nodes: Vec<Option<PolygonNode>> = vec![None; count];

        for rec in 0..count {
            let point_count = out_recs.point_count(rec);
            let is_open = out_recs[rec].is_open;

            if (is_open && point_count < 2) || (!is_open && point_count < 3) {
                continue;
            }

            out_recs.fix_hole_linkage(rec);
            nodes[rec] = out_recs.export(rec).map(PolygonNode::new);
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut roots: Vec<usize> = Vec::new();

        for rec in 0..count {
            if nodes[rec].is_none() {
                continue;
            }

            let parent = if out_recs[rec].is_open {
                None
            } else {
                out_recs[rec]
                    .first_left
                    .filter(|&owner| nodes[owner].is_some() && !out_recs[owner].is_open)
            };

            match parent {
                Some(owner) => children[owner].push(rec),
                None => roots.push(rec),
            }
        }

        fn assemble(rec: usize, nodes: &mut [Option<PolygonNode>], children: &[Vec<usize>]) -> Option<PolygonNode> {
            let mut node = nodes[rec].take()?;

            for &child in children[rec].iter() {
                if let Some(child) = assemble(child, nodes, children) {
                    node.add_child(child);
                }
            }

            Some(node)
        }

        for root in roots {
            if let Some(node) = assemble(root, &mut nodes, &children) {
                self.add_child(node);
            }
        }
    }
}

impl ClipSolution for PolygonPath {
    fn clear_solution(&mut self) {
        self.clear();
    }

    fn build(&mut self, out_recs: &mut OutRecList) {
        let mut tree = PolygonTree::new();
        tree.build(out_recs);
        *self = PolygonPath::from_tree(&tree);
    }
}

/// Vatti clipper. Holds configuration only, so one instance may serve
/// concurrent calls from several threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clipper {
    config: ClipperConfig,
}

impl Clipper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClipperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    /// Runs `clip_type` over `subject` and `clip`, writing into `solution`.
    ///
    /// Returns `false` when neither operand yields any edge, or when the clip
    /// fails; the solution is left empty then.
    pub fn execute<S: ClipSolution>(
        &self,
        clip_type: ClipType,
        subject: &PolygonPath,
        clip: &PolygonPath,
        solution: &mut S,
    ) -> bool {
        solution.clear_solution();

        match self.run(clip_type, subject, clip) {
            Ok(Some(mut out_recs)) => {
                solution.build(&mut out_recs);
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(%error, ?clip_type, "clip failed");
                solution.clear_solution();
                false
            }
        }
    }

    /// Like [`Clipper::execute`], but empty input is a success and failures
    /// carry their cause.
    pub fn try_execute<S: ClipSolution>(
        &self,
        clip_type: ClipType,
        subject: &PolygonPath,
        clip: &PolygonPath,
        solution: &mut S,
    ) -> Result<(), ClipperError> {
        solution.clear_solution();

        if let Some(mut out_recs) = self.run(clip_type, subject, clip)? {
            solution.build(&mut out_recs);
        }

        Ok(())
    }

    fn run(
        &self,
        clip_type: ClipType,
        subject: &PolygonPath,
        clip: &PolygonPath,
    ) -> Result<Option<OutRecList>, ClipperError> {
        debug!(
            ?clip_type,
            subject = subject.len(),
            clip = clip.len(),
            "execute"
        );

        let mut base = ClipperBase::new(self.config.preserve_collinear);
        let has_subject = base.add_paths(subject, PolyType::Subject)?;
        let has_clip = base.add_paths(clip, PolyType::Clip)?;

        if !has_subject && !has_clip {
            debug!("no edges to sweep");
            return Ok(None);
        }

        let mut state = ClipperState::new(base, self.config.rules(clip_type), self.config);
        state.execute_internal()?;

        debug!(out_recs = state.out_recs.len(), "execute finished");

        Ok(Some(state.out_recs))
    }
}

/// Everything one sweep mutates. Built per call and dropped afterwards.
struct ClipperState {
    edges: TEdgeArena,
    minima: LocalMinimaList,
    scanbeam: Scanbeam,
    maxima: Vec<i64>,
    intersections: Vec<IntersectNode>,
    out_recs: OutRecList,
    joins: Vec<Join>,
    ghost_joins: Vec<GhostJoin>,
    rules: ClipRules,
    config: ClipperConfig,
}

impl ClipperState {
    fn new(mut base: ClipperBase, rules: ClipRules, config: ClipperConfig) -> Self {
        let mut scanbeam = Scanbeam::new();
        base.reset(&mut scanbeam);

        Self {
            edges: base.edges,
            minima: base.minima,
            scanbeam,
            maxima: Vec::new(),
            intersections: Vec::new(),
            out_recs: OutRecList::new(),
            joins: Vec::new(),
            ghost_joins: Vec::new(),
            rules,
            config,
        }
    }

    fn execute_internal(&mut self) -> Result<(), ClipperError> {
        let Some(bot_y) = self.scanbeam.pop() else {
            return Ok(());
        };

        self.insert_local_minima_into_ael(bot_y);

        while let Some(top_y) = self.scanbeam.pop() {
            trace!(top_y, active = self.edges.active.is_some(), "scanbeam");

            self.process_horizontals()?;
            self.ghost_joins.clear();
            self.process_intersections(top_y)?;
            self.process_edges_at_top_of_scanbeam(top_y)?;
            self.insert_local_minima_into_ael(top_y);
        }

        let reverse_solution = self.config.reverse_solution;
        self.out_recs.fix_orientations(reverse_solution);

        if !self.joins.is_empty() {
            let mut joins = mem::take(&mut self.joins);
            self.out_recs.join_common_edges(&mut joins, reverse_solution);
        }

        let preserve_collinear = self.config.preserve_collinear || self.config.strictly_simple;

        for rec in 0..self.out_recs.len() {
            if self.out_recs[rec].pts.is_none() {
                continue;
            }

            if self.out_recs[rec].is_open {
                self.out_recs.fixup_out_polyline(rec);
            } else {
                self.out_recs.fixup_out_polygon(rec, preserve_collinear);
            }
        }

        if self.config.strictly_simple {
            self.out_recs.do_simple_polygons();
        }

        Ok(())
    }

    fn add_join(&mut self, out_pt1: usize, out_pt2: usize, off_pt: Point) {
        self.joins.push(Join::new(out_pt1, out_pt2, off_pt));
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) {
        while let Some(minima) = self.minima.pop(bot_y) {
            let lb = minima.left_bound;
            let rb = minima.right_bound;
            let mut op1: Option<usize> = None;

            match (lb, rb) {
                (None, Some(rb)) => {
                    self.edges.insert_edge_into_ael(rb, None);
                    self.edges.set_winding_count(rb, &self.rules);
                    if self.edges.is_contributing(rb, &self.rules) {
                        op1 = Some(self.add_out_pt(rb, self.edges[rb].bot));
                    }
                }
                (Some(lb), None) => {
                    self.edges.insert_edge_into_ael(lb, None);
                    self.edges.set_winding_count(lb, &self.rules);
                    if self.edges.is_contributing(lb, &self.rules) {
                        op1 = Some(self.add_out_pt(lb, self.edges[lb].bot));
                    }
                    self.scanbeam.insert(self.edges[lb].top.y);
                }
                (Some(lb), Some(rb)) => {
                    self.edges.insert_edge_into_ael(lb, None);
                    self.edges.insert_edge_into_ael(rb, Some(lb));
                    self.edges.set_winding_count(lb, &self.rules);
                    self.edges[rb].wind_cnt = self.edges[lb].wind_cnt;
                    self.edges[rb].wind_cnt2 = self.edges[lb].wind_cnt2;
                    if self.edges.is_contributing(lb, &self.rules) {
                        op1 = Some(self.add_local_min_poly(lb, rb, self.edges[lb].bot));
                    }
                    self.scanbeam.insert(self.edges[lb].top.y);
                }
                (None, None) => continue,
            }

            if let Some(rb) = rb {
                if self.edges[rb].is_horizontal() {
                    self.edges.add_edge_to_sel(rb);
                    if let Some(next) = self.edges[rb].next_in_lml {
                        self.scanbeam.insert(self.edges[next].top.y);
                    }
                } else {
                    self.scanbeam.insert(self.edges[rb].top.y);
                }
            }

            let (Some(lb), Some(rb)) = (lb, rb) else {
                continue;
            };

            // output sharing an edge with a ghost horizontal is joined later
            if let Some(op1) = op1 {
                if self.edges[rb].is_horizontal() && self.edges[rb].wind_delta != 0 {
                    let (rb_bot, rb_top) = (self.edges[rb].bot.x, self.edges[rb].top.x);
                    let ghosts: Vec<GhostJoin> = self
                        .ghost_joins
                        .iter()
                        .filter(|ghost| {
                            let ghost_x = self.out_recs.points.point(ghost.out_pt).x;
                            horz_segments_overlap(ghost_x, ghost.off_pt.x, rb_bot, rb_top)
                        })
                        .copied()
                        .collect();

                    for ghost in ghosts {
                        self.add_join(ghost.out_pt, op1, ghost.off_pt);
                    }
                }
            }

            if let (Some(op1), Some(prev)) = (op1, self.edges[lb].prev_in_ael) {
                let lb_edge = &self.edges[lb];
                let prev_edge = &self.edges[prev];

                if lb_edge.out_idx.is_some()
                    && prev_edge.curr.x == lb_edge.bot.x
                    && prev_edge.out_idx.is_some()
                    && Point::slopes_equal4(&prev_edge.bot, &prev_edge.top, &lb_edge.curr, &lb_edge.top)
                    && lb_edge.wind_delta != 0
                    && prev_edge.wind_delta != 0
                {
                    let lb_bot = lb_edge.bot;
                    let lb_top = lb_edge.top;
                    let op2 = self.add_out_pt(prev, lb_bot);
                    self.add_join(op1, op2, lb_top);
                }
            }

            if self.edges[lb].next_in_ael == Some(rb) {
                continue;
            }

            if let (Some(op1), Some(prev)) = (op1, self.edges[rb].prev_in_ael) {
                let rb_edge = &self.edges[rb];
                let prev_edge = &self.edges[prev];

                if rb_edge.out_idx.is_some()
                    && prev_edge.out_idx.is_some()
                    && Point::slopes_equal4(&prev_edge.curr, &prev_edge.top, &rb_edge.curr, &rb_edge.top)
                    && rb_edge.wind_delta != 0
                    && prev_edge.wind_delta != 0
                {
                    let rb_bot = rb_edge.bot;
                    let rb_top = rb_edge.top;
                    let op2 = self.add_out_pt(prev, rb_bot);
                    self.add_join(op1, op2, rb_top);
                }
            }

            // rb must end up right of everything between the two bounds
            let pt = self.edges[lb].curr;
            let mut e = self.edges[lb].next_in_ael;

            while let Some(current) = e {
                if current == rb {
                    break;
                }
                self.intersect_edges(rb, current, pt);
                e = self.edges[current].next_in_ael;
            }
        }
    }

    fn add_out_pt(&mut self, e: usize, pt: Point) -> usize {
        match self.edges[e].out_idx {
            None => {
                let is_open = self.edges[e].wind_delta == 0;
                let (rec, op) = self.out_recs.create_with_point(pt, is_open);

                if is_open {
                    self.out_recs[rec].join_type = self.edges[e].join_type;
                    self.out_recs[rec].end_type = self.edges[e].end_type;
                } else {
                    self.set_hole_state(e, rec);
                }

                self.edges[e].out_idx = Some(rec);

                op
            }
            Some(rec) => {
                let to_front = self.edges[e].side == Direction::Left;
                self.out_recs.add_point(rec, pt, to_front)
            }
        }
    }

    fn get_last_out_pt(&self, e: usize) -> Option<usize> {
        let rec = self.edges[e].out_idx?;
        self.out_recs.last_point(rec, self.edges[e].side)
    }

    /// Hole state follows from the number of distinct output records to the left.
    fn set_hole_state(&mut self, e: usize, rec: usize) {
        let mut current = self.edges[e].prev_in_ael;
        let mut owner_edge: Option<usize> = None;

        while let Some(e2) = current {
            let edge = &self.edges[e2];

            if edge.out_idx.is_some() && edge.wind_delta != 0 {
                owner_edge = match owner_edge {
                    None => Some(e2),
                    Some(owner) if self.edges[owner].out_idx == edge.out_idx => None,
                    other => other,
                };
            }

            current = edge.prev_in_ael;
        }

        match owner_edge.and_then(|owner| self.edges[owner].out_idx) {
            None => {
                self.out_recs[rec].first_left = None;
                self.out_recs[rec].is_hole = false;
            }
            Some(owner) => {
                self.out_recs[rec].first_left = Some(owner);
                self.out_recs[rec].is_hole = !self.out_recs[owner].is_hole;
            }
        }
    }

    fn add_local_min_poly(&mut self, e1: usize, e2: usize, pt: Point) -> usize {
        let (result, e, prev_e) = if self.edges[e2].is_horizontal() || self.edges[e1].dx > self.edges[e2].dx {
            let result = self.add_out_pt(e1, pt);
            self.edges[e2].out_idx = self.edges[e1].out_idx;
            self.edges[e1].side = Direction::Left;
            self.edges[e2].side = Direction::Right;

            let prev_e = if self.edges[e1].prev_in_ael == Some(e2) {
                self.edges[e2].prev_in_ael
            } else {
                self.edges[e1].prev_in_ael
            };

            (result, e1, prev_e)
        } else {
            let result = self.add_out_pt(e2, pt);
            self.edges[e1].out_idx = self.edges[e2].out_idx;
            self.edges[e1].side = Direction::Right;
            self.edges[e2].side = Direction::Left;

            let prev_e = if self.edges[e2].prev_in_ael == Some(e1) {
                self.edges[e1].prev_in_ael
            } else {
                self.edges[e2].prev_in_ael
            };

            (result, e2, prev_e)
        };

        if let Some(prev_e) = prev_e {
            let prev_edge = &self.edges[prev_e];
            let edge = &self.edges[e];

            if prev_edge.out_idx.is_some() && prev_edge.top.y < pt.y && edge.top.y < pt.y {
                let x_prev = prev_edge.top_x(pt.y);
                let x_e = edge.top_x(pt.y);

                if x_prev == x_e
                    && edge.wind_delta != 0
                    && prev_edge.wind_delta != 0
                    && Point::slopes_equal4(
                        &Point::new(x_prev, pt.y),
                        &prev_edge.top,
                        &Point::new(x_e, pt.y),
                        &edge.top,
                    )
                {
                    let top = edge.top;
                    let out_pt = self.add_out_pt(prev_e, pt);
                    self.add_join(result, out_pt, top);
                }
            }
        }

        result
    }

    fn add_local_max_poly(&mut self, e1: usize, e2: usize, pt: Point) {
        self.add_out_pt(e1, pt);

        if self.edges[e2].wind_delta == 0 {
            self.add_out_pt(e2, pt);
        }

        match (self.edges[e1].out_idx, self.edges[e2].out_idx) {
            (idx1, idx2) if idx1 == idx2 => {
                self.edges[e1].out_idx = None;
                self.edges[e2].out_idx = None;
            }
            (Some(idx1), Some(idx2)) if idx1 < idx2 => self.append_polygon(e1, e2),
            _ => self.append_polygon(e2, e1),
        }
    }

    fn append_polygon(&mut self, e1: usize, e2: usize) {
        let (Some(ok_idx), Some(obsolete_idx)) = (self.edges[e1].out_idx, self.edges[e2].out_idx) else {
            return;
        };
        let side1 = self.edges[e1].side;

        self.out_recs.append(ok_idx, obsolete_idx, side1, self.edges[e2].side);

        self.edges[e1].out_idx = None;
        self.edges[e2].out_idx = None;

        let mut current = self.edges.active;

        while let Some(e) = current {
            if self.edges[e].out_idx == Some(obsolete_idx) {
                self.edges[e].out_idx = Some(ok_idx);
                self.edges[e].side = side1;
                break;
            }
            current = self.edges[e].next_in_ael;
        }
    }

    fn wind_count_for(fill_type: PolyFillType, count: i32) -> i32 {
        match fill_type {
            PolyFillType::Positive => count,
            PolyFillType::Negative => -count,
            _ => count.abs(),
        }
    }

    /// Resolves the crossing of `e1` and `e2` at `pt`. `e1` must be the edge
    /// right of `e2` above the crossing.
    fn intersect_edges(&mut self, e1: usize, e2: usize, pt: Point) {
        let e1_contributing = self.edges[e1].out_idx.is_some();
        let e2_contributing = self.edges[e2].out_idx.is_some();
        let rules = self.rules;

        if self.edges[e1].wind_delta == 0 || self.edges[e2].wind_delta == 0 {
            self.intersect_open_edges(e1, e2, pt, e1_contributing, e2_contributing);
            return;
        }

        let poly_typ1 = self.edges[e1].poly_typ;
        let poly_typ2 = self.edges[e2].poly_typ;

        if poly_typ1 == poly_typ2 {
            if rules.is_even_odd(poly_typ1) {
                let old = self.edges[e1].wind_cnt;
                self.edges[e1].wind_cnt = self.edges[e2].wind_cnt;
                self.edges[e2].wind_cnt = old;
            } else {
                let delta1 = self.edges[e1].wind_delta;
                let delta2 = self.edges[e2].wind_delta;

                let edge1 = &mut self.edges[e1];
                if edge1.wind_cnt + delta2 == 0 {
                    edge1.wind_cnt = -edge1.wind_cnt;
                } else {
                    edge1.wind_cnt += delta2;
                }

                let edge2 = &mut self.edges[e2];
                if edge2.wind_cnt - delta1 == 0 {
                    edge2.wind_cnt = -edge2.wind_cnt;
                } else {
                    edge2.wind_cnt -= delta1;
                }
            }
        } else {
            let delta1 = self.edges[e1].wind_delta;
            let delta2 = self.edges[e2].wind_delta;

            let edge1 = &mut self.edges[e1];
            if !rules.is_even_odd(poly_typ2) {
                edge1.wind_cnt2 += delta2;
            } else {
                edge1.wind_cnt2 = if edge1.wind_cnt2 == 0 { 1 } else { 0 };
            }

            let edge2 = &mut self.edges[e2];
            if !rules.is_even_odd(poly_typ1) {
                edge2.wind_cnt2 -= delta1;
            } else {
                edge2.wind_cnt2 = if edge2.wind_cnt2 == 0 { 1 } else { 0 };
            }
        }

        let e1_wc = Self::wind_count_for(rules.fill_type(poly_typ1), self.edges[e1].wind_cnt);
        let e2_wc = Self::wind_count_for(rules.fill_type(poly_typ2), self.edges[e2].wind_cnt);
        let unit = |wc: i32| wc == 0 || wc == 1;

        if e1_contributing && e2_contributing {
            if !unit(e1_wc) || !unit(e2_wc) || (poly_typ1 != poly_typ2 && rules.clip_type != ClipType::Xor) {
                self.add_local_max_poly(e1, e2, pt);
            } else {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_sides_and_indexes(e1, e2);
            }
        } else if e1_contributing {
            if unit(e2_wc) {
                self.add_out_pt(e1, pt);
                self.swap_sides_and_indexes(e1, e2);
            }
        } else if e2_contributing {
            if unit(e1_wc) {
                self.add_out_pt(e2, pt);
                self.swap_sides_and_indexes(e1, e2);
            }
        } else if unit(e1_wc) && unit(e2_wc) {
            // neither edge is contributing yet
            let e1_wc2 = Self::wind_count_for(rules.alt_fill_type(poly_typ1), self.edges[e1].wind_cnt2);
            let e2_wc2 = Self::wind_count_for(rules.alt_fill_type(poly_typ2), self.edges[e2].wind_cnt2);

            if poly_typ1 != poly_typ2 {
                self.add_local_min_poly(e1, e2, pt);
            } else if e1_wc == 1 && e2_wc == 1 {
                let starts = match rules.clip_type {
                    ClipType::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                    ClipType::Union => e1_wc2 <= 0 && e2_wc2 <= 0,
                    ClipType::Difference => match poly_typ1 {
                        PolyType::Clip => e1_wc2 > 0 && e2_wc2 > 0,
                        PolyType::Subject => e1_wc2 <= 0 && e2_wc2 <= 0,
                    },
                    ClipType::Xor => true,
                };

                if starts {
                    self.add_local_min_poly(e1, e2, pt);
                }
            } else {
                self.swap_sides(e1, e2);
            }
        }
    }

    /// Crossings involving a polyline only toggle the polyline's output.
    fn intersect_open_edges(&mut self, e1: usize, e2: usize, pt: Point, e1_contributing: bool, e2_contributing: bool) {
        let edge1 = &self.edges[e1];
        let edge2 = &self.edges[e2];

        if edge1.wind_delta == 0 && edge2.wind_delta == 0 {
            return;
        }

        if edge1.poly_typ == edge2.poly_typ
            && edge1.wind_delta != edge2.wind_delta
            && self.rules.clip_type == ClipType::Union
        {
            if edge1.wind_delta == 0 {
                if e2_contributing {
                    self.add_out_pt(e1, pt);
                    if e1_contributing {
                        self.edges[e1].out_idx = None;
                    }
                }
            } else if e1_contributing {
                self.add_out_pt(e2, pt);
                if e2_contributing {
                    self.edges[e2].out_idx = None;
                }
            }
        } else if edge1.poly_typ != edge2.poly_typ {
            let is_union = self.rules.clip_type == ClipType::Union;

            if edge1.wind_delta == 0 && edge2.wind_cnt.abs() == 1 && (!is_union || edge2.wind_cnt2 == 0) {
                self.add_out_pt(e1, pt);
                if e1_contributing {
                    self.edges[e1].out_idx = None;
                }
            } else if edge2.wind_delta == 0
                && edge1.wind_cnt.abs() == 1
                && (!is_union || edge1.wind_cnt2 == 0)
            {
                self.add_out_pt(e2, pt);
                if e2_contributing {
                    self.edges[e2].out_idx = None;
                }
            }
        }
    }

    fn swap_sides(&mut self, e1: usize, e2: usize) {
        let side = self.edges[e1].side;
        self.edges[e1].side = self.edges[e2].side;
        self.edges[e2].side = side;
    }

    fn swap_sides_and_indexes(&mut self, e1: usize, e2: usize) {
        self.swap_sides(e1, e2);
        let out_idx = self.edges[e1].out_idx;
        self.edges[e1].out_idx = self.edges[e2].out_idx;
        self.edges[e2].out_idx = out_idx;
    }

    fn process_horizontals(&mut self) -> Result<(), ClipperError> {
        while let Some(horz) = self.edges.pop_edge_from_sel() {
            self.process_horizontal(horz)?;
        }

        Ok(())
    }

    /// Joins every other pending horizontal overlapping `horz` to `op1`.
    fn add_horizontal_joins(&mut self, horz: usize, op1: usize) {
        let (horz_bot, horz_top) = (self.edges[horz].bot.x, self.edges[horz].top.x);
        let mut next_horz = self.edges.sorted;

        while let Some(e) = next_horz {
            if self.edges[e].out_idx.is_some()
                && horz_segments_overlap(horz_bot, horz_top, self.edges[e].bot.x, self.edges[e].top.x)
            {
                if let Some(op2) = self.get_last_out_pt(e) {
                    self.add_join(op2, op1, self.edges[e].top);
                }
            }
            next_horz = self.edges[e].next_in_sel;
        }
    }

    fn process_horizontal(&mut self, mut horz: usize) -> Result<(), ClipperError> {
        let is_open = self.edges[horz].wind_delta == 0;
        let (mut dir, mut horz_left, mut horz_right) = self.edges[horz].horz_direction();

        let mut last_horz = horz;
        while let Some(next) = self.edges[last_horz].next_in_lml {
            if !self.edges[next].is_horizontal() {
                break;
            }
            last_horz = next;
        }

        let max_pair = if self.edges[last_horz].next_in_lml.is_none() {
            self.edges.maxima_pair(last_horz)
        } else {
            None
        };

        // cursors into the sorted maxima, one per direction
        let maxima_len = self.maxima.len();
        let mut max_forward = maxima_len;
        let mut max_backward = maxima_len;

        if maxima_len > 0 {
            let bot_x = self.edges[horz].bot.x;
            let last_top_x = self.edges[last_horz].top.x;

            if dir == Direction::Right {
                max_forward = self.maxima.iter().position(|&x| x > bot_x).unwrap_or(maxima_len);
                if max_forward < maxima_len && self.maxima[max_forward] >= last_top_x {
                    max_forward = maxima_len;
                }
            } else {
                max_backward = self.maxima.iter().rev().position(|&x| x <= bot_x).unwrap_or(maxima_len);
                if max_backward < maxima_len && self.maxima[maxima_len - 1 - max_backward] <= last_top_x {
                    max_backward = maxima_len;
                }
            }
        }

        let mut op1: Option<usize> = None;

        loop {
            let is_last_horz = horz == last_horz;
            let mut e = self.edges.next_in_ael(horz, dir);

            while let Some(current) = e {
                let curr_x = self.edges[current].curr.x;
                let horz_y = self.edges[horz].bot.y;
                let horz_outputs = self.edges[horz].out_idx.is_some() && !is_open;

                // vertices where maxima touch the horizontal
                if dir == Direction::Right {
                    while max_forward < maxima_len && self.maxima[max_forward] < curr_x {
                        if horz_outputs {
                            self.add_out_pt(horz, Point::new(self.maxima[max_forward], horz_y));
                        }
                        max_forward += 1;
                    }
                } else {
                    while max_backward < maxima_len && self.maxima[maxima_len - 1 - max_backward] > curr_x {
                        if horz_outputs {
                            let x = self.maxima[maxima_len - 1 - max_backward];
                            self.add_out_pt(horz, Point::new(x, horz_y));
                        }
                        max_backward += 1;
                    }
                }

                if (dir == Direction::Right && curr_x > horz_right) || (dir == Direction::Left && curr_x < horz_left) {
                    break;
                }

                // end of an intermediate horizontal: smaller dx lies right above it
                if let Some(next) = self.edges[horz].next_in_lml {
                    if curr_x == self.edges[horz].top.x && self.edges[current].dx < self.edges[next].dx {
                        break;
                    }
                }

                if horz_outputs {
                    let op = self.add_out_pt(horz, self.edges[current].curr);
                    op1 = Some(op);
                    self.add_horizontal_joins(horz, op);
                    self.ghost_joins.push(GhostJoin {
                        out_pt: op,
                        off_pt: self.edges[horz].bot,
                    });
                }

                if Some(current) == max_pair && is_last_horz {
                    if self.edges[horz].out_idx.is_some() {
                        self.add_local_max_poly(horz, current, self.edges[horz].top);
                    }
                    self.edges.delete_from_ael(horz);
                    self.edges.delete_from_ael(current);
                    return Ok(());
                }

                let pt = Point::new(curr_x, self.edges[horz].curr.y);

                if dir == Direction::Right {
                    self.intersect_edges(horz, current, pt);
                } else {
                    self.intersect_edges(current, horz, pt);
                }

                let next = self.edges.next_in_ael(current, dir);
                self.edges.swap_positions_in_ael(horz, current);
                e = next;
            }

            match self.edges[horz].next_in_lml {
                Some(next) if self.edges[next].is_horizontal() => {}
                _ => break,
            }

            horz = self.edges.update_edge_into_ael(horz, &mut self.scanbeam)?;

            if self.edges[horz].out_idx.is_some() {
                self.add_out_pt(horz, self.edges[horz].bot);
            }

            (dir, horz_left, horz_right) = self.edges[horz].horz_direction();
        }

        if self.edges[horz].out_idx.is_some() && op1.is_none() {
            if let Some(op) = self.get_last_out_pt(horz) {
                self.add_horizontal_joins(horz, op);
                self.ghost_joins.push(GhostJoin {
                    out_pt: op,
                    off_pt: self.edges[horz].top,
                });
            }
        }

        if self.edges[horz].next_in_lml.is_none() {
            if self.edges[horz].out_idx.is_some() {
                self.add_out_pt(horz, self.edges[horz].top);
            }
            self.edges.delete_from_ael(horz);
            return Ok(());
        }

        if self.edges[horz].out_idx.is_none() {
            self.edges.update_edge_into_ael(horz, &mut self.scanbeam)?;
            return Ok(());
        }

        let op1 = self.add_out_pt(horz, self.edges[horz].top);
        let horz = self.edges.update_edge_into_ael(horz, &mut self.scanbeam)?;

        // horz is no longer horizontal here
        self.join_collinear_neighbour(horz, op1, true);

        Ok(())
    }

    fn process_intersections(&mut self, top_y: i64) -> Result<(), ClipperError> {
        if self.edges.active.is_none() {
            return Ok(());
        }

        self.build_intersect_list(top_y);

        let result = match self.intersections.len() {
            0 => Ok(()),
            1 => {
                self.process_intersect_list();
                Ok(())
            }
            _ => {
                if self.fixup_intersection_order() {
                    self.process_intersect_list();
                    Ok(())
                } else {
                    Err(ClipperError::IntersectionOrder { y: top_y })
                }
            }
        };

        self.edges.sorted = None;
        self.intersections.clear();

        result
    }

    fn build_intersect_list(&mut self, top_y: i64) {
        let mut current = self.edges.active;
        self.edges.sorted = current;

        while let Some(e) = current {
            let edge = &mut self.edges[e];
            edge.prev_in_sel = edge.prev_in_ael;
            edge.next_in_sel = edge.next_in_ael;
            edge.curr.x = edge.top_x(top_y);
            current = edge.next_in_ael;
        }

        // bubble sort the copy, recording every swap as a crossing
        loop {
            let mut is_modified = false;
            let Some(mut e) = self.edges.sorted else {
                break;
            };

            while let Some(next) = self.edges[e].next_in_sel {
                if self.edges[e].curr.x > self.edges[next].curr.x {
                    let mut pt = self.edges.intersect_point(e, next);

                    if pt.y < top_y {
                        pt = Point::new(self.edges[e].top_x(top_y), top_y);
                    }

                    self.intersections.push(IntersectNode::new(e, next, pt));
                    self.edges.swap_positions_in_sel(e, next);
                    is_modified = true;
                } else {
                    e = next;
                }
            }

            // the last edge has settled, so drop it from further passes
            match self.edges[e].prev_in_sel {
                Some(prev) => self.edges[prev].next_in_sel = None,
                None => break,
            }

            if !is_modified {
                break;
            }
        }

        self.edges.sorted = None;
    }

    /// Reorders crossings so that each one swaps edges adjacent at that moment.
    fn fixup_intersection_order(&mut self) -> bool {
        self.edges.copy_ael_to_sel();
        self.intersections.sort_by(IntersectNode::sort);

        let count = self.intersections.len();

        for i in 0..count {
            if !self.intersections[i].edges_adjacent(&self.edges) {
                let Some(j) = (i + 1..count).find(|&j| self.intersections[j].edges_adjacent(&self.edges)) else {
                    return false;
                };
                self.intersections.swap(i, j);
            }

            let node = self.intersections[i];
            self.edges.swap_positions_in_sel(node.edge1, node.edge2);
        }

        true
    }

    fn process_intersect_list(&mut self) {
        let intersections = mem::take(&mut self.intersections);

        for node in intersections.iter() {
            self.intersect_edges(node.edge1, node.edge2, node.pt);
            self.edges.swap_positions_in_ael(node.edge1, node.edge2);
        }
    }

    fn do_maxima(&mut self, e: usize) -> Result<(), ClipperError> {
        let Some(max_pair) = self.edges.maxima_pair_ex(e) else {
            if self.edges[e].out_idx.is_some() {
                self.add_out_pt(e, self.edges[e].top);
            }
            self.edges.delete_from_ael(e);
            return Ok(());
        };

        let top = self.edges[e].top;
        let mut next = self.edges[e].next_in_ael;

        while let Some(current) = next {
            if current == max_pair {
                break;
            }
            self.intersect_edges(e, current, top);
            self.edges.swap_positions_in_ael(e, current);
            next = self.edges[e].next_in_ael;
        }

        match (self.edges[e].out_idx, self.edges[max_pair].out_idx) {
            (None, None) => {
                self.edges.delete_from_ael(e);
                self.edges.delete_from_ael(max_pair);
            }
            (Some(_), Some(_)) => {
                self.add_local_max_poly(e, max_pair, top);
                self.edges.delete_from_ael(e);
                self.edges.delete_from_ael(max_pair);
            }
            _ if self.edges[e].wind_delta == 0 => {
                if self.edges[e].out_idx.is_some() {
                    self.add_out_pt(e, top);
                    self.edges[e].out_idx = None;
                }
                self.edges.delete_from_ael(e);

                if self.edges[max_pair].out_idx.is_some() {
                    self.add_out_pt(max_pair, top);
                    self.edges[max_pair].out_idx = None;
                }
                self.edges.delete_from_ael(max_pair);
            }
            _ => return Err(ClipperError::MaximaPair { edge: e }),
        }

        Ok(())
    }

    fn process_edges_at_top_of_scanbeam(&mut self, top_y: i64) -> Result<(), ClipperError> {
        let mut current = self.edges.active;

        while let Some(e) = current {
            // maxima are treated as bent horizontals, except those that end in a horizontal
            let is_maxima_edge = self.edges[e].is_maxima(top_y)
                && self
                    .edges
                    .maxima_pair_ex(e)
                    .map_or(true, |pair| !self.edges[pair].is_horizontal());

            if is_maxima_edge {
                if self.config.strictly_simple {
                    self.maxima.push(self.edges[e].top.x);
                }

                let prev = self.edges[e].prev_in_ael;
                self.do_maxima(e)?;

                current = match prev {
                    None => self.edges.active,
                    Some(prev) => self.edges[prev].next_in_ael,
                };

                continue;
            }

            let mut e = e;
            let promotes_horizontal = self.edges[e].is_intermediate(top_y)
                && self.edges[e]
                    .next_in_lml
                    .is_some_and(|next| self.edges[next].is_horizontal());

            if promotes_horizontal {
                e = self.edges.update_edge_into_ael(e, &mut self.scanbeam)?;
                if self.edges[e].out_idx.is_some() {
                    self.add_out_pt(e, self.edges[e].bot);
                }
                self.edges.add_edge_to_sel(e);
            } else {
                let x = self.edges[e].top_x(top_y);
                self.edges[e].curr = Point::new(x, top_y);
            }

            // touching edges both get a vertex here
            if self.config.strictly_simple {
                if let Some(prev) = self.edges[e].prev_in_ael {
                    let edge = &self.edges[e];
                    let prev_edge = &self.edges[prev];

                    if edge.out_idx.is_some()
                        && edge.wind_delta != 0
                        && prev_edge.out_idx.is_some()
                        && prev_edge.curr.x == edge.curr.x
                        && prev_edge.wind_delta != 0
                    {
                        let pt = edge.curr;
                        let op = self.add_out_pt(prev, pt);
                        let op2 = self.add_out_pt(e, pt);
                        self.add_join(op, op2, pt);
                    }
                }
            }

            current = self.edges[e].next_in_ael;
        }

        self.maxima.sort_unstable();
        self.process_horizontals()?;
        self.maxima.clear();

        // promote intermediate vertices
        let mut current = self.edges.active;

        while let Some(e) = current {
            let mut e = e;

            if self.edges[e].is_intermediate(top_y) {
                let op = if self.edges[e].out_idx.is_some() {
                    Some(self.add_out_pt(e, self.edges[e].top))
                } else {
                    None
                };

                e = self.edges.update_edge_into_ael(e, &mut self.scanbeam)?;

                if let Some(op) = op {
                    self.join_collinear_neighbour(e, op, false);
                }
            }

            current = self.edges[e].next_in_ael;
        }

        Ok(())
    }

    /// Output neighbour that starts at the bottom of `e` and runs along it.
    /// Slopes compare by edge deltas or by the current points.
    fn collinear_neighbour(&self, e: usize, compare_deltas: bool) -> Option<usize> {
        let edge = &self.edges[e];

        if edge.wind_delta == 0 {
            return None;
        }

        let shares_edge = |neighbour: &usize| {
            let other = &self.edges[*neighbour];

            other.curr == edge.bot
                && other.out_idx.is_some()
                && other.curr.y > other.top.y
                && other.wind_delta != 0
                && if compare_deltas {
                    edge.slopes_equal(other)
                } else {
                    Point::slopes_equal4(&edge.curr, &edge.top, &other.curr, &other.top)
                }
        };

        edge.prev_in_ael
            .filter(shares_edge)
            .or_else(|| edge.next_in_ael.filter(shares_edge))
    }

    /// Queues a join between `op` and the collinear output neighbour of `e`.
    fn join_collinear_neighbour(&mut self, e: usize, op: usize, compare_deltas: bool) {
        if let Some(neighbour) = self.collinear_neighbour(e, compare_deltas) {
            let (bot, top) = (self.edges[e].bot, self.edges[e].top);
            let op2 = self.add_out_pt(neighbour, bot);
            self.add_join(op, op2, top);
        }
    }
}
