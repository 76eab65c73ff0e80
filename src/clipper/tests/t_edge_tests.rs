use crate::clipper::clipper_config::ClipperConfig;
use crate::clipper::constants::HORIZONTAL;
use crate::clipper::enums::{ClipType, Direction, PolyType};
use crate::clipper::error::ClipperError;
use crate::clipper::scanbeam::Scanbeam;
use crate::clipper::t_edge::{TEdge, TEdgeArena};
use crate::geometry::point::Point;

/// Pushes a standalone edge positioned at its bottom vertex.
fn push_edge(
    arena: &mut TEdgeArena,
    bot: (i64, i64),
    top: (i64, i64),
    poly_typ: PolyType,
    wind_delta: i32,
) -> usize {
    let index = arena.len();
    let mut edge = TEdge::new(index, Point::from(bot), index, index);

    edge.init_bounds(Point::from(top), poly_typ);
    edge.curr = edge.bot;
    edge.wind_delta = wind_delta;

    arena.push(edge)
}

fn ael_order(arena: &TEdgeArena) -> Vec<usize> {
    let mut result = Vec::new();
    let mut current = arena.active;

    while let Some(edge) = current {
        result.push(edge);
        current = arena[edge].next_in_ael;
    }

    result
}

fn sel_order(arena: &TEdgeArena) -> Vec<usize> {
    let mut result = Vec::new();
    let mut current = arena.sorted;

    while let Some(edge) = current {
        result.push(edge);
        current = arena[edge].next_in_sel;
    }

    result
}

/// Three vertical edges at x = 0, 5 and 10, inserted out of order.
fn vertical_ael() -> TEdgeArena {
    let mut arena = TEdgeArena::new();

    let middle = push_edge(&mut arena, (5, 10), (5, 0), PolyType::Clip, 1);
    let left = push_edge(&mut arena, (0, 10), (0, 0), PolyType::Subject, 1);
    let right = push_edge(&mut arena, (10, 10), (10, 0), PolyType::Subject, -1);

    arena.insert_edge_into_ael(middle, None);
    arena.insert_edge_into_ael(right, None);
    arena.insert_edge_into_ael(left, None);

    arena
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_bounds_orders_bottom_first() {
        let mut arena = TEdgeArena::new();
        let edge = push_edge(&mut arena, (10, 0), (0, 10), PolyType::Subject, 1);

        assert_eq!(arena[edge].bot, Point::new(0, 10));
        assert_eq!(arena[edge].top, Point::new(10, 0));
        assert_eq!(arena[edge].delta, Point::new(10, -10));
        assert_eq!(arena[edge].dx, -1.0);
    }

    #[test]
    fn test_top_x() {
        let mut arena = TEdgeArena::new();
        let edge = push_edge(&mut arena, (0, 10), (10, 0), PolyType::Subject, 1);

        assert_eq!(arena[edge].top_x(10), 0);
        assert_eq!(arena[edge].top_x(5), 5);
        assert_eq!(arena[edge].top_x(0), 10);
    }

    #[test]
    fn test_horizontal_edge() {
        let mut arena = TEdgeArena::new();
        let edge = push_edge(&mut arena, (0, 5), (10, 5), PolyType::Subject, 1);

        assert!(arena[edge].is_horizontal());
        assert_eq!(arena[edge].dx, HORIZONTAL);
        assert_eq!(arena[edge].horz_direction(), (Direction::Right, 0, 10));

        arena[edge].reverse_horizontal();
        assert_eq!(arena[edge].horz_direction(), (Direction::Left, 0, 10));
    }

    #[test]
    fn test_insert_edge_into_ael_sorts_by_x() {
        let arena = vertical_ael();

        assert_eq!(ael_order(&arena), vec![1, 0, 2]);
        assert_eq!(arena[1].prev_in_ael, None);
        assert_eq!(arena[2].next_in_ael, None);
    }

    #[test]
    fn test_insert_edge_into_ael_uses_top_on_shared_bottom() {
        let mut arena = TEdgeArena::new();
        let right = push_edge(&mut arena, (0, 10), (10, 0), PolyType::Subject, 1);
        let left = push_edge(&mut arena, (0, 10), (-10, 0), PolyType::Subject, -1);

        arena.insert_edge_into_ael(right, None);
        arena.insert_edge_into_ael(left, None);

        assert_eq!(ael_order(&arena), vec![left, right]);
    }

    #[test]
    fn test_swap_and_delete_in_ael() {
        let mut arena = vertical_ael();

        arena.swap_positions_in_ael(1, 0);
        assert_eq!(ael_order(&arena), vec![0, 1, 2]);
        assert_eq!(arena.active, Some(0));

        arena.delete_from_ael(1);
        assert_eq!(ael_order(&arena), vec![0, 2]);
        assert_eq!(arena[1].next_in_ael, None);

        // removing twice is a no-op
        arena.delete_from_ael(1);
        assert_eq!(ael_order(&arena), vec![0, 2]);
    }

    #[test]
    fn test_sel_operations() {
        let mut arena = vertical_ael();

        arena.copy_ael_to_sel();
        assert_eq!(sel_order(&arena), vec![1, 0, 2]);

        arena.swap_positions_in_sel(0, 2);
        assert_eq!(sel_order(&arena), vec![1, 2, 0]);

        assert_eq!(arena.pop_edge_from_sel(), Some(1));
        assert_eq!(sel_order(&arena), vec![2, 0]);

        arena.add_edge_to_sel(1);
        assert_eq!(sel_order(&arena), vec![1, 2, 0]);
        assert_eq!(ael_order(&arena), vec![1, 0, 2]);
    }

    #[test]
    fn test_set_winding_count_and_contribution() {
        let mut arena = vertical_ael();
        let union = ClipperConfig::default().rules(ClipType::Union);
        let intersection = ClipperConfig::default().rules(ClipType::Intersection);

        for edge in ael_order(&arena) {
            arena.set_winding_count(edge, &union);
        }

        assert_eq!((arena[1].wind_cnt, arena[1].wind_cnt2), (1, 0));
        assert_eq!((arena[0].wind_cnt, arena[0].wind_cnt2), (1, 1));
        assert_eq!((arena[2].wind_cnt, arena[2].wind_cnt2), (1, 1));

        assert!(arena.is_contributing(1, &union));
        assert!(!arena.is_contributing(0, &union));
        assert!(!arena.is_contributing(2, &union));

        assert!(!arena.is_contributing(1, &intersection));
        assert!(arena.is_contributing(0, &intersection));
        assert!(arena.is_contributing(2, &intersection));
    }

    #[test]
    fn test_maxima_pair() {
        let mut arena = TEdgeArena::new();
        let left = push_edge(&mut arena, (0, 10), (5, 0), PolyType::Subject, 1);
        let right = push_edge(&mut arena, (10, 10), (5, 0), PolyType::Subject, -1);

        arena[left].next = right;
        arena[left].prev = right;
        arena[right].next = left;
        arena[right].prev = left;

        assert_eq!(arena.maxima_pair(left), Some(right));
        assert_eq!(arena.maxima_pair(right), Some(left));

        // the pair is not in the AEL
        assert_eq!(arena.maxima_pair_ex(left), None);

        arena[right].next_in_lml = Some(left);
        assert_eq!(arena.maxima_pair(left), None);
    }

    #[test]
    fn test_intersect_point() {
        let mut arena = TEdgeArena::new();
        let e1 = push_edge(&mut arena, (0, 10), (10, 0), PolyType::Subject, 1);
        let e2 = push_edge(&mut arena, (10, 10), (0, 0), PolyType::Clip, 1);

        assert_eq!(arena.intersect_point(e1, e2), Point::new(5, 5));
    }

    #[test]
    fn test_intersect_point_with_vertical() {
        let mut arena = TEdgeArena::new();
        let vertical = push_edge(&mut arena, (4, 10), (4, 0), PolyType::Subject, 1);
        let sloped = push_edge(&mut arena, (0, 10), (10, 0), PolyType::Clip, 1);

        assert_eq!(arena.intersect_point(vertical, sloped), Point::new(4, 6));
    }

    #[test]
    fn test_update_edge_into_ael() {
        let mut arena = TEdgeArena::new();
        let mut scanbeam = Scanbeam::new();
        let lower = push_edge(&mut arena, (0, 10), (0, 0), PolyType::Subject, 1);
        let upper = push_edge(&mut arena, (0, 0), (5, -10), PolyType::Subject, 1);

        arena.insert_edge_into_ael(lower, None);

        assert_eq!(
            arena.update_edge_into_ael(lower, &mut scanbeam),
            Err(ClipperError::InvalidBoundUpdate { edge: lower })
        );

        arena[lower].next_in_lml = Some(upper);
        arena[lower].wind_cnt = 3;

        assert_eq!(arena.update_edge_into_ael(lower, &mut scanbeam), Ok(upper));
        assert_eq!(arena.active, Some(upper));
        assert_eq!(arena[upper].wind_cnt, 3);
        assert_eq!(arena[upper].curr, Point::new(0, 0));
        assert_eq!(scanbeam.pop(), Some(-10));
    }
}
