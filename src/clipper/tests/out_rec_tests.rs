use crate::clipper::enums::Direction;
use crate::clipper::out_rec::OutRecList;
use crate::geometry::point::Point;

/// Adds a record whose ring visits `points` in order.
fn push_ring(list: &mut OutRecList, points: &[(i64, i64)]) -> usize {
    let (rec, _) = list.create_with_point(Point::from(points[0]), false);

    for &pt in points[1..].iter() {
        list.add_point(rec, Point::from(pt), false);
    }

    rec
}

const SQUARE: [(i64, i64); 4] = [(0, 0), (10, 0), (10, 10), (0, 10)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_point_both_ends() {
        let mut list = OutRecList::new();
        let (rec, first) = list.create_with_point(Point::new(0, 0), false);

        let back = list.add_point(rec, Point::new(10, 0), false);
        let front = list.add_point(rec, Point::new(0, 10), true);

        assert_eq!(list.point_count(rec), 3);
        assert_eq!(list.last_point(rec, Direction::Left), Some(front));
        assert_eq!(list.last_point(rec, Direction::Right), Some(back));
        assert_eq!(list.points.next(front), first);
    }

    #[test]
    fn test_add_point_skips_repeated_end() {
        let mut list = OutRecList::new();
        let rec = push_ring(&mut list, &SQUARE);
        let back = list.last_point(rec, Direction::Right);

        assert_eq!(list.add_point(rec, Point::new(0, 10), false), back.unwrap_or_default());
        assert_eq!(list.point_count(rec), 4);
    }

    #[test]
    fn test_area_and_fix_orientation() {
        let mut list = OutRecList::new();
        let rec = push_ring(&mut list, &SQUARE);

        // rings are read back along `prev`, so this one exports clockwise
        assert_eq!(list.area(rec), -100.0);

        list.fix_orientation(rec, false);
        assert_eq!(list.area(rec), 100.0);

        let polygon = list.export(rec).unwrap_or_default();
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon.area(), 100.0);

        list[rec].is_hole = true;
        list.fix_orientation(rec, false);
        assert_eq!(list.area(rec), -100.0);

        list.fix_orientation(rec, true);
        assert_eq!(list.area(rec), 100.0);
    }

    #[test]
    fn test_fixup_out_polygon_removes_collinear() {
        let mut list = OutRecList::new();
        let rec = push_ring(&mut list, &[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);

        list.fixup_out_polygon(rec, false);
        assert_eq!(list.point_count(rec), 4);

        let rec = push_ring(&mut list, &[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);

        list.fixup_out_polygon(rec, true);
        assert_eq!(list.point_count(rec), 5);
    }

    #[test]
    fn test_fixup_out_polygon_discards_degenerate() {
        let mut list = OutRecList::new();
        let rec = push_ring(&mut list, &[(0, 0), (5, 0), (10, 0)]);

        list.fixup_out_polygon(rec, false);

        assert_eq!(list[rec].pts, None);
        assert_eq!(list.export(rec), None);
    }

    #[test]
    fn test_fixup_out_polyline_drops_duplicates() {
        let mut list = OutRecList::new();
        let (rec, head) = list.create_with_point(Point::new(0, 0), true);
        let first = list.points.insert_before(head, Point::new(5, 5));
        list.points.insert_before(first, Point::new(5, 5));
        list.add_point(rec, Point::new(9, 9), false);

        assert_eq!(list.point_count(rec), 4);

        list.fixup_out_polyline(rec);
        assert_eq!(list.point_count(rec), 3);
    }

    #[test]
    fn test_containment() {
        let mut list = OutRecList::new();
        let outer = push_ring(&mut list, &SQUARE);
        let inner = push_ring(&mut list, &[(2, 2), (8, 2), (8, 8), (2, 8)]);

        assert!(list.poly2_contains_poly1(inner, outer));
        assert!(!list.poly2_contains_poly1(outer, inner));
    }

    #[test]
    fn test_record_links() {
        let mut list = OutRecList::new();
        let root = push_ring(&mut list, &SQUARE);
        let merged = list.create();
        let child = list.create();

        list[merged].idx = root;
        list[merged].first_left = Some(root);
        list[child].first_left = Some(merged);

        assert_eq!(list.get_out_rec(merged), root);
        assert_eq!(list.parse_first_left(Some(merged)), Some(root));
        assert!(list.out_rec1_right_of_out_rec2(child, root));
        assert!(!list.out_rec1_right_of_out_rec2(root, child));
    }

    #[test]
    fn test_get_lowermost_rec() {
        let mut list = OutRecList::new();
        let upper = push_ring(&mut list, &SQUARE);
        let lower = push_ring(&mut list, &[(0, 5), (10, 5), (10, 20), (0, 20)]);

        assert_eq!(list.get_lowermost_rec(upper, lower), lower);
        assert_eq!(list.get_lowermost_rec(lower, upper), lower);
    }
}
