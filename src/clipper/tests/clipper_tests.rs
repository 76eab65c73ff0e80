use crate::clipper::clipper::Clipper;
use crate::clipper::clipper_config::ClipperConfig;
use crate::clipper::clipping_helper::simplify_polygon;
use crate::clipper::enums::{ClipType, EndType, JoinType, PolyFillType};
use crate::clipper::error::ClipperError;
use crate::geometry::point::Point;
use crate::geometry::polygon::{Polygon, PolygonPath};
use crate::geometry::polygon_tree::PolygonTree;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestInput {
    clip_type: u8,
    subject: Vec<Vec<[i64; 2]>>,
    clip: Vec<Vec<[i64; 2]>>,
    subject_fill_type: Option<u8>,
    clip_fill_type: Option<u8>,
    #[serde(default)]
    open_subject: bool,
}

#[derive(Debug, Deserialize)]
struct TestOutput {
    count: usize,
    area: Option<f64>,
    polygons: Option<Vec<Vec<[i64; 2]>>>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    id: String,
    input: TestInput,
    output: TestOutput,
}

#[derive(Debug, Deserialize)]
struct TestSuite {
    id: String,
    data: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct TestDataStructure {
    suites: Vec<TestSuite>,
}

fn load_test_data() -> TestDataStructure {
    serde_json::from_str(include_str!("__data__/clipper.json")).expect("Failed to parse clipper test data")
}

fn create_polygon(points: &[[i64; 2]], is_open: bool) -> Polygon {
    let points: Vec<Point> = points.iter().map(|&[x, y]| Point::new(x, y)).collect();

    if is_open {
        Polygon::open(points)
    } else {
        Polygon::from_points(points)
    }
}

fn create_path(polygons: &[Vec<[i64; 2]>], is_open: bool) -> PolygonPath {
    polygons
        .iter()
        .map(|points| create_polygon(points, is_open))
        .collect()
}

fn path_from(polygons: &[&[(i64, i64)]]) -> PolygonPath {
    polygons
        .iter()
        .map(|points| points.iter().map(|&pt| Point::from(pt)).collect::<Polygon>())
        .collect()
}

/// True when `actual` is `expected` rotated to some start vertex.
fn is_rotation(actual: &[Point], expected: &[Point]) -> bool {
    if actual.len() != expected.len() {
        return false;
    }

    (0..actual.len()).any(|offset| {
        actual
            .iter()
            .cycle()
            .skip(offset)
            .zip(expected.iter())
            .all(|(a, b)| a == b)
    })
}

/// Matches every expected polygon to a distinct result polygon, in any order.
fn compare_polygons(result: &PolygonPath, expected: &[Vec<[i64; 2]>]) -> bool {
    if result.len() != expected.len() {
        return false;
    }

    let mut matched = vec![false; result.len()];

    for points in expected.iter() {
        let expected = create_polygon(points, false);
        let found = result
            .iter()
            .enumerate()
            .position(|(index, polygon)| !matched[index] && is_rotation(polygon, &expected));

        match found {
            Some(index) => matched[index] = true,
            None => return false,
        }
    }

    true
}

fn run_case(suite_id: &str, case: &TestCase) -> PolygonPath {
    let input = &case.input;
    let subject = create_path(&input.subject, input.open_subject);
    let clip = create_path(&input.clip, false);
    let mut solution = PolygonPath::new();

    if suite_id == "simplify" {
        assert!(simplify_polygon(&subject, &mut solution), "{}: simplify failed", case.id);
        return solution;
    }

    let clip_type = ClipType::from_u8(input.clip_type).expect("Invalid ClipType");
    let fill_type = |value: Option<u8>| {
        value
            .map(|value| PolyFillType::from_u8(value).expect("Invalid PolyFillType"))
            .unwrap_or_default()
    };
    let config = ClipperConfig {
        subject_fill_type: fill_type(input.subject_fill_type),
        clip_fill_type: fill_type(input.clip_fill_type),
        ..ClipperConfig::default()
    };

    assert!(
        Clipper::with_config(config).execute(clip_type, &subject, &clip, &mut solution),
        "{}: execute failed",
        case.id
    );

    solution
}

fn square(x: i64, y: i64, size: i64) -> Vec<(i64, i64)> {
    vec![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipper_data_driven() {
        let data = load_test_data();

        for suite in data.suites.iter() {
            for case in suite.data.iter() {
                let solution = run_case(&suite.id, case);

                assert_eq!(
                    solution.len(),
                    case.output.count,
                    "{}/{}: unexpected polygon count {:?}",
                    suite.id,
                    case.id,
                    solution
                );

                if let Some(area) = case.output.area {
                    assert_eq!(solution.area(), area, "{}/{}: area", suite.id, case.id);
                }

                if let Some(polygons) = case.output.polygons.as_ref() {
                    assert!(
                        compare_polygons(&solution, polygons),
                        "{}/{}: polygons differ, got {:?}",
                        suite.id,
                        case.id,
                        solution
                    );
                }
            }
        }
    }

    #[test]
    fn test_open_subject_stays_open() {
        let subject = PolygonPath::from(Polygon::open(vec![Point::new(-10, 0), Point::new(20, 6)]));
        let clip = path_from(&[&square(0, 0, 10)]);
        let mut solution = PolygonPath::new();

        assert!(Clipper::new().execute(ClipType::Intersection, &subject, &clip, &mut solution));
        assert_eq!(solution.len(), 1);
        assert!(solution[0].is_open);
        assert!(is_rotation(&solution[0], &[Point::new(0, 2), Point::new(10, 4)]));
    }

    #[test]
    fn test_open_subject_difference_keeps_outside_parts() {
        let subject = PolygonPath::from(Polygon::open(vec![Point::new(-10, 5), Point::new(20, 5)]));
        let clip = path_from(&[&square(0, 0, 10)]);
        let mut solution = PolygonPath::new();

        assert!(Clipper::new().execute(ClipType::Difference, &subject, &clip, &mut solution));
        assert_eq!(solution.len(), 2);
        assert!(solution.iter().all(|polygon| polygon.is_open && polygon.len() == 2));
    }

    #[test]
    fn test_tree_keeps_polyline_join_and_end_type() {
        let polyline = Polygon {
            points: vec![Point::new(-10, 5), Point::new(5, 5), Point::new(5, 20)],
            is_open: true,
            join_type: JoinType::Round,
            end_type: EndType::OpenRound,
        };
        let block: Polygon = square(20, 0, 10).into_iter().map(Point::from).collect();
        let subject = PolygonPath::from(vec![polyline, block]);
        let clip = path_from(&[&square(0, 0, 10), &square(20, 0, 10)]);
        let mut tree = PolygonTree::new();

        assert!(Clipper::new().execute(ClipType::Intersection, &subject, &clip, &mut tree));
        assert_eq!(tree.children.len(), 2);

        let open = tree.children.iter().find(|node| node.is_open()).expect("open node");

        assert_eq!(open.join_type(), JoinType::Round);
        assert_eq!(open.end_type(), EndType::OpenRound);
        let mut expected = vec![Point::new(0, 5), Point::new(5, 5), Point::new(5, 10)];
        let forward = is_rotation(&open.polygon, &expected);
        expected.reverse();

        assert!(forward || is_rotation(&open.polygon, &expected));

        let closed = tree.children.iter().find(|node| !node.is_open()).expect("closed node");

        assert_eq!(closed.join_type(), JoinType::Square);
        assert_eq!(closed.end_type(), EndType::ClosedPolygon);
    }

    #[test]
    fn test_open_clip_path_is_skipped() {
        let subject = path_from(&[&square(0, 0, 10)]);
        let clip = PolygonPath::from(Polygon::open(vec![Point::new(-10, 5), Point::new(20, 5)]));
        let mut solution = PolygonPath::new();

        assert!(Clipper::new().execute(ClipType::Intersection, &subject, &clip, &mut solution));
        assert!(solution.is_empty());
    }

    #[test]
    fn test_tree_nests_hole_under_outer() {
        let subject = path_from(&[&square(0, 0, 10)]);
        let clip = path_from(&[&square(3, 3, 4)]);
        let mut tree = PolygonTree::new();

        assert!(Clipper::new().execute(ClipType::Difference, &subject, &clip, &mut tree));
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.total_count(), 2);

        let outer = &tree.children[0];

        assert!(!outer.is_hole());
        assert_eq!(outer.polygon.area(), 100.0);
        assert_eq!(outer.children.len(), 1);
        assert!(outer.children[0].is_hole());
        assert_eq!(outer.children[0].polygon.area(), -16.0);

        let flat = PolygonPath::from_tree(&tree);

        assert_eq!(flat.len(), 2);
        assert_eq!(flat.area(), 84.0);
    }

    #[test]
    fn test_tree_island_inside_hole() {
        let subject = path_from(&[&square(0, 0, 30), &square(20, 20, -10), &square(13, 13, 4)]);
        let mut tree = PolygonTree::new();

        assert!(Clipper::with_config(ClipperConfig {
            subject_fill_type: PolyFillType::EvenOdd,
            ..ClipperConfig::default()
        })
        .execute(ClipType::Union, &subject, &PolygonPath::new(), &mut tree));

        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.total_count(), 3);

        let hole = &tree.children[0].children[0];

        assert!(hole.is_hole());
        assert_eq!(hole.children.len(), 1);
        assert!(!hole.children[0].is_hole());
    }

    #[test]
    fn test_reverse_solution() {
        let subject = path_from(&[&square(0, 0, 10)]);
        let clip = path_from(&[&square(5, 0, 10)]);
        let mut solution = PolygonPath::new();
        let clipper = Clipper::with_config(ClipperConfig {
            reverse_solution: true,
            ..ClipperConfig::default()
        });

        assert!(clipper.execute(ClipType::Union, &subject, &clip, &mut solution));
        assert_eq!(solution.len(), 1);
        assert_eq!(solution.area(), -150.0);
    }

    #[test]
    fn test_positive_and_negative_fill() {
        // one counter-clockwise and one clockwise square
        let subject = path_from(&[&square(0, 0, 10), &[(20, 0), (20, 10), (30, 10), (30, 0)]]);
        let mut positive = PolygonPath::new();
        let mut negative = PolygonPath::new();

        for (fill_type, solution) in [
            (PolyFillType::Positive, &mut positive),
            (PolyFillType::Negative, &mut negative),
        ] {
            let clipper = Clipper::with_config(ClipperConfig {
                subject_fill_type: fill_type,
                ..ClipperConfig::default()
            });

            assert!(clipper.execute(ClipType::Union, &subject, &PolygonPath::new(), solution));
        }

        assert_eq!(positive.len(), 1);
        assert_eq!(negative.len(), 1);
        assert_eq!(positive.area(), 100.0);
        assert_eq!(negative.area(), 100.0);
        assert!(positive[0].iter().all(|pt| pt.x <= 10));
        assert!(negative[0].iter().all(|pt| pt.x >= 20));
    }

    #[test]
    fn test_coordinate_out_of_range() {
        let huge = 0x4000_0000_0000_0000;
        let subject = path_from(&[&[(0, 0), (huge, 0), (huge, 10)]]);
        let mut solution = PolygonPath::new();

        assert_eq!(
            Clipper::new().try_execute(ClipType::Union, &subject, &PolygonPath::new(), &mut solution),
            Err(ClipperError::CoordinateOutOfRange { x: huge, y: 0 })
        );
        assert!(!Clipper::new().execute(ClipType::Union, &subject, &PolygonPath::new(), &mut solution));
        assert!(solution.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let mut solution = PolygonPath::from(Polygon::from_points(square(0, 0, 1).into_iter().map(Point::from).collect()));

        assert!(!Clipper::new().execute(ClipType::Union, &PolygonPath::new(), &PolygonPath::new(), &mut solution));
        assert!(solution.is_empty());
        assert_eq!(
            Clipper::new().try_execute(ClipType::Union, &PolygonPath::new(), &PolygonPath::new(), &mut solution),
            Ok(())
        );

        // degenerate loops add no edges either
        let flat = path_from(&[&[(0, 0), (10, 0), (20, 0)]]);

        assert!(!Clipper::new().execute(ClipType::Union, &flat, &PolygonPath::new(), &mut solution));
    }

    #[test]
    fn test_preserve_collinear() {
        let subject = path_from(&[&[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]]);
        let mut solution = PolygonPath::new();

        assert!(Clipper::new().execute(ClipType::Union, &subject, &PolygonPath::new(), &mut solution));
        assert_eq!(solution[0].len(), 4);

        let clipper = Clipper::with_config(ClipperConfig {
            preserve_collinear: true,
            ..ClipperConfig::default()
        });

        assert!(clipper.execute(ClipType::Union, &subject, &PolygonPath::new(), &mut solution));
        assert_eq!(solution[0].len(), 5);
    }

    #[test]
    fn test_simplify_pentagram_orientation() {
        let path = path_from(&[&[(0, 40), (-20, -40), (40, 20), (-40, 20), (20, -40)]]);
        let mut solution = PolygonPath::new();

        assert!(simplify_polygon(&path, &mut solution));
        assert_eq!(solution.len(), 5);
        assert!(solution.iter().all(|polygon| polygon.len() == 3 && polygon.area() > 0.0));
    }

    #[test]
    fn test_polygon_simplify_drops_duplicates() {
        let mut polygon: Polygon = [
            (0, -5),
            (0, -5),
            (5, -5),
            (5, 0),
            (5, 5),
            (0, 5),
            (-5, 5),
            (-5, 5),
            (-5, 0),
            (-5, -5),
            (-5, -5),
            (0, -5),
            (0, -5),
        ]
        .into_iter()
        .map(Point::from)
        .collect();

        polygon.simplify();

        assert_eq!(polygon.area(), 100.0);
        assert!(is_rotation(
            &polygon,
            &[Point::new(5, -5), Point::new(5, 5), Point::new(-5, 5), Point::new(-5, -5)]
        ));
    }
}
