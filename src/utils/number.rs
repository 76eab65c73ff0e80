use num_traits::{Num, ToPrimitive};

fn wrap(index: usize, offset: usize, len: usize) -> usize {
    (index + offset) % len
}

/// Scalar stored in flat `[x0, y0, x1, y1, ...]` coordinate buffers.
pub trait Number: Num + Copy + PartialOrd + ToPrimitive {
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }

    /// Signed shoelace area of a flat point buffer, positive for counter-clockwise loops.
    fn polygon_area(points: &[Self]) -> f64 {
        let len = points.len();

        if len < 6 || len & 1 != 0 {
            return 0.0;
        }

        let n_points = len >> 1;
        let mut acc = 0.0;

        for i in 0..n_points {
            let base = i << 1;
            let x0 = points[wrap(base, 0, len)].as_f64();
            let y0 = points[wrap(base, 1, len)].as_f64();
            let x1 = points[wrap(base, 2, len)].as_f64();
            let y1 = points[wrap(base, 3, len)].as_f64();

            acc += x0 * y1 - x1 * y0;
        }

        0.5 * acc
    }
}

impl Number for i64 {}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_area_sign() {
        let ccw: [i64; 8] = [0, 0, 10, 0, 10, 10, 0, 10];
        let cw: [i64; 8] = [0, 0, 0, 10, 10, 10, 10, 0];

        assert_eq!(Number::polygon_area(&ccw), 100.0);
        assert_eq!(Number::polygon_area(&cw), -100.0);
    }

    #[test]
    fn test_polygon_area_rejects_partial_buffers() {
        let points: [i64; 5] = [0, 0, 1, 0, 1];
        assert_eq!(Number::polygon_area(&points), 0.0);
    }
}
