pub trait ClipperRound {
    fn clipper_rounded(self) -> Self;
}

impl ClipperRound for f64 {
    fn clipper_rounded(self) -> Self {
        if self < 0.0 {
            (self - 0.5).ceil()
        } else {
            (self + 0.5).floor()
        }
    }
}

/// Rounds half away from zero and converts to the integer coordinate space.
#[inline(always)]
pub fn round_to_i64(value: f64) -> i64 {
    value.clipper_rounded() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(2.5_f64.clipper_rounded(), 3.0);
        assert_eq!((-2.5_f64).clipper_rounded(), -3.0);
        assert_eq!(2.4999_f64.clipper_rounded(), 2.0);
        assert_eq!((-0.2_f64).clipper_rounded(), 0.0);
    }

    #[test]
    fn test_round_to_i64() {
        assert_eq!(round_to_i64(10.5), 11);
        assert_eq!(round_to_i64(-10.5), -11);
        assert_eq!(round_to_i64(7.0), 7);
    }
}
