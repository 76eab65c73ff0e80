use std::cmp::Ordering;
use std::ops::Neg;

/// Exact 128-bit signed integer used for sign and ordering decisions on
/// products of two 64-bit coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int128 {
    hi: i64,
    lo: u64,
}

impl Int128 {
    /// Exact product of two 64-bit signed integers.
    pub fn mul(lhs: i64, rhs: i64) -> Self {
        let negate = (lhs < 0) != (rhs < 0);
        let lhs = lhs.unsigned_abs();
        let rhs = rhs.unsigned_abs();

        let lhs_hi = lhs >> 32;
        let lhs_lo = lhs & 0xFFFF_FFFF;
        let rhs_hi = rhs >> 32;
        let rhs_lo = rhs & 0xFFFF_FFFF;

        // |operands| <= 2^63 so every partial product below fits in a u64
        let a = lhs_hi * rhs_hi;
        let b = lhs_lo * rhs_lo;
        let c = lhs_hi * rhs_lo + lhs_lo * rhs_hi;

        let mut hi = a + (c >> 32);
        let lo = (c << 32).wrapping_add(b);

        if lo < b {
            hi += 1;
        }

        let result = Self { hi: hi as i64, lo };

        if negate {
            -result
        } else {
            result
        }
    }

    /// Compares `a * b` against `c * d` without overflow.
    pub fn cmp_products(a: i64, b: i64, c: i64, d: i64) -> Ordering {
        Int128::mul(a, b).cmp(&Int128::mul(c, d))
    }

    pub fn mul_eq(a: i64, b: i64, c: i64, d: i64) -> bool {
        Int128::mul(a, b) == Int128::mul(c, d)
    }
}

impl Neg for Int128 {
    type Output = Int128;

    fn neg(self) -> Int128 {
        if self.lo == 0 {
            Int128 {
                hi: self.hi.wrapping_neg(),
                lo: 0,
            }
        } else {
            Int128 {
                hi: !self.hi,
                lo: self.lo.wrapping_neg(),
            }
        }
    }
}

impl Ord for Int128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialOrd for Int128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
impl From<Int128> for i128 {
    fn from(value: Int128) -> Self {
        ((value.hi as i128) << 64) | value.lo as i128
    }
}
