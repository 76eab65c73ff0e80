#[inline(always)]
fn get_mask(bit_count: u8, offset: u8) -> u32 {
    ((1u32 << bit_count) - 1) << offset
}

#[inline(always)]
pub fn set_bits(source: u32, value: u32, index: u8, bit_count: u8) -> u32 {
    let mask = get_mask(bit_count, index);
    (source & !mask) | ((value << index) & mask)
}

#[inline(always)]
pub fn get_bits(source: u32, index: u8, bit_count: u8) -> u32 {
    (source >> index) & get_mask(bit_count, 0)
}

#[inline(always)]
pub fn set_flag(source: u32, index: u8, value: bool) -> u32 {
    set_bits(source, value as u32, index, 1)
}

#[inline(always)]
pub fn get_flag(source: u32, index: u8) -> bool {
    get_bits(source, index, 1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_bits() {
        let packed = set_bits(0, 3, 4, 2);
        assert_eq!(packed, 0b11_0000);
        assert_eq!(get_bits(packed, 4, 2), 3);
        // overwriting clears the previous value of the field only
        let packed = set_bits(packed | 1, 1, 4, 2);
        assert_eq!(get_bits(packed, 4, 2), 1);
        assert_eq!(get_bits(packed, 0, 1), 1);
    }

    #[test]
    fn test_flags() {
        let packed = set_flag(set_flag(0, 0, true), 2, true);
        assert!(get_flag(packed, 0));
        assert!(!get_flag(packed, 1));
        assert!(get_flag(packed, 2));
        assert!(!get_flag(set_flag(packed, 2, false), 2));
    }
}
