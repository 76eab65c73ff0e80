use crate::clipper::enums::{ClipType, PolyFillType, PolyType};
use crate::constants::{CONFIG_BITS, CONFIG_OFFSETS};
use crate::utils::bit_ops::{get_bits, get_flag, set_bits, set_flag};

/// Options shared by every `execute` call of a `Clipper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipperConfig {
    /// Emit outer boundaries clockwise and holes counter-clockwise.
    pub reverse_solution: bool,
    /// Split output polygons that touch themselves at a vertex.
    pub strictly_simple: bool,
    /// Keep vertices lying between collinear neighbours.
    pub preserve_collinear: bool,
    pub subject_fill_type: PolyFillType,
    pub clip_fill_type: PolyFillType,
}

impl ClipperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deserialize(packed: u32) -> Self {
        let fill_type = |index: usize| {
            PolyFillType::from_u8(get_bits(packed, CONFIG_OFFSETS[index], CONFIG_BITS[index]) as u8)
                .unwrap_or_default()
        };

        Self {
            reverse_solution: get_flag(packed, CONFIG_OFFSETS[0]),
            strictly_simple: get_flag(packed, CONFIG_OFFSETS[1]),
            preserve_collinear: get_flag(packed, CONFIG_OFFSETS[2]),
            subject_fill_type: fill_type(3),
            clip_fill_type: fill_type(4),
        }
    }

    pub fn serialize(&self) -> u32 {
        let mut result: u32 = 0;

        result = set_flag(result, CONFIG_OFFSETS[0], self.reverse_solution);
        result = set_flag(result, CONFIG_OFFSETS[1], self.strictly_simple);
        result = set_flag(result, CONFIG_OFFSETS[2], self.preserve_collinear);
        result = set_bits(
            result,
            self.subject_fill_type as u32,
            CONFIG_OFFSETS[3],
            CONFIG_BITS[3],
        );
        result = set_bits(
            result,
            self.clip_fill_type as u32,
            CONFIG_OFFSETS[4],
            CONFIG_BITS[4],
        );

        result
    }

    pub fn rules(&self, clip_type: ClipType) -> ClipRules {
        ClipRules {
            clip_type,
            subject_fill_type: self.subject_fill_type,
            clip_fill_type: self.clip_fill_type,
        }
    }
}

/// Boolean operation and fill rules in effect for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRules {
    pub clip_type: ClipType,
    pub subject_fill_type: PolyFillType,
    pub clip_fill_type: PolyFillType,
}

impl ClipRules {
    /// Fill type of the operand `poly_type` belongs to.
    pub fn fill_type(&self, poly_type: PolyType) -> PolyFillType {
        match poly_type {
            PolyType::Subject => self.subject_fill_type,
            PolyType::Clip => self.clip_fill_type,
        }
    }

    /// Fill type of the opposite operand.
    pub fn alt_fill_type(&self, poly_type: PolyType) -> PolyFillType {
        self.fill_type(poly_type.opposite())
    }

    pub fn is_even_odd(&self, poly_type: PolyType) -> bool {
        self.fill_type(poly_type) == PolyFillType::EvenOdd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_resolve_operand_fill_types() {
        let config = ClipperConfig {
            subject_fill_type: PolyFillType::EvenOdd,
            clip_fill_type: PolyFillType::Positive,
            ..ClipperConfig::default()
        };
        let rules = config.rules(ClipType::Xor);

        assert_eq!(rules.fill_type(PolyType::Subject), PolyFillType::EvenOdd);
        assert_eq!(rules.alt_fill_type(PolyType::Subject), PolyFillType::Positive);
        assert_eq!(rules.alt_fill_type(PolyType::Clip), PolyFillType::EvenOdd);
        assert!(rules.is_even_odd(PolyType::Subject));
        assert!(rules.is_even_odd(PolyType::Clip.opposite()));
        assert!(!rules.is_even_odd(PolyType::Subject.opposite()));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = ClipperConfig {
            reverse_solution: true,
            strictly_simple: false,
            preserve_collinear: true,
            subject_fill_type: PolyFillType::Negative,
            clip_fill_type: PolyFillType::EvenOdd,
        };

        assert_eq!(ClipperConfig::deserialize(config.serialize()), config);
        assert_eq!(ClipperConfig::deserialize(0).subject_fill_type, PolyFillType::EvenOdd);
    }
}
