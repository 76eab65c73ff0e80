/// Sentinel `dx` of horizontal edges.
pub const HORIZONTAL: f64 = -3.4e38;

/// Largest coordinate magnitude accepted by the sweep.
pub const HI_RANGE: i64 = 0x3FFF_FFFF_FFFF_FFFF;
