/// Bit offsets of the packed `ClipperConfig` fields.
pub const CONFIG_OFFSETS: [u8; 5] = [0, 1, 2, 3, 5];

/// Bit widths of the packed `ClipperConfig` fields.
pub const CONFIG_BITS: [u8; 5] = [1, 1, 1, 2, 2];

/// Header slots preceding the offsets table of a packed path buffer.
pub const PACKED_HEADER_SIZE: usize = 1;
