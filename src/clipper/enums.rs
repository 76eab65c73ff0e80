#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum PolyFillType {
    EvenOdd = 0,
    #[default]
    NonZero = 1,
    Positive = 2,
    Negative = 3,
}

impl PolyFillType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(PolyFillType::EvenOdd),
            1 => Some(PolyFillType::NonZero),
            2 => Some(PolyFillType::Positive),
            3 => Some(PolyFillType::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum PolyType {
    Subject = 0,
    Clip = 1,
}

impl PolyType {
    pub fn opposite(self) -> Self {
        match self {
            PolyType::Subject => PolyType::Clip,
            PolyType::Clip => PolyType::Subject,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum ClipType {
    Intersection = 0,
    Union = 1,
    Difference = 2,
    Xor = 3,
}

impl ClipType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ClipType::Intersection),
            1 => Some(ClipType::Union),
            2 => Some(ClipType::Difference),
            3 => Some(ClipType::Xor),
            _ => None,
        }
    }
}

/// Side of an output record an edge feeds, or the travel direction of a horizontal edge.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Right = 1,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum JoinType {
    #[default]
    Square = 0,
    Round = 1,
    Miter = 2,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum EndType {
    #[default]
    ClosedPolygon = 0,
    ClosedLine = 1,
    OpenButt = 2,
    OpenSquare = 3,
    OpenRound = 4,
}
