use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipperError {
    /// A vertex lies outside the range the exact predicates support.
    #[error("coordinate ({x}, {y}) is outside the allowed range")]
    CoordinateOutOfRange { x: i64, y: i64 },

    /// Polylines may only be passed as subject paths.
    #[error("open paths must be subject paths")]
    OpenClipPath,

    /// Crossings of one scanbeam could not be ordered between adjacent edges.
    #[error("failed to order intersections at y = {y}")]
    IntersectionOrder { y: i64 },

    #[error("edge {edge} has no maxima pair")]
    MaximaPair { edge: usize },

    #[error("edge {edge} has no successor in its bound")]
    InvalidBoundUpdate { edge: usize },
}
