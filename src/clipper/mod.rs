// Clipper module - Vatti sweep-line polygon clipping
// Contains the sweep engine, its derived operations and related utilities

pub mod clipper;
pub mod clipper_base;
pub mod clipper_config;
pub mod clipping_helper;
pub mod constants;
pub mod enums;
pub mod error;
pub mod int128;
pub mod intersect_node;
pub mod join;
pub mod local_minima;
pub mod out_pt;
pub mod out_rec;
pub mod scanbeam;
pub mod t_edge;
pub mod utils;

#[cfg(test)]
pub mod tests;

// Re-export commonly used items for convenience
pub use clipper::{ClipSolution, Clipper};
pub use clipper_config::ClipperConfig;
pub use clipping_helper::{contains, simplify_polygon};
pub use constants::*;
pub use enums::*;
pub use error::ClipperError;
