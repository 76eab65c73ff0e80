pub mod point;
pub mod polygon;
pub mod polygon_tree;
