//! Target query adapters.

mod grid;

pub use grid::SpatialGrid;
