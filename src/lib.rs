//! Grid mazes: carving, breadth-first distances, rendering, and a
//! pixel-graph solvability check for maze images.

pub mod bitmap;
pub mod config;
pub mod distance;
pub mod error;
pub mod generate;
pub mod grid;
pub mod raster;
pub mod render;
pub mod solve;

pub use config::Config;
pub use distance::DistanceField;
pub use error::{MazeError, Result};
pub use generate::Algorithm;
pub use grid::{Cell, Coord, Direction, Grid};
pub use raster::{Pixel, RasterGraph};
pub use solve::solve;
