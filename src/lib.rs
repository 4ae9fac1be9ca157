//! **maze_carver** carves perfect mazes over a room/wall grid and describes the result as a
//! renderer agnostic set of wall boxes, floor and ceiling slabs, and start/destination points.
//!
//! ```
//! let layout = maze_carver::generate(5, 5, 7);
//! assert_eq!(layout.grid().width(), 11);
//! assert_eq!(layout.obstacles().count(), layout.grid().closed_count());
//! ```

#![recursion_limit = "1024"] // error_chain

pub mod config;
pub mod coordinates;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod layout;
pub mod pathing;
pub mod session;
pub mod units;
mod utils;

use crate::config::{MazeConfig, MazeConfigBuilder};
use crate::errors::*;
use crate::grid::MazeGrid;
use crate::layout::{LayoutExporter, MazeLayout};

/// Carve a `cells_wide x cells_deep` maze with the default measurements.
///
/// A non-zero `seed` always gives the same maze for the same size. Zero uses ambient randomness.
/// Cell counts below 1 are treated as 1.
pub fn generate(cells_wide: usize, cells_deep: usize, seed: u64) -> MazeLayout {
    let config = MazeConfigBuilder::new()
        .cells_wide(cells_wide)
        .cells_deep(cells_deep)
        .build();
    carve_and_export(&config, seed)
}

/// As `generate`, with every measurement and toggle taken from `config`.
pub fn generate_with_config(config: &MazeConfig, seed: u64) -> Result<MazeLayout> {
    config.validate()?;
    Ok(carve_and_export(config, seed))
}

fn carve_and_export(config: &MazeConfig, seed: u64) -> MazeLayout {
    let (cells_wide, cells_deep) = config.cells();
    let mut grid = MazeGrid::new(cells_wide, cells_deep);
    let mut rng = generators::seeded_rng(seed);
    generators::carve(&mut grid, &mut rng, config.backtrack);
    LayoutExporter::new(config).export(grid)
}
