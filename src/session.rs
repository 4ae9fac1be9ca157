use log::info;
use rand::Rng;

use crate::config::MazeConfig;
use crate::coordinates::{GridCoordinate, Point};
use crate::errors::*;
use crate::generate_with_config;
use crate::layout::MazeLayout;

/// One player's run through a sequence of mazes.
///
/// Each level gets a brand new layout. The previous one is handed back from `next_level` rather
/// than changed, so a renderer can finish with it before dropping it.
#[derive(Debug)]
pub struct MazeSession {
    config: MazeConfig,
    base_seed: u64,
    level: u32,
    layout: MazeLayout,
}

impl MazeSession {
    /// A `base_seed` of zero draws every level from ambient entropy, otherwise level `n` is
    /// carved with seed `base_seed + n - 1`.
    pub fn new(config: MazeConfig, base_seed: u64) -> Result<MazeSession> {
        let layout = generate_with_config(&config, level_seed(base_seed, 1))?;
        info!("starting maze session at level 1 ({}x{} cells)", config.cells_wide, config.cells_deep);
        Ok(MazeSession {
            config,
            base_seed,
            level: 1,
            layout,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    /// Cell counts for a level, grown by `level_growth` per level after the first.
    pub fn level_config(&self, level: u32) -> MazeConfig {
        let growth = self.config.level_growth * (level.saturating_sub(1) as usize);
        MazeConfig {
            cells_wide: self.config.cells_wide + growth,
            cells_deep: self.config.cells_deep + growth,
            ..self.config
        }
    }

    /// Carve the next level and make it current, returning the layout it replaces.
    pub fn next_level(&mut self) -> Result<MazeLayout> {
        let level = self.level + 1;
        let config = self.level_config(level);
        let layout = generate_with_config(&config, level_seed(self.base_seed, level))?;
        info!("advancing to maze level {} ({}x{} cells)", level, config.cells_wide, config.cells_deep);
        self.level = level;
        Ok(std::mem::replace(&mut self.layout, layout))
    }

    /// Has a player standing at this world position reached the destination room?
    pub fn is_at_destination(&self, x: f32, z: f32) -> bool {
        self.layout.grid_coordinate_at(x, z) == Some(self.layout.grid().destination())
    }

    pub fn start_position(&self) -> Point {
        self.layout.start_center()
    }

    /// A random room centre away from the start, for dropping an obstacle or chaser into the
    /// maze. A single room maze only has the start room to offer.
    pub fn spawn_point<R: Rng>(&self, rng: &mut R) -> Point {
        let grid = self.layout.grid();
        let candidates = grid.rooms()
            .filter(|&room| room != grid.start())
            .collect::<Vec<GridCoordinate>>();
        let room = if candidates.is_empty() {
            grid.start()
        } else {
            candidates[rng.gen_range(0..candidates.len())]
        };

        let unit = self.config.cell_unit();
        Point::new(room.x as f32 * unit, 0.0, room.z as f32 * unit)
    }
}

fn level_seed(base_seed: u64, level: u32) -> u64 {
    if base_seed == 0 {
        return 0;
    }
    match base_seed.wrapping_add(u64::from(level) - 1) {
        0 => 1,
        seed => seed,
    }
}
