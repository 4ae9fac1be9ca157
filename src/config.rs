use error_chain::bail;
use serde_derive::{Deserialize, Serialize};

use crate::errors::*;
use crate::generators::Backtrack;
use crate::units::{CellsDeep, CellsWide};

/// Everything a caller can tune about a maze and its layout.
///
/// Nothing here is read from files or the environment by the library, but the type is
/// serde friendly so a game can keep it in its own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub cells_wide: usize,
    pub cells_deep: usize,
    /// World size of one room plus one wall.
    pub cell_size: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
    pub floor_on: bool,
    pub ceiling_on: bool,
    /// Only used by renderers for world space UVs.
    pub texture_scale: f32,
    pub backtrack: Backtrack,
    /// Extra cells per axis for every level after the first.
    pub level_growth: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            cells_wide: 5,
            cells_deep: 5,
            cell_size: 1.0,
            wall_thickness: 0.2,
            wall_height: 1.0,
            floor_on: true,
            ceiling_on: false,
            texture_scale: 1.0,
            backtrack: Backtrack::NewestLive,
            level_growth: 0,
        }
    }
}

impl MazeConfig {
    #[inline]
    pub fn cells(&self) -> (CellsWide, CellsDeep) {
        (CellsWide(self.cells_wide), CellsDeep(self.cells_deep))
    }

    /// World distance between neighbouring grid positions.
    #[inline]
    pub fn cell_unit(&self) -> f32 {
        self.cell_size * 0.5
    }

    /// Check the world space measurements. Cell counts are not checked, the grid clamps them.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f32| -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                bail!(ErrorKind::InvalidConfiguration(format!("{} must be positive and finite, got {}", name, value)))
            }
        };
        positive("cell_size", self.cell_size)?;
        positive("wall_height", self.wall_height)?;
        positive("texture_scale", self.texture_scale)?;
        positive("wall_thickness", self.wall_thickness)?;

        if self.wall_thickness >= self.cell_size {
            bail!(ErrorKind::InvalidConfiguration(format!(
                "wall_thickness {} must be less than cell_size {}", self.wall_thickness, self.cell_size)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MazeConfigBuilder {
    config: MazeConfig,
}

impl MazeConfigBuilder {
    pub fn new() -> Self {
        MazeConfigBuilder { config: MazeConfig::default() }
    }
    pub fn cells_wide(mut self, cells_wide: usize) -> Self {
        self.config.cells_wide = cells_wide;
        self
    }
    pub fn cells_deep(mut self, cells_deep: usize) -> Self {
        self.config.cells_deep = cells_deep;
        self
    }
    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.config.cell_size = cell_size;
        self
    }
    pub fn wall_thickness(mut self, wall_thickness: f32) -> Self {
        self.config.wall_thickness = wall_thickness;
        self
    }
    pub fn wall_height(mut self, wall_height: f32) -> Self {
        self.config.wall_height = wall_height;
        self
    }
    pub fn floor_on(mut self, on: bool) -> Self {
        self.config.floor_on = on;
        self
    }
    pub fn ceiling_on(mut self, on: bool) -> Self {
        self.config.ceiling_on = on;
        self
    }
    pub fn texture_scale(mut self, texture_scale: f32) -> Self {
        self.config.texture_scale = texture_scale;
        self
    }
    pub fn backtrack(mut self, backtrack: Backtrack) -> Self {
        self.config.backtrack = backtrack;
        self
    }
    pub fn level_growth(mut self, level_growth: usize) -> Self {
        self.config.level_growth = level_growth;
        self
    }
    pub fn build(self) -> MazeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = MazeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cells(), (CellsWide(5), CellsDeep(5)));
        assert_eq!(config.cell_unit(), 0.5);
    }

    #[test]
    fn builder_sets_fields() {
        let config = MazeConfigBuilder::new()
            .cells_wide(8)
            .cells_deep(3)
            .cell_size(2.0)
            .wall_thickness(0.5)
            .wall_height(3.0)
            .floor_on(false)
            .ceiling_on(true)
            .texture_scale(0.25)
            .backtrack(Backtrack::FullSweep)
            .level_growth(2)
            .build();
        assert_eq!(config.cells_wide, 8);
        assert_eq!(config.cells_deep, 3);
        assert_eq!(config.cell_size, 2.0);
        assert_eq!(config.wall_thickness, 0.5);
        assert_eq!(config.wall_height, 3.0);
        assert!(!config.floor_on);
        assert!(config.ceiling_on);
        assert_eq!(config.texture_scale, 0.25);
        assert_eq!(config.backtrack, Backtrack::FullSweep);
        assert_eq!(config.level_growth, 2);
    }

    #[test]
    fn zero_cells_are_not_a_validation_error() {
        let config = MazeConfigBuilder::new().cells_wide(0).cells_deep(0).build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_measurements() {
        let bad = [
            MazeConfigBuilder::new().cell_size(0.0).build(),
            MazeConfigBuilder::new().cell_size(std::f32::NAN).build(),
            MazeConfigBuilder::new().wall_height(-1.0).build(),
            MazeConfigBuilder::new().texture_scale(std::f32::INFINITY).build(),
            MazeConfigBuilder::new().wall_thickness(0.0).build(),
            MazeConfigBuilder::new().wall_thickness(1.0).build(),
        ];
        for config in &bad {
            match config.validate() {
                Err(Error(ErrorKind::InvalidConfiguration(_), _)) => {}
                other => panic!("expected an invalid configuration error, got {:?}", other),
            }
        }
    }
}
