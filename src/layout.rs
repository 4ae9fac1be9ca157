use serde_derive::{Deserialize, Serialize};
use std::slice;

use crate::config::MazeConfig;
use crate::coordinates::{GridCoordinate, Point, Size};
use crate::grid::MazeGrid;

/// Thickness of the floor and ceiling slabs.
pub const SLAB_THICKNESS: f32 = 0.2;
/// Thickness and height of the destination marker tile.
pub const DESTINATION_TILE_THICKNESS: f32 = 0.1;

/// One closed grid position as an axis aligned box.
#[derive(PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Obstacle {
    pub coordinate: GridCoordinate,
    pub center: Point,
    pub size: Size,
}

/// A flat box such as the floor, the ceiling or the destination marker.
#[derive(PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Slab {
    pub center: Point,
    pub size: Size,
}

/// Turns a carved grid into boxes a renderer can place. Never changes the grid.
#[derive(Debug, Clone)]
pub struct LayoutExporter {
    config: MazeConfig,
}

impl LayoutExporter {
    pub fn new(config: &MazeConfig) -> LayoutExporter {
        LayoutExporter { config: *config }
    }

    #[inline]
    fn cell_unit(&self) -> f32 {
        self.config.cell_unit()
    }

    /// Grid position to world position at height `y`.
    pub fn world_point(&self, coord: GridCoordinate, y: f32) -> Point {
        Point::new(coord.x as f32 * self.cell_unit(), y, coord.z as f32 * self.cell_unit())
    }

    /// Walls are thin along an even axis and span the room along an odd one, so pillars are
    /// thin both ways.
    pub fn obstacle(&self, coord: GridCoordinate) -> Obstacle {
        let c = &self.config;
        let span = |index: usize| {
            if index % 2 == 0 {
                c.wall_thickness
            } else {
                c.cell_size - c.wall_thickness
            }
        };
        Obstacle {
            coordinate: coord,
            center: self.world_point(coord, c.wall_height * 0.5),
            size: Size::new(span(coord.x), c.wall_height, span(coord.z)),
        }
    }

    /// The floor covers the grid footprint from the first to the last position.
    pub fn floor(&self, grid: &MazeGrid) -> Slab {
        let size_x = self.cell_unit() * (grid.width() - 1) as f32;
        let size_z = self.cell_unit() * (grid.depth() - 1) as f32;
        Slab {
            center: Point::new(size_x * 0.5, -SLAB_THICKNESS * 0.5, size_z * 0.5),
            size: Size::new(size_x, SLAB_THICKNESS, size_z),
        }
    }

    /// The floor lifted clear of the top of the walls.
    pub fn ceiling(&self, grid: &MazeGrid) -> Slab {
        let mut ceiling = self.floor(grid);
        ceiling.center.y += self.config.wall_height + SLAB_THICKNESS;
        ceiling
    }

    pub fn destination_tile(&self, grid: &MazeGrid) -> Slab {
        let c = &self.config;
        Slab {
            center: self.world_point(grid.destination(), DESTINATION_TILE_THICKNESS * 0.5),
            size: Size::new(c.cell_size, DESTINATION_TILE_THICKNESS, c.cell_size),
        }
    }

    /// Takes the finished grid, which the layout keeps read only for later queries.
    pub fn export(&self, grid: MazeGrid) -> MazeLayout {
        let obstacles = grid.iter()
            .filter(|&coord| !grid.is_open(coord))
            .map(|coord| self.obstacle(coord))
            .collect::<Vec<_>>();

        MazeLayout {
            floor: if self.config.floor_on { Some(self.floor(&grid)) } else { None },
            ceiling: if self.config.ceiling_on { Some(self.ceiling(&grid)) } else { None },
            destination_center: self.world_point(grid.destination(), 0.0),
            start_center: self.world_point(grid.start(), 0.0),
            destination_tile: self.destination_tile(&grid),
            texture_scale: self.config.texture_scale,
            config: self.config,
            obstacles,
            grid,
        }
    }
}

/// Everything a renderer needs to build one maze.
#[derive(Debug, Clone)]
pub struct MazeLayout {
    grid: MazeGrid,
    config: MazeConfig,
    obstacles: Vec<Obstacle>,
    floor: Option<Slab>,
    ceiling: Option<Slab>,
    destination_center: Point,
    start_center: Point,
    destination_tile: Slab,
    texture_scale: f32,
}

impl MazeLayout {
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Walls and pillars, x major then z.
    pub fn obstacles(&self) -> slice::Iter<Obstacle> {
        self.obstacles.iter()
    }

    pub fn obstacles_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn into_obstacles(self) -> Vec<Obstacle> {
        self.obstacles
    }

    pub fn floor_extent(&self) -> Option<Slab> {
        self.floor
    }

    pub fn ceiling_extent(&self) -> Option<Slab> {
        self.ceiling
    }

    pub fn destination_center(&self) -> Point {
        self.destination_center
    }

    pub fn start_center(&self) -> Point {
        self.start_center
    }

    pub fn destination_tile(&self) -> Slab {
        self.destination_tile
    }

    pub fn texture_scale(&self) -> f32 {
        self.texture_scale
    }

    /// The grid position under a world point, using the same units as the obstacles.
    /// None when the point is off the grid.
    pub fn grid_coordinate_at(&self, x: f32, z: f32) -> Option<GridCoordinate> {
        let unit = self.config.cell_unit();
        let (gx, gz) = ((x / unit).floor(), (z / unit).floor());
        if gx < 0.0 || gz < 0.0 || !gx.is_finite() || !gz.is_finite() {
            return None;
        }
        let coord = GridCoordinate::new(gx as usize, gz as usize);
        if self.grid.is_valid_coordinate(coord) {
            Some(coord)
        } else {
            None
        }
    }
}
