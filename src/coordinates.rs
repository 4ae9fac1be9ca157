use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A position on the maze grid. `x` runs across the width, `z` across the depth.
///
/// Coordinates with both axes odd are rooms. Anything with an even axis is a wall
/// position, and with both axes even it is a pillar.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: usize,
    pub z: usize,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// Room to room moves are two grid steps along one axis.
pub const ROOM_STEP: isize = 2;

impl GridCoordinate {
    pub fn new(x: usize, z: usize) -> GridCoordinate {
        GridCoordinate { x, z }
    }

    #[inline]
    pub fn is_room(&self) -> bool {
        self.x % 2 == 1 && self.z % 2 == 1
    }

    #[inline]
    pub fn is_wall_position(&self) -> bool {
        !self.is_room()
    }

    #[inline]
    pub fn is_pillar(&self) -> bool {
        self.x % 2 == 0 && self.z % 2 == 0
    }

    /// The grid position exactly between two coordinates on the same axis.
    /// Between two neighbouring rooms this is the wall separating them.
    pub fn midpoint(&self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate {
            x: (self.x + other.x) / 2,
            z: (self.z + other.z) / 2,
        }
    }

    /// Offset by `(dx, dz)`, or `None` if that would go below zero.
    pub fn offset(&self, dx: isize, dz: isize) -> Option<GridCoordinate> {
        let x = self.x as isize + dx;
        let z = self.z as isize + dz;
        if x < 0 || z < 0 {
            None
        } else {
            Some(GridCoordinate::new(x as usize, z as usize))
        }
    }

    /// The four positions one room away, skipping any that underflow.
    /// Upper bounds are the grid's business.
    pub fn room_offsets(&self) -> CoordinateSmallVec {
        [(-ROOM_STEP, 0), (ROOM_STEP, 0), (0, -ROOM_STEP), (0, ROOM_STEP)]
            .iter()
            .filter_map(|&(dx, dz)| self.offset(dx, dz))
            .collect()
    }

    /// The four directly adjacent positions, skipping any that underflow.
    pub fn adjacent(&self) -> CoordinateSmallVec {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .filter_map(|&(dx, dz)| self.offset(dx, dz))
            .collect()
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// World space position. `y` is up.
#[derive(PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Point {
        Point { x, y, z }
    }
}

/// World space extents of an axis aligned box.
#[derive(PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Size {
    pub fn new(width: f32, height: f32, depth: f32) -> Size {
        Size { width, height, depth }
    }
}
