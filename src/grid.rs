use bit_set::BitSet;
use log::warn;
use std::cmp;
use std::fmt;

use crate::coordinates::{CoordinateSmallVec, GridCoordinate};
use crate::grid_displays::GridDisplay;
use crate::units::{CellsDeep, CellsWide, GridDepth, GridWidth, RoomsCount};

/// Room/wall occupancy grid plus the visited set used while carving.
///
/// A grid for `w * d` cells is `(2w + 1) x (2d + 1)` positions. Everything starts closed and
/// unvisited. Accessors panic on coordinates outside the grid.
#[derive(Clone, PartialEq, Eq)]
pub struct MazeGrid {
    cells_wide: CellsWide,
    cells_deep: CellsDeep,
    width: GridWidth,
    depth: GridDepth,
    open: BitSet,
    visited: BitSet,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: width: {:?}, depth: {:?}, open: {:?}",
               self.width.0, self.depth.0, self.open.len())
    }
}

impl MazeGrid {
    /// Cell counts below 1 are clamped up to 1.
    pub fn new(cells_wide: CellsWide, cells_deep: CellsDeep) -> MazeGrid {
        if cells_wide.0 == 0 || cells_deep.0 == 0 {
            warn!("clamping maze cell counts {}x{} to at least 1x1", cells_wide.0, cells_deep.0);
        }
        let cells_wide = CellsWide(cmp::max(cells_wide.0, 1));
        let cells_deep = CellsDeep(cmp::max(cells_deep.0, 1));
        let width = GridWidth::from(cells_wide);
        let depth = GridDepth::from(cells_deep);
        let size = width.0 * depth.0;

        MazeGrid {
            cells_wide,
            cells_deep,
            width,
            depth,
            open: BitSet::with_capacity(size),
            visited: BitSet::with_capacity(size),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width.0
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth.0
    }

    #[inline]
    pub fn cells_wide(&self) -> CellsWide {
        self.cells_wide
    }

    #[inline]
    pub fn cells_deep(&self) -> CellsDeep {
        self.cells_deep
    }

    /// Total number of grid positions, rooms and walls alike.
    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.depth.0
    }

    #[inline]
    pub fn rooms_count(&self) -> RoomsCount {
        RoomsCount(self.cells_wide.0 * self.cells_deep.0)
    }

    /// The fixed start room in the near corner.
    #[inline]
    pub fn start(&self) -> GridCoordinate {
        GridCoordinate::new(1, 1)
    }

    /// The fixed destination room in the far corner.
    #[inline]
    pub fn destination(&self) -> GridCoordinate {
        GridCoordinate::new(self.width.0 - 2, self.depth.0 - 2)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.x < self.width.0 && coord.z < self.depth.0
    }

    /// Is the coordinate on the outermost ring of the grid?
    pub fn is_boundary(&self, coord: GridCoordinate) -> bool {
        coord.x == 0 || coord.z == 0 || coord.x == self.width.0 - 1 || coord.z == self.depth.0 - 1
    }

    #[inline]
    pub fn is_open(&self, coord: GridCoordinate) -> bool {
        self.open.contains(self.index(coord))
    }

    #[inline]
    pub fn open(&mut self, coord: GridCoordinate) {
        let index = self.index(coord);
        self.open.insert(index);
    }

    #[inline]
    pub fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.visited.contains(self.index(coord))
    }

    #[inline]
    pub fn set_visited(&mut self, coord: GridCoordinate) {
        let index = self.index(coord);
        self.visited.insert(index);
    }

    /// How many of the four rooms two steps away are inside the room range and unvisited.
    pub fn unvisited_room_neighbours(&self, coord: GridCoordinate) -> usize {
        coord.room_offsets()
            .into_iter()
            .filter(|&room| {
                self.is_valid_coordinate(room) && !self.is_boundary(room) && !self.is_visited(room)
            })
            .count()
    }

    /// Wall positions are never rooms, so they count as visited for the completion check.
    pub fn mark_wall_positions_visited(&mut self) {
        for coord in self.iter() {
            if coord.is_wall_position() {
                self.set_visited(coord);
            }
        }
    }

    pub fn all_rooms_visited(&self) -> bool {
        self.rooms().all(|room| self.is_visited(room))
    }

    /// Clamp a signed position into the interior room range `[1, width - 2] x [1, depth - 2]`.
    pub fn clamp_to_interior(&self, x: isize, z: isize) -> GridCoordinate {
        let max_x = (self.width.0 - 2) as isize;
        let max_z = (self.depth.0 - 2) as isize;
        GridCoordinate::new(cmp::min(cmp::max(x, 1), max_x) as usize,
                            cmp::min(cmp::max(z, 1), max_z) as usize)
    }

    /// Open positions directly next to `coord`.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        coord.adjacent()
            .into_iter()
            .filter(|&adjacent| self.is_valid_coordinate(adjacent) && self.is_open(adjacent))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn closed_count(&self) -> usize {
        self.size() - self.open.len()
    }

    /// Opened wall positions, i.e. passages joining two rooms.
    pub fn passages_count(&self) -> usize {
        self.iter().filter(|&c| c.is_wall_position() && self.is_open(c)).count()
    }

    /// Every position, x major then z.
    pub fn iter(&self) -> CellIter {
        CellIter {
            width: self.width.0,
            depth: self.depth.0,
            current: 0,
        }
    }

    pub fn rooms(&self) -> impl Iterator<Item = GridCoordinate> {
        self.iter().filter(GridCoordinate::is_room)
    }

    /// Text rendering with an optional overlay for room and passage bodies.
    pub fn render(&self, display: Option<&dyn GridDisplay>) -> String {
        let mut output = String::with_capacity((self.width.0 + 1) * self.depth.0);
        for z in 0..self.depth.0 {
            for x in 0..self.width.0 {
                let coord = GridCoordinate::new(x, z);
                let body = if !self.is_open(coord) {
                    '#'
                } else {
                    display.and_then(|d| d.render_cell_body(coord)).unwrap_or(' ')
                };
                output.push(body);
            }
            output.push('\n');
        }
        output
    }

    #[inline]
    fn index(&self, coord: GridCoordinate) -> usize {
        assert!(self.is_valid_coordinate(coord),
                "grid coordinate {} out of range for a {}x{} grid",
                coord, self.width.0, self.depth.0);
        coord.x * self.depth.0 + coord.z
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

#[derive(Debug, Clone)]
pub struct CellIter {
    width: usize,
    depth: usize,
    current: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.width * self.depth {
            let coord = GridCoordinate::new(self.current / self.depth, self.current % self.depth);
            self.current += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.width * self.depth - self.current;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()
