use crate::coordinates::GridCoordinate;
use crate::utils::{self, FnvHashSet};

/// Decides what, if anything, to draw inside an open grid position when rendering as text.
pub trait GridDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<char>;
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<char> {
        if self.on_path_coordinates.contains(&coord) {
            Some('.')
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
}
impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<char> {
        if coord == self.start {
            Some('S')
        } else if coord == self.end {
            Some('E')
        } else {
            None
        }
    }
}

/// Layers displays, the first one with something to say wins.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    pub fn new(layers: Vec<&'a dyn GridDisplay>) -> Self {
        LayeredDisplay { layers }
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<char> {
        self.layers.iter().filter_map(|layer| layer.render_cell_body(coord)).next()
    }
}
