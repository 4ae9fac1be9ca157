#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsWide(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsDeep(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridWidth(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridDepth(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RoomsCount(pub usize);

impl From<CellsWide> for GridWidth {
    fn from(cells: CellsWide) -> GridWidth {
        GridWidth(cells.0 * 2 + 1)
    }
}

impl From<CellsDeep> for GridDepth {
    fn from(cells: CellsDeep) -> GridDepth {
        GridDepth(cells.0 * 2 + 1)
    }
}
