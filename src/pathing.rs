// Reachability over the open positions of a finished grid.
//
// Distances are a flood fill from one start position, every step costs one. A room and the
// passage leading to it are separate positions, so neighbouring rooms are two steps apart.
// Nothing here holds on to the grid: distances for a grid stay valid only while it is unchanged,
// which is fine because a carved grid is never mutated again.

use petgraph::algo;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::coordinates::GridCoordinate;
use crate::grid::MazeGrid;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if `start_coordinate` is outside the grid or closed.
    pub fn new(grid: &MazeGrid, start_coordinate: GridCoordinate) -> Option<Distances> {
        if !grid.is_valid_coordinate(start_coordinate) || !grid.is_open(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.open_count());
        distances.insert(start_coordinate, 0);

        // The distances map doubles as the visited set, the first distance recorded for a
        // position is already the shortest.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for coord in &frontier {
                let distance_to_cell = distances[coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for neighbour in grid.open_neighbours(*coord) {
                    if !distances.contains_key(&neighbour) {
                        distances.insert(neighbour, distance_to_cell + 1);
                        new_frontier.push(neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back downhill from `end_point` to the start of `distances_from_start`.
/// Returns the path start first, or None if the end cannot be reached.
pub fn shortest_path(grid: &MazeGrid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = grid.open_neighbours(current_coord)
            .into_iter()
            .find(|neighbour| {
                distances_from_start.distance_from_start_to(*neighbour) == Some(current_distance - 1)
            });

        match closer {
            Some(closer_coord) => {
                current_coord = closer_coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // Distances were computed for some other grid.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Path from the start room to the destination room.
pub fn solution_path(grid: &MazeGrid) -> Option<Vec<GridCoordinate>> {
    let distances = Distances::new(grid, grid.start())?;
    shortest_path(grid, &distances, grid.destination())
}

/// How many rooms can be reached from the start room through open positions.
pub fn reachable_room_count(grid: &MazeGrid) -> usize {
    Distances::new(grid, grid.start())
        .map_or(0, |distances| {
            grid.rooms()
                .filter(|&room| distances.distance_from_start_to(room).is_some())
                .count()
        })
}

/// Rooms as nodes, opened walls between neighbouring rooms as edges.
pub fn room_graph(grid: &MazeGrid) -> UnGraph<GridCoordinate, ()> {
    let rooms_count = grid.rooms_count().0;
    let mut graph = UnGraph::with_capacity(rooms_count, rooms_count * 2);
    let mut nodes: FnvHashMap<GridCoordinate, NodeIndex> = utils::fnv_hashmap(rooms_count);
    for room in grid.rooms() {
        nodes.insert(room, graph.add_node(room));
    }

    for room in grid.rooms() {
        let east_or_south = [GridCoordinate::new(room.x + 2, room.z),
                             GridCoordinate::new(room.x, room.z + 2)];
        for neighbour in east_or_south.iter().filter(|&&n| grid.is_valid_coordinate(n)) {
            if grid.is_open(room.midpoint(*neighbour)) {
                graph.add_edge(nodes[&room], nodes[neighbour], ());
            }
        }
    }
    graph
}

/// Connected with no cycles: exactly one route between any two rooms.
pub fn is_perfect_maze(grid: &MazeGrid) -> bool {
    let graph = room_graph(grid);
    algo::connected_components(&graph) == 1 && !algo::is_cyclic_undirected(&graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{CellsDeep, CellsWide};

    static OUT_OF_GRID_COORDINATE: GridCoordinate = GridCoordinate {
        x: usize::MAX,
        z: usize::MAX,
    };

    fn gc(x: usize, z: usize) -> GridCoordinate {
        GridCoordinate::new(x, z)
    }

    // 2x2 rooms joined in a U: (1,1) - (3,1) - (3,3) - (1,3)
    fn u_shaped_grid() -> MazeGrid {
        let mut g = MazeGrid::new(CellsWide(2), CellsDeep(2));
        for c in &[gc(1, 1), gc(2, 1), gc(3, 1), gc(3, 2), gc(3, 3), gc(2, 3), gc(1, 3)] {
            g.open(*c);
        }
        g
    }

    #[test]
    fn distances_construction_requires_valid_open_start() {
        let g = u_shaped_grid();
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
        assert!(Distances::new(&g, gc(0, 0)).is_none());
        assert!(Distances::new(&g, gc(1, 1)).is_some());
    }

    #[test]
    fn start() {
        let g = u_shaped_grid();
        let distances = Distances::new(&g, gc(3, 1)).unwrap();
        assert_eq!(distances.start(), gc(3, 1));
        assert_eq!(distances.distance_from_start_to(gc(3, 1)), Some(0));
    }

    #[test]
    fn distances_along_the_u() {
        let g = u_shaped_grid();
        let distances = Distances::new(&g, gc(1, 1)).unwrap();
        assert_eq!(distances.distance_from_start_to(gc(3, 1)), Some(2));
        assert_eq!(distances.distance_from_start_to(gc(3, 3)), Some(4));
        assert_eq!(distances.distance_from_start_to(gc(1, 3)), Some(6));
        assert_eq!(distances.distance_from_start_to(gc(1, 2)), None);
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
        assert_eq!(distances.max(), 6);
        assert_eq!(distances.reachable_count(), 7);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 3)]);
    }

    #[test]
    fn path_follows_the_u() {
        let g = u_shaped_grid();
        let path = solution_path(&g).unwrap();
        assert_eq!(path, vec![gc(1, 1), gc(2, 1), gc(3, 1), gc(3, 2), gc(3, 3)]);

        let distances = Distances::new(&g, gc(1, 1)).unwrap();
        let to_far_end = shortest_path(&g, &distances, gc(1, 3)).unwrap();
        assert_eq!(to_far_end.len(), 7);
        assert_eq!(to_far_end.first(), Some(&gc(1, 1)));
        assert_eq!(to_far_end.last(), Some(&gc(1, 3)));
    }

    #[test]
    fn unreachable_end_has_no_path() {
        let mut g = MazeGrid::new(CellsWide(2), CellsDeep(1));
        g.open(gc(1, 1));
        g.open(gc(3, 1));
        assert_eq!(solution_path(&g), None);
        assert_eq!(reachable_room_count(&g), 1);
        assert!(!is_perfect_maze(&g));
    }

    #[test]
    fn room_graph_of_the_u() {
        let g = u_shaped_grid();
        let graph = room_graph(&g);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(is_perfect_maze(&g));
        assert_eq!(reachable_room_count(&g), 4);
    }

    #[test]
    fn a_loop_is_not_perfect() {
        let mut g = u_shaped_grid();
        g.open(gc(1, 2));
        assert_eq!(room_graph(&g).edge_count(), 4);
        assert!(!is_perfect_maze(&g));
    }

    #[test]
    fn closed_start_reaches_nothing() {
        let g = MazeGrid::new(CellsWide(3), CellsDeep(3));
        assert_eq!(reachable_room_count(&g), 0);
        assert_eq!(solution_path(&g), None);
    }
}
