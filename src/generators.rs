use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::{Deserialize, Serialize};

use crate::coordinates::{GridCoordinate, ROOM_STEP};
use crate::grid::MazeGrid;

/// How the frontier is rescanned when the walk reaches a room with nothing unvisited around it.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Backtrack {
    /// Scan from the newest entry, dropping exhausted rooms, and jump to the first live one.
    NewestLive,
    /// Sweep the whole frontier, dropping every exhausted room, and jump to the oldest live one.
    FullSweep,
}

impl Default for Backtrack {
    fn default() -> Self {
        Backtrack::NewestLive
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CarveStats {
    pub iterations: usize,
    pub backtracks: usize,
    /// Steps that landed on an already visited room and so opened nothing.
    pub revisits: usize,
    pub walls_opened: usize,
}

/// A non-zero seed gives a reproducible generator, zero asks for ambient entropy.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    if seed == 0 {
        XorShiftRng::from_entropy()
    } else {
        XorShiftRng::seed_from_u64(seed)
    }
}

/// Carve a perfect maze into a fresh grid with a randomised walk from the start room.
///
/// Each iteration marks the current room visited. If it still has unvisited room neighbours it
/// goes on the frontier, otherwise the frontier is rescanned (per `backtrack`) for a room to
/// resume from. Then a random axis and direction are picked for a two step move, clamped into
/// the room range. Clamping is not resampled, so walks along the edge of the grid often stay
/// put. The destination room is opened, and if it had not been visited yet so is the wall
/// between it and the previous room.
///
/// Runs until every room is visited. Only rooms that were unvisited get joined, so the result
/// has exactly `rooms - 1` passages.
pub fn carve<R: Rng>(grid: &mut MazeGrid, rng: &mut R, backtrack: Backtrack) -> CarveStats {
    debug!("carving a {}x{} maze grid", grid.width(), grid.depth());

    let mut stats = CarveStats::default();
    let mut frontier: Vec<GridCoordinate> = Vec::new();
    let mut current = grid.start();
    grid.open(current);
    grid.mark_wall_positions_visited();

    while !grid.all_rooms_visited() {
        stats.iterations += 1;
        grid.set_visited(current);

        if grid.unvisited_room_neighbours(current) > 0 {
            frontier.push(current);
        } else if let Some(resume) = rescan_frontier(grid, &mut frontier, backtrack) {
            trace!("backtracking from {} to {}", current, resume);
            current = resume;
            stats.backtracks += 1;
        }

        let previous = current;
        current = random_room_step(grid, current, rng);
        grid.open(current);

        if grid.is_visited(current) {
            stats.revisits += 1;
        } else {
            grid.open(previous.midpoint(current));
            stats.walls_opened += 1;
        }
    }

    debug!("carved {} passages in {} iterations ({} backtracks, {} revisits)",
           stats.walls_opened, stats.iterations, stats.backtracks, stats.revisits);
    stats
}

/// Exhausted rooms are discarded from the frontier for good. The live room returned stays on it.
fn rescan_frontier(grid: &MazeGrid,
                   frontier: &mut Vec<GridCoordinate>,
                   backtrack: Backtrack)
                   -> Option<GridCoordinate> {
    let is_live = |room: &GridCoordinate| grid.unvisited_room_neighbours(*room) > 0;

    match backtrack {
        Backtrack::NewestLive => {
            while let Some(newest) = frontier.last() {
                if is_live(newest) {
                    return Some(*newest);
                }
                frontier.pop();
            }
            None
        }
        Backtrack::FullSweep => {
            // Every exhausted room is dropped, the oldest live room is resumed.
            frontier.retain(is_live);
            frontier.first().cloned()
        }
    }
}

fn random_room_step<R: Rng>(grid: &MazeGrid, from: GridCoordinate, rng: &mut R) -> GridCoordinate {
    let step = if rng.gen_bool(0.5) { -ROOM_STEP } else { ROOM_STEP };
    let (x, z) = (from.x as isize, from.z as isize);
    if rng.gen_bool(0.5) {
        grid.clamp_to_interior(x + step, z)
    } else {
        grid.clamp_to_interior(x, z + step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing;
    use crate::units::{CellsDeep, CellsWide};
    use quickcheck::{quickcheck, TestResult};

    fn carved(w: usize, d: usize, seed: u64, backtrack: Backtrack) -> (MazeGrid, CarveStats) {
        let mut grid = MazeGrid::new(CellsWide(w), CellsDeep(d));
        let mut rng = seeded_rng(seed);
        let stats = carve(&mut grid, &mut rng, backtrack);
        (grid, stats)
    }

    fn assert_perfect(grid: &MazeGrid, stats: &CarveStats) {
        let rooms = grid.rooms_count().0;
        assert!(grid.all_rooms_visited());
        assert_eq!(pathing::reachable_room_count(grid), rooms);
        assert_eq!(grid.passages_count(), rooms - 1);
        assert_eq!(stats.walls_opened, rooms - 1);
        assert!(pathing::is_perfect_maze(grid));
        for coord in grid.iter().filter(|&c| grid.is_boundary(c)) {
            assert!(!grid.is_open(coord), "boundary {} was opened", coord);
        }
    }

    #[test]
    fn single_room_maze() {
        let (grid, stats) = carved(1, 1, 42, Backtrack::NewestLive);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.depth(), 3);
        assert_eq!(grid.start(), grid.destination());
        assert_eq!(grid.open_count(), 1);
        assert!(grid.is_open(GridCoordinate::new(1, 1)));
        assert_eq!(stats.walls_opened, 0);
        assert_eq!(stats.iterations, 1);
        assert_perfect(&grid, &stats);
    }

    #[test]
    fn five_by_five_is_perfect() {
        let (grid, stats) = carved(5, 5, 7, Backtrack::NewestLive);
        assert_eq!(grid.width(), 11);
        assert_eq!(grid.rooms().count(), 25);
        assert!(grid.rooms().all(|room| grid.is_open(room)));
        assert_perfect(&grid, &stats);
    }

    #[test]
    fn full_sweep_is_perfect() {
        for seed in 1..20 {
            let (grid, stats) = carved(7, 4, seed, Backtrack::FullSweep);
            assert_perfect(&grid, &stats);
        }
    }

    #[test]
    fn long_thin_mazes() {
        let (grid, stats) = carved(12, 1, 3, Backtrack::NewestLive);
        assert_perfect(&grid, &stats);
        let (grid, stats) = carved(1, 12, 3, Backtrack::FullSweep);
        assert_perfect(&grid, &stats);
    }

    #[test]
    fn tiny_mazes() {
        for &(w, d) in &[(2, 1), (1, 2), (2, 2), (3, 1)] {
            for &backtrack in &[Backtrack::NewestLive, Backtrack::FullSweep] {
                let (grid, stats) = carved(w, d, 1, backtrack);
                assert_perfect(&grid, &stats);
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let (a, stats_a) = carved(9, 6, 1234, Backtrack::NewestLive);
        let (b, stats_b) = carved(9, 6, 1234, Backtrack::NewestLive);
        assert_eq!(a, b);
        assert_eq!(stats_a, stats_b);
    }

    #[test]
    fn different_seeds_differ() {
        let (a, _) = carved(10, 10, 11111, Backtrack::NewestLive);
        let (b, _) = carved(10, 10, 22222, Backtrack::NewestLive);
        assert_ne!(a, b);
    }

    #[test]
    fn ambient_seed_still_carves_a_perfect_maze() {
        let (grid, stats) = carved(6, 6, 0, Backtrack::NewestLive);
        assert_perfect(&grid, &stats);
    }

    #[test]
    fn walks_revisit_rooms() {
        let (_, stats) = carved(8, 8, 99, Backtrack::NewestLive);
        assert!(stats.revisits > 0);
        assert!(stats.iterations >= 63);
        assert_eq!(stats.iterations, stats.walls_opened + stats.revisits);
    }

    #[test]
    fn newest_live_rescan_keeps_the_live_room() {
        let gc = GridCoordinate::new;
        let mut grid = MazeGrid::new(CellsWide(3), CellsDeep(1));
        grid.mark_wall_positions_visited();
        for room in &[gc(1, 1), gc(3, 1)] {
            grid.set_visited(*room);
        }
        // (3, 1) is live because (5, 1) is unvisited, (1, 1) is exhausted.
        let mut frontier = vec![gc(3, 1), gc(1, 1), gc(1, 1)];
        let resume = rescan_frontier(&grid, &mut frontier, Backtrack::NewestLive);
        assert_eq!(resume, Some(gc(3, 1)));
        assert_eq!(frontier, vec![gc(3, 1)]);
    }

    #[test]
    fn full_sweep_rescan_resumes_from_the_oldest_live_room() {
        let gc = GridCoordinate::new;
        let mut grid = MazeGrid::new(CellsWide(3), CellsDeep(2));
        grid.mark_wall_positions_visited();
        for room in &[gc(1, 1), gc(3, 1), gc(5, 1), gc(1, 3)] {
            grid.set_visited(*room);
        }
        // Live: (1, 3) and (3, 1) both border unvisited (3, 3). Exhausted: (1, 1).
        let mut frontier = vec![gc(1, 1), gc(1, 3), gc(1, 1), gc(3, 1)];
        let resume = rescan_frontier(&grid, &mut frontier, Backtrack::FullSweep);
        assert_eq!(resume, Some(gc(1, 3)));
        assert_eq!(frontier, vec![gc(1, 3), gc(3, 1)]);

        let mut frontier = vec![gc(1, 1), gc(1, 3), gc(1, 1), gc(3, 1)];
        let resume = rescan_frontier(&grid, &mut frontier, Backtrack::NewestLive);
        assert_eq!(resume, Some(gc(3, 1)));
        assert_eq!(frontier.len(), 4);
    }

    #[test]
    fn empty_frontier_has_nowhere_to_go() {
        let grid = MazeGrid::new(CellsWide(2), CellsDeep(2));
        let mut frontier = vec![];
        assert_eq!(rescan_frontier(&grid, &mut frontier, Backtrack::NewestLive), None);
        assert_eq!(rescan_frontier(&grid, &mut frontier, Backtrack::FullSweep), None);
    }

    #[test]
    fn random_steps_stay_in_the_room_range() {
        let grid = MazeGrid::new(CellsWide(4), CellsDeep(3));
        let mut rng = seeded_rng(5);
        let mut from = grid.start();
        for _ in 0..1000 {
            let next = random_room_step(&grid, from, &mut rng);
            assert!(next.is_room());
            assert!(!grid.is_boundary(next));
            let moved = (next.x as isize - from.x as isize).abs() + (next.z as isize - from.z as isize).abs();
            assert!(moved == 0 || moved == 2);
            from = next;
        }
    }

    #[test]
    fn quickcheck_carved_mazes_are_perfect() {
        fn p(w: u8, d: u8, seed: u64, sweep: bool) -> TestResult {
            let w = (w % 10) as usize + 1;
            let d = (d % 10) as usize + 1;
            if seed == 0 {
                return TestResult::discard();
            }
            let backtrack = if sweep { Backtrack::FullSweep } else { Backtrack::NewestLive };
            let (grid, stats) = carved(w, d, seed, backtrack);
            let rooms = grid.rooms_count().0;
            let boundary_closed = grid.iter()
                .filter(|&c| grid.is_boundary(c))
                .all(|c| !grid.is_open(c));
            let (again, _) = carved(w, d, seed, backtrack);

            TestResult::from_bool(boundary_closed &&
                                  stats.walls_opened == rooms - 1 &&
                                  grid.passages_count() == rooms - 1 &&
                                  pathing::reachable_room_count(&grid) == rooms &&
                                  grid.is_open(grid.destination()) &&
                                  grid == again)
        }
        quickcheck(p as fn(u8, u8, u64, bool) -> TestResult);
    }
}
