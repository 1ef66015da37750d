use crate::cell::Cell;
use crate::coordinate::Coordinate;
use crate::error::PathError;
use crate::grid::Grid;
use crate::heap::IndexedBinaryHeap;
use crate::STEP_COST;
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::{debug, info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Outcome of trying to path between the start and goal of a [Grid]. Either a path was found,
/// or the reason why not.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathInfo {
    /// Waypoints from the cell next to the start up to and including the goal.
    ValidPath(Vec<Coordinate>),
    NoStartNoGoal,
    NoStart,
    NoGoal,
    /// Both start and goal are placed but the goal cannot be reached.
    NoValidPath,
}

impl PathInfo {
    pub fn waypoints(&self) -> Option<&[Coordinate]> {
        match self {
            PathInfo::ValidPath(waypoints) => Some(waypoints),
            _ => None,
        }
    }
    pub fn is_valid(&self) -> bool {
        matches!(self, PathInfo::ValidPath(_))
    }
    /// Number of steps of the path, zero if there is none.
    pub fn len(&self) -> usize {
        self.waypoints().map_or(0, <[Coordinate]>::len)
    }
    /// True if there is no path or the path has no steps, as when start and goal coincide.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PathInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathInfo::ValidPath(waypoints) => write!(f, "path of {} steps", waypoints.len()),
            PathInfo::NoStartNoGoal => write!(f, "no start and no goal placed"),
            PathInfo::NoStart => write!(f, "no start placed"),
            PathInfo::NoGoal => write!(f, "no goal placed"),
            PathInfo::NoValidPath => write!(f, "goal is obstructed"),
        }
    }
}

/// The Manhattan distance, which is admissible and consistent for 4-directional unit cost moves.
pub fn manhattan_heuristic(a: Coordinate, b: Coordinate) -> u32 {
    a.manhattan_distance(&b).unsigned_abs() * STEP_COST
}

/// A* search over the cells of a [Grid] using 4-directional moves.
///
/// The open set is an [IndexedBinaryHeap] over the grid's cells and the closed set an
/// insertion ordered set of cell indices, both sized for a single grid size and reused by
/// every search. The closed set doubles as a record of the order in which the last search
/// expanded cells, see [expanded](Pathfinder::expanded).
#[derive(Clone, Debug)]
pub struct Pathfinder {
    width: usize,
    height: usize,
    open: IndexedBinaryHeap<Cell>,
    closed: FxIndexSet<usize>,
    /// Consult the connected components of the grid to return early if the goal lies in a
    /// different component than the start.
    pub reachability_check: bool,
}

impl Pathfinder {
    pub fn new(width: usize, height: usize) -> Pathfinder {
        let capacity = width * height;
        Pathfinder {
            width,
            height,
            open: IndexedBinaryHeap::new(capacity),
            closed: FxIndexSet::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            reachability_check: true,
        }
    }

    pub fn for_grid(grid: &Grid) -> Pathfinder {
        Pathfinder::new(grid.width(), grid.height())
    }

    /// Indices of the cells closed by the last search, in expansion order.
    pub fn expanded(&self) -> impl Iterator<Item = usize> + '_ {
        self.closed.iter().copied()
    }

    /// Classifies the start and goal placed on the grid and, if both are placed, searches
    /// for a path between them.
    pub fn path_info(&mut self, grid: &mut Grid) -> Result<PathInfo, PathError> {
        let (start, goal) = (grid.start(), grid.goal());
        let info = match (start.is_unset(), goal.is_unset()) {
            (true, true) => PathInfo::NoStartNoGoal,
            (true, false) => PathInfo::NoStart,
            (false, true) => PathInfo::NoGoal,
            (false, false) => match self.find_path(grid, start, goal)? {
                Some(waypoints) => PathInfo::ValidPath(waypoints),
                None => PathInfo::NoValidPath,
            },
        };
        Ok(info)
    }

    /// Computes a shortest path from start to goal. The returned waypoints exclude the start
    /// itself, so equal start and goal give an empty path. `None` means the goal cannot be
    /// reached.
    ///
    /// Overwrites the search state of the grid's cells.
    pub fn find_path(
        &mut self,
        grid: &mut Grid,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Option<Vec<Coordinate>>, PathError> {
        if (grid.width(), grid.height()) != (self.width, self.height) {
            return Err(PathError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (grid.width(), grid.height()),
            });
        }
        let start_ix = grid.index_of(start).ok_or(PathError::OutOfBounds(start))?;
        let goal_ix = grid.index_of(goal).ok_or(PathError::OutOfBounds(goal))?;

        self.open.clear();
        self.closed.clear();
        grid.reset_search_state();
        if start_ix == goal_ix {
            return Ok(Some(Vec::new()));
        }

        // Components are only meaningful for traversable cells.
        let checked = self.reachability_check && grid.cells()[start_ix].traversable();
        if checked {
            grid.update();
            if !grid.reachable(start, goal) {
                info!("{} is not reachable from {}", goal, start);
                return Ok(None);
            }
        }

        let cells = grid.cells_mut();
        cells[start_ix].h_cost = manhattan_heuristic(start, goal);
        self.open.push(cells, start_ix);

        while let Some(current) = self.open.pop(grid.cells_mut()) {
            self.closed.insert(current);
            if current == goal_ix {
                let path = self.retrace_path(grid.cells(), start_ix, goal_ix);
                debug!(
                    "Found path of {} steps from {} to {}, expanded {} cells",
                    path.len(),
                    start,
                    goal,
                    self.closed.len()
                );
                return Ok(Some(path));
            }
            for n in grid.neighbours(current) {
                let cells = grid.cells_mut();
                if !cells[n].traversable() || self.closed.contains(&n) {
                    continue;
                }
                let tentative_g = cells[current].g_cost + STEP_COST;
                let queued = self.open.contains(cells, n);
                if tentative_g < cells[n].g_cost || !queued {
                    let neighbour = &mut cells[n];
                    neighbour.g_cost = tentative_g;
                    neighbour.h_cost = manhattan_heuristic(neighbour.coordinate(), goal);
                    neighbour.predecessor = Some(current);
                    if queued {
                        self.open.update(cells, n);
                    } else {
                        self.open.push(cells, n);
                    }
                }
            }
        }
        if checked {
            warn!("Reachable goal could not be pathed to, is reachable graph correct?");
        }
        debug!(
            "No path from {} to {}, expanded {} cells",
            start,
            goal,
            self.closed.len()
        );
        Ok(None)
    }

    /// Follows the predecessors back from the goal to the start.
    fn retrace_path(&self, cells: &[Cell], start_ix: usize, goal_ix: usize) -> Vec<Coordinate> {
        let mut path = std::iter::successors(Some(goal_ix), |&ix| cells[ix].predecessor)
            .take_while(|&ix| ix != start_ix)
            .map(|ix| cells[ix].coordinate())
            .collect::<Vec<Coordinate>>();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoints_are_contiguous;

    fn solve(text: &str) -> (Grid, Pathfinder, PathInfo) {
        let mut grid = Grid::from_ascii(text).unwrap();
        let mut pathfinder = Pathfinder::for_grid(&grid);
        let info = pathfinder.path_info(&mut grid).unwrap();
        (grid, pathfinder, info)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut pathfinder = Pathfinder::for_grid(&grid);
        let start = Coordinate::new(1, 1);
        let path = pathfinder.find_path(&mut grid, start, start).unwrap();
        assert_eq!(path, Some(Vec::new()));
    }

    #[test]
    fn open_grid_is_manhattan_optimal() {
        for (w, h) in [(3, 3), (1, 7), (8, 5), (12, 12)] {
            let mut grid = Grid::new(w, h).unwrap();
            let mut pathfinder = Pathfinder::for_grid(&grid);
            let start = Coordinate::new(0, 0);
            let goal = Coordinate::new(w as i32 - 1, h as i32 - 1);
            let path = pathfinder.find_path(&mut grid, start, goal).unwrap().unwrap();
            assert_eq!(path.len(), (w - 1) + (h - 1));
            assert_eq!(path.last(), Some(&goal));
            assert!(waypoints_are_contiguous(start, &path));
        }
    }

    #[test]
    fn simple_open_grid() {
        let (grid, _, info) = solve("S..\n...\n..G");
        assert_eq!(info.len(), 4);
        let path = info.waypoints().unwrap();
        assert!(waypoints_are_contiguous(grid.start(), path));
        assert!(path.iter().all(|&c| grid.is_traversable(c)));
    }

    #[test]
    fn passes_through_gap() {
        let (grid, _, info) = solve(
            "S.#.G
             ..#..
             ..#..
             ..#..
             .....",
        );
        let path = info.waypoints().unwrap();
        assert_eq!(path.len(), 12);
        assert!(path.contains(&Coordinate::new(2, 4)));
        assert!(waypoints_are_contiguous(grid.start(), path));
    }

    #[test]
    fn walled_in_goal_is_obstructed() {
        let text = "S...
                    ..#.
                    .#G#
                    ..#.";
        let (_, _, info) = solve(text);
        assert_eq!(info, PathInfo::NoValidPath);

        // Without the component check the search itself has to run dry.
        let mut grid = Grid::from_ascii(text).unwrap();
        let mut pathfinder = Pathfinder::for_grid(&grid);
        pathfinder.reachability_check = false;
        assert_eq!(pathfinder.path_info(&mut grid), Ok(PathInfo::NoValidPath));
        assert_eq!(pathfinder.expanded().count(), 10);
    }

    #[test]
    fn missing_endpoints_are_classified() {
        assert_eq!(solve("...\n...").2, PathInfo::NoStartNoGoal);
        assert_eq!(solve("..G\n...").2, PathInfo::NoStart);
        assert_eq!(solve("S..\n...").2, PathInfo::NoGoal);
        assert_eq!(solve("S#.\n.#G").2, PathInfo::NoValidPath);
    }

    #[test]
    fn rejects_invalid_calls() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut pathfinder = Pathfinder::new(4, 5);
        let origin = Coordinate::new(0, 0);
        assert_eq!(
            pathfinder.find_path(&mut grid, origin, origin),
            Err(PathError::DimensionMismatch {
                expected: (4, 5),
                found: (4, 4)
            })
        );
        let mut pathfinder = Pathfinder::for_grid(&grid);
        let outside = Coordinate::new(4, 0);
        assert_eq!(
            pathfinder.find_path(&mut grid, origin, outside),
            Err(PathError::OutOfBounds(outside))
        );
        assert_eq!(
            pathfinder.find_path(&mut grid, Coordinate::UNSET, origin),
            Err(PathError::OutOfBounds(Coordinate::UNSET))
        );
    }

    #[test]
    fn repeated_searches_are_deterministic() {
        let mut grid = Grid::from_ascii(
            "S.....
             .##.#.
             ......
             .#.##.
             .....G",
        )
        .unwrap();
        let mut pathfinder = Pathfinder::for_grid(&grid);
        let first = pathfinder.path_info(&mut grid).unwrap();
        for _ in 0..5 {
            assert_eq!(pathfinder.path_info(&mut grid).unwrap(), first);
        }
        assert_eq!(first.len(), 9);
    }

    /// Edits between searches must not leak state from the previous search into the next one.
    #[test]
    fn edits_between_searches() {
        let mut grid = Grid::from_ascii(
            "S...
             ....
             ....
             ...G",
        )
        .unwrap();
        let mut pathfinder = Pathfinder::for_grid(&grid);
        assert_eq!(pathfinder.path_info(&mut grid).unwrap().len(), 6);

        for c in [(0, 2), (1, 2), (2, 2)] {
            grid.set_traversable(c.into(), false).unwrap();
        }
        let info = pathfinder.path_info(&mut grid).unwrap();
        assert_eq!(info.len(), 6);
        assert!(info.waypoints().unwrap().contains(&Coordinate::new(3, 2)));

        grid.set_traversable(Coordinate::new(3, 2), false).unwrap();
        assert!(grid.components_dirty());
        assert_eq!(pathfinder.path_info(&mut grid).unwrap(), PathInfo::NoValidPath);
        assert!(!grid.components_dirty());
        assert!(!grid.reachable(grid.start(), grid.goal()));

        grid.set_traversable(Coordinate::new(0, 2), true).unwrap();
        let info = pathfinder.path_info(&mut grid).unwrap();
        assert_eq!(info.len(), 6);
        assert!(info.waypoints().unwrap().contains(&Coordinate::new(0, 2)));
    }

    #[test]
    fn expanded_starts_with_start_and_ends_with_goal() {
        let (grid, pathfinder, info) = solve("S..\n.#.\n..G");
        assert!(info.is_valid());
        let expanded = pathfinder.expanded().collect::<Vec<_>>();
        assert_eq!(expanded.first(), grid.index_of(grid.start()).as_ref());
        assert_eq!(expanded.last(), grid.index_of(grid.goal()).as_ref());
    }

    #[test]
    fn path_info_emptiness() {
        assert!(PathInfo::NoValidPath.is_empty());
        assert!(PathInfo::ValidPath(Vec::new()).is_empty());
        let info = PathInfo::ValidPath(vec![Coordinate::new(0, 1)]);
        assert!(!info.is_empty());
        assert_eq!(info.len(), 1);
    }

    #[test]
    fn display_path_info() {
        assert_eq!(PathInfo::NoGoal.to_string(), "no goal placed");
        assert_eq!(
            PathInfo::ValidPath(vec![Coordinate::new(0, 1)]).to_string(),
            "path of 1 steps"
        );
    }
}
