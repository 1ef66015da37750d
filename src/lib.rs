//! # grid_astar
//!
//! Interactive shortest-path search on an editable grid. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with 4-directional unit cost moves
//! and the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//! The open set is an indexed binary heap over the grid's own cells, which gives constant time
//! membership tests and allows queued cells to be moved up when a cheaper route to them is
//! found. Connected components are tracked to avoid flood-filling behaviour if no path exists.
//!
//! Searches are meant to be repeated after every edit of the grid, see
//! [GridSession](session::GridSession).
pub mod cell;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod grid;
pub mod heap;
pub mod pathfinder;
pub mod session;

pub use cell::Cell;
pub use config::GridConfig;
pub use coordinate::Coordinate;
pub use error::{GridError, PathError, SessionError};
pub use grid::Grid;
pub use heap::{HeapItem, IndexedBinaryHeap};
pub use pathfinder::{PathInfo, Pathfinder};
pub use session::{GridSession, PlacingMode};

use itertools::Itertools;

/// Cost of a single orthogonal step.
pub const STEP_COST: u32 = 1;
/// Smallest width or height a [GridConfig] allows.
pub const GRID_SIZE_MIN: usize = 8;
/// Largest width or height a [GridConfig] allows.
pub const GRID_SIZE_MAX: usize = 200;

/// Checks that the waypoints form a chain of orthogonal unit steps starting next to `start`.
pub fn waypoints_are_contiguous(start: Coordinate, waypoints: &[Coordinate]) -> bool {
    std::iter::once(&start)
        .chain(waypoints)
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}
