use crate::coordinate::Coordinate;
use crate::heap::HeapItem;
use core::cmp::Ordering;

/// A single grid position. Besides whether it can be walked on, a cell carries the scratch
/// state of the search that last touched it. That state is only meaningful during the search
/// that wrote it; [Pathfinder](crate::pathfinder::Pathfinder) resets it at the start of every call.
#[derive(Clone, Debug)]
pub struct Cell {
    coordinate: Coordinate,
    pub(crate) traversable: bool,
    pub g_cost: u32,
    pub h_cost: u32,
    /// Index of the cell this one was reached from, within the owning grid.
    pub predecessor: Option<usize>,
    pub(crate) queue_slot: usize,
}

impl Cell {
    pub fn new(coordinate: Coordinate, traversable: bool) -> Cell {
        Cell {
            coordinate,
            traversable,
            g_cost: 0,
            h_cost: 0,
            predecessor: None,
            queue_slot: 0,
        }
    }
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
    pub fn traversable(&self) -> bool {
        self.traversable
    }
    pub fn total_cost(&self) -> u32 {
        self.g_cost + self.h_cost
    }
    pub fn reset_search_state(&mut self) {
        self.g_cost = 0;
        self.h_cost = 0;
        self.predecessor = None;
        self.queue_slot = 0;
    }
}

impl HeapItem for Cell {
    fn heap_index(&self) -> usize {
        self.queue_slot
    }
    fn set_heap_index(&mut self, index: usize) {
        self.queue_slot = index;
    }
    /// Lower total cost comes first; on a tie, the cell closer to the goal by the heuristic.
    fn priority_cmp(&self, other: &Self) -> Ordering {
        match other.total_cost().cmp(&self.total_cost()) {
            Ordering::Equal => other.h_cost.cmp(&self.h_cost),
            s => s,
        }
    }
}
