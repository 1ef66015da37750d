use crate::cell::Cell;
use crate::config::GridConfig;
use crate::coordinate::Coordinate;
use crate::error::GridError;
use core::fmt;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// A fixed size grid of [Cell]s together with the current start and goal.
///
/// Cells are stored row by row, so the cell at (x, y) has index `y * width + x`. Next to the
/// cells, [Grid] keeps track of the 4-connected components of traversable cells in a
/// [UnionFind] structure, which lets searches between disconnected cells bail out early.
/// Opening a cell joins components directly; blocking one can split a component, in which
/// case the components are flagged as dirty and regenerated on the next [update](Grid::update).
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Coordinate,
    goal: Coordinate,
    pub(crate) components: UnionFind<usize>,
    pub(crate) components_dirty: bool,
}

impl Grid {
    /// Creates a fully traversable grid without start or goal.
    pub fn new(width: usize, height: usize) -> Result<Grid, GridError> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Grid::with_size(width, height))
    }

    /// Creates an empty grid with the configured dimensions, which are always valid.
    pub fn from_config(config: &GridConfig) -> Grid {
        Grid::with_size(config.width(), config.height())
    }

    fn with_size(width: usize, height: usize) -> Grid {
        let cells = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| Cell::new(Coordinate::new(x as i32, y as i32), true))
            })
            .collect::<Vec<Cell>>();
        let mut grid = Grid {
            width,
            height,
            cells,
            start: Coordinate::UNSET,
            goal: Coordinate::UNSET,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
    pub fn start(&self) -> Coordinate {
        self.start
    }
    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }
    pub fn index_of(&self, c: Coordinate) -> Option<usize> {
        self.in_bounds(c)
            .then(|| c.y as usize * self.width + c.x as usize)
    }
    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        self.cells[index].coordinate()
    }
    pub fn cell(&self, c: Coordinate) -> Option<&Cell> {
        self.index_of(c).map(|ix| &self.cells[ix])
    }
    /// Out of bounds coordinates are never traversable.
    pub fn is_traversable(&self, c: Coordinate) -> bool {
        self.cell(c).is_some_and(Cell::traversable)
    }

    /// Indices of the in-bounds orthogonal neighbours of a cell, in the order left, right,
    /// down, up. Traversability is not taken into account.
    pub fn neighbours(&self, index: usize) -> SmallVec<[usize; 4]> {
        self.cells[index]
            .coordinate()
            .neumann_neighborhood()
            .into_iter()
            .filter_map(|c| self.index_of(c))
            .collect()
    }

    fn is_start_or_goal(&self, c: Coordinate) -> bool {
        self.start == c || self.goal == c
    }

    /// Places the start on a traversable cell. Returns whether the start moved; blocked
    /// cells and the current start or goal position are left alone.
    pub fn place_start(&mut self, c: Coordinate) -> Result<bool, GridError> {
        let ix = self.index_of(c).ok_or(GridError::OutOfBounds(c))?;
        if !self.cells[ix].traversable || self.is_start_or_goal(c) {
            return Ok(false);
        }
        self.start = c;
        Ok(true)
    }

    /// Places the goal on a traversable cell, see [place_start](Self::place_start).
    pub fn place_goal(&mut self, c: Coordinate) -> Result<bool, GridError> {
        let ix = self.index_of(c).ok_or(GridError::OutOfBounds(c))?;
        if !self.cells[ix].traversable || self.is_start_or_goal(c) {
            return Ok(false);
        }
        self.goal = c;
        Ok(true)
    }

    pub fn clear_start(&mut self) {
        self.start = Coordinate::UNSET;
    }
    pub fn clear_goal(&mut self) {
        self.goal = Coordinate::UNSET;
    }

    /// Updates the traversability of a cell. Joins newly connected components and flags the
    /// components as dirty if they are (potentially) broken apart. The cells under the start
    /// and goal cannot be changed. Returns whether the cell changed.
    pub fn set_traversable(
        &mut self,
        c: Coordinate,
        traversable: bool,
    ) -> Result<bool, GridError> {
        let ix = self.index_of(c).ok_or(GridError::OutOfBounds(c))?;
        if self.cells[ix].traversable == traversable || self.is_start_or_goal(c) {
            return Ok(false);
        }
        self.cells[ix].traversable = traversable;
        if traversable {
            for n in self.neighbours(ix) {
                if self.cells[n].traversable {
                    self.components.union(ix, n);
                }
            }
        } else {
            self.components_dirty = true;
        }
        Ok(true)
    }

    /// Flips the traversability of every cell except the start and goal. Returns whether any
    /// cell changed.
    pub fn invert(&mut self) -> bool {
        let (start, goal) = (self.start, self.goal);
        let mut changed = false;
        for cell in self
            .cells
            .iter_mut()
            .filter(|cell| cell.coordinate() != start && cell.coordinate() != goal)
        {
            cell.traversable = !cell.traversable;
            changed = true;
        }
        if changed {
            self.components_dirty = true;
        }
        changed
    }

    /// Clears the search scratch state of every cell.
    pub fn reset_search_state(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset_search_state);
    }

    /// Whether blocking cells may have split a component since the last regeneration.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up traversable neighbours.
    pub fn generate_components(&mut self) {
        let (w, h) = (self.width, self.height);
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h {
            for x in 0..w {
                let ix = y * w + x;
                if !self.cells[ix].traversable {
                    continue;
                }
                if x + 1 < w && self.cells[ix + 1].traversable {
                    self.components.union(ix, ix + 1);
                }
                if y + 1 < h && self.cells[ix + w].traversable {
                    self.components.union(ix, ix + w);
                }
            }
        }
    }

    /// Checks if a and b are on the same component. Only accurate while the components are
    /// not dirty.
    pub fn reachable(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a_ix), Some(b_ix)) => self.components.equiv(a_ix, b_ix),
            _ => false,
        }
    }

    /// Parses a grid from rows of `.` (open), `#` (blocked), `S` (start) and `G` (goal). The
    /// first row has y = 0. Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Grid, GridError> {
        let rows = text
            .lines()
            .enumerate()
            .map(|(line, row)| (line + 1, row.trim()))
            .filter(|(_, row)| !row.is_empty())
            .collect::<Vec<_>>();
        let width = rows.first().map_or(0, |(_, row)| row.chars().count());
        let mut grid = Grid::new(width, rows.len())?;
        for (y, (line, row)) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRows {
                    line: *line,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let c = Coordinate::new(x as i32, y as i32);
                let ix = y * width + x;
                let valid = match symbol {
                    '.' => true,
                    '#' => {
                        grid.cells[ix].traversable = false;
                        true
                    }
                    'S' if grid.start.is_unset() => {
                        grid.start = c;
                        true
                    }
                    'G' if grid.goal.is_unset() => {
                        grid.goal = c;
                        true
                    }
                    _ => false,
                };
                if !valid {
                    return Err(GridError::Parse {
                        line: *line,
                        column: x + 1,
                        symbol,
                    });
                }
            }
        }
        grid.generate_components();
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let c = cell.coordinate();
                let symbol = if c == self.start {
                    'S'
                } else if c == self.goal {
                    'G'
                } else if cell.traversable {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
