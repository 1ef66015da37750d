use crate::config::GridConfig;
use crate::coordinate::Coordinate;
use crate::error::{GridError, SessionError};
use crate::grid::Grid;
use crate::pathfinder::{PathInfo, Pathfinder};
use log::{debug, info};

/// What an input on the grid places.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlacingMode {
    #[default]
    Obstacle,
    Start,
    Goal,
}

/// An editable grid that recomputes the path between its start and goal after every edit.
///
/// Input arrives one cell at a time: once for a click and once for every cell the cursor
/// passes while the pointer is held. When painting obstacles, the first cell of such a stroke
/// decides whether the stroke places or removes obstacles, so dragging over a mixed area does
/// not toggle back and forth.
#[derive(Clone, Debug)]
pub struct GridSession {
    grid: Grid,
    pathfinder: Pathfinder,
    mode: PlacingMode,
    /// `Some(true)` while the current stroke places obstacles, `Some(false)` while it clears them.
    stroke: Option<bool>,
    path_info: PathInfo,
}

impl GridSession {
    /// Creates a session on an empty grid of the configured size.
    pub fn new(config: GridConfig) -> GridSession {
        let grid = Grid::from_config(&config);
        GridSession {
            pathfinder: Pathfinder::for_grid(&grid),
            grid,
            mode: PlacingMode::default(),
            stroke: None,
            path_info: PathInfo::NoStartNoGoal,
        }
    }

    /// Creates a session on an existing grid and computes its initial path.
    pub fn from_grid(mut grid: Grid) -> Result<GridSession, SessionError> {
        let mut pathfinder = Pathfinder::for_grid(&grid);
        let path_info = pathfinder.path_info(&mut grid)?;
        Ok(GridSession {
            grid,
            pathfinder,
            mode: PlacingMode::default(),
            stroke: None,
            path_info,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }
    pub fn mode(&self) -> PlacingMode {
        self.mode
    }
    pub fn set_mode(&mut self, mode: PlacingMode) {
        self.mode = mode;
    }
    /// The outcome of the last recomputation.
    pub fn path_info(&self) -> &PathInfo {
        &self.path_info
    }

    /// Applies an input at the given cell according to the current [PlacingMode]. Returns the
    /// new outcome if the grid changed, `None` if the input had no effect.
    pub fn input(&mut self, c: Coordinate) -> Result<Option<&PathInfo>, SessionError> {
        let changed = match self.mode {
            PlacingMode::Obstacle => self.paint(c)?,
            PlacingMode::Start => self.grid.place_start(c)?,
            PlacingMode::Goal => self.grid.place_goal(c)?,
        };
        if !changed {
            return Ok(None);
        }
        self.recompute().map(Some)
    }

    /// Ends the current stroke.
    pub fn input_up(&mut self) {
        self.stroke = None;
    }

    /// Inverts all cells except start and goal and recomputes the path.
    pub fn invert(&mut self) -> Result<&PathInfo, SessionError> {
        self.grid.invert();
        self.recompute()
    }

    /// The polyline to draw: the start followed by the waypoints, or nothing if there is no
    /// valid path.
    pub fn render_positions(&self) -> Vec<Coordinate> {
        match self.path_info.waypoints() {
            Some(waypoints) => std::iter::once(self.grid.start())
                .chain(waypoints.iter().copied())
                .collect(),
            None => Vec::new(),
        }
    }

    fn paint(&mut self, c: Coordinate) -> Result<bool, GridError> {
        let traversable = self
            .grid
            .cell(c)
            .ok_or(GridError::OutOfBounds(c))?
            .traversable();
        if c == self.grid.start() || c == self.grid.goal() {
            return Ok(false);
        }
        let place_obstacles = *self.stroke.get_or_insert(traversable);
        if place_obstacles != traversable {
            debug!("Stroke skips {}", c);
            return Ok(false);
        }
        self.grid.set_traversable(c, !traversable)
    }

    fn recompute(&mut self) -> Result<&PathInfo, SessionError> {
        self.path_info = self.pathfinder.path_info(&mut self.grid)?;
        info!("Grid changed: {}", self.path_info);
        Ok(&self.path_info)
    }
}
