//! # grid_step_search
//!
//! An incremental [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! pathfinding engine on a uniform-cost 4-connected grid, built to be watched:
//! every call to [SearchGrid::step] performs one bounded unit of work (a
//! single frontier pop, or a single backward step along the found path), so a
//! frame-driven renderer can call it once per tick and animate the search in
//! real time. The heuristic is the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the
//! end cell, which never overestimates on a unit-cost 4-connected grid, so the
//! end cell's cost is optimal the moment it is finalized.
//!
//! The engine owns no window, renderer or clock. A driver constructs a
//! [SearchGrid] from a [GridConfig], calls [step](SearchGrid::step) at
//! whatever pace it likes, and reads per-cell snapshots back through
//! [cells](SearchGrid::cells) or [cell](SearchGrid::cell) to draw them.

mod cell;
mod frontier;

pub use cell::{Cell, DisplayRole, UNREACHED};

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::{debug, info};
use thiserror::Error;

use crate::frontier::Frontier;
use core::fmt;

/// Construction inputs for a [SearchGrid]: dimensions, endpoints and the
/// obstacle layout. Obstacle coordinates outside the grid bounds are ignored;
/// in-bounds coordinates not listed are walkable.
#[derive(Clone, Debug)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub start: Point,
    pub end: Point,
    pub obstacles: Vec<Point>,
}

impl GridConfig {
    pub fn new(
        width: usize,
        height: usize,
        start: Point,
        end: Point,
        obstacles: Vec<Point>,
    ) -> GridConfig {
        GridConfig {
            width,
            height,
            start,
            end,
            obstacles,
        }
    }

    /// Derives grid dimensions from a display area partitioned into square
    /// cells of `cell_size` pixels, the way a windowed renderer sizes its
    /// grid. Partial cells at the right and bottom edges are dropped.
    pub fn from_display_area(
        width_px: usize,
        height_px: usize,
        cell_size: usize,
        start: Point,
        end: Point,
        obstacles: Vec<Point>,
    ) -> GridConfig {
        GridConfig::new(
            width_px / cell_size,
            height_px / cell_size,
            start,
            end,
            obstacles,
        )
    }
}

/// Rejected [GridConfig] inputs, reported synchronously by
/// [SearchGrid::new]. A failed construction leaves no usable grid behind.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridConfigError {
    #[error("grid dimensions {0}x{1} must both be at least 1")]
    EmptyGrid(usize, usize),
    #[error("start {0} lies outside the {1}x{2} grid")]
    StartOutOfBounds(Point, usize, usize),
    #[error("end {0} lies outside the {1}x{2} grid")]
    EndOutOfBounds(Point, usize, usize),
    #[error("start and end are both {0}")]
    StartIsEnd(Point),
    #[error("start {0} is an obstacle")]
    StartOnObstacle(Point),
    #[error("end {0} is an obstacle")]
    EndOnObstacle(Point),
}

/// Which stage of the run the grid is in, driving what [SearchGrid::step]
/// does next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Frontier cells are being expanded toward the end cell.
    Searching,
    /// The found path is being walked backward, one cell per step.
    TracingPath,
    /// Terminal: the run is over and further steps are no-ops.
    Idle,
}

/// A fixed-size grid of [Cell]s with a min-priority frontier and a two-phase
/// step state machine ([Searching](Phase::Searching) →
/// [TracingPath](Phase::TracingPath) → [Idle](Phase::Idle)).
///
/// A grid runs exactly once: construct it, call [step](Self::step) until
/// [is_idle](Self::is_idle), then read the outcome. A new run needs a new
/// grid.
#[derive(Debug)]
pub struct SearchGrid {
    cells: Vec<Cell>,
    blocked: BoolGrid,
    start: Point,
    end: Point,
    frontier: Frontier,
    phase: Phase,
    trace_cursor: Option<usize>,
}

impl SearchGrid {
    /// Validates the configuration and builds a grid ready to step, with the
    /// frontier seeded with the start cell at cost 0.
    pub fn new(config: GridConfig) -> Result<SearchGrid, GridConfigError> {
        let GridConfig {
            width,
            height,
            start,
            end,
            obstacles,
        } = config;
        if width == 0 || height == 0 {
            return Err(GridConfigError::EmptyGrid(width, height));
        }
        let in_bounds = |p: Point| {
            p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height
        };
        if !in_bounds(start) {
            return Err(GridConfigError::StartOutOfBounds(start, width, height));
        }
        if !in_bounds(end) {
            return Err(GridConfigError::EndOutOfBounds(end, width, height));
        }
        if start == end {
            return Err(GridConfigError::StartIsEnd(start));
        }
        let mut blocked = BoolGrid::new(width, height, false);
        for p in &obstacles {
            if in_bounds(*p) {
                blocked.set(p.x as usize, p.y as usize, true);
            }
        }
        if blocked.get(start.x as usize, start.y as usize) {
            return Err(GridConfigError::StartOnObstacle(start));
        }
        if blocked.get(end.x as usize, end.y as usize) {
            return Err(GridConfigError::EndOnObstacle(end));
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let p = Point::new(x as i32, y as i32);
                cells.push(Cell::new(p, p == start, p == end, blocked.get(x, y)));
            }
        }
        let mut grid = SearchGrid {
            cells,
            blocked,
            start,
            end,
            frontier: Frontier::new(),
            phase: Phase::Searching,
            trace_cursor: None,
        };
        let seed_estimate = grid.heuristic(start);
        let start_index = grid.index_of(start);
        grid.frontier.push(seed_estimate, start_index);
        info!("Searching {width}x{height} grid from {start} to {end}");
        Ok(grid)
    }

    /// Performs one bounded unit of work: while searching, a single frontier
    /// pop (processing it or discarding it as stale); while tracing, a single
    /// backward step along the path. A no-op once [Phase::Idle] is reached,
    /// so calling it forever is safe.
    pub fn step(&mut self) {
        match self.phase {
            Phase::Searching => self.expand_next(),
            Phase::TracingPath => self.trace_next(),
            Phase::Idle => {}
        }
    }

    fn expand_next(&mut self) {
        let Some(current) = self.frontier.pop() else {
            info!("Frontier exhausted: {} is unreachable from {}", self.end, self.start);
            self.phase = Phase::Idle;
            return;
        };
        if self.cells[current].is_visited() {
            // A stale entry, superseded by a cheaper relaxation that was
            // already processed. Discarding it consumes the whole call so
            // per-frame work stays bounded and the animation pace stays even.
            return;
        }
        self.cells[current].mark_visited();
        if self.cells[current].is_end() {
            debug!(
                "End {} reached with cost {}",
                self.end,
                self.cells[current].cost_so_far()
            );
            self.trace_cursor = self.cells[current].predecessor();
            self.phase = Phase::TracingPath;
            return;
        }
        let g = self.cells[current].cost_so_far();
        let position = self.cells[current].position();
        for neighbor in self.neighbors(position) {
            // Unit edge weight.
            let candidate = g + 1;
            if self.cells[neighbor].try_relax(candidate, current) {
                let estimate = candidate + self.heuristic(self.cells[neighbor].position());
                self.frontier.push(estimate, neighbor);
            }
        }
    }

    fn trace_next(&mut self) {
        match self.trace_cursor {
            Some(cursor) if !self.cells[cursor].is_start() => {
                self.cells[cursor].mark_on_path();
                self.trace_cursor = self.cells[cursor].predecessor();
            }
            _ => {
                debug!("Trace complete, going idle");
                self.trace_cursor = None;
                self.phase = Phase::Idle;
            }
        }
    }

    /// Manhattan distance from `p` to the end cell.
    fn heuristic(&self, p: Point) -> u32 {
        ((p.x - self.end.x).abs() + (p.y - self.end.y).abs()) as u32
    }

    /// In-bounds, non-obstacle 4-neighbors of `p`, always yielded in the
    /// fixed order up, down, left, right so equal-priority frontier pushes
    /// happen in a reproducible order.
    fn neighbors(&self, p: Point) -> Vec<usize> {
        const OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(|n| self.can_move_to(*n))
            .map(|n| self.index_of(n))
            .collect()
    }

    fn can_move_to(&self, p: Point) -> bool {
        self.in_bounds(p) && !self.blocked.get(p.x as usize, p.y as usize)
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.blocked.width
            && (p.y as usize) < self.blocked.height
    }

    fn index_of(&self, p: Point) -> usize {
        p.y as usize * self.blocked.width + p.x as usize
    }

    pub fn width(&self) -> usize {
        self.blocked.width
    }

    pub fn height(&self) -> usize {
        self.blocked.height
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the run is over, successfully or not.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// The cell at `p`, or [None] if `p` is out of bounds.
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        if self.in_bounds(p) {
            Some(&self.cells[self.index_of(p)])
        } else {
            None
        }
    }

    /// All cells in row-major order, for renderers that redraw everything.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Whether the end cell has been finalized. Once the grid is
    /// [idle](Self::is_idle), [false] here means no path exists.
    pub fn path_found(&self) -> bool {
        self.cells[self.index_of(self.end)].is_visited()
    }

    /// The full start-to-end path reconstructed from predecessor links, or
    /// [None] while the end has not been reached. Length is always the end
    /// cell's cost plus one.
    pub fn path(&self) -> Option<Vec<Point>> {
        if !self.path_found() {
            return None;
        }
        let end_index = self.index_of(self.end);
        let mut path: Vec<Point> =
            std::iter::successors(Some(end_index), |&index| self.cells[index].predecessor())
                .map(|index| self.cells[index].position())
                .collect();
        path.reverse();
        Some(path)
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let glyph = match self.cells[y * self.width() + x].display_role() {
                    DisplayRole::Start => 'S',
                    DisplayRole::End => 'E',
                    DisplayRole::Path => '*',
                    DisplayRole::Visited => 'o',
                    DisplayRole::Obstacle => '#',
                    DisplayRole::Open => '.',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
