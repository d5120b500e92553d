use grid_util::point::Point;

/// Sentinel cost for cells the search has not reached yet.
pub const UNREACHED: u32 = u32::MAX;

/// Search state of a single grid position.
///
/// Cells live in the [SearchGrid](crate::SearchGrid) arena and refer to each
/// other through arena indices rather than references, so the grid stays the
/// sole owner of all cell state. Classification flags are fixed at
/// construction; `is_visited` and `is_on_path` only ever go from [false] to
/// [true] within a run, and `cost_so_far` only ever decreases.
#[derive(Clone, Debug)]
pub struct Cell {
    position: Point,
    is_start: bool,
    is_end: bool,
    is_obstacle: bool,
    is_visited: bool,
    is_on_path: bool,
    cost_so_far: u32,
    predecessor: Option<usize>,
}

impl Cell {
    pub(crate) fn new(position: Point, is_start: bool, is_end: bool, is_obstacle: bool) -> Cell {
        Cell {
            position,
            is_start,
            is_end,
            is_obstacle,
            is_visited: false,
            is_on_path: false,
            cost_so_far: if is_start { 0 } else { UNREACHED },
            predecessor: None,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }
    pub fn is_start(&self) -> bool {
        self.is_start
    }
    pub fn is_end(&self) -> bool {
        self.is_end
    }
    pub fn is_obstacle(&self) -> bool {
        self.is_obstacle
    }
    pub fn is_visited(&self) -> bool {
        self.is_visited
    }
    pub fn is_on_path(&self) -> bool {
        self.is_on_path
    }
    /// Best known path cost from the start cell, or [UNREACHED].
    pub fn cost_so_far(&self) -> u32 {
        self.cost_so_far
    }
    /// Arena index of the cell the best known path arrives from.
    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    /// Top-left pixel of this cell for a renderer drawing `cell_size`-sized
    /// squares. Derived from the grid position on demand, never stored.
    pub fn pixel_origin(&self, cell_size: u32) -> (i32, i32) {
        (
            self.position.x * cell_size as i32,
            self.position.y * cell_size as i32,
        )
    }

    /// Records a cheaper way of reaching this cell, remembering where it came
    /// from. Returns whether the candidate improved on the best known cost.
    /// This is the only mutator of cost and predecessor state.
    pub(crate) fn try_relax(&mut self, candidate_cost: u32, from: usize) -> bool {
        if candidate_cost < self.cost_so_far {
            self.cost_so_far = candidate_cost;
            self.predecessor = Some(from);
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_visited(&mut self) {
        self.is_visited = true;
    }

    pub(crate) fn mark_on_path(&mut self) {
        self.is_on_path = true;
    }

    /// Classifies the cell for display. Precedence mirrors the usual render
    /// order: endpoints always show, then the traced path over plain visited
    /// cells, then obstacles, then open ground.
    pub fn display_role(&self) -> DisplayRole {
        if self.is_start {
            DisplayRole::Start
        } else if self.is_end {
            DisplayRole::End
        } else if self.is_on_path {
            DisplayRole::Path
        } else if self.is_visited {
            DisplayRole::Visited
        } else if self.is_obstacle {
            DisplayRole::Obstacle
        } else {
            DisplayRole::Open
        }
    }
}

/// What a cell should look like, as far as the engine can tell. Mapping
/// roles to actual colors is the renderer's business.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayRole {
    Start,
    End,
    Path,
    Visited,
    Obstacle,
    Open,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relax_improves_then_rejects() {
        let mut cell = Cell::new(Point::new(3, 2), false, false, false);
        assert_eq!(cell.cost_so_far(), UNREACHED);
        assert!(cell.try_relax(5, 7));
        assert_eq!(cell.cost_so_far(), 5);
        assert_eq!(cell.predecessor(), Some(7));
        // An equal cost is not an improvement and must not steal the predecessor.
        assert!(!cell.try_relax(5, 9));
        assert_eq!(cell.predecessor(), Some(7));
        assert!(cell.try_relax(3, 9));
        assert_eq!(cell.cost_so_far(), 3);
        assert_eq!(cell.predecessor(), Some(9));
    }

    #[test]
    fn start_cell_begins_at_zero() {
        let mut cell = Cell::new(Point::new(0, 0), true, false, false);
        assert_eq!(cell.cost_so_far(), 0);
        assert!(!cell.try_relax(0, 1));
    }

    #[test]
    fn display_role_precedence() {
        let mut cell = Cell::new(Point::new(1, 1), false, false, true);
        assert_eq!(cell.display_role(), DisplayRole::Obstacle);
        cell.mark_visited();
        assert_eq!(cell.display_role(), DisplayRole::Visited);
        cell.mark_on_path();
        assert_eq!(cell.display_role(), DisplayRole::Path);
        let start = Cell::new(Point::new(0, 0), true, false, false);
        assert_eq!(start.display_role(), DisplayRole::Start);
        let open = Cell::new(Point::new(2, 2), false, false, false);
        assert_eq!(open.display_role(), DisplayRole::Open);
    }

    #[test]
    fn pixel_origin_scales_with_cell_size() {
        let cell = Cell::new(Point::new(4, 7), false, false, false);
        assert_eq!(cell.pixel_origin(20), (80, 140));
    }
}
