//! Grid model: cells, directions and bounds.

/// One grid coordinate. Cells outside the grid are representable so a
/// proposed head can be tested against the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one unit away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Movement direction. `Up` decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn offset(self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Fixed-size playing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub struct Grid {
    width: i16,
    height: i16,
}

impl Grid {
    /// Dimensions are clamped to at least one cell.
    pub const fn new(width: i16, height: i16) -> Self {
        Self {
            width: if width < 1 { 1 } else { width },
            height: if height < 1 { 1 } else { height },
        }
    }

    pub const fn width(&self) -> i16 {
        self.width
    }

    pub const fn height(&self) -> i16 {
        self.height
    }

    /// Total number of cells.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub const fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Cell at a row-major index, wrapping past the last cell.
    pub const fn cell_at(&self, index: usize) -> Cell {
        let index = index % self.area();
        let width = self.width as usize;
        Cell::new((index % width) as i16, (index / width) as i16)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.area()).map(|i| self.cell_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_edges() {
        let grid = Grid::new(10, 10);
        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(9, 9)));
        assert!(!grid.in_bounds(Cell::new(10, 5)));
        assert!(!grid.in_bounds(Cell::new(5, 10)));
        assert!(!grid.in_bounds(Cell::new(-1, 0)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));
    }

    #[test]
    fn step_is_one_manhattan_unit_in_direction() {
        let origin = Cell::new(4, 7);
        for direction in Direction::ALL {
            let next = origin.step(direction);
            let (dx, dy) = direction.offset();
            assert_eq!((next.x - origin.x, next.y - origin.y), (dx, dy));
            assert_eq!((next.x - origin.x).abs() + (next.y - origin.y).abs(), 1);
            assert_eq!(next.step(direction.opposite()), origin);
        }
        assert_eq!(origin.step(Direction::Up), Cell::new(4, 6));
        assert_eq!(origin.step(Direction::Right), Cell::new(5, 7));
    }

    #[test]
    fn cells_cover_grid_row_major() {
        let grid = Grid::new(3, 2);
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(2, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
        assert_eq!(grid.cell_at(6), Cell::new(0, 0));
        assert!(cells.iter().all(|c| grid.in_bounds(*c)));
    }

    #[test]
    fn degenerate_dimensions_clamp() {
        let grid = Grid::new(0, -3);
        assert_eq!(grid.area(), 1);
        assert_eq!(grid.center(), Cell::new(0, 0));
    }
}
