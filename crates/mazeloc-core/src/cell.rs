//! Grid cell coordinates.

use std::fmt::{self, Display};

use crate::Direction;

/// A cell coordinate `(x, y)` in a maze.
///
/// `x` is the column counted from the left and `y` is the row counted from the
/// bottom, both starting at 0. Coordinates are signed so that probing the
/// neighbor of a boundary cell yields an ordinary out-of-bounds value instead
/// of an overflow; whether a cell is valid is always decided by a
/// [`GridOracle`](crate::GridOracle).
///
/// Cells order by `x` first, then `y`.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Direction};
///
/// let cell = Cell::new(2, 0);
/// assert_eq!(cell.neighbor(Direction::North), Cell::new(2, 1));
/// assert_eq!(cell.neighbor(Direction::South), Cell::new(2, -1));
/// assert_eq!(cell.to_string(), "(2, 0)");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a cell at column `x` and row `y`.
    #[must_use]
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the column index.
    #[must_use]
    #[inline]
    pub const fn x(self) -> i32 {
        self.x
    }

    /// Returns the row index.
    #[must_use]
    #[inline]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Returns the adjacent cell in `direction`, regardless of whether it is inside the grid.
    #[must_use]
    #[inline]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let cell = Cell::new(3, 4);
        assert_eq!(cell.neighbor(Direction::North), Cell::new(3, 5));
        assert_eq!(cell.neighbor(Direction::South), Cell::new(3, 3));
        assert_eq!(cell.neighbor(Direction::East), Cell::new(4, 4));
        assert_eq!(cell.neighbor(Direction::West), Cell::new(2, 4));
    }

    #[test]
    fn test_boundary_neighbor_goes_negative() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.neighbor(Direction::West), Cell::new(-1, 0));
        assert_eq!(origin.neighbor(Direction::South), Cell::new(0, -1));
    }

    #[test]
    fn test_ordering_is_column_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn test_display_and_from_tuple() {
        assert_eq!(Cell::from((5, 7)), Cell::new(5, 7));
        assert_eq!(format!("{}", Cell::new(5, 7)), "(5, 7)");
    }
}
