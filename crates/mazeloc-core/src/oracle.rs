//! Read-only access to maze geometry.

use crate::{Cell, Color};

/// Read-only view of a maze's geometry and floor colors.
///
/// Localization components only ever query a maze through this trait, so any
/// grid source can drive them. Queries for cells outside the grid are valid and
/// answer "not floor" rather than panicking, which lets motion and sensor models
/// query boundary neighbors uniformly.
///
/// Implementors provide [`width`](Self::width), [`height`](Self::height) and
/// [`color`](Self::color); everything else has a default implementation.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Color, GridOracle};
///
/// /// A 2×1 strip: red on the left, wall on the right.
/// struct Strip;
///
/// impl GridOracle for Strip {
///     fn width(&self) -> usize {
///         2
///     }
///     fn height(&self) -> usize {
///         1
///     }
///     fn color(&self, cell: Cell) -> Option<Color> {
///         (cell == Cell::new(0, 0)).then_some(Color::Red)
///     }
/// }
///
/// assert!(Strip.is_floor(Cell::new(0, 0)));
/// assert!(!Strip.is_floor(Cell::new(1, 0)));
/// assert!(!Strip.is_floor(Cell::new(-1, 0)));
/// assert_eq!(Strip.floor_count(), 1);
/// assert_eq!(Strip.wall_count(), 1);
/// ```
pub trait GridOracle {
    /// Returns the number of columns.
    fn width(&self) -> usize;

    /// Returns the number of rows.
    fn height(&self) -> usize;

    /// Returns the color of a floor cell, or `None` for walls and out-of-bounds cells.
    fn color(&self, cell: Cell) -> Option<Color>;

    /// Returns the colors a sensor can report, in a fixed order.
    ///
    /// This is the sensor's palette: a misreading picks uniformly among the
    /// palette colors other than the true one. It should include every floor
    /// color of the grid.
    fn colors(&self) -> &[Color] {
        &Color::ALL
    }

    /// Returns `true` if `cell` lies inside the grid.
    fn contains(&self, cell: Cell) -> bool {
        usize::try_from(cell.x()).is_ok_and(|x| x < self.width())
            && usize::try_from(cell.y()).is_ok_and(|y| y < self.height())
    }

    /// Returns `true` if the robot may occupy `cell`.
    fn is_floor(&self, cell: Cell) -> bool {
        self.color(cell).is_some()
    }

    /// Returns every floor cell, column by column from the left, bottom to top.
    fn floor_cells(&self) -> Vec<Cell> {
        all_cells(self.width(), self.height())
            .filter(|&cell| self.is_floor(cell))
            .collect()
    }

    /// Returns the number of floor cells.
    fn floor_count(&self) -> usize {
        all_cells(self.width(), self.height())
            .filter(|&cell| self.is_floor(cell))
            .count()
    }

    /// Returns the number of wall cells.
    fn wall_count(&self) -> usize {
        self.width() * self.height() - self.floor_count()
    }
}

impl<G> GridOracle for &G
where
    G: GridOracle + ?Sized,
{
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn color(&self, cell: Cell) -> Option<Color> {
        (**self).color(cell)
    }

    fn colors(&self) -> &[Color] {
        (**self).colors()
    }

    fn is_floor(&self, cell: Cell) -> bool {
        (**self).is_floor(cell)
    }
}

/// Iterates every in-bounds cell, `x` outer and `y` inner.
fn all_cells(width: usize, height: usize) -> impl Iterator<Item = Cell> {
    (0..width).flat_map(move |x| (0..height).map(move |y| Cell::new(coord(x), coord(y))))
}

/// Converts a grid dimension index to a cell coordinate.
///
/// # Panics
///
/// Panics if the index does not fit in `i32`, which no parsable maze reaches.
pub(crate) fn coord(index: usize) -> i32 {
    i32::try_from(index).expect("grid dimension exceeds i32::MAX")
}
