//! Mapping between grid cells and filter states.

use std::fmt::{self, Display};

use mazeloc_core::{Cell, Color, GridOracle};

/// Index of a filter state.
///
/// State `id` corresponds to cell `(id % width, id / width)`: rows are
/// numbered from the bottom and states run left to right within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// Returns the raw index, suitable for indexing vectors and matrices.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A fixed bijection between every grid cell and a [`StateId`].
///
/// Walls get states too, so vectors and matrices line up with the full
/// `width × height` grid; the filter simply never gives wall states any mass.
/// The index snapshots each cell's color and the grid's sensor palette at
/// construction and does not keep a reference to the grid.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Color, Maze};
/// use mazeloc_filter::StateIndex;
///
/// let maze: Maze = "
///     R#
///     GB
/// "
/// .parse()?;
/// let index = StateIndex::new(&maze);
///
/// assert_eq!(index.len(), 4);
/// assert_eq!(index.floor_count(), 3);
///
/// let state = index.state_of(Cell::new(0, 1)).unwrap();
/// assert_eq!(state.index(), 2);
/// assert_eq!(index.cell_of(state), Cell::new(0, 1));
/// assert_eq!(index.color_of(state), Some(Color::Red));
/// assert_eq!(index.state_of(Cell::new(2, 0)), None);
/// # Ok::<(), mazeloc_core::MazeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateIndex {
    width: usize,
    height: usize,
    colors: Vec<Option<Color>>,
    palette: Vec<Color>,
    floor_count: usize,
}

impl StateIndex {
    /// Builds the index for `grid`.
    pub fn new<G>(grid: &G) -> Self
    where
        G: GridOracle + ?Sized,
    {
        let (width, height) = (grid.width(), grid.height());
        let colors: Vec<_> = (0..width * height)
            .map(|id| grid.color(cell_at(width, id)))
            .collect();
        let floor_count = colors.iter().flatten().count();
        let mut palette = Vec::with_capacity(Color::COUNT);
        for &color in grid.colors() {
            if !palette.contains(&color) {
                palette.push(color);
            }
        }
        Self {
            width,
            height,
            colors,
            palette,
            floor_count,
        }
    }

    /// Returns the number of states (`width × height`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if the grid has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the number of floor states.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    /// Returns the colors the sensor can report, without duplicates.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Returns the grid width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the state of an in-bounds cell, or `None` if `cell` lies outside the grid.
    #[must_use]
    pub fn state_of(&self, cell: Cell) -> Option<StateId> {
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        (x < self.width && y < self.height).then_some(StateId(y * self.width + x))
    }

    /// Returns the cell a state stands for.
    ///
    /// # Panics
    ///
    /// Panics if `state` does not belong to this index.
    #[must_use]
    pub fn cell_of(&self, state: StateId) -> Cell {
        assert!(state.0 < self.len(), "state {state} out of range");
        cell_at(self.width, state.0)
    }

    /// Returns the floor color of a state, or `None` for a wall.
    ///
    /// # Panics
    ///
    /// Panics if `state` does not belong to this index.
    #[must_use]
    pub fn color_of(&self, state: StateId) -> Option<Color> {
        self.colors[state.0]
    }

    /// Returns `true` if `state` is a floor cell.
    ///
    /// # Panics
    ///
    /// Panics if `state` does not belong to this index.
    #[must_use]
    pub fn is_floor(&self, state: StateId) -> bool {
        self.color_of(state).is_some()
    }

    /// Returns every state in id order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = StateId> + use<> {
        (0..self.len()).map(StateId)
    }

    /// Returns every floor state with its color, in id order.
    pub fn floor_states(&self) -> impl Iterator<Item = (StateId, Color)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter_map(|(id, color)| color.map(|c| (StateId(id), c)))
    }
}

fn cell_at(width: usize, id: usize) -> Cell {
    let x = i32::try_from(id % width).expect("grid width exceeds i32::MAX");
    let y = i32::try_from(id / width).expect("grid height exceeds i32::MAX");
    Cell::new(x, y)
}
