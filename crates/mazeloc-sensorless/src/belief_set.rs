use std::{
    collections::{BTreeSet, btree_set},
    fmt::{self, Display},
};

use mazeloc_core::Cell;

/// The set of cells a sensorless robot might occupy.
///
/// The robot is in exactly one of these cells, with no preference among them.
/// Members are kept in [`Cell`] order, so two sets with the same members
/// compare and hash equal regardless of how they were built; search
/// algorithms rely on this to recognize revisited states.
///
/// # Examples
///
/// ```
/// use mazeloc_core::Cell;
/// use mazeloc_sensorless::BeliefSet;
///
/// let set: BeliefSet = [Cell::new(1, 0), Cell::new(0, 0), Cell::new(1, 0)]
///     .into_iter()
///     .collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.as_single(), None);
/// assert_eq!(set.to_string(), "{(0, 0), (1, 0)}");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeliefSet {
    cells: BTreeSet<Cell>,
}

impl BeliefSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the landing cells of one move into a set.
    ///
    /// Several candidates may land on the same cell, typically because one of
    /// them bumped into a wall and stayed where another one arrived. Those
    /// duplicates collapse into a single member. Returns the set together with
    /// the number of candidates that were merged away, i.e.
    /// `targets.len() - set.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeloc_core::Cell;
    /// use mazeloc_sensorless::BeliefSet;
    ///
    /// let (set, merged) = BeliefSet::merge(&[Cell::new(2, 0), Cell::new(3, 0), Cell::new(3, 0)]);
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(merged, 1);
    /// ```
    #[must_use]
    pub fn merge(targets: &[Cell]) -> (Self, usize) {
        let set: Self = targets.iter().copied().collect();
        let merged = targets.len() - set.len();
        (set, merged)
    }

    /// Returns the number of candidate cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is consistent with the moves so far.
    ///
    /// This only happens for an infeasible move sequence and never for sets
    /// produced from a maze with at least one floor cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `cell` is a candidate.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns the only member if the set has exactly one.
    #[must_use]
    pub fn as_single(&self) -> Option<Cell> {
        let mut iter = self.cells.iter();
        let first = iter.next()?;
        iter.next().is_none().then_some(*first)
    }

    /// Returns an iterator over the members in [`Cell`] order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Returns the members as a vector in [`Cell`] order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().collect()
    }
}

impl FromIterator<Cell> for BeliefSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BeliefSet {
    type Item = Cell;
    type IntoIter = btree_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a BeliefSet {
    type Item = Cell;
    type IntoIter = std::iter::Copied<btree_set::Iter<'a, Cell>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

impl Display for BeliefSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, cell) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell}")?;
        }
        f.write_str("}")
    }
}
