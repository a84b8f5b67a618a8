use mazeloc_core::{GridOracle, MotionModel};

use crate::{StateId, StateIndex, matrix::Matrix};

/// Probability that the robot attempts any one particular direction.
pub const DIRECTION_PROBABILITY: f64 = 0.25;

/// The motion model as a state transition matrix.
///
/// Entry `[i][j]` is the probability of moving from state `i` to state `j` in
/// one timestep. Each of the four directions is attempted with probability
/// 0.25; an attempt blocked by a wall or the boundary leaves the robot where
/// it is. A floor state with `k` legal moves (counting "stay") therefore keeps
/// `(5 - k) / 4` of its mass and sends 0.25 to each reachable neighbor. Wall
/// rows and columns are all zero.
///
/// Only `Tᵀ` is stored, since the filter multiplies belief row vectors by it.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Maze};
/// use mazeloc_filter::{StateIndex, TransitionModel};
///
/// let maze: Maze = "RRR".parse()?;
/// let index = StateIndex::new(&maze);
/// let transition = TransitionModel::new(&maze, &index);
///
/// let left = index.state_of(Cell::new(0, 0)).unwrap();
/// let middle = index.state_of(Cell::new(1, 0)).unwrap();
/// assert_eq!(transition.probability(left, left), 0.75);
/// assert_eq!(transition.probability(left, middle), 0.25);
/// assert_eq!(transition.probability(middle, middle), 0.5);
/// # Ok::<(), mazeloc_core::MazeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionModel {
    transposed: Matrix,
}

impl TransitionModel {
    /// Builds the transition matrix of `grid` over the states of `index`.
    ///
    /// `index` must have been built from the same grid.
    pub fn new<G>(grid: &G, index: &StateIndex) -> Self
    where
        G: GridOracle + ?Sized,
    {
        let motion = MotionModel::new(grid);
        let mut matrix = Matrix::zeros(index.len(), index.len());

        for (state, _) in index.floor_states() {
            let cell = index.cell_of(state);
            let moves = motion.legal_moves(cell);
            let stay = stay_probability(moves.len());
            matrix[(state.index(), state.index())] = stay;
            for &next in moves.iter().filter(|&&next| next != cell) {
                let Some(next_state) = index.state_of(next) else {
                    continue;
                };
                matrix[(state.index(), next_state.index())] = DIRECTION_PROBABILITY;
            }
        }

        Self {
            transposed: matrix.transpose(),
        }
    }

    /// Returns `P(next = to | current = from)`.
    #[must_use]
    pub fn probability(&self, from: StateId, to: StateId) -> f64 {
        self.transposed[(to.index(), from.index())]
    }

    /// Returns `Tᵀ`, the form the forward recursion multiplies by.
    #[must_use]
    pub fn transposed(&self) -> &Matrix {
        &self.transposed
    }
}

/// Returns the self-transition probability of a cell with `legal_moves` moves (stay included).
fn stay_probability(legal_moves: usize) -> f64 {
    debug_assert!((1..=5).contains(&legal_moves));
    let blocked = 5 - legal_moves;
    // At most 4, exact in f64.
    #[expect(clippy::cast_precision_loss)]
    let blocked = blocked as f64;
    blocked * DIRECTION_PROBABILITY
}
