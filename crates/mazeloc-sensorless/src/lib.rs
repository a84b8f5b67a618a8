//! Sensorless localization over belief sets.
//!
//! A robot without sensors still learns where it is by moving: every attempted
//! move sends each candidate location to its neighbor, or leaves it in place if
//! a wall is in the way, and candidates that land on the same cell merge. This
//! crate models that process as a search problem whose states are
//! [`BeliefSet`]s and whose goal is a set with a single cell.
//!
//! The search algorithm itself is not part of this crate; [`SearchProblem`] is
//! the seam an external breadth-first or A* search plugs into.
//!
//! # Examples
//!
//! ```
//! use mazeloc_core::{Cell, Direction, Maze};
//! use mazeloc_sensorless::{SearchProblem as _, SensorlessProblem};
//!
//! let maze: Maze = "RGBY#".parse()?;
//! let problem = SensorlessProblem::new(&maze);
//!
//! let mut state = problem.start_state();
//! for _ in 0..3 {
//!     state = problem.advance(&state, Direction::East).state;
//! }
//! assert!(problem.goal_test(&state));
//! assert_eq!(state.as_single(), Some(Cell::new(3, 0)));
//! # Ok::<(), mazeloc_core::MazeError>(())
//! ```

pub use self::{belief_set::*, problem::*};

mod belief_set;
mod problem;
