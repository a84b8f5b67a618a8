//! Probabilistic localization with a hidden Markov model forward filter.
//!
//! The robot moves blindly through a maze and reports the color of the floor
//! under it after each move, but the sensor is noisy. Given those readings,
//! [`SequentialFilter`] maintains a weight for every cell of the grid and
//! updates it one observation at a time.
//!
//! # Overview
//!
//! 1. **State space**
//!    - [`StateIndex`]: The fixed mapping between cells and [`StateId`]s
//!    - [`BeliefVector`]: One weight per state, with [`Normalization`] policies
//!
//! 2. **Models**
//!    - [`TransitionModel`]: Where the robot can be after one blind move
//!    - [`SensorModel`]: How likely each reading is in each cell
//!    - [`matrix`]: The dense and diagonal matrices both models are stored as
//!
//! 3. **Filtering**
//!    - [`SequentialFilter`]: The forward recursion, producing a [`FilterTrace`]
//!    - [`BeliefRender`], [`TraceRender`]: Text tables of the results
//!
//! # Divergence
//!
//! With a perfect sensor, an observation that no reachable cell could produce
//! zeroes every weight. The filter does not fail in that case: the zero vector
//! is kept as the belief and the timestep is reported in
//! [`FilterTrace::diverged`].
//!
//! # Examples
//!
//! ```
//! use mazeloc_core::{Cell, Color, Maze};
//! use mazeloc_filter::{FilterConfig, SequentialFilter};
//!
//! let maze: Maze = "
//!     RRRR
//!     RR#R
//!     RGRR
//! "
//! .parse()?;
//! let filter = SequentialFilter::new(&maze, FilterConfig::default())?;
//!
//! let trace = filter.filter(&[Color::Green, Color::Green, Color::Green]);
//! let (cell, _) = filter.most_likely(trace.last()).unwrap();
//! assert_eq!(cell, Cell::new(1, 0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{belief::*, filter::*, render::*, sensor::*, state_index::*, transition::*};

mod belief;
mod filter;
pub mod matrix;
mod render;
mod sensor;
mod state_index;
#[cfg(test)]
mod testing;
mod transition;
