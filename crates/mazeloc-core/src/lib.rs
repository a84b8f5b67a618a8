//! Core data structures for maze localization.
//!
//! This crate provides the world model shared by every localization strategy in
//! the workspace: grid coordinates, colors, a read-only grid oracle, a parsed
//! text maze, and the motion model that enumerates legal robot moves.
//!
//! # Overview
//!
//! 1. **Core types**
//!    - [`cell`]: Grid coordinates with the origin at the bottom-left
//!    - [`direction`]: The four cardinal directions a robot can attempt
//!    - [`color`]: The four floor colors a sensor can report
//!    - [`accuracy`]: Validated sensor accuracy shared by filter and simulator
//!
//! 2. **Grid access**
//!    - [`oracle`]: The [`GridOracle`] trait every localization component reads from
//!    - [`maze`]: [`Maze`], a text-format grid implementing [`GridOracle`]
//!
//! 3. **Motion**
//!    - [`motion`]: [`MotionModel`], legal moves and the wall "bump" policy
//!
//! # Examples
//!
//! ```
//! use mazeloc_core::{Cell, GridOracle as _, Maze, MotionModel};
//!
//! let maze: Maze = "
//!     RG#
//!     BYR
//! "
//! .parse()?;
//!
//! assert_eq!(maze.floor_count(), 5);
//!
//! let motion = MotionModel::new(&maze);
//! let moves = motion.legal_moves(Cell::new(0, 0));
//! assert_eq!(moves.as_slice(), &[Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]);
//! # Ok::<(), mazeloc_core::MazeError>(())
//! ```

pub mod accuracy;
pub mod cell;
pub mod color;
pub mod direction;
pub mod maze;
pub mod motion;
pub mod oracle;

pub use self::{
    accuracy::{AccuracyError, SensorAccuracy},
    cell::Cell,
    color::Color,
    direction::Direction,
    maze::{Maze, MazeError, MazeRender},
    motion::{LegalMoves, MotionModel},
    oracle::GridOracle,
};
