//! Reproducible robot runs for exercising the localizers.
//!
//! [`SensorSimulator`] walks a robot through a maze at random and records
//! what a noisy color sensor reports along the way. The resulting
//! [`Trajectory`] carries both the readings, which are fed to a filter, and
//! the true path, which the filter's output is checked against.
//!
//! Every run is driven by a [`SimulationSeed`]; printing the seed of an
//! interesting run is enough to replay it.
//!
//! # Examples
//!
//! ```
//! use mazeloc_core::{Cell, Maze};
//! use mazeloc_simulator::SensorSimulator;
//!
//! let maze: Maze = "RGBY".parse()?;
//! let simulator = SensorSimulator::new(&maze, 0.88)?;
//!
//! let run = simulator.simulate(Cell::new(0, 0), 10)?;
//! let replay = simulator.simulate_with_seed(Cell::new(0, 0), 10, run.seed)?;
//! assert_eq!(run, replay);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{seed::*, simulator::*, trajectory::*};

mod seed;
mod simulator;
mod trajectory;
