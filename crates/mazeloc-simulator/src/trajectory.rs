use std::fmt::{self, Display};

use mazeloc_core::{Cell, Color};

use crate::SimulationSeed;

/// A timestep at which the sensor misreported the floor color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensingError {
    /// Zero-based timestep of the reading.
    pub step: usize,
    /// Where the robot actually was.
    pub cell: Cell,
    /// The true floor color at `cell`.
    pub actual: Color,
    /// The color the sensor reported instead.
    pub reported: Color,
}

impl Display for SensingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrong color sensed at {}: {} read as {}",
            self.cell, self.actual, self.reported
        )
    }
}

/// The ground truth and sensor readings of one simulated run.
///
/// `path[t]` is where the robot was when `readings[t]` was taken. The
/// [`Display`] impl prints a digest of the run: the sensed colors, the true
/// path, and the misreadings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    /// The seed that reproduces this run.
    pub seed: SimulationSeed,
    /// The robot's true location at each timestep.
    pub path: Vec<Cell>,
    /// The color reported at each timestep.
    pub readings: Vec<Color>,
    /// Every timestep at which the reading was wrong.
    pub errors: Vec<SensingError>,
}

impl Trajectory {
    /// Returns the number of timesteps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the run has no timesteps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns `true` if every reading matched the floor color.
    #[must_use]
    pub fn is_accurate(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sensed path: [")?;
        write_list(f, &self.readings)?;
        writeln!(f, "]")?;
        write!(f, "correct path: [")?;
        write_list(f, &self.path)?;
        writeln!(f, "]")?;
        if self.errors.is_empty() {
            writeln!(f, "no mistakes in sensors")
        } else {
            writeln!(f, "mistakes:")?;
            for error in &self.errors {
                writeln!(f, "     t = {}: {error}", error.step)?;
            }
            Ok(())
        }
    }
}

fn write_list<T>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result
where
    T: Display,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
