use mazeloc_core::{
    AccuracyError, Cell, Color, Direction, GridOracle, MotionModel, SensorAccuracy,
};
use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::{SensingError, SimulationSeed, Trajectory};

/// Errors returned by [`SensorSimulator`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SimulationError {
    /// The sensor accuracy is not a probability.
    #[display("invalid simulator configuration: {_0}")]
    Accuracy(#[from] AccuracyError),
    /// The robot would start on a wall or outside the grid.
    #[display("start cell {cell} is not a floor cell")]
    StartNotFloor {
        /// The rejected start cell.
        cell: Cell,
    },
}

/// Generates ground-truth robot runs with a noisy color sensor.
///
/// At each timestep the robot first senses: it reports the true floor color
/// with probability `accuracy`, otherwise one of the grid's other palette
/// colors chosen uniformly. It then tries one of the four directions, chosen
/// uniformly, and bumps in place if the way is blocked.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Maze};
/// use mazeloc_simulator::{SensorSimulator, SimulationSeed};
///
/// let maze: Maze = "
///     RG
///     BY
/// "
/// .parse()?;
/// let simulator = SensorSimulator::new(&maze, 1.0)?;
///
/// let seed = SimulationSeed::new([7; 32]);
/// let trajectory = simulator.simulate_with_seed(Cell::new(0, 0), 5, seed)?;
/// assert_eq!(trajectory.path[0], Cell::new(0, 0));
/// assert_eq!(trajectory.readings.len(), 5);
/// assert!(trajectory.is_accurate());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SensorSimulator<G> {
    motion: MotionModel<G>,
    accuracy: SensorAccuracy,
}

impl<G> SensorSimulator<G>
where
    G: GridOracle,
{
    /// Creates a simulator over `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Accuracy`] if `accuracy` is outside `[0, 1]`.
    pub fn new(grid: G, accuracy: f64) -> Result<Self, SimulationError> {
        let accuracy = SensorAccuracy::new(accuracy)?;
        Ok(Self {
            motion: MotionModel::new(grid),
            accuracy,
        })
    }

    /// Returns the sensor accuracy.
    #[must_use]
    pub fn accuracy(&self) -> SensorAccuracy {
        self.accuracy
    }

    /// Returns the underlying grid.
    #[must_use]
    pub fn grid(&self) -> &G {
        self.motion.grid()
    }

    /// Simulates `steps` timesteps from `start` with a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::StartNotFloor`] if `start` is not a floor cell.
    pub fn simulate(&self, start: Cell, steps: usize) -> Result<Trajectory, SimulationError> {
        self.simulate_with_seed(start, steps, SimulationSeed::random())
    }

    /// Simulates `steps` timesteps from `start`.
    ///
    /// The same seed always produces the same trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::StartNotFloor`] if `start` is not a floor cell.
    pub fn simulate_with_seed(
        &self,
        start: Cell,
        steps: usize,
        seed: SimulationSeed,
    ) -> Result<Trajectory, SimulationError> {
        let grid = self.motion.grid();
        let Some(mut actual) = grid.color(start) else {
            return Err(SimulationError::StartNotFloor { cell: start });
        };
        log::debug!("simulating {steps} steps from {start} with seed {seed}");

        let mut rng = Pcg64::from_seed(*seed.as_bytes());
        let mut cell = start;
        let mut path = Vec::with_capacity(steps);
        let mut readings = Vec::with_capacity(steps);
        let mut errors = Vec::new();

        for step in 0..steps {
            let reported = self.sense(&mut rng, actual);
            if reported != actual {
                log::debug!("Wrong color sensed at {cell}");
                errors.push(SensingError {
                    step,
                    cell,
                    actual,
                    reported,
                });
            }
            path.push(cell);
            readings.push(reported);

            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let next = self.motion.bump(cell, direction);
            log::trace!("step {step}: {cell} tried {direction}, now at {next}");
            if let Some(color) = grid.color(next) {
                actual = color;
            }
            cell = next;
        }

        Ok(Trajectory {
            seed,
            path,
            readings,
            errors,
        })
    }

    fn sense(&self, rng: &mut Pcg64, actual: Color) -> Color {
        if rng.random_bool(self.accuracy.get()) {
            return actual;
        }
        let mut others = self
            .grid()
            .colors()
            .iter()
            .copied()
            .filter(|&color| color != actual);
        let count = others.clone().count();
        if count == 0 {
            return actual;
        }
        others.nth(rng.random_range(0..count)).unwrap_or(actual)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use mazeloc_core::Maze;
    use mazeloc_filter::{FilterConfig, SequentialFilter};
    use proptest::prelude::*;

    use super::*;

    const ROOM: &str = "
        RGBY
        G##B
        BYRG
    ";

    fn room() -> Maze {
        ROOM.parse().unwrap()
    }

    #[test]
    fn test_rejects_invalid_accuracy() {
        let err = SensorSimulator::new(room(), 1.5).unwrap_err();
        assert!(matches!(err, SimulationError::Accuracy(_)));
    }

    #[test]
    fn test_rejects_wall_start() {
        let simulator = SensorSimulator::new(room(), 0.9).unwrap();
        for cell in [Cell::new(1, 1), Cell::new(-1, 0), Cell::new(4, 0)] {
            assert_eq!(
                simulator.simulate(cell, 3),
                Err(SimulationError::StartNotFloor { cell })
            );
        }
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let simulator = SensorSimulator::new(room(), 0.7).unwrap();
        let seed = SimulationSeed::new([42; 32]);
        let a = simulator.simulate_with_seed(Cell::new(0, 0), 30, seed).unwrap();
        let b = simulator.simulate_with_seed(Cell::new(0, 0), 30, seed).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, seed);
    }

    #[test]
    fn test_perfect_sensor_reports_true_colors() {
        let maze = room();
        let simulator = SensorSimulator::new(&maze, 1.0).unwrap();
        let trajectory = simulator.simulate(Cell::new(3, 2), 50).unwrap();
        assert!(trajectory.is_accurate());
        for (&cell, &color) in trajectory.path.iter().zip(&trajectory.readings) {
            assert_eq!(maze.color(cell), Some(color));
        }
    }

    #[test]
    fn test_blind_sensor_always_misreports() {
        let maze = room();
        let simulator = SensorSimulator::new(&maze, 0.0).unwrap();
        let trajectory = simulator
            .simulate_with_seed(Cell::new(0, 0), 40, SimulationSeed::new([1; 32]))
            .unwrap();
        assert_eq!(trajectory.errors.len(), 40);
        let reported: HashSet<_> = trajectory.errors.iter().map(|e| e.reported).collect();
        assert!(reported.len() > 1);
    }

    #[test]
    fn test_misreadings_stay_in_grid_palette() {
        struct RedGreen(Maze);

        impl GridOracle for RedGreen {
            fn width(&self) -> usize {
                self.0.width()
            }

            fn height(&self) -> usize {
                self.0.height()
            }

            fn color(&self, cell: Cell) -> Option<Color> {
                self.0.color(cell)
            }

            fn colors(&self) -> &[Color] {
                &[Color::Red, Color::Green]
            }
        }

        let grid = RedGreen("RG".parse().unwrap());
        let simulator = SensorSimulator::new(grid, 0.0).unwrap();
        let trajectory = simulator
            .simulate_with_seed(Cell::new(0, 0), 40, SimulationSeed::new([3; 32]))
            .unwrap();
        assert_eq!(trajectory.errors.len(), 40);
        for error in &trajectory.errors {
            let expected = match error.actual {
                Color::Red => Color::Green,
                _ => Color::Red,
            };
            assert_eq!(error.reported, expected);
        }
    }

    #[test]
    fn test_zero_steps() {
        let simulator = SensorSimulator::new(room(), 0.88).unwrap();
        let trajectory = simulator.simulate(Cell::new(0, 0), 0).unwrap();
        assert!(trajectory.is_empty());
        assert!(trajectory.readings.is_empty());
    }

    proptest! {
        #[test]
        fn test_path_stays_on_floor_and_moves_one_cell(
            seed in any::<[u8; 32]>(),
            accuracy in 0.0f64..=1.0,
            steps in 0usize..60,
        ) {
            let maze = room();
            let simulator = SensorSimulator::new(&maze, accuracy).unwrap();
            let trajectory = simulator
                .simulate_with_seed(Cell::new(0, 2), steps, seed.into())
                .unwrap();
            prop_assert_eq!(trajectory.len(), steps);
            prop_assert_eq!(trajectory.readings.len(), steps);
            for pair in trajectory.path.windows(2) {
                let dx = (pair[0].x() - pair[1].x()).abs();
                let dy = (pair[0].y() - pair[1].y()).abs();
                prop_assert!(dx + dy <= 1);
            }
            for &cell in &trajectory.path {
                prop_assert!(maze.is_floor(cell));
            }
            for error in &trajectory.errors {
                prop_assert_ne!(error.actual, error.reported);
                prop_assert_eq!(trajectory.readings[error.step], error.reported);
                prop_assert_eq!(maze.color(error.cell), Some(error.actual));
            }
        }

        #[test]
        fn test_filter_never_rules_out_true_location(
            seed in any::<[u8; 32]>(),
            accuracy in 0.05f64..=1.0,
            steps in 1usize..30,
        ) {
            let maze = room();
            let simulator = SensorSimulator::new(&maze, accuracy).unwrap();
            let trajectory = simulator
                .simulate_with_seed(Cell::new(3, 0), steps, seed.into())
                .unwrap();
            let filter = SequentialFilter::new(&maze, FilterConfig::new(accuracy)).unwrap();
            let trace = filter.filter(&trajectory.readings);
            prop_assert!(!trace.has_diverged());
            for (t, &cell) in trajectory.path.iter().enumerate() {
                let belief = trace.get(t + 1).unwrap();
                prop_assert!(filter.belief_at(belief, cell).unwrap() > 0.0);
            }
        }
    }
}
