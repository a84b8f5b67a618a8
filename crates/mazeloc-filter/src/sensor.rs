use mazeloc_core::{Color, SensorAccuracy};

use crate::{StateId, StateIndex, matrix::DiagonalMatrix};

/// The color sensor as one diagonal likelihood matrix per color.
///
/// The sensor reports colors from the grid's palette
/// ([`GridOracle::colors`](mazeloc_core::GridOracle::colors)). For a floor
/// state whose true color is `c`, it reports `c` with probability `accuracy`
/// and each other palette color with probability
/// `(1 - accuracy) / (palette size - 1)`: `(1 - accuracy) / 3` for the full
/// four-color palette. A color outside the palette is never reported, so its
/// matrix is all zero. Readings depend only on the current cell, so every
/// matrix is diagonal. Wall entries are zero.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Color, Maze, SensorAccuracy};
/// use mazeloc_filter::{SensorModel, StateIndex};
///
/// let maze: Maze = "RG".parse()?;
/// let index = StateIndex::new(&maze);
/// let sensor = SensorModel::new(&index, SensorAccuracy::new(0.7).unwrap());
///
/// let red = index.state_of(Cell::new(0, 0)).unwrap();
/// assert_eq!(sensor.likelihood(Color::Red, red), 0.7);
/// assert!((sensor.likelihood(Color::Blue, red) - 0.1).abs() < 1e-12);
/// # Ok::<(), mazeloc_core::MazeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SensorModel {
    accuracy: SensorAccuracy,
    matrices: [DiagonalMatrix; Color::COUNT],
}

impl SensorModel {
    /// Builds one sensor matrix per color for the states of `index`.
    #[must_use]
    pub fn new(index: &StateIndex, accuracy: SensorAccuracy) -> Self {
        let palette = index.palette();
        let miss = accuracy.miss_probability_among(palette.len());
        let matrices = Color::ALL.map(|observed| {
            if !palette.contains(&observed) {
                return DiagonalMatrix::new(vec![0.0; index.len()]);
            }
            let diagonal = index
                .states()
                .map(|state| match index.color_of(state) {
                    Some(actual) if actual == observed => accuracy.get(),
                    Some(_) => miss,
                    None => 0.0,
                })
                .collect();
            DiagonalMatrix::new(diagonal)
        });
        Self { accuracy, matrices }
    }

    /// Returns the accuracy the matrices were built with.
    #[must_use]
    pub fn accuracy(&self) -> SensorAccuracy {
        self.accuracy
    }

    /// Returns the likelihood matrix for observing `color`.
    #[must_use]
    pub fn matrix(&self, color: Color) -> &DiagonalMatrix {
        &self.matrices[color.index()]
    }

    /// Returns `P(reading = color | state)`.
    #[must_use]
    pub fn likelihood(&self, color: Color, state: StateId) -> f64 {
        self.matrix(color).diagonal()[state.index()]
    }
}

#[cfg(test)]
mod tests {
    use mazeloc_core::{Cell, GridOracle, Maze};
    use proptest::prelude::*;

    use super::*;

    /// A maze whose sensor can only report red and green.
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

    fn maze() -> Maze {
        "
            RG#
            BYR
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn test_perfect_sensor_excludes_other_colors() {
        let maze = maze();
        let index = StateIndex::new(&maze);
        let sensor = SensorModel::new(&index, SensorAccuracy::PERFECT);
        let yellow = index.state_of(Cell::new(1, 0)).unwrap();
        assert_eq!(sensor.likelihood(Color::Yellow, yellow), 1.0);
        for other in Color::Yellow.others() {
            assert_eq!(sensor.likelihood(other, yellow), 0.0);
        }
    }

    #[test]
    fn test_walls_have_zero_likelihood() {
        let maze = maze();
        let index = StateIndex::new(&maze);
        let sensor = SensorModel::new(&index, SensorAccuracy::DEFAULT);
        let wall = index.state_of(Cell::new(2, 1)).unwrap();
        for color in Color::ALL {
            assert_eq!(sensor.likelihood(color, wall), 0.0);
        }
    }

    #[test]
    fn test_likelihoods_follow_grid_palette() {
        let grid = RedGreen("RGR".parse().unwrap());
        let index = StateIndex::new(&grid);
        let sensor = SensorModel::new(&index, SensorAccuracy::new(0.8).unwrap());
        let red = index.state_of(Cell::new(0, 0)).unwrap();
        let green = index.state_of(Cell::new(1, 0)).unwrap();

        assert_eq!(sensor.likelihood(Color::Red, red), 0.8);
        assert!((sensor.likelihood(Color::Green, red) - 0.2).abs() < 1e-12);
        assert!((sensor.likelihood(Color::Red, green) - 0.2).abs() < 1e-12);
        for state in index.states() {
            assert_eq!(sensor.likelihood(Color::Blue, state), 0.0);
            assert_eq!(sensor.likelihood(Color::Yellow, state), 0.0);
        }
    }

    proptest! {
        #[test]
        fn test_likelihoods_sum_to_one_per_floor_state(accuracy in 0.0f64..=1.0) {
            let maze = maze();
            let index = StateIndex::new(&maze);
            let sensor = SensorModel::new(&index, SensorAccuracy::new(accuracy).unwrap());
            prop_assert_eq!(sensor.accuracy().get(), accuracy);
            for (state, _) in index.floor_states() {
                let total: f64 = Color::ALL
                    .into_iter()
                    .map(|color| sensor.likelihood(color, state))
                    .sum();
                prop_assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }
}
