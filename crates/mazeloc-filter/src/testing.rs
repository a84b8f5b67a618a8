//! Test utilities for filter runs.
//!
//! This module provides [`FilterTester`], a harness that feeds observations
//! to a [`SequentialFilter`] one at a time and checks the resulting belief.

use mazeloc_core::{Cell, Color, Maze};

use crate::{BeliefVector, FilterConfig, FilterTrace, Normalization, SequentialFilter};

const TOLERANCE: f64 = 1e-12;

/// A test harness for verifying filter behavior.
///
/// `FilterTester` owns a filter and the trace produced so far. Each
/// [`observe`](Self::observe) call extends the trace by one timestep, and the
/// assertion methods check the latest belief.
///
/// Observations and checks take the tester by value and hand it back, so a
/// scenario reads as a single chain.
///
/// # Panics
///
/// A failed check panics naming the offending cell and its weight. The
/// report points at the calling test line.
#[derive(Debug)]
pub struct FilterTester {
    filter: SequentialFilter,
    observations: Vec<Color>,
    trace: FilterTrace,
}

impl FilterTester {
    /// Creates a new tester with an empty observation sequence.
    pub fn new(filter: SequentialFilter) -> Self {
        let trace = filter.filter(&[]);
        Self {
            filter,
            observations: Vec::new(),
            trace,
        }
    }

    /// Creates a new tester from a maze string and sensor accuracy.
    ///
    /// # Panics
    ///
    /// Panics if the maze cannot be parsed or the filter cannot be built.
    #[track_caller]
    pub fn from_str(maze: &str, accuracy: f64) -> Self {
        Self::with_config(maze, FilterConfig::new(accuracy))
    }

    /// Creates a new tester from a maze string and full configuration.
    ///
    /// # Panics
    ///
    /// Panics if the maze cannot be parsed or the filter cannot be built.
    #[track_caller]
    pub fn with_config(maze: &str, config: FilterConfig) -> Self {
        let maze: Maze = maze.parse().unwrap();
        Self::new(SequentialFilter::new(&maze, config).unwrap())
    }

    /// Returns the trace of every observation made so far.
    pub fn trace(&self) -> &FilterTrace {
        &self.trace
    }

    /// Returns the latest belief.
    pub fn belief(&self) -> &BeliefVector {
        self.trace.last()
    }

    /// Feeds one observation to the filter.
    ///
    /// The full trace is recomputed from the start, which also checks that
    /// filtering is deterministic.
    #[track_caller]
    pub fn observe(mut self, color: Color) -> Self {
        let expected = self.filter.step(self.trace.last(), color);
        self.observations.push(color);
        self.trace = self.filter.filter(&self.observations);
        assert_eq!(
            self.trace.last(),
            &expected.belief,
            "Expected re-filtering to reproduce the incremental step after {color}"
        );
        self
    }

    /// Feeds several observations in order.
    #[track_caller]
    pub fn observe_all(self, colors: &[Color]) -> Self {
        colors.iter().fold(self, |tester, &color| tester.observe(color))
    }

    /// Asserts that every floor cell holds the same weight and every wall holds zero.
    #[track_caller]
    pub fn assert_uniform_over_floor(self) -> Self {
        let index = self.filter.state_index();
        let belief = self.belief();
        let floor: Vec<_> = index
            .floor_states()
            .map(|(state, _)| belief[state.index()])
            .collect();
        let first = floor[0];
        assert!(first > 0.0, "Expected positive floor weight, but got {first}");
        for (state, _) in index.floor_states() {
            let weight = belief[state.index()];
            assert!(
                (weight - first).abs() < TOLERANCE,
                "Expected uniform weight {first} at {}, but got {weight}",
                index.cell_of(state)
            );
        }
        self.assert_walls_empty()
    }

    /// Asserts that every wall state holds exactly zero weight.
    #[track_caller]
    pub fn assert_walls_empty(self) -> Self {
        let index = self.filter.state_index();
        for state in index.states().filter(|&state| !index.is_floor(state)) {
            let weight = self.belief()[state.index()];
            assert_eq!(
                weight,
                0.0,
                "Expected wall at {} to hold no weight, but got {weight}",
                index.cell_of(state)
            );
        }
        self
    }

    /// Asserts that `cell` holds exactly zero weight.
    #[track_caller]
    pub fn assert_zero_at(self, cell: Cell) -> Self {
        let weight = self.filter.belief_at(self.belief(), cell).unwrap();
        assert_eq!(weight, 0.0, "Expected no weight at {cell}, but got {weight}");
        self
    }

    /// Asserts that every cell whose color differs from `color` holds exactly zero weight.
    #[track_caller]
    pub fn assert_zero_unless_color(self, color: Color) -> Self {
        let index = self.filter.state_index();
        let cells: Vec<_> = index
            .states()
            .filter(|&state| index.color_of(state) != Some(color))
            .map(|state| index.cell_of(state))
            .collect();
        cells
            .into_iter()
            .fold(self, |tester, cell| tester.assert_zero_at(cell))
    }

    /// Asserts that the latest update produced the zero vector.
    #[track_caller]
    pub fn assert_diverged(self) -> Self {
        let t = self.trace.len() - 1;
        assert!(
            self.trace.diverged().contains(&t),
            "Expected divergence at t = {t}, but diverged at {:?}",
            self.trace.diverged()
        );
        assert!(self.belief().is_zero(), "Expected a zero belief at t = {t}");
        self
    }

    /// Asserts that no update so far produced the zero vector.
    #[track_caller]
    pub fn assert_not_diverged(self) -> Self {
        assert!(
            !self.trace.has_diverged(),
            "Expected no divergence, but diverged at {:?}",
            self.trace.diverged()
        );
        self.assert_normalized()
    }

    /// Asserts that the latest belief is scaled as the configured normalization requires.
    #[track_caller]
    pub fn assert_normalized(self) -> Self {
        if self.trace.len() > 1 {
            let (measure, value) = match self.filter.config().normalization {
                Normalization::Euclidean => ("norm", self.belief().norm()),
                Normalization::Probability => ("sum", self.belief().sum()),
            };
            assert!(
                (value - 1.0).abs() < TOLERANCE,
                "Expected belief {measure} to be 1, but got {value}"
            );
        }
        self
    }

    /// Asserts that `cell` is the strictly highest-weighted cell.
    #[track_caller]
    pub fn assert_most_likely(self, cell: Cell) -> Self {
        let best = self.filter.most_likely(self.belief());
        assert_eq!(
            best.map(|(c, _)| c),
            Some(cell),
            "Expected {cell} to be most likely, but got {best:?}"
        );
        let weight = self.filter.belief_at(self.belief(), cell).unwrap();
        let index = self.filter.state_index();
        for state in index.states() {
            let other = index.cell_of(state);
            if other != cell {
                let other_weight = self.belief()[state.index()];
                assert!(
                    other_weight < weight,
                    "Expected {other} ({other_weight}) to weigh less than {cell} ({weight})"
                );
            }
        }
        self
    }
}
