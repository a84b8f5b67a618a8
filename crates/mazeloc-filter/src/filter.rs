use mazeloc_core::{AccuracyError, Cell, Color, GridOracle, SensorAccuracy};

use crate::{
    BeliefVector, Normalization, SensorModel, StateIndex, TransitionModel, render::TraceRender,
};

/// Errors returned when a [`SequentialFilter`] cannot be built.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum FilterError {
    /// The configured sensor accuracy is not a probability.
    #[display("invalid filter configuration: {_0}")]
    Accuracy(#[from] AccuracyError),
    /// The grid has no floor cell to be localized in.
    #[display("invalid filter configuration: grid has no floor cells")]
    NoFloorCells,
}

/// Configuration of a [`SequentialFilter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Probability that the sensor reports the true color, in `[0, 1]`.
    pub accuracy: f64,
    /// How beliefs are rescaled after each observation.
    pub normalization: Normalization,
}

impl FilterConfig {
    /// Creates a configuration with the given accuracy and Euclidean normalization.
    #[must_use]
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy,
            ..Self::default()
        }
    }

    /// Returns this configuration with a different normalization policy.
    #[must_use]
    pub fn with_normalization(self, normalization: Normalization) -> Self {
        Self {
            normalization,
            ..self
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            accuracy: SensorAccuracy::DEFAULT.get(),
            normalization: Normalization::default(),
        }
    }
}

/// The result of one filter update.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStep {
    /// The updated belief.
    pub belief: BeliefVector,
    /// `true` if the update produced an all-zero belief.
    ///
    /// The observation was impossible under the model given the previous
    /// belief. Every later update from a zero belief stays zero.
    pub diverged: bool,
}

/// Beliefs produced by a filtering run, one per timestep.
///
/// Entry `0` is the starting distribution; entry `t` for `t >= 1` is the
/// belief after the `t`-th observation.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTrace {
    beliefs: Vec<BeliefVector>,
    observations: Vec<Color>,
    diverged: Vec<usize>,
}

impl FilterTrace {
    fn new(start: BeliefVector) -> Self {
        Self {
            beliefs: vec![start],
            observations: Vec::new(),
            diverged: Vec::new(),
        }
    }

    fn push(&mut self, observation: Color, step: FilterStep) {
        if step.diverged {
            self.diverged.push(self.beliefs.len());
        }
        self.observations.push(observation);
        self.beliefs.push(step.belief);
    }

    /// Returns the number of timesteps, including `t = 0`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    /// Always `false`: a trace holds at least the starting distribution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    /// Returns the belief at timestep `t`.
    #[must_use]
    pub fn get(&self, t: usize) -> Option<&BeliefVector> {
        self.beliefs.get(t)
    }

    /// Returns the belief after the last observation.
    #[must_use]
    pub fn last(&self) -> &BeliefVector {
        // never empty: `new` stores the starting distribution
        &self.beliefs[self.beliefs.len() - 1]
    }

    /// Returns all beliefs in timestep order.
    #[must_use]
    pub fn beliefs(&self) -> &[BeliefVector] {
        &self.beliefs
    }

    /// Returns the observation consumed at timestep `t`, for `t >= 1`.
    #[must_use]
    pub fn observation(&self, t: usize) -> Option<Color> {
        t.checked_sub(1)
            .and_then(|i| self.observations.get(i))
            .copied()
    }

    /// Returns the observations in the order they were consumed.
    #[must_use]
    pub fn observations(&self) -> &[Color] {
        &self.observations
    }

    /// Returns the timesteps whose update produced an all-zero belief.
    #[must_use]
    pub fn diverged(&self) -> &[usize] {
        &self.diverged
    }

    /// Returns `true` if any update diverged.
    #[must_use]
    pub fn has_diverged(&self) -> bool {
        !self.diverged.is_empty()
    }
}

/// A hidden Markov model forward filter over maze cells.
///
/// The filter keeps a weight for every grid cell. Each observation first
/// propagates the weights through the [`TransitionModel`], then multiplies
/// them by the [`SensorModel`] likelihood of the observed color, then
/// rescales according to the configured [`Normalization`].
///
/// All models are built once in [`SequentialFilter::new`] and never change.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Color, Maze};
/// use mazeloc_filter::{FilterConfig, SequentialFilter};
///
/// let maze: Maze = "
///     RGB
///     YRG
/// "
/// .parse()?;
/// let filter = SequentialFilter::new(&maze, FilterConfig::new(1.0))?;
///
/// let trace = filter.filter(&[Color::Yellow]);
/// assert_eq!(trace.len(), 2);
/// assert!(!trace.has_diverged());
/// assert_eq!(filter.most_likely(trace.last()).map(|(cell, _)| cell), Some(Cell::new(0, 0)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SequentialFilter {
    config: FilterConfig,
    index: StateIndex,
    transition: TransitionModel,
    sensor: SensorModel,
}

impl SequentialFilter {
    /// Builds the state index, transition matrix, and sensor matrices for `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Accuracy`] if the configured accuracy is outside
    /// `[0, 1]`, and [`FilterError::NoFloorCells`] if `grid` has no floor cell.
    pub fn new<G>(grid: &G, config: FilterConfig) -> Result<Self, FilterError>
    where
        G: GridOracle + ?Sized,
    {
        let accuracy = SensorAccuracy::new(config.accuracy)?;
        let index = StateIndex::new(grid);
        if index.floor_count() == 0 {
            return Err(FilterError::NoFloorCells);
        }
        let transition = TransitionModel::new(grid, &index);
        let sensor = SensorModel::new(&index, accuracy);
        log::debug!(
            "built filter over {}x{} grid: {} states, {} floor, accuracy {accuracy}",
            index.width(),
            index.height(),
            index.len(),
            index.floor_count()
        );
        Ok(Self {
            config,
            index,
            transition,
            sensor,
        })
    }

    /// Returns the configuration the filter was built with.
    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Returns the cell/state mapping.
    #[must_use]
    pub fn state_index(&self) -> &StateIndex {
        &self.index
    }

    /// Returns the motion model.
    #[must_use]
    pub fn transition(&self) -> &TransitionModel {
        &self.transition
    }

    /// Returns the sensor model.
    #[must_use]
    pub fn sensor(&self) -> &SensorModel {
        &self.sensor
    }

    /// Returns the prior: uniform over floor states, zero on walls.
    #[must_use]
    pub fn starting_distribution(&self) -> BeliefVector {
        #[expect(clippy::cast_precision_loss)]
        let p = 1.0 / self.index.floor_count() as f64;
        self.index
            .states()
            .map(|state| if self.index.is_floor(state) { p } else { 0.0 })
            .collect::<Vec<_>>()
            .into()
    }

    /// Propagates `belief` through one timestep of motion: `belief · Tᵀ`.
    #[must_use]
    pub fn predict(&self, belief: &BeliefVector) -> BeliefVector {
        belief.mul(self.transition.transposed())
    }

    /// Performs one forward update with the observation `color`.
    ///
    /// # Panics
    ///
    /// Panics if `prev` was not produced for this filter's state space.
    #[must_use]
    pub fn step(&self, prev: &BeliefVector, color: Color) -> FilterStep {
        let intermediate = self.predict(prev);
        let unnormalized = intermediate.mul_diagonal(self.sensor.matrix(color));
        // Same zero test the normalization uses before dividing.
        let diverged = unnormalized.is_zero();
        let belief = self.config.normalization.apply(&unnormalized);
        FilterStep { belief, diverged }
    }

    /// Runs the forward recursion over `observations`.
    ///
    /// The returned trace has `observations.len() + 1` beliefs. A timestep
    /// whose update has zero norm is recorded in [`FilterTrace::diverged`]
    /// and its belief is the zero vector; filtering continues regardless.
    #[must_use]
    pub fn filter(&self, observations: &[Color]) -> FilterTrace {
        let mut trace = FilterTrace::new(self.starting_distribution());
        for (i, &color) in observations.iter().enumerate() {
            let t = i + 1;
            let step = self.step(trace.last(), color);
            if step.diverged {
                log::warn!("filter diverged at t = {t}: observation {color} is impossible under the model");
            } else {
                log::trace!("t = {t}: observed {color}");
            }
            trace.push(color, step);
        }
        trace
    }

    /// Returns the weight `belief` assigns to `cell`, or `None` if `cell` is outside the grid.
    #[must_use]
    pub fn belief_at(&self, belief: &BeliefVector, cell: Cell) -> Option<f64> {
        self.index.state_of(cell).map(|state| belief[state.index()])
    }

    /// Returns the highest-weighted cell and its weight.
    ///
    /// Ties resolve to the lowest state id. Returns `None` for a zero belief.
    #[must_use]
    pub fn most_likely(&self, belief: &BeliefVector) -> Option<(Cell, f64)> {
        let (state, weight) = self
            .index
            .states()
            .map(|state| (state, belief[state.index()]))
            .fold(None, |best: Option<(_, f64)>, (state, weight)| match best {
                Some((_, w)) if w >= weight => best,
                _ => Some((state, weight)),
            })?;
        (weight > 0.0).then(|| (self.index.cell_of(state), weight))
    }

    /// Returns a renderer that prints every belief in `trace` as a grid table.
    #[must_use]
    pub fn render<'a>(&'a self, trace: &'a FilterTrace) -> TraceRender<'a> {
        TraceRender::new(&self.index, trace)
    }
}
