use std::{fmt::Debug, hash::Hash};

use mazeloc_core::{Cell, Direction, GridOracle, MotionModel};

use crate::BeliefSet;

/// A state-space search problem.
///
/// This trait defines what an external search algorithm needs: a start state,
/// successor generation, a goal test, a cost model, and an optional heuristic.
/// States must be hashable so the search can detect revisits and self-loops.
pub trait SearchProblem {
    /// A search state.
    type State: Debug + Clone + Eq + Hash;
    /// The action labeling a transition between states.
    type Action: Debug + Copy;

    /// Returns the initial state.
    fn start_state(&self) -> Self::State;

    /// Returns every `(action, next_state)` pair reachable from `state` in one step.
    fn successors(&self, state: &Self::State) -> Vec<(Self::Action, Self::State)>;

    /// Returns `true` if `state` satisfies the goal.
    fn goal_test(&self, state: &Self::State) -> bool;

    /// Returns the accumulated path cost after moving from `from` to `to`.
    ///
    /// The default charges 1 per transition.
    fn step_cost(&self, cost: usize, _from: &Self::State, _to: &Self::State) -> usize {
        cost + 1
    }

    /// Returns an estimate of the remaining cost from `state` to a goal.
    ///
    /// The default is `0`, which reduces A* to uniform-cost search.
    fn heuristic(&self, _state: &Self::State) -> usize {
        0
    }
}

/// The outcome of advancing a [`BeliefSet`] in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The attempted direction.
    pub direction: Direction,
    /// The resulting belief set.
    pub state: BeliefSet,
    /// Number of candidates that moved to a neighbor.
    pub moved: usize,
    /// Number of candidates that bumped into a wall or boundary and stayed.
    pub bumped: usize,
    /// Number of candidates that merged with another after landing.
    pub merged: usize,
}

impl Advance {
    /// Returns `true` if the move changed nothing: every candidate bumped.
    ///
    /// Such a move is a self-loop in the search graph.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.moved == 0
    }
}

/// Sensorless localization as a search over belief sets.
///
/// The start state is every floor cell (total ignorance). Each action is one
/// attempted move in a cardinal direction, applied to every candidate at once:
/// a candidate whose neighbor is floor moves there, any other candidate stays.
/// A goal state is a belief set with exactly one member.
///
/// Because candidates only ever move or stay and then merge, a belief set
/// never grows.
#[derive(Debug, Clone)]
pub struct SensorlessProblem<G> {
    motion: MotionModel<G>,
}

impl<G> SensorlessProblem<G>
where
    G: GridOracle,
{
    /// Creates the problem for `grid`.
    #[must_use]
    pub const fn new(grid: G) -> Self {
        Self {
            motion: MotionModel::new(grid),
        }
    }

    /// Returns the motion model used to advance belief sets.
    #[must_use]
    pub const fn motion(&self) -> &MotionModel<G> {
        &self.motion
    }

    /// Advances every candidate in `state` one step in `direction`.
    ///
    /// Candidates are first moved (or left in place by a bump) and the
    /// landing cells are then merged with [`BeliefSet::merge`].
    #[must_use]
    pub fn advance(&self, state: &BeliefSet, direction: Direction) -> Advance {
        let mut moved = 0;
        let mut targets: Vec<Cell> = Vec::with_capacity(state.len());
        for cell in state {
            let target = self.motion.bump(cell, direction);
            if target != cell {
                moved += 1;
            }
            targets.push(target);
        }
        let bumped = targets.len() - moved;
        let (next, merged) = BeliefSet::merge(&targets);
        log::trace!(
            "advance {direction}: {} -> {} candidates (moved {moved}, bumped {bumped}, merged {merged})",
            state.len(),
            next.len()
        );
        Advance {
            direction,
            state: next,
            moved,
            bumped,
            merged,
        }
    }

    /// Applies `moves` in order from the start state.
    ///
    /// Returns every visited belief set, starting with the start state, so the
    /// result has `moves.len() + 1` entries.
    #[must_use]
    pub fn follow(&self, moves: &[Direction]) -> Vec<BeliefSet> {
        let mut states = Vec::with_capacity(moves.len() + 1);
        let mut state = self.start_state();
        for &direction in moves {
            let next = self.advance(&state, direction).state;
            states.push(state);
            state = next;
        }
        states.push(state);
        states
    }
}

impl<G> SearchProblem for SensorlessProblem<G>
where
    G: GridOracle,
{
    type State = BeliefSet;
    type Action = Direction;

    fn start_state(&self) -> BeliefSet {
        self.motion.grid().floor_cells().into_iter().collect()
    }

    /// Returns exactly four successors, one per direction in N, S, E, W order.
    fn successors(&self, state: &BeliefSet) -> Vec<(Direction, BeliefSet)> {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, self.advance(state, direction).state))
            .collect()
    }

    fn goal_test(&self, state: &BeliefSet) -> bool {
        state.len() == 1
    }

    /// Returns the number of candidates still to be eliminated.
    fn heuristic(&self, state: &BeliefSet) -> usize {
        state.len().saturating_sub(1)
    }
}
