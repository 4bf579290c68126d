//! Path-length objective.

use crate::core::Cost;
use crate::space::StateSpace;

use super::OptimizationObjective;

/// Minimizes total path length under the space's distance function.
///
/// State costs are uniform (1.0) so the transition test's
/// self-configured cost scale stays meaningful when this objective is
/// paired with the T-RRT heuristics.
#[derive(Clone, Debug)]
pub struct PathLengthObjective<SP> {
    space: SP,
    cost_threshold: Cost,
}

impl<SP: StateSpace> PathLengthObjective<SP> {
    /// Objective with no sufficiency threshold (plan until terminated).
    pub fn new(space: SP) -> Self {
        Self {
            space,
            cost_threshold: Cost(f64::INFINITY),
        }
    }

    /// Stop as soon as a path at or below `threshold` is found.
    pub fn with_cost_threshold(mut self, threshold: Cost) -> Self {
        self.cost_threshold = threshold;
        self
    }

    /// Current sufficiency threshold.
    pub fn cost_threshold(&self) -> Cost {
        self.cost_threshold
    }
}

impl<SP: StateSpace> OptimizationObjective<SP::State> for PathLengthObjective<SP> {
    fn state_cost(&self, _state: &SP::State) -> Cost {
        Cost(1.0)
    }

    fn motion_cost(&self, a: &SP::State, b: &SP::State) -> Cost {
        Cost(self.space.distance(a, b))
    }

    fn combine(&self, a: Cost, b: Cost) -> Cost {
        Cost(a.0 + b.0)
    }

    fn is_satisfied(&self, c: Cost) -> bool {
        c.0 <= self.cost_threshold.0
    }

    fn is_symmetric(&self) -> bool {
        self.space.has_symmetric_distance()
    }
}
