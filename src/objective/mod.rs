//! Optimization objectives.
//!
//! An objective defines what "better" means for the planner: the cost
//! of visiting a state, the cost of an edge, how edge costs accumulate
//! along a path, and when a path cost is good enough to stop.

mod path_length;

pub use path_length::PathLengthObjective;

use rand::rngs::StdRng;

use crate::core::Cost;
use crate::space::StateSpace;

/// Cost functional the planner optimizes.
pub trait OptimizationObjective<S> {
    /// Cost of being at `state`.
    fn state_cost(&self, state: &S) -> Cost;

    /// Cost of the motion segment from `a` to `b`.
    fn motion_cost(&self, a: &S, b: &S) -> Cost;

    /// Accumulate two costs. Must be associative.
    fn combine(&self, a: Cost, b: Cost) -> Cost;

    /// Cost of an empty path (the accumulation identity).
    fn identity_cost(&self) -> Cost {
        Cost(0.0)
    }

    /// A cost worse than every achievable path cost.
    fn infinite_cost(&self) -> Cost {
        Cost(f64::INFINITY)
    }

    /// Strict "is better than" relation.
    fn is_better_than(&self, a: Cost, b: Cost) -> bool {
        a.0 < b.0
    }

    /// Whether a path of cost `c` satisfies the objective, allowing the
    /// planner to stop early.
    fn is_satisfied(&self, c: Cost) -> bool;

    /// Whether `motion_cost(a, b) == motion_cost(b, a)` for all states.
    fn is_symmetric(&self) -> bool {
        true
    }

    /// Mean state cost over `n` uniform samples.
    ///
    /// Used to self-configure the transition test's cost scale.
    fn average_state_cost<SP>(&self, space: &SP, rng: &mut StdRng, n: usize) -> Cost
    where
        SP: StateSpace<State = S>,
    {
        if n == 0 {
            return self.identity_cost();
        }
        let mut scratch = space.alloc_state();
        let mut total = 0.0;
        for _ in 0..n {
            space.sample_uniform(rng, &mut scratch);
            total += self.state_cost(&scratch).0;
        }
        Cost(total / n as f64)
    }
}
