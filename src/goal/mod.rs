//! Goal abstraction.

mod region;

pub use region::BallGoal;

use rand::rngs::StdRng;

/// A goal condition over states.
pub trait Goal<S> {
    /// Evaluate `state` against the goal.
    ///
    /// Returns the satisfaction flag together with the distance from the
    /// goal (zero or less-than-tolerance when satisfied). The distance
    /// feeds approximate-solution tracking, so it must be meaningful for
    /// unsatisfied states too.
    fn is_satisfied(&self, state: &S) -> (bool, f64);
}

/// A goal the planner can draw states from, enabling goal-biased
/// sampling.
pub trait SampleableGoal<S>: Goal<S> {
    /// Maximum number of distinct goal states worth sampling.
    fn max_sample_count(&self) -> usize;

    /// Whether sampling can currently produce a state.
    fn can_sample(&self) -> bool {
        self.max_sample_count() > 0
    }

    /// Draw a goal state into `out`.
    fn sample_goal(&self, rng: &mut StdRng, out: &mut S);
}
