//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Configuration for [`RrtStar`](crate::planner::RrtStar).
///
/// Parameters marked "0.0 = auto" are resolved from the state space and
/// objective at the start of the first solve.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RrtStarConfig {
    /// Maximum steering distance per expansion.
    /// 0.0 = auto (a fraction of the space's maximum extent).
    pub range: f64,

    /// Probability of sampling from the goal region instead of the
    /// whole space. Range [0, 1]. Default: 0.05
    pub goal_bias: f64,

    /// Sort candidate parents by cost and collision-check lazily in
    /// that order, instead of checking every improving candidate.
    /// Default: true
    pub delay_collision_checking: bool,

    /// Enable the transition test and minimum-expansion control. When
    /// false (the default) both gates are inert and the planner behaves
    /// as plain RRT*.
    pub use_transition_test: bool,

    /// Consecutive transition-test rejections tolerated before the
    /// temperature is raised. Range [1, 1000]. Default: 10
    pub max_states_failed: u32,

    /// Multiplicative temperature step, applied upward on failure
    /// streaks and downward on acceptance. Must exceed 1. Default: 2.0
    pub temp_change_factor: f64,

    /// Floor for the adaptive temperature. Default: 1e-9
    pub min_temperature: f64,

    /// Temperature at the start of each solve. Default: 1e-4
    pub init_temperature: f64,

    /// Steering distance above which an expansion counts as a frontier
    /// node. 0.0 = auto (1% of the space's maximum extent).
    pub frontier_threshold: f64,

    /// Largest tolerated ratio of refinement nodes to frontier nodes.
    /// Default: 0.1
    pub frontier_node_ratio: f64,

    /// Cost scale of the transition test's acceptance probability.
    /// 0.0 = auto (average sampled state cost).
    pub k_constant: f64,

    /// Random seed for deterministic behavior (0 for entropy).
    pub seed: u64,
}

impl Default for RrtStarConfig {
    fn default() -> Self {
        Self {
            range: 0.0,
            goal_bias: 0.05,
            delay_collision_checking: true,
            use_transition_test: false,
            max_states_failed: 10,
            temp_change_factor: 2.0,
            min_temperature: 1e-9,
            init_temperature: 1e-4,
            frontier_threshold: 0.0,
            frontier_node_ratio: 0.1,
            k_constant: 0.0,
            seed: 0,
        }
    }
}

impl RrtStarConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the steering range.
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    /// Builder-style setter for the goal bias.
    pub fn with_goal_bias(mut self, goal_bias: f64) -> Self {
        self.goal_bias = goal_bias;
        self
    }

    /// Builder-style setter for delayed collision checking.
    pub fn with_delayed_collision_checking(mut self, delay: bool) -> Self {
        self.delay_collision_checking = delay;
        self
    }

    /// Builder-style setter for the transition-test gates.
    pub fn with_transition_test(mut self, enabled: bool) -> Self {
        self.use_transition_test = enabled;
        self
    }

    /// Builder-style setter for the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every parameter against its documented range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=10_000.0).contains(&self.range) {
            return Err(PlanError::Config(format!(
                "range must be in [0, 10000], got {}",
                self.range
            )));
        }
        if !(0.0..=1.0).contains(&self.goal_bias) {
            return Err(PlanError::Config(format!(
                "goal_bias must be in [0, 1], got {}",
                self.goal_bias
            )));
        }
        if !(1..=1000).contains(&self.max_states_failed) {
            return Err(PlanError::Config(format!(
                "max_states_failed must be in [1, 1000], got {}",
                self.max_states_failed
            )));
        }
        if !(self.temp_change_factor > 1.0) || self.temp_change_factor > 10.0 {
            return Err(PlanError::Config(format!(
                "temp_change_factor must be in (1, 10], got {}",
                self.temp_change_factor
            )));
        }
        if !(self.min_temperature > 0.0) {
            return Err(PlanError::Config(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if self.init_temperature < self.min_temperature {
            return Err(PlanError::Config(format!(
                "init_temperature {} is below min_temperature {}",
                self.init_temperature, self.min_temperature
            )));
        }
        if self.frontier_threshold < 0.0 {
            return Err(PlanError::Config(format!(
                "frontier_threshold must be non-negative, got {}",
                self.frontier_threshold
            )));
        }
        if !(self.frontier_node_ratio > 0.0) {
            return Err(PlanError::Config(format!(
                "frontier_node_ratio must be positive, got {}",
                self.frontier_node_ratio
            )));
        }
        if self.k_constant < 0.0 {
            return Err(PlanError::Config(format!(
                "k_constant must be non-negative, got {}",
                self.k_constant
            )));
        }
        Ok(())
    }
}
