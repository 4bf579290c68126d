//! Metropolis transition test with adaptive temperature.

use rand::Rng;
use rand::rngs::StdRng;

/// Cost-biased acceptance gate.
///
/// Downhill motions (child cost at or below parent cost) always pass.
/// Uphill motions pass with probability `exp(-slope / (k * temp))`
/// where `slope` is the cost increase per unit of edge distance. The
/// temperature falls on every uphill acceptance and rises after a
/// streak of rejections, trading exploitation against the ability to
/// climb cost barriers.
#[derive(Clone, Debug)]
pub struct TransitionTest {
    temp: f64,
    num_states_failed: u32,
    max_states_failed: u32,
    temp_change_factor: f64,
    min_temperature: f64,
    init_temperature: f64,
    k_constant: f64,
}

impl TransitionTest {
    /// Create a test with a resolved (non-auto) cost scale `k_constant`.
    pub fn new(
        init_temperature: f64,
        min_temperature: f64,
        temp_change_factor: f64,
        max_states_failed: u32,
        k_constant: f64,
    ) -> Self {
        Self {
            temp: init_temperature,
            num_states_failed: 0,
            max_states_failed,
            temp_change_factor,
            min_temperature,
            init_temperature,
            k_constant,
        }
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temp
    }

    /// Consecutive rejections since the last schedule change.
    pub fn states_failed(&self) -> u32 {
        self.num_states_failed
    }

    /// Restore the initial temperature and clear the failure streak.
    pub fn reset(&mut self) {
        self.temp = self.init_temperature;
        self.num_states_failed = 0;
    }

    /// Count an expansion rejected elsewhere (the minimum-expansion
    /// control) toward the failure streak, biasing the schedule toward
    /// raising the temperature.
    pub fn record_expansion_failure(&mut self) {
        self.num_states_failed = self.num_states_failed.saturating_add(1);
    }

    /// Decide whether to accept a motion whose endpoint costs
    /// `child_cost` against a parent costing `parent_cost`, over an
    /// edge of length `edge_distance`.
    pub fn accept(
        &mut self,
        rng: &mut StdRng,
        child_cost: f64,
        parent_cost: f64,
        edge_distance: f64,
    ) -> bool {
        if child_cost <= parent_cost {
            return true;
        }

        let slope = (child_cost - parent_cost) / edge_distance;
        let p = (-slope / (self.k_constant * self.temp)).exp();

        if rng.random::<f64>() <= p {
            if self.temp > self.min_temperature {
                self.temp = (self.temp / self.temp_change_factor).max(self.min_temperature);
            }
            self.num_states_failed = 0;
            true
        } else {
            if self.num_states_failed >= self.max_states_failed {
                self.temp *= self.temp_change_factor;
                self.num_states_failed = 0;
            } else {
                self.num_states_failed += 1;
            }
            false
        }
    }
}
