//! Ball-shaped goal region for real-vector spaces.

use rand::Rng;
use rand::rngs::StdRng;

use super::{Goal, SampleableGoal};

/// Goal region: all points within `radius` of `center` (Euclidean).
#[derive(Clone, Debug)]
pub struct BallGoal {
    center: Vec<f64>,
    radius: f64,
    max_samples: usize,
}

impl BallGoal {
    /// Create a goal ball. `radius` must be non-negative.
    pub fn new(center: Vec<f64>, radius: f64) -> Self {
        assert!(radius >= 0.0, "goal radius must be non-negative");
        Self {
            center,
            radius,
            max_samples: 100,
        }
    }

    /// Cap on the number of goal states the planner will sample.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Center of the region.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Radius of the region.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn distance_to_center(&self, state: &[f64]) -> f64 {
        self.center
            .iter()
            .zip(state.iter())
            .map(|(c, s)| (c - s) * (c - s))
            .sum::<f64>()
            .sqrt()
    }
}

impl Goal<Vec<f64>> for BallGoal {
    fn is_satisfied(&self, state: &Vec<f64>) -> (bool, f64) {
        let d = self.distance_to_center(state);
        (d <= self.radius, (d - self.radius).max(0.0))
    }
}

impl SampleableGoal<Vec<f64>> for BallGoal {
    fn max_sample_count(&self) -> usize {
        self.max_samples
    }

    fn sample_goal(&self, rng: &mut StdRng, out: &mut Vec<f64>) {
        // Rejection sampling in the bounding box; acceptance is ~52% in
        // 3-D and still fine for the dimensions planners run at.
        out.clear();
        out.extend_from_slice(&self.center);
        if self.radius == 0.0 {
            return;
        }
        loop {
            for (o, c) in out.iter_mut().zip(self.center.iter()) {
                *o = c + rng.random_range(-self.radius..self.radius);
            }
            if self.distance_to_center(out) <= self.radius {
                return;
            }
        }
    }
}
