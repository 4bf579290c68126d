//! Bounded Euclidean configuration space.

use rand::Rng;
use rand::rngs::StdRng;

use super::StateSpace;

/// An axis-aligned box in R^n with Euclidean distance and linear
/// interpolation. States are coordinate vectors.
#[derive(Clone, Debug)]
pub struct RealVectorSpace {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl RealVectorSpace {
    /// Create a space bounded by `low` and `high` per dimension.
    ///
    /// # Panics
    /// Panics if the bound vectors differ in length, are empty, or any
    /// lower bound exceeds its upper bound.
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Self {
        assert_eq!(low.len(), high.len(), "bound vectors must match in length");
        assert!(!low.is_empty(), "space must have at least one dimension");
        for (l, h) in low.iter().zip(high.iter()) {
            assert!(l <= h, "lower bound {} exceeds upper bound {}", l, h);
        }
        Self { low, high }
    }

    /// Axis-aligned cube `[low, high]^dim`.
    pub fn cube(dim: usize, low: f64, high: f64) -> Self {
        Self::new(vec![low; dim], vec![high; dim])
    }

    /// The unit square `[0, 1]^2`.
    pub fn unit_square() -> Self {
        Self::cube(2, 0.0, 1.0)
    }

    /// Lower bounds per dimension.
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Upper bounds per dimension.
    pub fn high(&self) -> &[f64] {
        &self.high
    }
}

impl StateSpace for RealVectorSpace {
    type State = Vec<f64>;

    fn alloc_state(&self) -> Vec<f64> {
        vec![0.0; self.low.len()]
    }

    fn dimension(&self) -> usize {
        self.low.len()
    }

    fn maximum_extent(&self) -> f64 {
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(l, h)| (h - l) * (h - l))
            .sum::<f64>()
            .sqrt()
    }

    fn distance(&self, a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    fn interpolate(&self, from: &Vec<f64>, to: &Vec<f64>, t: f64, out: &mut Vec<f64>) {
        out.clear();
        out.extend(from.iter().zip(to.iter()).map(|(f, g)| f + (g - f) * t));
    }

    fn sample_uniform(&self, rng: &mut StdRng, out: &mut Vec<f64>) {
        out.clear();
        out.extend(
            self.low
                .iter()
                .zip(self.high.iter())
                .map(|(&l, &h)| if l < h { rng.random_range(l..h) } else { l }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_distance_euclidean() {
        let space = RealVectorSpace::unit_square();
        let a = vec![0.0, 0.0];
        let b = vec![3.0, 4.0];
        assert!((space.distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_midpoint() {
        let space = RealVectorSpace::unit_square();
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        let mut out = space.alloc_state();
        space.interpolate(&a, &b, 0.5, &mut out);
        assert_eq!(out, vec![0.5, 1.0]);
    }

    #[test]
    fn test_maximum_extent_is_diagonal() {
        let space = RealVectorSpace::unit_square();
        assert!((space.maximum_extent() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let space = RealVectorSpace::new(vec![-1.0, 2.0], vec![1.0, 5.0]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = space.alloc_state();
        for _ in 0..1000 {
            space.sample_uniform(&mut rng, &mut s);
            assert!(s[0] >= -1.0 && s[0] < 1.0);
            assert!(s[1] >= 2.0 && s[1] < 5.0);
        }
    }

    #[test]
    fn test_sampling_is_deterministic_per_seed() {
        let space = RealVectorSpace::unit_square();
        let mut a = space.alloc_state();
        let mut b = space.alloc_state();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        space.sample_uniform(&mut rng1, &mut a);
        space.sample_uniform(&mut rng2, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn test_mismatched_bounds_panic() {
        RealVectorSpace::new(vec![0.0], vec![1.0, 2.0]);
    }
}
