//! Shared helpers for planner integration tests.
//!
//! Provides axis-aligned obstacle worlds over the unit square and a
//! scripted state space whose "random" samples replay a fixed sequence,
//! which makes single expansions reproducible enough to assert on.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use marga_plan::space::{DiscreteMotionValidator, RealVectorSpace, StateSpace};
use rand::rngs::StdRng;

/// Axis-aligned 2-D obstacle.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, s: &[f64]) -> bool {
        s[0] >= self.min[0] && s[0] <= self.max[0] && s[1] >= self.min[1] && s[1] <= self.max[1]
    }
}

/// Predicate accepting states outside every obstacle.
pub fn free_space(
    obstacles: Vec<Aabb>,
) -> impl Fn(&Vec<f64>) -> bool + Clone {
    move |s: &Vec<f64>| !obstacles.iter().any(|o| o.contains(s))
}

/// Validator over the unit square with the given obstacles.
pub fn unit_square_validator(
    obstacles: Vec<Aabb>,
) -> DiscreteMotionValidator<RealVectorSpace, impl Fn(&Vec<f64>) -> bool + Clone> {
    DiscreteMotionValidator::new(RealVectorSpace::unit_square(), 0.005, free_space(obstacles))
}

/// Two rooms separated by a wall with a single narrow gap.
///
/// The wall spans `x in [0.48, 0.52]`; the gap leaves `y` in
/// `(gap_center - gap/2, gap_center + gap/2)` open.
pub fn narrow_passage_obstacles(gap: f64) -> Vec<Aabb> {
    let half = gap / 2.0;
    vec![
        Aabb::new([0.48, 0.0], [0.52, 0.5 - half]),
        Aabb::new([0.48, 0.5 + half], [0.52, 1.0]),
    ]
}

/// A solid block that swallows the goal region entirely.
pub fn blocked_goal_obstacles() -> Vec<Aabb> {
    vec![Aabb::new([0.6, 0.6], [1.0, 1.0])]
}

/// State space whose uniform samples replay a scripted sequence.
///
/// Distance, interpolation, and extent delegate to the wrapped
/// Euclidean space; only sampling is overridden. Panics when the
/// script runs dry, so tests must budget exactly as many iterations as
/// samples.
pub struct ScriptedSpace {
    inner: RealVectorSpace,
    samples: RefCell<VecDeque<Vec<f64>>>,
}

impl ScriptedSpace {
    pub fn new(inner: RealVectorSpace, samples: Vec<Vec<f64>>) -> Self {
        Self {
            inner,
            samples: RefCell::new(samples.into()),
        }
    }
}

impl StateSpace for ScriptedSpace {
    type State = Vec<f64>;

    fn alloc_state(&self) -> Vec<f64> {
        self.inner.alloc_state()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn maximum_extent(&self) -> f64 {
        self.inner.maximum_extent()
    }

    fn distance(&self, a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        self.inner.distance(a, b)
    }

    fn interpolate(&self, from: &Vec<f64>, to: &Vec<f64>, t: f64, out: &mut Vec<f64>) {
        self.inner.interpolate(from, to, t, out);
    }

    fn sample_uniform(&self, _rng: &mut StdRng, out: &mut Vec<f64>) {
        let next = self
            .samples
            .borrow_mut()
            .pop_front()
            .expect("scripted sample sequence exhausted");
        out.clone_from(&next);
    }
}
