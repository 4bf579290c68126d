//! Segment validity by fixed-resolution subdivision.

use super::{MotionValidator, StateSpace};

/// Motion validator that steps along the interpolated segment and
/// applies a per-state predicate at every step.
///
/// The segment from `a` to `b` is divided into
/// `ceil(distance(a, b) / resolution)` pieces; the predicate runs on
/// each interior interpolant and on both endpoints. A coarse resolution
/// can tunnel through thin obstacles, so pick one below the thinnest
/// feature of the environment.
#[derive(Clone, Debug)]
pub struct DiscreteMotionValidator<SP, F>
where
    SP: StateSpace,
    F: Fn(&SP::State) -> bool,
{
    space: SP,
    predicate: F,
    resolution: f64,
}

impl<SP, F> DiscreteMotionValidator<SP, F>
where
    SP: StateSpace,
    F: Fn(&SP::State) -> bool,
{
    /// Create a validator with an absolute step resolution.
    ///
    /// # Panics
    /// Panics if `resolution` is not strictly positive.
    pub fn new(space: SP, resolution: f64, predicate: F) -> Self {
        assert!(resolution > 0.0, "resolution must be positive");
        Self {
            space,
            predicate,
            resolution,
        }
    }

    /// Step resolution in state-space distance units.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }
}

impl<SP, F> MotionValidator<SP::State> for DiscreteMotionValidator<SP, F>
where
    SP: StateSpace,
    F: Fn(&SP::State) -> bool,
{
    fn is_valid(&self, state: &SP::State) -> bool {
        (self.predicate)(state)
    }

    fn check_motion(&self, from: &SP::State, to: &SP::State) -> bool {
        if !(self.predicate)(from) || !(self.predicate)(to) {
            return false;
        }
        let d = self.space.distance(from, to);
        if d <= self.resolution {
            return true;
        }
        let steps = (d / self.resolution).ceil() as usize;
        let mut scratch = self.space.alloc_state();
        for i in 1..steps {
            let t = i as f64 / steps as f64;
            self.space.interpolate(from, to, t, &mut scratch);
            if !(self.predicate)(&scratch) {
                return false;
            }
        }
        true
    }
}
