//! Path cost value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A path or edge cost under some optimization objective.
///
/// The numeric value is only meaningful relative to the objective that
/// produced it; ordering and accumulation go through
/// [`OptimizationObjective`](crate::objective::OptimizationObjective),
/// never through raw comparison of two unrelated costs.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Cost(pub f64);

impl Cost {
    /// Raw cost value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True if the value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
