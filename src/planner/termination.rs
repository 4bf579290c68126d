//! Solve-loop termination conditions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// When the solve loop should give up.
///
/// Polled non-blockingly once per iteration. The stop flag is the one
/// cross-thread channel into the planner: a supervising thread sets it
/// and the loop exits at the next iteration boundary with whatever
/// solution exists.
#[derive(Clone, Debug, Default)]
pub struct TerminationCondition {
    max_iterations: Option<u64>,
    deadline: Option<Instant>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl TerminationCondition {
    /// Never terminate on its own (pair with a stop flag or rely on the
    /// objective's sufficiency threshold).
    pub fn never() -> Self {
        Self::default()
    }

    /// Terminate after `n` iterations of the current solve.
    pub fn iterations(n: u64) -> Self {
        Self {
            max_iterations: Some(n),
            ..Self::default()
        }
    }

    /// Terminate once `duration` has elapsed from now.
    pub fn timeout(duration: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + duration),
            ..Self::default()
        }
    }

    /// Also stop when `flag` becomes true (settable from any thread).
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// Also stop after `n` iterations.
    pub fn with_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Whether the loop should stop, given the iterations completed in
    /// this solve.
    pub fn should_stop(&self, iterations: u64) -> bool {
        if let Some(max) = self.max_iterations
            && iterations >= max
        {
            return true;
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return true;
        }
        if let Some(flag) = &self.stop_flag
            && flag.load(Ordering::Relaxed)
        {
            return true;
        }
        false
    }
}
