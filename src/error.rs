//! Error types for marga-plan.

use thiserror::Error;

/// Planner error type.
///
/// Rejected samples, failed motion checks, and heuristic rejections are
/// normal control flow inside the solve loop and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("start state {index} is invalid")]
    InvalidStart { index: usize },

    #[error("no start state provided")]
    NoStartStates,

    #[error("state space returned a non-finite distance")]
    NonFiniteDistance,

    #[error("optimization objective returned a non-finite cost")]
    NonFiniteCost,

    #[error("terminated before any exact or approximate solution was found")]
    NoProgress,
}

pub type Result<T> = std::result::Result<T, PlanError>;
