//! Planner core: configuration, termination, heuristics, solve loop,
//! and tree export.

mod config;
mod data;
mod frontier;
mod rrt_star;
mod termination;
mod transition;

pub use config::RrtStarConfig;
pub use data::{PlannerData, PlannerVertex};
pub use frontier::MinExpansionControl;
pub use rrt_star::{PlannerStatus, RrtStar, Solution};
pub use termination::TerminationCondition;
pub use transition::TransitionTest;
