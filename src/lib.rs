//! # Marga-Plan: Sampling-Based Optimal Motion Planning
//!
//! An asymptotically-optimal motion planner: RRT*'s rewiring tree
//! search with the cost-biased admission heuristics of Transition-RRT
//! available behind a switch. The planner grows a tree of motions from
//! the start states, connects it to a goal region, and keeps rewiring
//! so that the path cost converges toward the optimum of a
//! user-supplied objective.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_plan::{
//!     BallGoal, PathLengthObjective, RealVectorSpace, RrtStar, RrtStarConfig,
//!     TerminationCondition,
//! };
//! use marga_plan::space::AlwaysValid;
//!
//! // Plan across the unit square, no obstacles.
//! let space = RealVectorSpace::unit_square();
//! let objective = PathLengthObjective::new(space.clone());
//! let config = RrtStarConfig::default().with_range(0.2).with_seed(1);
//! let mut planner = RrtStar::new(space, AlwaysValid, objective, config).unwrap();
//!
//! let goal = BallGoal::new(vec![1.0, 1.0], 0.05);
//! let solution = planner
//!     .solve(&[vec![0.0, 0.0]], &goal, &TerminationCondition::iterations(2000))
//!     .unwrap();
//! println!("cost {} over {} states", solution.cost, solution.path.len());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    planner/                         │  ← Solve loop, heuristics,
//! │   (rrt_star, transition, frontier, termination)     │    config, tree export
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌───────────┬────────────┴───────────┬───────────────┐
//! │  space/   │  objective/   goal/    │     nn/       │  ← Collaborator seams
//! │ (states,  │  (costs)     (regions) │  (neighbor    │    (traits + provided
//! │ validity) │                        │   index)      │     implementations)
//! └───────────┴────────────────────────┴───────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │              (Cost, motion tree arena)              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The planner only touches configurations through the [`space`] seam,
//! costs through the [`objective`] seam, and goal membership through
//! the [`goal`] seam, so the same solve loop plans in any space those
//! traits can describe.
//!
//! ## Determinism
//!
//! With a nonzero `seed` in [`RrtStarConfig`] and deterministic
//! collaborators, a solve produces the identical tree on every run, and
//! [`RrtStar::clear`] rewinds the planner so the next solve replays it.

pub mod core;
pub mod error;
pub mod goal;
pub mod nn;
pub mod objective;
pub mod planner;
pub mod space;

// Core types
pub use crate::core::{Cost, Motion, MotionId, MotionTree};
pub use error::{PlanError, Result};

// Collaborator seams and provided implementations
pub use goal::{BallGoal, Goal, SampleableGoal};
pub use nn::{LinearIndex, NearestNeighbors};
pub use objective::{OptimizationObjective, PathLengthObjective};
pub use space::{AlwaysValid, DiscreteMotionValidator, MotionValidator, RealVectorSpace, StateSpace};

// Planner
pub use planner::{
    MinExpansionControl, PlannerData, PlannerStatus, PlannerVertex, RrtStar, RrtStarConfig,
    Solution, TerminationCondition, TransitionTest,
};
