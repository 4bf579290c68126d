//! Asymptotically-optimal rapidly-exploring random tree planner.
//!
//! Grows a tree of motions from the start states, steering each
//! expansion toward a random sample, wiring every new motion to the
//! cheapest collision-free parent in its k-nearest neighborhood, and
//! rewiring neighbors through the new motion whenever that strictly
//! lowers their accumulated cost. Two optional cost-biased gates (a
//! Metropolis transition test and a minimum-expansion control) can
//! modulate which expansions enter the tree; with the gates off the
//! planner is plain RRT*.

use std::cmp::Ordering;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Cost, MotionId, MotionTree};
use crate::error::{PlanError, Result};
use crate::goal::SampleableGoal;
use crate::nn::{LinearIndex, NearestNeighbors};
use crate::objective::OptimizationObjective;
use crate::space::{MotionValidator, StateSpace};

use super::config::RrtStarConfig;
use super::data::{PlannerData, PlannerVertex};
use super::frontier::MinExpansionControl;
use super::termination::TerminationCondition;
use super::transition::TransitionTest;

/// Fraction of the maximum extent used when the steering range
/// self-configures.
const AUTO_RANGE_FRACTION: f64 = 0.2;

/// Fraction of the maximum extent used when the frontier threshold
/// self-configures.
const AUTO_FRONTIER_FRACTION: f64 = 0.01;

/// Samples drawn when the transition test's cost scale self-configures.
const COST_SAMPLE_COUNT: usize = 1000;

/// Outcome classification of a successful solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlannerStatus {
    /// The path ends inside the goal.
    ExactSolution,
    /// The path ends at the motion that came closest to the goal.
    ApproximateSolution,
}

/// A planned path and its bookkeeping.
#[derive(Clone, Debug)]
pub struct Solution<S> {
    /// Exact or approximate.
    pub status: PlannerStatus,
    /// States from the start root to the final motion.
    pub path: Vec<S>,
    /// Accumulated cost of the path under the objective.
    pub cost: Cost,
    /// Remaining distance from the goal (zero for exact solutions).
    pub approximate_distance: f64,
    /// Whether the cost meets the objective's sufficiency predicate.
    pub satisfies_objective: bool,
}

impl<S> Solution<S> {
    /// True when the path reaches the goal.
    pub fn is_exact(&self) -> bool {
        self.status == PlannerStatus::ExactSolution
    }
}

/// Strict-weak-order comparison of two cached cost indices.
///
/// Sorting candidate parents reduces to the objective's strict
/// better-than relation over the indexed costs; the finiteness checks
/// in the solve loop keep the relation a valid strict weak order.
fn compare_cost_indices<S, O: OptimizationObjective<S>>(
    objective: &O,
    costs: &[Cost],
    a: usize,
    b: usize,
) -> Ordering {
    if objective.is_better_than(costs[a], costs[b]) {
        Ordering::Less
    } else if objective.is_better_than(costs[b], costs[a]) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// RRT* planner with optional transition-test heuristics.
pub struct RrtStar<SP, V, O, N = LinearIndex<MotionId>>
where
    SP: StateSpace,
    V: MotionValidator<SP::State>,
    O: OptimizationObjective<SP::State>,
    N: NearestNeighbors<MotionId>,
{
    space: SP,
    validator: V,
    objective: O,
    config: RrtStarConfig,

    tree: MotionTree<SP::State>,
    nn: N,
    rng: StdRng,
    transition: TransitionTest,
    expansion: MinExpansionControl,

    goal_motions: Vec<MotionId>,
    last_goal_motion: Option<MotionId>,
    best_cost: Cost,
    iterations: u64,
    collision_checks: u64,

    range: f64,
    k_rrg: f64,
}

impl<SP, V, O> RrtStar<SP, V, O, LinearIndex<MotionId>>
where
    SP: StateSpace,
    V: MotionValidator<SP::State>,
    O: OptimizationObjective<SP::State>,
{
    /// Create a planner backed by the brute-force neighbor index.
    pub fn new(space: SP, validator: V, objective: O, config: RrtStarConfig) -> Result<Self> {
        Self::with_index(space, validator, objective, config, LinearIndex::new())
    }
}

impl<SP, V, O, N> RrtStar<SP, V, O, N>
where
    SP: StateSpace,
    V: MotionValidator<SP::State>,
    O: OptimizationObjective<SP::State>,
    N: NearestNeighbors<MotionId>,
{
    /// Create a planner with a custom nearest-neighbor index.
    ///
    /// Zero-valued `range`, `frontier_threshold`, and `k_constant`
    /// parameters are resolved here from the space and objective.
    pub fn with_index(
        space: SP,
        validator: V,
        objective: O,
        config: RrtStarConfig,
        nn: N,
    ) -> Result<Self> {
        config.validate()?;

        let extent = space.maximum_extent();
        let range = if config.range > 0.0 {
            config.range
        } else {
            AUTO_RANGE_FRACTION * extent
        };
        let frontier_threshold = if config.frontier_threshold > 0.0 {
            config.frontier_threshold
        } else {
            AUTO_FRONTIER_FRACTION * extent
        };
        let k_constant = if config.k_constant > 0.0 {
            config.k_constant
        } else {
            // Resolved with a dedicated RNG so repeated solves after
            // clear() replay the exact same sampling stream.
            let mut setup_rng = Self::make_rng(config.seed ^ 0x5eed_c0de);
            objective
                .average_state_cost(&space, &mut setup_rng, COST_SAMPLE_COUNT)
                .value()
        };

        let d = space.dimension() as f64;
        let k_rrg = std::f64::consts::E + std::f64::consts::E / d;

        debug!(
            "[RrtStar] configured: range={:.4} frontier_threshold={:.4} k_constant={:.4} k_rrg={:.3}",
            range, frontier_threshold, k_constant, k_rrg
        );

        let transition = TransitionTest::new(
            config.init_temperature,
            config.min_temperature,
            config.temp_change_factor,
            config.max_states_failed,
            k_constant,
        );
        let expansion = MinExpansionControl::new(frontier_threshold, config.frontier_node_ratio);
        let rng = Self::make_rng(config.seed);
        let best_cost = objective.infinite_cost();

        Ok(Self {
            space,
            validator,
            objective,
            config,
            tree: MotionTree::new(),
            nn,
            rng,
            transition,
            expansion,
            goal_motions: Vec::new(),
            last_goal_motion: None,
            best_cost,
            iterations: 0,
            collision_checks: 0,
            range,
            k_rrg,
        })
    }

    fn make_rng(seed: u64) -> StdRng {
        if seed == 0 {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(seed)
        }
    }

    /// The configuration the planner was built with.
    pub fn config(&self) -> &RrtStarConfig {
        &self.config
    }

    /// Resolved steering range.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Solve iterations performed since construction or `clear`.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Collision checks performed since construction or `clear`.
    pub fn collision_checks(&self) -> u64 {
        self.collision_checks
    }

    /// Best goal-path cost achieved so far (infinite until a goal
    /// motion exists). Monotonically non-increasing.
    pub fn best_cost(&self) -> Cost {
        self.best_cost
    }

    /// The search tree (read-only).
    pub fn tree(&self) -> &MotionTree<SP::State> {
        &self.tree
    }

    /// Number of goal motions found so far.
    pub fn num_goal_motions(&self) -> usize {
        self.goal_motions.len()
    }

    /// Number of motions in the nearest-neighbor index (always equal to
    /// the tree size).
    pub fn index_size(&self) -> usize {
        self.nn.len()
    }

    /// Drop the whole tree and reset every counter, heuristic, and the
    /// RNG, returning the planner to its freshly-constructed state.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.nn.clear();
        self.goal_motions.clear();
        self.last_goal_motion = None;
        self.best_cost = self.objective.infinite_cost();
        self.iterations = 0;
        self.collision_checks = 0;
        self.transition.reset();
        self.expansion.reset();
        self.rng = Self::make_rng(self.config.seed);
    }

    /// Export the search tree.
    pub fn planner_data(&self) -> PlannerData<SP::State> {
        let mut vertices = Vec::with_capacity(self.tree.len());
        let mut edges = Vec::new();
        let mut start_indices = Vec::new();
        for id in self.tree.ids() {
            let motion = self.tree.get(id);
            vertices.push(PlannerVertex {
                state: motion.state().clone(),
            });
            match motion.parent() {
                Some(parent) => edges.push((parent.index(), id.index())),
                None => start_indices.push(id.index()),
            }
        }
        PlannerData {
            vertices,
            edges,
            start_indices,
            goal_index: self.last_goal_motion.map(MotionId::index),
            iterations: self.iterations,
            collision_checks: self.collision_checks,
        }
    }

    /// Grow the tree until the termination condition fires or a path
    /// satisfying the objective is found.
    ///
    /// The first call seeds the tree from `starts`; later calls keep
    /// growing the same tree. Returns the best exact solution if one
    /// exists, otherwise the closest approximate one.
    pub fn solve<G>(
        &mut self,
        starts: &[SP::State],
        goal: &G,
        termination: &TerminationCondition,
    ) -> Result<Solution<SP::State>>
    where
        G: SampleableGoal<SP::State>,
    {
        if self.tree.is_empty() {
            if starts.is_empty() {
                return Err(PlanError::NoStartStates);
            }
            for (index, state) in starts.iter().enumerate() {
                if !self.validator.is_valid(state) {
                    return Err(PlanError::InvalidStart { index });
                }
            }
            let identity = self.objective.identity_cost();
            for state in starts {
                let root = self.tree.add_root(state.clone(), identity);
                self.nn.add(root);
            }
        }

        // Heuristic state is per-solve.
        self.transition.reset();
        self.expansion.reset();

        let sym_dist = self.space.has_symmetric_distance();
        let sym_interp = self.space.has_symmetric_interpolate();
        let sym_cost = self.objective.is_symmetric();
        let symmetric = sym_dist && sym_interp;

        let mut rstate = self.space.alloc_state();
        let mut xstate = self.space.alloc_state();
        let mut nbh: Vec<MotionId> = Vec::new();
        let mut inc_costs: Vec<Cost> = Vec::new();
        let mut costs: Vec<Cost> = Vec::new();
        let mut order: Vec<usize> = Vec::new();
        // Per-neighbor segment validity: 0 unknown, 1 valid, 2 invalid.
        let mut valid: Vec<u8> = Vec::new();

        let mut solve_iterations: u64 = 0;
        let mut approx_dist = f64::INFINITY;
        let mut approx_motion: Option<MotionId> = None;
        let mut sufficient = false;

        debug!(
            "[RrtStar] solve: {} motions in tree, range={:.4}, delay_cc={}, gates={}",
            self.tree.len(),
            self.range,
            self.config.delay_collision_checking,
            self.config.use_transition_test
        );

        'iterations: while !termination.should_stop(solve_iterations) {
            solve_iterations += 1;
            self.iterations += 1;

            // Sample, biased toward the goal region.
            if self.config.goal_bias > 0.0
                && goal.can_sample()
                && self.goal_motions.len() < goal.max_sample_count()
                && self.rng.random::<f64>() < self.config.goal_bias
            {
                goal.sample_goal(&mut self.rng, &mut rstate);
            } else {
                self.space.sample_uniform(&mut self.rng, &mut rstate);
            }

            // Nearest existing motion.
            let Some(nmotion) = self
                .nn
                .nearest(|id| self.space.distance(self.tree.get(*id).state(), &rstate))
            else {
                break;
            };

            // Steer toward the sample, clamped to the range.
            let d = self.space.distance(self.tree.get(nmotion).state(), &rstate);
            if !d.is_finite() {
                return Err(PlanError::NonFiniteDistance);
            }
            let steered = d > self.range;
            let motion_distance = if steered {
                self.space.interpolate(
                    self.tree.get(nmotion).state(),
                    &rstate,
                    self.range / d,
                    &mut xstate,
                );
                self.space.distance(self.tree.get(nmotion).state(), &xstate)
            } else {
                d
            };
            let dstate: &SP::State = if steered { &xstate } else { &rstate };

            // The segment must be collision-free.
            self.collision_checks += 1;
            if !self
                .validator
                .check_motion(self.tree.get(nmotion).state(), dstate)
            {
                continue;
            }

            // Cost-biased admission gates (inert unless enabled).
            if self.config.use_transition_test {
                let child_cost = self.objective.state_cost(dstate).value();
                let parent_cost = self
                    .objective
                    .state_cost(self.tree.get(nmotion).state())
                    .value();
                if !self
                    .transition
                    .accept(&mut self.rng, child_cost, parent_cost, motion_distance)
                {
                    trace!("[RrtStar] transition test rejected slope over {:.4}", motion_distance);
                    continue;
                }
                if !self.expansion.accept(motion_distance) {
                    self.transition.record_expansion_failure();
                    trace!("[RrtStar] min-expansion control rejected refinement");
                    continue;
                }
            }

            let m_state = dstate.clone();

            // k-nearest neighborhood, measured from each candidate
            // parent toward the new state.
            let k = (self.k_rrg * ((self.nn.len() + 1) as f64).ln()).ceil() as usize;
            self.nn.nearest_k(
                k,
                |id| self.space.distance(self.tree.get(*id).state(), &m_state),
                &mut nbh,
            );

            // Default wiring: the already-checked nearest motion.
            let inc0 = self
                .objective
                .motion_cost(self.tree.get(nmotion).state(), &m_state);
            if !inc0.is_finite() {
                return Err(PlanError::NonFiniteCost);
            }
            let cost0 = self.objective.combine(self.tree.get(nmotion).cost(), inc0);

            let mut parent = nmotion;
            let mut parent_inc = inc0;
            let mut parent_total = cost0;

            inc_costs.clear();
            costs.clear();
            valid.clear();
            valid.resize(nbh.len(), 0);

            if self.config.delay_collision_checking {
                // Cache every candidate's edge and total cost, then
                // collision-check in ascending cost order, stopping at
                // the first valid parent.
                for &nb in &nbh {
                    let inc = if nb == nmotion {
                        inc0
                    } else {
                        self.objective
                            .motion_cost(self.tree.get(nb).state(), &m_state)
                    };
                    if !inc.is_finite() {
                        return Err(PlanError::NonFiniteCost);
                    }
                    inc_costs.push(inc);
                    costs.push(self.objective.combine(self.tree.get(nb).cost(), inc));
                }

                order.clear();
                order.extend(0..nbh.len());
                order.sort_unstable_by(|&a, &b| {
                    compare_cost_indices::<SP::State, O>(&self.objective, &costs, a, b)
                });

                for &i in &order {
                    let nb = nbh[i];
                    if nb == nmotion {
                        if symmetric {
                            valid[i] = 1;
                        }
                        parent = nb;
                        parent_inc = inc_costs[i];
                        parent_total = costs[i];
                        break;
                    }
                    self.collision_checks += 1;
                    if self
                        .validator
                        .check_motion(self.tree.get(nb).state(), &m_state)
                    {
                        if symmetric {
                            valid[i] = 1;
                        }
                        parent = nb;
                        parent_inc = inc_costs[i];
                        parent_total = costs[i];
                        break;
                    } else if symmetric {
                        valid[i] = 2;
                    }
                }
            } else {
                // Eager: collision-check only candidates that would
                // actually improve on the current wiring.
                for i in 0..nbh.len() {
                    let nb = nbh[i];
                    let inc = if nb == nmotion {
                        inc0
                    } else {
                        self.objective
                            .motion_cost(self.tree.get(nb).state(), &m_state)
                    };
                    if !inc.is_finite() {
                        return Err(PlanError::NonFiniteCost);
                    }
                    let total = self.objective.combine(self.tree.get(nb).cost(), inc);
                    inc_costs.push(inc);
                    costs.push(total);

                    if nb == nmotion {
                        if symmetric {
                            valid[i] = 1;
                        }
                        continue;
                    }
                    if self.objective.is_better_than(total, parent_total) {
                        self.collision_checks += 1;
                        if self
                            .validator
                            .check_motion(self.tree.get(nb).state(), &m_state)
                        {
                            if symmetric {
                                valid[i] = 1;
                            }
                            parent = nb;
                            parent_inc = inc;
                            parent_total = total;
                        } else if symmetric {
                            valid[i] = 2;
                        }
                    }
                }
            }

            // Insert the motion under its chosen parent.
            let m = self.tree.add_child(parent, m_state, parent_inc, parent_total);
            self.nn.add(m);

            let mut check_for_solution = false;

            // Rewire the neighborhood through the new motion. With an
            // asymmetric distance the neighborhood is re-queried in the
            // opposite orientation and the caches no longer apply.
            if !sym_dist {
                self.nn.nearest_k(
                    k,
                    |id| {
                        self.space
                            .distance(self.tree.get(m).state(), self.tree.get(*id).state())
                    },
                    &mut nbh,
                );
                inc_costs.clear();
                costs.clear();
                valid.clear();
                valid.resize(nbh.len(), 0);
            }

            for i in 0..nbh.len() {
                let nb = nbh[i];
                // Roots keep the identity cost and never re-parent.
                if nb == m || nb == parent || self.tree.get(nb).parent().is_none() {
                    continue;
                }

                let nbh_inc = if sym_dist && sym_cost && i < inc_costs.len() {
                    inc_costs[i]
                } else {
                    self.objective
                        .motion_cost(self.tree.get(m).state(), self.tree.get(nb).state())
                };
                if !nbh_inc.is_finite() {
                    return Err(PlanError::NonFiniteCost);
                }
                let nbh_new = self.objective.combine(self.tree.get(m).cost(), nbh_inc);

                if self.objective.is_better_than(nbh_new, self.tree.get(nb).cost()) {
                    let motion_valid = if symmetric && valid[i] != 0 {
                        valid[i] == 1
                    } else {
                        self.collision_checks += 1;
                        self.validator
                            .check_motion(self.tree.get(m).state(), self.tree.get(nb).state())
                    };
                    if motion_valid {
                        self.tree.remove_from_parent(nb);
                        self.tree.reparent(nb, m, nbh_inc, nbh_new);
                        self.tree
                            .update_descendant_costs(nb, |a, b| self.objective.combine(a, b));
                        check_for_solution = true;
                    }
                }
            }

            // Goal test.
            let (satisfied, dist_from_goal) = goal.is_satisfied(self.tree.get(m).state());
            if satisfied {
                self.goal_motions.push(m);
                check_for_solution = true;
            }

            // Solution bookkeeping over every goal motion whose cost
            // may have changed.
            if check_for_solution {
                for idx in 0..self.goal_motions.len() {
                    let g = self.goal_motions[idx];
                    let c = self.tree.get(g).cost();
                    if self.objective.is_better_than(c, self.best_cost) {
                        debug!(
                            "[RrtStar] best cost improved to {} at iteration {}",
                            c, self.iterations
                        );
                        self.best_cost = c;
                        self.last_goal_motion = Some(g);
                    }
                    if self.objective.is_satisfied(c) {
                        self.last_goal_motion = Some(g);
                        sufficient = true;
                        break 'iterations;
                    }
                }
            }

            // Track how close the tree got while no goal motion exists.
            if self.goal_motions.is_empty() && dist_from_goal < approx_dist {
                approx_dist = dist_from_goal;
                approx_motion = Some(m);
            }
        }

        if let Some(goal_motion) = self.last_goal_motion {
            let cost = self.tree.get(goal_motion).cost();
            debug!(
                "[RrtStar] exact solution: cost {} after {} iterations, {} motions, {} collision checks",
                cost,
                solve_iterations,
                self.tree.len(),
                self.collision_checks
            );
            return Ok(Solution {
                status: PlannerStatus::ExactSolution,
                path: self.extract_path(goal_motion),
                cost,
                approximate_distance: 0.0,
                satisfies_objective: sufficient || self.objective.is_satisfied(cost),
            });
        }

        if let Some(motion) = approx_motion {
            let cost = self.tree.get(motion).cost();
            debug!(
                "[RrtStar] approximate solution: {:.4} from goal after {} iterations",
                approx_dist, solve_iterations
            );
            return Ok(Solution {
                status: PlannerStatus::ApproximateSolution,
                path: self.extract_path(motion),
                cost,
                approximate_distance: approx_dist,
                satisfies_objective: false,
            });
        }

        debug!("[RrtStar] no progress after {} iterations", solve_iterations);
        Err(PlanError::NoProgress)
    }

    /// States from the root down to `motion`.
    fn extract_path(&self, motion: MotionId) -> Vec<SP::State> {
        let mut ids = self.tree.path_to_root(motion);
        ids.reverse();
        ids.into_iter()
            .map(|id| self.tree.get(id).state().clone())
            .collect()
    }
}
