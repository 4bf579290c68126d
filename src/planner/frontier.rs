//! Minimum-expansion control.

/// Frontier / refinement accountant.
///
/// Expansions that steer farther than the frontier threshold push the
/// search into new territory and are always welcome. Short expansions
/// only refine already-covered space; they are admitted as long as the
/// refinement-to-frontier ratio stays below the configured bound.
#[derive(Clone, Debug)]
pub struct MinExpansionControl {
    frontier_count: u64,
    nonfrontier_count: u64,
    frontier_threshold: f64,
    frontier_node_ratio: f64,
}

impl MinExpansionControl {
    /// Create a controller with a resolved (non-auto) threshold.
    pub fn new(frontier_threshold: f64, frontier_node_ratio: f64) -> Self {
        Self {
            // Both counters start at one so the ratio is defined from
            // the first expansion.
            frontier_count: 1,
            nonfrontier_count: 1,
            frontier_threshold,
            frontier_node_ratio,
        }
    }

    /// Frontier nodes accepted so far (including the initial seed).
    pub fn frontier_count(&self) -> u64 {
        self.frontier_count
    }

    /// Refinement nodes accepted so far (including the initial seed).
    pub fn nonfrontier_count(&self) -> u64 {
        self.nonfrontier_count
    }

    /// Restore the initial counters.
    pub fn reset(&mut self) {
        self.frontier_count = 1;
        self.nonfrontier_count = 1;
    }

    /// Decide whether an expansion of length `edge_distance` may enter
    /// the tree.
    pub fn accept(&mut self, edge_distance: f64) -> bool {
        if edge_distance > self.frontier_threshold {
            self.frontier_count += 1;
            return true;
        }
        if self.nonfrontier_count as f64 / self.frontier_count as f64 > self.frontier_node_ratio {
            return false;
        }
        self.nonfrontier_count += 1;
        true
    }
}
