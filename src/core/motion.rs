//! Arena-backed motion tree.
//!
//! The search tree is a forest of `Motion` records stored in a flat
//! arena and addressed by [`MotionId`]. Parent/child links are ids, not
//! pointers, so the nearest-neighbor index can hold non-owning
//! references safely and the structure has no reference cycles to
//! manage.
//!
//! Invariants maintained by the mutating operations:
//! - a non-root motion appears exactly once in its parent's child list,
//! - `cost == combine(parent.cost, inc_cost)` for every non-root,
//! - the parent relation is acyclic and every motion is reachable from
//!   a root.

use crate::core::Cost;

/// Index of a motion in the tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionId(u32);

impl MotionId {
    /// Arena slot of this motion.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the search tree.
///
/// Owns its configuration-space state. The accumulated `cost` is the
/// objective's combination of every edge cost from the root down to
/// this motion; `inc_cost` is the cost of the single edge from the
/// parent.
#[derive(Clone, Debug)]
pub struct Motion<S> {
    pub(crate) state: S,
    pub(crate) parent: Option<MotionId>,
    pub(crate) children: Vec<MotionId>,
    pub(crate) inc_cost: Cost,
    pub(crate) cost: Cost,
}

impl<S> Motion<S> {
    /// The configuration this motion represents.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Parent motion, `None` for roots.
    #[inline]
    pub fn parent(&self) -> Option<MotionId> {
        self.parent
    }

    /// Child motions, in insertion order.
    #[inline]
    pub fn children(&self) -> &[MotionId] {
        &self.children
    }

    /// Cost of the edge from the parent to this motion.
    #[inline]
    pub fn inc_cost(&self) -> Cost {
        self.inc_cost
    }

    /// Accumulated cost from the root to this motion.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }
}

/// Flat arena holding the whole forest.
#[derive(Clone, Debug, Default)]
pub struct MotionTree<S> {
    nodes: Vec<Motion<S>>,
}

impl<S> MotionTree<S> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of motions in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access a motion by id.
    #[inline]
    pub fn get(&self, id: MotionId) -> &Motion<S> {
        &self.nodes[id.index()]
    }

    /// Iterate over all motion ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = MotionId> + '_ {
        (0..self.nodes.len() as u32).map(MotionId)
    }

    /// Insert a root motion with the given accumulated cost.
    pub fn add_root(&mut self, state: S, cost: Cost) -> MotionId {
        let id = MotionId(self.nodes.len() as u32);
        self.nodes.push(Motion {
            state,
            parent: None,
            children: Vec::new(),
            inc_cost: cost,
            cost,
        });
        id
    }

    /// Insert a motion as a child of `parent`.
    ///
    /// The caller supplies the edge cost and the already-combined
    /// accumulated cost so that the tree never has to know the
    /// objective's combinator.
    pub fn add_child(&mut self, parent: MotionId, state: S, inc_cost: Cost, cost: Cost) -> MotionId {
        let id = MotionId(self.nodes.len() as u32);
        self.nodes.push(Motion {
            state,
            parent: Some(parent),
            children: Vec::new(),
            inc_cost,
            cost,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Remove `id` from its parent's child list.
    ///
    /// The motion's own parent link is left untouched; callers either
    /// re-parent the motion immediately or drop the whole tree.
    pub fn remove_from_parent(&mut self, id: MotionId) {
        if let Some(parent) = self.nodes[id.index()].parent {
            let children = &mut self.nodes[parent.index()].children;
            if let Some(pos) = children.iter().position(|&c| c == id) {
                children.remove(pos);
            }
        }
    }

    /// Re-parent `id` under `new_parent` with updated edge costs.
    ///
    /// `id` must already have been removed from its previous parent's
    /// child list via [`remove_from_parent`](Self::remove_from_parent).
    pub fn reparent(&mut self, id: MotionId, new_parent: MotionId, inc_cost: Cost, cost: Cost) {
        let node = &mut self.nodes[id.index()];
        node.parent = Some(new_parent);
        node.inc_cost = inc_cost;
        node.cost = cost;
        self.nodes[new_parent.index()].children.push(id);
    }

    /// Recompute every descendant's accumulated cost from `id` down.
    ///
    /// Uses an explicit work stack; tree depth can reach the iteration
    /// count for long thin trees, so recursion is off the table.
    pub fn update_descendant_costs<F>(&mut self, id: MotionId, combine: F)
    where
        F: Fn(Cost, Cost) -> Cost,
    {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent_cost = self.nodes[current.index()].cost;
            for i in 0..self.nodes[current.index()].children.len() {
                let child = self.nodes[current.index()].children[i];
                let node = &mut self.nodes[child.index()];
                node.cost = combine(parent_cost, node.inc_cost);
                stack.push(child);
            }
        }
    }

    /// Walk parent links from `id` up to its root.
    ///
    /// Returns ids in goal-to-root order; callers reverse for a
    /// root-to-goal path.
    pub fn path_to_root(&self, id: MotionId) -> Vec<MotionId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.nodes[current.index()].parent {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Drop every motion and its owned state.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn set_cost(&mut self, id: MotionId, cost: Cost) {
        self.nodes[id.index()].cost = cost;
    }
}
