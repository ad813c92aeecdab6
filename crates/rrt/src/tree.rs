//! Arena-backed spanning tree with cached path costs.
//!
//! Nodes are addressed by their admission index. The root is always node 0.
//! Each node caches its cost (path length from the root); re-parenting a node
//! refreshes the cached cost of its whole subtree.

use rrt_sketch_core::{Edge, Point, TreeError};

/// Identifier for a node in a [`Tree`].
///
/// An index into the admission order, stable for the lifetime of the tree.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub pos: Point,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub cost: f64,
}

impl TreeNode {
    fn new_root(pos: Point) -> Self {
        Self {
            pos,
            parent: None,
            children: Vec::with_capacity(4),
            cost: 0.0,
        }
    }

    fn new_child(pos: Point, parent: NodeId, cost: f64) -> Self {
        Self {
            pos,
            parent: Some(parent),
            children: Vec::with_capacity(4),
            cost,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    pub fn new(root: Point) -> Self {
        Self {
            nodes: vec![TreeNode::new_root(root)],
        }
    }

    /// Number of admitted points, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is present from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Node positions in admission order, for nearest-neighbor scans.
    pub fn positions(&self) -> impl Iterator<Item = &Point> + '_ {
        self.nodes.iter().map(|n| &n.pos)
    }

    pub fn position(&self, id: NodeId) -> Point {
        self.nodes[id].pos
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Cached path length from the root to `id`.
    pub fn cost(&self, id: NodeId) -> f64 {
        self.nodes[id].cost
    }

    /// Appends a new node under `parent` and returns its id.
    pub fn add_child(&mut self, parent: NodeId, pos: Point) -> NodeId {
        let id = self.nodes.len();
        let cost = self.nodes[parent].cost + self.nodes[parent].pos.distance(pos);
        self.nodes.push(TreeNode::new_child(pos, parent, cost));
        self.nodes[parent].children.push(id);
        id
    }

    /// Whether `ancestor` lies on the parent chain of `node` (or is `node`).
    ///
    /// The walk is capped at the node count so it terminates even on a
    /// corrupted parent table.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        for _ in 0..=self.nodes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.nodes[id].parent,
                None => return false,
            }
        }
        false
    }

    /// Moves `child` (and its subtree) under `new_parent`.
    ///
    /// Fails with `TreeError::CycleDetected` when `new_parent` descends from
    /// `child`; the tree is left untouched in that case. This also rejects any
    /// attempt to re-parent the root.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        if self.is_ancestor(child, new_parent) {
            return Err(TreeError::CycleDetected {
                child,
                parent: new_parent,
            });
        }
        if let Some(old) = self.nodes[child].parent {
            self.nodes[old].children.retain(|&c| c != child);
        }
        self.nodes[child].parent = Some(new_parent);
        self.nodes[new_parent].children.push(child);
        self.refresh_costs(child);
        Ok(())
    }

    /// Recomputes cached costs for `top` and everything below it.
    fn refresh_costs(&mut self, top: NodeId) {
        let mut stack = vec![top];
        while let Some(id) = stack.pop() {
            if let Some(parent) = self.nodes[id].parent {
                let p = &self.nodes[parent];
                let cost = p.cost + p.pos.distance(self.nodes[id].pos);
                self.nodes[id].cost = cost;
            }
            stack.extend_from_slice(&self.nodes[id].children);
        }
    }

    /// Path length from the root to `id`, summed edge by edge along the parent
    /// chain without consulting the cache.
    pub fn path_cost(&self, id: NodeId) -> f64 {
        let mut total = 0.0;
        let mut current = id;
        for _ in 0..self.nodes.len() {
            match self.nodes[current].parent {
                Some(parent) => {
                    total += self.nodes[parent].pos.distance(self.nodes[current].pos);
                    current = parent;
                }
                None => break,
            }
        }
        total
    }

    /// Every `(parent, child)` segment, in child admission order.
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|p| Edge::new(self.nodes[p].pos, n.pos)))
            .collect()
    }

    /// Summed length of every edge: the amount of ink the tree needs.
    pub fn total_length(&self) -> f64 {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|p| self.nodes[p].pos.distance(n.pos)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// root(0,0) -> a(1,0) -> b(2,0) -> c(3,0), plus d(0,1) under the root.
    fn chain() -> Tree {
        let mut t = Tree::new(p(0.0, 0.0));
        let a = t.add_child(Tree::ROOT, p(1.0, 0.0));
        let b = t.add_child(a, p(2.0, 0.0));
        t.add_child(b, p(3.0, 0.0));
        t.add_child(Tree::ROOT, p(0.0, 1.0));
        t
    }

    #[test]
    fn new_tree_holds_only_the_root() {
        let t = Tree::new(p(5.0, 5.0));
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
        assert_eq!(t.parent(Tree::ROOT), None);
        assert_eq!(t.cost(Tree::ROOT), 0.0);
        assert!(t.edges().is_empty());
    }

    #[test]
    fn add_child_assigns_sequential_ids_and_costs() {
        let t = chain();
        assert_eq!(t.len(), 5);
        assert_eq!(t.parent(3), Some(2));
        assert!((t.cost(3) - 3.0).abs() < 1e-12);
        assert!((t.cost(4) - 1.0).abs() < 1e-12);
        assert_eq!(t.nodes()[Tree::ROOT].children, vec![1, 4]);
    }

    #[test]
    fn is_ancestor_follows_parent_chain() {
        let t = chain();
        assert!(t.is_ancestor(Tree::ROOT, 3));
        assert!(t.is_ancestor(1, 3));
        assert!(t.is_ancestor(3, 3));
        assert!(!t.is_ancestor(3, 1));
        assert!(!t.is_ancestor(4, 3));
    }

    #[test]
    fn reparent_onto_descendant_is_rejected() {
        let mut t = chain();
        let err = t.reparent(1, 3).unwrap_err();
        assert_eq!(err, TreeError::CycleDetected { child: 1, parent: 3 });
        assert_eq!(t.parent(1), Some(Tree::ROOT), "tree must be untouched");
    }

    #[test]
    fn reparent_onto_self_is_rejected() {
        let mut t = chain();
        assert!(t.reparent(2, 2).is_err());
    }

    #[test]
    fn reparent_root_is_rejected() {
        let mut t = chain();
        assert!(matches!(
            t.reparent(Tree::ROOT, 4),
            Err(TreeError::CycleDetected { .. })
        ));
        assert_eq!(t.parent(Tree::ROOT), None);
    }

    #[test]
    fn reparent_moves_child_lists_and_refreshes_subtree_costs() {
        let mut t = chain();
        // Move b(2,0) under d(0,1): b's cost becomes 1 + sqrt(5), c follows.
        t.reparent(2, 4).unwrap();
        assert_eq!(t.parent(2), Some(4));
        assert!(t.nodes()[1].children.is_empty());
        assert_eq!(t.nodes()[4].children, vec![2]);
        let expected_b = 1.0 + 5.0_f64.sqrt();
        assert!((t.cost(2) - expected_b).abs() < 1e-12);
        assert!((t.cost(3) - (expected_b + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn path_cost_matches_cache_after_reparenting() {
        let mut t = chain();
        t.reparent(3, 4).unwrap();
        t.reparent(2, 3).unwrap();
        for id in 0..t.len() {
            assert!(
                (t.cost(id) - t.path_cost(id)).abs() < 1e-9,
                "cache drifted at node {id}"
            );
        }
    }

    #[test]
    fn edges_are_in_child_admission_order() {
        let t = chain();
        let edges = t.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], Edge::new(p(0.0, 0.0), p(1.0, 0.0)));
        assert_eq!(edges[3], Edge::new(p(0.0, 0.0), p(0.0, 1.0)));
    }

    #[test]
    fn total_length_sums_edges() {
        let t = chain();
        assert!((t.total_length() - 4.0).abs() < 1e-12);
    }
}
