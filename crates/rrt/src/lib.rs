#![deny(unsafe_code)]
//! Rapidly-exploring random tree growth over a frontier grid.
//!
//! A [`TreeBuilder`] lays a regular grid of candidate points over the drawing
//! region and, one tick at a time, connects a randomly chosen candidate to the
//! tree. Two variants are available:
//!
//! - [`Variant::Basic`]: plain RRT. Each new point hangs off its nearest tree
//!   node. Fast, but paths wander.
//! - [`Variant::Star`]: RRT*. Each new point picks the cheapest parent in its
//!   neighborhood, then offers itself as a shortcut to its neighbors. Slower,
//!   and the resulting network converges toward shortest paths from the root.
//!
//! Growth is snapped to the grid: a step that cannot reach its sample in one
//! stride lands on the frontier cell nearest the stride's end.

pub mod frontier;
pub mod tree;

use rrt_sketch_core::geometry::{closest, steer_toward, within_radius};
use rrt_sketch_core::params::{param_f64, param_usize};
use rrt_sketch_core::{Edge, Grower, Point, RandomSource, TreeError, Xorshift64};
use serde_json::{json, Value};

pub use frontier::Frontier;
pub use tree::{NodeId, Tree, TreeNode};

/// Default grid spacing: ten cells per region unit.
const DEFAULT_RESOLUTION: f64 = 0.1;
/// Default maximum edge length per growth step.
const DEFAULT_STEP_LIMIT: f64 = 0.3;
/// Default RRT* neighborhood radius.
const DEFAULT_NEIGHBORHOOD_RADIUS: f64 = 0.4;
/// Default number of admitted points before the builder stops.
const DEFAULT_ITERATION_BUDGET: usize = 1500;

/// Which growth rule [`TreeBuilder::advance`] applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    Basic,
    #[default]
    Star,
}

impl Variant {
    /// Registry name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Basic => "rrt",
            Variant::Star => "rrt-star",
        }
    }
}

/// Tunable parameters for tree growth.
///
/// `root: None` places the root at the center of the region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrtParams {
    /// Spacing between frontier grid points.
    pub resolution: f64,
    /// Maximum edge length per growth step (before grid snapping).
    pub step_limit: f64,
    /// Radius scanned for parent candidates and rewiring (RRT* only).
    pub neighborhood_radius: f64,
    /// Number of points admitted before the builder reports exhaustion.
    pub iteration_budget: usize,
    /// Where the tree starts.
    pub root: Option<Point>,
}

impl Default for RrtParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            step_limit: DEFAULT_STEP_LIMIT,
            neighborhood_radius: DEFAULT_NEIGHBORHOOD_RADIUS,
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            root: None,
        }
    }
}

impl RrtParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// The root is only taken from JSON when both `root_x` and `root_y` are
    /// numbers.
    pub fn from_json(params: &Value) -> Self {
        let root = match (
            params.get("root_x").and_then(Value::as_f64),
            params.get("root_y").and_then(Value::as_f64),
        ) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };
        Self {
            resolution: param_f64(params, "resolution", DEFAULT_RESOLUTION),
            step_limit: param_f64(params, "step_limit", DEFAULT_STEP_LIMIT),
            neighborhood_radius: param_f64(
                params,
                "neighborhood_radius",
                DEFAULT_NEIGHBORHOOD_RADIUS,
            ),
            iteration_budget: param_usize(params, "iteration_budget", DEFAULT_ITERATION_BUDGET),
            root,
        }
    }

    /// Rejects configurations that cannot produce a tree.
    pub fn validate(&self, width: f64, height: f64) -> Result<(), TreeError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) {
            return Err(invalid(format!(
                "region must have positive area, got {width}x{height}"
            )));
        }
        if !positive(self.resolution) {
            return Err(invalid(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if !positive(self.step_limit) {
            return Err(invalid(format!(
                "step_limit must be positive, got {}",
                self.step_limit
            )));
        }
        if self.neighborhood_radius.is_nan() || self.neighborhood_radius < 0.0 {
            return Err(invalid(format!(
                "neighborhood_radius must be non-negative, got {}",
                self.neighborhood_radius
            )));
        }
        if let Some(root) = self.root {
            if !root.is_finite() {
                return Err(invalid(format!("root must be finite, got {root}")));
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> TreeError {
    TreeError::InvalidConfiguration(msg)
}

/// Incremental RRT / RRT* tree builder.
///
/// Owns the tree, the frontier, the remaining budget, and the random source.
/// Drive it with [`advance`](TreeBuilder::advance) once per tick until it
/// returns `Ok(false)`.
#[derive(Debug, Clone)]
pub struct TreeBuilder<R = Xorshift64> {
    params: RrtParams,
    variant: Variant,
    tree: Tree,
    frontier: Frontier,
    budget: usize,
    steps: usize,
    rewires: usize,
    rng: R,
}

impl TreeBuilder<Xorshift64> {
    /// Creates a builder from a JSON params object and an integer seed.
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        variant: Variant,
        json_params: &Value,
    ) -> Result<Self, TreeError> {
        Self::new(
            width,
            height,
            RrtParams::from_json(json_params),
            variant,
            Xorshift64::new(seed),
        )
    }
}

impl<R: RandomSource> TreeBuilder<R> {
    /// Creates a builder with the root pre-seeded and the frontier laid out.
    ///
    /// Returns `TreeError::InvalidConfiguration` if the region, resolution,
    /// step limit, neighborhood radius, or root is out of range.
    pub fn new(
        width: f64,
        height: f64,
        params: RrtParams,
        variant: Variant,
        rng: R,
    ) -> Result<Self, TreeError> {
        params.validate(width, height)?;
        let root = params
            .root
            .unwrap_or_else(|| Point::new(width / 2.0, height / 2.0));
        let frontier = Frontier::grid(width, height, params.resolution, root)?;
        log::debug!(
            "{} builder: {} frontier cells, budget {}",
            variant.name(),
            frontier.len(),
            params.iteration_budget
        );
        Ok(Self {
            params: RrtParams {
                root: Some(root),
                ..params
            },
            variant,
            tree: Tree::new(root),
            frontier,
            budget: params.iteration_budget,
            steps: 0,
            rewires: 0,
            rng,
        })
    }

    /// Runs one step of the configured variant.
    pub fn advance(&mut self) -> Result<bool, TreeError> {
        match self.variant {
            Variant::Basic => self.advance_basic(),
            Variant::Star => self.advance_rrt_star(),
        }
    }

    /// Plain RRT step: connect the steered point to its nearest tree node.
    pub fn advance_basic(&mut self) -> Result<bool, TreeError> {
        if self.is_exhausted() {
            return Ok(false);
        }
        let (near, target) = self.sample_and_steer()?;
        let pos = self.frontier.take(target);
        self.tree.add_child(near, pos);
        self.finish_step();
        Ok(true)
    }

    /// RRT* step: choose the cheapest parent within the neighborhood, then
    /// rewire neighbors that are cheaper to reach through the new point.
    ///
    /// With no tree node inside the neighborhood the nearest node is used as
    /// parent and nothing is rewired.
    pub fn advance_rrt_star(&mut self) -> Result<bool, TreeError> {
        if self.is_exhausted() {
            return Ok(false);
        }
        let (near, target) = self.sample_and_steer()?;
        let pos = self.frontier.as_slice()[target];
        let radius = self.params.neighborhood_radius;
        let neighbors = within_radius(self.tree.positions(), pos, radius)?;
        let parent = self.cheapest_parent(&neighbors, pos).unwrap_or(near);

        self.frontier.take(target);
        let new_id = self.tree.add_child(parent, pos);
        self.rewire(new_id, &neighbors)?;
        self.finish_step();
        Ok(true)
    }

    /// Draws a frontier sample, finds the nearest tree node, and steers.
    ///
    /// Returns the nearest node and the frontier index to admit.
    fn sample_and_steer(&mut self) -> Result<(NodeId, usize), TreeError> {
        let dest = self.rng.next_index(self.frontier.len());
        let sample = *self
            .frontier
            .as_slice()
            .get(dest)
            .ok_or(TreeError::EmptyCandidateSet)?;
        let near = closest(self.tree.positions(), sample)?;
        let target = steer_toward(
            self.tree.position(near),
            dest,
            self.params.step_limit,
            self.frontier.as_slice(),
        )?;
        Ok((near, target))
    }

    /// Neighbor minimizing `cost(n) + |n - pos|`; first wins ties.
    fn cheapest_parent(&self, neighbors: &[NodeId], pos: Point) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &n in neighbors {
            let via = self.tree.cost(n) + self.tree.position(n).distance(pos);
            match best {
                Some((_, best_via)) if via >= best_via => {}
                _ => best = Some((n, via)),
            }
        }
        best.map(|(n, _)| n)
    }

    fn rewire(&mut self, new_id: NodeId, neighbors: &[NodeId]) -> Result<(), TreeError> {
        let parent = self.tree.parent(new_id);
        let pos = self.tree.position(new_id);
        for &n in neighbors {
            if Some(n) == parent {
                continue;
            }
            let via = self.tree.cost(new_id) + self.tree.position(n).distance(pos);
            if via >= self.tree.cost(n) {
                continue;
            }
            match self.tree.reparent(n, new_id) {
                Ok(()) => self.rewires += 1,
                Err(TreeError::CycleDetected { child, parent }) => {
                    log::trace!("skipped rewire of {child} under {parent}: would form a cycle");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn finish_step(&mut self) {
        self.budget -= 1;
        self.steps += 1;
        if self.is_exhausted() {
            log::debug!(
                "{} builder exhausted after {} steps: {} frontier cells left, {} rewires",
                self.variant.name(),
                self.steps,
                self.frontier.len(),
                self.rewires
            );
        }
    }

    /// True once the budget is spent or every grid cell is connected.
    pub fn is_exhausted(&self) -> bool {
        self.budget == 0 || self.frontier.is_empty()
    }

    /// Every `(parent, child)` segment, in child admission order.
    pub fn current_edges(&self) -> Vec<Edge> {
        self.tree.edges()
    }

    /// Grid points not yet connected.
    pub fn current_frontier(&self) -> &[Point] {
        self.frontier.as_slice()
    }

    /// Admitted points in admission order, root first.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.tree.positions()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Point {
        self.tree.position(Tree::ROOT)
    }

    /// Cached path length from the root to `id`.
    pub fn cost(&self, id: NodeId) -> f64 {
        self.tree.cost(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn remaining_budget(&self) -> usize {
        self.budget
    }

    /// Successful steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Accepted rewires so far (always 0 for the basic variant).
    pub fn rewire_count(&self) -> usize {
        self.rewires
    }

    pub fn total_length(&self) -> f64 {
        self.tree.total_length()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Active parameters, with the root resolved.
    pub fn rrt_params(&self) -> &RrtParams {
        &self.params
    }
}

impl<R: RandomSource> Grower for TreeBuilder<R> {
    fn advance(&mut self) -> Result<bool, TreeError> {
        TreeBuilder::advance(self)
    }

    fn edges(&self) -> Vec<Edge> {
        self.current_edges()
    }

    fn frontier(&self) -> &[Point] {
        self.current_frontier()
    }

    fn params(&self) -> Value {
        let root = self.root();
        json!({
            "variant": self.variant.name(),
            "resolution": self.params.resolution,
            "step_limit": self.params.step_limit,
            "neighborhood_radius": self.params.neighborhood_radius,
            "iteration_budget": self.params.iteration_budget,
            "root_x": root.x,
            "root_y": root.y,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "resolution": {
                "type": "f64",
                "min": 0.0,
                "exclusive_min": true,
                "default": DEFAULT_RESOLUTION,
                "description": "Spacing between frontier grid points"
            },
            "step_limit": {
                "type": "f64",
                "min": 0.0,
                "exclusive_min": true,
                "default": DEFAULT_STEP_LIMIT,
                "description": "Maximum edge length per growth step before grid snapping"
            },
            "neighborhood_radius": {
                "type": "f64",
                "min": 0.0,
                "default": DEFAULT_NEIGHBORHOOD_RADIUS,
                "description": "Radius scanned for cheaper parents and rewiring (rrt-star only)"
            },
            "iteration_budget": {
                "type": "usize",
                "min": 0,
                "default": DEFAULT_ITERATION_BUDGET,
                "description": "Points admitted before growth stops"
            },
            "root_x": {
                "type": "f64",
                "default": "width / 2",
                "description": "Root x coordinate; used only together with root_y"
            },
            "root_y": {
                "type": "f64",
                "default": "height / 2",
                "description": "Root y coordinate; used only together with root_x"
            }
        })
    }
}
