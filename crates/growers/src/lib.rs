#![deny(unsafe_code)]
//! Grower registry: maps grower names to tree builders and provides a
//! serializable snapshot of the grown tree.
//!
//! This crate sits between `rrt-sketch-core` (which defines the `Grower`
//! trait) and the drivers, so the CLI and any future front end share one
//! dispatch path.

pub mod snapshot;

use rrt_sketch_core::{Edge, Grower, Point, Seed, TreeError};
use rrt_sketch_rrt::{TreeBuilder, Variant};
use serde_json::Value;

pub use snapshot::Snapshot;

/// All available grower names.
const GROWER_NAMES: &[&str] = &["rrt", "rrt-star"];

/// Enumeration of all available growers.
///
/// Wraps each builder and delegates `Grower` trait methods.
/// Use [`GrowerKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum GrowerKind {
    /// Plain RRT: every point hangs off its nearest neighbor.
    Rrt(TreeBuilder),
    /// RRT*: cheapest-parent selection plus neighborhood rewiring.
    RrtStar(TreeBuilder),
}

impl GrowerKind {
    /// Constructs a grower by name.
    ///
    /// Returns `TreeError::UnknownGrower` if the name is not recognized, or
    /// `TreeError::InvalidConfiguration` if the region or params are out of range.
    pub fn from_name(
        name: &str,
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, TreeError> {
        match name {
            "rrt" => Ok(GrowerKind::Rrt(TreeBuilder::from_json(
                width,
                height,
                seed,
                Variant::Basic,
                params,
            )?)),
            "rrt-star" => Ok(GrowerKind::RrtStar(TreeBuilder::from_json(
                width,
                height,
                seed,
                Variant::Star,
                params,
            )?)),
            _ => Err(TreeError::UnknownGrower(name.to_string())),
        }
    }

    /// Constructs the grower a [`Seed`] describes.
    pub fn from_seed(seed: &Seed) -> Result<Self, TreeError> {
        seed.validate()?;
        Self::from_name(&seed.grower, seed.width, seed.height, seed.seed, &seed.params)
    }

    /// Returns a slice of all recognized grower names.
    pub fn list_growers() -> &'static [&'static str] {
        GROWER_NAMES
    }

    /// The wrapped builder, for statistics the trait does not expose.
    pub fn builder(&self) -> &TreeBuilder {
        match self {
            GrowerKind::Rrt(b) | GrowerKind::RrtStar(b) => b,
        }
    }

    fn builder_mut(&mut self) -> &mut TreeBuilder {
        match self {
            GrowerKind::Rrt(b) | GrowerKind::RrtStar(b) => b,
        }
    }
}

impl Grower for GrowerKind {
    fn advance(&mut self) -> Result<bool, TreeError> {
        self.builder_mut().advance()
    }

    fn edges(&self) -> Vec<Edge> {
        self.builder().current_edges()
    }

    fn frontier(&self) -> &[Point] {
        self.builder().current_frontier()
    }

    fn params(&self) -> Value {
        Grower::params(self.builder())
    }

    fn param_schema(&self) -> Value {
        self.builder().param_schema()
    }
}

/// Advances `grower` until it is exhausted or `max_ticks` steps have been
/// taken (`0` means no tick limit). Returns the number of steps taken.
pub fn grow(grower: &mut dyn Grower, max_ticks: usize) -> Result<usize, TreeError> {
    let mut taken = 0;
    while max_ticks == 0 || taken < max_ticks {
        if !grower.advance()? {
            break;
        }
        taken += 1;
    }
    Ok(taken)
}
