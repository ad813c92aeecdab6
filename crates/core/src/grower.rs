//! The `Grower` trait every tree-growing algorithm implements.
//!
//! The trait is object-safe so a driver can hold `Box<dyn Grower>` and switch
//! between basic RRT and RRT* at runtime.

use crate::error::TreeError;
use crate::geometry::{Edge, Point};
use serde_json::Value;

/// A step-based tree builder driven once per external tick.
///
/// The driver calls [`advance`](Grower::advance) until it reports `false`,
/// reading [`edges`](Grower::edges) between ticks to animate growth.
pub trait Grower {
    /// Performs one growth step.
    ///
    /// Returns `Ok(true)` if a point was admitted and more work may remain,
    /// `Ok(false)` once the grower is exhausted. Calls after exhaustion are
    /// no-ops that keep returning `Ok(false)`. An `Err` signals a broken
    /// internal invariant and is not recoverable.
    fn advance(&mut self) -> Result<bool, TreeError>;

    /// Every `(parent, child)` segment currently in the tree.
    fn edges(&self) -> Vec<Edge>;

    /// Grid points not yet connected to the tree.
    fn frontier(&self) -> &[Point];

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, and defaults.
    fn param_schema(&self) -> Value;
}
