//! Error types for the rrt-sketch core.

use thiserror::Error;

/// Errors produced by tree construction and grower dispatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// A region dimension, resolution, step limit, or radius was out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A nearest-neighbor or steering query ran over an empty candidate set.
    ///
    /// The point set always holds the root, so this signals a broken internal
    /// invariant rather than bad input.
    #[error("empty candidate set: nearest-neighbor query has nothing to scan")]
    EmptyCandidateSet,

    /// Re-parenting `child` under `parent` would close a loop in the tree.
    #[error("cycle detected: node {parent} descends from node {child}, cannot adopt it")]
    CycleDetected { child: usize, parent: usize },

    /// A grower name was not recognized by the registry.
    #[error("unknown grower: {0}")]
    UnknownGrower(String),
}
