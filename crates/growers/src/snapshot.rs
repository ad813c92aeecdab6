//! Serializable readout of a grower's current state.
//!
//! A [`Snapshot`] is what a renderer consumes: the edge list to stroke and,
//! for debug overlays, the grid cells still waiting to be connected.

use rrt_sketch_core::{Edge, Grower, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub params: serde_json::Value,
    pub edge_count: usize,
    /// Summed edge length, in region units.
    pub total_length: f64,
    pub edges: Vec<Edge>,
    pub frontier: Vec<Point>,
}

impl Snapshot {
    /// Copies the edges, frontier, and params out of `grower`.
    pub fn capture(grower: &dyn Grower) -> Self {
        let edges = grower.edges();
        Self {
            params: grower.params(),
            edge_count: edges.len(),
            total_length: edges.iter().map(Edge::length).sum(),
            edges,
            frontier: grower.frontier().to_vec(),
        }
    }
}
