//! Planar geometry shared by every grower: points, edges, nearest-neighbor
//! scans, and frontier-snapped steering.
//!
//! All queries are linear scans in iteration order, so ties always resolve to
//! the first candidate encountered. That keeps runs bit-reproducible for a
//! fixed random seed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// A 2D coordinate in region units.
pub type Point = DVec2;

/// A drawn segment from a parent node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: Point,
    pub child: Point,
}

impl Edge {
    pub fn new(parent: Point, child: Point) -> Self {
        Self { parent, child }
    }

    /// Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        self.parent.distance(self.child)
    }
}

/// Index of the candidate nearest to `target`.
///
/// Returns `TreeError::EmptyCandidateSet` if `candidates` yields nothing.
pub fn closest<'a, I>(candidates: I, target: Point) -> Result<usize, TreeError>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, p) in candidates.into_iter().enumerate() {
        let d2 = p.distance_squared(target);
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((idx, d2)),
        }
    }
    best.map(|(idx, _)| idx).ok_or(TreeError::EmptyCandidateSet)
}

/// Indices of every candidate within `radius` of `target`, boundary included,
/// in iteration order.
///
/// An empty result is valid; only an empty candidate pool is an error.
pub fn within_radius<'a, I>(
    candidates: I,
    target: Point,
    radius: f64,
) -> Result<Vec<usize>, TreeError>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut seen_any = false;
    let mut hits = Vec::new();
    for (idx, p) in candidates.into_iter().enumerate() {
        seen_any = true;
        if p.distance(target) <= radius {
            hits.push(idx);
        }
    }
    if seen_any {
        Ok(hits)
    } else {
        Err(TreeError::EmptyCandidateSet)
    }
}

/// Picks the frontier point to grow into when extending from `source` toward
/// `frontier[destination]`.
///
/// Within `step_limit` the destination itself is returned. Otherwise the
/// point `step_limit` along the segment is snapped to the nearest frontier
/// member, so growth only ever lands on grid cells.
///
/// Returns the frontier index of the chosen point, or
/// `TreeError::EmptyCandidateSet` if `destination` does not index into
/// `frontier` (in particular when the frontier is empty).
pub fn steer_toward(
    source: Point,
    destination: usize,
    step_limit: f64,
    frontier: &[Point],
) -> Result<usize, TreeError> {
    let dest = *frontier
        .get(destination)
        .ok_or(TreeError::EmptyCandidateSet)?;
    let delta = dest - source;
    let dist = delta.length();
    if dist <= step_limit {
        return Ok(destination);
    }
    let provisional = source + delta / dist * step_limit;
    closest(frontier, provisional)
}
