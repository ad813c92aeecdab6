//! The pool of unclaimed grid points the tree grows into.

use rrt_sketch_core::{Point, TreeError};

/// Points closer than this to the root count as the root itself.
const COINCIDENCE_EPS: f64 = 1e-9;

/// Largest grid laid out in one frontier.
pub const MAX_CELLS: usize = 1 << 24;

/// Ordered set of grid points not yet admitted into the tree.
///
/// Order is row-major (y outer, x inner) and survives removals, so
/// first-encountered tie-breaks stay deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontier {
    points: Vec<Point>,
}

impl Frontier {
    /// Lays a grid with spacing `resolution` over `[0, width) x [0, height)`,
    /// skipping any cell that coincides with `root`.
    pub fn grid(
        width: f64,
        height: f64,
        resolution: f64,
        root: Point,
    ) -> Result<Self, TreeError> {
        let cols = axis_count(width, resolution)?;
        let rows = axis_count(height, resolution)?;
        match cols.checked_mul(rows) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(TreeError::InvalidConfiguration(format!(
                    "grid of {cols}x{rows} cells exceeds the {MAX_CELLS} cell limit"
                )));
            }
        }
        let points = (0..rows)
            .flat_map(|j| (0..cols).map(move |i| Point::new(i as f64, j as f64)))
            .map(|cell| cell * resolution)
            .filter(|pt| pt.distance(root) > COINCIDENCE_EPS)
            .collect();
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Removes and returns the point at `idx`, keeping the rest in order.
    pub fn take(&mut self, idx: usize) -> Point {
        self.points.remove(idx)
    }
}

/// Number of grid lines `k * resolution` strictly below `extent`.
fn axis_count(extent: f64, resolution: f64) -> Result<usize, TreeError> {
    let count = (extent / resolution).ceil();
    if !count.is_finite() || count > usize::MAX as f64 {
        return Err(TreeError::InvalidConfiguration(format!(
            "grid of {extent} at spacing {resolution} is too large"
        )));
    }
    // `ceil` can overshoot by one when the division rounds up past an integer.
    let mut n = count as usize;
    while n > 0 && (n - 1) as f64 * resolution >= extent {
        n -= 1;
    }
    Ok(n)
}
