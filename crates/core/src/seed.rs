//! Reproducible description of a single tree-growing run.
//!
//! A [`Seed`] captures everything needed to regrow the same tree: grower
//! name, region size, parameter overrides, PRNG seed, and tick count.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};

/// Reproducible specification for one run.
///
/// Two identical `Seed` values fed to the same binary produce the same edge
/// set, point for point. `steps == 0` means "run until exhausted".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub grower: String,
    pub width: f64,
    pub height: f64,
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
}

impl Seed {
    /// Creates a new Seed with default params (`{}`) and steps (`0`).
    pub fn new(grower: &str, width: f64, height: f64, seed: u64) -> Self {
        Self {
            grower: grower.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
        }
    }

    /// Checks that the region has a finite, positive area.
    pub fn validate(&self) -> Result<(), TreeError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(TreeError::InvalidConfiguration(format!(
                "region must have positive area, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_seed_with_default_params_and_steps() {
        let s = Seed::new("rrt-star", 21.0, 29.7, 42);
        assert_eq!(s.grower, "rrt-star");
        assert_eq!(s.width, 21.0);
        assert_eq!(s.height, 29.7);
        assert_eq!(s.seed, 42);
        assert_eq!(s.steps, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = Seed::new("rrt", 10.0, 10.0, 99);
        s.params = serde_json::json!({
            "step_limit": 2.0,
            "iteration_budget": 50,
        });
        s.steps = 50;

        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let s = Seed::new("rrt", 1.0, 1.0, 1);
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        for key in ["grower", "width", "height", "params", "seed", "steps"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn validate_succeeds_for_valid_seed() {
        assert!(Seed::new("rrt", 21.0, 29.7, 42).validate().is_ok());
    }

    #[test]
    fn validate_fails_for_zero_width() {
        assert!(Seed::new("rrt", 0.0, 10.0, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_negative_height() {
        assert!(Seed::new("rrt", 10.0, -1.0, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_non_finite_dimensions() {
        assert!(Seed::new("rrt", f64::NAN, 10.0, 42).validate().is_err());
        assert!(Seed::new("rrt", 10.0, f64::INFINITY, 42).validate().is_err());
    }
}
