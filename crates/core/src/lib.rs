#![deny(unsafe_code)]
//! Core types and traits for the rrt-sketch line-art tree grower.
//!
//! Provides the `Grower` trait, `Point`/`Edge` geometry with the
//! nearest-neighbor and steering primitives, `TreeError`, the `Xorshift64`
//! PRNG behind the `RandomSource` trait, `Seed`, and parameter helpers.

pub mod error;
pub mod geometry;
pub mod grower;
pub mod params;
pub mod prng;
pub mod seed;

pub use error::TreeError;
pub use geometry::{Edge, Point};
pub use grower::Grower;
pub use prng::{RandomSource, Xorshift64};
pub use seed::Seed;
