//! Core primitives.
//!
//! Randomness and geometry shared by the game layer. Nothing in here knows
//! about game rules.

pub mod geometry;
pub mod rng;

// Re-export core types
pub use geometry::{clamp_to_map, distance};
pub use rng::{DeterministicRng, RandomSource};
