//! Game Logic Module
//!
//! The game-state machine. Nothing here does I/O or reads the wall clock.
//!
//! ## Module Structure
//!
//! - `rules`: Gameplay constants
//! - `state`: Game state and level entities
//! - `level`: Resource node and hazard generation
//! - `hazard`: Hazard damage check
//! - `action`: Player action dispatch
//! - `tick`: Countdown, level-up and reset
//! - `clock`: Hazard cadence
//! - `events`: Transition events for logging
//! - `engine`: Owned state + rng, single mutation API

pub mod action;
pub mod clock;
pub mod engine;
pub mod events;
pub mod hazard;
pub mod level;
pub mod rules;
pub mod state;
pub mod tick;

// Re-export key types
pub use action::{Action, ActionError, MoveDirection};
pub use clock::HazardClock;
pub use engine::GameEngine;
pub use events::GameEvent;
pub use state::{GameOverReason, GameState, HazardZone, ResourceNode, ResourceType};
