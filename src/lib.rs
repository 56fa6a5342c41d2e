//! # Rover Scout Game Server
//!
//! Authoritative game state for Rover Scout, a browser-played exploration game.
//! A rover drives around a square map, spends battery to move, uses its sensors
//! to reveal resource nodes and must avoid hazard zones before the level timer
//! runs out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ROVER SCOUT SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── rng.rs      - RandomSource + Xorshift128+ PRNG          │
//! │  └── geometry.rs - Distance and map clamping                 │
//! │                                                              │
//! │  game/           - Game state machine                        │
//! │  ├── rules.rs    - Gameplay constants                        │
//! │  ├── state.rs    - GameState and entities                    │
//! │  ├── level.rs    - Resource node / hazard generation         │
//! │  ├── hazard.rs   - Hazard damage check                       │
//! │  ├── action.rs   - Player action dispatch                    │
//! │  ├── tick.rs     - Countdown, level-up and reset             │
//! │  ├── clock.rs    - Virtual hazard cadence                    │
//! │  ├── events.rs   - Transition events                         │
//! │  └── engine.rs   - Owned state + rng, single mutation API    │
//! │                                                              │
//! │  network/        - Transport                                 │
//! │  ├── server.rs   - HTTP server and hazard loop               │
//! │  └── protocol.rs - Request / error wire types                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//!
//! There is exactly one game in a process. Every mutation (player actions,
//! countdown ticks and the background hazard check) goes through
//! [`GameEngine`], and the server serializes access to it behind one lock.
//! No operation is idempotent, so the order in which they land matters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use core::rng::{DeterministicRng, RandomSource};
pub use game::action::{Action, ActionError, MoveDirection};
pub use game::engine::GameEngine;
pub use game::state::{GameOverReason, GameState, HazardZone, ResourceNode, ResourceType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cadence of the background hazard check (milliseconds).
pub const HAZARD_INTERVAL_MS: u64 = 1000;
