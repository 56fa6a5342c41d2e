//! Game Events
//!
//! Records of notable transitions. The engine queues them on the state and
//! the transport drains them for logging. They never reach the client.

use serde::{Serialize, Deserialize};

use crate::game::state::{GameOverReason, ResourceType};

/// Something that happened during one operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First move of a level started the countdown
    TimerStarted {
        level: u32,
        seconds: u32,
    },

    /// Camera revealed a node
    ResourceDiscovered {
        resource: ResourceType,
        x: i32,
        y: i32,
    },

    /// Every node of a level was found
    LevelCompleted {
        completed_level: u32,
        next_level: u32,
        map_size: i32,
    },

    /// One hazard check hurt the rover
    HazardDamage {
        damage: u32,
        battery: u32,
    },

    /// Battery or time ran out and the game restarted at level 1
    GameOver {
        reason: GameOverReason,
        level: u32,
    },
}
