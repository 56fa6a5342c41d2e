//! Game State Definitions
//!
//! The single state record the server owns, plus the entities placed on
//! each level. Field names on the wire are camelCase because the browser
//! client reads them directly.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::core::rng::RandomSource;
use crate::game::events::GameEvent;
use crate::game::level::{generate_hazards, generate_level};
use crate::game::rules::{
    BASE_MAP_SIZE, BASE_TIME, DEFAULT_SENSORS, MAX_BATTERY, SENSOR_CAMERA,
};

// =============================================================================
// RESOURCE TYPE
// =============================================================================

/// Kind of resource a node yields. Declared from common to rare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResourceType {
    /// Unlocked from level 1
    Iron = 0,
    /// Unlocked from level 1
    Copper = 1,
    /// Unlocked from level 1
    Silver = 2,
    /// Unlocked from level 1
    Gold = 3,
    /// Unlocked from level 2
    Platinum = 4,
    /// Unlocked from level 3
    Titanium = 5,
    /// Unlocked from level 4
    Diamond = 6,
}

impl ResourceType {
    /// Display name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Iron => "Iron",
            ResourceType::Copper => "Copper",
            ResourceType::Silver => "Silver",
            ResourceType::Gold => "Gold",
            ResourceType::Platinum => "Platinum",
            ResourceType::Titanium => "Titanium",
            ResourceType::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// LEVEL ENTITIES
// =============================================================================

/// A collectible placed on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Map X
    pub x: i32,
    /// Map Y
    pub y: i32,
    /// Resource yielded when discovered
    #[serde(rename = "type")]
    pub kind: ResourceType,
    /// Flips to true once, when the camera sees it
    pub discovered: bool,
}

impl ResourceNode {
    /// Create an undiscovered node.
    pub fn new(x: i32, y: i32, kind: ResourceType) -> Self {
        Self { x, y, kind, discovered: false }
    }
}

/// A circular area that damages the rover while it sits inside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardZone {
    /// Center X
    pub x: i32,
    /// Center Y
    pub y: i32,
    /// Radius in map units
    pub radius: f64,
    /// Battery lost per hazard check
    pub damage: u32,
}

// =============================================================================
// GAME OVER
// =============================================================================

/// Why the last game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    /// Battery hit zero
    Battery,
    /// Level countdown hit zero
    Time,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::Battery => f.write_str("battery"),
            GameOverReason::Time => f.write_str("time"),
        }
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of the one game the server runs.
///
/// Invariants kept by every operation in `game`:
/// - `battery_percentage <= 100`
/// - `EDGE_MARGIN <= x, y <= map_size - EDGE_MARGIN`
/// - `resource_nodes` and `hazard_zones` always belong to the same level
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Remaining battery, 0 to 100
    pub battery_percentage: u32,

    /// Sensors switched on, in the order they were enabled
    pub active_sensors: Vec<String>,

    /// Resources discovered on this level, in discovery order
    pub found_resources: Vec<ResourceType>,

    /// Rover X
    pub x: i32,

    /// Rover Y
    pub y: i32,

    /// Heading of the last move in degrees (0, 90, 180 or 270)
    pub direction: u16,

    /// Current level, starting at 1
    pub level: u32,

    /// Side length of the square map
    pub map_size: i32,

    /// Collectibles of this level
    pub resource_nodes: Vec<ResourceNode>,

    /// Hazards of this level
    pub hazard_zones: Vec<HazardZone>,

    /// Set by the first move of a level
    pub timer_started: bool,

    /// Seconds left on the level countdown
    pub time_remaining: u32,

    /// Countdown for level 1
    pub base_time: u32,

    /// Whether the rover was inside a hazard at the last check
    pub in_hazard: bool,

    /// Cause of the most recent game over, kept until the next level-up
    pub game_over_reason: Option<GameOverReason>,

    /// Events produced since the last `take_events`
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh level-1 game.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let level = 1;
        let map_size = BASE_MAP_SIZE;
        Self {
            battery_percentage: MAX_BATTERY,
            active_sensors: DEFAULT_SENSORS.iter().map(|s| s.to_string()).collect(),
            found_resources: Vec::new(),
            x: map_size / 2,
            y: map_size / 2,
            direction: 0,
            level,
            map_size,
            resource_nodes: generate_level(rng, level, map_size),
            hazard_zones: generate_hazards(rng, level, map_size),
            timer_started: false,
            time_remaining: 0,
            base_time: BASE_TIME,
            in_hazard: false,
            game_over_reason: None,
            events: Vec::new(),
        }
    }

    /// Check if a sensor is switched on.
    pub fn has_sensor(&self, name: &str) -> bool {
        self.active_sensors.iter().any(|s| s == name)
    }

    /// Check if the camera is on.
    #[inline]
    pub fn camera_active(&self) -> bool {
        self.has_sensor(SENSOR_CAMERA)
    }

    /// A level is complete when it has nodes and all of them are discovered.
    pub fn level_complete(&self) -> bool {
        !self.resource_nodes.is_empty() && self.resource_nodes.iter().all(|n| n.discovered)
    }

    /// Replace the level layout for `level` on a map of `map_size`.
    ///
    /// Nodes and hazards are always swapped together.
    pub fn install_level<R: RandomSource + ?Sized>(&mut self, rng: &mut R, level: u32, map_size: i32) {
        self.level = level;
        self.map_size = map_size;
        self.resource_nodes = generate_level(rng, level, map_size);
        self.hazard_zones = generate_hazards(rng, level, map_size);
    }

    /// Move the rover to the center of the map.
    pub fn recenter(&mut self) {
        self.x = self.map_size / 2;
        self.y = self.map_size / 2;
    }

    /// Remove up to `amount` battery, stopping at zero.
    ///
    /// Returns true if the battery is now empty.
    pub fn drain_battery(&mut self, amount: u32) -> bool {
        self.battery_percentage = self.battery_percentage.saturating_sub(amount);
        self.battery_percentage == 0
    }

    /// Queue an event for the transport layer.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
