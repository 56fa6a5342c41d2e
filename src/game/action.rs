//! Player Actions
//!
//! Everything a player request can do to the game. Actions either commit in
//! full or are rejected before touching the state.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::core::geometry::{clamp_to_map, distance};
use crate::core::rng::RandomSource;
use crate::game::events::GameEvent;
use crate::game::rules::{
    level_time_budget, move_drain, DISCOVERY_RANGE, EDGE_MARGIN, MAX_BATTERY, MOVE_SPEED,
    SLEEP_RECHARGE,
};
use crate::game::state::{GameOverReason, GameState};
use crate::game::tick::{game_over, level_up};

// =============================================================================
// ACTION TYPES
// =============================================================================

/// Direction of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Up the map (y decreases), heading 0
    Forward,
    /// Down the map (y increases), heading 180
    Backward,
    /// x decreases, heading 270
    Left,
    /// x increases, heading 90
    Right,
    /// A direction string the game does not know. The move still costs
    /// battery and runs discovery, but the rover stays put.
    Stationary,
}

impl MoveDirection {
    /// Parse a wire direction.
    ///
    /// An empty string means no direction was given. Any other unknown
    /// string is a [`MoveDirection::Stationary`] move.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "forward" => Some(MoveDirection::Forward),
            "backward" => Some(MoveDirection::Backward),
            "left" => Some(MoveDirection::Left),
            "right" => Some(MoveDirection::Right),
            _ => Some(MoveDirection::Stationary),
        }
    }

    /// Heading in degrees and unit step `(dx, dy)`, if this direction moves.
    pub fn step(self) -> Option<(u16, i32, i32)> {
        match self {
            MoveDirection::Forward => Some((0, 0, -1)),
            MoveDirection::Backward => Some((180, 0, 1)),
            MoveDirection::Left => Some((270, -1, 0)),
            MoveDirection::Right => Some((90, 1, 0)),
            MoveDirection::Stationary => None,
        }
    }
}

/// A validated player action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Flip each named sensor on or off, in order.
    ToggleSensor {
        /// Sensor names, not checked against any catalog
        sensors: Vec<String>,
    },
    /// Drive one step.
    Move {
        /// `None` when the request carried no direction
        direction: Option<MoveDirection>,
    },
    /// Recharge the battery.
    Sleep,
}

/// Rejected action. The state is untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move attempted with an empty battery.
    #[error("battery empty, use sleep to recharge")]
    BatteryEmpty,

    /// `actionType` was missing or not recognized.
    #[error("unknown action type")]
    UnknownAction(String),
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Apply one player action.
pub fn apply_action<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    action: &Action,
) -> Result<(), ActionError> {
    match action {
        Action::ToggleSensor { sensors } => {
            toggle_sensor(state, sensors);
            Ok(())
        }
        Action::Move { direction } => apply_move(state, rng, *direction),
        Action::Sleep => {
            apply_sleep(state);
            Ok(())
        }
    }
}

/// Toggle each sensor: remove it if active, otherwise append it.
///
/// Free of battery cost. A name listed twice is toggled twice.
pub fn toggle_sensor(state: &mut GameState, sensors: &[String]) {
    for name in sensors {
        if let Some(idx) = state.active_sensors.iter().position(|s| s == name) {
            state.active_sensors.remove(idx);
        } else {
            state.active_sensors.push(name.clone());
        }
    }
    debug!("Active sensors: {:?}", state.active_sensors);
}

/// Recharge the battery by one sleep, up to capacity.
///
/// Nothing else changes; hazards keep hurting a sleeping rover.
pub fn apply_sleep(state: &mut GameState) {
    state.battery_percentage = state
        .battery_percentage
        .saturating_add(SLEEP_RECHARGE)
        .min(MAX_BATTERY);
}

/// Drive the rover one step.
///
/// Order of effects: start the level timer, move and clamp, drain the
/// battery, then discovery and level-up. A drain that empties the battery
/// ends the game immediately and skips discovery.
pub fn apply_move<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    direction: Option<MoveDirection>,
) -> Result<(), ActionError> {
    if state.battery_percentage == 0 {
        return Err(ActionError::BatteryEmpty);
    }

    let Some(direction) = direction else {
        return Ok(());
    };

    if !state.timer_started {
        let seconds = level_time_budget(state.base_time, state.level);
        state.timer_started = true;
        state.time_remaining = seconds;
        state.push_event(GameEvent::TimerStarted { level: state.level, seconds });
    }

    if let Some((heading, dx, dy)) = direction.step() {
        state.direction = heading;
        state.x += dx * MOVE_SPEED;
        state.y += dy * MOVE_SPEED;
    }
    state.x = clamp_to_map(state.x, state.map_size, EDGE_MARGIN);
    state.y = clamp_to_map(state.y, state.map_size, EDGE_MARGIN);

    if state.drain_battery(move_drain(state.active_sensors.len())) {
        game_over(state, rng, GameOverReason::Battery);
        return Ok(());
    }

    discover_resources(state);

    if state.level_complete() {
        level_up(state, rng);
    }

    Ok(())
}

/// Reveal every hidden node within camera range of the rover.
///
/// Returns how many nodes were discovered.
fn discover_resources(state: &mut GameState) -> usize {
    if !state.camera_active() {
        return 0;
    }

    let (x, y) = (state.x, state.y);
    let mut found = Vec::new();
    for node in state.resource_nodes.iter_mut().filter(|n| !n.discovered) {
        if distance(x, y, f64::from(node.x), f64::from(node.y)) < DISCOVERY_RANGE {
            node.discovered = true;
            found.push((node.kind, node.x, node.y));
        }
    }

    for (resource, nx, ny) in &found {
        state.found_resources.push(*resource);
        state.push_event(GameEvent::ResourceDiscovered { resource: *resource, x: *nx, y: *ny });
    }
    found.len()
}

// =============================================================================
// TESTS
// =============================================================================
