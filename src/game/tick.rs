//! Timers and Level Transitions
//!
//! The two once-per-second cadences (countdown and hazard check) and the
//! transitions they can trigger: level-up on full discovery and reset to
//! level 1 on game over.

use tracing::debug;

use crate::core::rng::RandomSource;
use crate::game::events::GameEvent;
use crate::game::hazard::check_hazards;
use crate::game::rules::{map_size_for_level, BASE_MAP_SIZE, MAX_BATTERY};
use crate::game::state::{GameOverReason, GameState};

/// Advance the level countdown by one second.
///
/// No-op unless the timer is running with time left. When the countdown
/// reaches zero the game is over with [`GameOverReason::Time`].
///
/// Returns true if this tick ended the game.
pub fn tick<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> bool {
    if !state.timer_started || state.time_remaining == 0 {
        return false;
    }

    state.time_remaining -= 1;
    if state.time_remaining == 0 {
        game_over(state, rng, GameOverReason::Time);
        return true;
    }
    false
}

/// Run the background hazard check once.
///
/// Only active while the level timer runs and the battery is not empty. A
/// hit that empties the battery ends the game with
/// [`GameOverReason::Battery`].
///
/// Returns the damage dealt.
pub fn hazard_tick<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> u32 {
    if !state.timer_started || state.battery_percentage == 0 {
        return 0;
    }

    let damage = check_hazards(state);
    if damage > 0 && state.battery_percentage == 0 {
        game_over(state, rng, GameOverReason::Battery);
    }
    damage
}

/// Record why the game ended and restart at level 1.
pub fn game_over<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    reason: GameOverReason,
) {
    state.push_event(GameEvent::GameOver { reason, level: state.level });
    state.game_over_reason = Some(reason);
    reset(state, rng);
}

/// Return to a fresh level 1 with a new layout.
///
/// Sensors, heading and `game_over_reason` survive the reset; the reason
/// stays visible until the next level-up or game over replaces it.
pub fn reset<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let reason = state.game_over_reason;

    state.install_level(rng, 1, BASE_MAP_SIZE);
    state.battery_percentage = MAX_BATTERY;
    state.found_resources.clear();
    state.recenter();
    state.timer_started = false;
    state.time_remaining = 0;
    state.in_hazard = false;
    state.game_over_reason = reason;

    debug!("Game reset to level 1 (reason: {:?})", reason);
}

/// Advance to the next level after every node was discovered.
pub fn level_up<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let completed_level = state.level;
    let next_level = completed_level.saturating_add(1);
    let map_size = map_size_for_level(next_level);

    state.install_level(rng, next_level, map_size);
    state.found_resources.clear();
    state.recenter();
    state.battery_percentage = MAX_BATTERY;
    state.timer_started = false;
    state.time_remaining = 0;
    state.in_hazard = false;
    state.game_over_reason = None;

    state.push_event(GameEvent::LevelCompleted { completed_level, next_level, map_size });
}
