//! Game Engine
//!
//! Owns the one [`GameState`] together with its random source and hazard
//! clock. Every mutation goes through here, and each call returns the
//! events it produced.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::action::{apply_action, Action, ActionError};
use crate::game::clock::HazardClock;
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::game::tick::{hazard_tick, reset, tick};

/// The game plus everything needed to advance it.
#[derive(Debug)]
pub struct GameEngine<R: RandomSource = DeterministicRng> {
    state: GameState,
    rng: R,
    hazard_clock: HazardClock,
}

impl GameEngine<DeterministicRng> {
    /// Engine with a seeded generator. `None` draws the seed from entropy.
    pub fn seeded(seed: Option<u64>, hazard_period: Duration) -> Self {
        let rng = match seed {
            Some(seed) => DeterministicRng::new(seed),
            None => DeterministicRng::from_entropy(),
        };
        Self::with_hazard_period(rng, hazard_period)
    }

    /// Seed behind the current layout sequence.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Start a fresh game with the default one-second hazard cadence.
    pub fn new(rng: R) -> Self {
        Self::with_hazard_period(rng, HazardClock::default().period())
    }

    /// Start a fresh game checking hazards once per `period`.
    pub fn with_hazard_period(mut rng: R, period: Duration) -> Self {
        let state = GameState::new(&mut rng);
        Self {
            state,
            rng,
            hazard_clock: HazardClock::new(period),
        }
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for tools and tests that stage a position directly.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Apply a player action.
    #[instrument(skip(self), level = "debug")]
    pub fn apply_action(&mut self, action: &Action) -> Result<Vec<GameEvent>, ActionError> {
        apply_action(&mut self.state, &mut self.rng, action)?;
        Ok(self.state.take_events())
    }

    /// Advance the level countdown by one second.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        tick(&mut self.state, &mut self.rng);
        self.state.take_events()
    }

    /// Run one hazard check now, regardless of the clock.
    pub fn check_hazards(&mut self) -> Vec<GameEvent> {
        hazard_tick(&mut self.state, &mut self.rng);
        self.state.take_events()
    }

    /// Feed elapsed time to the hazard clock and run every check that fell due.
    pub fn advance_clock(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let due = self.hazard_clock.advance(elapsed);
        if due > 1 {
            debug!("Running {} overdue hazard checks", due);
        }
        for _ in 0..due {
            hazard_tick(&mut self.state, &mut self.rng);
        }
        self.state.take_events()
    }

    /// Restart at level 1, keeping the last game-over reason.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        reset(&mut self.state, &mut self.rng);
        self.state.take_events()
    }
}
