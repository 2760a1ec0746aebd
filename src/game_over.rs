//! End-of-run latch.
//!
//! Enemy contact is detected both by the movement resolver and by the enemy
//! AI, and several end conditions can fire in the same frame. Every path goes
//! through [`GameOverLatch::trigger`]; only the first call has an effect.

use log::info;
use serde::Serialize;

use crate::presentation::Presentation;
use crate::{Millis, RESTART_DELAY_MS};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// An enemy touched the player.
    CaughtByEnemy,
    /// Enemy fire drained the player's health.
    ShotByEnemy,
    /// All gold coins were collected.
    Victory,
}

impl Outcome {
    /// Overlay message for this outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CaughtByEnemy => "An enemy caught you.",
            Self::ShotByEnemy => "You were shot by an enemy.",
            Self::Victory => "You win! You collected all gold coins.",
        }
    }

    /// Whether the player won.
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory)
    }
}

/// One-way switch from "running" to "over".
#[derive(Debug, Clone, Default)]
pub struct GameOverLatch {
    outcome: Option<Outcome>,
    restart_at: Option<Millis>,
    restart_requested: bool,
}

impl GameOverLatch {
    /// Ends the run with `outcome` unless it already ended.
    ///
    /// The first call shows the overlay and schedules the restart
    /// [`RESTART_DELAY_MS`] after `now`, then returns `true`. Later calls
    /// return `false` and change nothing.
    pub fn trigger(
        &mut self,
        outcome: Outcome,
        now: Millis,
        presentation: &mut dyn Presentation,
    ) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        info!("game over at {now} ms: {}", outcome.message());
        self.outcome = Some(outcome);
        self.restart_at = Some(now.saturating_add(RESTART_DELAY_MS));
        presentation.show_game_over(outcome.message());
        true
    }

    /// Whether the run has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The recorded outcome, if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// When the restart becomes due.
    #[must_use]
    pub const fn restart_at(&self) -> Option<Millis> {
        self.restart_at
    }

    /// Requests the restart once its deadline has passed.
    ///
    /// Returns `true` on the single call that issues the request.
    pub fn poll_restart(&mut self, now: Millis, presentation: &mut dyn Presentation) -> bool {
        match self.restart_at {
            Some(deadline) if now >= deadline && !self.restart_requested => {
                self.restart_requested = true;
                presentation.request_restart();
                true
            }
            _ => false,
        }
    }

    /// Whether the restart has been requested.
    #[must_use]
    pub const fn restart_requested(&self) -> bool {
        self.restart_requested
    }
}
