//! Agents: the action vocabulary shared by both actors and the pluggable opponent.
//!
//! The human side is driven by whatever host submits `Action`s; the opponent side
//! is an `OpponentPolicy` owned by the game. `OpponentPacer` lets a host delay the
//! opponent's moves without the core knowing about time.

use crate::engine::HoldemEngine;
use crate::evaluator::Category;
use crate::game::{GameError, Phase};
use core::fmt;
use std::time::{Duration, Instant};

/// Action intents. Amounts for `Bet` and `Raise` are the total contribution
/// for the betting round after the action, not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Action {
    Check,
    Call,
    Bet(u64),
    Raise(u64),
    Fold,
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Bet(t) => write!(f, "bet {t}"),
            Action::Raise(t) => write!(f, "raise to {t}"),
            Action::Fold => f.write_str("fold"),
            Action::AllIn => f.write_str("all-in"),
        }
    }
}

/// What the opponent is allowed to see when deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentView {
    pub phase: Phase,
    /// Category of the opponent's best hand on the cards dealt so far.
    pub category: Category,
    pub amount_to_call: u64,
    pub pot: u64,
    pub stack: u64,
    /// Chips the human has behind.
    pub opponent_stack: u64,
    pub current_bet: u64,
    /// The opponent's own contribution this round.
    pub contribution: u64,
    pub min_raise: u64,
}

impl OpponentView {
    /// Hand strength on the 0..=9 category scale.
    pub fn strength(&self) -> u8 {
        self.category.ordinal()
    }
}

/// Decides the opponent's action. The game clamps the result into the legal
/// range before applying it, so a policy may be approximate about sizing.
pub trait OpponentPolicy {
    fn decide(&mut self, view: &OpponentView) -> Action;
}

mod bots;

pub use bots::{BotProfile, Difficulty, ScriptedOpponent};

/// Submits the opponent's pending turn once a fixed delay has passed since it
/// became pending. Hosts call `on_tick` from their event loop.
#[derive(Debug, Clone)]
pub struct OpponentPacer {
    delay: Duration,
    due_at: Option<Instant>,
}

impl OpponentPacer {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay: Duration::from_millis(delay_ms), due_at: None }
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay = Duration::from_millis(delay_ms);
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }

    /// Returns true if the opponent acted on this tick.
    pub fn on_tick(&mut self, engine: &mut dyn HoldemEngine) -> Result<bool, GameError> {
        if !engine.pending_opponent_turn() {
            self.due_at = None;
            return Ok(false);
        }
        let now = Instant::now();
        let due = *self.due_at.get_or_insert(now + self.delay);
        if now < due {
            return Ok(false);
        }
        self.due_at = None;
        engine.submit_opponent_turn()?;
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.due_at = None;
    }
}

impl Default for OpponentPacer {
    fn default() -> Self {
        Self::new(600)
    }
}
