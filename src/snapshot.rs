use crate::cards::Card;
use crate::evaluator::Category;
use crate::game::Phase;
use crate::hand::HoleCards;
use crate::table::Actor;

/// Result of a finished hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Winner {
    Human,
    Opponent,
    Split,
}

impl From<Actor> for Winner {
    fn from(actor: Actor) -> Self {
        match actor {
            Actor::Human => Winner::Human,
            Actor::Opponent => Winner::Opponent,
        }
    }
}

/// Read-only view of a game for hosts. The opponent's cards stay hidden
/// while the hand is being bet and are shown once it is over, fold or showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub pot: u64,
    pub current_bet: u64,
    pub community: Vec<Card>,
    pub human_hand: Option<HoleCards>,
    pub opponent_hand: Option<HoleCards>,
    pub human_stack: u64,
    pub opponent_stack: u64,
    pub human_contribution: u64,
    pub opponent_contribution: u64,
    pub to_act: Option<Actor>,
    pub pending_opponent: bool,
    pub last_message: String,
    pub winner: Option<Winner>,
    /// Category of the human's best hand on the cards dealt so far.
    pub human_rank: Option<Category>,
    /// Only filled once the opponent's cards are revealed.
    pub opponent_rank: Option<Category>,
}
