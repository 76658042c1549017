//! Heads-up table ledger: two seats and the pot. Stacks change only through
//! [`Table::commit`], [`Table::award`] and [`Table::refund_uncalled`].

use crate::hand::HoleCards;
use std::fmt;

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Actor {
    /// Posts the small blind and acts first on every street.
    Human,
    /// Posts the big blind; driven by an `OpponentPolicy`.
    Opponent,
}

impl Actor {
    pub const BOTH: [Actor; 2] = [Actor::Human, Actor::Opponent];

    pub const fn other(self) -> Actor {
        match self {
            Actor::Human => Actor::Opponent,
            Actor::Opponent => Actor::Human,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Actor::Human => 0,
            Actor::Opponent => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Actor::Human => "You",
            Actor::Opponent => "Opponent",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Seat {
    pub(crate) stack: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) contribution: u64,
    pub(crate) committed: u64,
    pub(crate) in_hand: bool,
}

impl Seat {
    fn new(stack: u64) -> Self {
        Self { stack, hole: None, contribution: 0, committed: 0, in_hand: false }
    }

    /// Returns the chips behind
    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Returns the hole cards, once dealt
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Returns the chips put in during the current betting round
    pub fn contribution(&self) -> u64 {
        self.contribution
    }

    /// Returns the chips put in during the whole hand
    pub fn committed(&self) -> u64 {
        self.committed
    }

    /// Returns false once the seat has folded
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }

    /// Still in the hand with nothing left behind.
    pub fn is_all_in(&self) -> bool {
        self.in_hand && self.stack == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Table {
    seats: [Seat; 2],
    pot: u64,
}

impl Table {
    pub fn new(human_stack: u64, opponent_stack: u64) -> Self {
        Self { seats: [Seat::new(human_stack), Seat::new(opponent_stack)], pot: 0 }
    }

    pub fn seat(&self, actor: Actor) -> &Seat {
        &self.seats[actor.index()]
    }

    pub(crate) fn seat_mut(&mut self, actor: Actor) -> &mut Seat {
        &mut self.seats[actor.index()]
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// Chips on the table: both stacks plus the pot. Constant within a hand.
    pub fn total_chips(&self) -> u64 {
        self.pot + self.seats.iter().map(|s| s.stack).sum::<u64>()
    }

    /// Seat both actors for a new hand with fresh hole cards.
    pub(crate) fn seat_for_hand(&mut self, human: HoleCards, opponent: HoleCards) {
        for (seat, hole) in self.seats.iter_mut().zip([human, opponent]) {
            seat.hole = Some(hole);
            seat.contribution = 0;
            seat.committed = 0;
            seat.in_hand = true;
        }
        self.pot = 0;
    }

    /// Move up to `amount` from the actor's stack into the pot. Returns what moved.
    pub(crate) fn commit(&mut self, actor: Actor, amount: u64) -> u64 {
        let seat = &mut self.seats[actor.index()];
        let paid = amount.min(seat.stack);
        seat.stack -= paid;
        seat.contribution += paid;
        seat.committed += paid;
        self.pot += paid;
        paid
    }

    /// Move `amount` (capped at the pot) from the pot to the actor's stack.
    pub(crate) fn award(&mut self, actor: Actor, amount: u64) -> u64 {
        let paid = amount.min(self.pot);
        self.pot -= paid;
        self.seats[actor.index()].stack += paid;
        paid
    }

    /// Return the part of the larger commitment the other actor never matched.
    pub(crate) fn refund_uncalled(&mut self) -> Option<(Actor, u64)> {
        let [h, o] = [self.seats[0].committed, self.seats[1].committed];
        let (actor, excess) = match h.cmp(&o) {
            std::cmp::Ordering::Greater => (Actor::Human, h - o),
            std::cmp::Ordering::Less => (Actor::Opponent, o - h),
            std::cmp::Ordering::Equal => return None,
        };
        let paid = self.award(actor, excess);
        let seat = self.seat_mut(actor);
        seat.committed -= paid;
        seat.contribution = seat.contribution.saturating_sub(paid);
        Some((actor, paid))
    }

    /// Start a new betting round.
    pub(crate) fn clear_contributions(&mut self) {
        for seat in &mut self.seats {
            seat.contribution = 0;
        }
    }

    pub(crate) fn fold(&mut self, actor: Actor) {
        self.seats[actor.index()].in_hand = false;
    }
}
