//! One betting round: who still owes action, what each action costs, and when the round closes.

use crate::agents::Action;
use crate::history::HandHistoryVerb;
use crate::table::{Actor, Table};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalAction {
    #[error("cannot check with {to_call} to call")]
    CannotCheck { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("betting is not allowed when facing a bet")]
    BetNotAllowed,
    #[error("raising is not allowed without a bet")]
    RaiseNotAllowed,
    #[error("target must exceed current bet: current {current}, target {target}")]
    TargetTooLow { current: u64, target: u64 },
    #[error("no chips left to bet")]
    NoChips,
    #[error("{0} is not in the hand")]
    NotInHand(Actor),
    #[error("out of turn: waiting for {0}")]
    NotYourTurn(Actor),
    #[error("no hand in progress")]
    NoHandInProgress,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("insufficient funds: need {need}, have {available}")]
    InsufficientFunds { need: u64, available: u64 },
    #[error("below minimum raise: min {min}, got {got}")]
    BelowMinimumRaise { min: u64, got: u64 },
    #[error(transparent)]
    Illegal(#[from] IllegalAction),
}

/// What an accepted action did. `amount` is chips paid for a call and the
/// new total contribution for bets, raises and all-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Move {
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
}

/// Controls the UI may enable for the actor to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct LegalActions {
    pub can_check: bool,
    /// Chips a call would cost, already capped at the stack. Zero when there is nothing to call.
    pub to_call: u64,
    pub can_bet: bool,
    pub can_raise: bool,
    /// Smallest legal bet or raise target. Equals `max_target` when only an all-in is possible.
    pub min_target: u64,
    /// Largest target: everything behind plus this round's contribution.
    pub max_target: u64,
    pub can_all_in: bool,
}

impl LegalActions {
    fn passive(&self) -> Action {
        if self.can_check {
            Action::Check
        } else {
            Action::Call
        }
    }

    /// The action that puts `target` in for the round: all-in at or above the
    /// maximum, otherwise a bet or raise depending on whether the round is open.
    pub fn wager(&self, target: u64) -> Action {
        if target >= self.max_target {
            Action::AllIn
        } else if self.can_bet {
            Action::Bet(target)
        } else {
            Action::Raise(target)
        }
    }

    /// Map an intent onto the nearest legal action: checks and calls swap as
    /// needed, free folds become checks and sizes are clamped into range.
    pub fn legalize(&self, action: Action) -> Action {
        match action {
            Action::Check | Action::Call => self.passive(),
            Action::Fold if self.can_check => Action::Check,
            Action::Fold => Action::Fold,
            Action::AllIn => Action::AllIn,
            Action::Bet(target) | Action::Raise(target) => {
                if !(self.can_bet || self.can_raise) {
                    return self.passive();
                }
                self.wager(target.clamp(self.min_target, self.max_target))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct BettingRound {
    pub(crate) current_bet: u64,
    pub(crate) min_raise: u64,
    pub(crate) last_to_act: Option<Actor>,
    pub(crate) last_aggressor: Option<Actor>,
    acted: [bool; 2],
}

impl BettingRound {
    pub fn new(min_raise: u64) -> Self {
        Self { current_bet: 0, min_raise, last_to_act: None, last_aggressor: None, acted: [false; 2] }
    }

    /// Returns the highest contribution this round
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Returns the fixed minimum raise increment
    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    /// Returns the actor who moved last this round
    pub fn last_to_act(&self) -> Option<Actor> {
        self.last_to_act
    }

    /// Returns the actor who last bet or raised this round
    pub fn last_aggressor(&self) -> Option<Actor> {
        self.last_aggressor
    }

    pub fn to_call(&self, actor: Actor, table: &Table) -> u64 {
        self.current_bet.saturating_sub(table.seat(actor).contribution())
    }

    /// Post a forced bet. Blinds raise the current bet but count as no action,
    /// so the big blind keeps its option.
    pub(crate) fn post_blind(&mut self, actor: Actor, amount: u64, table: &mut Table) -> u64 {
        let paid = table.commit(actor, amount);
        self.current_bet = self.current_bet.max(table.seat(actor).contribution());
        paid
    }

    /// Whether `actor` still owes a decision this round.
    pub fn needs_action(&self, actor: Actor, table: &Table) -> bool {
        let seat = table.seat(actor);
        if !seat.in_hand() || seat.stack() == 0 {
            return false;
        }
        let matched = seat.contribution() >= self.current_bet;
        if table.seat(actor.other()).is_all_in() && matched {
            return false;
        }
        !self.acted[actor.index()] || !matched
    }

    /// The round is closed once neither actor owes a decision.
    pub fn is_complete(&self, table: &Table) -> bool {
        Actor::BOTH.iter().all(|&a| !self.needs_action(a, table))
    }

    /// Validate and apply one action. A rejected action leaves round and table untouched.
    /// Folds only mark the seat; settling the pot is up to the caller.
    pub fn apply(
        &mut self,
        actor: Actor,
        action: Action,
        table: &mut Table,
    ) -> Result<Move, ActionError> {
        if !table.seat(actor).in_hand() {
            return Err(IllegalAction::NotInHand(actor).into());
        }
        let mv = match action {
            Action::Fold => {
                table.fold(actor);
                Move { verb: HandHistoryVerb::Fold, amount: None }
            }
            Action::Check => self.check(actor, table)?,
            Action::Call => self.call(actor, table)?,
            Action::Bet(target) => {
                if self.current_bet > 0 {
                    return Err(IllegalAction::BetNotAllowed.into());
                }
                self.wager(actor, target, table)?
            }
            Action::Raise(target) => {
                if self.current_bet == 0 {
                    return Err(IllegalAction::RaiseNotAllowed.into());
                }
                if table.seat(actor.other()).is_all_in() {
                    return Err(IllegalAction::RaiseNotAllowed.into());
                }
                self.wager(actor, target, table)?
            }
            Action::AllIn => {
                let seat = table.seat(actor);
                let everything = seat.contribution() + seat.stack();
                if seat.stack() == 0 {
                    return Err(IllegalAction::NoChips.into());
                }
                if table.seat(actor.other()).is_all_in() && self.to_call(actor, table) > 0 {
                    self.call(actor, table)?
                } else {
                    self.wager(actor, everything, table)?
                }
            }
        };
        self.acted[actor.index()] = true;
        self.last_to_act = Some(actor);
        Ok(mv)
    }

    fn check(&mut self, actor: Actor, table: &Table) -> Result<Move, ActionError> {
        let to_call = self.to_call(actor, table);
        if to_call > 0 {
            return Err(IllegalAction::CannotCheck { to_call }.into());
        }
        Ok(Move { verb: HandHistoryVerb::Check, amount: None })
    }

    fn call(&mut self, actor: Actor, table: &mut Table) -> Result<Move, ActionError> {
        let to_call = self.to_call(actor, table);
        if to_call == 0 {
            return Err(IllegalAction::NothingToCall.into());
        }
        // a short stack calls all-in; current_bet stays where it is
        let paid = table.commit(actor, to_call);
        Ok(Move { verb: HandHistoryVerb::Call, amount: Some(paid) })
    }

    /// Shared bet/raise/all-in path: raise the actor's contribution to `target`.
    fn wager(&mut self, actor: Actor, target: u64, table: &mut Table) -> Result<Move, ActionError> {
        let seat = table.seat(actor);
        let (contribution, stack) = (seat.contribution(), seat.stack());
        if stack == 0 {
            return Err(IllegalAction::NoChips.into());
        }
        if target <= contribution {
            return Err(IllegalAction::TargetTooLow { current: contribution, target }.into());
        }
        let need = target - contribution;
        if need > stack {
            return Err(ActionError::InsufficientFunds { need, available: stack });
        }
        let all_in = need == stack;
        if !all_in {
            if target <= self.current_bet {
                return Err(
                    IllegalAction::TargetTooLow { current: self.current_bet, target }.into()
                );
            }
            let min = self.min_target();
            if target < min {
                return Err(ActionError::BelowMinimumRaise { min, got: target });
            }
        }

        let opened = self.current_bet == 0;
        table.commit(actor, need);
        let verb = if all_in {
            HandHistoryVerb::AllIn
        } else if opened {
            HandHistoryVerb::Bet
        } else {
            HandHistoryVerb::RaiseTo
        };
        if target > self.current_bet {
            self.current_bet = target;
            self.last_aggressor = Some(actor);
            self.acted[actor.other().index()] = false;
        }
        Ok(Move { verb, amount: Some(target) })
    }

    /// Smallest non-all-in bet or raise target.
    pub fn min_target(&self) -> u64 {
        if self.current_bet == 0 {
            self.min_raise
        } else {
            self.current_bet + self.min_raise
        }
    }

    pub fn legal_actions(&self, actor: Actor, table: &Table) -> LegalActions {
        let seat = table.seat(actor);
        if !seat.in_hand() || seat.stack() == 0 {
            return LegalActions::default();
        }
        let owed = self.to_call(actor, table);
        let max_target = seat.contribution() + seat.stack();
        let other_all_in = table.seat(actor.other()).is_all_in();
        let can_wager = seat.stack() > owed && !other_all_in;
        LegalActions {
            can_check: owed == 0,
            to_call: owed.min(seat.stack()),
            can_bet: self.current_bet == 0 && can_wager,
            can_raise: self.current_bet > 0 && can_wager,
            min_target: self.min_target().min(max_target),
            max_target,
            can_all_in: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(h: u64, o: u64) -> Table {
        let mut t = Table::new(h, o);
        t.seat_for_hand("As Ks".parse().unwrap(), "2c 2d".parse().unwrap());
        t
    }

    fn blinds(t: &mut Table) -> BettingRound {
        let mut r = BettingRound::new(20);
        r.post_blind(Actor::Human, 10, t);
        r.post_blind(Actor::Opponent, 20, t);
        r
    }

    #[test]
    fn big_blind_keeps_its_option() {
        let mut t = table(1000, 1000);
        let mut r = blinds(&mut t);
        r.apply(Actor::Human, Action::Call, &mut t).unwrap();
        assert!(!r.is_complete(&t));
        assert!(r.needs_action(Actor::Opponent, &t));
        r.apply(Actor::Opponent, Action::Check, &mut t).unwrap();
        assert!(r.is_complete(&t));
        assert_eq!(t.pot(), 40);
    }

    #[test]
    fn check_facing_bet_is_rejected() {
        let mut t = table(1000, 1000);
        let mut r = blinds(&mut t);
        let before = (r.clone(), t.clone());
        let err = r.apply(Actor::Human, Action::Check, &mut t).unwrap_err();
        assert_eq!(err, ActionError::Illegal(IllegalAction::CannotCheck { to_call: 10 }));
        assert_eq!((r, t), before);
    }

    #[test]
    fn call_with_nothing_to_call_is_rejected() {
        let mut t = table(1000, 1000);
        let mut r = BettingRound::new(20);
        let err = r.apply(Actor::Human, Action::Call, &mut t).unwrap_err();
        assert_eq!(err, ActionError::Illegal(IllegalAction::NothingToCall));
    }

    #[test]
    fn raise_below_minimum_is_rejected() {
        let mut t = table(1000, 1000);
        let mut r = blinds(&mut t);
        let err = r.apply(Actor::Human, Action::Raise(30), &mut t).unwrap_err();
        assert_eq!(err, ActionError::BelowMinimumRaise { min: 40, got: 30 });
        r.apply(Actor::Human, Action::Raise(40), &mut t).unwrap();
        assert_eq!(r.current_bet(), 40);
        assert_eq!(r.last_aggressor(), Some(Actor::Human));
    }

    #[test]
    fn opening_bet_must_reach_min_raise() {
        let mut t = table(1000, 1000);
        let mut r = BettingRound::new(20);
        assert!(matches!(
            r.apply(Actor::Human, Action::Bet(10), &mut t),
            Err(ActionError::BelowMinimumRaise { min: 20, got: 10 })
        ));
        assert!(matches!(
            r.apply(Actor::Human, Action::Raise(40), &mut t),
            Err(ActionError::Illegal(IllegalAction::RaiseNotAllowed))
        ));
        r.apply(Actor::Human, Action::Bet(20), &mut t).unwrap();
        assert!(matches!(
            r.apply(Actor::Opponent, Action::Bet(60), &mut t),
            Err(ActionError::Illegal(IllegalAction::BetNotAllowed))
        ));
    }

    #[test]
    fn overbet_is_insufficient_funds() {
        let mut t = table(100, 1000);
        let mut r = BettingRound::new(20);
        assert_eq!(
            r.apply(Actor::Human, Action::Bet(150), &mut t),
            Err(ActionError::InsufficientFunds { need: 150, available: 100 })
        );
    }

    #[test]
    fn short_all_in_call_keeps_current_bet() {
        let mut t = table(1000, 50);
        let mut r = BettingRound::new(20);
        r.apply(Actor::Human, Action::Bet(100), &mut t).unwrap();
        let mv = r.apply(Actor::Opponent, Action::Call, &mut t).unwrap();
        assert_eq!(mv.amount, Some(50));
        assert_eq!(r.current_bet(), 100);
        assert!(t.seat(Actor::Opponent).is_all_in());
        assert!(r.is_complete(&t));
    }

    #[test]
    fn short_all_in_raise_is_allowed() {
        let mut t = table(1000, 30);
        let mut r = BettingRound::new(20);
        r.apply(Actor::Human, Action::Bet(20), &mut t).unwrap();
        let mv = r.apply(Actor::Opponent, Action::AllIn, &mut t).unwrap();
        assert_eq!(mv.verb, HandHistoryVerb::AllIn);
        assert_eq!(r.current_bet(), 30);
        assert!(r.needs_action(Actor::Human, &t));
        r.apply(Actor::Human, Action::Call, &mut t).unwrap();
        assert!(r.is_complete(&t));
    }

    #[test]
    fn reraise_reopens_action() {
        let mut t = table(1000, 1000);
        let mut r = BettingRound::new(20);
        r.apply(Actor::Human, Action::Bet(20), &mut t).unwrap();
        r.apply(Actor::Opponent, Action::Raise(60), &mut t).unwrap();
        assert!(r.needs_action(Actor::Human, &t));
        assert!(!r.needs_action(Actor::Opponent, &t));
        r.apply(Actor::Human, Action::Call, &mut t).unwrap();
        assert!(r.is_complete(&t));
        assert_eq!(t.pot(), 120);
    }

    #[test]
    fn cannot_raise_an_all_in_player() {
        let mut t = table(1000, 40);
        let mut r = BettingRound::new(20);
        r.apply(Actor::Human, Action::Bet(20), &mut t).unwrap();
        r.apply(Actor::Opponent, Action::AllIn, &mut t).unwrap();
        assert_eq!(
            r.apply(Actor::Human, Action::Raise(200), &mut t),
            Err(ActionError::Illegal(IllegalAction::RaiseNotAllowed))
        );
        let legal = r.legal_actions(Actor::Human, &t);
        assert!(!legal.can_raise);
        assert_eq!(legal.to_call, 20);
        // all-in against an all-in only calls
        let mv = r.apply(Actor::Human, Action::AllIn, &mut t).unwrap();
        assert_eq!(mv.verb, HandHistoryVerb::Call);
        assert_eq!(t.seat(Actor::Human).stack(), 960);
    }

    #[test]
    fn legal_actions_preflop() {
        let mut t = table(1000, 1000);
        let r = blinds(&mut t);
        let legal = r.legal_actions(Actor::Human, &t);
        assert!(!legal.can_check);
        assert_eq!(legal.to_call, 10);
        assert!(legal.can_raise);
        assert!(!legal.can_bet);
        assert_eq!(legal.min_target, 40);
        assert_eq!(legal.max_target, 1000);
    }

    #[test]
    fn legalize_clamps_and_swaps() {
        let mut t = table(1000, 1000);
        let r = blinds(&mut t);
        let legal = r.legal_actions(Actor::Human, &t);
        assert_eq!(legal.legalize(Action::Check), Action::Call);
        assert_eq!(legal.legalize(Action::Bet(25)), Action::Raise(40));
        assert_eq!(legal.legalize(Action::Raise(5000)), Action::AllIn);
        assert_eq!(legal.legalize(Action::Fold), Action::Fold);

        let open = BettingRound::new(20).legal_actions(Actor::Human, &t);
        assert_eq!(open.legalize(Action::Fold), Action::Check);
        assert_eq!(open.legalize(Action::Raise(60)), Action::Bet(60));
    }

    #[test]
    fn legalize_against_all_in_only_calls() {
        let mut t = table(1000, 40);
        let mut r = BettingRound::new(20);
        r.apply(Actor::Human, Action::Bet(20), &mut t).unwrap();
        r.apply(Actor::Opponent, Action::AllIn, &mut t).unwrap();
        let legal = r.legal_actions(Actor::Human, &t);
        assert_eq!(legal.legalize(Action::Raise(200)), Action::Call);
    }

    #[test]
    fn folded_actor_cannot_act() {
        let mut t = table(1000, 1000);
        let mut r = blinds(&mut t);
        r.apply(Actor::Human, Action::Fold, &mut t).unwrap();
        assert_eq!(
            r.apply(Actor::Human, Action::Call, &mut t),
            Err(ActionError::Illegal(IllegalAction::NotInHand(Actor::Human)))
        );
    }
}
