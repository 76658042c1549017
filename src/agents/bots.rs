use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::{Action, OpponentPolicy, OpponentView};

/// Difficulty tiers; they only shift bluffing and bet sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Play style of the scripted opponent. Hand strength is the 0..=9 category scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Categories at or above this are played for value (6 = full house).
    pub strong_threshold: u8,
    /// Categories at or above this are worth a call (4 = straight).
    pub medium_threshold: u8,
    /// Fraction of the pot bet with a strong hand when nobody has bet.
    pub aggression: f64,
    /// Chance of a small probing bet with a medium hand.
    pub probe: f64,
    /// Base bluffing frequency.
    pub bluff: f64,
    /// Smallest bet the opponent opens with.
    pub min_bet: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (aggression, probe, bluff) = match difficulty {
            Difficulty::Easy => (0.4, 0.2, 0.05),
            Difficulty::Medium => (0.6, 0.3, 0.15),
            Difficulty::Hard => (0.75, 0.4, 0.22),
        };
        Self {
            difficulty,
            strong_threshold: 6,
            medium_threshold: 4,
            aggression,
            probe,
            bluff,
            min_bet: 20,
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_bluff(mut self, bluff: f64) -> Self {
        self.bluff = bluff.clamp(0.0, 1.0);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }
}

#[derive(Debug, Clone, Copy)]
struct BotDecision {
    action: Action,
    reason: &'static str,
}

impl BotDecision {
    fn new(action: Action, reason: &'static str) -> Self {
        Self { action, reason }
    }
}

fn pot_share(pot: u64, fraction: f64) -> u64 {
    (pot as f64 * fraction).round() as u64
}

/// Bet or raise so the round contribution grows by `extra` over the current bet.
fn wager(view: &OpponentView, extra: u64) -> Action {
    let target = view.current_bet + extra;
    if view.current_bet == 0 {
        Action::Bet(target)
    } else {
        Action::Raise(target)
    }
}

struct BotPolicy;

impl BotPolicy {
    fn decide(view: &OpponentView, profile: &BotProfile, state: &mut BotState) -> BotDecision {
        if view.amount_to_call == 0 {
            return Self::unopened(view, profile, state);
        }
        Self::facing_bet(view, profile, state)
    }

    fn unopened(view: &OpponentView, profile: &BotProfile, state: &mut BotState) -> BotDecision {
        let strength = view.strength();
        if strength >= profile.strong_threshold {
            let size = pot_share(view.pot, profile.aggression).max(profile.min_bet).min(view.stack);
            return BotDecision::new(wager(view, size), "value_bet");
        }
        if strength >= profile.medium_threshold {
            if state.chance(profile.probe) {
                let size = profile.min_bet.max(pot_share(view.pot, 0.15));
                return BotDecision::new(wager(view, size), "probe");
            }
            return BotDecision::new(Action::Check, "check");
        }
        if state.chance(profile.bluff) {
            let size = profile.min_bet.max(pot_share(view.pot, 0.25));
            return BotDecision::new(wager(view, size), "bluff");
        }
        BotDecision::new(Action::Check, "check")
    }

    fn facing_bet(view: &OpponentView, profile: &BotProfile, state: &mut BotState) -> BotDecision {
        let strength = view.strength();
        let call = view.amount_to_call;
        let pot = view.pot.max(1) as f64;
        let call_ratio = call as f64 / pot;
        let pot_odds = (view.pot + call) as f64 / call as f64;
        let can_call = view.stack >= call;
        let can_raise = view.stack >= call + view.min_raise;

        if strength >= profile.strong_threshold {
            if can_raise {
                let extra = view.min_raise.max(pot_share(view.pot, 0.75));
                return BotDecision::new(wager(view, extra), "value_raise");
            }
            if can_call {
                return BotDecision::new(Action::Call, "call");
            }
            // too strong to fold for lack of chips
            return BotDecision::new(Action::AllIn, "call_all_in");
        }

        if strength >= profile.medium_threshold {
            if can_call && (call_ratio < 0.4 || pot_odds > 2.5) {
                return BotDecision::new(Action::Call, "call");
            }
            if can_raise && state.chance(profile.bluff / 2.0) {
                let extra = view.min_raise.max(pot_share(view.pot, 0.5));
                return BotDecision::new(wager(view, extra), "semi_bluff_raise");
            }
            return BotDecision::new(Action::Fold, "fold");
        }

        if can_call && call_ratio < 0.1 {
            return BotDecision::new(Action::Call, "cheap_call");
        }
        if can_raise && state.chance(profile.bluff / 3.0) {
            let extra = view.min_raise.max(pot_share(view.pot, 0.3));
            return BotDecision::new(wager(view, extra), "bluff_raise");
        }
        BotDecision::new(Action::Fold, "fold")
    }
}

/// Rule-based opponent keyed on hand category, pot odds and a bluff frequency.
///
/// ```
/// use holdem_duel::agents::{BotProfile, ScriptedOpponent};
///
/// let bot = ScriptedOpponent::new(BotProfile::default().with_seed(7));
/// assert_eq!(bot.profile().strong_threshold, 6);
/// ```
#[derive(Debug)]
pub struct ScriptedOpponent {
    profile: BotProfile,
    state: BotState,
}

impl ScriptedOpponent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl Default for ScriptedOpponent {
    fn default() -> Self {
        Self::new(BotProfile::default())
    }
}

impl OpponentPolicy for ScriptedOpponent {
    fn decide(&mut self, view: &OpponentView) -> Action {
        let decision = BotPolicy::decide(view, &self.profile, &mut self.state);
        log::debug!(
            "opponent {} ({}): strength {}, to call {}, pot {}",
            decision.action,
            decision.reason,
            view.strength(),
            view.amount_to_call,
            view.pot
        );
        decision.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Category;
    use crate::game::Phase;

    fn view(category: Category, to_call: u64, pot: u64, stack: u64) -> OpponentView {
        OpponentView {
            phase: Phase::Flop,
            category,
            amount_to_call: to_call,
            pot,
            stack,
            opponent_stack: 1000,
            current_bet: to_call,
            contribution: 0,
            min_raise: 20,
        }
    }

    fn never_bluffs() -> BotProfile {
        BotProfile::default().with_seed(1).with_bluff(0.0)
    }

    #[test]
    fn strong_hand_bets_sixty_percent_of_pot() {
        let mut state = BotState::new(Some(1));
        let d = BotPolicy::decide(&view(Category::FullHouse, 0, 100, 1000), &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::Bet(60));
    }

    #[test]
    fn strong_bet_is_at_least_min_bet_and_capped_by_stack() {
        let mut state = BotState::new(Some(1));
        let d = BotPolicy::decide(&view(Category::FourOfAKind, 0, 10, 1000), &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::Bet(20));
        let d = BotPolicy::decide(&view(Category::FullHouse, 0, 1000, 50), &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::Bet(50));
    }

    #[test]
    fn strong_hand_raises_when_facing_bet() {
        let mut state = BotState::new(Some(1));
        let d = BotPolicy::decide(&view(Category::FullHouse, 50, 150, 1000), &never_bluffs(), &mut state);
        // 0.75 * 150 = 112.5 rounds to 113
        assert_eq!(d.action, Action::Raise(50 + 113));
    }

    #[test]
    fn strong_hand_short_stacked_goes_all_in() {
        let mut state = BotState::new(Some(1));
        let d = BotPolicy::decide(&view(Category::RoyalFlush, 100, 150, 50), &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::AllIn);
        let d = BotPolicy::decide(&view(Category::RoyalFlush, 100, 150, 110), &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::Call);
    }

    #[test]
    fn medium_hand_calls_good_odds_and_folds_bad_ones() {
        let mut state = BotState::new(Some(1));
        let p = never_bluffs();
        let d = BotPolicy::decide(&view(Category::Straight, 20, 100, 1000), &p, &mut state);
        assert_eq!(d.action, Action::Call);
        let d = BotPolicy::decide(&view(Category::Straight, 300, 100, 1000), &p, &mut state);
        assert_eq!(d.action, Action::Fold);
    }

    #[test]
    fn weak_hand_calls_only_tiny_bets() {
        let mut state = BotState::new(Some(1));
        let p = never_bluffs();
        let d = BotPolicy::decide(&view(Category::Pair, 5, 100, 1000), &p, &mut state);
        assert_eq!(d.action, Action::Call);
        let d = BotPolicy::decide(&view(Category::Pair, 40, 100, 1000), &p, &mut state);
        assert_eq!(d.action, Action::Fold);
    }

    #[test]
    fn weak_hand_checks_without_bluffing() {
        let mut state = BotState::new(Some(1));
        let d = BotPolicy::decide(&view(Category::HighCard, 0, 100, 1000), &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::Check);
    }

    #[test]
    fn always_bluffing_profile_bets_quarter_pot() {
        let mut state = BotState::new(Some(1));
        let p = BotProfile::default().with_bluff(1.0);
        let d = BotPolicy::decide(&view(Category::HighCard, 0, 200, 1000), &p, &mut state);
        assert_eq!(d.action, Action::Bet(50));
    }

    #[test]
    fn big_blind_option_raises_over_current_bet() {
        let mut state = BotState::new(Some(1));
        let mut v = view(Category::FullHouse, 0, 40, 980);
        v.current_bet = 20;
        v.contribution = 20;
        let d = BotPolicy::decide(&v, &never_bluffs(), &mut state);
        assert_eq!(d.action, Action::Raise(20 + 24));
    }

    #[test]
    fn seeded_opponents_agree() {
        let v = view(Category::Straight, 0, 100, 1000);
        let mut a = ScriptedOpponent::new(BotProfile::default().with_seed(99));
        let mut b = ScriptedOpponent::new(BotProfile::default().with_seed(99));
        for _ in 0..20 {
            assert_eq!(a.decide(&v), b.decide(&v));
        }
    }
}
