//! Hand lifecycle: blinds, streets, turn order, the opponent's moves, showdown and settlement.

use crate::agents::{Action, OpponentPolicy, OpponentView, ScriptedOpponent};
use crate::betting::{ActionError, BettingRound, IllegalAction, LegalActions};
use crate::config::{ConfigError, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, Category, EvalError, HandRank};
use crate::hand::{Board, HandError, HoleCards};
use crate::history::{HandHistory, HandHistoryVerb};
use crate::snapshot::{RoundSnapshot, Winner};
use crate::table::{Actor, Table};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use std::fmt;

/// Hole cards for both actors plus a full board.
const CARDS_PER_HAND: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Phase {
    #[default]
    Idle,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl Phase {
    /// Phases in which actors may act.
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// Community cards dealt when entering this phase.
    fn cards_dealt(self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            _ => 0,
        }
    }

    fn next_street(self) -> Option<Phase> {
        match self {
            Phase::PreFlop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::PreFlop => "Pre-flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
            Phase::Finished => "Finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("{actor} cannot cover the blind: stack {stack}, blind {required}")]
    InsufficientStack { actor: Actor, stack: u64, required: u64 },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("invalid hand: {0}")]
    Hand(#[from] HandError),
    #[error("hand evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

impl From<IllegalAction> for GameError {
    fn from(reason: IllegalAction) -> Self {
        GameError::Action(ActionError::Illegal(reason))
    }
}

/// How the last hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Outcome {
    pub winner: Winner,
    /// Chips each actor took from the pot, indexed by `Actor::index`.
    pub payouts: [u64; 2],
    /// False when the hand ended on a fold.
    pub showdown: bool,
    pub human_rank: Option<HandRank>,
    pub opponent_rank: Option<HandRank>,
}

/// Mutable state of the hand in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct RoundState {
    pub(crate) phase: Phase,
    pub(crate) community: Board,
    pub(crate) betting: BettingRound,
    pub(crate) to_act: Option<Actor>,
}

impl RoundState {
    fn new(min_raise: u64) -> Self {
        Self {
            phase: Phase::Idle,
            community: Board::default(),
            betting: BettingRound::new(min_raise),
            to_act: None,
        }
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the community cards dealt so far
    pub fn community(&self) -> &Board {
        &self.community
    }

    /// Returns the highest contribution in the current betting round
    pub fn current_bet(&self) -> u64 {
        self.betting.current_bet()
    }

    /// Returns the actor who moved last in the current betting round
    pub fn last_to_act(&self) -> Option<Actor> {
        self.betting.last_to_act()
    }

    /// Returns the actor whose decision is awaited
    pub fn to_act(&self) -> Option<Actor> {
        self.to_act
    }

    pub fn betting(&self) -> &BettingRound {
        &self.betting
    }
}

/// A bet-sizing shortcut offered to the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct BetPreset {
    pub label: &'static str,
    pub target: u64,
}

/// One heads-up match: a human against an `OpponentPolicy`, hand after hand.
///
/// ```
/// use holdem_duel::agents::Action;
/// use holdem_duel::config::TableConfig;
/// use holdem_duel::game::{Game, Phase};
///
/// let mut game = Game::new(TableConfig::default().with_seed(3)).unwrap();
/// let snap = game.start_hand(1000, 1000).unwrap();
/// assert_eq!(snap.phase, Phase::PreFlop);
/// assert_eq!(snap.pot, 30);
///
/// let snap = game.submit_human_action(Action::Fold).unwrap();
/// assert_eq!(snap.phase, Phase::Finished);
/// assert_eq!(snap.opponent_stack, 1010);
/// ```
#[non_exhaustive]
pub struct Game {
    config: TableConfig,
    rng: ChaCha8Rng,
    deck: Deck,
    table: Table,
    state: RoundState,
    opponent: Box<dyn OpponentPolicy + Send>,
    history: HandHistory,
    message: String,
    outcome: Option<Outcome>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.state.phase)
            .field("table", &self.table)
            .field("to_act", &self.state.to_act)
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    /// The default table against the default scripted opponent.
    fn default() -> Self {
        let config = TableConfig::default();
        let opponent = Box::new(ScriptedOpponent::new(config.opponent.clone()));
        Self::build(config, opponent)
    }
}

impl Game {
    /// A game against the scripted opponent described by `config.opponent`.
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        let opponent = Box::new(ScriptedOpponent::new(config.opponent.clone()));
        Self::with_opponent(config, opponent)
    }

    pub fn with_opponent(
        config: TableConfig,
        opponent: Box<dyn OpponentPolicy + Send>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(config, opponent))
    }

    fn build(config: TableConfig, opponent: Box<dyn OpponentPolicy + Send>) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            deck: Deck::standard(),
            table: Table::new(config.starting_stack, config.opponent_stack),
            state: RoundState::new(config.min_raise),
            opponent,
            history: HandHistory::default(),
            message: String::from("Press Space to deal."),
            outcome: None,
            config,
        }
    }

    /// Swap the opponent policy. Takes effect from its next decision.
    pub fn set_opponent(&mut self, opponent: Box<dyn OpponentPolicy + Send>) {
        self.opponent = opponent;
    }

    /// Returns the table configuration
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the state of the hand in progress
    pub fn round(&self) -> &RoundState {
        &self.state
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Returns the seats and pot
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the current pot size
    pub fn pot(&self) -> u64 {
        self.table.pot()
    }

    /// Returns the community cards
    pub fn board(&self) -> &Board {
        &self.state.community
    }

    /// Returns the action log of the current hand
    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    /// Returns the latest status line
    pub fn last_message(&self) -> &str {
        &self.message
    }

    /// Returns how the last hand ended
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Start a hand with a freshly shuffled deck. Any hand in progress is discarded.
    pub fn start_hand(
        &mut self,
        human_stack: u64,
        opponent_stack: u64,
    ) -> Result<RoundSnapshot, GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        self.start_hand_with_deck(human_stack, opponent_stack, deck)
    }

    /// Start the next hand with the stacks left over from the previous one.
    pub fn next_hand(&mut self) -> Result<RoundSnapshot, GameError> {
        let (h, o) = self.stacks();
        self.start_hand(h, o)
    }

    /// Start a hand dealing from `deck`: two cards to the human, two to the
    /// opponent, then flop, turn and river in draw order.
    pub fn start_hand_with_deck(
        &mut self,
        human_stack: u64,
        opponent_stack: u64,
        mut deck: Deck,
    ) -> Result<RoundSnapshot, GameError> {
        let blinds = [
            (Actor::Human, human_stack, self.config.small_blind),
            (Actor::Opponent, opponent_stack, self.config.big_blind),
        ];
        for (actor, stack, required) in blinds {
            if stack == 0 || stack < required {
                self.message = format!("{actor} cannot post the {required} blind. Game over.");
                return Err(GameError::InsufficientStack { actor, stack, required });
            }
        }
        if deck.len() < CARDS_PER_HAND {
            return Err(DeckError::TooShort { needed: CARDS_PER_HAND, available: deck.len() }.into());
        }

        let human = HoleCards::from_slice(&deck.draw_n(2)?)?;
        let opponent = HoleCards::from_slice(&deck.draw_n(2)?)?;
        self.deck = deck;
        self.table = Table::new(human_stack, opponent_stack);
        self.table.seat_for_hand(human, opponent);
        self.state = RoundState::new(self.config.min_raise);
        self.state.phase = Phase::PreFlop;
        self.history.clear();
        self.outcome = None;

        let sb = self.state.betting.post_blind(Actor::Human, self.config.small_blind, &mut self.table);
        self.history.record(Actor::Human, HandHistoryVerb::SmallBlind, Some(sb), Phase::PreFlop);
        let bb =
            self.state.betting.post_blind(Actor::Opponent, self.config.big_blind, &mut self.table);
        self.history.record(Actor::Opponent, HandHistoryVerb::BigBlind, Some(bb), Phase::PreFlop);

        info!("new hand: stacks {human_stack}/{opponent_stack}, blinds {sb}/{bb}");
        self.message = format!("New hand. Blinds {sb}/{bb}.");
        self.progress()?;
        self.drive_opponent()?;
        Ok(self.snapshot())
    }

    /// Apply the human's action, then let the round move on.
    pub fn submit_human_action(&mut self, action: Action) -> Result<RoundSnapshot, GameError> {
        self.ensure_turn(Actor::Human)?;
        self.apply(Actor::Human, action)?;
        self.drive_opponent()?;
        Ok(self.snapshot())
    }

    /// Ask the opponent policy for its move and apply it.
    pub fn submit_opponent_turn(&mut self) -> Result<RoundSnapshot, GameError> {
        self.ensure_turn(Actor::Opponent)?;
        self.opponent_turn()?;
        Ok(self.snapshot())
    }

    /// True when the opponent is to act and the host has to call `submit_opponent_turn`.
    pub fn pending_opponent_turn(&self) -> bool {
        self.state.phase.is_betting() && self.state.to_act == Some(Actor::Opponent)
    }

    /// Close the current betting round as it stands and deal the next street.
    pub fn force_advance_phase(&mut self) -> Result<RoundSnapshot, GameError> {
        if !self.state.phase.is_betting() {
            return Err(IllegalAction::NoHandInProgress.into());
        }
        if self.state.phase == Phase::River {
            self.showdown()?;
        } else {
            self.deal_next_street()?;
            self.progress()?;
            self.drive_opponent()?;
        }
        Ok(self.snapshot())
    }

    /// Deal out the board and settle immediately.
    pub fn force_showdown(&mut self) -> Result<RoundSnapshot, GameError> {
        if !self.state.phase.is_betting() {
            return Err(IllegalAction::NoHandInProgress.into());
        }
        while self.state.phase != Phase::River {
            self.deal_next_street()?;
        }
        self.showdown()?;
        Ok(self.snapshot())
    }

    /// What the human may do right now. Empty when it is not the human's turn.
    pub fn legal_actions(&self) -> LegalActions {
        if !self.state.phase.is_betting() || self.state.to_act != Some(Actor::Human) {
            return LegalActions::default();
        }
        self.state.betting.legal_actions(Actor::Human, &self.table)
    }

    /// Bet sizes for the human: minimum, half pot, pot and all-in, each clamped
    /// into the legal range. Empty when betting or raising is not possible.
    pub fn bet_presets(&self) -> Vec<BetPreset> {
        let legal = self.legal_actions();
        if !(legal.can_bet || legal.can_raise) {
            return Vec::new();
        }
        let current = self.state.betting.current_bet();
        let pot = self.table.pot();
        [
            ("Min", self.state.betting.min_target()),
            ("½ Pot", current + pot / 2),
            ("Pot", current + pot),
            ("All-in", legal.max_target),
        ]
        .into_iter()
        .map(|(label, target)| BetPreset {
            label,
            target: target.clamp(legal.min_target, legal.max_target),
        })
        .collect()
    }

    /// Stacks as `(human, opponent)`.
    pub fn stacks(&self) -> (u64, u64) {
        (self.table.seat(Actor::Human).stack(), self.table.seat(Actor::Opponent).stack())
    }

    /// No hand in progress and one side can no longer post its blind.
    pub fn is_game_over(&self) -> bool {
        if self.state.phase.is_betting() {
            return false;
        }
        let (h, o) = self.stacks();
        h == 0 || o == 0 || h < self.config.small_blind || o < self.config.big_blind
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let human = self.table.seat(Actor::Human);
        let opponent = self.table.seat(Actor::Opponent);
        let revealed = matches!(self.state.phase, Phase::Showdown | Phase::Finished);
        let rank_of = |hole: Option<HoleCards>| -> Option<Category> {
            hole.and_then(|h| evaluate(&h, &self.state.community).ok()).map(|r| r.category)
        };
        RoundSnapshot {
            phase: self.state.phase,
            pot: self.table.pot(),
            current_bet: self.state.betting.current_bet(),
            community: self.state.community.as_slice().to_vec(),
            human_hand: human.hole(),
            opponent_hand: if revealed { opponent.hole() } else { None },
            human_stack: human.stack(),
            opponent_stack: opponent.stack(),
            human_contribution: human.contribution(),
            opponent_contribution: opponent.contribution(),
            to_act: self.state.to_act,
            pending_opponent: self.pending_opponent_turn(),
            last_message: self.message.clone(),
            winner: self.outcome.map(|o| o.winner),
            human_rank: rank_of(human.hole()),
            opponent_rank: if revealed { rank_of(opponent.hole()) } else { None },
        }
    }

    fn ensure_turn(&self, actor: Actor) -> Result<(), GameError> {
        if !self.state.phase.is_betting() {
            return Err(IllegalAction::NoHandInProgress.into());
        }
        match self.state.to_act {
            Some(a) if a == actor => Ok(()),
            Some(a) => Err(IllegalAction::NotYourTurn(a).into()),
            None => Err(IllegalAction::NoHandInProgress.into()),
        }
    }

    fn apply(&mut self, actor: Actor, action: Action) -> Result<(), GameError> {
        let mv = self.state.betting.apply(actor, action, &mut self.table)?;
        self.history.record(actor, mv.verb, mv.amount, self.state.phase);
        if let Some(entry) = self.history.entries().last() {
            debug!("{} {entry}", self.state.phase);
            self.message = format!("{entry}.");
        }
        self.progress()
    }

    fn opponent_turn(&mut self) -> Result<(), GameError> {
        let view = self.opponent_view()?;
        let legal = self.state.betting.legal_actions(Actor::Opponent, &self.table);
        let wanted = self.opponent.decide(&view);
        let action = legal.legalize(wanted);
        if action != wanted {
            warn!("opponent wanted {wanted}, playing {action}");
        }
        match self.apply(Actor::Opponent, action) {
            Err(GameError::Action(err)) => {
                warn!("opponent action {action} rejected: {err}");
                let fallback = if legal.can_check { Action::Check } else { Action::Fold };
                self.apply(Actor::Opponent, fallback)
            }
            other => other,
        }
    }

    fn opponent_view(&self) -> Result<OpponentView, GameError> {
        let me = self.table.seat(Actor::Opponent);
        let hole = me.hole().ok_or(IllegalAction::NoHandInProgress)?;
        let category = evaluate(&hole, &self.state.community)?.category;
        Ok(OpponentView {
            phase: self.state.phase,
            category,
            amount_to_call: self.state.betting.to_call(Actor::Opponent, &self.table),
            pot: self.table.pot(),
            stack: me.stack(),
            opponent_stack: self.table.seat(Actor::Human).stack(),
            current_bet: self.state.betting.current_bet(),
            contribution: me.contribution(),
            min_raise: self.config.min_raise,
        })
    }

    /// With a synchronous opponent, play its turns until the human is up or the hand is over.
    fn drive_opponent(&mut self) -> Result<(), GameError> {
        while self.config.auto_opponent && self.pending_opponent_turn() {
            self.opponent_turn()?;
        }
        Ok(())
    }

    /// Settle folds, close finished rounds and pick the next actor.
    fn progress(&mut self) -> Result<(), GameError> {
        loop {
            if let Some(folder) = Actor::BOTH.into_iter().find(|&a| !self.table.seat(a).in_hand()) {
                self.settle_fold(folder);
                return Ok(());
            }
            if !self.state.betting.is_complete(&self.table) {
                self.state.to_act = self.next_to_act();
                return Ok(());
            }
            if self.state.phase == Phase::River {
                return self.showdown();
            }
            // nobody left to act on this street: deal on, which runs out the board when all-in
            self.deal_next_street()?;
        }
    }

    fn next_to_act(&self) -> Option<Actor> {
        let order = match self.state.betting.last_to_act() {
            Some(last) => [last.other(), last],
            None => Actor::BOTH,
        };
        order.into_iter().find(|&a| self.state.betting.needs_action(a, &self.table))
    }

    fn deal_next_street(&mut self) -> Result<(), GameError> {
        let next = self.state.phase.next_street().ok_or(IllegalAction::NoHandInProgress)?;
        let cards = self.deck.draw_n(next.cards_dealt())?;
        self.state.community.extend(cards)?;
        self.state.phase = next;
        self.state.betting = BettingRound::new(self.config.min_raise);
        self.state.to_act = None;
        self.table.clear_contributions();

        let board: Vec<String> = self.state.community.as_slice().iter().map(|c| c.to_string()).collect();
        info!("{next}: {}", board.join(" "));
        self.message = format!("{next}: {}", board.join(" "));
        Ok(())
    }

    fn settle_fold(&mut self, folder: Actor) {
        let winner = folder.other();
        let won = self.table.award(winner, self.table.pot());
        let mut payouts = [0; 2];
        payouts[winner.index()] = won;
        self.history.record(winner, HandHistoryVerb::Win, Some(won), self.state.phase);
        self.finish(Outcome {
            winner: winner.into(),
            payouts,
            showdown: false,
            human_rank: None,
            opponent_rank: None,
        });
        info!("{folder} folded; {winner} wins {won}");
        self.message = format!("{folder} folded. {winner} won {won}.");
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.state.phase = Phase::Showdown;
        self.state.to_act = None;
        if let Some((actor, refund)) = self.table.refund_uncalled() {
            self.history.record(actor, HandHistoryVerb::Refund, Some(refund), Phase::Showdown);
        }

        let human = self.rank_of(Actor::Human)?;
        let opponent = self.rank_of(Actor::Opponent)?;

        let pot = self.table.pot();
        let mut payouts = [0; 2];
        let winner = match human.cmp(&opponent) {
            Ordering::Greater => Winner::Human,
            Ordering::Less => Winner::Opponent,
            Ordering::Equal => Winner::Split,
        };
        match winner {
            Winner::Human => payouts[0] = self.table.award(Actor::Human, pot),
            Winner::Opponent => payouts[1] = self.table.award(Actor::Opponent, pot),
            Winner::Split => {
                // odd chip goes to the small blind
                let half = pot / 2;
                payouts[0] = self.table.award(Actor::Human, pot - half);
                payouts[1] = self.table.award(Actor::Opponent, half);
            }
        }
        for actor in Actor::BOTH {
            let paid = payouts[actor.index()];
            if paid > 0 {
                let verb =
                    if winner == Winner::Split { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
                self.history.record(actor, verb, Some(paid), Phase::Showdown);
            }
        }

        self.message = match winner {
            Winner::Human => format!("You win {} with {}.", payouts[0], human.category),
            Winner::Opponent => format!("Opponent wins {} with {}.", payouts[1], opponent.category),
            Winner::Split => {
                format!("Split pot: {} / {} ({}).", payouts[0], payouts[1], human.category)
            }
        };
        info!(
            "showdown: {} ({:?}) vs {} ({:?}) -> {:?} {:?}",
            human.category,
            human.to_tuple(),
            opponent.category,
            opponent.to_tuple(),
            winner,
            payouts
        );
        self.finish(Outcome {
            winner,
            payouts,
            showdown: true,
            human_rank: Some(human),
            opponent_rank: Some(opponent),
        });
        Ok(())
    }

    fn rank_of(&self, actor: Actor) -> Result<HandRank, GameError> {
        let hole = self.table.seat(actor).hole().ok_or(IllegalAction::NoHandInProgress)?;
        Ok(evaluate(&hole, &self.state.community)?)
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.state.phase = Phase::Finished;
        self.state.to_act = None;
    }
}
