use crate::agents::{Action, BotProfile, Difficulty, OpponentPacer, ScriptedOpponent};
use crate::config::TableConfig;
use crate::game::{Game, Phase};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewHand,
    Fold,
    Check,
    Call,
    BetMin,
    BetHalfPot,
    BetPot,
    AllIn,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountIncBb,
    AmountDecBb,
    AmountSubmit,
    AmountCancel,
    BotDifficultyNext,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    // Core game engine instance; the opponent is paced, never synchronous
    pub game: Game,
    pub pacer: OpponentPacer,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_starting_stack: u64,
    pub cfg_opponent_stack: u64,
    pub cfg_small_blind: u64,
    pub cfg_big_blind: u64,
    pub cfg_bot_delay_ms: u64,
    pub cfg_bot_difficulty: Difficulty,
    pub hand_started: bool,
    pub(crate) config: TableConfig,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let config = TableConfig::default().with_auto_opponent(false);
        let pacer = OpponentPacer::default();
        Self {
            scene: Scene::Menu,
            started: Instant::now(),
            game: Self::build_game(&config),
            menu_index: 0,
            cfg_starting_stack: config.starting_stack,
            cfg_opponent_stack: config.opponent_stack,
            cfg_small_blind: config.small_blind,
            cfg_big_blind: config.big_blind,
            cfg_bot_delay_ms: pacer.delay_ms(),
            cfg_bot_difficulty: config.opponent.difficulty,
            hand_started: false,
            pacer,
            config,
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            action_error: None,
            action_error_at: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub(crate) fn build_game(config: &TableConfig) -> Game {
        // menu values are clamped before they get here
        Game::new(config.clone()).unwrap_or_else(|err| {
            log::warn!("rejected table config ({err}); using defaults");
            Game::default()
        })
    }

    fn can_act(&self) -> bool {
        self.scene == Scene::Table
            && self.hand_started
            && self.game.phase().is_betting()
            && self.game.round().to_act() == Some(crate::table::Actor::Human)
    }

    fn submit(&mut self, action: Action) -> bool {
        if !self.can_act() {
            return false;
        }
        match self.game.submit_human_action(action) {
            Ok(_) => {
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn submit_preset(&mut self, label: &str) -> bool {
        let legal = self.game.legal_actions();
        match self.game.bet_presets().into_iter().find(|p| p.label == label) {
            Some(preset) => self.submit(legal.wager(preset.target)),
            None => false,
        }
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn bot_profile_label(&self) -> &'static str {
        self.config.opponent.difficulty.label()
    }

    fn open_amount_entry(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        let legal = self.game.legal_actions();
        if !(legal.can_bet || legal.can_raise) {
            return false;
        }
        self.amount_entry = Some(legal.min_target.to_string());
        self.amount_entry_error = None;
        true
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() >= 12 {
                return;
            }
            buf.push(char::from(b'0' + digit));
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_adjust_bb(&mut self, delta: i64) {
        let step = self.config.big_blind.max(1) as i64;
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<i64>().unwrap_or(0);
            let next = (cur + delta * step).max(0);
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_ref() else {
            return false;
        };
        let amount = match buf.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                self.amount_entry_error = Some("Invalid amount".to_string());
                return false;
            }
        };
        let legal = self.game.legal_actions();
        if amount < legal.min_target {
            let what = if legal.can_bet { "bet" } else { "raise" };
            self.amount_entry_error = Some(format!("Min {what} is {}", legal.min_target));
            return false;
        }
        if amount > legal.max_target {
            self.amount_entry_error = Some(format!("Max is {}", legal.max_target));
            return false;
        }
        if self.submit(legal.wager(amount)) {
            self.amount_entry = None;
            self.amount_entry_error = None;
            return true;
        }
        self.amount_entry_error = Some("Action not allowed".to_string());
        false
    }

    fn amount_entry_cancel(&mut self) {
        self.amount_entry = None;
        self.amount_entry_error = None;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewHand => {
                if self.scene == Scene::Table {
                    self.new_hand();
                }
                false
            }
            InputAction::Fold => self.submit(Action::Fold),
            InputAction::Check => self.submit(Action::Check),
            InputAction::Call => self.submit(Action::Call),
            InputAction::BetMin => self.submit_preset("Min"),
            InputAction::BetHalfPot => self.submit_preset("½ Pot"),
            InputAction::BetPot => self.submit_preset("Pot"),
            InputAction::AllIn => self.submit(Action::AllIn),
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                self.amount_entry_backspace();
                false
            }
            InputAction::AmountIncBb => {
                self.amount_entry_adjust_bb(1);
                false
            }
            InputAction::AmountDecBb => {
                self.amount_entry_adjust_bb(-1);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry_cancel();
                false
            }
            InputAction::BotDifficultyNext => {
                if self.scene == Scene::Table {
                    self.cycle_bot_difficulty();
                }
                false
            }
        }
    }

    /// Deal the next hand, carrying stacks over. The first hand of a session
    /// uses the configured stacks.
    pub fn new_hand(&mut self) {
        if self.hand_started && self.game.phase().is_betting() {
            return;
        }
        let result = if self.hand_started {
            self.game.next_hand()
        } else {
            self.game.start_hand(self.config.starting_stack, self.config.opponent_stack)
        };
        match result {
            Ok(_) => {
                self.hand_started = true;
                self.history_offset = 0;
                self.pacer.reset();
                self.clear_action_error();
            }
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    pub fn cycle_bot_difficulty(&mut self) {
        let all = Difficulty::ALL;
        let pos = all.iter().position(|d| *d == self.config.opponent.difficulty).unwrap_or(0);
        let next = all[(pos + 1) % all.len()];
        self.cfg_bot_difficulty = next;
        self.config.opponent = BotProfile::for_difficulty(next);
        self.game.set_opponent(Box::new(ScriptedOpponent::new(self.config.opponent.clone())));
    }

    pub(crate) fn restart_session(&mut self) {
        self.game = Self::build_game(&self.config);
        self.pacer.reset();
        self.hand_started = false;
    }

    /// Called on every controller tick: expire stale errors and let the paced opponent move.
    pub fn opponent_on_tick(&mut self) {
        if self.scene != Scene::Table || !self.hand_started {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.pacer.on_tick(&mut self.game) {
            Ok(true) => self.clear_action_error(),
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    pub fn hand_over(&self) -> bool {
        matches!(self.game.phase(), Phase::Finished | Phase::Showdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_ignored_before_deal() {
        let mut app = AppState::default();
        app.apply_menu();
        assert!(!app.handle_input(InputAction::Fold));
        assert_eq!(app.game.phase(), Phase::Idle);
    }

    #[test]
    fn action_ignored_on_opponent_turn() {
        let mut app = AppState::default();
        app.apply_menu();
        app.new_hand();
        assert!(app.handle_input(InputAction::Call));
        assert!(app.game.pending_opponent_turn());
        let before = app.game.history().len();
        assert!(!app.handle_input(InputAction::Check));
        assert_eq!(app.game.history().len(), before);
    }
}
