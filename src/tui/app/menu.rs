use crate::agents::{BotProfile, Difficulty};

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    StartingStack,
    OpponentStack,
    SmallBlind,
    BigBlind,
    BotDifficulty,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::StartingStack,
    MenuItem::OpponentStack,
    MenuItem::SmallBlind,
    MenuItem::BigBlind,
    MenuItem::BotDifficulty,
    MenuItem::BotDelayMs,
];

fn cycle(difficulty: Difficulty, step: isize) -> Difficulty {
    let all = Difficulty::ALL;
    let len = all.len() as isize;
    let pos = all.iter().position(|d| *d == difficulty).unwrap_or(0) as isize;
    all[(pos + step).rem_euclid(len) as usize]
}

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::StartingStack => format!("Your Stack: ${}", app.cfg_starting_stack),
            MenuItem::OpponentStack => format!("Opponent Stack: ${}", app.cfg_opponent_stack),
            MenuItem::SmallBlind => format!("Small Blind: {}", app.cfg_small_blind),
            MenuItem::BigBlind => format!("Big Blind: {}", app.cfg_big_blind),
            MenuItem::BotDifficulty => {
                format!("Opponent: {}", app.cfg_bot_difficulty.label())
            }
            MenuItem::BotDelayMs => format!("Opponent Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::StartingStack => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_add(100);
            }
            MenuItem::OpponentStack => {
                app.cfg_opponent_stack = app.cfg_opponent_stack.saturating_add(100);
            }
            MenuItem::SmallBlind => {
                app.cfg_small_blind = app.cfg_small_blind.saturating_add(5);
                if app.cfg_big_blind < app.cfg_small_blind {
                    app.cfg_big_blind = app.cfg_small_blind;
                }
            }
            MenuItem::BigBlind => {
                app.cfg_big_blind = app.cfg_big_blind.saturating_add(5);
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
            MenuItem::BotDifficulty => {
                app.cfg_bot_difficulty = cycle(app.cfg_bot_difficulty, 1);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::StartingStack => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_sub(100).max(100);
            }
            MenuItem::OpponentStack => {
                app.cfg_opponent_stack = app.cfg_opponent_stack.saturating_sub(100).max(100);
            }
            MenuItem::SmallBlind => {
                app.cfg_small_blind = app.cfg_small_blind.saturating_sub(5).max(5);
            }
            MenuItem::BigBlind => {
                app.cfg_big_blind = app.cfg_big_blind.saturating_sub(5).max(5);
                if app.cfg_big_blind < app.cfg_small_blind {
                    app.cfg_small_blind = app.cfg_big_blind;
                }
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
            MenuItem::BotDifficulty => {
                app.cfg_bot_difficulty = cycle(app.cfg_bot_difficulty, -1);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_starting_stack = self.config.starting_stack;
        self.cfg_opponent_stack = self.config.opponent_stack;
        self.cfg_small_blind = self.config.small_blind;
        self.cfg_big_blind = self.config.big_blind;
        self.cfg_bot_delay_ms = self.pacer.delay_ms();
        self.cfg_bot_difficulty = self.config.opponent.difficulty;
        self.scene = super::Scene::Menu;
    }

    /// Apply the edited settings and start a fresh session.
    pub fn apply_menu(&mut self) {
        // Ensure invariants
        if self.cfg_small_blind == 0 {
            self.cfg_small_blind = 1;
        }
        if self.cfg_big_blind < self.cfg_small_blind {
            self.cfg_big_blind = self.cfg_small_blind;
        }
        self.cfg_starting_stack = self.cfg_starting_stack.max(self.cfg_small_blind);
        self.cfg_opponent_stack = self.cfg_opponent_stack.max(self.cfg_big_blind);

        self.pacer.set_delay_ms(self.cfg_bot_delay_ms);
        self.config = self
            .config
            .clone()
            .with_blinds(self.cfg_small_blind, self.cfg_big_blind)
            .with_min_raise(self.cfg_big_blind)
            .with_stacks(self.cfg_starting_stack, self.cfg_opponent_stack)
            .with_opponent(BotProfile::for_difficulty(self.cfg_bot_difficulty))
            .with_auto_opponent(false);
        self.restart_session();
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
