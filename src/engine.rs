// Engine API boundary. Hosts (the TUI, tests, scripted drivers) talk to the
// round engine through this trait and never touch `Game` internals. Every
// mutating call returns the snapshot the host should render next.

use crate::agents::Action;
use crate::betting::LegalActions;
use crate::game::{BetPreset, Game, GameError, Phase};
use crate::history::HandHistory;
use crate::snapshot::RoundSnapshot;

pub trait HoldemEngine {
    // Hand lifecycle
    fn start_hand(&mut self, human_stack: u64, opponent_stack: u64)
        -> Result<RoundSnapshot, GameError>;
    fn next_hand(&mut self) -> Result<RoundSnapshot, GameError>;

    // Actions
    fn submit_human_action(&mut self, action: Action) -> Result<RoundSnapshot, GameError>;
    fn submit_opponent_turn(&mut self) -> Result<RoundSnapshot, GameError>;
    fn force_advance_phase(&mut self) -> Result<RoundSnapshot, GameError>;
    fn force_showdown(&mut self) -> Result<RoundSnapshot, GameError>;

    // Queries
    fn pending_opponent_turn(&self) -> bool;
    fn snapshot(&self) -> RoundSnapshot;
    fn legal_actions(&self) -> LegalActions;
    fn bet_presets(&self) -> Vec<BetPreset>;
    fn history(&self) -> &HandHistory;
    fn phase(&self) -> Phase;
    fn is_game_over(&self) -> bool;
}

impl HoldemEngine for Game {
    fn start_hand(
        &mut self,
        human_stack: u64,
        opponent_stack: u64,
    ) -> Result<RoundSnapshot, GameError> {
        Game::start_hand(self, human_stack, opponent_stack)
    }
    fn next_hand(&mut self) -> Result<RoundSnapshot, GameError> {
        Game::next_hand(self)
    }

    fn submit_human_action(&mut self, action: Action) -> Result<RoundSnapshot, GameError> {
        Game::submit_human_action(self, action)
    }
    fn submit_opponent_turn(&mut self) -> Result<RoundSnapshot, GameError> {
        Game::submit_opponent_turn(self)
    }
    fn force_advance_phase(&mut self) -> Result<RoundSnapshot, GameError> {
        Game::force_advance_phase(self)
    }
    fn force_showdown(&mut self) -> Result<RoundSnapshot, GameError> {
        Game::force_showdown(self)
    }

    fn pending_opponent_turn(&self) -> bool {
        Game::pending_opponent_turn(self)
    }
    fn snapshot(&self) -> RoundSnapshot {
        Game::snapshot(self)
    }
    fn legal_actions(&self) -> LegalActions {
        Game::legal_actions(self)
    }
    fn bet_presets(&self) -> Vec<BetPreset> {
        Game::bet_presets(self)
    }
    fn history(&self) -> &HandHistory {
        Game::history(self)
    }
    fn phase(&self) -> Phase {
        Game::phase(self)
    }
    fn is_game_over(&self) -> bool {
        Game::is_game_over(self)
    }
}
