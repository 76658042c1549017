#![cfg(feature = "serde")]

use holdem_duel::agents::Action;
use holdem_duel::config::TableConfig;
use holdem_duel::game::{Game, Phase};
use holdem_duel::snapshot::RoundSnapshot;

#[test]
fn snapshot_survives_json() {
    let mut g = Game::new(TableConfig::default().with_seed(8)).unwrap();
    g.start_hand(1000, 1000).unwrap();
    let snap = g.submit_human_action(Action::Fold).unwrap();

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"finished\""));
    assert!(json.contains("\"winner\":\"opponent\""));
    let back: RoundSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
    assert_eq!(back.phase, Phase::Finished);
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: TableConfig = serde_json::from_str(r#"{"small_blind": 5, "big_blind": 10}"#).unwrap();
    assert_eq!((config.small_blind, config.big_blind), (5, 10));
    assert_eq!(config.starting_stack, 1000);
    assert!(config.auto_opponent);
    config.validate().unwrap();
}

#[test]
fn history_serializes_with_phase() {
    let mut g = Game::new(TableConfig::default().with_seed(9)).unwrap();
    g.start_hand(1000, 1000).unwrap();
    let json = serde_json::to_string(g.history()).unwrap();
    assert!(json.contains("pre-flop"));
}
