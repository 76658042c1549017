use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.opponent_on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key press onto the app. Returns true when the user asked to quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('L') => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }
    if app.amount_entry_active() {
        match code {
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::AmountCancel);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::AmountSubmit);
            }
            KeyCode::Backspace => {
                let _ = app.handle_input(InputAction::AmountBackspace);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::AmountIncBb);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::AmountDecBb);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let _ = app.handle_input(InputAction::AmountDigit(c as u8 - b'0'));
            }
            _ => {}
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Table => {
            let action = match code {
                KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
                KeyCode::Char('l') | KeyCode::Char('L') => Some(InputAction::ToggleHistory),
                KeyCode::Char(' ') => Some(InputAction::NewHand),
                KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::AmountOpen),
                KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::BotDifficultyNext),
                KeyCode::Char('f') | KeyCode::Char('F') => Some(InputAction::Fold),
                KeyCode::Char('k') | KeyCode::Char('K') => Some(InputAction::Check),
                KeyCode::Char('c') | KeyCode::Char('C') => Some(InputAction::Call),
                KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Char('r') | KeyCode::Char('R') => {
                    Some(InputAction::BetMin)
                }
                KeyCode::Char('h') | KeyCode::Char('H') => Some(InputAction::BetHalfPot),
                KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::BetPot),
                KeyCode::Char('i') | KeyCode::Char('I') => Some(InputAction::AllIn),
                KeyCode::Char('q') | KeyCode::Char('Q') => return true,
                _ => None,
            };
            if let Some(action) = action {
                let _ = app.handle_input(action);
            }
        }
    }
    false
}
