use crate::cards::Card;
use crate::game::Phase;
use crate::hand::HoleCards;
use crate::snapshot::{RoundSnapshot, Winner};
use crate::table::Actor;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let snap = app.game.snapshot();
    let header_height: u16 = 2 + 2;
    let status_height: u16 = 3 + 2; // content + borders

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // header
            Constraint::Min(7),                // opponent seat
            Constraint::Length(5),             // board
            Constraint::Min(7),                // human seat
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    let config = app.game.config();
    let header_lines = vec![
        Line::from(format!(
            "SB: {}  BB: {}  Pot: ${}  Opponent: {}",
            config.small_blind,
            config.big_blind,
            snap.pot,
            app.bot_profile_label(),
        )),
        Line::from(format!(
            "Bet: {}   MinRaise: {}   ToCall: {}",
            snap.current_bet,
            config.min_raise,
            app.game.legal_actions().to_call
        )),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("holdem-duel").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    render_seat(f, chunks[1], &snap, Actor::Opponent);
    render_board(f, chunks[2], &snap);
    render_seat(f, chunks[3], &snap, Actor::Human);

    // Status bar: split horizontally for info vs keys
    let status_area = chunks[4];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let status_inner = inner(status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let mut left_info = if !app.hand_started {
        vec![Line::from("Hand not started. Press Space to deal.")]
    } else {
        vec![Line::from(snap.last_message.clone())]
    };
    if app.hand_started && app.game.is_game_over() {
        left_info.push(Line::from(Span::styled(
            "Game over. Press M for a new session.",
            Style::default().fg(Color::Yellow),
        )));
    } else if app.hand_over() {
        left_info.push(Line::from("Hand over. Press Space for the next hand."));
    } else if snap.pending_opponent {
        left_info.push(Line::from("Opponent is thinking..."));
    }
    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let legal = app.game.legal_actions();
    let action_style = |enabled: bool| {
        if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };
    if snap.phase.is_betting() && snap.to_act == Some(Actor::Human) {
        let wager = legal.can_bet || legal.can_raise;
        let sizing: Vec<String> = app
            .game
            .bet_presets()
            .iter()
            .map(|p| format!("{} {}", p.label, p.target))
            .collect();
        left_info.push(Line::from(vec![
            Span::raw("Actions: "),
            Span::styled("F fold", action_style(true)),
            Span::raw(" • "),
            Span::styled("K check", action_style(legal.can_check)),
            Span::raw(" • "),
            Span::styled(format!("C call {}", legal.to_call), action_style(legal.to_call > 0)),
            Span::raw(" • "),
            Span::styled("B/H/P/I bet", action_style(wager || legal.can_all_in)),
            Span::raw(" • "),
            Span::styled(sizing.join(" / "), Style::default().add_modifier(Modifier::DIM)),
        ]));
    }

    let right_keys = vec![
        Line::from(""),
        Line::from("? help • L log • M menu"),
        Line::from("A amount • D difficulty"),
    ];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn render_board(f: &mut Frame, area: Rect, snap: &RoundSnapshot) {
    let board_block =
        Block::default().title(format!("Board - {}", snap.phase)).borders(Borders::ALL);
    let board_inner = inner(area);
    let card_width = board_inner.width.saturating_sub(2) / 5;
    let board_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(card_width); 5])
        .split(board_inner);
    f.render_widget(board_block, area);
    for (i, chunk) in board_chunks.iter().enumerate() {
        let highlight = match snap.phase {
            Phase::Flop => i < 3,
            Phase::Turn => i == 3,
            Phase::River => i == 4,
            _ => false,
        };
        render_card_widget(
            f,
            *chunk,
            snap.community.get(i).copied(),
            if highlight { Some(Color::Yellow) } else { None },
        );
    }
}

fn render_seat(f: &mut Frame, seat_area: Rect, snap: &RoundSnapshot, actor: Actor) {
    let (hand, stack, bet, rank) = match actor {
        Actor::Human => {
            (snap.human_hand, snap.human_stack, snap.human_contribution, snap.human_rank)
        }
        Actor::Opponent => (
            snap.opponent_hand,
            snap.opponent_stack,
            snap.opponent_contribution,
            snap.opponent_rank,
        ),
    };
    let mut title = actor.name().to_string();
    title.push_str(match actor {
        Actor::Human => " [SB]",
        Actor::Opponent => " [BB]",
    });
    let all_in = stack == 0 && snap.phase.is_betting();
    if all_in {
        title.push_str(" [ALL-IN]");
    }
    if snap.to_act == Some(actor) {
        title.push_str(" [Act]");
    }
    let won = match snap.winner {
        Some(Winner::Split) => true,
        Some(w) => w == Winner::from(actor),
        None => false,
    };

    let mut block = Block::default().title(title).borders(Borders::ALL);
    if won {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if all_in {
        block = block.border_style(Style::default().fg(Color::LightRed));
    } else if snap.to_act == Some(actor) {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let dim = Style::default().add_modifier(Modifier::DIM);
    let rank_line = match rank {
        Some(c) => Line::from(format!("Hand: {c}")),
        None => Line::from(vec![Span::raw("Hand: "), Span::styled("--", dim)]),
    };
    let lines = vec![
        Line::from(format!("Stack: ${stack}")),
        Line::from(format!("Bet: {bet}")),
        rank_line,
    ];
    f.render_widget(block, seat_area);

    let seat_inner = inner(seat_area);
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(seat_inner);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), split[0]);
    render_hole(f, split[1], hand, snap.phase != Phase::Idle);
}

/// Face-up cards when known, backs while the hand is live but hidden.
fn render_hole(f: &mut Frame, area: Rect, hand: Option<HoleCards>, dealt: bool) {
    if !dealt || area.height < 3 {
        return;
    }
    let cw = area.width.saturating_sub(2) / 2;
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cw), Constraint::Length(cw)])
        .split(Rect { height: 3, ..area });
    match hand {
        Some(h) => {
            render_card_widget(f, card_chunks[0], Some(h.first()), Some(Color::Cyan));
            render_card_widget(f, card_chunks[1], Some(h.second()), Some(Color::Cyan));
        }
        None => {
            for chunk in card_chunks.iter() {
                let face = Span::styled("##", Style::default().fg(Color::Blue));
                let back = Paragraph::new(Line::from(face))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(back, *chunk);
            }
        }
    }
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Hand Log").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.game.history().recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No actions yet."));
    } else {
        for entry in entries {
            lines.push(Line::from(format!("{entry} [{}]", entry.phase)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: L or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / next hand"),
        Line::from("- F: fold"),
        Line::from("- K: check"),
        Line::from("- C: call"),
        Line::from("- B or R: minimum bet / raise"),
        Line::from("- H: half-pot bet"),
        Line::from("- P: pot-sized bet"),
        Line::from("- I: all-in"),
        Line::from("- A: amount entry"),
        Line::from("- D: cycle opponent difficulty"),
        Line::from("- L: hand log"),
        Line::from(""),
        Line::from(Span::styled("Amount Entry:", bold)),
        Line::from("- 0-9: edit amount (total for the round)"),
        Line::from("- Backspace: delete digit"),
        Line::from("- + / -: adjust by BB"),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: start a new session"),
        Line::from("- Esc: cancel"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let legal = app.game.legal_actions();
    let title = if legal.can_bet { "Bet Amount" } else { "Raise To" };
    let current = app.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Current: {current}")),
        Line::from(format!("Min: {}   Max: {}", legal.min_target, legal.max_target)),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- in BB steps, Enter submit, Esc cancel"),
    ];
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner_area = inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, chunks[0]);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    let error_para = Paragraph::new(error_line).alignment(Alignment::Center);
    f.render_widget(error_para, chunks[1]);
}

fn suit_style(card: Card) -> Style {
    if card.suit().is_red() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(c.to_string(), suit_style(c))),
        None => Line::from("[  ]"),
    };
    let para = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(para, inner);
}
