use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const LOGO: &str = r#"
 _   _       _     _                  ____             _
| | | | ___ | | __| | ___ _ __ ___   |  _ \ _   _  ___| |
| |_| |/ _ \| |/ _` |/ _ \ '_ ` _ \  | | | | | | |/ _ \ |
|  _  | (_) | | (_| |  __/ | | | | | | |_| | |_| |  __/ |
|_| |_|\___/|_|\__,_|\___|_| |_| |_| |____/ \__,_|\___|_|
"#;

const HINTS: &str = "[Enter] New session  [Esc] Back to table  [↑/↓] Move  [+/-] Adjust  [Q] Quit";

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("holdem-duel").borders(Borders::ALL), area);

    let logo: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Cyan))))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(logo.len() as u16 + 1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner(area));
    f.render_widget(Paragraph::new(logo).alignment(Alignment::Center), rows[0]);

    let mut lines = vec![Line::from(Span::styled(
        "Table settings",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(app.menu_items_display().into_iter().enumerate().map(|(i, item)| {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(Span::styled(item, style))
    }));
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);

    let (human, opponent) = app.game.stacks();
    let session = if app.hand_started {
        format!("Session in progress: you ${human}, opponent ${opponent}. Applying starts over.")
    } else {
        String::from("No hand dealt yet.")
    };
    let footer = vec![
        Line::from(Span::styled(session, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(HINTS, Style::default().add_modifier(Modifier::DIM))),
    ];
    f.render_widget(
        Paragraph::new(footer).wrap(Wrap { trim: true }).alignment(Alignment::Center),
        rows[2],
    );
}
