use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};

/// Area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn middle(percent: u16, direction: Direction, r: Rect) -> Rect {
    let percent = percent.min(100);
    let margin = (100 - percent) / 2;
    Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Percentage(margin),
            Constraint::Percentage(percent),
            Constraint::Percentage(margin),
        ])
        .split(r)[1]
}

/// Popup rectangle taking the given share of `r`, centered both ways.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    middle(percent_x, Direction::Horizontal, middle(percent_y, Direction::Vertical, r))
}
