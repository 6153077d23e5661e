//! Status bar rendering with keybindings and menu state

use crate::nav::MenuState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Badge text and color for the navigator state
fn state_badge(state: MenuState) -> (&'static str, Color) {
    match state {
        MenuState::Closed => (" CLOSED ", DEFAULT_THEME.muted),
        MenuState::Open { .. } => (" MENU ", DEFAULT_THEME.accent),
        MenuState::Binding { .. } => (" BIND ", DEFAULT_THEME.highlight),
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, state: MenuState) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (badge, badge_color) = state_badge(state);
    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.row_bg)
                .fg(DEFAULT_THEME.muted),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.row_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.row_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.muted).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.row_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.row_bg)
        .fg(DEFAULT_THEME.muted);

    let keys: &[(&str, &str)] = match state {
        MenuState::Closed => &[(" r ", " options "), (" z ", " mod options "), ("q", " quit ")],
        MenuState::Open { .. } => &[
            (" ↑/↓ ", " move "),
            (" ←/→ ", " change "),
            (" ↵ ", " select "),
            (" esc ", " back "),
            (" s ", " save & close "),
        ],
        MenuState::Binding { .. } => &[(" any key ", " bind ")],
    };

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.row_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
