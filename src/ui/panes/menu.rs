//! Options menu pane

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph},
    Frame,
};

use crate::ui::theme::DEFAULT_THEME;
use crate::view::{MenuView, RowView, ValueView};

const PANE_WIDTH: u16 = 60;

/// Area of `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the open menu in the middle of `area`
pub fn render_menu_pane(frame: &mut Frame, area: Rect, view: &MenuView, binding: bool) {
    // one row per slot, a footer and the borders
    let height = view.rows.len() as u16 + 3;
    let pane = centered(area, PANE_WIDTH, height);

    let border = if binding {
        DEFAULT_THEME.highlight
    } else {
        DEFAULT_THEME.border_open
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", view.title),
            Style::default()
                .fg(DEFAULT_THEME.title)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(pane);
    frame.render_widget(Clear, pane);
    frame.render_widget(block, pane);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(view.rows.len() as u16),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    for (i, row) in view.rows.iter().enumerate() {
        let Some(row) = row else { continue };
        let line = Rect {
            y: body[0].y + i as u16,
            height: 1,
            ..body[0]
        };
        if line.y >= body[0].bottom() {
            break;
        }
        render_row(frame, line, row);
    }

    if let Some(thumb) = view.thumb {
        let track = Rect {
            height: view.rows.len() as u16,
            ..columns[1]
        }
        .intersection(columns[1]);
        let (start, len) = thumb.cells(track.height);
        let lines: Vec<Line> = (0..track.height)
            .map(|y| {
                if y >= start && y < start + len {
                    Line::from(Span::styled("█", Style::default().fg(DEFAULT_THEME.accent)))
                } else {
                    Line::from(Span::styled(
                        "│",
                        Style::default().fg(DEFAULT_THEME.track),
                    ))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), track);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!("{}/{}", view.position + 1, view.count),
        Style::default().fg(DEFAULT_THEME.muted),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(footer, body[1]);
}

fn render_row(frame: &mut Frame, area: Rect, row: &RowView) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (marker, label_style) = if row.selected {
        (
            "▶ ",
            Style::default()
                .fg(DEFAULT_THEME.selected)
                .bg(DEFAULT_THEME.row_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(DEFAULT_THEME.fg))
    };
    let label = Paragraph::new(Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(row.label.clone(), label_style),
    ]))
    .style(label_style);
    frame.render_widget(label, halves[0]);

    let value_style = if row.selected {
        Style::default().bg(DEFAULT_THEME.row_bg)
    } else {
        Style::default()
    };

    match &row.value {
        ValueView::Scroll { .. } => {
            let ratio = row.value.ratio().unwrap_or(0.0);
            let gauge = LineGauge::default()
                .ratio(ratio)
                .label(Span::styled(
                    format!("{:>4} ", row.value.text()),
                    Style::default().fg(DEFAULT_THEME.fg),
                ))
                .filled_style(Style::default().fg(DEFAULT_THEME.accent))
                .unfilled_style(Style::default().fg(DEFAULT_THEME.track))
                .style(value_style);
            frame.render_widget(gauge, halves[1]);
        }
        ValueView::Binds { slots, active } => {
            let mut spans = Vec::new();
            for (i, slot) in slots.iter().enumerate() {
                let style = if row.selected && i == *active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(DEFAULT_THEME.highlight)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                };
                spans.push(Span::styled(format!(" {} ", slot), style));
            }
            let binds = Paragraph::new(Line::from(spans))
                .style(value_style)
                .alignment(Alignment::Right);
            frame.render_widget(binds, halves[1]);
        }
        value => {
            let color = match value {
                ValueView::Toggle(true) => DEFAULT_THEME.enabled,
                ValueView::Toggle(false) => DEFAULT_THEME.disabled,
                ValueView::Submenu { .. } => DEFAULT_THEME.muted,
                _ => DEFAULT_THEME.fg,
            };
            let text = Paragraph::new(Span::styled(value.text(), Style::default().fg(color)))
                .style(value_style)
                .alignment(Alignment::Right);
            frame.render_widget(text, halves[1]);
        }
    }
}

/// Hint shown while no menu is open
pub fn render_closed_pane(frame: &mut Frame, area: Rect, held_mask: u32) {
    let key_style = Style::default().bg(DEFAULT_THEME.muted).fg(Color::Black);
    let text_style = Style::default().fg(DEFAULT_THEME.fg);
    let lines = vec![
        Line::from(vec![
            Span::styled(" r ", key_style),
            Span::styled(" game options   ", text_style),
            Span::styled(" z ", key_style),
            Span::styled(" mod options", text_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("held buttons: {:#06x}", held_mask),
            Style::default().fg(DEFAULT_THEME.muted),
        )),
    ];
    let pane = centered(area, PANE_WIDTH, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_closed));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        pane,
    );
}
