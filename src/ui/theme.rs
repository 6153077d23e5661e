use ratatui::style::Color;

/// Menu palette
pub struct Theme {
    pub fg: Color,
    pub accent: Color,    // Blue
    pub highlight: Color, // Orange, binding in progress
    pub muted: Color,     // Grey
    pub enabled: Color,   // Green
    pub disabled: Color,  // Red
    pub border_open: Color,
    pub border_closed: Color,
    pub row_bg: Color,
    pub selected: Color,
    pub title: Color,
    pub track: Color, // Scroll gauges and the scrollbar
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    highlight: Color::Rgb(250, 179, 135),
    muted: Color::Rgb(108, 112, 134),
    enabled: Color::Rgb(166, 227, 161),
    disabled: Color::Rgb(243, 139, 168),
    border_open: Color::Rgb(249, 226, 175),
    border_closed: Color::Rgb(108, 112, 134),
    row_bg: Color::Rgb(50, 50, 70),
    selected: Color::Rgb(137, 220, 235), // Sky
    title: Color::Rgb(249, 226, 175),
    track: Color::Rgb(88, 91, 112),
};
