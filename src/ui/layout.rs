//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::theme::Theme;

/// Widest the invitation column gets, in cells
pub const COLUMN_WIDTH: u16 = 60;

/// Fill `area` with the theme background
pub fn fill_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    let bg_style = Style::default().bg(theme.bg_primary);
    frame.render_widget(Paragraph::new("").style(bg_style), area);
}

/// A centered column no wider than [`COLUMN_WIDTH`]
pub fn column(area: Rect) -> Rect {
    let [column] =
        Layout::horizontal([Constraint::Max(COLUMN_WIDTH)]).flex(Flex::Center).areas(area);
    column
}

/// A rect of `height` rows centered vertically in `area`
pub fn centered_rows(area: Rect, height: u16) -> Rect {
    let [middle] =
        Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    middle
}

/// Draw a full-screen centered message with a heading
pub fn draw_message(frame: &mut Frame, heading: &str, lines: &[&str], theme: &Theme) {
    let area = frame.area();
    fill_background(frame, area, theme);

    let mut text = vec![
        Line::from(Span::styled(
            heading.to_string(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    let body_style = Style::default().fg(theme.fg_secondary);
    text.extend(lines.iter().map(|line| Line::from(Span::styled(line.to_string(), body_style))));

    let height = text.len() as u16;
    let target = centered_rows(column(area), height);
    let paragraph = Paragraph::new(text)
        .style(Style::default().bg(theme.bg_primary))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, target);
}
