//! Password screen for invitations behind a login

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout;
use crate::app::state::LoginState;
use crate::flow::Flow;
use crate::theme::Theme;

const PROMPT: &str = "Ingresa la contraseña de tu familia";
const HINT: &str = "Enter para entrar · Esc para salir";
const MASK: &str = "\u{2022}";

/// Draw the login form
pub fn draw(frame: &mut Frame, flow: &Flow, state: &LoginState, theme: &Theme) {
    let area = frame.area();
    layout::fill_background(frame, area, theme);

    let form = layout::centered_rows(layout::column(area), 9);
    let [title_area, prompt_area, input_area, error_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(form);

    let title = Paragraph::new(flow.title)
        .style(Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let prompt = Paragraph::new(PROMPT)
        .style(Style::default().fg(theme.fg_secondary))
        .alignment(Alignment::Center);
    frame.render_widget(prompt, prompt_area);

    let line = masked_line(state.password.len(), state.password.cursor, theme);
    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg_secondary)),
    );
    frame.render_widget(input, input_area);

    if let Some(error) = state.form.error() {
        let error = Paragraph::new(error)
            .style(Style::default().fg(theme.error))
            .alignment(Alignment::Center);
        frame.render_widget(error, error_area);
    }

    let hint =
        Paragraph::new(HINT).style(Style::default().fg(theme.fg_muted)).alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Bullets for a password of `len` characters with the cursor highlighted
///
/// Only the length and cursor reach the renderer, never the typed text.
fn masked_line(len: usize, cursor: usize, theme: &Theme) -> Line<'static> {
    let bullets = Style::default().fg(theme.fg_primary);
    let cursor = cursor.min(len);
    let mut spans = Vec::new();

    if cursor > 0 {
        spans.push(Span::styled(MASK.repeat(cursor), bullets));
    }

    // The cursor sits on a bullet, or on a blank cell past the end
    let under_cursor = if cursor < len { MASK } else { " " };
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(under_cursor, cursor_style));

    if cursor + 1 < len {
        spans.push(Span::styled(MASK.repeat(len - cursor - 1), bullets));
    }

    Line::from(spans)
}
