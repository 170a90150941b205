//! Full-screen section pages with progress and indicators

use std::time::Duration;

use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph, Wrap},
};

use super::layout;
use crate::app::state::InvitationState;
use crate::auth::FamilyRecord;
use crate::flow::countdown::TimeLeft;
use crate::flow::{Flow, SectionInfo, SectionKind};
use crate::theme::Theme;

const INTRO_FLOURISH: &str = "✦  ✦  ✦";
const EVENT_STARTED: &str = "¡Llegó el gran día!";

/// Draw the current section of the invitation
pub fn draw(
    frame: &mut Frame,
    flow: &Flow,
    invitation: &InvitationState,
    family: Option<&FamilyRecord>,
    theme: &Theme,
) {
    let area = frame.area();
    layout::fill_background(frame, area, theme);

    let [progress_area, body_area, indicator_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let navigator = &invitation.navigator;
    let gauge = LineGauge::default()
        .ratio(navigator.progress())
        .label("")
        .filled_style(Style::default().fg(theme.accent_primary))
        .unfilled_style(Style::default().fg(theme.bg_secondary));
    frame.render_widget(gauge, progress_area);

    if let Some(section) = flow.section(navigator.current()) {
        let mut lines = Vec::new();
        if flow.intro.is_some_and(|rule| rule.section == navigator.current())
            && invitation.plays_intro(flow)
        {
            lines.push(Line::from(Span::styled(
                INTRO_FLOURISH,
                Style::default().fg(theme.accent_secondary),
            )));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());

        let elapsed = invitation.entered_at.get().elapsed();
        let now = chrono::Local::now().naive_local();
        lines.extend(section_lines(flow, section, family, elapsed, now, theme));

        draw_body(frame, body_area, lines, theme);
    }

    let dots = indicator_line(flow.sections.len(), navigator.current(), theme);
    frame.render_widget(Paragraph::new(dots).alignment(Alignment::Center), indicator_area);

    let hint = hint_text(flow, navigator.current());
    let hint =
        Paragraph::new(hint).style(Style::default().fg(theme.fg_muted)).alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn draw_body(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, theme: &Theme) {
    let height = (lines.len() as u16).min(area.height);
    let target = layout::centered_rows(layout::column(area), height);
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.bg_primary))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, target);
}

/// Body lines for a section, depending on its kind
pub fn section_lines(
    flow: &Flow,
    section: &SectionInfo,
    family: Option<&FamilyRecord>,
    elapsed: Duration,
    now: NaiveDateTime,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let text = Style::default().fg(theme.fg_secondary);
    let accent = Style::default().fg(theme.accent_primary);
    let muted = Style::default().fg(theme.fg_muted);

    let mut lines: Vec<Line<'static>> =
        section.body.iter().map(|line| Line::from(Span::styled(*line, text))).collect();

    match section.kind {
        SectionKind::Static => {}
        SectionKind::Itinerary => {
            let rotation = flow.itinerary_rotation;
            if let Some(group) = rotation.active_slice(flow.itinerary, elapsed) {
                for item in group {
                    lines.push(Line::from(vec![
                        Span::styled(item.time, accent),
                        Span::styled("  ", text),
                        Span::styled(item.event, text.add_modifier(Modifier::BOLD)),
                    ]));
                    if let Some(description) = item.description {
                        lines.push(Line::from(Span::styled(description, muted)));
                    }
                }
                let active = rotation.active_group(flow.itinerary.len(), elapsed);
                lines.push(group_marker(active, rotation.group_count(flow.itinerary.len()), muted));
            }
        }
        SectionKind::Notes => {
            let rotation = flow.notes_rotation;
            if let Some(group) = rotation.active_slice(flow.notes, elapsed) {
                for note in group {
                    lines.push(Line::from(Span::styled(note.title, accent)));
                    lines.push(Line::from(Span::styled(note.description, text)));
                    lines.push(Line::default());
                }
                let active = rotation.active_group(flow.notes.len(), elapsed);
                lines.push(group_marker(active, rotation.group_count(flow.notes.len()), muted));
            }
        }
        SectionKind::Countdown => match flow.event_time() {
            Ok(event) => lines.push(countdown_line(TimeLeft::between(event, now), accent)),
            Err(e) => tracing::warn!("Invalid event date {:?}: {}", flow.event_at, e),
        },
        SectionKind::Guests => {
            if let Some(family) = family {
                lines.extend(guest_lines(flow, family, text, accent, muted));
            }
        }
        SectionKind::Rsvp => {
            let family = family.map(|f| f.family_name.as_str()).unwrap_or_default();
            lines.extend(rsvp_lines(flow, family, accent, muted));
        }
    }

    lines
}

fn group_marker(active: usize, count: usize, style: Style) -> Line<'static> {
    if count <= 1 {
        return Line::default();
    }
    Line::from(Span::styled(format!("{}/{}", active + 1, count), style))
}

fn countdown_line(left: TimeLeft, style: Style) -> Line<'static> {
    if left.is_zero() {
        return Line::from(Span::styled(EVENT_STARTED, style.add_modifier(Modifier::BOLD)));
    }
    Line::from(Span::styled(
        format!(
            "{} días  {} horas  {} min  {} seg",
            left.days, left.hours, left.minutes, left.seconds
        ),
        style.add_modifier(Modifier::BOLD),
    ))
}

fn guest_lines(
    flow: &Flow,
    family: &FamilyRecord,
    text: Style,
    accent: Style,
    muted: Style,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        family.family_name.clone(),
        accent.add_modifier(Modifier::BOLD),
    ))];

    if let Some(message) = &family.personal_message {
        lines.push(Line::from(Span::styled(message.clone(), text.add_modifier(Modifier::ITALIC))));
    }

    if !family.guests().is_empty() {
        lines.push(Line::default());
        for guest in family.guests() {
            let mark = if guest.confirmed { "✓" } else { "·" };
            lines.push(Line::from(Span::styled(format!("{} {}", mark, guest.name), text)));
        }
    }

    lines.extend(rsvp_lines(flow, &family.family_name, accent, muted));
    lines
}

/// WhatsApp confirmation link, empty when the flow has no contact
fn rsvp_lines(flow: &Flow, family: &str, accent: Style, muted: Style) -> Vec<Line<'static>> {
    let Some(rsvp) = flow.rsvp else {
        return Vec::new();
    };
    match rsvp.url(family) {
        Ok(url) => vec![
            Line::default(),
            Line::from(Span::styled("Confirma por WhatsApp:", muted)),
            Line::from(Span::styled(url.to_string(), accent)),
        ],
        Err(e) => {
            tracing::warn!("Failed to build RSVP link: {}", e);
            Vec::new()
        }
    }
}

/// One dot per section, the current one filled
fn indicator_line(len: usize, current: usize, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span<'static>> = (0..len)
        .map(|i| {
            if i == current {
                Span::styled("● ", Style::default().fg(theme.accent_primary))
            } else {
                Span::styled("○ ", Style::default().fg(theme.fg_muted))
            }
        })
        .collect();
    Line::from(spans)
}

fn hint_text(flow: &Flow, current: usize) -> String {
    let label = flow.section(current).map(|s| s.label).unwrap_or_default();
    let logout = if flow.requires_login() { " · s salir de la sesión" } else { "" };
    format!("{} · ↑↓ navegar · 1-9 ir a sección{} · q cerrar", label, logout)
}
