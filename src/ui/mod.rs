//! UI rendering components

pub mod invitation;
pub mod layout;
pub mod login;

use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

const UNSUPPORTED_HEADING: &str = "Solo disponible en móviles";
const UNSUPPORTED_BODY: &[&str] = &[
    "Esta invitación está diseñada para verse en tu teléfono.",
    "Ábrela desde un dispositivo móvil para disfrutarla.",
];

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState) {
    let theme = Theme::for_flow(state.flow.kind);

    match state.screen {
        Screen::Unsupported => {
            let env = &state.environment;
            let detected =
                format!("Pantalla detectada: {}x{} px", env.viewport_width, env.viewport_height);
            let mut lines: Vec<&str> = UNSUPPORTED_BODY.to_vec();
            lines.push("");
            lines.push(&detected);
            layout::draw_message(frame, UNSUPPORTED_HEADING, &lines, &theme);
        }
        Screen::Login => {
            login::draw(frame, state.flow, &state.login, &theme);
        }
        Screen::Invitation => match &state.invitation {
            Some(invitation) => {
                invitation::draw(frame, state.flow, invitation, state.family.as_ref(), &theme)
            }
            None => layout::draw_message(frame, state.flow.title, &[], &theme),
        },
    }
}
