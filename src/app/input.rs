//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

use crate::navigation::input::key_to_intent;

/// Key mapping on the invitation screen
///
/// Navigation keys are passed through untouched so the input router can
/// resolve them; digits select a section by its indicator.
pub fn invitation_key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') => Some(Action::Logout),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Indicator(c as usize - '1' as usize)),
        code if key_to_intent(code).is_some() => Some(Action::Navigate(code)),
        _ => None,
    }
}

/// Actions that can be taken on the invitation screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A key the input router turns into a section change
    Navigate(KeyCode),
    /// Jump to the section behind the zero-based indicator
    Indicator(usize),
    Logout,
    Quit,
}
