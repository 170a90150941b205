//! Application state definitions

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::input::{Action, invitation_key_to_action};
use crate::auth::session::{LocalStorage, Session, SessionStore};
use crate::auth::{FamilyRecord, LoginForm};
use crate::config::Config;
use crate::device::{Environment, GuardDecision, MobileGuard};
use crate::error::InvitationError;
use crate::flow::Flow;
use crate::navigation::input::{InputRouter, Viewport};
use crate::navigation::{SectionNavigator, Transition};

/// Pixel size of one terminal cell, used to express mouse rows and terminal
/// size in viewport units
pub const CELL_WIDTH_PX: u32 = 8;
pub const CELL_HEIGHT_PX: u32 = 16;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Desktop visitor on a mobile-only flow
    #[default]
    Unsupported,
    Login,
    Invitation,
}

/// Where the device environment comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentSource {
    /// Derived from the terminal size; resizes change the viewport
    Terminal,
    /// Fixed phone profile
    EmulatedPhone,
}

impl EnvironmentSource {
    /// Build the environment for a terminal of `cols` x `rows`
    pub fn environment(self, cols: u16, rows: u16) -> Environment {
        match self {
            EnvironmentSource::EmulatedPhone => Environment::emulated_phone(),
            EnvironmentSource::Terminal => Environment {
                viewport_width: u32::from(cols) * CELL_WIDTH_PX,
                viewport_height: u32::from(rows) * CELL_HEIGHT_PX,
                user_agent: format!("invitacion-terminal/{}", env!("CARGO_PKG_VERSION")),
                ..Default::default()
            },
        }
    }
}

/// Typed access code
///
/// The renderer only sees [`PasswordInput::len`] and the cursor; the code
/// itself leaves this buffer once, on submit.
#[derive(Debug, Clone, Default)]
pub struct PasswordInput {
    pub input: String,
    /// Cursor position in characters, `0..=len`
    pub cursor: usize,
}

impl PasswordInput {
    /// Byte offset of the character at `cursor`, or the end of the code
    fn byte_at(&self, cursor: usize) -> usize {
        self.input.char_indices().nth(cursor).map_or(self.input.len(), |(i, _)| i)
    }

    /// Number of characters typed
    pub fn len(&self) -> usize {
        self.input.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_at(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.byte_at(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.len() {
            let byte_idx = self.byte_at(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

/// Login screen state
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub form: LoginForm,
    pub password: PasswordInput,
}

/// Live navigation for the invitation screen
pub struct InvitationState {
    pub navigator: SectionNavigator,
    pub router: InputRouter,
    /// Last accepted transition, written by the navigator subscription
    pub last_transition: Rc<Cell<Option<Transition>>>,
    /// When the current section was entered (restarts group rotation)
    pub entered_at: Rc<Cell<Instant>>,
}

impl InvitationState {
    pub fn new(flow: &Flow, config: &Config, viewport: Viewport) -> Result<Self, InvitationError> {
        let mut navigator =
            SectionNavigator::new(flow.sections.len(), flow.navigator_config(config.cooldown()))?;
        let router = InputRouter::new(config.input_thresholds(), viewport);

        let last_transition = Rc::new(Cell::new(None));
        let entered_at = Rc::new(Cell::new(Instant::now()));
        {
            let last_transition = Rc::clone(&last_transition);
            let entered_at = Rc::clone(&entered_at);
            navigator.subscribe(move |transition| {
                last_transition.set(Some(*transition));
                entered_at.set(Instant::now());
            });
        }

        Ok(Self { navigator, router, last_transition, entered_at })
    }

    /// Whether the current section's intro should play
    pub fn plays_intro(&self, flow: &Flow) -> bool {
        let transition = self.last_transition.get();
        match flow.intro {
            Some(rule) if rule.section == self.navigator.current() => {
                rule.plays_intro(transition.as_ref())
            }
            _ => true,
        }
    }
}

/// Full application state
pub struct AppState {
    pub flow: &'static Flow,
    pub config: Config,
    pub screen: Screen,
    pub environment_source: EnvironmentSource,
    pub environment: Environment,
    pub guard: MobileGuard,
    pub login: LoginState,
    /// Logged-in family, for flows behind a login
    pub family: Option<FamilyRecord>,
    pub invitation: Option<InvitationState>,
    session: Option<SessionStore<Box<dyn LocalStorage>>>,
}

impl AppState {
    /// Build the state for `flow`, restoring any stored session
    pub fn new(
        flow: &'static Flow,
        config: Config,
        environment_source: EnvironmentSource,
        environment: Environment,
        storage: Box<dyn LocalStorage>,
        records: Vec<FamilyRecord>,
    ) -> Self {
        let guard = MobileGuard::new(config.mobile_only(flow.mobile_only));
        let session = flow.session_keys.map(|keys| SessionStore::new(storage, keys));
        let mut state = Self {
            flow,
            config,
            screen: Screen::Unsupported,
            environment_source,
            environment,
            guard,
            login: LoginState { form: LoginForm::new(records), password: PasswordInput::default() },
            family: None,
            invitation: None,
            session,
        };

        if let Some(store) = state.session.as_mut() {
            if let Session::Authenticated(record) = store.restore() {
                state.family = Some(record);
            }
        }
        state.refresh_screen();
        state
    }

    /// The viewport the input adapters gate on
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.environment.viewport_width, self.environment.viewport_height)
    }

    /// Re-run the device guard and pick the screen to show
    pub fn refresh_screen(&mut self) {
        if self.guard.evaluate(&self.environment) == GuardDecision::DesktopNotSupported {
            self.screen = Screen::Unsupported;
            return;
        }

        if self.flow.requires_login() && self.family.is_none() {
            self.invitation = None;
            self.screen = Screen::Login;
            return;
        }

        if self.invitation.is_none() {
            match InvitationState::new(self.flow, &self.config, self.viewport()) {
                Ok(invitation) => self.invitation = Some(invitation),
                Err(e) => {
                    tracing::error!("Failed to start navigation: {}", e);
                    return;
                }
            }
        }
        self.screen = Screen::Invitation;
    }

    /// Terminal resized: refresh the environment, viewport and guard
    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.environment = self.environment_source.environment(cols, rows);
        let viewport = self.viewport();
        if let Some(invitation) = self.invitation.as_mut() {
            invitation.router.set_viewport(viewport);
        }
        self.refresh_screen();
    }

    /// Handle a key press, returns true if should exit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.screen {
            Screen::Unsupported => matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
            Screen::Login => self.handle_login_key(key.code),
            Screen::Invitation => match invitation_key_to_action(key.code, key.modifiers) {
                Some(action) => self.apply_action(action),
                None => false,
            },
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Enter => {
                self.submit_login();
                return false;
            }
            _ => {}
        }

        let password = &mut self.login.password;
        match code {
            KeyCode::Backspace => password.delete_char(),
            KeyCode::Delete => password.delete_char_forward(),
            KeyCode::Left => password.move_left(),
            KeyCode::Right => password.move_right(),
            KeyCode::Home => password.move_start(),
            KeyCode::End => password.move_end(),
            KeyCode::Char(c) => password.insert_char(c),
            _ => {}
        }
        false
    }

    fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Logout if self.flow.requires_login() => self.logout(),
            Action::Logout => {}
            Action::Indicator(index) => {
                if let Some(InvitationState { router, navigator, .. }) = self.invitation.as_mut() {
                    router.indicator(index, navigator);
                }
            }
            Action::Navigate(code) => {
                if let Some(InvitationState { router, navigator, .. }) = self.invitation.as_mut() {
                    router.key(code, navigator);
                }
            }
        }
        false
    }

    /// Wheel scrolls and left-button drags (treated as touch swipes)
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Invitation {
            return;
        }
        let Some(invitation) = self.invitation.as_mut() else {
            return;
        };
        let y = f32::from(mouse.row) * CELL_HEIGHT_PX as f32;
        let InvitationState { router, navigator, .. } = invitation;
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                router.wheel(1.0, navigator);
            }
            MouseEventKind::ScrollUp => {
                router.wheel(-1.0, navigator);
            }
            MouseEventKind::Down(MouseButton::Left) => router.touch_start(y),
            MouseEventKind::Up(MouseButton::Left) => {
                router.touch_end(y, navigator);
            }
            _ => {}
        }
    }

    /// Check the typed code and enter the invitation on success
    pub fn submit_login(&mut self) {
        let input = std::mem::take(&mut self.login.password.input);
        self.login.password.clear();

        let Ok(record) = self.login.form.submit(&input) else {
            return;
        };
        if let Some(store) = self.session.as_mut() {
            if let Err(e) = store.login(&record) {
                tracing::error!("Failed to persist session: {:#}", e);
            }
        }
        self.family = Some(record);
        self.refresh_screen();
    }

    /// Leave the invitation and forget the stored session
    pub fn logout(&mut self) {
        if let Some(store) = self.session.as_mut() {
            if let Err(e) = store.logout() {
                tracing::error!("Failed to clear session: {:#}", e);
            }
        }
        self.family = None;
        self.invitation = None;
        self.login.password.clear();
        self.refresh_screen();
    }
}
