//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::auth::session::LocalStorage;
use crate::auth::FamilyRecord;
use crate::config::Config;
use crate::flow::Flow;
use crate::ui;
use state::{AppState, EnvironmentSource};

/// The main application
pub struct App {
    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance for `flow`
    ///
    /// `records` are the family records the login form checks against;
    /// flows without a login ignore them.
    pub fn new(
        flow: &'static Flow,
        config: Config,
        environment_source: EnvironmentSource,
        storage: Box<dyn LocalStorage>,
        records: Vec<FamilyRecord>,
    ) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let environment = environment_source.environment(cols, rows);
        tracing::info!(
            flow = ?flow.kind,
            width = environment.viewport_width,
            height = environment.viewport_height,
            records = records.len(),
            "starting invitation"
        );

        let terminal = Self::setup_terminal()?;
        let state =
            AppState::new(flow, config, environment_source, environment, storage, records);

        Ok(Self { state, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state);
            })?;

            // Handle events; the timeout keeps countdown and rotation redrawing
            if event::poll(std::time::Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.state.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.state.handle_mouse(mouse),
                    Event::Resize(cols, rows) => {
                        tracing::debug!(cols, rows, "terminal resized");
                        self.state.handle_resize(cols, rows);
                    }
                    _ => {}
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
