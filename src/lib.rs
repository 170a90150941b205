//! Invitacion - Section-by-section event invitations in the terminal
//!
//! Each invitation is a fixed list of full-screen sections driven by a
//! throttled navigator, with an optional family login and a mobile-only
//! device guard.

pub mod app;
pub mod auth;
pub mod config;
pub mod device;
pub mod error;
pub mod flow;
pub mod navigation;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::InvitationError;
pub use navigation::SectionNavigator;
pub use theme::Theme;
