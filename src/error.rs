//! Error types shared across the crate

use thiserror::Error;

/// Errors raised by the persistence and record-loading layers
///
/// Navigation never fails and login only reports [`crate::auth::LoginError`],
/// so these stay inside the infrastructure code and are logged rather than
/// shown to guests.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// Reading or writing a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fetching the records document over HTTP failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The records endpoint answered with a non-success status
    #[error("Records request returned status {status}")]
    RecordStatus {
        /// HTTP status code
        status: u16,
    },

    /// A navigator was built over an empty section list
    #[error("A flow needs at least one section")]
    EmptySections,
}

impl InvitationError {
    /// Whether retrying the same operation could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, InvitationError::Request(_) | InvitationError::RecordStatus { status: 500.. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        assert!(InvitationError::RecordStatus { status: 503 }.is_transient());
        assert!(!InvitationError::RecordStatus { status: 404 }.is_transient());
    }

    #[test]
    fn empty_sections_message() {
        assert_eq!(InvitationError::EmptySections.to_string(), "A flow needs at least one section");
    }
}
