//! Guest login
//!
//! Families receive an access code; logging in is a plaintext lookup of that
//! code in the records document. There is no account identifier beyond the
//! code itself.

pub mod records;
pub mod session;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a code does not match any family
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Contraseña incorrecta. Por favor, intenta nuevamente.";

/// A guest listed under a family record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub confirmed: bool,
    pub family: String,
}

/// One entry of the records document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRecord {
    /// Access code, matched case-insensitively
    pub password: String,
    /// Name shown in greetings and the RSVP message
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<Vec<Guest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_message: Option<String>,
}

impl FamilyRecord {
    pub fn new(password: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            family_name: family_name.into(),
            guests: None,
            personal_message: None,
        }
    }

    /// Whether `input` is this family's code, ignoring case and surrounding whitespace
    pub fn matches(&self, input: &str) -> bool {
        self.password.to_lowercase() == input.trim().to_lowercase()
    }

    /// Guests for this family, empty when none were listed
    pub fn guests(&self) -> &[Guest] {
        self.guests.as_deref().unwrap_or(&[])
    }
}

/// Login failure visible to the guest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("incorrect password")]
    IncorrectPassword,
}

/// Find the record whose code matches `input`
pub fn authenticate<'a>(records: &'a [FamilyRecord], input: &str) -> Option<&'a FamilyRecord> {
    records.iter().find(|record| record.matches(input))
}

/// Login form state: the loaded records and the current error, if any
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    records: Vec<FamilyRecord>,
    error: Option<&'static str>,
}

impl LoginForm {
    pub fn new(records: Vec<FamilyRecord>) -> Self {
        Self { records, error: None }
    }

    /// Replace the records (after a late fetch)
    pub fn set_records(&mut self, records: Vec<FamilyRecord>) {
        self.records = records;
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// User-visible error from the last failed submit
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Check a submitted code
    pub fn submit(&mut self, input: &str) -> Result<FamilyRecord, LoginError> {
        match authenticate(&self.records, input) {
            Some(record) => {
                tracing::info!(family = %record.family_name, "login succeeded");
                self.error = None;
                Ok(record.clone())
            }
            None => {
                tracing::info!(available = self.records.len(), "login rejected");
                self.error = Some(INCORRECT_PASSWORD_MESSAGE);
                Err(LoginError::IncorrectPassword)
            }
        }
    }
}
