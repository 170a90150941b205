//! Countdown to the event

use chrono::NaiveDateTime;

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Time from `now` until `event`; all zero once the event has started
    pub fn between(event: NaiveDateTime, now: NaiveDateTime) -> Self {
        let remaining = event - now;
        if remaining <= chrono::TimeDelta::zero() {
            return Self::default();
        }
        let total = remaining.num_seconds();
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    /// Time until `event` from the local wall clock
    pub fn until(event: NaiveDateTime) -> Self {
        Self::between(event, chrono::Local::now().naive_local())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
