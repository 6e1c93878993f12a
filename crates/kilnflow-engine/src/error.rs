//! Error types for rule validation and collision checks.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Missing end date: {0}")]
    MissingEndDate(String),

    #[error("End date not after start date: {0}")]
    EndNotAfterStart(String),

    #[error("Missing recurrence weekdays: {0}")]
    MissingWeekdays(String),

    #[error("Date off recurrence pattern: {0}")]
    DateOffPattern(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;
