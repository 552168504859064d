//! Error types for timetable setup.
//!
//! The search itself never fails: unplaceable courses and degenerate inputs
//! degrade into fitness penalties. Errors are only raised while building a
//! problem or a GA configuration.

use crate::validation::ValidationError;

/// Errors raised while preparing a timetabling run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimetableError {
    /// A GA parameter is out of range.
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),
    /// The week layout (day groups / meeting patterns) is malformed.
    #[error("invalid week layout: {0}")]
    InvalidLayout(String),
    /// The course/classroom/instructor lists are inconsistent.
    #[error("invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<ValidationError>),
    /// A search ended without any individual to report.
    #[error("search produced no population")]
    EmptyPopulation,
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;
