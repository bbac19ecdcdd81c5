//! Goal engine error types.

use thiserror::Error;

/// Errors specific to goal progress calculations.
#[derive(Error, Debug)]
pub enum GoalError {
    /// A stored allocation could not be turned into a well-formed rule.
    #[error("Invalid allocation at position {index}: {message}")]
    InvalidAllocation { index: usize, message: String },

    /// Configuration validation error.
    #[error("Invalid goal progress configuration: {0}")]
    InvalidConfig(String),

    /// The requested goal does not exist.
    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    /// A projected date falls outside the representable calendar.
    #[error("Projected date out of range for goal '{goal_id}': {message}")]
    DateOutOfRange { goal_id: String, message: String },

    /// An amount derived for a goal does not fit in a decimal.
    #[error("Amount overflow for goal '{goal_id}': {message}")]
    AmountOverflow { goal_id: String, message: String },
}

impl GoalError {
    /// Creates a DateOutOfRange error.
    pub fn date_out_of_range(goal_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            goal_id: goal_id.into(),
            message: message.into(),
        }
    }

    /// Creates an AmountOverflow error.
    pub fn amount_overflow(goal_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AmountOverflow {
            goal_id: goal_id.into(),
            message: message.into(),
        }
    }
}
