//! Gear engine error types.

use thiserror::Error;

/// Reasons the gear engine refuses a request.
///
/// Every variant is raised before any register mutation happens. Underflow
/// and overflow are not errors here: they are terminal outcomes of a run
/// that has already started turning gears (see [`super::OutcomeKind`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GearError {
    /// The amount was missing, non-numeric, zero or negative.
    #[error("Please enter a positive number.")]
    InvalidAmount {
        /// The rejected input as received.
        input: String,
    },

    /// The amount does not fit in the register. `amount` is kept as text
    /// so values too large for any integer type are still shown exactly.
    #[error("Error: Input amount ({amount}) exceeds machine capacity ({capacity}).")]
    CapacityExceeded { amount: String, capacity: u64 },

    /// Another operation is still stepping through the gears.
    #[error("Gears are still turning. Wait for the current operation to finish.")]
    Busy,
}

impl GearError {
    /// Create a new "invalid amount" error.
    pub fn invalid_amount(input: impl Into<String>) -> Self {
        Self::InvalidAmount {
            input: input.into(),
        }
    }

    /// Create a new "capacity exceeded" error.
    pub fn capacity_exceeded(amount: impl std::fmt::Display, capacity: u64) -> Self {
        Self::CapacityExceeded {
            amount: amount.to_string(),
            capacity,
        }
    }
}
