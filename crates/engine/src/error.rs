//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Referential`] thrown when a ledger row points at a member outside the roster.
//! - [`InvalidAmount`] thrown when an amount is negative, non-finite or overflows.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//!  [`Referential`]: EngineError::Referential
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown member: {0}")]
    Referential(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Member roster is empty")]
    EmptyRoster,
    #[error("\"{0}\" already present!")]
    DuplicateMember(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Expense locked: {0}")]
    ExpenseLocked(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
