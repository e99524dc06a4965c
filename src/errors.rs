//! Unified error types for the wallet allocation engine.
//!
//! `TransactionNotFound` deliberately covers both "no such transaction" and
//! "already in a terminal state" so callers cannot probe processing status
//! through error variants.

use rust_decimal::Decimal;
use thiserror::Error;

/// All errors produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Caller lacks the capability required for the attempted operation
    #[error("Not authorized to {action}")]
    NotAuthorized {
        /// The operation that was refused
        action: String,
    },

    /// A monetary amount failed validation
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Customer missing, inactive, or outside the caller's shop scope
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Customer id that was looked up
        id: i64,
    },

    /// Wallet transaction missing, out of scope, or already processed
    #[error("Wallet transaction not found: {id}")]
    TransactionNotFound {
        /// Transaction id that was looked up
        id: i64,
    },

    /// Purchase missing from the store
    #[error("Purchase not found: {id}")]
    PurchaseNotFound {
        /// Purchase id that was looked up
        id: i64,
    },

    /// The atomic apply step of a confirmation failed and was rolled back
    #[error("Deposit confirmation failed: {message}")]
    DepositConfirmationFailed {
        /// Server-side detail; the transaction remains pending
        message: String,
    },

    /// Configuration problem (missing file, bad TOML, invalid value)
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying store error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
