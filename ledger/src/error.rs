//! Error types for the ledger.
//!
//! Only a handful of operations can fail. Verification is not one of them:
//! an invalid chain is reported through [`crate::storage::Verdict`], never
//! through [`LedgerError`].

use thiserror::Error;

/// Errors returned by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Raw content bytes are not UTF-8, or an imported record sequence is
    /// malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No record exists at the requested sequence index.
    #[error("record {index} not found (chain length {len})")]
    RecordNotFound {
        /// The index that was asked for.
        index: u64,
        /// Current chain length.
        len: usize,
    },

    /// A [`crate::config::LedgerConfig`] failed validation.
    #[error("invalid ledger config: {0}")]
    InvalidConfig(String),
}
