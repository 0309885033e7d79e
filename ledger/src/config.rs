//! # Ledger Configuration & Constants
//!
//! Every magic number in the ledger lives here. Several of these feed
//! straight into the digest preimage, so changing them changes every digest
//! ever produced. Treat them as a wire format.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// Library version, surfaced by the CLI's `version` subcommand.
pub const LEDGER_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Record Layout
// ---------------------------------------------------------------------------

/// Maximum content length in bytes. Longer payloads are truncated, not
/// rejected.
pub const MAX_CONTENT_LEN: usize = 256;

/// Content of the genesis record.
pub const GENESIS_CONTENT: &str = "Genesis Block";

/// Previous-digest sentinel carried by the genesis record. It is not a valid
/// digest on purpose: nothing real precedes genesis.
pub const GENESIS_PREVIOUS_DIGEST: &str = "0";

// ---------------------------------------------------------------------------
// Digest Parameters
// ---------------------------------------------------------------------------

/// Hash function behind record digests.
pub const DIGEST_ALGORITHM: &str = "SHA-256";

/// Raw digest length in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Hex-encoded digest length. Two characters per byte, lowercase.
pub const DIGEST_HEX_LEN: usize = DIGEST_LENGTH * 2;

// ---------------------------------------------------------------------------
// Runtime Configuration
// ---------------------------------------------------------------------------

/// Per-chain settings. The defaults reproduce the constants above; override
/// them only for ledgers that never need to agree with default-configured
/// ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Content bound in bytes, applied on append and tamper.
    pub max_content_len: usize,
    /// Content of the genesis record.
    pub genesis_label: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_content_len: MAX_CONTENT_LEN,
            genesis_label: GENESIS_CONTENT.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Same as `Default`, but with a different content bound.
    pub fn with_max_content_len(max_content_len: usize) -> Self {
        Self {
            max_content_len,
            ..Self::default()
        }
    }

    /// Reject settings under which a chain cannot be built.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidConfig`] when the bound is zero, or the genesis
    /// label is empty, longer than the bound, or contains a NUL character.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.max_content_len == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_content_len must be greater than zero".to_string(),
            ));
        }
        if self.genesis_label.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "genesis_label must not be empty".to_string(),
            ));
        }
        if self.genesis_label.len() > self.max_content_len {
            return Err(LedgerError::InvalidConfig(format!(
                "genesis_label is {} bytes, exceeds max_content_len {}",
                self.genesis_label.len(),
                self.max_content_len,
            )));
        }
        if self.genesis_label.contains('\0') {
            return Err(LedgerError::InvalidConfig(
                "genesis_label must not contain NUL".to_string(),
            ));
        }
        Ok(())
    }
}
