//! # Record Structure
//!
//! A record is the unit of the ledger: a bounded payload, the time it was
//! written, its position, and a digest that commits to all of that plus the
//! digest of the record before it.
//!
//! ## Record Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Record                                      │
//! │  ├── sequence_index: u64   (genesis = 0)     │
//! │  ├── created_at: i64       (unix seconds)    │
//! │  ├── content: BoundedContent                 │
//! │  ├── previous_digest: String  ("0" genesis)  │
//! │  └── digest: String        (SHA-256, hex)    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Digest Computation
//!
//! The digest covers `sequence_index || created_at || content ||
//! previous_digest`, each rendered as text (integers in decimal) and fed to
//! SHA-256 with no separator between fields.
//!
//! The missing separator is a known weakness: index `1` at time `23` and
//! index `12` at time `3` produce the same preimage prefix. It is kept
//! because adding a delimiter would change every digest; any fix has to ship
//! as a new digest format, not a patch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{LedgerConfig, GENESIS_PREVIOUS_DIGEST};
use crate::crypto::hash::sha256_multi_hex;
use crate::storage::content::BoundedContent;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One entry in a [`crate::storage::Chain`].
///
/// Fields are read-only from outside the crate. The only way to change a
/// record after creation is [`crate::storage::Chain::tamper`], which
/// deliberately leaves the digest stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    sequence_index: u64,
    created_at: i64,
    content: BoundedContent,
    previous_digest: String,
    digest: String,
}

impl Record {
    /// Construct the genesis record.
    ///
    /// Index 0, the configured genesis label as content, and the `"0"`
    /// sentinel as previous digest.
    pub fn genesis(created_at: i64, config: &LedgerConfig) -> Self {
        let content = BoundedContent::from_trusted(&config.genesis_label);
        let previous_digest = GENESIS_PREVIOUS_DIGEST.to_string();
        let digest = compute_digest(0, created_at, content.as_str(), &previous_digest);

        Record {
            sequence_index: 0,
            created_at,
            content,
            previous_digest,
            digest,
        }
    }

    /// Construct a record linked to `parent`.
    ///
    /// The index follows the parent's and the previous digest is copied from
    /// it. Content has already been bounded by the caller.
    pub fn new(parent: &Record, content: BoundedContent, created_at: i64) -> Self {
        let sequence_index = parent.sequence_index + 1;
        let previous_digest = parent.digest.clone();
        let digest = compute_digest(
            sequence_index,
            created_at,
            content.as_str(),
            &previous_digest,
        );

        Record {
            sequence_index,
            created_at,
            content,
            previous_digest,
            digest,
        }
    }

    /// Recompute the digest from the record's current fields.
    ///
    /// Compare against [`Record::digest`] to detect in-place tampering.
    pub fn compute_digest(&self) -> String {
        compute_digest(
            self.sequence_index,
            self.created_at,
            self.content.as_str(),
            &self.previous_digest,
        )
    }

    /// True if the stored digest matches the fields.
    pub fn is_self_consistent(&self) -> bool {
        self.compute_digest() == self.digest
    }

    pub fn is_genesis(&self) -> bool {
        self.sequence_index == 0
    }

    pub fn sequence_index(&self) -> u64 {
        self.sequence_index
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn previous_digest(&self) -> &str {
        &self.previous_digest
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// `created_at` as a UTC datetime, if it is in chrono's range.
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::<chrono::Utc>::from_timestamp(self.created_at, 0)
    }

    /// Overwrite content without touching the digest.
    pub(crate) fn overwrite_content(&mut self, content: BoundedContent) {
        self.content = content;
    }

    pub(crate) fn bounded_content(&self) -> &BoundedContent {
        &self.content
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Record #{}", self.sequence_index)?;
        writeln!(f, "Timestamp: {}", self.created_at)?;
        writeln!(f, "Data: {}", self.content)?;
        writeln!(f, "Previous Hash: {}", self.previous_digest)?;
        writeln!(f, "Hash: {}", self.digest)
    }
}

// ---------------------------------------------------------------------------
// Digest Computation
// ---------------------------------------------------------------------------

/// Compute a record digest from its constituent fields.
///
/// Pure and deterministic: same inputs, same 64-char lowercase hex string.
/// See the module docs for the (undelimited) preimage layout.
pub fn compute_digest(
    sequence_index: u64,
    created_at: i64,
    content: &str,
    previous_digest: &str,
) -> String {
    let index = sequence_index.to_string();
    let timestamp = created_at.to_string();
    sha256_multi_hex(&[
        index.as_bytes(),
        timestamp.as_bytes(),
        content.as_bytes(),
        previous_digest.as_bytes(),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
