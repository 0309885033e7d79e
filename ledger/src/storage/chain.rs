//! # Chain
//!
//! An ordered, append-only sequence of [`Record`]s rooted at a genesis
//! record. The records live in a `Vec` indexed by sequence number, so the
//! tail is always one lookup away and nothing owns anything but the chain.
//!
//! ## Verification
//!
//! [`Chain::verify`] walks adjacent pairs `(current, next)` from genesis to
//! tail and, for each pair:
//!
//! 1. recomputes `current`'s digest and compares it with the stored one
//!    (content changed after the fact);
//! 2. compares `next.previous_digest` with `current.digest` (a record was
//!    spliced in, removed, or reordered).
//!
//! The first failure wins. The tail has no successor, so `verify` never
//! recomputes its digest; [`Chain::audit`] does, and also keeps going past
//! the first fault.
//!
//! An invalid chain is an answer, not an error. Nothing here returns `Err`
//! because a digest did not match.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::storage::content::BoundedContent;
use crate::storage::record::Record;

// ---------------------------------------------------------------------------
// Verification Results
// ---------------------------------------------------------------------------

/// A single integrity violation found while walking the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fault {
    /// The record's stored digest does not match its fields.
    DigestMismatch {
        sequence_index: u64,
        stored: String,
        computed: String,
    },
    /// The record's `previous_digest` does not match its predecessor's digest.
    LinkMismatch {
        sequence_index: u64,
        expected: String,
        found: String,
    },
}

impl Fault {
    /// Index of the record the fault was found on.
    pub fn sequence_index(&self) -> u64 {
        match self {
            Fault::DigestMismatch { sequence_index, .. }
            | Fault::LinkMismatch { sequence_index, .. } => *sequence_index,
        }
    }

    pub fn is_digest_mismatch(&self) -> bool {
        matches!(self, Fault::DigestMismatch { .. })
    }

    pub fn is_link_mismatch(&self) -> bool {
        matches!(self, Fault::LinkMismatch { .. })
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::DigestMismatch {
                sequence_index,
                stored,
                computed,
            } => write!(
                f,
                "record {sequence_index} digest mismatch: stored={stored}, computed={computed}"
            ),
            Fault::LinkMismatch {
                sequence_index,
                expected,
                found,
            } => write!(
                f,
                "record {sequence_index} link mismatch: previous digest {found}, predecessor digest {expected}"
            ),
        }
    }
}

/// Outcome of [`Chain::verify`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "fault", rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    /// Carries the first fault encountered in traversal order.
    Invalid(Fault),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(fault) => Some(fault),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str("valid"),
            Verdict::Invalid(fault) => write!(f, "invalid ({fault})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Ordered chain of hash-linked records. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    records: Vec<Record>,
    config: LedgerConfig,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// New chain with the default config and a genesis record stamped now.
    pub fn new() -> Self {
        let config = LedgerConfig::default();
        let genesis = Record::genesis(now(), &config);
        Self::from_genesis(genesis, config)
    }

    /// New chain with a custom config, genesis stamped now.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidConfig`] if the config does not validate.
    pub fn with_config(config: LedgerConfig) -> Result<Self, LedgerError> {
        Self::with_genesis_at(now(), config)
    }

    /// New chain whose genesis carries an explicit timestamp.
    pub fn with_genesis_at(created_at: i64, config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        let genesis = Record::genesis(created_at, &config);
        Ok(Self::from_genesis(genesis, config))
    }

    fn from_genesis(genesis: Record, config: LedgerConfig) -> Self {
        info!(
            genesis_digest = %genesis.digest(),
            max_content_len = config.max_content_len,
            "chain created"
        );
        Chain {
            records: vec![genesis],
            config,
        }
    }

    /// Rebuild a chain from a record sequence produced elsewhere (for
    /// example a deserialized snapshot).
    ///
    /// Only the shape is checked here: non-empty, indices `0..n` in order,
    /// content within the config's bound. Digests and links are left for
    /// [`Chain::verify`] to judge.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidConfig`] for a bad config,
    /// [`LedgerError::InvalidInput`] for a malformed sequence.
    pub fn from_records(records: Vec<Record>, config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        if records.is_empty() {
            return Err(LedgerError::InvalidInput(
                "record sequence is empty; a chain needs a genesis record".to_string(),
            ));
        }
        for (position, record) in records.iter().enumerate() {
            if record.sequence_index() != position as u64 {
                return Err(LedgerError::InvalidInput(format!(
                    "record at position {position} has sequence index {}",
                    record.sequence_index()
                )));
            }
            if !record.bounded_content().fits(config.max_content_len) {
                return Err(LedgerError::InvalidInput(format!(
                    "record {position} content exceeds {} bytes or contains NUL",
                    config.max_content_len
                )));
            }
        }
        debug!(len = records.len(), "chain rebuilt from records");
        Ok(Chain { records, config })
    }

    // -----------------------------------------------------------------------
    // Append
    // -----------------------------------------------------------------------

    /// Append a record stamped with the current time.
    ///
    /// Always succeeds. Content is cut at the first NUL and then truncated
    /// to the bound.
    pub fn append(&mut self, content: &str) -> &Record {
        self.append_at(content, now())
    }

    /// Append with an explicit timestamp.
    pub fn append_at(&mut self, content: &str, created_at: i64) -> &Record {
        let content = BoundedContent::new(content, self.config.max_content_len);
        self.push(content, created_at)
    }

    /// Append raw bytes, which must be UTF-8.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidInput`] if `bytes` is not UTF-8. The chain is
    /// left unchanged.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<&Record, LedgerError> {
        let content = BoundedContent::from_bytes(bytes, self.config.max_content_len)?;
        Ok(self.push(content, now()))
    }

    fn push(&mut self, content: BoundedContent, created_at: i64) -> &Record {
        let record = Record::new(self.tip(), content, created_at);
        debug!(
            sequence_index = record.sequence_index(),
            digest = %record.digest(),
            content_len = record.content().len(),
            "record appended"
        );
        self.records.push(record);
        self.tip()
    }

    // -----------------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------------

    /// Walk the chain and report the first integrity fault, if any.
    pub fn verify(&self) -> Verdict {
        for pair in self.records.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);

            if let Some(fault) = check_digest(current) {
                warn!(%fault, "chain verification failed");
                return Verdict::Invalid(fault);
            }
            if let Some(fault) = check_link(current, next) {
                warn!(%fault, "chain verification failed");
                return Verdict::Invalid(fault);
            }
        }

        debug!(len = self.records.len(), "chain verified");
        Verdict::Valid
    }

    /// Boolean form of [`Chain::verify`].
    pub fn is_valid(&self) -> bool {
        self.verify().is_valid()
    }

    /// Every fault in the chain, in traversal order. Unlike
    /// [`Chain::verify`] this also re-digests the tail.
    pub fn audit(&self) -> Vec<Fault> {
        let mut faults = Vec::new();
        for pair in self.records.windows(2) {
            faults.extend(check_digest(&pair[0]));
            faults.extend(check_link(&pair[0], &pair[1]));
        }
        faults.extend(check_digest(self.tip()));

        if !faults.is_empty() {
            warn!(count = faults.len(), "chain audit found faults");
        }
        faults
    }

    // -----------------------------------------------------------------------
    // Tamper
    // -----------------------------------------------------------------------

    /// Overwrite one record's content in place WITHOUT recomputing its
    /// digest.
    ///
    /// This exists to exercise verification: afterwards `verify` reports a
    /// digest mismatch at `index` (if the record has a successor) and
    /// `audit` always does, unless the new content happens to equal the old.
    ///
    /// # Errors
    ///
    /// [`LedgerError::RecordNotFound`] for an index past the tail. The new
    /// content is cut and bounded the same way [`Chain::append`] does it.
    pub fn tamper(&mut self, index: u64, content: &str) -> Result<(), LedgerError> {
        let content = BoundedContent::new(content, self.config.max_content_len);
        let len = self.records.len();
        let record = usize::try_from(index)
            .ok()
            .and_then(|i| self.records.get_mut(i))
            .ok_or(LedgerError::RecordNotFound { index, len })?;

        warn!(
            sequence_index = index,
            "record content overwritten without re-digesting"
        );
        record.overwrite_content(content);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Number of records, genesis included. Always at least 1.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn genesis(&self) -> &Record {
        &self.records[0]
    }

    /// The most recently appended record.
    pub fn tip(&self) -> &Record {
        // Never empty: every constructor installs a genesis record.
        &self.records[self.records.len() - 1]
    }

    pub fn get(&self, index: u64) -> Option<&Record> {
        usize::try_from(index).ok().and_then(|i| self.records.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

fn check_digest(record: &Record) -> Option<Fault> {
    let computed = record.compute_digest();
    if computed == record.digest() {
        return None;
    }
    Some(Fault::DigestMismatch {
        sequence_index: record.sequence_index(),
        stored: record.digest().to_string(),
        computed,
    })
}

fn check_link(current: &Record, next: &Record) -> Option<Fault> {
    if next.previous_digest() == current.digest() {
        return None;
    }
    Some(Fault::LinkMismatch {
        sequence_index: next.sequence_index(),
        expected: current.digest().to_string(),
        found: next.previous_digest().to_string(),
    })
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
