//! # Shared Chain Handle
//!
//! [`Chain`] is a plain single-owner value. When several threads need to
//! write to the same ledger, wrap it in a [`SharedChain`]: every mutation
//! (append, tamper) goes through one write lock, and verification runs
//! against a snapshot cloned under the read lock, so it can never observe a
//! half-finished append.
//!
//! The lock is `parking_lot::RwLock`; handles are cheap `Arc` clones.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::LedgerError;
use crate::storage::chain::{Chain, Fault, Verdict};
use crate::storage::record::Record;

/// Clone-able, thread-safe handle over a single [`Chain`].
#[derive(Clone, Debug, Default)]
pub struct SharedChain {
    inner: Arc<RwLock<Chain>>,
}

impl SharedChain {
    pub fn new(chain: Chain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Append under the write lock. Returns a copy of the new record, since
    /// a reference cannot outlive the guard.
    pub fn append(&self, content: &str) -> Record {
        let mut chain = self.inner.write();
        chain.append(content).clone()
    }

    pub fn append_bytes(&self, bytes: &[u8]) -> Result<Record, LedgerError> {
        let mut chain = self.inner.write();
        chain.append_bytes(bytes).cloned()
    }

    /// See [`Chain::tamper`].
    pub fn tamper(&self, index: u64, content: &str) -> Result<(), LedgerError> {
        self.inner.write().tamper(index, content)
    }

    /// Point-in-time copy of the whole chain.
    pub fn snapshot(&self) -> Chain {
        self.inner.read().clone()
    }

    /// Verify a snapshot. The lock is released before hashing starts, so
    /// writers are only held up for the duration of the clone.
    pub fn verify(&self) -> Verdict {
        self.snapshot().verify()
    }

    pub fn audit(&self) -> Vec<Fault> {
        self.snapshot().audit()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn tip(&self) -> Record {
        self.inner.read().tip().clone()
    }

    /// Run `f` against the chain under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Chain) -> R) -> R {
        f(&self.inner.read())
    }
}

impl From<Chain> for SharedChain {
    fn from(chain: Chain) -> Self {
        Self::new(chain)
    }
}
