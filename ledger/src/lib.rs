// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Custody Ledger
//!
//! An append-only, tamper-evident ledger. Every record carries the SHA-256
//! digest of its own fields plus the digest of the record before it, so
//! changing anything already written breaks a link that [`Chain::verify`]
//! will find.
//!
//! ## Architecture
//!
//! - **storage**: Records, the chain, verification, the shared handle.
//! - **crypto**: SHA-256 helpers. Nothing home-grown.
//! - **config**: Constants that feed the digest format, plus `LedgerConfig`.
//! - **error**: `LedgerError`, for the few things that can actually fail.
//!
//! ## Example
//!
//! ```
//! use custody_ledger::Chain;
//!
//! let mut chain = Chain::new();
//! chain.append("File metadata: file1.txt, Size: 1KB, Created: 2024-10-01");
//! chain.append("File metadata: file2.txt, Size: 2KB, Created: 2024-10-02");
//! assert!(chain.verify().is_valid());
//!
//! chain.tamper(1, "Tampered data").unwrap();
//! let verdict = chain.verify();
//! assert_eq!(verdict.fault().unwrap().sequence_index(), 1);
//! ```
//!
//! ## Scope
//!
//! Single process, in memory. No consensus, no networking, no signatures,
//! no on-disk format.

pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use storage::{BoundedContent, Chain, Fault, Record, SharedChain, Verdict};
