//! # Storage Module
//!
//! The in-memory ledger: bounded content, records, the chain that links
//! them, and a shared handle for multi-threaded writers.
//!
//! ## Architecture
//!
//! ```text
//! content.rs: BoundedContent, truncate-on-construct payload
//! record.rs : Record structure, genesis record, digest derivation
//! chain.rs  : Chain append / verify / audit / tamper, Verdict and Fault
//! shared.rs : SharedChain, single-writer lock around a Chain
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! &str ──► BoundedContent ──► Record ──► Chain ──► Verdict
//!                               ▲          │
//!                               └─ tip ────┘
//! ```
//!
//! Nothing here touches disk. Records derive serde traits so callers can
//! persist a chain in traversal order however they like and hand it back
//! through `Chain::from_records`.

pub mod chain;
pub mod content;
pub mod record;
pub mod shared;

pub use chain::{Chain, Fault, Verdict};
pub use content::BoundedContent;
pub use record::{compute_digest, Record};
pub use shared::SharedChain;
