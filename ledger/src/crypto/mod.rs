//! # Cryptographic Primitives
//!
//! A thin wrapper around the `sha2` crate. Nothing here is clever, and
//! nothing here should become clever.

pub mod hash;

pub use hash::{is_digest_hex, sha256, sha256_hex, sha256_multi, sha256_multi_hex};
