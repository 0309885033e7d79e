//! # Hashing Utilities
//!
//! SHA-256 is the only hash function in the ledger. Record digests are
//! lowercase hex strings rather than raw arrays because they double as the
//! link stored in the next record and as the value humans compare on screen.
//!
//! ## On multi-part hashing
//!
//! Record preimages are built from several fields. [`sha256_multi`] feeds
//! them sequentially into one hasher, which is byte-for-byte the same as
//! hashing their concatenation, minus the temporary buffer. Note that this
//! means the parts are NOT delimited: `["ab", "c"]` and `["a", "bc"]` hash
//! identically.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use custody_ledger::crypto::sha256;
///
/// let hash = sha256(b"custody");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 and return it as lowercase hex.
///
/// # Example
///
/// ```
/// use custody_ledger::crypto::sha256_hex;
///
/// let digest = sha256_hex(b"");
/// assert_eq!(
///     digest,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Hash multiple byte slices as if they were concatenated.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// [`sha256_multi`], hex-encoded.
pub fn sha256_multi_hex(parts: &[&[u8]]) -> String {
    hex::encode(sha256_multi(parts))
}

/// Cheap shape check for a digest string: exactly 64 lowercase hex chars.
pub fn is_digest_hex(s: &str) -> bool {
    s.len() == crate::config::DIGEST_HEX_LEN
        && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
