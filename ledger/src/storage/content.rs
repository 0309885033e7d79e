//! # Bounded Record Content
//!
//! Record payloads are capped at a fixed number of bytes. Oversized input is
//! cut down silently; callers that care about the cut compare lengths
//! themselves. The cut always lands on a UTF-8 character boundary, so for
//! multi-byte text the stored content may be a few bytes shorter than the
//! bound.
//!
//! A NUL character ends the content, the same way it ends a C string: text
//! after the first NUL is dropped just as silently as text past the bound.
//! The only input that is refused outright is raw bytes that are not UTF-8.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// An owned string no longer than the bound it was built with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundedContent(String);

impl BoundedContent {
    /// Build from text, cutting at the first NUL and then truncating to at
    /// most `max_len` bytes. Never fails.
    pub fn new(text: &str, max_len: usize) -> Self {
        let text = text.find('\0').map_or(text, |pos| &text[..pos]);
        Self(truncate_to_boundary(text, max_len).to_string())
    }

    /// Build from raw bytes. Same rules as [`BoundedContent::new`], plus the
    /// bytes must be valid UTF-8.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidInput`] if `bytes` is not UTF-8.
    pub fn from_bytes(bytes: &[u8], max_len: usize) -> Result<Self, LedgerError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            LedgerError::InvalidInput(format!("content is not valid UTF-8: {e}"))
        })?;
        Ok(Self::new(text, max_len))
    }

    /// Wrap text that is already known to fit. Used for the genesis label,
    /// which `LedgerConfig::validate` has already checked.
    pub(crate) fn from_trusted(text: &str) -> Self {
        Self(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this content could have been produced by [`BoundedContent::new`]
    /// with the given bound.
    pub fn fits(&self, max_len: usize) -> bool {
        self.0.len() <= max_len && !self.0.contains('\0')
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for BoundedContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Longest prefix of `s` that is at most `max_len` bytes and ends on a char
/// boundary.
fn truncate_to_boundary(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_CONTENT_LEN;

    #[test]
    fn short_content_kept_verbatim() {
        let c = BoundedContent::new("hello", MAX_CONTENT_LEN);
        assert_eq!(c.as_str(), "hello");
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn content_at_bound_kept() {
        let text = "x".repeat(MAX_CONTENT_LEN);
        let c = BoundedContent::new(&text, MAX_CONTENT_LEN);
        assert_eq!(c.len(), MAX_CONTENT_LEN);
    }

    #[test]
    fn oversized_content_truncated_to_bound() {
        let text = "y".repeat(MAX_CONTENT_LEN + 100);
        let c = BoundedContent::new(&text, MAX_CONTENT_LEN);
        assert_eq!(c.len(), MAX_CONTENT_LEN);
        assert_eq!(c.as_str(), &text[..MAX_CONTENT_LEN]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "é" is two bytes; a bound of 3 must not split the second one.
        let c = BoundedContent::new("éé", 3);
        assert_eq!(c.as_str(), "é");
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn empty_content_allowed() {
        let c = BoundedContent::new("", MAX_CONTENT_LEN);
        assert!(c.is_empty());
    }

    #[test]
    fn nul_ends_content() {
        let c = BoundedContent::new("File metadata: a\0b.txt", MAX_CONTENT_LEN);
        assert_eq!(c.as_str(), "File metadata: a");
    }

    #[test]
    fn leading_nul_gives_empty_content() {
        let c = BoundedContent::new("\0rest", MAX_CONTENT_LEN);
        assert!(c.is_empty());
    }

    #[test]
    fn nul_inside_bytes_ends_content() {
        let c = BoundedContent::from_bytes(b"abc\0def", MAX_CONTENT_LEN).unwrap();
        assert_eq!(c.as_str(), "abc");
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = BoundedContent::from_bytes(&[0x66, 0x6f, 0xff], MAX_CONTENT_LEN).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn valid_bytes_accepted() {
        let c = BoundedContent::from_bytes(b"file1.txt", MAX_CONTENT_LEN).unwrap();
        assert_eq!(c.as_str(), "file1.txt");
    }

    #[test]
    fn fits_checks_bound() {
        let c = BoundedContent::new("abcdef", MAX_CONTENT_LEN);
        assert!(c.fits(6));
        assert!(!c.fits(5));
    }

    #[test]
    fn serializes_as_plain_string() {
        let c = BoundedContent::new("data", MAX_CONTENT_LEN);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"data\"");
    }
}
