//! Content hashing for draft change detection
//!
//! Provides [`ContentHash`], a strongly-typed 32-byte Blake3 hash used to
//! compare drafts against their last persisted state and to key render caches.

use crate::doc::ContentDoc;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content hash (Blake3)
///
/// Immutable and cheap to clone (Copy). Two documents with equal canonical
/// JSON encodings produce equal hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new hash from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compute Blake3 hash of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self::new(*hash.as_bytes())
    }

    /// Compute the canonical hash of a content document
    ///
    /// serde_json object maps are key-sorted, so the encoding is canonical:
    /// the same logical document always hashes the same.
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn of_doc(doc: &ContentDoc) -> Result<Self, HashError> {
        let bytes = serde_json::to_vec(doc.as_value())?;
        Ok(Self::compute(&bytes))
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(HashError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Default for ContentHash {
    fn default() -> Self {
        Self([0; 32])
    }
}

/// Errors that can occur when working with content hashes
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Invalid hash length
    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compute_deterministic() {
        let h1 = ContentHash::compute(b"hello");
        let h2 = ContentHash::compute(b"hello");
        assert_eq!(h1, h2);
    }

    #[test]
    fn compute_different_data() {
        assert_ne!(ContentHash::compute(b"a"), ContentHash::compute(b"b"));
    }

    #[test]
    fn doc_hash_ignores_key_insertion_order() {
        let a = ContentDoc::new(json!({"hero": {"title": "Hi"}, "colors": {"primary": "#000"}}))
            .unwrap();
        let b = ContentDoc::new(json!({"colors": {"primary": "#000"}, "hero": {"title": "Hi"}}))
            .unwrap();
        assert_eq!(
            ContentHash::of_doc(&a).unwrap(),
            ContentHash::of_doc(&b).unwrap()
        );
    }

    #[test]
    fn doc_hash_differs_on_edit() {
        let a = ContentDoc::new(json!({"hero": {"title": "Hi"}})).unwrap();
        let b = ContentDoc::new(json!({"hero": {"title": "Bye"}})).unwrap();
        assert_ne!(
            ContentHash::of_doc(&a).unwrap(),
            ContentHash::of_doc(&b).unwrap()
        );
    }

    #[test]
    fn display_and_parse() {
        let hash = ContentHash::compute(b"test");
        let parsed: ContentHash = hash.to_string().parse().unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn short_prefix() {
        let hash = ContentHash::compute(b"test");
        let short = hash.short();
        assert_eq!(short.len(), 16);
        assert!(hash.to_string().starts_with(&short));
    }

    #[test]
    fn parse_invalid_length() {
        let result: Result<ContentHash, _> = "abcd".parse();
        assert!(matches!(result, Err(HashError::InvalidLength { .. })));
    }
}
