//! Dotted content paths
//!
//! Provides [`ContentPath`] for addressing leaves within a content document.
//!
//! # Examples
//! - `hero.title` → `[Key("hero"), Key("title")]`
//! - `products.items.2.price` → `[Key("products"), Key("items"), Index(2), Key("price")]`

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One step of a content path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => write!(f, "{k}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Path within a content document tree
///
/// Dot-delimited keys and numeric indices. All-digit segments are indices;
/// everything else is an object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPath(Vec<Segment>);

impl ContentPath {
    /// Create path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Path from a single key
    #[inline]
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self(vec![Segment::Key(name.into())])
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First segment
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Segment> {
        self.0.first()
    }

    /// Last segment
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Append a key segment, returning a new path
    #[inline]
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(Segment::Key(key.into()));
        new
    }

    /// Append an index segment, returning a new path
    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> Self {
        let mut new = self.clone();
        new.0.push(Segment::Index(index));
        new
    }

    /// Name of the top-level section this path addresses
    ///
    /// Used by the session to classify patch volatility.
    #[inline]
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        match self.0.first() {
            Some(Segment::Key(k)) => Some(k.as_str()),
            _ => None,
        }
    }
}

impl Display for ContentPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ContentPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<Segment> = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment)
                } else if seg.bytes().all(|b| b.is_ascii_digit()) {
                    seg.parse::<usize>()
                        .map(Segment::Index)
                        .map_err(|_| PathError::InvalidSegment(seg.to_string()))
                } else if seg
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
                {
                    Ok(Segment::Key(seg.to_string()))
                } else {
                    Err(PathError::InvalidSegment(seg.to_string()))
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

/// Errors related to content paths
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Path string is empty
    #[error("path is empty")]
    Empty,

    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric, underscore or hyphen)")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keys_and_indices() {
        let path: ContentPath = "products.items.2.price".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("products".into()),
                Segment::Key("items".into()),
                Segment::Index(2),
                Segment::Key("price".into()),
            ]
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!("".parse::<ContentPath>(), Err(PathError::Empty)));
        assert!(matches!(
            "hero..title".parse::<ContentPath>(),
            Err(PathError::EmptySegment)
        ));
    }

    #[test]
    fn parse_rejects_invalid_chars() {
        assert!(matches!(
            "hero.ti tle".parse::<ContentPath>(),
            Err(PathError::InvalidSegment(_))
        ));
    }

    #[test]
    fn hyphenated_keys_allowed() {
        assert!("social-proof.items".parse::<ContentPath>().is_ok());
    }

    #[test]
    fn display_roundtrip() {
        let s = "products.items.0.name";
        let path: ContentPath = s.parse().unwrap();
        assert_eq!(path.to_string(), s);
    }

    #[test]
    fn section_is_first_key() {
        let path: ContentPath = "colors.primary".parse().unwrap();
        assert_eq!(path.section(), Some("colors"));
    }

    #[test]
    fn parent_and_last() {
        let path: ContentPath = "hero.title".parse().unwrap();
        assert_eq!(path.parent().unwrap().to_string(), "hero");
        assert_eq!(path.last(), Some(&Segment::Key("title".into())));
    }

    #[test]
    fn builders() {
        let path = ContentPath::key("products").child("items").at(1).child("price");
        assert_eq!(path.to_string(), "products.items.1.price");
    }
}
