//! Station and category identifiers.

use std::fmt;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier {input:?}: {reason}")]
pub struct InvalidId {
    input: String,
    reason: &'static str,
}

/// Identifiers are short slugs: ASCII letters, digits, `-` and `_`.
fn check_slug(s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            input: s.to_string(),
            reason: "must not be empty",
        });
    }

    if s.len() > 64 {
        return Err(InvalidId {
            input: s.to_string(),
            reason: "must be at most 64 characters",
        });
    }

    if !s
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(InvalidId {
            input: s.to_string(),
            reason: "must contain only ASCII letters, digits, '-' or '_'",
        });
    }

    Ok(())
}

/// Stable, unique identifier of a drop-off station (e.g. `station-1`).
///
/// # Examples
///
/// ```
/// use station_finder::domain::StationId;
///
/// let id = StationId::parse("station-1").unwrap();
/// assert_eq!(id.as_str(), "station-1");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("station 1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check_slug(s)?;
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a waste category (e.g. `plastic`, `ewaste`).
///
/// Category ids are case-insensitive on input and stored lowercase.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check_slug(s)?;
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Za-z0-9_-]{1,64}") {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Whitespace anywhere is rejected
        #[test]
        fn whitespace_rejected(a in "[a-z]{0,5}", b in "[a-z]{0,5}") {
            let s = format!("{a} {b}");
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
