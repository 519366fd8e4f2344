use crate::error::SrcParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Half-open byte interval `[start, start + length)` inside the source unit
/// numbered `file_index` of a compilation.
///
/// This is the decoded form of a solc `src` attribute. Generated nodes may
/// carry `-1` components, so the fields are signed; see [`SourceRange::is_valid`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start: i64,
    pub length: i64,
    pub file_index: i64,
}

impl SourceRange {
    pub fn new(start: i64, length: i64, file_index: i64) -> Self {
        Self {
            start,
            length,
            file_index,
        }
    }

    /// Parse a solc `src` attribute.
    pub fn parse(src: &str) -> Result<Self, SrcParseError> {
        src.parse()
    }

    /// Exclusive end offset, `None` if it does not fit in an `i64`.
    pub fn end(&self) -> Option<i64> {
        self.start.checked_add(self.length)
    }

    /// Whether the range points at real source text.
    pub fn is_valid(&self) -> bool {
        self.start >= 0 && self.length >= 0 && self.end().is_some()
    }

    /// Whether `offset` lies inside `[start, end)`.
    pub fn contains_offset(&self, offset: i64) -> bool {
        self.end()
            .is_some_and(|end| self.start <= offset && offset < end)
    }
}

impl FromStr for SourceRange {
    type Err = SrcParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut parts = src.split(':');
        let mut next = || -> Result<i64, SrcParseError> {
            parts
                .next()
                .and_then(|p| p.trim().parse::<i64>().ok())
                .ok_or_else(|| SrcParseError::new(src))
        };
        let range = SourceRange::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(SrcParseError::new(src));
        }
        Ok(range)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.length, self.file_index)
    }
}
