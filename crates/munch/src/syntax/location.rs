//! Source locations
//!
//! The lexer driver tracks where it is in the character stream as a
//! [`Location`]: a 1-based line and column plus the UTF-8 byte offset
//! consumed so far. Tokens and errors carry a [`Span`] of two locations.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the source text.
///
/// `line` and `column` are 1-based. `offset` is the number of UTF-8 bytes
/// consumed before this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Location {
    /// One-based line number
    pub line: u32,
    /// One-based column number (in characters)
    pub column: u32,
    /// Byte offset from the start of the input
    pub offset: u32,
}

impl Location {
    /// Create a location from its parts
    #[must_use]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The location of the first character of an input
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// The location reached after consuming `c` at this location.
    ///
    /// A newline moves to column 1 of the next line; any other character
    /// moves one column to the right.
    #[must_use]
    pub fn advanced(self, c: char) -> Self {
        let offset = self
            .offset
            .saturating_add(u32::try_from(c.len_utf8()).unwrap_or(u32::MAX));
        if c == '\n' {
            Self::new(self.line.saturating_add(1), 1, offset)
        } else {
            Self::new(self.line, self.column.saturating_add(1), offset)
        }
    }

    /// The `(line, column)` pair, convenient for comparisons in tests and
    /// error reports.
    #[must_use]
    pub const fn line_col(self) -> (u32, u32) {
        (self.line, self.column)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[start, end)` range of source locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// An empty span at `at`
    #[must_use]
    pub const fn empty(at: Location) -> Self {
        Self::new(at, at)
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn byte_len(self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(feature = "diagnostics")]
impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        use miette::SourceOffset;
        Self::new(
            SourceOffset::from(span.start.offset as usize),
            span.byte_len() as usize,
        )
    }
}
