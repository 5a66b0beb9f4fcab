//! # Error Types
//!
//! Errors raised while compiling patterns and while scanning input.
//!
//! ## Overview
//!
//! - [`PatternError`]: a malformed pattern handed to the builder or the regex
//!   parser. Raised before any scanning begins.
//! - [`LexerError`]: input that no registered pattern can match. Carries the
//!   [`Span`] from the token's start to the point where scanning stopped, the
//!   text scanned so far and the character that ended the scan, if any.
//!
//! ## Usage
//!
//! ```rust
//! use munch::error::LexerErrorKind;
//! use munch::lexer::{LexerBuilder, Pattern};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Word,
//!     Eof,
//! }
//!
//! let lexer = LexerBuilder::new()
//!     .token(Kind::Word, Pattern::Literal("ab".into()))
//!     .build(Kind::Eof)
//!     .unwrap();
//!
//! let err = lexer.lexer("ac".chars()).read_token().unwrap_err();
//! assert_eq!(err.span.start.line_col(), (1, 1));
//! assert_eq!(err.span.end.line_col(), (1, 3));
//! assert!(matches!(err.kind, LexerErrorKind::NoMatch { offending: Some('c'), .. }));
//! ```
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with [`miette`]
//! for rich error reporting with source code snippets.

use crate::syntax::Span;
use compact_str::CompactString;
use std::fmt::Write;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Scan error with location information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("{kind} at {}", .span.start)]
pub struct LexerError {
    #[cfg_attr(feature = "diagnostics", label)]
    pub span: Span,
    #[source]
    pub kind: LexerErrorKind,
}

/// Types of scan errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum LexerErrorKind {
    /// No pattern can start with this character
    #[error("Unexpected character: {char:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::unexpected_char)))]
    UnexpectedChar { char: char },

    /// Some pattern consumed `text` but none accepted it before the scan
    /// died on `offending` (or reached the end of input when `None`)
    #[error("No pattern matches {text:?}{}", describe_offending(.offending))]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::no_match)))]
    NoMatch {
        text: CompactString,
        offending: Option<char>,
    },
}

fn describe_offending(offending: &Option<char>) -> String {
    offending.map_or_else(
        || " before end of input".to_string(),
        |c| format!(" followed by {c:?}"),
    )
}

impl LexerErrorKind {
    /// Create an unexpected character error
    #[must_use]
    pub const fn unexpected_char(char: char) -> Self {
        Self::UnexpectedChar { char }
    }

    /// Create a no-match error
    #[must_use]
    pub const fn no_match(text: CompactString, offending: Option<char>) -> Self {
        Self::NoMatch { text, offending }
    }
}

impl LexerError {
    #[must_use]
    pub const fn new(span: Span, kind: LexerErrorKind) -> Self {
        Self { span, kind }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The unmatched input: the scanned text followed by the offending
    /// character when there is one
    #[must_use]
    pub fn unmatched(&self) -> CompactString {
        match &self.kind {
            LexerErrorKind::UnexpectedChar { char } => CompactString::from(char.to_string()),
            LexerErrorKind::NoMatch { text, offending } => {
                let mut unmatched = text.clone();
                if let Some(c) = offending {
                    unmatched.push(*c);
                }
                unmatched
            }
        }
    }

    /// Format the error together with the source line it points into and a
    /// caret marker under the unmatched input.
    #[must_use]
    pub fn format_with_context(&self, source: &str) -> String {
        let mut result = format!("{self}");
        let line_index = (self.span.start.line as usize).saturating_sub(1);
        if let Some(line) = source.lines().nth(line_index) {
            let column = (self.span.start.column as usize).saturating_sub(1);
            let width = self.unmatched().chars().count().max(1);
            let _ = write!(
                result,
                "\n  |\n  | {line}\n  | {}{}",
                " ".repeat(column),
                "^".repeat(width)
            );
        }
        result
    }
}

/// Compile-time error in a pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("{kind} at position {position} in pattern {pattern:?}")]
pub struct PatternError {
    /// Pattern text as given to the builder
    pub pattern: String,
    /// Character position in `pattern` where the problem was found
    pub position: usize,
    #[source]
    pub kind: PatternErrorKind,
}

impl PatternError {
    #[must_use]
    pub fn new(pattern: impl Into<String>, position: usize, kind: PatternErrorKind) -> Self {
        Self {
            pattern: pattern.into(),
            position,
            kind,
        }
    }
}

/// Types of pattern errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum PatternErrorKind {
    #[error("Empty pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::empty)))]
    Empty,

    #[error("Unbalanced parenthesis")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unbalanced_paren)))]
    UnbalancedParen,

    #[error("Unclosed character class")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unclosed_class)))]
    UnclosedClass,

    #[error("Empty character class")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::empty_class)))]
    EmptyClass,

    #[error("Invalid range {lo:?}-{hi:?}")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(pattern::invalid_range), help("ranges must be written low-high"))
    )]
    InvalidRange { lo: char, hi: char },

    #[error("Invalid escape sequence: \\{escape}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::invalid_escape)))]
    InvalidEscape { escape: char },

    #[error("Trailing backslash")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::trailing_backslash)))]
    TrailingBackslash,

    #[error("Nothing to repeat before '{op}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::nothing_to_repeat)))]
    NothingToRepeat { op: char },

    #[error("Invalid repetition: {reason}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::invalid_repetition)))]
    InvalidRepetition { reason: String },

    #[error("Unexpected character: {char:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unexpected_char)))]
    UnexpectedChar { char: char },
}

impl PatternErrorKind {
    /// Create an invalid repetition error
    #[must_use]
    pub fn invalid_repetition(reason: impl Into<String>) -> Self {
        Self::InvalidRepetition {
            reason: reason.into(),
        }
    }
}

/// Result of compiling a pattern
pub type PatternResult<T> = Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Location;

    fn span(from: (u32, u32), to: (u32, u32)) -> Span {
        Span::new(
            Location::new(from.0, from.1, from.1 - 1),
            Location::new(to.0, to.1, to.1 - 1),
        )
    }

    #[test]
    fn test_no_match_message() {
        let err = LexerError::new(
            span((1, 1), (1, 3)),
            LexerErrorKind::no_match("a".into(), Some('c')),
        );
        assert_eq!(
            err.to_string(),
            "No pattern matches \"a\" followed by 'c' at 1:1"
        );
        assert_eq!(err.unmatched(), "ac");
    }

    #[test]
    fn test_no_match_at_end_of_input() {
        let kind = LexerErrorKind::no_match("ab".into(), None);
        assert_eq!(kind.to_string(), "No pattern matches \"ab\" before end of input");
    }

    #[test]
    fn test_format_with_context() {
        let err = LexerError::new(
            span((2, 3), (2, 4)),
            LexerErrorKind::unexpected_char('$'),
        );
        let rendered = err.format_with_context("first\nab$cd\n");
        assert!(rendered.starts_with("Unexpected character: '$' at 2:3"));
        assert!(rendered.ends_with("  | ab$cd\n  |   ^"));
    }

    #[test]
    fn test_pattern_error_message() {
        let err = PatternError::new("a(b", 1, PatternErrorKind::UnbalancedParen);
        assert_eq!(
            err.to_string(),
            "Unbalanced parenthesis at position 1 in pattern \"a(b\""
        );
    }
}
