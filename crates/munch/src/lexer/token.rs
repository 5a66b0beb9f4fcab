use crate::syntax::{Span, TokenKind};
use compact_str::CompactString;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token produced by the lexer.
///
/// Each token carries the kind of the pattern that matched it, the exact
/// matched text and the `[start, end)` span it covers in the input. The
/// end-of-input token has the lexer's EOF kind, empty text and an empty span
/// at the end of the input.
///
/// # Example
///
/// ```rust
/// use munch::lexer::Token;
/// use munch::syntax::{Location, Span};
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum MyKind { Number, Eof }
/// let start = Location::start();
/// let end = start.advanced('4').advanced('2');
/// let token = Token::new(MyKind::Number, "42", Span::new(start, end));
///
/// assert_eq!(token.len(), 2);
/// assert_eq!(token.to_string(), "Number \"42\" 1:1-1:3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Token<K: TokenKind> {
    /// The kind of this token (e.g., `Number`, `Identifier`, `Plus`)
    pub kind: K,
    /// The source text that this token represents
    pub text: CompactString,
    /// Where this token appears in the input
    pub span: Span,
}

impl<K: TokenKind> Token<K> {
    /// Create a new token with the given kind, text, and span.
    #[must_use]
    pub fn new(kind: K, text: impl Into<CompactString>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Length of the token text in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl<K: TokenKind> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} {}", self.kind, self.text, self.span)
    }
}
