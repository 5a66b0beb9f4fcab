//! # Lexer Module
//!
//! Longest-match tokenization over a set of automata.
//!
//! ## Overview
//!
//! - [`AutomatonSet`]: DFAs tagged with a token kind (or marked discard),
//!   in priority order
//! - [`AutomatonSetState`]: all automata of a set run side by side for one
//!   token; decides which pattern wins
//! - [`Lexer`]: the driver that tracks line and column, skips discarded
//!   matches and reports unmatched input
//! - [`LexerBuilder`] / [`CompiledLexer`]: compile [`Pattern`]s into a set
//!   and tokenize strings
//!
//! The longest match wins. Among patterns matching the same longest prefix,
//! the one registered first wins.
//!
//! ## Usage
//!
//! ```rust
//! use munch::lexer::{CharSet, LexerBuilder, Pattern};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum MyKind {
//!     Ident,
//!     Number,
//!     If,
//!     Eof,
//! }
//!
//! let lexer = LexerBuilder::new()
//!     .keyword("if", MyKind::If)
//!     .token(MyKind::Ident, Pattern::regex("[a-z_][a-z0-9_]*"))
//!     .token(MyKind::Number, Pattern::one_or_more(Pattern::CharClass(CharSet::digits())))
//!     .ignore(Pattern::regex(r"\s+"))
//!     .build(MyKind::Eof)?;
//!
//! let tokens = lexer.tokenize("if x1 42").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [MyKind::If, MyKind::Ident, MyKind::Number, MyKind::Eof]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Scanning returns [`LexerError`](crate::error::LexerError) when no pattern
//! matches at the current position; compiling returns
//! [`PatternError`](crate::error::PatternError) for malformed patterns.

pub mod builder;
pub mod config;
pub mod driver;
pub mod regex;
pub mod set;
pub mod state;
pub mod token;

pub use builder::{CharSet, CompiledLexer, LexRule, LexerBuilder, Pattern};
pub use config::LexerConfig;
pub use driver::Lexer;
pub use set::{AutomatonSet, SetEntry};
pub use state::{AutomatonSetState, Choice};
pub use token::Token;
