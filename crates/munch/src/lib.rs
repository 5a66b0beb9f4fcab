//! # Munch
//!
//! A regex-to-automaton compiler and a longest-match scanner built on it.
//!
//! ## Overview
//!
//! - **Automata**: epsilon-free NFAs with a regex algebra, subset
//!   construction, partition-refinement minimization, product intersection
//!   and subtraction, and structural equality
//! - **Patterns**: a small regex syntax and a pattern tree compiled with that
//!   algebra
//! - **Scanning**: every pattern runs side by side; the longest match wins
//!   and registration order breaks ties
//! - **Locations**: tokens and errors carry line, column and byte offset
//!
//! ## Quick Start
//!
//! ```rust
//! use munch::{LexerBuilder, lexer::Pattern};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Number,
//!     Plus,
//!     Minus,
//!     Eof,
//! }
//!
//! let lexer = LexerBuilder::new()
//!     .token(Kind::Number, Pattern::regex("[0-9]+"))
//!     .token(Kind::Plus, Pattern::literal("+"))
//!     .token(Kind::Minus, Pattern::literal("-"))
//!     .ignore(Pattern::regex(r"\s+"))
//!     .build(Kind::Eof)
//!     .expect("patterns are valid");
//!
//! let tokens = lexer.tokenize("12 + 3\n- 4").expect("input is valid");
//! assert_eq!(tokens.len(), 6);
//! assert_eq!(tokens[3].text, "-");
//! assert_eq!(tokens[3].span.start.line_col(), (2, 1));
//! assert_eq!(tokens[5].kind, Kind::Eof);
//! ```
//!
//! ## Modules
//!
//! - [`automata`] - NFA/DFA types and algorithms
//! - [`lexer`] - Automaton sets, the scanning driver and the pattern front end
//! - [`syntax`] - Token kinds and source locations
//! - [`error`] - Error types and diagnostics
//! - [`testing`] - Language comparison helpers for tests

pub mod automata;
pub mod error;
pub mod lexer;
pub mod syntax;
pub mod testing;

// Re-export commonly used types
pub use automata::{Dfa, Nfa, StateId};
pub use error::{LexerError, LexerErrorKind, PatternError, PatternErrorKind};
pub use lexer::{
    AutomatonSet, AutomatonSetState, CompiledLexer, Lexer, LexerBuilder, LexerConfig, Token,
};
pub use syntax::{Location, Span, TokenKind};
