//! The lexer driver.
//!
//! A [`Lexer`] wraps a character source, tracks the current [`Location`] and
//! produces one token per [`Lexer::read_token`] call by running a fresh
//! [`AutomatonSetState`] from the current position:
//!
//! ```text
//! Scanning -> (Dead | EndOfInput) -> Finalize -> Discard   -> Scanning
//!                                             -> Token
//!                                             -> Error
//! ```
//!
//! The character that kills the last live automaton is never consumed; it
//! starts the next token. Once the input is exhausted every call returns the
//! end-of-input token at the same location.

use super::set::AutomatonSet;
use super::state::{AutomatonSetState, Choice};
use super::token::Token;
use crate::error::{LexerError, LexerErrorKind};
use crate::syntax::{Location, Span, TokenKind};
use log::debug;

/// Scanner over a stream of characters.
///
/// # Example
///
/// ```rust
/// use munch::automata::{Dfa, Nfa};
/// use munch::lexer::{AutomatonSet, Lexer};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind { Word, Eof }
///
/// let mut set = AutomatonSet::new();
/// set.add_automaton_tag(Dfa::from_nfa(&Nfa::singleton(' ')), None);
/// set.add_automaton_tag(Dfa::from_nfa(&Nfa::plus(&Nfa::range('a', 'z'))), Some(Kind::Word));
///
/// let mut lexer = Lexer::new(&set, Kind::Eof, "hi there".chars());
/// assert_eq!(lexer.read_token().unwrap().text, "hi");
/// assert_eq!(lexer.read_token().unwrap().text, "there");
/// assert_eq!(lexer.read_token().unwrap().kind, Kind::Eof);
/// ```
#[derive(Debug)]
pub struct Lexer<'s, K: TokenKind, I: Iterator<Item = char>> {
    set: &'s AutomatonSet<K>,
    eof_kind: K,
    chars: I,
    current: Option<char>,
    location: Location,
    /// Set once the iterator has yielded the end-of-input token or an error
    finished: bool,
}

impl<'s, K: TokenKind, I: Iterator<Item = char>> Lexer<'s, K, I> {
    /// Create a lexer positioned at the first character of `chars`
    pub fn new(set: &'s AutomatonSet<K>, eof_kind: K, mut chars: I) -> Self {
        let current = chars.next();
        Self {
            set,
            eof_kind,
            chars,
            current,
            location: Location::start(),
            finished: false,
        }
    }

    /// The character under the cursor, `None` at end of input
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Option<char> {
        self.current
    }

    #[inline]
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Location of the character under the cursor
    #[inline]
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Move past the current character, updating the location.
    fn eat(&mut self) {
        if let Some(c) = self.current {
            self.location = self.location.advanced(c);
            self.current = self.chars.next();
        }
    }

    /// Skip the character under the cursor and return it.
    ///
    /// Used to resume after a scan error.
    pub fn skip_char(&mut self) -> Option<char> {
        let skipped = self.current;
        self.eat();
        skipped
    }

    /// Read the next token.
    ///
    /// Matches of discard patterns are skipped. At end of input the
    /// end-of-input token is returned, on this call and every later one.
    ///
    /// # Errors
    ///
    /// Returns a [`LexerError`] when no pattern accepts any prefix of the
    /// input at the current position. The characters scanned before the
    /// failure are consumed; the offending character is not.
    pub fn read_token(&mut self) -> Result<Token<K>, LexerError> {
        loop {
            if self.is_at_end() {
                return Ok(Token::new(self.eof_kind, "", Span::empty(self.location)));
            }

            let start = self.location;
            let mut state = AutomatonSetState::new(self.set);
            while let Some(c) = self.current {
                state.advance(c);
                if state.is_dead() {
                    break;
                }
                self.eat();
            }
            if !state.is_dead() {
                state.choose();
            }

            match state.choice() {
                Some(Choice::Ignore) => {
                    debug!("discarded {:?} at {start}", state.text());
                }
                Some(Choice::Match(kind)) => {
                    let span = Span::new(start, self.location);
                    return Ok(Token::new(kind, state.into_text(), span));
                }
                None => return Err(self.no_match(start, state)),
            }
        }
    }

    fn no_match(&self, start: Location, state: AutomatonSetState<'_, K>) -> LexerError {
        let offending = self.current;
        let end = offending.map_or(self.location, |c| self.location.advanced(c));
        let text = state.into_text();
        let kind = match offending {
            Some(c) if text.is_empty() => LexerErrorKind::unexpected_char(c),
            _ => LexerErrorKind::no_match(text, offending),
        };
        let error = LexerError::new(Span::new(start, end), kind);
        debug!("{error}");
        error
    }
}

/// Yields tokens up to and including the end-of-input token. The iterator
/// also ends after the first error; call [`Lexer::skip_char`] and keep using
/// [`Lexer::read_token`] to recover instead.
impl<K: TokenKind, I: Iterator<Item = char>> Iterator for Lexer<'_, K, I> {
    type Item = Result<Token<K>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.read_token();
        match &result {
            Ok(token) if token.kind == self.eof_kind => self.finished = true,
            Ok(_) => {}
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

impl<K: TokenKind, I: Iterator<Item = char>> std::iter::FusedIterator for Lexer<'_, K, I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::{Dfa, Nfa};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        T1,
        T2,
        X,
        Eof,
    }

    fn dfa(nfa: &Nfa) -> Dfa {
        Dfa::from_nfa(nfa).minimize()
    }

    #[test]
    fn test_eat_tracks_lines() {
        let set = AutomatonSet::<Kind>::new();
        let mut lexer = Lexer::new(&set, Kind::Eof, "a\nb".chars());
        assert_eq!(lexer.skip_char(), Some('a'));
        assert_eq!(lexer.skip_char(), Some('\n'));
        assert_eq!(lexer.location().line_col(), (2, 1));
        assert_eq!(lexer.current(), Some('b'));
        assert_eq!(lexer.skip_char(), Some('b'));
        assert_eq!(lexer.skip_char(), None);
        assert!(lexer.is_at_end());
        assert_eq!(lexer.location(), Location::new(2, 2, 3));
    }

    #[test]
    fn test_longest_match_beats_priority() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::string("ab")), Some(Kind::T1));
        set.add_automaton_tag(dfa(&Nfa::string("a")), Some(Kind::T2));

        let mut lexer = Lexer::new(&set, Kind::Eof, "ab".chars());
        let token = lexer.read_token().unwrap();
        assert_eq!(token.kind, Kind::T1);
        assert_eq!(token.text, "ab");
        assert_eq!(token.span.end.line_col(), (1, 3));
    }

    #[test]
    fn test_shorter_match_then_error() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::string("ab")), Some(Kind::T1));
        set.add_automaton_tag(dfa(&Nfa::string("a")), Some(Kind::T2));

        let mut lexer = Lexer::new(&set, Kind::Eof, "ac".chars());
        let token = lexer.read_token().unwrap();
        assert_eq!((token.kind, token.text.as_str()), (Kind::T2, "a"));
        assert_eq!(token.span.end.line_col(), (1, 2));

        let err = lexer.read_token().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::unexpected_char('c'));
        assert_eq!(err.span.start.line_col(), (1, 2));
        assert_eq!(err.span.end.line_col(), (1, 3));
        // The offending character is still there
        assert_eq!(lexer.current(), Some('c'));
    }

    #[test]
    fn test_discard_resets_start() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::singleton(' ')), None);
        set.add_automaton_tag(dfa(&Nfa::singleton('x')), Some(Kind::X));

        let mut lexer = Lexer::new(&set, Kind::Eof, "  x".chars());
        let token = lexer.read_token().unwrap();
        assert_eq!(token.kind, Kind::X);
        assert_eq!(token.span.start.line_col(), (1, 3));
        assert_eq!(lexer.read_token().unwrap().kind, Kind::Eof);
    }

    #[test]
    fn test_trailing_discard_reaches_eof() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::plus(&Nfa::singleton(' '))), None);
        set.add_automaton_tag(dfa(&Nfa::singleton('x')), Some(Kind::X));

        let tokens: Vec<_> = Lexer::new(&set, Kind::Eof, "x   ".chars())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, Kind::Eof);
        assert_eq!(tokens[1].span, Span::empty(Location::new(1, 5, 4)));
    }

    #[test]
    fn test_iterator_ends_with_eof_kind() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::singleton('x')), Some(Kind::X));

        let mut lexer = Lexer::new(&set, Kind::Eof, "xx".chars());
        assert_eq!(lexer.next().unwrap().unwrap().kind, Kind::X);
        assert_eq!(lexer.next().unwrap().unwrap().kind, Kind::X);
        assert_eq!(lexer.next().unwrap().unwrap().kind, Kind::Eof);
        assert!(lexer.next().is_none());
        // read_token keeps answering with the end-of-input token
        assert_eq!(lexer.read_token().unwrap().kind, Kind::Eof);
    }

    #[test]
    fn test_no_match_at_end_of_input() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::string("abc")), Some(Kind::T1));

        let mut lexer = Lexer::new(&set, Kind::Eof, "ab".chars());
        let err = lexer.read_token().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::no_match("ab".into(), None));
        assert_eq!(err.span.end.line_col(), (1, 3));
        assert!(lexer.is_at_end());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(dfa(&Nfa::singleton('x')), Some(Kind::X));

        let mut lexer = Lexer::new(&set, Kind::Eof, "x?x".chars());
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());

        // read_token still works after skipping the bad character
        assert_eq!(lexer.skip_char(), Some('?'));
        assert_eq!(lexer.read_token().unwrap().kind, Kind::X);
    }
}
