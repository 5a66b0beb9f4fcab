use super::config::LexerConfig;
use super::driver::Lexer;
use super::regex;
use super::set::AutomatonSet;
use super::token::Token;
use crate::automata::{Dfa, Nfa};
use crate::error::{LexerError, PatternError, PatternErrorKind, PatternResult};
use crate::syntax::TokenKind;
use compact_str::CompactString;
use log::debug;
use smallvec::SmallVec;
use std::fmt;

/// Builder that compiles patterns into a [`CompiledLexer`].
///
/// Every `token`, `keyword` and `ignore` call registers one pattern. The
/// registration order is the priority order: when two patterns match the same
/// longest prefix, the one registered first wins. Register keywords before a
/// general identifier pattern so that they win the tie.
pub struct LexerBuilder<K: TokenKind> {
    rules: SmallVec<[LexRule<K>; 16]>,
    config: LexerConfig,
}

/// One registered pattern
#[derive(Debug, Clone)]
pub struct LexRule<K: TokenKind> {
    pub pattern: Pattern,
    /// `None` for discard patterns
    pub tag: Option<K>,
    pub priority: u32,
}

/// A token pattern.
///
/// Patterns are a small regular-expression tree. [`Pattern::Regex`] holds
/// source text in the syntax described in [`regex`](super::regex) and is
/// parsed when the pattern is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Literal(CompactString),
    CharClass(CharSet),
    Seq(Vec<Pattern>),
    Alt(Vec<Pattern>),
    Repeat {
        pattern: Box<Pattern>,
        min: usize,
        max: Option<usize>,
    },
    Regex(CompactString),
    /// Strings matched by both patterns
    Intersect(Box<Pattern>, Box<Pattern>),
    /// Strings matched by the first pattern but not the second
    Subtract(Box<Pattern>, Box<Pattern>),
}

impl Pattern {
    #[must_use]
    pub fn literal(text: impl Into<CompactString>) -> Self {
        Self::Literal(text.into())
    }

    #[must_use]
    pub fn regex(source: impl Into<CompactString>) -> Self {
        Self::Regex(source.into())
    }

    #[must_use]
    pub fn zero_or_more(pattern: Self) -> Self {
        Self::Repeat {
            pattern: Box::new(pattern),
            min: 0,
            max: None,
        }
    }

    #[must_use]
    pub fn one_or_more(pattern: Self) -> Self {
        Self::Repeat {
            pattern: Box::new(pattern),
            min: 1,
            max: None,
        }
    }

    #[must_use]
    pub fn optional(pattern: Self) -> Self {
        Self::Repeat {
            pattern: Box::new(pattern),
            min: 0,
            max: Some(1),
        }
    }

    #[must_use]
    pub fn intersect(a: Self, b: Self) -> Self {
        Self::Intersect(Box::new(a), Box::new(b))
    }

    #[must_use]
    pub fn subtract(a: Self, b: Self) -> Self {
        Self::Subtract(Box::new(a), Box::new(b))
    }

    /// Build the NFA for this pattern with the automaton algebra.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if a regex is malformed, a repetition has
    /// `max < min`, or nested repetitions unroll into more than
    /// [`regex::MAX_REPEAT`] copies of their operand.
    pub fn to_nfa(&self) -> PatternResult<Nfa> {
        self.build_nfa(1)
    }

    /// `copies` is the product of the counts of every enclosing repetition.
    fn build_nfa(&self, copies: usize) -> PatternResult<Nfa> {
        Ok(match self {
            Self::Literal(text) => Nfa::string(text),
            Self::CharClass(set) => Nfa::charset(set.chars()),
            Self::Seq(items) => {
                let mut nfa = Nfa::empty_string();
                for item in items {
                    nfa = Nfa::concatenate(&nfa, &item.build_nfa(copies)?);
                }
                nfa
            }
            Self::Alt(branches) => {
                let mut nfa = Nfa::empty();
                for branch in branches {
                    nfa = Nfa::union(&nfa, &branch.build_nfa(copies)?);
                }
                nfa
            }
            Self::Repeat { pattern, min, max } => {
                if max.is_some_and(|max| max < *min) {
                    return Err(PatternError::new(
                        self.to_string(),
                        0,
                        PatternErrorKind::invalid_repetition(format!(
                            "maximum {} is below minimum {min}",
                            max.unwrap_or_default()
                        )),
                    ));
                }
                let copies = copies.saturating_mul(max.unwrap_or(*min).max(1));
                if copies > regex::MAX_REPEAT {
                    return Err(PatternError::new(
                        self.to_string(),
                        0,
                        PatternErrorKind::invalid_repetition(format!(
                            "nested repetition exceeds {} copies",
                            regex::MAX_REPEAT
                        )),
                    ));
                }
                let operand = pattern.build_nfa(copies)?;
                let mut nfa = Nfa::empty_string();
                for _ in 0..*min {
                    nfa = Nfa::concatenate(&nfa, &operand);
                }
                match max {
                    None => nfa = Nfa::concatenate(&nfa, &Nfa::kleene(&operand)),
                    Some(max) => {
                        let optional = Nfa::optional(&operand);
                        for _ in *min..*max {
                            nfa = Nfa::concatenate(&nfa, &optional);
                        }
                    }
                }
                nfa
            }
            Self::Regex(source) => regex::parse(source)?.build_nfa(copies)?,
            Self::Intersect(a, b) => {
                Dfa::intersection(&a.build_dfa(copies)?, &b.build_dfa(copies)?).to_nfa()
            }
            Self::Subtract(a, b) => {
                Dfa::subtraction(&a.build_dfa(copies)?, &b.build_dfa(copies)?).to_nfa()
            }
        })
    }

    /// Compile to a DFA, minimized when `minimize` is set.
    ///
    /// # Errors
    ///
    /// See [`Pattern::to_nfa`].
    pub fn compile(&self, minimize: bool) -> PatternResult<Dfa> {
        let dfa = Dfa::from_nfa(&self.to_nfa()?);
        Ok(if minimize { dfa.minimize() } else { dfa })
    }

    fn build_dfa(&self, copies: usize) -> PatternResult<Dfa> {
        Ok(Dfa::from_nfa(&self.build_nfa(copies)?).minimize())
    }
}

/// Renders the pattern in regex syntax
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{}", regex::escape(text)),
            Self::CharClass(set) => write!(f, "{set}"),
            Self::Seq(items) => items.iter().try_for_each(|item| write!(f, "({item})")),
            Self::Alt(branches) => {
                for (index, branch) in branches.iter().enumerate() {
                    if index > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{branch}")?;
                }
                Ok(())
            }
            Self::Repeat { pattern, min, max } => match (min, max) {
                (0, None) => write!(f, "({pattern})*"),
                (1, None) => write!(f, "({pattern})+"),
                (0, Some(1)) => write!(f, "({pattern})?"),
                (min, None) => write!(f, "({pattern}){{{min},}}"),
                (min, Some(max)) => write!(f, "({pattern}){{{min},{max}}}"),
            },
            Self::Regex(source) => f.write_str(source),
            Self::Intersect(a, b) => write!(f, "({a})&({b})"),
            Self::Subtract(a, b) => write!(f, "({a})-({b})"),
        }
    }
}

/// Upper end of the universe [`CharSet::negated`] complements against
const ASCII_MAX: char = '\u{7f}';

/// A set of characters stored as sorted, non-overlapping inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    /// Character ranges for character class patterns (e.g., `[a-z]`, `[0-9]`).
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Create a character set from ranges. Ranges may overlap or come in any
    /// order; reversed ranges are ignored.
    #[must_use]
    pub fn new(ranges: Vec<(char, char)>) -> Self {
        let mut ranges: Vec<(char, char)> = ranges.into_iter().filter(|(lo, hi)| lo <= hi).collect();
        ranges.sort_unstable();
        let mut merged: Vec<(char, char)> = Vec::with_capacity(ranges.len());
        for (lo, hi) in ranges {
            match merged.last_mut() {
                Some((_, last_hi)) if (lo as u32) <= (*last_hi as u32).saturating_add(1) => {
                    if hi > *last_hi {
                        *last_hi = hi;
                    }
                }
                _ => merged.push((lo, hi)),
            }
        }
        Self { ranges: merged }
    }

    #[must_use]
    pub fn single(c: char) -> Self {
        Self::new(vec![(c, c)])
    }

    #[must_use]
    pub fn range(lo: char, hi: char) -> Self {
        Self::new(vec![(lo, hi)])
    }

    /// Create a character set for digits [0-9]
    #[must_use]
    pub fn digits() -> Self {
        Self::range('0', '9')
    }

    #[must_use]
    pub fn lowercase() -> Self {
        Self::range('a', 'z')
    }

    #[must_use]
    pub fn uppercase() -> Self {
        Self::range('A', 'Z')
    }

    /// ASCII letters
    #[must_use]
    pub fn alphabetic() -> Self {
        Self::new(vec![('a', 'z'), ('A', 'Z')])
    }

    /// ASCII letters and digits
    #[must_use]
    pub fn alphanumeric() -> Self {
        Self::new(vec![('a', 'z'), ('A', 'Z'), ('0', '9')])
    }

    /// Create a character set for whitespace characters
    #[must_use]
    pub fn whitespace() -> Self {
        Self::new(vec![(' ', ' '), ('\t', '\t'), ('\r', '\r'), ('\n', '\n')])
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.ranges.iter().chain(&other.ranges).copied().collect())
    }

    /// Every ASCII character not in this set. Characters above `\u{7f}` are
    /// never part of the result.
    #[must_use]
    pub fn negated(&self) -> Self {
        let mut ranges = Vec::new();
        let mut next = 0u32;
        for &(lo, hi) in &self.ranges {
            if lo > ASCII_MAX {
                break;
            }
            if (lo as u32) > next {
                ranges.push((char_at(next), char_at(lo as u32 - 1)));
            }
            next = hi as u32 + 1;
        }
        if next <= ASCII_MAX as u32 {
            ranges.push((char_at(next), ASCII_MAX));
        }
        Self::new(ranges)
    }

    /// Check if a character matches this character set
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[must_use]
    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    /// Every character of the set in ascending order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.ranges.iter().flat_map(|&(lo, hi)| lo..=hi)
    }
}

/// Only called with values at most `ASCII_MAX`.
fn char_at(value: u32) -> char {
    char::from_u32(value).unwrap_or(ASCII_MAX)
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for &(lo, hi) in &self.ranges {
            write!(f, "{}", regex::escape(&lo.to_string()))?;
            if hi != lo {
                write!(f, "-{}", regex::escape(&hi.to_string()))?;
            }
        }
        f.write_str("]")
    }
}

impl<K: TokenKind> Default for LexerBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> LexerBuilder<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: SmallVec::new(),
            config: LexerConfig::default(),
        }
    }

    fn push(mut self, pattern: Pattern, tag: Option<K>) -> Self {
        self.rules.push(LexRule {
            pattern,
            tag,
            priority: u32::try_from(self.rules.len()).unwrap_or(u32::MAX),
        });
        self
    }

    /// Register a pattern that produces tokens of `kind`
    #[must_use]
    pub fn token(self, kind: K, pattern: Pattern) -> Self {
        self.push(pattern, Some(kind))
    }

    /// Register a fixed word
    #[must_use]
    pub fn keyword(self, text: &str, kind: K) -> Self {
        self.push(Pattern::literal(text), Some(kind))
    }

    /// Register a pattern whose matches are skipped (whitespace, comments)
    #[must_use]
    pub fn ignore(self, pattern: Pattern) -> Self {
        self.push(pattern, None)
    }

    #[must_use]
    pub fn config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    /// Registered rules in priority order
    #[must_use]
    pub fn rules(&self) -> &[LexRule<K>] {
        &self.rules
    }

    /// Compile every pattern and freeze them into a lexer.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] among the registered patterns.
    pub fn build(self, eof_kind: K) -> Result<CompiledLexer<K>, PatternError> {
        let mut automata = AutomatonSet::new();
        for rule in &self.rules {
            let dfa = rule.pattern.compile(self.config.minimize)?;
            if dfa.accepts("") {
                debug!(
                    "rule {} ({:?}) matches the empty string; empty matches are never emitted",
                    rule.priority, rule.tag
                );
            }
            debug!(
                "rule {} ({:?}) {}: {} states",
                rule.priority,
                rule.tag,
                rule.pattern,
                dfa.state_count()
            );
            automata.add_automaton_tag(dfa, rule.tag);
        }
        Ok(CompiledLexer {
            automata,
            eof_kind,
            config: self.config,
        })
    }
}

/// A frozen set of compiled patterns ready to scan input.
#[derive(Debug, Clone)]
pub struct CompiledLexer<K: TokenKind> {
    automata: AutomatonSet<K>,
    eof_kind: K,
    config: LexerConfig,
}

impl<K: TokenKind> CompiledLexer<K> {
    /// Wrap an automaton set that was registered by hand
    #[must_use]
    pub const fn new(automata: AutomatonSet<K>, eof_kind: K, config: LexerConfig) -> Self {
        Self {
            automata,
            eof_kind,
            config,
        }
    }

    /// A driver over `chars`
    pub fn lexer<I: Iterator<Item = char>>(&self, chars: I) -> Lexer<'_, K, I> {
        Lexer::new(&self.automata, self.eof_kind, chars)
    }

    /// Tokenize the whole input. The end-of-input token is the last token.
    ///
    /// With `error_recovery` enabled the offending character of every error
    /// is skipped and scanning continues, until `max_errors` errors have been
    /// collected.
    ///
    /// # Errors
    ///
    /// Returns every collected [`LexerError`] if there was at least one.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token<K>>, Vec<LexerError>> {
        let mut lexer = self.lexer(input.chars());
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            match lexer.read_token() {
                Ok(token) => {
                    let eof = token.kind == self.eof_kind;
                    tokens.push(token);
                    if eof {
                        break;
                    }
                }
                Err(error) => {
                    errors.push(error);
                    if !self.config.error_recovery || errors.len() >= self.config.max_errors {
                        break;
                    }
                    lexer.skip_char();
                }
            }
        }

        if errors.is_empty() {
            Ok(tokens)
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub const fn automata(&self) -> &AutomatonSet<K> {
        &self.automata
    }

    #[must_use]
    pub const fn eof_kind(&self) -> K {
        self.eof_kind
    }

    #[must_use]
    pub const fn config(&self) -> &LexerConfig {
        &self.config
    }
}
