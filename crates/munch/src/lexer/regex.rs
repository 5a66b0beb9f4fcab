//! Parser for the pattern syntax accepted by [`Pattern::Regex`].
//!
//! ```text
//! alternation := sequence ('|' sequence)*
//! sequence    := repetition+
//! repetition  := atom ('*' | '+' | '?' | '{' n '}' | '{' n ',' '}' | '{' n ',' m '}')*
//! atom        := '(' alternation ')' | '[' '^'? class ']' | '.' | '\' escape | char
//! ```
//!
//! Escapes: `\n \t \r` for control characters, `\d \w \s` for the digit,
//! word and whitespace classes, and a backslash before any metacharacter
//! for the character itself. `.` is any ASCII character except newline.

use super::builder::{CharSet, Pattern};
use crate::error::{PatternError, PatternErrorKind, PatternResult};

/// Upper bound for `{n}`/`{n,m}` counts; every repetition is unrolled into
/// copies of its operand.
pub const MAX_REPEAT: usize = 1000;

const METACHARACTERS: &[char] = &[
    '\\', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|', '^', '-', '/', '"',
];

/// Parse `source` into a [`Pattern`] tree.
///
/// # Errors
///
/// Returns a [`PatternError`] pointing at the character position of the
/// first syntax problem.
///
/// # Example
///
/// ```rust
/// use munch::lexer::regex;
///
/// let pattern = regex::parse("[a-z_][a-z0-9_]*").unwrap();
/// let dfa = pattern.compile(true).unwrap();
/// assert!(dfa.accepts("snake_case2"));
/// assert!(!dfa.accepts("2fast"));
///
/// assert!(regex::parse("(ab").is_err());
/// ```
pub fn parse(source: &str) -> PatternResult<Pattern> {
    let mut parser = Parser {
        source,
        chars: source.chars().collect(),
        pos: 0,
    };
    if parser.chars.is_empty() {
        return Err(parser.error(PatternErrorKind::Empty));
    }
    let pattern = parser.alternation()?;
    match parser.peek() {
        None => Ok(pattern),
        Some(')') => Err(parser.error(PatternErrorKind::UnbalancedParen)),
        Some(c) => Err(parser.error(PatternErrorKind::UnexpectedChar { char: c })),
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, kind: PatternErrorKind) -> PatternError {
        self.error_at(self.pos, kind)
    }

    fn error_at(&self, position: usize, kind: PatternErrorKind) -> PatternError {
        PatternError::new(self.source, position, kind)
    }

    fn alternation(&mut self) -> PatternResult<Pattern> {
        let mut branches = vec![self.sequence()?];
        while self.eat('|') {
            branches.push(self.sequence()?);
        }
        Ok(if branches.len() == 1 {
            branches.remove(0)
        } else {
            Pattern::Alt(branches)
        })
    }

    fn sequence(&mut self) -> PatternResult<Pattern> {
        let mut items: Vec<Pattern> = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let item = self.repetition()?;
            // Merge runs of plain characters into one literal
            if let Pattern::Literal(next) = &item {
                if let Some(Pattern::Literal(prev)) = items.last_mut() {
                    prev.push_str(next);
                    continue;
                }
            }
            items.push(item);
        }
        match items.len() {
            0 => Err(self.error(PatternErrorKind::Empty)),
            1 => Ok(items.remove(0)),
            _ => Ok(Pattern::Seq(items)),
        }
    }

    fn repetition(&mut self) -> PatternResult<Pattern> {
        let mut pattern = self.atom()?;
        loop {
            let (min, max) = match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    (0, None)
                }
                Some('+') => {
                    self.pos += 1;
                    (1, None)
                }
                Some('?') => {
                    self.pos += 1;
                    (0, Some(1))
                }
                Some('{') => self.counts()?,
                _ => return Ok(pattern),
            };
            pattern = Pattern::Repeat {
                pattern: Box::new(pattern),
                min,
                max,
            };
        }
    }

    /// `{n}`, `{n,}` or `{n,m}`, with the cursor on the opening brace
    fn counts(&mut self) -> PatternResult<(usize, Option<usize>)> {
        let open = self.pos;
        self.pos += 1;
        let min = self
            .number()?
            .ok_or_else(|| self.error(PatternErrorKind::invalid_repetition("expected a count")))?;
        let max = if self.eat(',') {
            self.number()?
        } else {
            Some(min)
        };
        if !self.eat('}') {
            return Err(self.error(PatternErrorKind::invalid_repetition("expected '}'")));
        }
        if let Some(max) = max {
            if max < min {
                return Err(self.error_at(
                    open,
                    PatternErrorKind::invalid_repetition(format!("{{{min},{max}}} is empty")),
                ));
            }
        }
        Ok((min, max))
    }

    fn number(&mut self) -> PatternResult<Option<usize>> {
        let start = self.pos;
        let mut value: usize = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            value = value.saturating_mul(10).saturating_add(digit as usize);
            if value > MAX_REPEAT {
                return Err(self.error_at(
                    start,
                    PatternErrorKind::invalid_repetition(format!(
                        "count exceeds {MAX_REPEAT}"
                    )),
                ));
            }
        }
        Ok((self.pos > start).then_some(value))
    }

    fn atom(&mut self) -> PatternResult<Pattern> {
        let position = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.error(PatternErrorKind::Empty));
        };
        match c {
            '(' => {
                let inner = self.alternation()?;
                if self.eat(')') {
                    Ok(inner)
                } else {
                    Err(self.error_at(position, PatternErrorKind::UnbalancedParen))
                }
            }
            '[' => self.class(position),
            '.' => Ok(Pattern::CharClass(CharSet::single('\n').negated())),
            '\\' => Ok(match self.escape()? {
                Escaped::Char(c) => Pattern::Literal(c.to_string().into()),
                Escaped::Class(set) => Pattern::CharClass(set),
            }),
            '*' | '+' | '?' | '{' => Err(self.error_at(
                position,
                PatternErrorKind::NothingToRepeat { op: c },
            )),
            c => Ok(Pattern::Literal(c.to_string().into())),
        }
    }

    /// Body of a bracket class, with the cursor after `[`
    fn class(&mut self, open: usize) -> PatternResult<Pattern> {
        let negated = self.eat('^');
        let mut set = CharSet::new(Vec::new());
        let mut first = true;
        loop {
            let position = self.pos;
            let lo = match self.bump() {
                None => return Err(self.error_at(open, PatternErrorKind::UnclosedClass)),
                Some(']') if !first => break,
                Some(']') => return Err(self.error_at(position, PatternErrorKind::EmptyClass)),
                Some('\\') => match self.escape()? {
                    Escaped::Char(c) => c,
                    Escaped::Class(class) => {
                        set = set.union(&class);
                        first = false;
                        continue;
                    }
                },
                Some(c) => c,
            };
            first = false;

            let is_range = self.peek() == Some('-')
                && self.chars.get(self.pos + 1).is_some_and(|&next| next != ']');
            if !is_range {
                set = set.union(&CharSet::single(lo));
                continue;
            }
            self.pos += 1;
            let hi = match self.bump() {
                Some('\\') => match self.escape()? {
                    Escaped::Char(c) => c,
                    Escaped::Class(_) => {
                        return Err(self.error_at(
                            position,
                            PatternErrorKind::UnexpectedChar { char: '\\' },
                        ));
                    }
                },
                Some(c) => c,
                None => return Err(self.error_at(open, PatternErrorKind::UnclosedClass)),
            };
            if hi < lo {
                return Err(self.error_at(position, PatternErrorKind::InvalidRange { lo, hi }));
            }
            set = set.union(&CharSet::range(lo, hi));
        }
        Ok(Pattern::CharClass(if negated { set.negated() } else { set }))
    }

    /// Escape sequence, with the cursor after the backslash
    fn escape(&mut self) -> PatternResult<Escaped> {
        let position = self.pos.saturating_sub(1);
        let Some(c) = self.bump() else {
            return Err(self.error_at(position, PatternErrorKind::TrailingBackslash));
        };
        Ok(match c {
            'n' => Escaped::Char('\n'),
            't' => Escaped::Char('\t'),
            'r' => Escaped::Char('\r'),
            'd' => Escaped::Class(CharSet::digits()),
            'w' => Escaped::Class(CharSet::alphanumeric().union(&CharSet::single('_'))),
            's' => Escaped::Class(CharSet::whitespace()),
            c if METACHARACTERS.contains(&c) => Escaped::Char(c),
            escape => {
                return Err(self.error_at(position, PatternErrorKind::InvalidEscape { escape }));
            }
        })
    }
}

enum Escaped {
    Char(char),
    Class(CharSet),
}

/// Render `text` so that [`parse`] reads it back as the literal string.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c if METACHARACTERS.contains(&c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}
