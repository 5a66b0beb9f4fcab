//! Rules files
//!
//! A rules file lists one lexer rule per line, highest priority first:
//!
//! ```text
//! # comments start with '#'
//! LET     "let"
//! IDENT   /[a-z_][a-z0-9_]*/
//! NUMBER  /[0-9]+/
//! -       /\s+/
//! ```
//!
//! A rule is a name followed by either a regex between slashes or a string
//! literal in double quotes. The name `-` discards what the rule matches.

use munch::lexer::{CompiledLexer, LexerBuilder, LexerConfig, Pattern, regex};
use munch::PatternError;
use thiserror::Error;

/// Token kind used by lexers built from a rules file: the rule's index
pub type RuleKind = usize;

/// Kind assigned to the end-of-input token
pub const EOF_KIND: RuleKind = usize::MAX;

/// Errors reading a rules file
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Pattern {
        line: usize,
        #[source]
        source: PatternError,
    },

    #[error("rules file defines no tokens")]
    Empty,

    #[error(transparent)]
    Build(#[from] PatternError),
}

/// A single line of a rules file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Token name, `None` for discard rules
    pub name: Option<String>,
    pub pattern: Pattern,
    /// 1-based line number in the rules file
    pub line: usize,
}

/// Parsed rules, in priority order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse the text of a rules file.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line, or [`RulesError::Empty`] when the
    /// file has no token rules.
    pub fn parse(source: &str) -> Result<Self, RulesError> {
        let mut rules = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            rules.push(parse_rule(text, line)?);
        }
        if rules.iter().all(|r| r.name.is_none()) {
            return Err(RulesError::Empty);
        }
        log::debug!("parsed {} rules", rules.len());
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Display name of a token kind
    #[must_use]
    pub fn name(&self, kind: RuleKind) -> &str {
        if kind == EOF_KIND {
            return "EOF";
        }
        self.rules
            .get(kind)
            .and_then(|r| r.name.as_deref())
            .unwrap_or("?")
    }

    /// Compile the rules into a lexer whose token kinds are rule indices.
    ///
    /// # Errors
    ///
    /// Patterns are checked while parsing, so this only fails if the
    /// builder rejects a rule.
    pub fn build(&self, config: LexerConfig) -> Result<CompiledLexer<RuleKind>, RulesError> {
        let mut builder = LexerBuilder::new().config(config);
        for (index, rule) in self.rules.iter().enumerate() {
            builder = match rule.name {
                Some(_) => builder.token(index, rule.pattern.clone()),
                None => builder.ignore(rule.pattern.clone()),
            };
        }
        Ok(builder.build(EOF_KIND)?)
    }
}

fn parse_rule(text: &str, line: usize) -> Result<Rule, RulesError> {
    let syntax = |message: &str| RulesError::Syntax {
        line,
        message: message.to_string(),
    };

    let (name, body) = text
        .split_once(char::is_whitespace)
        .ok_or_else(|| syntax("expected a name followed by a pattern"))?;
    let body = body.trim();

    let name = match name {
        "-" => None,
        _ if is_identifier(name) => Some(name.to_string()),
        _ => return Err(syntax(&format!("invalid rule name {name:?}"))),
    };

    let pattern = if let Some(inner) = delimited(body, '/') {
        regex::parse(inner).map_err(|source| RulesError::Pattern { line, source })?
    } else if let Some(inner) = delimited(body, '"') {
        Pattern::literal(unescape_literal(inner).map_err(|m| syntax(&m))?)
    } else {
        return Err(syntax("pattern must be /regex/ or \"literal\""));
    };

    Ok(Rule {
        name,
        pattern,
        line,
    })
}

fn delimited(body: &str, delimiter: char) -> Option<&str> {
    body.strip_prefix(delimiter)?.strip_suffix(delimiter)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unescape_literal(inner: &str) -> Result<String, String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(c @ ('\\' | '"')) => out.push(c),
            Some(c) => return Err(format!("unknown escape \\{c} in literal")),
            None => return Err("literal ends with a backslash".to_string()),
        }
    }
    if out.is_empty() {
        return Err("empty literal".to_string());
    }
    Ok(out)
}
