//! The ordered, tagged collection of automata a lexer scans with.

use crate::automata::Dfa;
use crate::syntax::TokenKind;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One registered automaton.
///
/// `tag == None` marks a discard pattern: its matches are skipped instead of
/// being emitted as tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SetEntry<K: TokenKind> {
    pub dfa: Dfa,
    pub tag: Option<K>,
}

/// An append-only list of automata in priority order.
///
/// The priority of an entry is its registration index: entry 0 wins every
/// tie. The set owns its automata, so no automaton can be registered twice.
///
/// ```rust
/// use munch::automata::{Dfa, Nfa};
/// use munch::lexer::AutomatonSet;
///
/// let mut set = AutomatonSet::new();
/// let ws = set.add_automaton_tag(Dfa::from_nfa(&Nfa::singleton(' ')), None);
/// let word = set.add_automaton_tag(Dfa::from_nfa(&Nfa::string("let")), Some("LET"));
///
/// assert_eq!((ws, word), (0, 1));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AutomatonSet<K: TokenKind> {
    entries: Vec<SetEntry<K>>,
}

impl<K: TokenKind> Default for AutomatonSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> AutomatonSet<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `dfa` with `tag` and return its priority (lower wins).
    pub fn add_automaton_tag(&mut self, dfa: Dfa, tag: Option<K>) -> usize {
        self.entries.push(SetEntry { dfa, tag });
        self.entries.len() - 1
    }

    /// Entries in priority order
    #[must_use]
    pub fn entries(&self) -> &[SetEntry<K>] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, priority: usize) -> Option<&SetEntry<K>> {
        self.entries.get(priority)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
