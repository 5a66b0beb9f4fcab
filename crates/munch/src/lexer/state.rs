//! Simultaneous simulation of every automaton in a set.
//!
//! An [`AutomatonSetState`] lives for exactly one token attempt. It starts
//! with every automaton at its start state and is fed one character at a
//! time. Before each character after the first it records the best decision
//! for the text consumed so far, so when the last automaton dies the recorded
//! decision covers exactly the characters already in the buffer and nothing
//! has to be given back.
//!
//! The decision policy: among the automata currently sitting in an accepting
//! state, the one registered first wins.

use super::set::AutomatonSet;
use crate::automata::StateId;
use crate::syntax::TokenKind;
use compact_str::CompactString;
use log::trace;
use smallvec::SmallVec;

/// What a finished token attempt decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice<K> {
    /// Emit a token of this kind
    Match(K),
    /// A discard pattern won; skip the text
    Ignore,
}

/// Live state of all automata of a set during one token attempt.
#[derive(Debug, Clone)]
pub struct AutomatonSetState<'a, K: TokenKind> {
    set: &'a AutomatonSet<K>,
    /// `(priority, current state)` of every automaton still alive, in
    /// priority order
    live: SmallVec<[(usize, StateId); 8]>,
    text: CompactString,
    choice: Option<Choice<K>>,
    processed_any: bool,
}

impl<'a, K: TokenKind> AutomatonSetState<'a, K> {
    /// Every automaton of `set` at its start state, with an empty buffer
    #[must_use]
    pub fn new(set: &'a AutomatonSet<K>) -> Self {
        Self {
            set,
            live: set
                .entries()
                .iter()
                .enumerate()
                .map(|(priority, entry)| (priority, entry.dfa.start()))
                .collect(),
            text: CompactString::default(),
            choice: None,
            processed_any: false,
        }
    }

    /// Feed one character.
    ///
    /// From the second character on, the decision for the current prefix is
    /// snapshotted before `c` is applied. Automata without a move on `c` die
    /// and never come back. `c` joins the buffer only if some automaton
    /// survived it.
    pub fn advance(&mut self, c: char) {
        if self.processed_any {
            self.choose();
        }

        let set = self.set;
        self.live.retain(|(priority, state)| {
            match set.entries()[*priority].dfa.next(*state, c) {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            }
        });

        if !self.live.is_empty() {
            self.text.push(c);
        }
        self.processed_any = true;
        trace!("advance {c:?}: {} automata alive", self.live.len());
    }

    /// Record the decision for the current prefix: the first live automaton
    /// in priority order that sits in an accepting state, or no decision if
    /// none does.
    pub fn choose(&mut self) {
        let set = self.set;
        self.choice = self
            .live
            .iter()
            .find(|&&(priority, state)| set.entries()[priority].dfa.is_accepting(state))
            .map(|&(priority, _)| match set.entries()[priority].tag {
                Some(kind) => Choice::Match(kind),
                None => Choice::Ignore,
            });
    }

    /// True iff no automaton is alive
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.live.is_empty()
    }

    /// The last recorded decision
    #[must_use]
    pub const fn choice(&self) -> Option<Choice<K>> {
        self.choice
    }

    /// Characters accepted into the buffer so far
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> CompactString {
        self.text
    }

    /// Number of automata still alive
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::{Dfa, Nfa};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Ab,
        A,
        Num,
    }

    fn literal(s: &str) -> Dfa {
        Dfa::from_nfa(&Nfa::string(s)).minimize()
    }

    fn ab_a_set() -> AutomatonSet<Kind> {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(literal("ab"), Some(Kind::Ab));
        set.add_automaton_tag(literal("a"), Some(Kind::A));
        set
    }

    #[test]
    fn test_fresh_state() {
        let set = ab_a_set();
        let state = AutomatonSetState::new(&set);
        assert_eq!(state.live_count(), 2);
        assert!(!state.is_dead());
        assert_eq!(state.choice(), None);
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_choose_is_snapshotted_before_advance() {
        let set = ab_a_set();
        let mut state = AutomatonSetState::new(&set);

        state.advance('a');
        // No snapshot for the first character
        assert_eq!(state.choice(), None);

        state.advance('c');
        assert!(state.is_dead());
        // The snapshot covers "a", which is what the buffer holds
        assert_eq!(state.choice(), Some(Choice::Match(Kind::A)));
        assert_eq!(state.text(), "a");
    }

    #[test]
    fn test_longest_then_priority() {
        let set = ab_a_set();
        let mut state = AutomatonSetState::new(&set);
        state.advance('a');
        state.advance('b');
        assert_eq!(state.live_count(), 1);
        state.choose();
        assert_eq!(state.choice(), Some(Choice::Match(Kind::Ab)));
        assert_eq!(state.into_text(), "ab");
    }

    #[test]
    fn test_priority_breaks_ties() {
        let mut set = AutomatonSet::new();
        set.add_automaton_tag(literal("1"), Some(Kind::Num));
        set.add_automaton_tag(literal("1"), Some(Kind::A));
        let mut state = AutomatonSetState::new(&set);
        state.advance('1');
        state.choose();
        assert_eq!(state.choice(), Some(Choice::Match(Kind::Num)));
    }

    #[test]
    fn test_ignore_choice() {
        let mut set = AutomatonSet::<Kind>::new();
        set.add_automaton_tag(literal(" "), None);
        let mut state = AutomatonSetState::new(&set);
        state.advance(' ');
        state.choose();
        assert_eq!(state.choice(), Some(Choice::Ignore));
    }

    #[test]
    fn test_choose_tracks_current_prefix() {
        let set = ab_a_set();
        let mut state = AutomatonSetState::new(&set);
        state.advance('a');
        state.choose();
        assert_eq!(state.choice(), Some(Choice::Match(Kind::A)));
        state.advance('b');
        state.advance('b');
        // Snapshot at "ab" happened, then everything died on the second 'b'
        assert_eq!(state.choice(), Some(Choice::Match(Kind::Ab)));

        let mut fresh = AutomatonSetState::new(&set);
        fresh.choose();
        assert_eq!(fresh.choice(), None);
    }

    #[test]
    fn test_dead_on_first_character() {
        let set = ab_a_set();
        let mut state = AutomatonSetState::new(&set);
        state.advance('z');
        assert!(state.is_dead());
        assert_eq!(state.text(), "");
        assert_eq!(state.choice(), None);
    }
}
