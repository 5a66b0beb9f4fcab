//! Nondeterministic automata and the regex algebra.
//!
//! An [`Nfa`] is a set of start states, a set of accept states and a
//! transition relation `(state, char) -> {states}`. There are no epsilon
//! transitions. Concatenation and Kleene star are built by replicating the
//! outgoing edges of the second operand's start states onto the accept states
//! of the first, which keeps the relation epsilon-free at the cost of extra
//! edges:
//!
//! ```text
//!   a:  s0 -x-> f0            b:  s1 -y-> f1
//!
//!   concatenate(a, b):  s0 -x-> f0 -y-> f1     (f0 -y-> f1 copies s1 -y-> f1)
//! ```
//!
//! All operations are pure: operands are copied into a fresh state arena and
//! never modified.

use super::StateId;
use std::collections::{BTreeMap, BTreeSet};

/// NFA state with its outgoing transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaState {
    /// Labeled transitions: character -> target states
    pub transitions: BTreeMap<char, BTreeSet<StateId>>,
}

/// A nondeterministic finite automaton over `char`.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    states: Vec<NfaState>,
    starts: BTreeSet<StateId>,
    accepts: BTreeSet<StateId>,
}

impl Nfa {
    /// The automaton that accepts no string at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The automaton that accepts only the empty string: one state that is
    /// both start and accept.
    #[must_use]
    pub fn empty_string() -> Self {
        let mut nfa = Self::default();
        let s = nfa.add_state();
        nfa.starts.insert(s);
        nfa.accepts.insert(s);
        nfa
    }

    /// The automaton that accepts exactly the one-character string `c`.
    #[must_use]
    pub fn singleton(c: char) -> Self {
        Self::charset([c])
    }

    /// Union of one singleton per character: accepts every one-character
    /// string whose character is in `chars`.
    ///
    /// Built directly as two states joined by one edge per character, which
    /// accepts the same language as folding [`Nfa::union`] over singletons.
    #[must_use]
    pub fn charset(chars: impl IntoIterator<Item = char>) -> Self {
        let mut nfa = Self::default();
        let start = nfa.add_state();
        let accept = nfa.add_state();
        for c in chars {
            nfa.add_transition(start, c, accept);
        }
        nfa.starts.insert(start);
        nfa.accepts.insert(accept);
        nfa
    }

    /// Every one-character string in the inclusive range `lo..=hi`.
    #[must_use]
    pub fn range(lo: char, hi: char) -> Self {
        Self::charset(lo..=hi)
    }

    /// Concatenation of one singleton per character of `s`, left to right.
    ///
    /// The empty string yields [`Nfa::empty_string`].
    #[must_use]
    pub fn string(s: &str) -> Self {
        let mut nfa = Self::default();
        let start = nfa.add_state();
        let mut current = start;
        for c in s.chars() {
            let next = nfa.add_state();
            nfa.add_transition(current, c, next);
            current = next;
        }
        nfa.starts.insert(start);
        nfa.accepts.insert(current);
        nfa
    }

    /// Accepts `L(a) ∪ L(b)`.
    ///
    /// Both operands are copied into one fresh state space; start sets,
    /// accept sets and transitions are unioned.
    #[must_use]
    pub fn union(a: &Self, b: &Self) -> Self {
        let mut nfa = Self::default();
        let oa = nfa.embed(a);
        let ob = nfa.embed(b);
        nfa.starts.extend(a.starts.iter().map(|s| s.offset(oa)));
        nfa.starts.extend(b.starts.iter().map(|s| s.offset(ob)));
        nfa.accepts.extend(a.accepts.iter().map(|s| s.offset(oa)));
        nfa.accepts.extend(b.accepts.iter().map(|s| s.offset(ob)));
        nfa
    }

    /// Accepts `L(a)·L(b)`.
    ///
    /// Every accept state of `a` receives a copy of every outgoing edge of
    /// every start state of `b`. If `a` accepts the empty string, `b`'s start
    /// states are also start states of the result; if `b` accepts the empty
    /// string, `a`'s accept states are also accept states of the result.
    #[must_use]
    pub fn concatenate(a: &Self, b: &Self) -> Self {
        let mut nfa = Self::default();
        let oa = nfa.embed(a);
        let ob = nfa.embed(b);

        let bridge = b.start_edges(ob);
        for &f in &a.accepts {
            for &(c, target) in &bridge {
                nfa.add_transition(f.offset(oa), c, target);
            }
        }

        nfa.starts.extend(a.starts.iter().map(|s| s.offset(oa)));
        if a.accepts_empty() {
            nfa.starts.extend(b.starts.iter().map(|s| s.offset(ob)));
        }
        nfa.accepts.extend(b.accepts.iter().map(|s| s.offset(ob)));
        if b.accepts_empty() {
            nfa.accepts.extend(a.accepts.iter().map(|s| s.offset(oa)));
        }
        nfa
    }

    /// Accepts `L(a)*`.
    ///
    /// A fresh start state accepts the empty word (zero repetitions) and
    /// carries a copy of the outgoing edges of `a`'s start states. Every
    /// accept state of `a` receives the same copies so a match can loop back.
    /// The fresh state has no incoming edges, so accepting it never accepts
    /// a string that merely passes back through one of `a`'s start states.
    #[must_use]
    pub fn kleene(a: &Self) -> Self {
        let mut nfa = Self::default();
        let entry = nfa.add_state();
        let offset = nfa.embed(a);

        let bridge = a.start_edges(offset);
        for &(c, target) in &bridge {
            nfa.add_transition(entry, c, target);
        }
        for &f in &a.accepts {
            for &(c, target) in &bridge {
                nfa.add_transition(f.offset(offset), c, target);
            }
        }

        nfa.starts.insert(entry);
        nfa.accepts.insert(entry);
        nfa.accepts.extend(a.accepts.iter().map(|s| s.offset(offset)));
        nfa
    }

    /// Accepts `L(a)+`, i.e. `concatenate(a, kleene(a))`.
    #[must_use]
    pub fn plus(a: &Self) -> Self {
        Self::concatenate(a, &Self::kleene(a))
    }

    /// Accepts `L(a) ∪ {ε}`.
    #[must_use]
    pub fn optional(a: &Self) -> Self {
        Self::union(a, &Self::empty_string())
    }

    /// True iff some start state is also an accept state.
    #[must_use]
    pub fn accepts_empty(&self) -> bool {
        self.starts.iter().any(|s| self.accepts.contains(s))
    }

    /// True iff any state of `states` is an accept state.
    #[must_use]
    pub fn acceptable(&self, states: &BTreeSet<StateId>) -> bool {
        states.iter().any(|s| self.accepts.contains(s))
    }

    /// Union over `states` of their `c`-transitions.
    #[must_use]
    pub fn next(&self, states: &BTreeSet<StateId>, c: char) -> BTreeSet<StateId> {
        let mut targets = BTreeSet::new();
        for s in states {
            if let Some(ts) = self.states[s.index()].transitions.get(&c) {
                targets.extend(ts.iter().copied());
            }
        }
        targets
    }

    /// All moves out of `states`, grouped by character. Characters with no
    /// move are absent from the map.
    #[must_use]
    pub fn next_all(&self, states: &BTreeSet<StateId>) -> BTreeMap<char, BTreeSet<StateId>> {
        let mut moves: BTreeMap<char, BTreeSet<StateId>> = BTreeMap::new();
        for s in states {
            for (c, ts) in &self.states[s.index()].transitions {
                moves.entry(*c).or_default().extend(ts.iter().copied());
            }
        }
        moves
    }

    /// Run the automaton on `input` and report whether it ends in an accept
    /// state.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.starts.clone();
        for c in input.chars() {
            if current.is_empty() {
                return false;
            }
            current = self.next(&current, c);
        }
        self.acceptable(&current)
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// All states, indexed by [`StateId::index`]
    #[must_use]
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    #[must_use]
    pub const fn starts(&self) -> &BTreeSet<StateId> {
        &self.starts
    }

    #[must_use]
    pub const fn accepts_set(&self) -> &BTreeSet<StateId> {
        &self.accepts
    }

    #[must_use]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepts.contains(&state)
    }

    /// Outgoing transitions of `state`
    #[must_use]
    pub fn transitions_from(&self, state: StateId) -> &BTreeMap<char, BTreeSet<StateId>> {
        &self.states[state.index()].transitions
    }

    /// Number of `(state, char, target)` edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.states
            .iter()
            .flat_map(|s| s.transitions.values())
            .map(BTreeSet::len)
            .sum()
    }

    /// Every character that labels at least one transition
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.keys().copied())
            .collect()
    }

    pub(crate) fn add_state(&mut self) -> StateId {
        let id = StateId::from_index(self.states.len());
        self.states.push(NfaState::default());
        id
    }

    pub(crate) fn add_transition(&mut self, from: StateId, c: char, to: StateId) {
        self.states[from.index()]
            .transitions
            .entry(c)
            .or_default()
            .insert(to);
    }

    pub(crate) fn set_start(&mut self, state: StateId) {
        self.starts.insert(state);
    }

    pub(crate) fn set_accepting(&mut self, state: StateId) {
        self.accepts.insert(state);
    }

    /// Copy `other`'s states into this arena and return the offset that maps
    /// each of `other`'s state ids to its copy.
    fn embed(&mut self, other: &Self) -> u32 {
        let offset = u32::try_from(self.states.len()).unwrap_or(u32::MAX);
        self.states.extend(other.states.iter().map(|state| NfaState {
            transitions: state
                .transitions
                .iter()
                .map(|(c, targets)| (*c, targets.iter().map(|t| t.offset(offset)).collect()))
                .collect(),
        }));
        offset
    }

    /// Outgoing edges of all start states, shifted by `offset`.
    fn start_edges(&self, offset: u32) -> Vec<(char, StateId)> {
        let mut edges = Vec::new();
        for s in &self.starts {
            for (c, targets) in &self.states[s.index()].transitions {
                edges.extend(targets.iter().map(|t| (*c, t.offset(offset))));
            }
        }
        edges
    }
}
