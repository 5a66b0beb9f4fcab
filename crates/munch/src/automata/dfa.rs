//! Deterministic automata.
//!
//! A [`Dfa`] has exactly one start state and a partial transition function:
//! a missing `(state, char)` entry is the implicit dead sink. DFAs are built
//! from an [`Nfa`] by subset construction ([`Dfa::from_nfa`]) and turned back
//! into an NFA by [`Dfa::to_nfa`], which is how union, concatenation and star
//! are offered at the DFA level.

use super::{StateId, equiv, minimize, nfa::Nfa, product};
use hashbrown::HashMap;
use log::trace;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Key identifying one reachable subset of NFA states during subset
/// construction. Always sorted, so equal sets produce equal keys.
type Subset = SmallVec<[StateId; 8]>;

/// DFA state with its outgoing transitions and acceptance flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DfaState {
    /// Transitions: character -> target state
    pub transitions: BTreeMap<char, StateId>,
    pub accepting: bool,
}

/// A deterministic finite automaton over `char`.
///
/// Equality (`==`) is structural equality up to renaming of states: two DFAs
/// are equal when a bisimulation from their start states pairs every
/// reachable state with exactly one state of the other automaton. Unreachable
/// states never take part in the comparison.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Dfa {
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: StateId,
}

impl Default for Dfa {
    fn default() -> Self {
        Self::empty()
    }
}

impl Dfa {
    /// The automaton that accepts no string: a single non-accepting start
    /// state without transitions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            states: vec![DfaState::default()],
            start: StateId(0),
        }
    }

    /// The automaton that accepts only the empty string
    #[must_use]
    pub fn empty_string() -> Self {
        Self {
            states: vec![DfaState {
                transitions: BTreeMap::new(),
                accepting: true,
            }],
            start: StateId(0),
        }
    }

    /// Determinize `nfa` by subset construction.
    ///
    /// Only subsets reachable from the NFA's start set are explored. Each
    /// distinct subset maps to exactly one DFA state; the lookup is keyed by
    /// the sorted set of NFA states, never by individual states.
    #[must_use]
    pub fn from_nfa(nfa: &Nfa) -> Self {
        let mut dfa = Self {
            states: Vec::new(),
            start: StateId(0),
        };
        let mut subset_map: HashMap<Subset, StateId> = HashMap::new();
        let mut worklist: Vec<(Subset, StateId)> = Vec::new();

        let start_subset: Subset = nfa.starts().iter().copied().collect();
        let start = dfa.add_state(nfa.acceptable(nfa.starts()));
        dfa.start = start;
        subset_map.insert(start_subset.clone(), start);
        worklist.push((start_subset, start));

        while let Some((subset, id)) = worklist.pop() {
            let members: BTreeSet<StateId> = subset.iter().copied().collect();
            for (c, targets) in nfa.next_all(&members) {
                let key: Subset = targets.iter().copied().collect();
                let target = match subset_map.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = dfa.add_state(nfa.acceptable(&targets));
                        trace!("subset {key:?} -> {fresh}");
                        subset_map.insert(key.clone(), fresh);
                        worklist.push((key, fresh));
                        fresh
                    }
                };
                dfa.add_transition(id, c, target);
            }
        }

        trace!(
            "determinized {} NFA states into {} DFA states",
            nfa.state_count(),
            dfa.state_count()
        );
        dfa
    }

    /// Embed this DFA into an NFA with one state per DFA state.
    #[must_use]
    pub fn to_nfa(&self) -> Nfa {
        let mut nfa = Nfa::empty();
        for _ in &self.states {
            nfa.add_state();
        }
        for (index, state) in self.states.iter().enumerate() {
            let id = StateId::from_index(index);
            for (&c, &target) in &state.transitions {
                nfa.add_transition(id, c, target);
            }
            if state.accepting {
                nfa.set_accepting(id);
            }
        }
        nfa.set_start(self.start);
        nfa
    }

    /// Accepts `L(a) ∪ L(b)`
    #[must_use]
    pub fn union(a: &Self, b: &Self) -> Self {
        Self::from_nfa(&Nfa::union(&a.to_nfa(), &b.to_nfa()))
    }

    /// Accepts `L(a)·L(b)`
    #[must_use]
    pub fn concatenate(a: &Self, b: &Self) -> Self {
        Self::from_nfa(&Nfa::concatenate(&a.to_nfa(), &b.to_nfa()))
    }

    /// Accepts `L(a)*`
    #[must_use]
    pub fn kleene(a: &Self) -> Self {
        Self::from_nfa(&Nfa::kleene(&a.to_nfa()))
    }

    /// Accepts `L(a) ∩ L(b)`. See [`product`](super::product).
    #[must_use]
    pub fn intersection(a: &Self, b: &Self) -> Self {
        product::cartesian(a, b, true)
    }

    /// Accepts `L(a) \ L(b)`. See [`product`](super::product).
    #[must_use]
    pub fn subtraction(a: &Self, b: &Self) -> Self {
        product::cartesian(a, b, false)
    }

    /// The minimal DFA for the same language. See
    /// [`minimize`](super::minimize).
    #[must_use]
    pub fn minimize(&self) -> Self {
        minimize::minimize(self)
    }

    /// Run the automaton on `input`
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start;
        for c in input.chars() {
            match self.next(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// The `c`-successor of `state`, or `None` for the dead sink
    #[inline]
    #[must_use]
    pub fn next(&self, state: StateId, c: char) -> Option<StateId> {
        self.states[state.index()].transitions.get(&c).copied()
    }

    #[inline]
    #[must_use]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states[state.index()].accepting
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Every character that labels at least one transition
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.keys().copied())
            .collect()
    }

    /// True iff no accepting state is reachable from the start state
    #[must_use]
    pub fn is_empty_language(&self) -> bool {
        let reachable = self.reachable();
        !self
            .states
            .iter()
            .zip(&reachable)
            .any(|(state, &seen)| seen && state.accepting)
    }

    /// Reachability from the start state, indexed by state
    pub(crate) fn reachable(&self) -> Vec<bool> {
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::from([self.start]);
        seen[self.start.index()] = true;
        while let Some(state) = queue.pop_front() {
            for &target in self.states[state.index()].transitions.values() {
                if !seen[target.index()] {
                    seen[target.index()] = true;
                    queue.push_back(target);
                }
            }
        }
        seen
    }

    pub(crate) fn add_state(&mut self, accepting: bool) -> StateId {
        let id = StateId::from_index(self.states.len());
        self.states.push(DfaState {
            transitions: BTreeMap::new(),
            accepting,
        });
        id
    }

    pub(crate) fn add_transition(&mut self, from: StateId, c: char, to: StateId) {
        self.states[from.index()].transitions.insert(c, to);
    }
}

impl PartialEq for Dfa {
    fn eq(&self, other: &Self) -> bool {
        equiv::is_isomorphic(self, other)
    }
}

impl Eq for Dfa {}

impl From<&Nfa> for Dfa {
    fn from(nfa: &Nfa) -> Self {
        Self::from_nfa(nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_empty_string() {
        let empty = Dfa::empty();
        assert!(!empty.accepts(""));
        assert!(empty.is_empty_language());

        let eps = Dfa::empty_string();
        assert!(eps.accepts(""));
        assert!(!eps.accepts("a"));
        assert!(!eps.is_empty_language());
    }

    #[test]
    fn test_determinize_empty_nfa() {
        let dfa = Dfa::from_nfa(&Nfa::empty());
        assert_eq!(dfa.state_count(), 1);
        assert!(!dfa.accepts(""));
        assert!(dfa.is_empty_language());
    }

    #[test]
    fn test_determinize_shares_subsets() {
        // ab|ac: the two 'a' edges collapse into one DFA state
        let nfa = Nfa::union(&Nfa::string("ab"), &Nfa::string("ac"));
        let dfa = Dfa::from_nfa(&nfa);

        let after_a = dfa.next(dfa.start(), 'a').unwrap();
        assert!(dfa.next(after_a, 'b').is_some());
        assert!(dfa.next(after_a, 'c').is_some());
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("ac"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("bc"));
    }

    #[test]
    fn test_determinize_star() {
        let nfa = Nfa::concatenate(&Nfa::kleene(&Nfa::singleton('a')), &Nfa::singleton('b'));
        let dfa = Dfa::from_nfa(&nfa);
        for input in ["b", "ab", "aaab"] {
            assert!(dfa.accepts(input), "{input}");
        }
        for input in ["", "a", "ba", "aba"] {
            assert!(!dfa.accepts(input), "{input}");
        }
    }

    #[test]
    fn test_to_nfa_round_trip() {
        let dfa = Dfa::from_nfa(&Nfa::string("let"));
        let nfa = dfa.to_nfa();
        assert_eq!(nfa.state_count(), dfa.state_count());
        assert!(nfa.accepts("let"));
        assert!(!nfa.accepts("le"));
        assert_eq!(Dfa::from_nfa(&nfa), dfa);
    }

    #[test]
    fn test_dfa_level_algebra() {
        let a = Dfa::from_nfa(&Nfa::singleton('a'));
        let b = Dfa::from_nfa(&Nfa::singleton('b'));

        let union = Dfa::union(&a, &b);
        assert!(union.accepts("a") && union.accepts("b"));

        let ab = Dfa::concatenate(&a, &b);
        assert!(ab.accepts("ab"));
        assert!(!ab.accepts("a"));

        let star = Dfa::kleene(&ab);
        assert!(star.accepts(""));
        assert!(star.accepts("abab"));
        assert!(!star.accepts("aba"));
    }

    #[test]
    fn test_unreachable_accepting_state_is_ignored() {
        let mut dfa = Dfa::empty();
        dfa.add_state(true);
        assert!(dfa.is_empty_language());
        assert_eq!(dfa.alphabet().len(), 0);
    }
}
