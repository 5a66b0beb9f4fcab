//! Product construction: intersection and subtraction of DFAs.
//!
//! Both operations walk the reachable part of the product automaton whose
//! states are pairs `(a_state, b_state)`. Whenever `b` has no move for a
//! character that `a` can read, the `b` component falls into a synthetic
//! well state (`None` below), which accepts nothing and never leaves. Moves
//! are driven by `a` alone: a character `a` cannot read kills the pair
//! regardless of `b`, since neither result language can contain a string
//! outside `L(a)`.

use super::{StateId, dfa::Dfa};
use hashbrown::HashMap;
use log::trace;
use std::collections::VecDeque;

/// A product state. `None` in the second slot is `b`'s well state.
type Pair = (StateId, Option<StateId>);

/// Build the product of `a` and `b`. A pair accepts iff its `a` component
/// accepts and the acceptance of its `b` component equals `sign`.
///
/// `sign == true` yields `L(a) ∩ L(b)`, `sign == false` yields `L(a) \ L(b)`.
#[must_use]
pub fn cartesian(a: &Dfa, b: &Dfa, sign: bool) -> Dfa {
    let mut result = Dfa {
        states: Vec::new(),
        start: StateId(0),
    };
    let mut pairs: HashMap<Pair, StateId> = HashMap::new();
    let mut queue: VecDeque<(Pair, StateId)> = VecDeque::new();

    let accepts = |(sa, sb): Pair| {
        let b_accepts = sb.is_some_and(|s| b.is_accepting(s));
        a.is_accepting(sa) && b_accepts == sign
    };

    let start = (a.start(), Some(b.start()));
    result.start = result.add_state(accepts(start));
    pairs.insert(start, result.start);
    queue.push_back((start, result.start));

    while let Some(((sa, sb), from)) = queue.pop_front() {
        for (&c, &ta) in &a.states[sa.index()].transitions {
            let target = (ta, sb.and_then(|s| b.next(s, c)));
            let to = match pairs.get(&target) {
                Some(&id) => id,
                None => {
                    let id = result.add_state(accepts(target));
                    trace!("product pair {target:?} -> {id}");
                    pairs.insert(target, id);
                    queue.push_back((target, id));
                    id
                }
            };
            result.add_transition(from, c, to);
        }
    }

    trace!(
        "product of {} x {} states ({}) has {} states",
        a.state_count(),
        b.state_count(),
        if sign { "intersection" } else { "subtraction" },
        result.state_count()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::Nfa;

    fn dfa(nfa: &Nfa) -> Dfa {
        Dfa::from_nfa(nfa)
    }

    #[test]
    fn test_intersection_of_ranges() {
        let lower = dfa(&Nfa::range('a', 'z'));
        let first_half = dfa(&Nfa::range('a', 'm'));
        let both = cartesian(&lower, &first_half, true);
        assert!(both.accepts("c"));
        assert!(!both.accepts("q"));
        assert_eq!(both.minimize(), first_half.minimize());
    }

    #[test]
    fn test_subtraction_keeps_b_misses() {
        // Identifiers minus the keyword "if"
        let ident = dfa(&Nfa::plus(&Nfa::range('a', 'z')));
        let keyword = dfa(&Nfa::string("if"));
        let diff = cartesian(&ident, &keyword, false);

        assert!(diff.accepts("i"));
        assert!(diff.accepts("iff"));
        assert!(diff.accepts("x"));
        assert!(!diff.accepts("if"));
        assert!(!diff.accepts(""));
    }

    #[test]
    fn test_subtract_self_is_empty() {
        let a = dfa(&Nfa::kleene(&Nfa::string("ab")));
        let diff = Dfa::subtraction(&a, &a);
        assert!(diff.is_empty_language());
    }

    #[test]
    fn test_intersection_with_empty() {
        let a = dfa(&Nfa::string("abc"));
        let none = cartesian(&a, &Dfa::empty(), true);
        assert!(none.is_empty_language());

        let all = cartesian(&a, &Dfa::empty(), false);
        assert!(all.accepts("abc"));
    }
}
