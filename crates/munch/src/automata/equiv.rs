//! Structural equality of DFAs.
//!
//! Two DFAs are structurally equal when walking both from their start states
//! in lock-step builds a consistent bijection between the states visited:
//! paired states agree on acceptance and on the set of characters they can
//! read, and every pairing is consistent in both directions. This is
//! isomorphism of the reachable parts. Minimal DFAs of the same language are
//! always isomorphic, so comparing minimized automata decides language
//! equality. `Dfa: PartialEq` is implemented with this check.

use super::{StateId, dfa::Dfa};
use hashbrown::HashMap;

/// True iff the reachable parts of `a` and `b` are isomorphic.
#[must_use]
pub fn is_isomorphic(a: &Dfa, b: &Dfa) -> bool {
    let mut forward: HashMap<StateId, StateId> = HashMap::new();
    let mut backward: HashMap<StateId, StateId> = HashMap::new();
    let mut stack = vec![(a.start(), b.start())];
    forward.insert(a.start(), b.start());
    backward.insert(b.start(), a.start());

    while let Some((sa, sb)) = stack.pop() {
        if a.is_accepting(sa) != b.is_accepting(sb) {
            return false;
        }
        let ta = &a.states()[sa.index()].transitions;
        let tb = &b.states()[sb.index()].transitions;
        if ta.len() != tb.len() || !ta.keys().eq(tb.keys()) {
            return false;
        }
        for (&na, &nb) in ta.values().zip(tb.values()) {
            match (forward.get(&na), backward.get(&nb)) {
                (Some(&mapped_b), Some(&mapped_a)) => {
                    if mapped_b != nb || mapped_a != na {
                        return false;
                    }
                }
                (None, None) => {
                    forward.insert(na, nb);
                    backward.insert(nb, na);
                    stack.push((na, nb));
                }
                _ => return false,
            }
        }
    }
    true
}
