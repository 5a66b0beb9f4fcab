//! # Testing Utilities
//!
//! Brute-force language comparison for automata.
//!
//! Automaton constructions are checked against each other by enumerating
//! every string over a small alphabet up to a length bound and asking both
//! sides whether they accept it. The enumeration grows as
//! `alphabet.len() ^ max_len`, so keep both small.
//!
//! ## Usage
//!
//! ```rust
//! use munch::automata::{Dfa, Nfa};
//! use munch::testing::first_difference;
//!
//! let nfa = Nfa::kleene(&Nfa::string("ab"));
//! let dfa = Dfa::from_nfa(&nfa).minimize();
//! assert_eq!(first_difference(&nfa, &dfa, &['a', 'b'], 6), None);
//! ```

use crate::automata::{Dfa, Nfa};

/// Anything that can be asked whether it accepts a string
pub trait Recognizer {
    fn recognizes(&self, input: &str) -> bool;
}

impl Recognizer for Nfa {
    fn recognizes(&self, input: &str) -> bool {
        self.accepts(input)
    }
}

impl Recognizer for Dfa {
    fn recognizes(&self, input: &str) -> bool {
        self.accepts(input)
    }
}

impl<F: Fn(&str) -> bool> Recognizer for F {
    fn recognizes(&self, input: &str) -> bool {
        self(input)
    }
}

/// Every string over `alphabet` of length `0..=max_len`, shortest first.
#[must_use]
pub fn strings_up_to(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::with_capacity(frontier.len() * alphabet.len());
        for prefix in &frontier {
            for &c in alphabet {
                let mut s = prefix.clone();
                s.push(c);
                next.push(s);
            }
        }
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

/// The shortest string (up to `max_len`) on which `a` and `b` disagree.
#[must_use]
pub fn first_difference<A, B>(a: &A, b: &B, alphabet: &[char], max_len: usize) -> Option<String>
where
    A: Recognizer + ?Sized,
    B: Recognizer + ?Sized,
{
    strings_up_to(alphabet, max_len)
        .into_iter()
        .find(|s| a.recognizes(s) != b.recognizes(s))
}

/// The strings up to `max_len` that `recognizer` accepts, shortest first.
#[must_use]
pub fn accepted_strings<R: Recognizer + ?Sized>(
    recognizer: &R,
    alphabet: &[char],
    max_len: usize,
) -> Vec<String> {
    strings_up_to(alphabet, max_len)
        .into_iter()
        .filter(|s| recognizer.recognizes(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_up_to() {
        let strings = strings_up_to(&['a', 'b'], 2);
        assert_eq!(strings, ["", "a", "b", "aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_first_difference() {
        let a = Nfa::string("ab");
        let b = Nfa::optional(&Nfa::string("ab"));
        assert_eq!(first_difference(&a, &b, &['a', 'b'], 3), Some(String::new()));
        assert_eq!(first_difference(&a, &a, &['a', 'b'], 3), None);
    }

    #[test]
    fn test_closure_recognizer() {
        let even_a = |s: &str| s.chars().filter(|&c| c == 'a').count() % 2 == 0;
        let dfa = Dfa::from_nfa(&Nfa::kleene(&Nfa::string("aa")));
        assert_eq!(first_difference(&even_a, &dfa, &['a'], 6), None);
        assert_eq!(accepted_strings(&dfa, &['a'], 4), ["", "aa", "aaaa"]);
    }
}
