//! Property-based tests for the automaton algebra and the scanner
//!
//! Random pattern trees over a three-letter alphabet are compiled with the
//! automaton algebra and compared against a direct backtracking matcher on
//! every string up to a small length.

#![cfg(test)]

use munch::automata::{Dfa, Nfa};
use munch::lexer::{CharSet, LexerBuilder, Pattern};
use munch::testing::{first_difference, strings_up_to};
use proptest::prelude::*;

const ALPHABET: &[char] = &['a', 'b', 'c'];
const MAX_LEN: usize = 4;

/// Random regular expressions built from small literals and classes
fn pattern() -> impl Strategy<Value = Pattern> {
    let leaf = prop_oneof![
        "[abc]{0,2}".prop_map(Pattern::literal),
        Just(Pattern::CharClass(CharSet::range('a', 'b'))),
        Just(Pattern::CharClass(CharSet::single('c'))),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 1..3).prop_map(Pattern::Seq),
            proptest::collection::vec(inner.clone(), 1..3).prop_map(Pattern::Alt),
            inner.clone().prop_map(Pattern::zero_or_more),
            inner.clone().prop_map(Pattern::one_or_more),
            inner.prop_map(Pattern::optional),
        ]
    })
}

/// Backtracking reference matcher: does `pattern` match exactly `input`?
fn matches(pattern: &Pattern, input: &[char]) -> bool {
    match pattern {
        Pattern::Literal(text) => text.chars().eq(input.iter().copied()),
        Pattern::CharClass(set) => input.len() == 1 && set.matches(input[0]),
        Pattern::Seq(items) => seq_matches(items, input),
        Pattern::Alt(branches) => branches.iter().any(|b| matches(b, input)),
        Pattern::Repeat { pattern, min, max } => repeat_matches(pattern, *min, *max, input),
        other => panic!("not generated: {other:?}"),
    }
}

fn seq_matches(items: &[Pattern], input: &[char]) -> bool {
    match items.split_first() {
        None => input.is_empty(),
        Some((first, rest)) => (0..=input.len())
            .any(|i| matches(first, &input[..i]) && seq_matches(rest, &input[i..])),
    }
}

fn repeat_matches(pattern: &Pattern, min: usize, max: Option<usize>, input: &[char]) -> bool {
    if input.is_empty() && min == 0 {
        return true;
    }
    if max == Some(0) {
        return false;
    }
    let min_rest = min.saturating_sub(1);
    let max_rest = max.map(|m| m - 1);
    if min > 0 && matches(pattern, &[]) && repeat_matches(pattern, min_rest, max_rest, input) {
        return true;
    }
    (1..=input.len()).any(|i| {
        matches(pattern, &input[..i]) && repeat_matches(pattern, min_rest, max_rest, &input[i..])
    })
}

fn reference(pattern: &Pattern) -> impl Fn(&str) -> bool + '_ {
    move |s: &str| matches(pattern, &s.chars().collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn nfa_algebra_matches_reference(p in pattern()) {
        let nfa = p.to_nfa().unwrap();
        prop_assert_eq!(first_difference(&reference(&p), &nfa, ALPHABET, MAX_LEN), None);
    }

    #[test]
    fn determinize_preserves_language(p in pattern()) {
        let nfa = p.to_nfa().unwrap();
        let dfa = Dfa::from_nfa(&nfa);
        prop_assert_eq!(first_difference(&nfa, &dfa, ALPHABET, MAX_LEN), None);
    }

    #[test]
    fn minimize_preserves_language_and_never_grows(p in pattern()) {
        let dfa = p.compile(false).unwrap();
        let min = dfa.minimize();
        prop_assert!(min.state_count() <= dfa.state_count());
        prop_assert_eq!(first_difference(&dfa, &min, ALPHABET, MAX_LEN), None);
    }

    #[test]
    fn minimize_is_idempotent(p in pattern()) {
        let once = p.compile(true).unwrap();
        let twice = once.minimize();
        prop_assert_eq!(twice.states(), once.states());
        prop_assert!(once == twice);
    }

    #[test]
    fn union_is_commutative(a in pattern(), b in pattern()) {
        let (na, nb) = (a.to_nfa().unwrap(), b.to_nfa().unwrap());
        let ab = Dfa::from_nfa(&Nfa::union(&na, &nb)).minimize();
        let ba = Dfa::from_nfa(&Nfa::union(&nb, &na)).minimize();
        prop_assert!(ab == ba);
    }

    #[test]
    fn concatenate_identities(a in pattern()) {
        let na = a.to_nfa().unwrap();
        let expected = Dfa::from_nfa(&na).minimize();
        let left = Dfa::from_nfa(&Nfa::concatenate(&Nfa::empty_string(), &na)).minimize();
        let right = Dfa::from_nfa(&Nfa::concatenate(&na, &Nfa::empty_string())).minimize();
        prop_assert!(left == expected);
        prop_assert!(right == expected);
        prop_assert!(Dfa::from_nfa(&Nfa::concatenate(&na, &Nfa::empty())).is_empty_language());
    }

    #[test]
    fn kleene_is_idempotent(a in pattern()) {
        let star = Nfa::kleene(&a.to_nfa().unwrap());
        let star_star = Nfa::kleene(&star);
        prop_assert!(Dfa::from_nfa(&star).minimize() == Dfa::from_nfa(&star_star).minimize());
    }

    #[test]
    fn product_constructions(a in pattern(), b in pattern()) {
        let (da, db) = (a.compile(true).unwrap(), b.compile(true).unwrap());
        let inter = Dfa::intersection(&da, &db);
        let diff = Dfa::subtraction(&da, &db);
        for s in strings_up_to(ALPHABET, MAX_LEN) {
            prop_assert_eq!(inter.accepts(&s), da.accepts(&s) && db.accepts(&s));
            prop_assert_eq!(diff.accepts(&s), da.accepts(&s) && !db.accepts(&s));
        }
    }

    #[test]
    fn scanner_reproduces_input(input in "[ab ]{0,24}") {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        enum Kind { As, B, Eof }

        let lexer = LexerBuilder::new()
            .token(Kind::As, Pattern::regex("a+"))
            .token(Kind::B, Pattern::literal("b"))
            .ignore(Pattern::regex(" +"))
            .build(Kind::Eof)
            .unwrap();

        let tokens = lexer.tokenize(&input).unwrap();
        let (eof, body) = tokens.split_last().unwrap();
        prop_assert_eq!(eof.kind, Kind::Eof);
        prop_assert!(body.iter().all(|t| !t.is_empty()));
        let rebuilt: String = body.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(rebuilt, input.replace(' ', ""));
        // Maximal munch: 'a' runs that touch in the source are one token
        let no_adjacent_as = body.windows(2).all(|w| {
            !(w[0].kind == Kind::As && w[1].kind == Kind::As && w[0].span.end == w[1].span.start)
        });
        prop_assert!(no_adjacent_as);

        let mut driver = lexer.lexer(input.chars());
        while !driver.read_token().unwrap().is_empty() {}
        let end = driver.location();
        for _ in 0..3 {
            let token = driver.read_token().unwrap();
            prop_assert_eq!(token.kind, Kind::Eof);
            prop_assert_eq!(token.span.start, end);
        }
    }
}
