//! Automaton visualization
//!
//! Renders [`Nfa`] and [`Dfa`] values as DOT/Graphviz graphs. Edges between
//! the same pair of states are merged and labelled with character ranges.

use munch::automata::{Dfa, Nfa};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Generate a DOT/Graphviz representation of an NFA
///
/// # Errors
///
/// Propagates a formatting failure from the underlying writer.
///
/// # Example
///
/// ```rust
/// use munch::automata::Nfa;
/// use munch_tools::visualize::nfa_to_dot;
///
/// let dot = nfa_to_dot(&Nfa::string("ab")).unwrap();
/// assert!(dot.starts_with("digraph NFA {"));
/// ```
pub fn nfa_to_dot(nfa: &Nfa) -> Result<String, fmt::Error> {
    let mut output = String::new();
    write_nfa(&mut output, nfa)?;
    Ok(output)
}

/// Generate a DOT/Graphviz representation of a DFA
///
/// # Errors
///
/// Propagates a formatting failure from the underlying writer.
pub fn dfa_to_dot(dfa: &Dfa) -> Result<String, fmt::Error> {
    let mut output = String::new();
    write_dfa(&mut output, dfa)?;
    Ok(output)
}

fn write_nfa(out: &mut impl Write, nfa: &Nfa) -> fmt::Result {
    write_header(out, "NFA")?;
    for index in 0..nfa.state_count() {
        let accepting = nfa.accepts_set().iter().any(|s| s.index() == index);
        write_node(out, index, accepting)?;
    }
    for start in nfa.starts() {
        writeln!(out, "  start -> q{};", start.index())?;
    }

    let mut edges: BTreeMap<(usize, usize), Vec<char>> = BTreeMap::new();
    for (from, state) in nfa.states().iter().enumerate() {
        for (&c, targets) in &state.transitions {
            for target in targets {
                edges.entry((from, target.index())).or_default().push(c);
            }
        }
    }
    write_edges(out, &edges)?;
    writeln!(out, "}}")
}

fn write_dfa(out: &mut impl Write, dfa: &Dfa) -> fmt::Result {
    write_header(out, "DFA")?;
    for (index, state) in dfa.states().iter().enumerate() {
        write_node(out, index, state.accepting)?;
    }
    writeln!(out, "  start -> q{};", dfa.start().index())?;

    let mut edges: BTreeMap<(usize, usize), Vec<char>> = BTreeMap::new();
    for (from, state) in dfa.states().iter().enumerate() {
        for (&c, target) in &state.transitions {
            edges.entry((from, target.index())).or_default().push(c);
        }
    }
    write_edges(out, &edges)?;
    writeln!(out, "}}")
}

fn write_header(out: &mut impl Write, name: &str) -> fmt::Result {
    writeln!(out, "digraph {name} {{")?;
    writeln!(out, "  rankdir=LR;")?;
    writeln!(out, "  start [shape=point];")
}

fn write_node(out: &mut impl Write, index: usize, accepting: bool) -> fmt::Result {
    let shape = if accepting { "doublecircle" } else { "circle" };
    writeln!(out, "  q{index} [label=\"{index}\", shape={shape}];")
}

fn write_edges(out: &mut impl Write, edges: &BTreeMap<(usize, usize), Vec<char>>) -> fmt::Result {
    for (&(from, to), chars) in edges {
        writeln!(out, "  q{from} -> q{to} [label=\"{}\"];", range_label(chars))?;
    }
    Ok(())
}

/// Compress sorted characters into a label such as `a-z, _`
fn range_label(chars: &[char]) -> String {
    let mut ranges: Vec<(char, char)> = Vec::new();
    for &c in chars {
        match ranges.last_mut() {
            Some((_, hi)) if u32::from(*hi) + 1 == u32::from(c) => *hi = c,
            _ => ranges.push((c, c)),
        }
    }
    ranges
        .iter()
        .map(|&(lo, hi)| match u32::from(hi) - u32::from(lo) {
            0 => escape_label(lo),
            1 => format!("{}, {}", escape_label(lo), escape_label(hi)),
            _ => format!("{}-{}", escape_label(lo), escape_label(hi)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_label(c: char) -> String {
    match c {
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\\\n".to_string(),
        '\t' => "\\\\t".to_string(),
        '\r' => "\\\\r".to_string(),
        ' ' => "' '".to_string(),
        c => c.to_string(),
    }
}
