//! Munch Tools - Developer utilities for munch lexers
//!
//! This crate provides a rules-file front end for building lexers and
//! Graphviz rendering of the automata behind them.

pub mod cli;
pub mod rules;
pub mod visualize;

pub use rules::{Rule, RuleKind, RuleSet, RulesError};
pub use visualize::{dfa_to_dot, nfa_to_dot};
