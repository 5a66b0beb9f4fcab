//! # Automata
//!
//! Finite automata over `char` and the algebra used to build lexers:
//!
//! - [`Nfa`]: nondeterministic automata with union, concatenation, Kleene
//!   star, character sets and strings. The transition relation never holds
//!   epsilon edges; concatenation and star replicate edges instead.
//! - [`Dfa`]: deterministic automata built from an [`Nfa`] by subset
//!   construction, minimized by partition refinement, and combined by product
//!   construction (intersection, subtraction).
//!
//! ## Pipeline
//!
//! ```text
//! Pattern -> Nfa algebra -> determinize -> minimize -> AutomatonSet
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use munch::automata::{Dfa, Nfa};
//!
//! let digits = Nfa::plus(&Nfa::range('0', '9'));
//! let dfa = Dfa::from_nfa(&digits).minimize();
//!
//! assert!(dfa.accepts("2024"));
//! assert!(!dfa.accepts(""));
//! assert_eq!(dfa.state_count(), 2);
//! ```
//!
//! States are indices into the arena of the automaton that owns them. A
//! [`StateId`] from one automaton means nothing in another one; every
//! operation that combines automata copies its operands into a fresh arena.

pub mod dfa;
pub mod equiv;
pub mod minimize;
pub mod nfa;
pub mod product;

pub use dfa::{Dfa, DfaState};
pub use nfa::{Nfa, NfaState};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// State ID in an automaton
///
/// Uses u32 which is sufficient for all practical automaton sizes.
/// Conversions to usize for indexing are safe on all platforms (usize >= 32 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Shift this state into an arena where the owning automaton's states
    /// start at `offset`.
    #[inline]
    #[must_use]
    pub(crate) const fn offset(self, offset: u32) -> Self {
        Self(self.0 + offset)
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}
