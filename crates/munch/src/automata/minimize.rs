//! DFA minimization by partition refinement.
//!
//! States unreachable from the start state are discarded first. A synthetic
//! well state then makes the transition function total over the alphabet the
//! automaton uses, and the states are split into accepting and non-accepting
//! blocks (the well joins the non-accepting block). Each pass regroups the
//! members of every block by their signature, the block each symbol leads to,
//! until a pass splits nothing. Transitions into the well's block are dropped
//! from the result, which restores the partial transition function.
//!
//! Result states are numbered breadth-first from the start state over the
//! sorted alphabet, so minimizing an already minimal DFA reproduces it index
//! for index.

use super::{StateId, dfa::Dfa};
use log::trace;
use std::collections::{BTreeMap, VecDeque};

/// A group of (local) state indices that are not yet distinguished
type Block = Vec<usize>;

/// Returns the minimal DFA accepting the same language as `dfa`.
#[must_use]
pub fn minimize(dfa: &Dfa) -> Dfa {
    let machine = TotalMachine::new(dfa);
    let mut partition = machine.initial_partition();
    trace!("initial partition: {partition:?}");

    loop {
        let block_of = machine.block_index(&partition);
        let refined: Vec<Block> = partition
            .iter()
            .flat_map(|block| machine.split_block(block, &block_of))
            .collect();
        if refined.len() == partition.len() {
            break;
        }
        trace!("refined partition: {refined:?}");
        partition = refined;
    }

    let result = machine.build(&partition);
    trace!(
        "minimized {} states into {} ({} blocks)",
        dfa.state_count(),
        result.state_count(),
        partition.len()
    );
    result
}

/// The reachable part of a DFA plus a well state, with a total successor
/// table over a sorted alphabet.
struct TotalMachine<'a> {
    dfa: &'a Dfa,
    /// Original id of each local state; the well has no entry
    originals: Vec<StateId>,
    alphabet: Vec<char>,
    /// `successors[local][symbol]` is a local index (possibly the well)
    successors: Vec<Vec<usize>>,
    start: usize,
    well: usize,
}

impl<'a> TotalMachine<'a> {
    fn new(dfa: &'a Dfa) -> Self {
        let reachable = dfa.reachable();
        let originals: Vec<StateId> = reachable
            .iter()
            .enumerate()
            .filter(|&(_, &seen)| seen)
            .map(|(index, _)| StateId::from_index(index))
            .collect();

        let mut local = vec![usize::MAX; dfa.state_count()];
        for (index, original) in originals.iter().enumerate() {
            local[original.index()] = index;
        }

        let well = originals.len();
        let alphabet: Vec<char> = originals
            .iter()
            .flat_map(|s| dfa.states[s.index()].transitions.keys().copied())
            .collect::<std::collections::BTreeSet<char>>()
            .into_iter()
            .collect();

        let mut successors: Vec<Vec<usize>> = originals
            .iter()
            .map(|s| {
                alphabet
                    .iter()
                    .map(|&c| dfa.next(*s, c).map_or(well, |t| local[t.index()]))
                    .collect()
            })
            .collect();
        successors.push(vec![well; alphabet.len()]);

        Self {
            dfa,
            start: local[dfa.start().index()],
            originals,
            alphabet,
            successors,
            well,
        }
    }

    fn is_accepting(&self, local: usize) -> bool {
        local != self.well && self.dfa.is_accepting(self.originals[local])
    }

    /// `{accepting}` and `{non-accepting, well}`, omitting an empty block
    fn initial_partition(&self) -> Vec<Block> {
        let (accepting, rest): (Block, Block) =
            (0..=self.well).partition(|&local| self.is_accepting(local));
        [accepting, rest]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect()
    }

    fn block_index(&self, partition: &[Block]) -> Vec<usize> {
        let mut block_of = vec![0; self.successors.len()];
        for (index, block) in partition.iter().enumerate() {
            for &member in block {
                block_of[member] = index;
            }
        }
        block_of
    }

    /// Group the members of `block` by the blocks their transitions land in.
    fn split_block(&self, block: &Block, block_of: &[usize]) -> Vec<Block> {
        if block.len() == 1 {
            return vec![block.clone()];
        }
        let mut groups: BTreeMap<Vec<usize>, Block> = BTreeMap::new();
        for &member in block {
            let signature = self.successors[member]
                .iter()
                .map(|&target| block_of[target])
                .collect();
            groups.entry(signature).or_default().push(member);
        }
        groups.into_values().collect()
    }

    /// One state per block except the well's, numbered breadth-first from
    /// the start block.
    fn build(&self, partition: &[Block]) -> Dfa {
        let block_of = self.block_index(partition);
        let well_block = block_of[self.well];
        let start_block = block_of[self.start];
        if start_block == well_block {
            return Dfa::empty();
        }

        let mut result = Dfa {
            states: Vec::new(),
            start: StateId(0),
        };
        let mut numbering: Vec<Option<StateId>> = vec![None; partition.len()];
        let mut queue = VecDeque::new();

        numbering[start_block] = Some(result.add_state(self.is_accepting(self.start)));
        queue.push_back(start_block);

        while let Some(block) = queue.pop_front() {
            let Some(from) = numbering[block] else {
                continue;
            };
            let representative = partition[block][0];
            for (symbol, &c) in self.alphabet.iter().enumerate() {
                let target_block = block_of[self.successors[representative][symbol]];
                if target_block == well_block {
                    continue;
                }
                let to = match numbering[target_block] {
                    Some(id) => id,
                    None => {
                        let member = partition[target_block][0];
                        let id = result.add_state(self.is_accepting(member));
                        numbering[target_block] = Some(id);
                        queue.push_back(target_block);
                        id
                    }
                };
                result.add_transition(from, c, to);
            }
        }
        result
    }
}
