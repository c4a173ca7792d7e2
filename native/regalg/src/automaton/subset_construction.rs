//! Subset construction algorithm for converting an NFA to a total DFA.

use crate::automaton::dfa::{Dfa, DfaBuilder};
use crate::automaton::nfa::Nfa;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Convert an NFA to an equivalent total DFA using the powerset construction.
///
/// DFA states are numbered in discovery order, breadth first from the epsilon
/// closure of the NFA start state. Symbols with no successor lead to a dead
/// state, which is only added when some transition needs it.
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    // Sorted NFA state lists -> DFA state ids
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = DfaBuilder::new(nfa.alphabet().iter().copied());

    let seeds = match nfa.start_state() {
        Some(start) => StateSet::singleton(start, nfa.num_states()),
        None => StateSet::default(),
    };
    let initial_set = nfa.epsilon_closure(&seeds);

    let initial_state = dfa.add_state();
    dfa.set_start_state(initial_state);
    state_mapping.insert(initial_set.to_vec(), initial_state);

    // Every set is queued once, when it is first named.
    let mut worklist: VecDeque<(StateId, StateSet)> = VecDeque::from([(initial_state, initial_set)]);
    let mut into_dead: Vec<(StateId, Symbol)> = Vec::new();

    while let Some((current_state, current_set)) = worklist.pop_front() {
        trace!(state = current_state, nfa_states = ?current_set, "expanding subset");

        if current_set.intersects(nfa.accepting_states()) {
            dfa.add_accepting_state(current_state);
        }

        for &symbol in nfa.alphabet() {
            let reached = nfa.step(&current_set, symbol);
            if reached.is_empty() {
                into_dead.push((current_state, symbol));
                continue;
            }

            let next_set = nfa.epsilon_closure(&reached);
            let next_key = next_set.to_vec();

            let next_state = match state_mapping.get(&next_key) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state();
                    state_mapping.insert(next_key, new_state);
                    worklist.push_back((new_state, next_set));
                    new_state
                }
            };

            dfa.add_transition(current_state, symbol, next_state);
        }
    }

    if !into_dead.is_empty() {
        let dead = dfa.add_dead_state();
        for (state, symbol) in into_dead {
            dfa.add_transition(state, symbol, dead);
        }
    }

    let dfa = dfa.build();
    debug!(
        nfa_states = nfa.num_states(),
        dfa_states = dfa.num_states(),
        dead_state = dfa.dead_state().is_some(),
        "subset construction finished"
    );
    dfa
}
