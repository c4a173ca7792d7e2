//! Non-deterministic Finite Automaton with epsilon transitions.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol, is_epsilon};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// A Non-deterministic Finite Automaton. Built with [`NfaBuilder`] and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Nfa {
    /// State names; a state's id is its index in this set.
    names: IndexSet<String>,
    /// Input symbols, epsilon excluded.
    alphabet: BTreeSet<Symbol>,
    /// Transitions: (source, symbol) -> set of destination states.
    /// Epsilon transitions are stored under [`EPSILON`].
    transitions: HashMap<(StateId, Symbol), StateSet>,
    start: Option<StateId>,
    accepting: StateSet,
}

impl Nfa {
    pub fn num_states(&self) -> usize {
        self.names.len()
    }

    /// Name of a state, if it exists.
    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.names.get_index(state as usize).map(String::as_str)
    }

    /// Id of the state with the given name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get_index_of(name).map(|i| i as StateId)
    }

    pub fn start_state(&self) -> Option<StateId> {
        self.start
    }

    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Destinations of a single transition, epsilon included.
    pub fn targets(&self, state: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.keys().any(|&(_, symbol)| is_epsilon(symbol))
    }

    /// The smallest superset of `seeds` closed under epsilon transitions.
    pub fn epsilon_closure(&self, seeds: &StateSet) -> StateSet {
        let mut closure = seeds.clone();
        let mut queue: VecDeque<StateId> = seeds.iter().collect();

        while let Some(state) = queue.pop_front() {
            if let Some(destinations) = self.transitions.get(&(state, EPSILON)) {
                for dest in destinations.iter() {
                    if closure.insert(dest) {
                        queue.push_back(dest);
                    }
                }
            }
        }

        closure
    }

    /// States reached from `states` by consuming `symbol`, without closing
    /// the result under epsilon transitions.
    pub fn step(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states());
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// Epsilon closure of [`Nfa::step`].
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        self.epsilon_closure(&self.step(states, symbol))
    }

    /// Decide membership of `word` by tracking the set of live states.
    pub fn accepts(&self, word: &str) -> bool {
        let Some(start) = self.start else {
            return false;
        };

        let mut current = self.epsilon_closure(&StateSet::singleton(start, self.num_states()));
        for symbol in word.chars() {
            if current.is_empty() {
                return false;
            }
            current = self.move_on_symbol(&current, symbol);
        }

        current.intersects(&self.accepting)
    }

    /// All transitions as (source, symbol, destination) triples.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }
}

/// Incremental construction of an [`Nfa`]. States are identified by name and
/// created on first mention.
#[derive(Debug, Clone, Default)]
pub struct NfaBuilder {
    names: IndexSet<String>,
    alphabet: BTreeSet<Symbol>,
    transitions: HashMap<(StateId, Symbol), StateSet>,
    start: Option<StateId>,
    accepting: StateSet,
}

impl NfaBuilder {
    /// Start from a declared alphabet. Symbols used by later transitions are
    /// added to it as well.
    pub fn new(alphabet: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            alphabet: alphabet.into_iter().filter(|&s| !is_epsilon(s)).collect(),
            ..Self::default()
        }
    }

    /// Get the id of the named state, creating the state if needed.
    pub fn state(&mut self, name: &str) -> StateId {
        match self.names.get_index_of(name) {
            Some(idx) => idx as StateId,
            None => self.names.insert_full(name.to_string()).0 as StateId,
        }
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        if !is_epsilon(symbol) {
            self.alphabet.insert(symbol);
        }

        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);
    }

    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start = Some(state);
    }

    pub fn add_accepting_state(&mut self, state: StateId) {
        self.accepting.insert(state);
    }

    pub fn build(self) -> Nfa {
        Nfa {
            names: self.names,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start: self.start,
            accepting: self.accepting,
        }
    }
}
