//! Deterministic Finite Automaton and its canonical text form.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Symbol, is_epsilon};
use crate::config::Config;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

/// A Deterministic Finite Automaton.
///
/// States are numbered `0..num_states`. Automata produced by subset
/// construction or by the product combinators are total: every state has
/// exactly one transition per alphabet symbol. Hand-built automata may be
/// partial, see [`Dfa::is_total`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    num_states: StateId,
    start_state: StateId,
    /// Sink added to totalize the transition function, if any.
    dead_state: Option<StateId>,
    alphabet: BTreeSet<Symbol>,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, Symbol), StateId>,
    accepting: StateSet,
}

impl Dfa {
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        0..self.num_states
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn dead_state(&self) -> Option<StateId> {
        self.dead_state
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// All transitions, ordered by source state and then by symbol.
    pub fn transitions(&self) -> Vec<(StateId, Symbol, StateId)> {
        let mut edges: Vec<_> = self
            .transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Check that every state has a transition on every alphabet symbol.
    pub fn is_total(&self) -> bool {
        self.states().all(|state| {
            self.alphabet
                .iter()
                .all(|&symbol| self.transitions.contains_key(&(state, symbol)))
        })
    }

    /// Check if the DFA accepts no word at all, i.e. no accepting state is
    /// reachable from the start state.
    pub fn is_empty(&self) -> bool {
        if self.accepting.is_empty() {
            return true;
        }

        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue = VecDeque::from([self.start_state]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }
            if self.accepting.contains(state) {
                return false;
            }

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !visited.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        true
    }

    /// Run the automaton on `word`. A missing transition rejects.
    pub fn accepts(&self, word: &str) -> bool {
        let mut state = self.start_state;
        for symbol in word.chars() {
            match self.transition(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.accepting.contains(state)
    }

    /// Rendered name of a state.
    pub fn state_name(&self, state: StateId, config: &Config) -> String {
        if self.dead_state == Some(state) {
            config.dead_state_name.clone()
        } else {
            format!("{}{}", config.state_prefix, state)
        }
    }

    /// Canonical text form using the names chosen by `config`.
    pub fn display_with<'a>(&'a self, config: &'a Config) -> Rendered<'a> {
        Rendered { dfa: self, config }
    }

    /// A copy with the accepting set replaced by `accepting`.
    pub(crate) fn with_accepting(&self, accepting: StateSet) -> Dfa {
        Dfa {
            accepting,
            ..self.clone()
        }
    }
}

/// [`Dfa`] paired with naming configuration for display.
pub struct Rendered<'a> {
    dfa: &'a Dfa,
    config: &'a Config,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dfa = self.dfa;
        let name = |state: StateId| dfa.state_name(state, self.config);
        let join = |names: Vec<String>| names.join(" ");

        // Dead state last, discovered states in id order.
        let mut states: Vec<StateId> = dfa
            .states()
            .filter(|&s| dfa.dead_state != Some(s))
            .collect();
        states.extend(dfa.dead_state);

        writeln!(f, "# States")?;
        writeln!(f, "{}", join(states.iter().map(|&s| name(s)).collect()))?;
        writeln!(f, "# Alphabet")?;
        writeln!(f, "{}", join(dfa.alphabet.iter().map(|s| s.to_string()).collect()))?;
        writeln!(f, "# Start State")?;
        writeln!(f, "{}", name(dfa.start_state))?;
        writeln!(f, "# Final States")?;
        let finals = states.iter().filter(|&&s| dfa.is_accepting(s));
        writeln!(f, "{}", join(finals.map(|&s| name(s)).collect()))?;
        writeln!(f, "# Transitions")?;
        for &state in &states {
            for &symbol in &dfa.alphabet {
                if let Some(next) = dfa.transition(state, symbol) {
                    writeln!(f, "{} {} {}", name(state), symbol, name(next))?;
                }
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_with(&Config::default()).fmt(f)
    }
}

/// Incremental construction of a [`Dfa`].
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    num_states: StateId,
    start_state: Option<StateId>,
    dead_state: Option<StateId>,
    alphabet: BTreeSet<Symbol>,
    transitions: HashMap<(StateId, Symbol), StateId>,
    accepting: StateSet,
}

impl DfaBuilder {
    pub fn new(alphabet: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            alphabet: alphabet.into_iter().filter(|&s| !is_epsilon(s)).collect(),
            ..Self::default()
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Add a non-accepting sink looping on every symbol of the alphabet as
    /// known at this point. It renders under the dead-state name.
    pub fn add_dead_state(&mut self) -> StateId {
        let dead = self.add_state();
        let symbols: Vec<Symbol> = self.alphabet.iter().copied().collect();
        for symbol in symbols {
            self.transitions.insert((dead, symbol), dead);
        }
        self.dead_state = Some(dead);
        dead
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    pub fn add_accepting_state(&mut self, state: StateId) {
        self.accepting.insert(state);
    }

    /// Add a transition, replacing any earlier one for the same source and
    /// symbol. Symbols outside the alphabet are added to it.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        debug_assert!(!is_epsilon(symbol), "a DFA has no epsilon transitions");
        self.alphabet.insert(symbol);
        self.transitions.insert((source, symbol), destination);
    }

    /// Finish the automaton. Without an explicit start state, state 0 is the
    /// start state; it is created if no state exists yet.
    pub fn build(self) -> Dfa {
        let start_state = self.start_state.unwrap_or(0);
        let referenced = self
            .transitions
            .iter()
            .flat_map(|(&(src, _), &dst)| [src, dst])
            .chain(self.accepting.iter())
            .chain([start_state])
            .max()
            .unwrap_or(0);

        Dfa {
            num_states: self.num_states.max(referenced + 1),
            start_state,
            dead_state: self.dead_state,
            alphabet: self.alphabet,
            transitions: self.transitions,
            accepting: self.accepting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts exactly "a" over {a, b}, partial.
    fn just_a() -> Dfa {
        let mut builder = DfaBuilder::new(['a', 'b']);
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        builder.set_start_state(s0);
        builder.add_accepting_state(s1);
        builder.add_transition(s0, 'a', s1);
        builder.build()
    }

    #[test]
    fn test_dfa_basic() {
        let dfa = just_a();
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.start_state(), 0);
        assert_eq!(dfa.transition(0, 'a'), Some(1));
        assert_eq!(dfa.transition(0, 'b'), None);
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("aa"));
        assert!(!dfa.is_total());
        assert!(!dfa.is_empty());
    }

    #[test]
    fn test_dead_state_totalizes() {
        let mut builder = DfaBuilder::new(['a', 'b']);
        let s0 = builder.add_state();
        builder.set_start_state(s0);
        builder.add_accepting_state(s0);
        let dead = builder.add_dead_state();
        builder.add_transition(s0, 'a', s0);
        builder.add_transition(s0, 'b', dead);
        let dfa = builder.build();

        assert!(dfa.is_total());
        assert_eq!(dfa.dead_state(), Some(dead));
        assert!(dfa.accepts("aaa"));
        assert!(!dfa.accepts("ab"));
    }

    #[test]
    fn test_empty_dfa() {
        let dfa = DfaBuilder::new(['a']).build();
        assert_eq!(dfa.num_states(), 1);
        assert!(dfa.is_empty());

        // Accepting state that cannot be reached.
        let mut builder = DfaBuilder::new(['a']);
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        builder.add_transition(s0, 'a', s0);
        builder.add_accepting_state(s1);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_render_canonical() {
        let mut builder = DfaBuilder::new(['b', 'a']);
        let s0 = builder.add_state();
        let s1 = builder.add_state();
        builder.set_start_state(s0);
        builder.add_accepting_state(s1);
        let dead = builder.add_dead_state();
        builder.add_transition(s0, 'a', s1);
        builder.add_transition(s0, 'b', dead);
        builder.add_transition(s1, 'a', dead);
        builder.add_transition(s1, 'b', dead);
        let dfa = builder.build();

        let expected = "\
# States
q0 q1 N
# Alphabet
a b
# Start State
q0
# Final States
q1
# Transitions
q0 a q1
q0 b N
q1 a N
q1 b N
N a N
N b N

";
        assert_eq!(dfa.to_string(), expected);
    }

    #[test]
    fn test_render_with_config() {
        let config = Config {
            state_prefix: "s".into(),
            dead_state_name: "dead".into(),
            ..Config::default()
        };
        let mut builder = DfaBuilder::new(['a']);
        let s0 = builder.add_state();
        let dead = builder.add_dead_state();
        builder.add_transition(s0, 'a', dead);
        let dfa = builder.build();

        let text = dfa.display_with(&config).to_string();
        assert!(text.starts_with("# States\ns0 dead\n"));
        assert!(text.contains("s0 a dead\n"));
        assert!(text.contains("# Final States\n\n"));
    }
}
