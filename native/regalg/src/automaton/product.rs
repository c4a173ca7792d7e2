//! Language algebra over DFAs: complement, and union and intersection by
//! synchronous product construction.

use crate::automaton::dfa::{Dfa, DfaBuilder};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// A product state. `None` stands for the implicit dead partner a side falls
/// into once it has no transition for a symbol.
type Pair = (Option<StateId>, Option<StateId>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    Either,
    Both,
}

/// Result of an intersection. An empty accepting set is not an error, but is
/// surfaced through [`Intersection::is_empty_language`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersection {
    dfa: Dfa,
}

impl Intersection {
    fn new(dfa: Dfa) -> Self {
        let result = Self { dfa };
        if result.is_empty_language() {
            info!("the intersection of the languages is empty");
        }
        result
    }

    /// True when the product has no accepting state at all.
    pub fn is_empty_language(&self) -> bool {
        self.dfa.accepting_states().is_empty()
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }
}

/// Swap accepting and non-accepting states.
///
/// The input should be total; a missing transition rejects both before and
/// after complementing, so a partial input gives the wrong language.
pub fn complement(dfa: &Dfa) -> Dfa {
    if !dfa.is_total() {
        warn!(
            states = dfa.num_states(),
            "complementing a partial DFA, missing transitions stay rejecting"
        );
    }

    let all = StateSet::full(dfa.num_states() as usize);
    dfa.with_accepting(all.difference(dfa.accepting_states()))
}

/// DFA accepting the words accepted by `left` or by `right`.
pub fn union(left: &Dfa, right: &Dfa) -> Result<Dfa> {
    product(left, right, Accept::Either)
}

/// DFA accepting the words accepted by both `left` and `right`.
pub fn intersection(left: &Dfa, right: &Dfa) -> Result<Intersection> {
    product(left, right, Accept::Both).map(Intersection::new)
}

/// Left fold of [`union`] over `dfas`.
pub fn union_all<'a>(dfas: impl IntoIterator<Item = &'a Dfa>) -> Result<Dfa> {
    let mut dfas = dfas.into_iter();
    let first = dfas.next().ok_or(Error::NoOperands)?;
    dfas.try_fold(first.clone(), |acc, next| union(&acc, next))
}

/// Left fold of [`intersection`] over `dfas`.
pub fn intersection_all<'a>(dfas: impl IntoIterator<Item = &'a Dfa>) -> Result<Intersection> {
    let mut dfas = dfas.into_iter();
    let first = dfas.next().ok_or(Error::NoOperands)?;
    let mut acc = Intersection::new(first.clone());
    for next in dfas {
        acc = intersection(acc.dfa(), next)?;
    }
    Ok(acc)
}

fn product(left: &Dfa, right: &Dfa, accept: Accept) -> Result<Dfa> {
    if left.alphabet() != right.alphabet() {
        return Err(Error::AlphabetMismatch {
            left: left.alphabet().clone(),
            right: right.alphabet().clone(),
        });
    }

    let accepts = |state: Option<StateId>, dfa: &Dfa| state.is_some_and(|s| dfa.is_accepting(s));
    let step = |state: Option<StateId>, dfa: &Dfa, symbol: Symbol| state.and_then(|s| dfa.transition(s, symbol));

    let mut state_mapping: IndexMap<Pair, StateId> = IndexMap::new();
    let mut dfa = DfaBuilder::new(left.alphabet().iter().copied());

    let start_pair = (Some(left.start_state()), Some(right.start_state()));
    let start_state = dfa.add_state();
    dfa.set_start_state(start_state);
    state_mapping.insert(start_pair, start_state);

    let mut queue: VecDeque<(StateId, Pair)> = VecDeque::from([(start_state, start_pair)]);

    while let Some((current_state, (s1, s2))) = queue.pop_front() {
        let accepting = match accept {
            Accept::Either => accepts(s1, left) || accepts(s2, right),
            Accept::Both => accepts(s1, left) && accepts(s2, right),
        };
        if accepting {
            dfa.add_accepting_state(current_state);
        }

        for &symbol in left.alphabet() {
            let next_pair = (step(s1, left, symbol), step(s2, right, symbol));

            let next_state = match state_mapping.get(&next_pair) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state();
                    state_mapping.insert(next_pair, new_state);
                    queue.push_back((new_state, next_pair));
                    new_state
                }
            };

            dfa.add_transition(current_state, symbol, next_state);
        }
    }

    let dfa = dfa.build();
    debug!(
        ?accept,
        left_states = left.num_states(),
        right_states = right.num_states(),
        product_states = dfa.num_states(),
        "product construction finished"
    );
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Total DFA over {a, b} accepting exactly `word`.
    fn exactly(word: &str) -> Dfa {
        let mut dfa = DfaBuilder::new(['a', 'b']);
        let states: Vec<StateId> = (0..=word.len()).map(|_| dfa.add_state()).collect();
        let dead = dfa.add_dead_state();
        dfa.set_start_state(states[0]);
        dfa.add_accepting_state(states[word.len()]);
        for (i, &state) in states.iter().enumerate() {
            for symbol in ['a', 'b'] {
                let next = match word.chars().nth(i) {
                    Some(c) if c == symbol => states[i + 1],
                    _ => dead,
                };
                dfa.add_transition(state, symbol, next);
            }
        }
        dfa.build()
    }

    #[test]
    fn test_complement() {
        let dfa = exactly("a");
        let not_a = complement(&dfa);

        for word in ["", "b", "aa", "ab"] {
            assert!(not_a.accepts(word), "{word:?}");
        }
        assert!(!not_a.accepts("a"));
        assert_eq!(not_a.num_states(), dfa.num_states());
        assert!(not_a.is_accepting(dfa.dead_state().unwrap()));
    }

    #[test]
    fn test_complement_involution() {
        let dfa = exactly("ab");
        let twice = complement(&complement(&dfa));
        assert_eq!(twice.accepting_states(), dfa.accepting_states());
        assert_eq!(twice, dfa);
    }

    #[test]
    fn test_union() {
        let either = union(&exactly("a"), &exactly("b")).unwrap();

        assert!(either.is_total());
        assert!(either.accepts("a"));
        assert!(either.accepts("b"));
        for word in ["", "ab", "aa", "ba"] {
            assert!(!either.accepts(word), "{word:?}");
        }
    }

    #[test]
    fn test_intersection() {
        let left = union(&exactly("a"), &exactly("ab")).unwrap();
        let right = union(&exactly("ab"), &exactly("b")).unwrap();
        let both = intersection(&left, &right).unwrap();

        assert!(!both.is_empty_language());
        let dfa = both.dfa();
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("b"));
    }

    #[test]
    fn test_intersection_empty_language() {
        let both = intersection(&exactly("a"), &exactly("b")).unwrap();
        assert!(both.is_empty_language());
        assert!(both.dfa().is_total());
        assert!(!both.into_dfa().accepts("a"));
    }

    #[test]
    fn test_alphabet_mismatch() {
        let mut other = DfaBuilder::new(['a']);
        other.add_state();
        let other = other.build();

        let err = union(&exactly("a"), &other).unwrap_err();
        assert!(matches!(err, Error::AlphabetMismatch { .. }));
        let err = intersection(&other, &exactly("a")).unwrap_err();
        assert!(matches!(err, Error::AlphabetMismatch { .. }));
    }

    #[test]
    fn test_partial_operands_fall_into_dead_partner() {
        // Accepts "a", no transition on b anywhere.
        let mut partial = DfaBuilder::new(['a', 'b']);
        let s0 = partial.add_state();
        let s1 = partial.add_state();
        partial.add_accepting_state(s1);
        partial.add_transition(s0, 'a', s1);
        let partial = partial.build();

        let either = union(&partial, &exactly("b")).unwrap();
        assert!(either.is_total());
        assert!(either.accepts("a"));
        assert!(either.accepts("b"));
        assert!(!either.accepts("ba"));

        let both = intersection(&partial, &exactly("a")).unwrap();
        assert!(both.dfa().is_total());
        assert!(both.dfa().accepts("a"));
        assert!(!both.dfa().accepts("ab"));
    }

    #[test]
    fn test_discovery_order_names() {
        let either = union(&exactly("a"), &exactly("b")).unwrap();
        assert_eq!(either.start_state(), 0);
        // (q0,q0) -a-> (q1,N) is the first pair discovered.
        assert_eq!(either.transition(0, 'a'), Some(1));
        assert_eq!(either.transition(0, 'b'), Some(2));
    }

    #[test]
    fn test_folds() {
        let dfas = [exactly("a"), exactly("b"), exactly("ab")];
        let all = union_all(&dfas).unwrap();
        for word in ["a", "b", "ab"] {
            assert!(all.accepts(word), "{word:?}");
        }
        assert!(!all.accepts("ba"));

        let none = intersection_all(&dfas).unwrap();
        assert!(none.is_empty_language());

        let single = intersection_all([&dfas[0]]).unwrap();
        assert_eq!(single.dfa(), &dfas[0]);

        assert_eq!(union_all([]).unwrap_err(), Error::NoOperands);
        assert_eq!(intersection_all(&[] as &[Dfa]).unwrap_err(), Error::NoOperands);
    }
}
