//! Regular grammar model and its translation to an NFA.

mod translate;

pub use translate::{grammar_to_nfa, grammar_to_dfa};

use crate::automaton::Symbol;
use std::collections::BTreeSet;

/// A production `lhs -> rhs`. The right-hand side is kept as text because the
/// empty word may be spelled with more than one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: Symbol,
    pub rhs: String,
}

impl Rule {
    pub fn new(lhs: Symbol, rhs: impl Into<String>) -> Self {
        Self {
            lhs,
            rhs: rhs.into(),
        }
    }
}

/// A right-linear grammar as handed over by the input parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegularGrammar {
    pub name: String,
    pub alphabet: BTreeSet<Symbol>,
    pub variables: BTreeSet<Symbol>,
    /// `None` when the input gave no start symbol; translation then fails.
    pub start: Option<Symbol>,
    /// Productions in input order.
    pub rules: Vec<Rule>,
}

impl RegularGrammar {
    pub fn new(
        name: impl Into<String>,
        alphabet: impl IntoIterator<Item = Symbol>,
        variables: impl IntoIterator<Item = Symbol>,
        start: Symbol,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        Self {
            name: name.into(),
            alphabet: alphabet.into_iter().collect(),
            variables: variables.into_iter().collect(),
            start: Some(start),
            rules: rules.into_iter().collect(),
        }
    }
}
