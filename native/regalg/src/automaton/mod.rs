//! Finite automata over single-character symbols.
//!
//! This module provides:
//! - Epsilon-NFAs and epsilon closure computation
//! - Subset construction (NFA to total DFA conversion)
//! - Complement, union and intersection of DFAs
//! - PyO3 bindings for Python interoperability (feature `python`)

mod dfa;
mod nfa;
mod product;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::{Dfa, DfaBuilder, Rendered};
pub use nfa::{Nfa, NfaBuilder};
pub use product::{Intersection, complement, intersection, intersection_all, union, union_all};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{EPSILON, Symbol, is_epsilon};
pub(crate) use symbol::single_symbol;
