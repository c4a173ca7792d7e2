//! PyO3 bindings for the automaton module.
//!
//! Python callers hand over grammars as plain lists and get DFAs back that
//! render in the canonical text form through `str()`.

use crate::automaton::dfa::Dfa;
use crate::automaton::product::{complement, intersection, union};
use crate::batch;
use crate::config::Config;
use crate::error::Error;
use crate::grammar::{RegularGrammar, Rule, grammar_to_dfa as translate};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PySet;

fn value_error(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A right-linear grammar.
#[pyclass(name = "RegularGrammar", module = "regalg.automaton")]
#[derive(Clone)]
pub struct PyRegularGrammar {
    grammar: RegularGrammar,
}

#[pymethods]
impl PyRegularGrammar {
    /// `rules` is a list of `(lhs, rhs)` pairs such as `("S", "aS")`.
    #[new]
    #[pyo3(signature = (name, alphabet, variables, start, rules))]
    fn new(
        name: String,
        alphabet: Vec<char>,
        variables: Vec<char>,
        start: char,
        rules: Vec<(char, String)>,
    ) -> Self {
        Self {
            grammar: RegularGrammar::new(
                name,
                alphabet,
                variables,
                start,
                rules.into_iter().map(|(lhs, rhs)| Rule::new(lhs, rhs)),
            ),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RegularGrammar({:?}, {} rules)",
            self.grammar.name,
            self.grammar.rules.len()
        )
    }

    #[getter]
    fn name(&self) -> &str {
        &self.grammar.name
    }

    /// Translate and determinize the grammar.
    fn to_dfa(&self) -> PyResult<PyDFA> {
        grammar_to_dfa(self)
    }
}

/// A total Deterministic Finite Automaton.
#[pyclass(
    name = "DeterministicFiniteAutomaton",
    module = "regalg.automaton"
)]
#[derive(Clone)]
pub struct PyDFA {
    dfa: Dfa,
}

#[pymethods]
impl PyDFA {
    fn __str__(&self) -> String {
        self.dfa.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "DeterministicFiniteAutomaton({} states, {} final)",
            self.dfa.num_states(),
            self.dfa.accepting_states().len()
        )
    }

    #[getter]
    fn start_state(&self) -> u32 {
        self.dfa.start_state()
    }

    #[getter]
    fn num_states(&self) -> u32 {
        self.dfa.num_states()
    }

    /// Get the final states as a set of integer indices.
    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.dfa.accepting_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    fn accepts(&self, word: &str) -> bool {
        self.dfa.accepts(word)
    }

    fn is_empty(&self) -> bool {
        self.dfa.is_empty()
    }

    fn is_total(&self) -> bool {
        self.dfa.is_total()
    }

    fn complement(&self) -> PyDFA {
        PyDFA {
            dfa: complement(&self.dfa),
        }
    }

    fn union(&self, other: &PyDFA) -> PyResult<PyDFA> {
        let dfa = union(&self.dfa, &other.dfa).map_err(value_error)?;
        Ok(PyDFA { dfa })
    }

    /// The intersection's final-state set is empty when the languages are
    /// disjoint.
    fn intersection(&self, other: &PyDFA) -> PyResult<PyDFA> {
        let result = intersection(&self.dfa, &other.dfa).map_err(value_error)?;
        Ok(PyDFA {
            dfa: result.into_dfa(),
        })
    }
}

/// Translate and determinize a grammar.
#[pyfunction]
fn grammar_to_dfa(grammar: &PyRegularGrammar) -> PyResult<PyDFA> {
    let dfa = translate(&grammar.grammar, &Config::default()).map_err(value_error)?;
    Ok(PyDFA { dfa })
}

/// Evaluate every test case of an input document and return the output
/// document.
#[pyfunction]
fn run_batch(text: &str) -> PyResult<String> {
    batch::process(text, &Config::default()).map_err(value_error)
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRegularGrammar>()?;
    m.add_class::<PyDFA>()?;
    m.add_function(wrap_pyfunction!(grammar_to_dfa, m)?)?;
    m.add_function(wrap_pyfunction!(run_batch, m)?)?;
    Ok(())
}
