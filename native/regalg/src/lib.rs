//! Regular grammars to finite automata, and set algebra over their languages.
//!
//! The pipeline is grammar → NFA ([`grammar::grammar_to_nfa`]) → total DFA
//! ([`automaton::subset_construction`]) → complement, union or intersection
//! ([`automaton::complement`], [`automaton::union`],
//! [`automaton::intersection`]). Every step takes its inputs by reference and
//! returns a new automaton.
//!
//! [`parser`] and [`batch`] read the test-case input format and write the
//! canonical output format around that core.

pub mod automaton;
pub mod batch;
pub mod config;
pub mod error;
pub mod grammar;
pub mod parser;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn import_submodule<'py>(
    py: Python<'py>,
    m: &Bound<'py, PyModule>,
    package: &str,
    name: &str,
    import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let submodule = PyModule::new(py, name)?;
    import_func(&submodule)?;

    // Make `import regalg.automaton` work
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item(format!("{package}.{name}"), submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pymodule]
fn regalg(m: &Bound<'_, PyModule>) -> PyResult<()> {
    import_submodule(m.py(), m, "regalg", "automaton", automaton::automaton)?;
    Ok(())
}
