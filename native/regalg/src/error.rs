//! Error type shared by every stage of the pipeline.

use crate::automaton::Symbol;
use std::collections::BTreeSet;
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule's right-hand side is not epsilon, a terminal, or a terminal
    /// followed by a variable.
    MalformedProduction {
        grammar: String,
        lhs: Symbol,
        rhs: String,
    },
    /// The operands of a binary combinator have different alphabets.
    AlphabetMismatch {
        left: BTreeSet<Symbol>,
        right: BTreeSet<Symbol>,
    },
    /// An N-ary combinator was given no automata.
    NoOperands,
    /// A grammar was given without a start symbol.
    MissingStart { grammar: String },
    /// A test case has no `#Operation` section.
    MissingOperation,
    /// The test-case input text is not well formed. `line` is 1-based.
    Parse { line: usize, message: String },
    UnknownOperation(String),
    InvalidConfig(String),
}

fn symbols(set: &BTreeSet<Symbol>) -> String {
    let items: Vec<String> = set.iter().map(|s| s.to_string()).collect();
    format!("{{{}}}", items.join(", "))
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedProduction { grammar, lhs, rhs } => {
                write!(f, "invalid production in {grammar}: {lhs} -> {rhs}")
            }
            Error::AlphabetMismatch { left, right } => write!(
                f,
                "alphabets must be the same: {} vs {}",
                symbols(left),
                symbols(right)
            ),
            Error::NoOperands => f.write_str("operation needs at least one automaton"),
            Error::MissingStart { grammar } => write!(f, "grammar {grammar} has no start symbol"),
            Error::MissingOperation => f.write_str("test case has no operation"),
            Error::Parse { line, message } => write!(f, "line {line}: {message}"),
            Error::UnknownOperation(name) => write!(f, "unknown operation `{name}`"),
            Error::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for Error {}
