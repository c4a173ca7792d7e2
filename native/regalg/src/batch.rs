//! Test cases: a list of grammars and the operation to apply to their DFAs.

use crate::automaton::{Dfa, complement, intersection_all, union_all};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grammar::{RegularGrammar, grammar_to_dfa};
use crate::parser;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Complement of the first grammar's language.
    Complement,
    /// Union of all grammars' languages.
    Union,
    /// Intersection of all grammars' languages.
    Intersection,
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "Complement" => Ok(Self::Complement),
            "Union" => Ok(Self::Union),
            "Intersection" => Ok(Self::Intersection),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Complement => "Complement",
            Self::Union => "Union",
            Self::Intersection => "Intersection",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub id: String,
    pub grammars: Vec<RegularGrammar>,
    /// The operation, or why the input did not name a usable one. An error
    /// here fails this case alone.
    pub operation: Result<Operation>,
}

/// The automaton a test case evaluates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub id: String,
    pub dfa: Dfa,
    /// Set when an intersection has no accepting state.
    pub empty_language: bool,
}

/// Translate and determinize every grammar of `case`, then apply its
/// operation.
pub fn run(case: &TestCase, config: &Config) -> Result<Outcome> {
    let operation = case.operation.clone()?;
    let dfas = case
        .grammars
        .iter()
        .map(|grammar| grammar_to_dfa(grammar, config))
        .collect::<Result<Vec<_>>>()?;

    let (dfa, empty_language) = match operation {
        Operation::Complement => {
            let first = dfas.first().ok_or(Error::NoOperands)?;
            (complement(first), false)
        }
        Operation::Union => (union_all(&dfas)?, false),
        Operation::Intersection => {
            let result = intersection_all(&dfas)?;
            let empty = result.is_empty_language();
            (result.into_dfa(), empty)
        }
    };

    debug!(
        case = %case.id,
        %operation,
        grammars = case.grammars.len(),
        states = dfa.num_states(),
        "evaluated test case"
    );

    Ok(Outcome {
        id: case.id.clone(),
        dfa,
        empty_language,
    })
}

/// Run every case. A failing case does not stop the others.
pub fn run_all(cases: &[TestCase], config: &Config) -> Vec<Result<Outcome>> {
    cases
        .iter()
        .map(|case| {
            run(case, config).inspect_err(|err| warn!(case = %case.id, %err, "test case failed"))
        })
        .collect()
}

/// The output document for a batch of results.
struct Report<'a> {
    results: &'a [Result<Outcome>],
    config: &'a Config,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (number, result) in self.results.iter().enumerate() {
            writeln!(f, "{}", number + 1)?;
            match result {
                Ok(outcome) => write!(f, "{}", outcome.dfa.display_with(self.config))?,
                Err(err) => write!(f, "# Error\n{err}\n\n")?,
            }
        }
        Ok(())
    }
}

/// Write the results in order, each preceded by its 1-based position.
pub fn render(results: &[Result<Outcome>], config: &Config) -> String {
    Report { results, config }.to_string()
}

/// Parse `input`, run every case and render the results.
pub fn process(input: &str, config: &Config) -> Result<String> {
    config.validate()?;
    let cases = parser::parse(input)?;
    let results = run_all(&cases, config);
    Ok(render(&results, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rule;

    fn grammar(name: &str, rules: &[(char, &str)]) -> RegularGrammar {
        RegularGrammar::new(
            name,
            ['a', 'b'],
            ['S', 'A'],
            'S',
            rules.iter().map(|&(lhs, rhs)| Rule::new(lhs, rhs)),
        )
    }

    fn case(operation: Operation, grammars: Vec<RegularGrammar>) -> TestCase {
        TestCase {
            id: "1".into(),
            grammars,
            operation: Ok(operation),
        }
    }

    #[test]
    fn test_operation_names() {
        for op in [Operation::Complement, Operation::Union, Operation::Intersection] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
        assert!(matches!("union".parse::<Operation>(), Err(Error::UnknownOperation(_))));
    }

    #[test]
    fn test_run_complement() {
        let case = case(Operation::Complement, vec![grammar("G1", &[('S', "a")])]);
        let outcome = run(&case, &Config::default()).unwrap();
        assert!(!outcome.empty_language);
        assert!(!outcome.dfa.accepts("a"));
        assert!(outcome.dfa.accepts("b"));
        assert!(outcome.dfa.accepts(""));
    }

    #[test]
    fn test_run_union_of_three() {
        let case = case(
            Operation::Union,
            vec![
                grammar("G1", &[('S', "a")]),
                grammar("G2", &[('S', "b")]),
                grammar("G3", &[('S', "aA"), ('A', "a")]),
            ],
        );
        let dfa = run(&case, &Config::default()).unwrap().dfa;
        for word in ["a", "b", "aa"] {
            assert!(dfa.accepts(word), "{word:?}");
        }
        assert!(!dfa.accepts("ab"));
    }

    #[test]
    fn test_run_intersection_empty() {
        let case = case(
            Operation::Intersection,
            vec![grammar("G1", &[('S', "a")]), grammar("G2", &[('S', "b")])],
        );
        let outcome = run(&case, &Config::default()).unwrap();
        assert!(outcome.empty_language);
        assert!(outcome.dfa.accepting_states().is_empty());
    }

    #[test]
    fn test_failures_are_per_case() {
        let bad = case(Operation::Union, vec![grammar("G1", &[('S', "abc")])]);
        let good = case(Operation::Complement, vec![grammar("G1", &[('S', "ε")])]);
        let none = case(Operation::Complement, vec![]);

        let results = run_all(&[bad, good, none], &Config::default());
        assert!(matches!(results[0], Err(Error::MalformedProduction { .. })));
        assert!(results[1].is_ok());
        assert_eq!(results[2], Err(Error::NoOperands));

        let text = render(&results, &Config::default());
        assert!(text.starts_with("1\n# Error\ninvalid production in G1: S -> abc\n\n2\n# States\n"));
        assert!(text.ends_with("3\n# Error\noperation needs at least one automaton\n\n"));
    }

    #[test]
    fn test_case_problems_do_not_stop_the_batch() {
        let good = "\
1:
G1:
#Alphabet
a b
#Variables
S
#Start
S
#Rules
S -> aS | ε
#Operation
Complement
";
        let unknown = format!("{good}2:\nG1:\n#Alphabet\na b\n#Variables\nS\n#Start\nS\n#Rules\nS -> a\n#Operation\nConcatenation\n");
        let output = process(&unknown, &Config::default()).unwrap();
        assert!(output.starts_with("1\n# States\nq0 N\n"), "{output}");
        assert!(output.ends_with("2\n# Error\nunknown operation `Concatenation`\n\n"), "{output}");

        let no_start = format!("{good}2:\nG1:\n#Alphabet\na b\n#Variables\nS\n#Rules\nS -> a\n#Operation\nUnion\n");
        let output = process(&no_start, &Config::default()).unwrap();
        assert!(output.starts_with("1\n# States\nq0 N\n"), "{output}");
        assert!(output.ends_with("2\n# Error\ngrammar G1 has no start symbol\n\n"), "{output}");

        let no_operation = format!("{good}2:\nG1:\n#Start\nS\n");
        let output = process(&no_operation, &Config::default()).unwrap();
        assert!(output.ends_with("2\n# Error\ntest case has no operation\n\n"), "{output}");
    }

    #[test]
    fn test_process() {
        let input = "\
1:
G1:
#Alphabet
a b
#Variables
S
#Start
S
#Rules
S -> aS | ε
#Operation
Complement
";
        let expected = "\
1
# States
q0 N
# Alphabet
a b
# Start State
q0
# Final States
N
# Transitions
q0 a q0
q0 b N
N a N
N b N

";
        assert_eq!(process(input, &Config::default()).unwrap(), expected);
    }
}
