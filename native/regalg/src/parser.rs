//! Parser for the test-case input format.
//!
//! ```text
//! 1:
//! G1:
//! #Alphabet
//! a b
//! #Variables
//! S
//! #Start
//! S
//! #Rules
//! S -> aS | ε
//! #Operation
//! Complement
//! ==========
//! ```
//!
//! Lines are trimmed; blank lines and lines starting with `=` are skipped.
//! `|` separates rule alternatives, so it cannot be used as a symbol.
//!
//! Malformed lines fail the whole input with [`Error::Parse`]. A missing
//! start symbol or a missing or unknown operation only affects its own test
//! case and is reported when that case runs.

use crate::automaton::{Symbol, single_symbol};
use crate::batch::{Operation, TestCase};
use crate::error::{Error, Result};
use crate::grammar::{RegularGrammar, Rule};

const ALTERNATIVE: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Alphabet,
    Variables,
    Start,
    Rules,
    Operation,
}

impl Section {
    fn from_header(name: &str) -> Option<Self> {
        match name {
            "Alphabet" => Some(Self::Alphabet),
            "Variables" => Some(Self::Variables),
            "Start" => Some(Self::Start),
            "Rules" => Some(Self::Rules),
            "Operation" => Some(Self::Operation),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Parser {
    cases: Vec<TestCase>,
    current: Option<TestCase>,
    section: Option<Section>,
}

fn error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn is_case_header(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit()) && line.ends_with(':')
}

fn is_grammar_header(line: &str) -> bool {
    line.starts_with('G') && line.ends_with(':') && !line.contains("->")
}

fn symbol(line: usize, token: &str) -> Result<Symbol> {
    single_symbol(token)
        .ok_or_else(|| error(line, format!("expected a single-character symbol, found `{token}`")))
}

/// Whitespace-separated symbols of an `#Alphabet` or `#Variables` line.
fn symbols(line: usize, text: &str) -> Result<Vec<Symbol>> {
    text.split_whitespace()
        .map(|token| match symbol(line, token)? {
            ALTERNATIVE => Err(error(line, "`|` separates rule alternatives and cannot be a symbol")),
            symbol => Ok(symbol),
        })
        .collect()
}

impl Parser {
    fn finish_case(&mut self) {
        self.cases.extend(self.current.take());
    }

    fn grammar(&mut self, line: usize) -> Result<&mut RegularGrammar> {
        self.current
            .as_mut()
            .and_then(|case| case.grammars.last_mut())
            .ok_or_else(|| error(line, "grammar content outside of a grammar"))
    }

    fn line(&mut self, number: usize, line: &str) -> Result<()> {
        if is_case_header(line) {
            self.finish_case();
            self.current = Some(TestCase {
                id: line[..line.len() - 1].trim().to_string(),
                grammars: Vec::new(),
                operation: Err(Error::MissingOperation),
            });
            self.section = None;
            return Ok(());
        }

        if let Some(header) = line.strip_prefix('#') {
            let section = Section::from_header(header.trim())
                .ok_or_else(|| error(number, format!("unknown section `{}`", header.trim())))?;
            self.section = Some(section);
            return Ok(());
        }

        if is_grammar_header(line) {
            let case = self
                .current
                .as_mut()
                .ok_or_else(|| error(number, "grammar outside of a test case"))?;
            case.grammars.push(RegularGrammar {
                name: line[..line.len() - 1].trim().to_string(),
                ..RegularGrammar::default()
            });
            self.section = None;
            return Ok(());
        }

        match self.section {
            None => Err(error(number, format!("unexpected line `{line}`"))),
            Some(Section::Operation) => {
                let case = self
                    .current
                    .as_mut()
                    .ok_or_else(|| error(number, "operation outside of a test case"))?;
                // Unknown names fail the case when it runs, not the whole input.
                case.operation = line.parse::<Operation>();
                Ok(())
            }
            Some(Section::Alphabet) => {
                let symbols = symbols(number, line)?;
                self.grammar(number)?.alphabet.extend(symbols);
                Ok(())
            }
            Some(Section::Variables) => {
                let symbols = symbols(number, line)?;
                self.grammar(number)?.variables.extend(symbols);
                Ok(())
            }
            Some(Section::Start) => {
                let start = symbol(number, line)?;
                self.grammar(number)?.start = Some(start);
                Ok(())
            }
            Some(Section::Rules) => {
                let (lhs, rhs) = line
                    .split_once("->")
                    .ok_or_else(|| error(number, format!("rule without `->`: `{line}`")))?;
                let lhs = symbol(number, lhs.trim())?;
                let grammar = self.grammar(number)?;
                for alternative in rhs.split(ALTERNATIVE) {
                    grammar.rules.push(Rule::new(lhs, alternative.trim()));
                }
                Ok(())
            }
        }
    }
}

/// Parse every test case in `input`.
pub fn parse(input: &str) -> Result<Vec<TestCase>> {
    let mut parser = Parser::default();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('=') {
            continue;
        }
        parser.line(idx + 1, line)?;
    }

    parser.finish_case();
    Ok(parser.cases)
}
