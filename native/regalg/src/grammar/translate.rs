//! Grammar to NFA translation.

use crate::automaton::{Dfa, Nfa, NfaBuilder, Symbol, subset_construction};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grammar::{RegularGrammar, Rule};
use tracing::debug;

/// The three right-linear production shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Production {
    /// `A -> ε`
    Empty,
    /// `A -> a`
    Terminal(Symbol),
    /// `A -> aB`
    Step(Symbol, Symbol),
}

fn classify(grammar: &RegularGrammar, rule: &Rule, config: &Config) -> Result<Production> {
    if config.is_epsilon(&rule.rhs) {
        return Ok(Production::Empty);
    }

    let mut chars = rule.rhs.chars();
    let shape = match (chars.next(), chars.next(), chars.next()) {
        (Some(t), None, None) if grammar.alphabet.contains(&t) => Some(Production::Terminal(t)),
        (Some(t), Some(v), None)
            if grammar.alphabet.contains(&t) && grammar.variables.contains(&v) =>
        {
            Some(Production::Step(t, v))
        }
        _ => None,
    };

    shape.ok_or_else(|| Error::MalformedProduction {
        grammar: grammar.name.clone(),
        lhs: rule.lhs,
        rhs: rule.rhs.clone(),
    })
}

/// Translate a right-linear grammar into an NFA.
///
/// The NFA has one state per variable, named after it, plus one accepting
/// state `<A><final_suffix>` per variable `A` with a terminal production
/// `A -> a`. Any rule of another shape aborts the translation.
pub fn grammar_to_nfa(grammar: &RegularGrammar, config: &Config) -> Result<Nfa> {
    config.validate()?;
    let start = grammar.start.ok_or_else(|| Error::MissingStart {
        grammar: grammar.name.clone(),
    })?;

    let mut nfa = NfaBuilder::new(grammar.alphabet.iter().copied());

    for &variable in &grammar.variables {
        nfa.state(&variable.to_string());
    }
    let start = nfa.state(&start.to_string());
    nfa.set_start_state(start);

    for rule in &grammar.rules {
        let lhs = nfa.state(&rule.lhs.to_string());
        match classify(grammar, rule, config)? {
            Production::Empty => nfa.add_accepting_state(lhs),
            Production::Terminal(terminal) => {
                let accept = nfa.state(&format!("{}{}", rule.lhs, config.final_suffix));
                nfa.add_accepting_state(accept);
                nfa.add_transition(lhs, terminal, accept);
            }
            Production::Step(terminal, variable) => {
                let next = nfa.state(&variable.to_string());
                nfa.add_transition(lhs, terminal, next);
            }
        }
    }

    let nfa = nfa.build();
    debug!(
        grammar = %grammar.name,
        rules = grammar.rules.len(),
        states = nfa.num_states(),
        "translated grammar"
    );
    Ok(nfa)
}

/// Translate a grammar and determinize the result.
pub fn grammar_to_dfa(grammar: &RegularGrammar, config: &Config) -> Result<Dfa> {
    grammar_to_nfa(grammar, config).map(|nfa| subset_construction(&nfa))
}
