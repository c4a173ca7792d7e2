#![allow(dead_code)]

use regalg::Config;
use regalg::automaton::Dfa;
use regalg::grammar::{RegularGrammar, Rule, grammar_to_dfa};

/// Every word over {a, b} of length at most `max_len`, shortest first.
pub fn words(max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|w| ['a', 'b'].map(|c| format!("{w}{c}")))
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

/// Grammar over {a, b} with variables {S, A, B} and start S.
pub fn grammar(name: &str, rules: &[(char, &str)]) -> RegularGrammar {
    RegularGrammar::new(
        name,
        ['a', 'b'],
        ['S', 'A', 'B'],
        'S',
        rules.iter().map(|&(lhs, rhs)| Rule::new(lhs, rhs)),
    )
}

pub fn dfa(rules: &[(char, &str)]) -> Dfa {
    grammar_to_dfa(&grammar("G", rules), &Config::default()).expect("well-formed grammar")
}

/// Assert that two automata agree on every word up to `max_len`.
pub fn assert_same_language(left: &Dfa, right: &Dfa, max_len: usize) {
    for word in words(max_len) {
        assert_eq!(left.accepts(&word), right.accepts(&word), "disagree on {word:?}");
    }
}
