//! Symbol types for automata transitions.

/// An input symbol. Grammars are analysed character by character, so every
/// terminal and every variable is a single `char`.
pub type Symbol = char;

/// Label reserved for epsilon (empty) transitions. It never appears in an
/// automaton's reported alphabet.
pub const EPSILON: Symbol = 'ε';

/// Check if a symbol is the epsilon label.
#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}

/// Parse a whitespace-free token as a single symbol.
pub(crate) fn single_symbol(token: &str) -> Option<Symbol> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
