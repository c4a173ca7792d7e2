//! Naming and spelling knobs shared by the translator and the renderer.

use crate::error::{Error, Result};

/// Configuration for grammar translation and automaton rendering.
///
/// The defaults reproduce the canonical output format: discovered states are
/// `q0`, `q1`, ..., the dead state is `N`, and a terminal production `S -> a`
/// gets the accepting state `S_final`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Right-hand sides that denote the empty word. The second default entry
    /// is `ε` as it reads after a UTF-8 file was decoded as Latin-1.
    pub epsilon_spellings: Vec<String>,
    /// Suffix appended to a variable to name its terminal accepting state.
    pub final_suffix: String,
    /// Rendered name of the dead state.
    pub dead_state_name: String,
    /// Prefix of rendered state names, followed by the state id.
    pub state_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon_spellings: vec!["ε".to_string(), "Îµ".to_string()],
            final_suffix: "_final".to_string(),
            dead_state_name: "N".to_string(),
            state_prefix: "q".to_string(),
        }
    }
}

fn is_token(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

impl Config {
    /// Reject settings that would make rendered output ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.epsilon_spellings.is_empty() {
            return Err(Error::InvalidConfig("no epsilon spelling given".into()));
        }
        if self.final_suffix.is_empty() {
            return Err(Error::InvalidConfig(
                "empty final suffix would reuse the variable's own state".into(),
            ));
        }
        if !is_token(&self.dead_state_name) || !is_token(&self.state_prefix) {
            return Err(Error::InvalidConfig(
                "state names must be non-empty and free of whitespace".into(),
            ));
        }
        if let Some(rest) = self.dead_state_name.strip_prefix(&self.state_prefix) {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::InvalidConfig(format!(
                    "dead state name `{}` collides with discovered state names",
                    self.dead_state_name
                )));
            }
        }
        Ok(())
    }

    pub fn is_epsilon(&self, rhs: &str) -> bool {
        self.epsilon_spellings.iter().any(|e| e == rhs)
    }
}
