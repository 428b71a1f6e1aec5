//! Trivia attached to tokens.

/// Whitespace and comments rendered immediately around a token.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Trivia {
    pub prefix: String,
    pub suffix: String,
}

impl Trivia {
    /// Creates trivia with both sides set.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    /// Creates trivia rendered only before the token.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: String::new() }
    }

    /// Creates trivia rendered only after the token.
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self { prefix: String::new(), suffix: suffix.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}
