//! Leaf tokens and punctuation.

use std::fmt;

use crate::{LookMlVisitor, Trivia, Visitor};

/// How a token's value is written between its trivia.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TokenStyle {
    /// Written verbatim: identifiers, numbers, `yes`/`no`.
    Bare,
    /// Wrapped in double quotes with `\` and `"` escaped.
    Quoted,
    /// Raw expression text terminated by `;;`.
    ///
    /// `expr_prefix` and `expr_suffix` sit between the value and the trivia on
    /// each side, so `sql: ${TABLE}.id ;;` keeps the space before `;;`.
    Expression { expr_prefix: String, expr_suffix: String },
}

/// A literal value together with its surrounding trivia.
///
/// The three constructors correspond to the DSL's literal forms: bare
/// ([`SyntaxToken::new`]), quoted ([`SyntaxToken::quoted`]) and expression
/// blocks ([`SyntaxToken::expression`]).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SyntaxToken {
    value: String,
    trivia: Trivia,
    style: TokenStyle,
}

impl SyntaxToken {
    /// Creates a bare token.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), trivia: Trivia::default(), style: TokenStyle::Bare }
    }

    /// Creates a quoted string token.
    pub fn quoted(value: impl Into<String>) -> Self {
        Self { value: value.into(), trivia: Trivia::default(), style: TokenStyle::Quoted }
    }

    /// Creates an expression token with empty inner trivia.
    pub fn expression(value: impl Into<String>) -> Self {
        Self::expression_with(value, "", "")
    }

    /// Creates an expression token, keeping the text between the colon and
    /// the value (`expr_prefix`) and between the value and `;;` (`expr_suffix`).
    pub fn expression_with(
        value: impl Into<String>,
        expr_prefix: impl Into<String>,
        expr_suffix: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            trivia: Trivia::default(),
            style: TokenStyle::Expression {
                expr_prefix: expr_prefix.into(),
                expr_suffix: expr_suffix.into(),
            },
        }
    }

    pub fn with_trivia(mut self, trivia: Trivia) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trivia.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.trivia.suffix = suffix.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trivia(&self) -> &Trivia {
        &self.trivia
    }

    pub fn prefix(&self) -> &str {
        &self.trivia.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.trivia.suffix
    }

    pub fn style(&self) -> &TokenStyle {
        &self.style
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self.style, TokenStyle::Quoted)
    }

    pub fn is_expression(&self) -> bool {
        matches!(self.style, TokenStyle::Expression { .. })
    }

    /// Returns the token's core text, without trivia.
    pub fn format_value(&self) -> String {
        match &self.style {
            TokenStyle::Bare => self.value.clone(),
            TokenStyle::Quoted => {
                // Backslashes first, otherwise the escapes added for quotes get doubled.
                let escaped = self.value.replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{escaped}\"")
            }
            TokenStyle::Expression { expr_prefix, expr_suffix } => {
                format!("{expr_prefix}{}{expr_suffix};;", self.value)
            }
        }
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_token(self)
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accept(&mut LookMlVisitor))
    }
}

macro_rules! punct {
    ($($(#[$meta:meta])* $name:ident => $text:literal),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $name {
            trivia: Trivia,
        }

        impl $name {
            pub const TEXT: &'static str = $text;

            pub fn new(trivia: Trivia) -> Self {
                Self { trivia }
            }

            pub fn trivia(&self) -> &Trivia {
                &self.trivia
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}{}", self.trivia.prefix, Self::TEXT, self.trivia.suffix)
            }
        }
    )*};
}

punct! {
    /// `,` between list items.
    Comma => ",",
    /// `[` opening a list.
    LeftBracket => "[",
    /// `]` closing a list.
    RightBracket => "]",
    /// `{` opening a block.
    LeftCurlyBrace => "{",
    /// `}` closing a block.
    RightCurlyBrace => "}",
}

/// `:` after a key.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Colon {
    trivia: Trivia,
}

impl Colon {
    pub const TEXT: &'static str = ":";

    pub fn new(trivia: Trivia) -> Self {
        Self { trivia }
    }

    pub fn trivia(&self) -> &Trivia {
        &self.trivia
    }
}

impl Default for Colon {
    fn default() -> Self {
        Self { trivia: Trivia::suffix(" ") }
    }
}

impl fmt::Display for Colon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.trivia.prefix, Self::TEXT, self.trivia.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_quoted_tokens() {
        assert_eq!(SyntaxToken::new("foo").to_string(), "foo");
        assert_eq!(SyntaxToken::quoted("foo").to_string(), "\"foo\"");
        assert_eq!(SyntaxToken::quoted("").to_string(), "\"\"");
    }

    #[test]
    fn quoted_token_escapes_quotes() {
        let token = SyntaxToken::quoted("This is the \"best\" dimension");
        assert_eq!(token.format_value(), r#""This is the \"best\" dimension""#);
    }

    #[test]
    fn quoted_token_escapes_backslash_before_quote() {
        let token = SyntaxToken::quoted(r#"a\"b"#);
        assert_eq!(token.format_value(), r#""a\\\"b""#);
    }

    #[test]
    fn expression_token_keeps_inner_and_outer_trivia() {
        let token = SyntaxToken::expression_with("SELECT * FROM orders", "", " ")
            .with_trivia(Trivia::new(" ", " # A comment"));
        assert_eq!(token.to_string(), " SELECT * FROM orders ;; # A comment");
    }

    #[test]
    fn expression_token_always_terminates() {
        assert_eq!(SyntaxToken::expression("1").to_string(), "1;;");
    }

    #[test]
    fn token_trivia() {
        let token = SyntaxToken::new("foo").with_prefix("# Skip this\n  ");
        assert_eq!(token.to_string(), "# Skip this\n  foo");

        let token = SyntaxToken::new("foo").with_suffix("\n# Skip this\n  ");
        assert_eq!(token.to_string(), "foo\n# Skip this\n  ");

        let token = SyntaxToken::new("foo").with_trivia(Trivia::new("\n\t", "\t\n"));
        assert_eq!(token.to_string(), "\n\tfoo\t\n");
    }

    #[test]
    fn punctuation() {
        assert_eq!(Colon::default().to_string(), ": ");
        assert_eq!(LeftCurlyBrace::new(Trivia::prefix(" ")).to_string(), " {");
        assert_eq!(RightBracket::default().to_string(), "]");
    }
}
