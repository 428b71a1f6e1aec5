#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    WHITESPACE,
    /// Inline whitespace followed by one or more line breaks.
    NEWLINE,
    COMMENT,

    LITERAL,
    QUOTED_LITERAL,
    /// Raw text between `<key>:` and `;;` for expression keys.
    EXPRESSION,
    EXPRESSION_END,

    COLON,
    COMMA,
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_BRACKET,
    RIGHT_BRACKET,

    /// An unterminated string or expression running to the end of input.
    ERROR,
    EOF,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }
}
