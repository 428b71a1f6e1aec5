//! Splits LookML source into tokens.
//!
//! Trivia (whitespace, line breaks, comments) is emitted as ordinary tokens;
//! the parser decides which neighbouring token each piece is attached to.

mod cursor;
mod syntax_kind;
mod syntax_set;

use cursor::Cursor;
pub use syntax_kind::SyntaxKind;
use syntax_kind::SyntaxKind::*;
pub use syntax_set::SyntaxSet;
use text_size::{TextRange, TextSize};

/// Keys whose values are raw expressions terminated by `;;`.
pub const EXPRESSION_KEYS: &[&str] = &[
    "expression_custom_filter",
    "expression",
    "html",
    "sql_trigger_value",
    "sql_table_name",
    "sql_distinct_key",
    "sql_start",
    "sql_always_having",
    "sql_always_where",
    "sql_trigger",
    "sql_foreign_key",
    "sql_where",
    "sql_end",
    "sql_create",
    "sql",
    "sql_latitude",
    "sql_longitude",
    "sql_step",
    "sql_on",
    "sql_preamble",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Normal,
    /// An expression key was just read; the colon comes next.
    ExpressionKey,
    /// The colon after an expression key was just read.
    Expression,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: Cursor::new(text), state: State::Normal }
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        let len = self.cursor.pos_within_token();
        TextRange::at(end - len, len)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    pub fn next_token(&mut self) -> Token {
        let kind = match self.state {
            State::Expression => {
                self.state = State::Normal;
                self.expression()
            }
            State::Normal | State::ExpressionKey => self.syntax_kind(),
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        Token { kind, range }
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        let after_expression_key = std::mem::replace(&mut self.state, State::Normal);

        match self.cursor.advance() {
            ' ' | '\t' | '\r' | '\n' => self.whitespace(),
            '#' => {
                self.cursor.advance_while(|c| c != '\n');
                COMMENT
            }
            ';' if self.cursor.matches(';') => {
                self.cursor.advance();
                EXPRESSION_END
            }
            '"' => self.quoted_literal(),
            ':' => {
                if after_expression_key == State::ExpressionKey {
                    self.state = State::Expression;
                }
                COLON
            }
            ',' => COMMA,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            _ => {
                self.cursor.advance_while(|c| !is_literal_end(c));
                if self.cursor.matches(':') && EXPRESSION_KEYS.contains(&self.text()) {
                    self.state = State::ExpressionKey;
                }
                LITERAL
            }
        }
    }

    fn whitespace(&mut self) -> SyntaxKind {
        // The first character is already consumed.
        let mut newline = self.text().ends_with('\n');
        if !newline {
            self.cursor.advance_while(|c| matches!(c, ' ' | '\t' | '\r'));
            newline = self.cursor.matches('\n');
        }
        if newline {
            self.cursor.advance_while(|c| c == '\n');
            NEWLINE
        } else {
            WHITESPACE
        }
    }

    fn quoted_literal(&mut self) -> SyntaxKind {
        loop {
            if self.cursor.is_eof() {
                return ERROR;
            }
            match self.cursor.advance() {
                '\\' => {
                    self.cursor.advance();
                }
                '"' => return QUOTED_LITERAL,
                _ => {}
            }
        }
    }

    fn expression(&mut self) -> SyntaxKind {
        match self.cursor.rest().find(";;") {
            Some(len) => {
                let target = self.cursor.rest()[len..].len();
                while self.cursor.rest().len() > target {
                    self.cursor.advance();
                }
                EXPRESSION
            }
            None => {
                self.cursor.advance_while(|_| true);
                ERROR
            }
        }
    }
}

fn is_literal_end(c: char) -> bool {
    matches!(c, '\0' | ' ' | '\n' | '\t' | '\r' | ':' | '}' | '{' | ',' | ']')
}

/// Tokenizes the whole input; the last token is always `EOF`.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        tokens.push(token);
        if token.kind == EOF {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_text(text: &str) -> Vec<(SyntaxKind, &str)> {
        tokenize(text).into_iter().map(|token| (token.kind, &text[token.range])).collect()
    }

    #[test]
    fn pair() {
        assert_eq!(
            kinds_and_text("hidden: yes"),
            vec![
                (LITERAL, "hidden"),
                (COLON, ":"),
                (WHITESPACE, " "),
                (LITERAL, "yes"),
                (EOF, ""),
            ]
        );
    }

    #[test]
    fn newline_includes_preceding_inline_whitespace() {
        assert_eq!(
            kinds_and_text("a \n\n  b"),
            vec![(LITERAL, "a"), (NEWLINE, " \n\n"), (WHITESPACE, "  "), (LITERAL, "b"), (EOF, "")]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            kinds_and_text("# note\nx"),
            vec![(COMMENT, "# note"), (NEWLINE, "\n"), (LITERAL, "x"), (EOF, "")]
        );
    }

    #[test]
    fn quoted_literal_with_escapes() {
        assert_eq!(
            kinds_and_text(r#"label: "a \"b\" c""#),
            vec![
                (LITERAL, "label"),
                (COLON, ":"),
                (WHITESPACE, " "),
                (QUOTED_LITERAL, r#""a \"b\" c""#),
                (EOF, ""),
            ]
        );
    }

    #[test]
    fn unterminated_quoted_literal() {
        assert_eq!(kinds_and_text("\"abc"), vec![(ERROR, "\"abc"), (EOF, "")]);
    }

    #[test]
    fn expression_block() {
        assert_eq!(
            kinds_and_text("sql: ${TABLE}.id ;; # pk"),
            vec![
                (LITERAL, "sql"),
                (COLON, ":"),
                (EXPRESSION, " ${TABLE}.id "),
                (EXPRESSION_END, ";;"),
                (WHITESPACE, " "),
                (COMMENT, "# pk"),
                (EOF, ""),
            ]
        );
    }

    #[test]
    fn expression_spans_lines() {
        assert_eq!(
            kinds_and_text("sql_on: a.id =\n  b.id ;;"),
            vec![
                (LITERAL, "sql_on"),
                (COLON, ":"),
                (EXPRESSION, " a.id =\n  b.id "),
                (EXPRESSION_END, ";;"),
                (EOF, ""),
            ]
        );
    }

    #[test]
    fn expression_key_requires_adjacent_colon() {
        assert_eq!(
            kinds_and_text("sqlx: y"),
            vec![(LITERAL, "sqlx"), (COLON, ":"), (WHITESPACE, " "), (LITERAL, "y"), (EOF, "")]
        );
    }

    #[test]
    fn unterminated_expression() {
        assert_eq!(
            kinds_and_text("sql: select 1"),
            vec![(LITERAL, "sql"), (COLON, ":"), (ERROR, " select 1"), (EOF, "")]
        );
    }

    #[test]
    fn brackets_and_braces() {
        let kinds: Vec<_> =
            tokenize("view: v { fields: [a, b] }").into_iter().map(|token| token.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LITERAL,
                COLON,
                WHITESPACE,
                LITERAL,
                WHITESPACE,
                LEFT_BRACE,
                WHITESPACE,
                LITERAL,
                COLON,
                WHITESPACE,
                LEFT_BRACKET,
                LITERAL,
                COMMA,
                WHITESPACE,
                LITERAL,
                RIGHT_BRACKET,
                WHITESPACE,
                RIGHT_BRACE,
                EOF,
            ]
        );
    }

    #[test]
    fn trivia_kinds() {
        assert!(COMMENT.is_trivia());
        assert!(!LITERAL.is_trivia());
    }
}
