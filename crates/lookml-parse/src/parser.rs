use lookml_errors::Diagnostic;
use lookml_tokenizer::{EXPRESSION_KEYS, SyntaxKind, SyntaxSet, Token, tokenize};
use lookml_tree::{
    BlockNode, Colon, Comma, ContainerNode, DocumentNode, LeftBracket, LeftCurlyBrace, ListItem,
    ListNode, Node, PairNode, RightBracket, RightCurlyBrace, SyntaxToken, Trivia,
};
use text_size::{TextRange, TextSize};

use SyntaxKind::*;

type ParseResult<T> = Result<T, Diagnostic>;

const VALUE_FIRST: SyntaxSet = SyntaxSet::new([LITERAL, QUOTED_LITERAL]);

/// Recursive-descent parser over a pre-tokenized buffer.
///
/// Every trivia token ends up in exactly one prefix or suffix of the tree, so
/// rendering the result reproduces the input.
pub(crate) struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, tokens: tokenize(text), index: 0 }
    }

    fn token(&self) -> Token {
        // `tokenize` always ends with EOF and `bump` never moves past it.
        self.tokens[self.index]
    }

    fn peek_kind(&self) -> SyntaxKind {
        self.token().kind
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    /// Kind of the first non-trivia token at or after `index`.
    fn lookahead(&self, index: usize) -> SyntaxKind {
        self.tokens[index..]
            .iter()
            .find(|token| !token.kind.is_trivia())
            .map_or(EOF, |token| token.kind)
    }

    fn text_of(&self, token: Token) -> &'a str {
        &self.text[token.range]
    }

    fn bump(&mut self) -> Token {
        let token = self.token();
        if token.kind != EOF {
            self.index += 1;
        }
        token
    }

    fn trivia(&mut self) -> String {
        let mut out = String::new();
        while SyntaxSet::TRIVIA.contains(self.peek_kind()) {
            let token = self.bump();
            out.push_str(self.text_of(token));
        }
        out
    }

    /// A comment on the same line as the value before it.
    fn trailing_comment(&mut self) -> String {
        let start = self.index;
        let mut out = String::new();
        if self.at(WHITESPACE) {
            let token = self.bump();
            out.push_str(self.text_of(token));
        }
        if self.at(COMMENT) {
            let token = self.bump();
            out.push_str(self.text_of(token));
            out
        } else {
            self.index = start;
            String::new()
        }
    }

    fn unexpected(&self, expected: &str) -> Diagnostic {
        let token = self.token();
        let found = match token.kind {
            EOF => "end of file".to_owned(),
            NEWLINE => "line break".to_owned(),
            _ => format!("`{}`", self.text_of(token)),
        };
        Diagnostic::error(format!("{expected}, found {found}"), token.range)
    }

    fn expect(&mut self, kind: SyntaxKind, expected: &str) -> ParseResult<Token> {
        if self.at(kind) { Ok(self.bump()) } else { Err(self.unexpected(expected)) }
    }

    pub(crate) fn document(mut self) -> ParseResult<DocumentNode> {
        let prefix = self.trivia();
        let container = self.container()?;
        let suffix = self.trivia();

        match self.peek_kind() {
            EOF => Ok(DocumentNode::new(prefix, container, suffix)),
            RIGHT_BRACE => {
                Err(Diagnostic::error("unexpected `}` outside of a block", self.token().range))
            }
            _ => Err(self.unexpected("expected a key")),
        }
    }

    fn container(&mut self) -> ParseResult<ContainerNode> {
        let mut items = Vec::new();
        loop {
            let start = self.index;
            let prefix = self.trivia();
            if !self.at(LITERAL) {
                self.index = start;
                return Ok(ContainerNode::new(items));
            }
            items.push(self.item(prefix)?);
        }
    }

    fn item(&mut self, prefix: String) -> ParseResult<Node> {
        let key = self.bump();
        let key_text = self.text_of(key);
        let key_suffix = self.trivia();
        // The tokenizer only switches to expression mode when `:` follows the key directly.
        let expression_key = key_suffix.is_empty() && EXPRESSION_KEYS.contains(&key_text);
        let key = SyntaxToken::new(key_text).with_trivia(Trivia::new(prefix, key_suffix));

        self.expect(COLON, "expected `:` after key")?;
        let colon_suffix = self.trivia();

        match self.peek_kind() {
            LEFT_BRACKET => {
                let colon = Colon::new(Trivia::suffix(colon_suffix));
                self.list(key, colon).map(Node::from)
            }
            LEFT_BRACE => {
                let colon = Colon::new(Trivia::suffix(colon_suffix));
                self.block(key, colon, None).map(Node::from)
            }
            LITERAL if self.lookahead(self.index + 1) == LEFT_BRACE => {
                let colon = Colon::new(Trivia::suffix(colon_suffix));
                let name = self.bump();
                let name = SyntaxToken::new(self.text_of(name));
                self.block(key, colon, Some(name)).map(Node::from)
            }
            _ => {
                let (colon, value) = self.value(expression_key, colon_suffix)?;
                Ok(PairNode::new(key, value).with_colon(colon).into())
            }
        }
    }

    /// Parses the value of a pair, returning the colon because an expression
    /// moves its leading whitespace there.
    fn value(
        &mut self,
        expression_key: bool,
        colon_suffix: String,
    ) -> ParseResult<(Colon, SyntaxToken)> {
        let token = self.token();
        let (colon_suffix, value) = match token.kind {
            LITERAL | QUOTED_LITERAL => (colon_suffix, self.literal()),
            EXPRESSION => {
                self.bump();
                let raw = self.text_of(token);
                let rest = raw.trim_start();
                let lead = &raw[..raw.len() - rest.len()];
                let value = rest.trim_end();
                let expr_suffix = &rest[value.len()..];
                self.expect(EXPRESSION_END, "expected `;;`")?;
                let value = SyntaxToken::expression_with(value, "", expr_suffix);
                (format!("{colon_suffix}{lead}"), value)
            }
            ERROR => return Err(self.unterminated(expression_key && colon_suffix.is_empty())),
            _ => return Err(self.unexpected("expected a value")),
        };

        let value = value.with_suffix(self.trailing_comment());
        Ok((Colon::new(Trivia::suffix(colon_suffix)), value))
    }

    fn literal(&mut self) -> SyntaxToken {
        let token = self.bump();
        let text = self.text_of(token);
        if token.kind == QUOTED_LITERAL {
            SyntaxToken::quoted(unescape(&text[1..text.len() - 1]))
        } else {
            SyntaxToken::new(text)
        }
    }

    fn unterminated(&self, expression: bool) -> Diagnostic {
        let token = self.token();
        let text = self.text_of(token);
        let line = text.find('\n').unwrap_or(text.len());
        let range = TextRange::at(token.range.start(), TextSize::new(line as u32));
        if expression {
            Diagnostic::error("unterminated expression, expected `;;`", range)
        } else {
            Diagnostic::error("unterminated string literal", range)
        }
    }

    fn block(
        &mut self,
        key: SyntaxToken,
        colon: Colon,
        name: Option<SyntaxToken>,
    ) -> ParseResult<BlockNode> {
        let left_prefix = self.trivia();
        self.expect(LEFT_BRACE, "expected `{`")?;
        let container = self.container()?;
        let right_prefix = self.trivia();
        self.expect(RIGHT_BRACE, "expected a key or `}`")?;

        Ok(BlockNode::new(key, name, container).with_colon(colon).with_braces(
            LeftCurlyBrace::new(Trivia::prefix(left_prefix)),
            RightCurlyBrace::new(Trivia::prefix(right_prefix)),
        ))
    }

    fn list(&mut self, key: SyntaxToken, colon: Colon) -> ParseResult<ListNode> {
        self.bump();

        let start = self.index;
        let prefix = self.trivia();
        let leading_comma = if self.at(COMMA) {
            self.bump();
            Some(Comma::new(Trivia::prefix(prefix)))
        } else {
            self.index = start;
            None
        };

        let mut items: Vec<ListItem> = Vec::new();
        let mut trailing_comma = None;
        let right_prefix = loop {
            let prefix = self.trivia();
            if self.at(RIGHT_BRACKET) {
                if items.is_empty() && leading_comma.is_some() {
                    return Err(self.unexpected("expected a list item"));
                }
                break prefix;
            }

            let range = self.token().range;
            let item = self.list_item(prefix)?;
            let is_pair = |item: &ListItem| matches!(item, ListItem::Pair(_));
            if items.first().is_some_and(|first| is_pair(first) != is_pair(&item)) {
                return Err(Diagnostic::error("lists cannot mix pairs and values", range));
            }
            items.push(item);

            match self.peek_kind() {
                COMMA => {
                    self.bump();
                    let start = self.index;
                    let prefix = self.trivia();
                    if self.at(RIGHT_BRACKET) {
                        trailing_comma = Some(Comma::default());
                        break prefix;
                    }
                    self.index = start;
                }
                RIGHT_BRACKET => break String::new(),
                kind if VALUE_FIRST.contains(kind) => {
                    return Err(Diagnostic::error(
                        "expected `,` between list items",
                        self.token().range,
                    ));
                }
                _ => return Err(self.unexpected("expected `,` or `]`")),
            }
        };
        self.bump();

        Ok(ListNode::new(key, items)
            .with_colon(colon)
            .with_brackets(LeftBracket::default(), RightBracket::new(Trivia::prefix(right_prefix)))
            .with_leading_comma(leading_comma)
            .with_trailing_comma(trailing_comma))
    }

    /// A bare or quoted value, or a `key: value` pair; trailing trivia up to the
    /// next `,` or `]` becomes the item's suffix.
    fn list_item(&mut self, prefix: String) -> ParseResult<ListItem> {
        match self.peek_kind() {
            LITERAL if self.lookahead(self.index + 1) == COLON => {
                let key = self.bump();
                let key_text = self.text_of(key);
                let key_suffix = self.trivia();
                let expression_key = key_suffix.is_empty() && EXPRESSION_KEYS.contains(&key_text);
                let key = SyntaxToken::new(key_text).with_trivia(Trivia::new(prefix, key_suffix));

                self.bump();
                let colon_suffix = self.trivia();
                if self.at(EXPRESSION) || (expression_key && self.at(ERROR)) {
                    return Err(Diagnostic::error(
                        "expression blocks are not allowed in lists",
                        self.token().range,
                    ));
                }
                let (colon, value) = self.value(false, colon_suffix)?;
                let suffix = format!("{}{}", value.suffix(), self.trivia());
                Ok(PairNode::new(key, value.with_suffix(suffix)).with_colon(colon).into())
            }
            kind if VALUE_FIRST.contains(kind) => {
                let value = self.literal().with_prefix(prefix);
                let suffix = self.trivia();
                Ok(value.with_suffix(suffix).into())
            }
            ERROR => Err(self.unterminated(false)),
            _ => Err(self.unexpected("expected a list item")),
        }
    }
}

/// Undoes the `\"` and `\\` escapes of a quoted literal; other backslash
/// sequences are kept as written.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
