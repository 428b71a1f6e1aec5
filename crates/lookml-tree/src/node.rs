//! Structural nodes.
//!
//! Nodes are immutable once built. The `with_*` methods consume the node and
//! return a new one, which is how callers attach separators after the fact.

use std::fmt;

use crate::{
    Colon, Comma, LeftBracket, LeftCurlyBrace, LookMlVisitor, RightBracket, RightCurlyBrace,
    SyntaxToken, Visitor,
};

/// A `key: value` pair, e.g. `hidden: yes`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PairNode {
    key: SyntaxToken,
    colon: Colon,
    value: SyntaxToken,
}

impl PairNode {
    pub fn new(key: SyntaxToken, value: SyntaxToken) -> Self {
        Self { key, colon: Colon::default(), value }
    }

    pub fn with_colon(mut self, colon: Colon) -> Self {
        self.colon = colon;
        self
    }

    /// Replaces the leading trivia of the key.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key = self.key.with_prefix(prefix);
        self
    }

    pub fn key(&self) -> &SyntaxToken {
        &self.key
    }

    pub fn colon(&self) -> &Colon {
        &self.colon
    }

    pub fn value(&self) -> &SyntaxToken {
        &self.value
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_pair(self)
    }
}

/// An element of a [`ListNode`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ListItem {
    Token(SyntaxToken),
    Pair(PairNode),
}

impl ListItem {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Token(token) => token.accept(visitor),
            Self::Pair(pair) => pair.accept(visitor),
        }
    }
}

impl From<SyntaxToken> for ListItem {
    fn from(token: SyntaxToken) -> Self {
        Self::Token(token)
    }
}

impl From<PairNode> for ListItem {
    fn from(pair: PairNode) -> Self {
        Self::Pair(pair)
    }
}

/// A bracketed list, e.g. `fields: [a, b]` or `filters: [a: "1", b: "2"]`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ListNode {
    key: SyntaxToken,
    colon: Colon,
    left_bracket: LeftBracket,
    leading_comma: Option<Comma>,
    items: Vec<ListItem>,
    trailing_comma: Option<Comma>,
    right_bracket: RightBracket,
}

impl ListNode {
    pub fn new(key: SyntaxToken, items: Vec<ListItem>) -> Self {
        Self {
            key,
            colon: Colon::default(),
            left_bracket: LeftBracket::default(),
            leading_comma: None,
            items,
            trailing_comma: None,
            right_bracket: RightBracket::default(),
        }
    }

    pub fn with_colon(mut self, colon: Colon) -> Self {
        self.colon = colon;
        self
    }

    pub fn with_brackets(mut self, left: LeftBracket, right: RightBracket) -> Self {
        self.left_bracket = left;
        self.right_bracket = right;
        self
    }

    pub fn with_leading_comma(mut self, comma: Option<Comma>) -> Self {
        self.leading_comma = comma;
        self
    }

    pub fn with_trailing_comma(mut self, comma: Option<Comma>) -> Self {
        self.trailing_comma = comma;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key = self.key.with_prefix(prefix);
        self
    }

    pub fn key(&self) -> &SyntaxToken {
        &self.key
    }

    pub fn colon(&self) -> &Colon {
        &self.colon
    }

    pub fn left_bracket(&self) -> &LeftBracket {
        &self.left_bracket
    }

    pub fn leading_comma(&self) -> Option<&Comma> {
        self.leading_comma.as_ref()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn trailing_comma(&self) -> Option<&Comma> {
        self.trailing_comma.as_ref()
    }

    pub fn right_bracket(&self) -> &RightBracket {
        &self.right_bracket
    }

    /// Returns the pair items, the only items that carry structure.
    pub fn children(&self) -> impl Iterator<Item = &PairNode> {
        self.items.iter().filter_map(|item| match item {
            ListItem::Pair(pair) => Some(pair),
            ListItem::Token(_) => None,
        })
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_list(self)
    }
}

/// A braced block, e.g. `dimension: id { ... }`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BlockNode {
    key: SyntaxToken,
    colon: Colon,
    name: Option<SyntaxToken>,
    left_brace: LeftCurlyBrace,
    container: ContainerNode,
    right_brace: RightCurlyBrace,
}

impl BlockNode {
    pub fn new(key: SyntaxToken, name: Option<SyntaxToken>, container: ContainerNode) -> Self {
        Self {
            key,
            colon: Colon::default(),
            name,
            left_brace: LeftCurlyBrace::default(),
            container,
            right_brace: RightCurlyBrace::default(),
        }
    }

    pub fn with_colon(mut self, colon: Colon) -> Self {
        self.colon = colon;
        self
    }

    pub fn with_braces(mut self, left: LeftCurlyBrace, right: RightCurlyBrace) -> Self {
        self.left_brace = left;
        self.right_brace = right;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key = self.key.with_prefix(prefix);
        self
    }

    pub fn key(&self) -> &SyntaxToken {
        &self.key
    }

    pub fn colon(&self) -> &Colon {
        &self.colon
    }

    pub fn name(&self) -> Option<&SyntaxToken> {
        self.name.as_ref()
    }

    pub fn left_brace(&self) -> &LeftCurlyBrace {
        &self.left_brace
    }

    pub fn container(&self) -> &ContainerNode {
        &self.container
    }

    pub fn right_brace(&self) -> &RightCurlyBrace {
        &self.right_brace
    }

    pub fn children(&self) -> &[Node] {
        self.container.items()
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_block(self)
    }
}

/// Any declaration that can appear inside a container.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Node {
    Pair(PairNode),
    List(ListNode),
    Block(BlockNode),
}

impl Node {
    pub fn key(&self) -> &SyntaxToken {
        match self {
            Self::Pair(pair) => pair.key(),
            Self::List(list) => list.key(),
            Self::Block(block) => block.key(),
        }
    }

    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        match self {
            Self::Pair(pair) => Self::Pair(pair.with_prefix(prefix)),
            Self::List(list) => Self::List(list.with_prefix(prefix)),
            Self::Block(block) => Self::Block(block.with_prefix(prefix)),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Pair(pair) => pair.accept(visitor),
            Self::List(list) => list.accept(visitor),
            Self::Block(block) => block.accept(visitor),
        }
    }
}

impl From<PairNode> for Node {
    fn from(pair: PairNode) -> Self {
        Self::Pair(pair)
    }
}

impl From<ListNode> for Node {
    fn from(list: ListNode) -> Self {
        Self::List(list)
    }
}

impl From<BlockNode> for Node {
    fn from(block: BlockNode) -> Self {
        Self::Block(block)
    }
}

/// An ordered sequence of sibling declarations, top-level or inside a block.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ContainerNode {
    items: Vec<Node>,
}

impl ContainerNode {
    pub fn new(items: Vec<Node>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Node> {
        self.items
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_container(self)
    }
}

/// The root of a tree parsed from text, keeping the file's leading and
/// trailing trivia.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DocumentNode {
    prefix: String,
    container: ContainerNode,
    suffix: String,
}

impl DocumentNode {
    pub fn new(
        prefix: impl Into<String>,
        container: ContainerNode,
        suffix: impl Into<String>,
    ) -> Self {
        Self { prefix: prefix.into(), container, suffix: suffix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn container(&self) -> &ContainerNode {
        &self.container
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn into_container(self) -> ContainerNode {
        self.container
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_document(self)
    }
}

impl From<ContainerNode> for DocumentNode {
    fn from(container: ContainerNode) -> Self {
        Self::new("", container, "")
    }
}

macro_rules! display_via_visitor {
    ($($ty:ty),* $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.accept(&mut LookMlVisitor))
            }
        }
    )*};
}

display_via_visitor!(PairNode, ListItem, ListNode, BlockNode, Node, ContainerNode, DocumentNode);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trivia;

    #[test]
    fn pair() {
        let node = PairNode::new(SyntaxToken::new("foo"), SyntaxToken::new("bar"));
        assert_eq!(node.to_string(), "foo: bar");

        let node =
            PairNode::new(SyntaxToken::new("foo").with_suffix(" "), SyntaxToken::new("bar"));
        assert_eq!(node.to_string(), "foo : bar");
    }

    #[test]
    fn list_of_pairs() {
        let node = ListNode::new(
            SyntaxToken::new("filters"),
            vec![
                PairNode::new(SyntaxToken::new("created_date"), SyntaxToken::quoted("7 days"))
                    .into(),
                PairNode::new(
                    SyntaxToken::new("user.status").with_prefix(" "),
                    SyntaxToken::quoted("-disabled"),
                )
                .into(),
            ],
        );
        assert_eq!(node.to_string(), r#"filters: [created_date: "7 days", user.status: "-disabled"]"#);
        assert_eq!(node.children().count(), 2);
    }

    #[test]
    fn list_of_tokens() {
        let node = ListNode::new(
            SyntaxToken::new("fields"),
            vec![
                SyntaxToken::new("user.user_id").with_prefix("\n  ").into(),
                SyntaxToken::new("user.age").with_trivia(Trivia::new("\n  ", "\n")).into(),
            ],
        );
        assert_eq!(node.to_string(), "fields: [\n  user.user_id,\n  user.age\n]");
        assert_eq!(node.children().count(), 0);
    }

    #[test]
    fn empty_list_ignores_commas() {
        let node = ListNode::new(SyntaxToken::new("fields"), Vec::new())
            .with_trailing_comma(Some(Comma::default()));
        assert_eq!(node.to_string(), "fields: []");
    }

    #[test]
    fn list_with_trailing_comma() {
        let node = ListNode::new(
            SyntaxToken::new("fields"),
            vec![SyntaxToken::new("a").with_prefix("\n  ").into()],
        )
        .with_trailing_comma(Some(Comma::default()))
        .with_brackets(LeftBracket::default(), RightBracket::new(Trivia::prefix("\n")));
        assert_eq!(node.to_string(), "fields: [\n  a,\n]");
    }

    #[test]
    fn block() {
        let list = ListNode::new(
            SyntaxToken::new("fields"),
            vec![
                SyntaxToken::new("user.user_id").into(),
                SyntaxToken::new("user.age").with_prefix(" ").into(),
            ],
        );
        let node = BlockNode::new(
            SyntaxToken::new("set"),
            Some(SyntaxToken::new("user_dimensions")),
            ContainerNode::new(vec![list.into()]),
        )
        .with_braces(
            LeftCurlyBrace::new(Trivia::new(" ", " ")),
            RightCurlyBrace::new(Trivia::prefix(" ")),
        );
        assert_eq!(node.to_string(), "set: user_dimensions { fields: [user.user_id, user.age] }");

        let empty = BlockNode::new(
            SyntaxToken::new("set"),
            Some(SyntaxToken::new("foo")),
            ContainerNode::default(),
        )
        .with_braces(LeftCurlyBrace::new(Trivia::prefix(" ")), RightCurlyBrace::default());
        assert_eq!(empty.to_string(), "set: foo {}");
    }

    #[test]
    fn container_concatenates_without_separators() {
        let container = ContainerNode::new(vec![
            PairNode::new(SyntaxToken::new("hidden"), SyntaxToken::new("true")).into(),
            BlockNode::new(
                SyntaxToken::new("set").with_prefix(" "),
                Some(SyntaxToken::new("foo")),
                ContainerNode::default(),
            )
            .with_braces(LeftCurlyBrace::new(Trivia::prefix(" ")), RightCurlyBrace::default())
            .into(),
            ListNode::new(SyntaxToken::new("fields").with_prefix(" "), Vec::new()).into(),
        ]);
        assert_eq!(container.to_string(), "hidden: true set: foo {} fields: []");
    }

    #[test]
    fn with_prefix_replaces_key_trivia() {
        let node: Node = PairNode::new(SyntaxToken::new("a"), SyntaxToken::new("b")).into();
        let node = node.with_prefix("\n\n");
        assert_eq!(node.to_string(), "\n\na: b");
        assert_eq!(node.key().value(), "a");
    }

    #[test]
    fn document_keeps_file_trivia() {
        let container = ContainerNode::new(vec![
            PairNode::new(SyntaxToken::new("a"), SyntaxToken::new("b")).into(),
        ]);
        let document = DocumentNode::new("# header\n", container, "\n");
        assert_eq!(document.to_string(), "# header\na: b\n");
    }
}
