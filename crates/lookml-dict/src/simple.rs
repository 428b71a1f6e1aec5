//! Compiles application data into DSL nodes.

use lookml_tree::{
    BlockNode, Comma, ContainerNode, LeftBracket, LeftCurlyBrace, ListItem, ListNode, Node,
    PairNode, RightBracket, RightCurlyBrace, SyntaxToken, Trivia,
};
use tracing::trace;

use crate::keys::{KeyTable, LiteralKind, needs_quotes};
use crate::value::{Mapping, Value};
use crate::{DictError, to_dsl_key};

/// Layout settings for generated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictParserConfig {
    /// One level of indentation.
    pub indent: String,
    /// Lists with at most this many value items stay on one line.
    pub list_inline_max: usize,
}

impl Default for DictParserConfig {
    fn default() -> Self {
        Self { indent: "  ".to_owned(), list_inline_max: 4 }
    }
}

/// Where a node is being built: its nesting depth and the key of the
/// enclosing block.
#[derive(Clone, Copy, Debug)]
struct Scope<'a> {
    level: usize,
    parent: Option<&'a str>,
}

impl<'a> Scope<'a> {
    const ROOT: Self = Self { level: 0, parent: None };

    fn child(self, parent: &'a str) -> Self {
        Self { level: self.level + 1, parent: Some(parent) }
    }
}

/// Turns decoded application data into nodes whose rendering is formatted
/// LookML.
///
/// The helpers mirror the node kinds. Each returns a node without leading
/// trivia; containers add the line breaks and indentation between siblings.
#[derive(Clone, Debug)]
pub struct DictParser {
    config: DictParserConfig,
    keys: KeyTable,
}

impl Default for DictParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DictParser {
    pub fn new() -> Self {
        Self::with_config(DictParserConfig::default())
    }

    pub fn with_config(config: DictParserConfig) -> Self {
        Self { config, keys: KeyTable::lookml() }
    }

    pub fn with_keys(mut self, keys: KeyTable) -> Self {
        self.keys = keys;
        self
    }

    pub fn config(&self) -> &DictParserConfig {
        &self.config
    }

    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    /// Compiles a top-level mapping into a container of declarations.
    pub fn parse(&self, mapping: &Mapping) -> Result<ContainerNode, DictError> {
        self.container(mapping, Scope::ROOT)
    }

    /// Renders a scalar according to the literal kind of `key`.
    pub fn parse_token(&self, key: &str, value: &Value) -> Result<SyntaxToken, DictError> {
        let unsupported = |expected: &'static str| DictError::UnsupportedValue {
            key: key.to_owned(),
            expected,
            found: value.type_name(),
        };

        let kind = match value {
            Value::String(text) => self.keys.literal_kind_of(key, text),
            Value::Number(_) | Value::Bool(_) => match self.keys.kind_of(key) {
                Some(LiteralKind::Expression) => return Err(unsupported("string")),
                Some(LiteralKind::Quoted) => LiteralKind::Quoted,
                _ => LiteralKind::Bare,
            },
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => {
                return Err(unsupported("scalar"));
            }
        };
        let text = value.scalar_text().ok_or_else(|| unsupported("scalar"))?;

        Ok(match kind {
            LiteralKind::Bare | LiteralKind::Number if needs_quotes(&text) => {
                SyntaxToken::quoted(text)
            }
            LiteralKind::Bare | LiteralKind::Number => SyntaxToken::new(text),
            LiteralKind::Quoted => SyntaxToken::quoted(text),
            LiteralKind::Expression if text.contains(";;") => {
                return Err(unsupported("expression without `;;`"));
            }
            LiteralKind::Expression => SyntaxToken::expression_with(text.trim(), "", " "),
        })
    }

    pub fn parse_pair(&self, key: &str, value: &Value) -> Result<PairNode, DictError> {
        Ok(PairNode::new(SyntaxToken::new(key), self.parse_token(key, value)?))
    }

    pub fn parse_list(&self, key: &str, values: &[Value]) -> Result<ListNode, DictError> {
        self.list(key, values, Scope::ROOT)
    }

    /// Builds a block from `items`, normalizing every member key.
    pub fn parse_block(
        &self,
        key: &str,
        items: &Mapping,
        name: Option<&str>,
    ) -> Result<BlockNode, DictError> {
        self.block(key, items, name, Scope::ROOT)
    }

    /// Dispatches on the shape of `value`: scalars become pairs, sequences
    /// lists and mappings blocks.
    pub fn parse_any(&self, key: &str, value: &Value) -> Result<Node, DictError> {
        self.any(key, value, Scope::ROOT)
    }

    /// Writes each element of `values` as its own declaration keyed by the
    /// singular form of `key`.
    pub fn expand_list(&self, key: &str, values: &[Value]) -> Result<Vec<Node>, DictError> {
        self.expand(key, values, Scope::ROOT)
    }

    /// Writes a `filters` array in whichever of the three filter shapes its
    /// elements share.
    pub fn resolve_filters(&self, values: &[Value]) -> Result<Vec<Node>, DictError> {
        self.filters(values, Scope::ROOT)
    }

    fn indent(&self, level: usize) -> String {
        self.config.indent.repeat(level)
    }

    fn container(&self, mapping: &Mapping, scope: Scope<'_>) -> Result<ContainerNode, DictError> {
        let mut nodes = Vec::new();
        for (key, value) in mapping {
            let key = to_dsl_key(key);
            nodes.extend(self.member(&key, value, scope)?);
        }
        Ok(self.assemble(nodes, scope.level))
    }

    /// Puts every node on its own line and a blank line before each block
    /// that follows another declaration.
    fn assemble(&self, nodes: Vec<Node>, level: usize) -> ContainerNode {
        let indent = self.indent(level);
        let nested = level > 0;
        let items = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let lead = match (index, node.is_block()) {
                    (0, _) if !nested => String::new(),
                    (0, _) => format!("\n{indent}"),
                    (_, true) => format!("\n\n{indent}"),
                    (_, false) => format!("\n{indent}"),
                };
                node.with_prefix(lead)
            })
            .collect();
        ContainerNode::new(items)
    }

    /// A member of a container: arrays under plural keys, and arrays of
    /// mappings other than pair lists, are expanded into repeated
    /// declarations.
    fn member(&self, key: &str, value: &Value, scope: Scope<'_>) -> Result<Vec<Node>, DictError> {
        match value {
            Value::Sequence(values) if self.expands(key, values, scope) => {
                self.expand(key, values, scope)
            }
            _ => Ok(vec![self.any(key, value, scope)?]),
        }
    }

    fn expands(&self, key: &str, values: &[Value], scope: Scope<'_>) -> bool {
        if values.is_empty() {
            return false;
        }
        let singular = self.keys.singular_of(key);
        let repeated =
            self.keys.is_plural(key) && !self.keys.is_list_context(scope.parent, singular);
        let blocks = values.iter().any(Value::is_mapping) && !is_pair_list(values);
        let expands = repeated || blocks;
        trace!(key, parent = scope.parent, expands, "array dispatch");
        expands
    }

    fn any(&self, key: &str, value: &Value, scope: Scope<'_>) -> Result<Node, DictError> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                self.parse_pair(key, value).map(Node::from)
            }
            Value::Sequence(values) => self.list(key, values, scope).map(Node::from),
            Value::Mapping(mapping) => {
                let name = self.block_name(key, mapping);
                self.block(key, mapping, name, scope).map(Node::from)
            }
            Value::Null => Err(DictError::UnsupportedValue {
                key: key.to_owned(),
                expected: "scalar, sequence or mapping",
                found: value.type_name(),
            }),
        }
    }

    /// The `name` member of a mapping, unless `key` treats `name` as a field.
    fn block_name<'v>(&self, key: &str, mapping: &'v Mapping) -> Option<&'v str> {
        if self.keys.is_named_key(key) {
            return None;
        }
        mapping.get("name").and_then(Value::as_str)
    }

    fn block(
        &self,
        key: &str,
        items: &Mapping,
        name: Option<&str>,
        scope: Scope<'_>,
    ) -> Result<BlockNode, DictError> {
        if name.is_some_and(needs_quotes) {
            return Err(DictError::UnsupportedValue {
                key: key.to_owned(),
                expected: "block name without whitespace or punctuation",
                found: "string",
            });
        }

        let child = scope.child(key);
        let mut nodes = Vec::new();
        for (member, value) in items {
            if name.is_some() && member == "name" {
                continue;
            }
            let member = to_dsl_key(member);
            nodes.extend(self.member(&member, value, child)?);
        }
        let container = self.assemble(nodes, child.level);

        let left = if name.is_some() { " " } else { "" };
        let right = if container.is_empty() {
            String::new()
        } else {
            format!("\n{}", self.indent(scope.level))
        };

        Ok(BlockNode::new(SyntaxToken::new(key), name.map(SyntaxToken::new), container)
            .with_braces(
                LeftCurlyBrace::new(Trivia::prefix(left)),
                RightCurlyBrace::new(Trivia::prefix(right)),
            ))
    }

    fn list(&self, key: &str, values: &[Value], scope: Scope<'_>) -> Result<ListNode, DictError> {
        if values.iter().any(Value::is_mapping) {
            let items = self.pair_items(key, values)?;
            return Ok(self.multiline_list(key, items, scope));
        }

        let tokens =
            values.iter().map(|value| self.parse_token(key, value)).collect::<Result<Vec<_>, _>>()?;

        if tokens.len() > self.config.list_inline_max {
            let items = tokens.into_iter().map(ListItem::from).collect();
            return Ok(self.multiline_list(key, items, scope));
        }

        let items = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                if index == 0 { token.into() } else { token.with_prefix(" ").into() }
            })
            .collect();
        Ok(ListNode::new(SyntaxToken::new(key), items))
    }

    /// `key: value` items from single-entry mappings, values always quoted.
    fn pair_items(&self, key: &str, values: &[Value]) -> Result<Vec<ListItem>, DictError> {
        let mut items = Vec::new();
        for value in values {
            let Value::Mapping(mapping) = value else {
                return Err(DictError::UnsupportedValue {
                    key: key.to_owned(),
                    expected: "mapping",
                    found: value.type_name(),
                });
            };
            for (member, value) in mapping {
                let member = to_dsl_key(member);
                let text = value.scalar_text().ok_or_else(|| DictError::UnsupportedValue {
                    key: member.clone(),
                    expected: "scalar",
                    found: value.type_name(),
                })?;
                items.push(PairNode::new(SyntaxToken::new(member), SyntaxToken::quoted(text)).into());
            }
        }
        Ok(items)
    }

    /// One item per line, each followed by a comma, closing bracket aligned
    /// with the key.
    fn multiline_list(&self, key: &str, items: Vec<ListItem>, scope: Scope<'_>) -> ListNode {
        if items.is_empty() {
            return ListNode::new(SyntaxToken::new(key), items);
        }

        let lead = format!("\n{}", self.indent(scope.level + 1));
        let items = items
            .into_iter()
            .map(|item| match item {
                ListItem::Token(token) => token.with_prefix(lead.as_str()).into(),
                ListItem::Pair(pair) => pair.with_prefix(lead.as_str()).into(),
            })
            .collect();

        let right = RightBracket::new(Trivia::prefix(format!("\n{}", self.indent(scope.level))));
        ListNode::new(SyntaxToken::new(key), items)
            .with_brackets(LeftBracket::default(), right)
            .with_trailing_comma(Some(Comma::default()))
    }

    fn expand(&self, key: &str, values: &[Value], scope: Scope<'_>) -> Result<Vec<Node>, DictError> {
        let singular = self.keys.singular_of(key);
        if singular == "filter" && values.iter().all(Value::is_mapping) {
            return self.filters(values, scope);
        }

        values
            .iter()
            .map(|value| match value {
                Value::Mapping(mapping) => {
                    let name = self.block_name(singular, mapping);
                    self.block(singular, mapping, name, scope).map(Node::from)
                }
                Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                    self.parse_pair(singular, value).map(Node::from)
                }
                Value::Null | Value::Sequence(_) => Err(DictError::UnsupportedValue {
                    key: singular.to_owned(),
                    expected: "scalar or mapping",
                    found: value.type_name(),
                }),
            })
            .collect()
    }

    fn filters(&self, values: &[Value], scope: Scope<'_>) -> Result<Vec<Node>, DictError> {
        let mappings = values
            .iter()
            .map(|value| value.as_mapping().ok_or(DictError::MixedFilterShape))
            .collect::<Result<Vec<_>, _>>()?;
        let all_have = |members: [&str; 2]| {
            mappings.iter().all(|mapping| members.iter().all(|member| mapping.contains_key(*member)))
        };

        if all_have(["name", "type"]) {
            trace!(count = mappings.len(), "filter fields");
            mappings
                .iter()
                .map(|mapping| {
                    let name = mapping.get("name").and_then(Value::as_str);
                    self.block("filter", mapping, name, scope).map(Node::from)
                })
                .collect()
        } else if all_have(["field", "value"]) {
            trace!(count = mappings.len(), "legacy filters");
            mappings
                .iter()
                .map(|mapping| self.block("filters", mapping, None, scope).map(Node::from))
                .collect()
        } else if mappings.iter().all(|mapping| mapping.len() == 1) {
            trace!(count = mappings.len(), "compact filters");
            let items = self.pair_items("filters", values)?;
            Ok(vec![self.multiline_list("filters", items, scope).into()])
        } else {
            Err(DictError::MixedFilterShape)
        }
    }
}

/// Single-entry mappings of scalars, as in `sorts: [created_date: desc]`.
fn is_pair_list(values: &[Value]) -> bool {
    values.iter().all(|value| {
        value.as_mapping().is_some_and(|mapping| {
            mapping.len() == 1
                && mapping
                    .values()
                    .all(|value| matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)))
        })
    })
}
