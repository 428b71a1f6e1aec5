//! Tree traversal.
//!
//! Rendering goes through [`LookMlVisitor`]; other traversals implement
//! [`Visitor`] with their own output type instead of touching node types.

use crate::{BlockNode, ContainerNode, DocumentNode, ListNode, PairNode, SyntaxToken};

/// One method per node kind. Nodes dispatch through their `accept` method.
pub trait Visitor {
    type Output;

    fn visit_document(&mut self, document: &DocumentNode) -> Self::Output;
    fn visit_container(&mut self, container: &ContainerNode) -> Self::Output;
    fn visit_block(&mut self, block: &BlockNode) -> Self::Output;
    fn visit_list(&mut self, list: &ListNode) -> Self::Output;
    fn visit_pair(&mut self, pair: &PairNode) -> Self::Output;
    fn visit_token(&mut self, token: &SyntaxToken) -> Self::Output;
}

/// Renders a tree back to LookML text, trivia included.
#[derive(Clone, Copy, Debug, Default)]
pub struct LookMlVisitor;

impl Visitor for LookMlVisitor {
    type Output = String;

    fn visit_document(&mut self, document: &DocumentNode) -> String {
        let mut out = String::from(document.prefix());
        out.push_str(&document.container().accept(self));
        out.push_str(document.suffix());
        out
    }

    fn visit_container(&mut self, container: &ContainerNode) -> String {
        container.items().iter().map(|item| item.accept(self)).collect()
    }

    fn visit_block(&mut self, block: &BlockNode) -> String {
        let mut out = block.key().accept(self);
        out.push_str(&block.colon().to_string());
        if let Some(name) = block.name() {
            out.push_str(&name.accept(self));
        }
        out.push_str(&block.left_brace().to_string());
        out.push_str(&block.container().accept(self));
        out.push_str(&block.right_brace().to_string());
        out
    }

    fn visit_list(&mut self, list: &ListNode) -> String {
        let mut out = list.key().accept(self);
        out.push_str(&list.colon().to_string());
        out.push_str(&list.left_bracket().to_string());
        let has_items = !list.items().is_empty();
        if let Some(comma) = list.leading_comma().filter(|_| has_items) {
            out.push_str(&comma.to_string());
        }
        let items: Vec<String> = list.items().iter().map(|item| item.accept(self)).collect();
        out.push_str(&items.join(","));
        if let Some(comma) = list.trailing_comma().filter(|_| has_items) {
            out.push_str(&comma.to_string());
        }
        out.push_str(&list.right_bracket().to_string());
        out
    }

    fn visit_pair(&mut self, pair: &PairNode) -> String {
        let mut out = pair.key().accept(self);
        out.push_str(&pair.colon().to_string());
        out.push_str(&pair.value().accept(self));
        out
    }

    fn visit_token(&mut self, token: &SyntaxToken) -> String {
        format!("{}{}{}", token.prefix(), token.format_value(), token.suffix())
    }
}
