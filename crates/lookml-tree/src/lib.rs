//! Lossless, immutable LookML syntax tree with attached trivia.
//!
//! Every node owns its children outright and renders as the exact text it was
//! built from: whitespace and comments live in the `prefix`/`suffix` trivia of
//! the tokens, so containers concatenate their children without inserting
//! separators of their own.

mod node;
mod token;
mod trivia;
mod visitor;

/// Structural nodes built from tokens.
pub use node::{BlockNode, ContainerNode, DocumentNode, ListItem, ListNode, Node, PairNode};
/// Leaf tokens and fixed punctuation.
pub use token::{
    Colon, Comma, LeftBracket, LeftCurlyBrace, RightBracket, RightCurlyBrace, SyntaxToken,
    TokenStyle,
};
/// Trivia attached to tokens.
pub use trivia::Trivia;
/// Tree traversal.
pub use visitor::{LookMlVisitor, Visitor};
