//! Parses LookML text into a lossless tree.

mod parser;
#[cfg(test)]
mod tests;

use lookml_errors::Diagnostic;
use lookml_tree::DocumentNode;

use crate::parser::Parser;

/// Parses a whole file. The returned document renders back to `text`.
pub fn parse_text(text: &str) -> Result<DocumentNode, Diagnostic> {
    Parser::new(text).document()
}
