//! Conversion between application data and LookML text.
//!
//! [`dump`] compiles decoded JSON/YAML data into formatted LookML through
//! [`DictParser`]; [`load`] parses LookML and reads the tree back with
//! [`DictVisitor`].

mod case;
mod error;
mod keys;
mod load;
mod simple;
mod value;

pub use case::to_dsl_key;
pub use error::{DictError, LoadError};
pub use keys::{KeyTable, LiteralKind};
pub use load::DictVisitor;
pub use simple::{DictParser, DictParserConfig};
use tracing::debug;
pub use value::{Mapping, Value};

/// Renders a top-level mapping as LookML with the default layout.
pub fn dump(value: &Value) -> Result<String, DictError> {
    dump_with(&DictParser::new(), value)
}

pub fn dump_with(parser: &DictParser, value: &Value) -> Result<String, DictError> {
    let mapping =
        value.as_mapping().ok_or(DictError::NotAMapping { found: value.type_name() })?;
    debug!(keys = mapping.len(), "dumping");
    Ok(parser.parse(mapping)?.to_string())
}

/// Parses LookML text into nested mappings.
pub fn load(text: &str) -> Result<Value, LoadError> {
    load_with(KeyTable::lookml(), text)
}

pub fn load_with(keys: KeyTable, text: &str) -> Result<Value, LoadError> {
    debug!(len = text.len(), "loading");
    let document = lookml_parse::parse_text(text)?;
    document.accept(&mut DictVisitor::with_keys(keys))
}
