//! Reads a parsed tree back into application data.

use lookml_tree::{
    BlockNode, ContainerNode, DocumentNode, ListNode, PairNode, SyntaxToken, Visitor,
};
use tracing::warn;

use crate::LoadError;
use crate::keys::KeyTable;
use crate::value::{Mapping, Value};

/// Converts a tree into nested mappings.
///
/// Blocks become mappings with their name under `name`, pairs become strings
/// and lists sequences. Declarations with a plural form are gathered into a
/// sequence under the plural key, so two `dimension` blocks load as
/// `dimensions: [..]`.
#[derive(Clone, Debug)]
pub struct DictVisitor {
    keys: KeyTable,
    depth: usize,
}

impl Default for DictVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DictVisitor {
    pub fn new() -> Self {
        Self::with_keys(KeyTable::lookml())
    }

    pub fn with_keys(keys: KeyTable) -> Self {
        Self { keys, depth: 0 }
    }

    fn insert(&self, out: &mut Mapping, key: String, value: Value) -> Result<(), LoadError> {
        if let Some(plural) = self.keys.plural_of(&key) {
            let values = out.entry(plural.to_owned()).or_insert_with(|| Value::Sequence(Vec::new()));
            return match values {
                Value::Sequence(values) => {
                    values.push(value);
                    Ok(())
                }
                _ => Err(LoadError::DuplicateKey { key: plural.to_owned() }),
            };
        }

        if out.contains_key(&key) {
            if self.depth > 0 {
                return Err(LoadError::DuplicateKey { key });
            }
            warn!(key, "duplicate top-level key, keeping the last value");
        }
        out.insert(key, value);
        Ok(())
    }
}

fn entry(key: &str, value: Value) -> Value {
    Value::Mapping(Mapping::from_iter([(key.to_owned(), value)]))
}

impl Visitor for DictVisitor {
    type Output = Result<Value, LoadError>;

    fn visit_document(&mut self, document: &DocumentNode) -> Self::Output {
        document.container().accept(self)
    }

    fn visit_container(&mut self, container: &ContainerNode) -> Self::Output {
        let mut out = Mapping::new();
        for item in container.items() {
            if let Value::Mapping(entries) = item.accept(self)? {
                for (key, value) in entries {
                    self.insert(&mut out, key, value)?;
                }
            }
        }
        Ok(Value::Mapping(out))
    }

    fn visit_block(&mut self, block: &BlockNode) -> Self::Output {
        self.depth += 1;
        let contents = block.container().accept(self);
        self.depth -= 1;

        let mut mapping = Mapping::new();
        if let Some(name) = block.name() {
            mapping.insert("name".to_owned(), Value::from(name.value()));
        }
        if let Value::Mapping(contents) = contents? {
            mapping.extend(contents);
        }
        Ok(entry(block.key().value(), Value::Mapping(mapping)))
    }

    fn visit_list(&mut self, list: &ListNode) -> Self::Output {
        let items =
            list.items().iter().map(|item| item.accept(self)).collect::<Result<Vec<_>, _>>()?;
        Ok(entry(list.key().value(), Value::Sequence(items)))
    }

    fn visit_pair(&mut self, pair: &PairNode) -> Self::Output {
        let value = pair.value().accept(self)?;
        Ok(entry(pair.key().value(), value))
    }

    fn visit_token(&mut self, token: &SyntaxToken) -> Self::Output {
        Ok(Value::from(token.value()))
    }
}
