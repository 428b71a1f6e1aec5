use lookml_errors::Diagnostic;

/// Failure while compiling application data to DSL nodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictError {
    #[error("unsupported value for `{key}`: expected {expected}, found {found}")]
    UnsupportedValue { key: String, expected: &'static str, found: &'static str },
    #[error("filters must all be `{{name, type}}`, all `{{field, value}}` or all single-key mappings")]
    MixedFilterShape,
    #[error("top-level value must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
}

/// Failure while reading DSL text back into application data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("syntax error: {0}")]
    Syntax(#[from] Diagnostic),
    #[error("duplicate key `{key}`")]
    DuplicateKey { key: String },
}
