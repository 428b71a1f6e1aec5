//! Per-key rendering rules of the DSL.

use lookml_tokenizer::EXPRESSION_KEYS;
use rustc_hash::{FxHashMap, FxHashSet};

/// How a scalar value is written for a given key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LiteralKind {
    Bare,
    Quoted,
    Number,
    Expression,
}

const QUOTED_KEYS: &[&str] = &[
    "label",
    "view_label",
    "group_label",
    "group_item_label",
    "suggest_persist_for",
    "default_value",
    "direction",
    "value_format",
    "name",
    "url",
    "icon_url",
    "form_url",
    "default",
    "tags",
    "value",
    "description",
    "sortkeys",
    "indexes",
    "partition_keys",
    "connection",
    "include",
    "max_cache_age",
    "allowed_values",
    "timezone",
    "persist_for",
    "cluster_keys",
    "distribution",
    "extents_json_url",
    "feature_key",
    "file",
    "property_key",
    "property_label_key",
    "else",
];

const NUMBER_KEYS: &[&str] = &["precision", "fiscal_month_offset", "approximate_threshold", "limit"];

const BARE_KEYS: &[&str] = &[
    "hidden",
    "type",
    "field",
    "week_start_day",
    "primary_key",
    "relationship",
    "view_name",
    "from",
    "case_sensitive",
    "convert_tz",
    "datatype",
    "required",
    "symmetric_aggregates",
];

/// `(plural, singular)` pairs for keys whose arrays become repeated
/// declarations.
const PLURAL_KEYS: &[(&str, &str)] = &[
    ("views", "view"),
    ("measures", "measure"),
    ("dimensions", "dimension"),
    ("dimension_groups", "dimension_group"),
    ("filters", "filter"),
    ("access_filters", "access_filter"),
    ("map_layers", "map_layer"),
    ("parameters", "parameter"),
    ("sets", "set"),
    ("columns", "column"),
    ("derived_columns", "derived_column"),
    ("includes", "include"),
    ("explores", "explore"),
    ("links", "link"),
    ("whens", "when"),
    ("allowed_values", "allowed_value"),
    ("named_value_formats", "named_value_format"),
    ("joins", "join"),
    ("datagroups", "datagroup"),
    ("access_grants", "access_grant"),
    ("sql_steps", "sql_step"),
    ("actions", "action"),
    ("params", "param"),
    ("form_params", "form_param"),
    ("options", "option"),
    ("user_attribute_params", "user_attribute_param"),
    ("asserts", "assert"),
    ("tests", "test"),
    ("queries", "query"),
    ("aggregate_tables", "aggregate_table"),
    ("constants", "constant"),
    ("local_dependencies", "local_dependency"),
    ("remote_dependencies", "remote_dependency"),
    ("override_constants", "override_constant"),
];

/// `(parent, singular)` pairs where the plural key is an ordinary list.
const LIST_CONTEXTS: &[(&str, &str)] =
    &[("query", "dimension"), ("query", "measure"), ("access_grant", "allowed_value")];

/// Blocks whose `name` member is a field rather than the block name.
const NAMED_KEYS: &[&str] = &["param", "form_param", "option", "user_attribute_param"];

/// Lookup of literal kinds and plural forms, extensible by callers.
#[derive(Clone, Debug, Default)]
pub struct KeyTable {
    kinds: FxHashMap<String, LiteralKind>,
    singulars: FxHashMap<String, String>,
    plurals: FxHashMap<String, String>,
    list_contexts: FxHashSet<(String, String)>,
    named_keys: FxHashSet<String>,
}

impl KeyTable {
    /// A table with no entries; every key uses the fallback policy.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The LookML vocabulary.
    pub fn lookml() -> Self {
        let mut table = Self::empty();

        let kinds = [
            (QUOTED_KEYS, LiteralKind::Quoted),
            (EXPRESSION_KEYS, LiteralKind::Expression),
            (NUMBER_KEYS, LiteralKind::Number),
            (BARE_KEYS, LiteralKind::Bare),
        ];
        for (keys, kind) in kinds {
            for &key in keys {
                table = table.with_kind(key, kind);
            }
        }
        for &(plural, singular) in PLURAL_KEYS {
            table = table.with_plural(plural, singular);
        }
        for &(parent, singular) in LIST_CONTEXTS {
            table = table.with_list_context(parent, singular);
        }
        for &key in NAMED_KEYS {
            table = table.with_named_key(key);
        }

        table
    }

    pub fn with_kind(mut self, key: impl Into<String>, kind: LiteralKind) -> Self {
        self.kinds.insert(key.into(), kind);
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>, singular: impl Into<String>) -> Self {
        let (plural, singular) = (plural.into(), singular.into());
        self.plurals.insert(singular.clone(), plural.clone());
        self.singulars.insert(plural, singular);
        self
    }

    pub fn with_list_context(
        mut self,
        parent: impl Into<String>,
        singular: impl Into<String>,
    ) -> Self {
        self.list_contexts.insert((parent.into(), singular.into()));
        self
    }

    pub fn with_named_key(mut self, key: impl Into<String>) -> Self {
        self.named_keys.insert(key.into());
        self
    }

    /// The registered kind of `key`, if any.
    pub fn kind_of(&self, key: &str) -> Option<LiteralKind> {
        self.kinds.get(key).copied()
    }

    /// The kind used to render `value` under `key`, falling back to the
    /// shape of the value for unregistered keys.
    pub fn literal_kind_of(&self, key: &str, value: &str) -> LiteralKind {
        self.kind_of(key).unwrap_or_else(|| fallback_kind(value))
    }

    /// The singular form of a plural key, or the key itself.
    pub fn singular_of<'a>(&'a self, key: &'a str) -> &'a str {
        self.singulars.get(key).map_or(key, String::as_str)
    }

    pub fn plural_of(&self, singular: &str) -> Option<&str> {
        self.plurals.get(singular).map(String::as_str)
    }

    pub fn is_plural(&self, key: &str) -> bool {
        self.singulars.contains_key(key)
    }

    /// Whether `singular` values under `parent` are written as one list.
    pub fn is_list_context(&self, parent: Option<&str>, singular: &str) -> bool {
        parent.is_some_and(|parent| {
            self.list_contexts.contains(&(parent.to_owned(), singular.to_owned()))
        })
    }

    pub fn is_named_key(&self, key: &str) -> bool {
        self.named_keys.contains(key)
    }
}

fn fallback_kind(value: &str) -> LiteralKind {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return LiteralKind::Number;
    }

    if needs_quotes(value) { LiteralKind::Quoted } else { LiteralKind::Bare }
}

/// Whether `value` would not lex back as a single bare literal.
pub(crate) fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|c| {
            c.is_whitespace() || matches!(c, ':' | '{' | '}' | '[' | ']' | ',' | '"' | '#' | ';')
        })
}
