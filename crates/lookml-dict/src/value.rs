use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// String-keyed map that keeps insertion order.
pub type Mapping = IndexMap<String, Value>;

/// Application data on either side of the DSL: what `dump` consumes and
/// `load` produces. Decodes from any self-describing format (JSON, YAML).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// The DSL spelling of a scalar: strings as-is, numbers in natural
    /// decimal form, booleans as `yes`/`no`.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::String(value) => Some(value.clone()),
            Self::Number(number) => Some(number.to_string()),
            Self::Bool(true) => Some("yes".to_owned()),
            Self::Bool(false) => Some("no".to_owned()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Sequence(values)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(values) => {
                Self::Sequence(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_json_in_order() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": [true, null, "x"]}"#).unwrap();
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(
            mapping["a"],
            Value::Sequence(vec![Value::Bool(true), Value::Null, Value::from("x")])
        );
    }

    #[test]
    fn converts_from_json_value() {
        let value = Value::from(json!({ "z": 1.5, "y": { "x": "w" } }));
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["z", "y"]);
        assert_eq!(mapping["z"].scalar_text().as_deref(), Some("1.5"));
        assert_eq!(mapping["y"].type_name(), "mapping");
    }

    #[test]
    fn scalar_text() {
        assert_eq!(Value::from(true).scalar_text().as_deref(), Some("yes"));
        assert_eq!(Value::from(false).scalar_text().as_deref(), Some("no"));
        assert_eq!(Value::from(0_i64).scalar_text().as_deref(), Some("0"));
        assert_eq!(Value::Null.scalar_text(), None);
    }

    #[test]
    fn serializes_untagged() {
        let value = Value::from(json!({ "views": [{ "name": "orders" }] }));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"views":[{"name":"orders"}]}"#);
    }
}
