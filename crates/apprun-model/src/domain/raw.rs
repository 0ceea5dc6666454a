use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// The user-supplied environment bundle, exactly as received.
///
/// Values are JSON-typed: strings in the common case, booleans for flags,
/// objects/arrays for inline policy documents. Keys are unique and iteration is
/// ordered by key, so nothing downstream can depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEnv(BTreeMap<String, Value>);

impl RawEnv {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a bundle from its JSON text. Anything but a JSON object is rejected.
    pub fn from_json_str(s: &str) -> ModelResult<Self> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| ModelError::InvalidEnvironment(e.to_string()))?;
        Self::try_from(value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl TryFrom<Value> for RawEnv {
    type Error = ModelError;

    fn try_from(value: Value) -> ModelResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(ModelError::InvalidEnvironment(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawEnv
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
