use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// Runtime environment variables handed to the managed service.
///
/// Stored as an ordered list of key–value pairs with unique keys and serialized as a transparent array.
/// Insertion order is preserved; [`Env::set`] on an existing key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(Vec<KeyValue>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all key–value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|kv| kv.key() == key).map(|kv| kv.value())
    }

    /// Insert a variable, replacing the value of an existing key.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let kv = KeyValue::new(key, value);
        match self.0.iter_mut().find(|e| e.key() == kv.key()) {
            Some(slot) => *slot = kv,
            None => self.0.push(kv),
        }
    }

    /// Merge two environments; entries of `other` win on key collisions.
    ///
    /// Keys keep the position of their first appearance, keys new in `other` are appended.
    pub fn merged(&self, other: &Env) -> Env {
        let mut out = self.clone();
        for kv in other.iter() {
            out.set(kv.key(), kv.value());
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Env::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::Env;

    #[test]
    fn set_replaces_in_place() {
        let mut env = Env::new();
        env.set("FOO", "one");
        env.set("BAR", "x");
        env.set("FOO", "two");

        assert_eq!(env.len(), 2);
        assert_eq!(env.get("FOO"), Some("two"));
        let keys: Vec<_> = env.iter().map(|kv| kv.key()).collect();
        assert_eq!(keys, ["FOO", "BAR"]);
    }

    #[test]
    fn merged_other_overrides_base() {
        let base: Env = [("PORT", "3000"), ("BAR", "bar")].into_iter().collect();
        let fixed: Env = [("PORT", "8080")].into_iter().collect();

        let merged = base.merged(&fixed);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("PORT"), Some("8080"));
        assert_eq!(merged.get("BAR"), Some("bar"));
    }

    #[test]
    fn merged_appends_new_keys() {
        let base: Env = [("A", "1")].into_iter().collect();
        let other: Env = [("B", "2")].into_iter().collect();

        let keys: Vec<_> = base.merged(&other).iter().map(|kv| kv.key().to_string()).collect();
        assert_eq!(keys, ["A", "B"]);
    }

    #[test]
    fn serializes_as_array() {
        let env: Env = [("FOO", "bar")].into_iter().collect();
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"[{"key":"FOO","value":"bar"}]"#);
    }
}
