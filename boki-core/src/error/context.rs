//! Free-form structured metadata attached to application errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map::{self, HashMap};

/// Key/value metadata carried by every [`AppError`](super::AppError)
///
/// Keys are unique and insertion order is irrelevant. Merging is shallow:
/// keys from the incoming map replace existing ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorContext(HashMap<String, Value>);

impl ErrorContext {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value under `key`, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Shallow merge; `other` wins on conflicting keys
    pub fn merge(&mut self, other: &ErrorContext) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Consuming variant of [`merge`](Self::merge)
    pub fn merged(mut self, other: &ErrorContext) -> Self {
        self.merge(other);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for ErrorContext {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ErrorContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ErrorContext {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build an [`ErrorContext`] from `key => value` pairs
///
/// ```rust
/// use boki_core::context;
///
/// let ctx = context! { "questionId" => "Q001", "attempt" => 2 };
/// assert_eq!(ctx.get_str("questionId"), Some("Q001"));
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::error::ErrorContext::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut ctx = $crate::error::ErrorContext::new();
        $(
            ctx.insert($key, $crate::__private::serde_json::json!($value));
        )+
        ctx
    }};
}
