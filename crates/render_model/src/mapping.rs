//! Attribute mapping - display values for placeholders

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Title shown for a placeholder with no mapped value
pub const UNMAPPED_TITLE: &str = "?";

/// Maps raw placeholder keys (delimiters included) to display values.
///
/// A missing key and a key mapped to `None` both mean "unmapped"; neither is
/// an error. Deserializes from a JSON object whose values are strings or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMapping(HashMap<String, Option<String>>);

impl AttributeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a raw key to a display value
    pub fn insert(&mut self, raw_key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(raw_key.into(), Some(value.into()));
    }

    /// Record a raw key explicitly as unmapped
    pub fn insert_unmapped(&mut self, raw_key: impl Into<String>) {
        self.0.insert(raw_key.into(), None);
    }

    pub fn remove(&mut self, raw_key: &str) {
        self.0.remove(raw_key);
    }

    /// The display value of a raw key, if mapped
    pub fn get(&self, raw_key: &str) -> Option<&str> {
        self.0.get(raw_key).and_then(|v| v.as_deref())
    }

    /// The value a placeholder contributes to rendered output
    pub fn resolve(&self, raw_key: &str) -> &str {
        self.get(raw_key).unwrap_or("")
    }

    /// The title the editing surface shows for a placeholder
    pub fn title(&self, raw_key: &str) -> &str {
        self.get(raw_key).unwrap_or(UNMAPPED_TITLE)
    }

    pub fn is_mapped(&self, raw_key: &str) -> bool {
        self.get(raw_key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}
