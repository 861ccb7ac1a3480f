use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keys recognised in a prompt [`Context`].
///
/// The set is closed: adapters match on it exhaustively, and a new key is a
/// deliberate change to the prompt model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContextKey {
    /// Hint naming the model a prompt should be sent to.
    #[serde(rename = "modelIdentifier")]
    ModelIdentifier,
}

/// Scoped metadata attached to a prompt.
///
/// Each key holds an ordered list of values. A key that was never set is
/// distinct from a key set to an empty list: consumers treat the first as
/// "use the default" and may reject the second.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    entries: BTreeMap<ContextKey, Vec<String>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Context::insert`].
    pub fn with(mut self, key: ContextKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends a value under `key`.
    pub fn insert(&mut self, key: ContextKey, value: impl Into<String>) {
        self.entries.entry(key).or_default().push(value.into());
    }

    /// Replaces every value under `key`, possibly with none.
    pub fn set(&mut self, key: ContextKey, values: Vec<String>) {
        self.entries.insert(key, values);
    }

    /// Values stored under `key`, or `None` when the key is absent.
    pub fn get(&self, key: ContextKey) -> Option<&[String]> {
        self.entries.get(&key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
