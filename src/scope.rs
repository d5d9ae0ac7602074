use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const GLOBAL_SCOPE: &str = "global";

/// Key/value state owned by one authored document.
///
/// Variable scopes survive across compile passes and are only dropped by
/// [`DocumentScopeStore::clear`]. Attribute accumulators are per tag name
/// and reset whenever a section with that name opens.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DocumentScopeStore {
    scopes: IndexMap<String, IndexMap<String, String>>,
    #[serde(skip)]
    attributes: IndexMap<String, IndexMap<String, String>>,
}

impl DocumentScopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.scopes.get(name)
    }

    pub fn get(&self, scope: &str, key: &str) -> Option<&str> {
        self.scopes
            .get(scope)
            .and_then(|vars| vars.get(key))
            .map(String::as_str)
    }

    /// Later writes replace earlier ones and keep the key's position.
    pub fn set(&mut self, scope: &str, key: impl Into<String>, value: impl Into<String>) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    pub fn reset_attributes(&mut self, name: &str) {
        self.attributes.insert(name.to_string(), IndexMap::new());
    }

    /// The first value stored for a key wins until the accumulator is reset.
    pub fn push_attribute(&mut self, name: &str, key: &str, value: &str) {
        let attrs = self.attributes.entry(name.to_string()).or_default();
        if attrs.contains_key(key) {
            tracing::trace!(tag = name, key, "duplicate attribute ignored");
            return;
        }
        attrs.insert(key.to_string(), value.to_string());
    }

    pub fn attributes(&self, name: &str) -> IndexMap<String, String> {
        self.attributes.get(name).cloned().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
        self.attributes.clear();
    }
}
