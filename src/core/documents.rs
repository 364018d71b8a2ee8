//! # Document Store
//!
//! Editable text for each file, keyed by the file's path in the tree
//! (see [`Forest::document_key`](crate::core::tree::Forest::document_key)).
//!
//! The store and the tree are not kept in sync: creating a file adds no
//! entry and deleting a node removes none. A file without an entry edits as
//! an empty document.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    entries: HashMap<String, String>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the demo project that matches [`Forest::seed`](crate::core::tree::Forest::seed).
    pub fn seed() -> Self {
        let mut store = Self::new();
        store.set_content("src/index.js", "// Write your code here");
        store.set_content("src/styles.css", "/* Write your styles here */");
        store.set_content(
            "package.json",
            "{\n  \"name\": \"my-project\",\n  \"version\": \"1.0.0\"\n}",
        );
        store.set_content("README.md", "# My Project\n\nDescription goes here.");
        store
    }

    /// Stored text, or `""` when the key has no entry.
    pub fn content(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    /// Insert or overwrite.
    pub fn set_content(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

#[cfg(test)]
impl DocumentStore {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
