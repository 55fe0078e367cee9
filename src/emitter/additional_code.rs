//! Helper code hoisted into the output preamble

use indexmap::IndexMap;

/// Insertion-ordered, first-writer-wins store of helper fragments
#[derive(Debug, Default, Clone)]
pub struct AdditionalCode {
    entries: IndexMap<String, String>,
}

impl AdditionalCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `code` under `key`; returns false if the key was already taken
    pub fn add(&mut self, key: impl Into<String>, code: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            log::debug!("additional code `{}` already registered", key);
            return false;
        }
        self.entries.insert(key, code.into());
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All fragments in insertion order, separated by a blank line
    pub fn flush(&self) -> String {
        self.entries
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let mut registry = AdditionalCode::new();
        assert!(registry.add("getopt", "func getopt() {}"));
        assert!(!registry.add("getopt", "func other() {}"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.flush(), "func getopt() {}");
    }

    #[test]
    fn test_flush_keeps_insertion_order() {
        let mut registry = AdditionalCode::new();
        registry.add("b", "second");
        registry.add("a", "first");
        registry.add("b", "ignored");
        assert_eq!(registry.flush(), "second\n\nfirst");
    }

    #[test]
    fn test_clear() {
        let mut registry = AdditionalCode::new();
        registry.add("key", "code");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.flush(), "");
    }
}
