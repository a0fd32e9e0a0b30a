//! Per-page render registers.
//!
//! Mutable key/value state shared by every directive invocation within one
//! page render.

use std::collections::HashMap;

use serde_json::Value;

/// Mutable state scoped to a single page render.
///
/// A fresh instance is created for every page and dropped when that page has
/// been rendered, so nothing written here leaks into other pages or builds.
/// Values are JSON so hosts can seed registers from page front matter.
///
/// # Example
///
/// ```
/// use fig_renderer::directive::PageRegisters;
///
/// let mut registers = PageRegisters::new();
/// assert_eq!(registers.get_u64("figure_number"), None);
///
/// registers.insert("figure_number", 3);
/// assert_eq!(registers.get_u64("figure_number"), Some(3));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageRegisters {
    values: HashMap<String, Value>,
}

impl PageRegisters {
    /// Create empty registers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a register value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a register as an unsigned integer.
    ///
    /// Returns `None` when the register is unset or holds a non-integer.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get(key).and_then(Value::as_u64)
    }

    /// Whether a register is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Set a register, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Number of registers set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no registers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Value)> for PageRegisters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_is_empty() {
        let registers = PageRegisters::new();
        assert!(registers.is_empty());
        assert!(!registers.contains("figure_number"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut registers = PageRegisters::new();
        assert_eq!(registers.insert("n", 1), None);
        assert_eq!(registers.insert("n", 2), Some(json!(1)));
        assert_eq!(registers.get_u64("n"), Some(2));
        assert_eq!(registers.len(), 1);
    }

    #[test]
    fn test_get_u64_non_integer() {
        let mut registers = PageRegisters::new();
        registers.insert("title", "Guide");
        registers.insert("ratio", 1.5);
        assert_eq!(registers.get_u64("title"), None);
        assert_eq!(registers.get_u64("ratio"), None);
        assert_eq!(registers.get("title"), Some(&json!("Guide")));
    }

    #[test]
    fn test_from_iter() {
        let registers: PageRegisters = [("layout".to_owned(), json!("post"))]
            .into_iter()
            .collect();
        assert!(registers.contains("layout"));
    }
}
