// ABOUTME: Private data frames carrying @index, @key and helper-injected metadata
// ABOUTME: Kept apart from the context chain so ordinary path lookups never see them

use crate::value::{Map, Value};

/// A set of private variables (`@index`, `@first`, `@exclaim`, ...).
///
/// Helpers build one to inject data for their body; `Options::data_frame`
/// returns one as a flattened snapshot of the active chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    entries: Map,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`DataFrame::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Iteration metadata for element `index` of a collection of `len` items
    pub fn for_iteration(index: usize, len: usize) -> Self {
        Self::new()
            .with("index", index)
            .with("first", index == 0)
            .with("last", index + 1 == len)
    }

    pub(crate) fn from_map(entries: Map) -> Self {
        Self { entries }
    }
}

impl From<DataFrame> for Value {
    fn from(frame: DataFrame) -> Self {
        Value::Mapping(frame.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_metadata() {
        let first = DataFrame::for_iteration(0, 3);
        assert_eq!(first.get("index"), Some(&Value::from(0)));
        assert_eq!(first.get("first"), Some(&Value::from(true)));
        assert_eq!(first.get("last"), Some(&Value::from(false)));

        let last = DataFrame::for_iteration(2, 3);
        assert_eq!(last.get("last"), Some(&Value::from(true)));
    }

    #[test]
    fn test_builder_and_removal() {
        let mut frame = DataFrame::new().with("exclaim", "!");
        assert!(frame.contains("exclaim"));
        assert_eq!(frame.remove("exclaim"), Some(Value::from("!")));
        assert!(frame.is_empty());
    }
}
