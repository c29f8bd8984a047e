//! Per-class storage for static property values.

use classmodel_core::Value;
use indexmap::IndexMap;

/// Insertion-ordered map from static property name to its current value.
///
/// Created by the registry on first access and owned by the class for the
/// registry's lifetime. The execution engine mutates values in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticStorage {
    values: IndexMap<String, Value>,
}

impl StaticStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a property.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Mutable access to a property's value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Set a property, appending it if new. Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    /// Check if a property is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
