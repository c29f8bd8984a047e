//! Class constant entries.

use crate::{ConstExpr, LazyValue, Modifiers, Value};

/// A declared class constant.
#[derive(Debug, Clone)]
pub struct ConstantEntry {
    /// Constant name (case-sensitive).
    pub name: String,
    /// Declaration modifiers (visibility, `final`).
    pub modifiers: Modifiers,
    /// Value, evaluated during resolution.
    pub value: LazyValue,
}

impl ConstantEntry {
    /// Create a constant with a known value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::empty(),
            value: LazyValue::resolved(value),
        }
    }

    /// Create a constant whose value is evaluated during resolution.
    pub fn deferred(name: impl Into<String>, expr: impl ConstExpr + 'static) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::empty(),
            value: LazyValue::pending(expr),
        }
    }

    /// Set declaration modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
