//! Property entries.

use crate::{ConstExpr, LazyValue, Modifiers, Span, Value};

/// A declared property.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    /// Property name, without the leading `$`.
    pub name: String,
    /// Declaration modifiers.
    pub modifiers: Modifiers,
    /// Default value, evaluated during resolution.
    pub default: Option<LazyValue>,
    /// Declaration location.
    pub span: Span,
}

impl PropertyEntry {
    /// Create a property without a default.
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            default: None,
            span: Span::default(),
        }
    }

    /// Set an already-known default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(LazyValue::resolved(value));
        self
    }

    /// Set a default that is evaluated during resolution.
    pub fn with_default_expr(mut self, expr: impl ConstExpr + 'static) -> Self {
        self.default = Some(LazyValue::pending(expr));
        self
    }

    /// Set the declaration location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Check if the property is static.
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// The resolved default, `None` when absent or still pending.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().and_then(LazyValue::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expr;

    #[test]
    fn property_defaults() {
        let plain = PropertyEntry::new("count", Modifiers::STATIC);
        assert!(plain.is_static());
        assert!(plain.default.is_none());

        let known = PropertyEntry::new("name", Modifiers::PUBLIC).with_default("x");
        assert_eq!(known.default_value(), Some(&Value::string("x")));

        let pending = PropertyEntry::new("limit", Modifiers::PUBLIC)
            .with_default_expr(Expr::self_constant("MAX"));
        assert!(pending.default.is_some());
        assert_eq!(pending.default_value(), None);
    }
}
