//! Memoized lazy values for constants and property defaults.

use std::sync::Arc;

use crate::{ClassError, ConstExpr, ConstScope, Value};

/// A value that is either still an unevaluated expression or already computed.
///
/// The transition `Pending -> Resolved` happens once; a resolved value is
/// never evaluated again. Cycle detection is not done here: the scope passed
/// to [`LazyValue::force`] tracks which values are being evaluated.
#[derive(Debug, Clone)]
pub enum LazyValue {
    /// Not evaluated yet.
    Pending(Arc<dyn ConstExpr>),
    /// Evaluated, memoized.
    Resolved(Value),
}

impl LazyValue {
    /// Wrap an expression to evaluate later.
    pub fn pending(expr: impl ConstExpr + 'static) -> Self {
        LazyValue::Pending(Arc::new(expr))
    }

    /// Wrap a value that needs no evaluation.
    pub fn resolved(value: impl Into<Value>) -> Self {
        LazyValue::Resolved(value.into())
    }

    /// Check if the value has been computed.
    pub fn is_resolved(&self) -> bool {
        matches!(self, LazyValue::Resolved(_))
    }

    /// The computed value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            LazyValue::Resolved(value) => Some(value),
            LazyValue::Pending(_) => None,
        }
    }

    /// The pending expression, if not yet computed.
    ///
    /// Returns a shared handle so the caller can evaluate it while the
    /// owner of this value is borrowed elsewhere.
    pub fn pending_expr(&self) -> Option<Arc<dyn ConstExpr>> {
        match self {
            LazyValue::Pending(expr) => Some(Arc::clone(expr)),
            LazyValue::Resolved(_) => None,
        }
    }

    /// Store the result of evaluating the pending expression.
    ///
    /// A value that is already resolved keeps its first result.
    pub fn set_resolved(&mut self, value: Value) {
        if let LazyValue::Pending(_) = self {
            *self = LazyValue::Resolved(value);
        }
    }

    /// Evaluate if needed and return a copy of the memoized value.
    pub fn force(&mut self, scope: &mut dyn ConstScope) -> Result<Value, ClassError> {
        match self {
            LazyValue::Resolved(value) => Ok(value.clone()),
            LazyValue::Pending(expr) => {
                let value = expr.evaluate(scope)?;
                *self = LazyValue::Resolved(value.clone());
                Ok(value)
            }
        }
    }
}

impl From<Value> for LazyValue {
    fn from(value: Value) -> Self {
        LazyValue::Resolved(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::ClassRef;

    struct NoScope;

    impl ConstScope for NoScope {
        fn class_constant(&mut self, _class: &ClassRef, name: &str) -> Result<Value, ClassError> {
            Err(ClassError::UndefinedConstant {
                class: "none".to_string(),
                name: name.to_string(),
            })
        }
    }

    #[derive(Debug)]
    struct Counting(Arc<AtomicUsize>);

    impl ConstExpr for Counting {
        fn evaluate(&self, _scope: &mut dyn ConstScope) -> Result<Value, ClassError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Int(7))
        }
    }

    #[test]
    fn force_memoizes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut lazy = LazyValue::pending(Counting(calls.clone()));
        assert!(!lazy.is_resolved());

        assert_eq!(lazy.force(&mut NoScope).unwrap(), Value::Int(7));
        assert_eq!(lazy.force(&mut NoScope).unwrap(), Value::Int(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(lazy.is_resolved());
    }

    #[test]
    fn failed_force_stays_pending() {
        let mut lazy = LazyValue::pending(crate::Expr::self_constant("MISSING"));
        assert!(lazy.force(&mut NoScope).is_err());
        assert!(!lazy.is_resolved());
        assert!(lazy.pending_expr().is_some());
    }

    #[test]
    fn set_resolved_keeps_first_result() {
        let mut lazy = LazyValue::resolved(1);
        lazy.set_resolved(Value::Int(2));
        assert_eq!(lazy.value(), Some(&Value::Int(1)));
    }
}
