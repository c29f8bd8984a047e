//! Evaluation of class constants and property defaults.
//!
//! Pending values are forced through [`ConstEvaluator`], which is the
//! [`ConstScope`] handed to expressions. It resolves `self`, `static`,
//! `parent` and named class references against the registry, finds the
//! declaring class of a constant and memoizes each result in place.
//!
//! Values currently being evaluated are tracked in an [`InProgress`] set; an
//! expression reaching a value already in that set is a self-referencing
//! constant and fails with `CircularConstant`.

use std::sync::Arc;

use classmodel_core::{ClassError, ClassId, ClassRef, ConstExpr, ConstScope, LazyValue, Value};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::ClassRegistry;

/// Location of a lazy value inside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LazySlot {
    Constant { class: ClassId, index: usize },
    PropertyDefault { class: ClassId, index: usize },
}

impl LazySlot {
    /// The class declaring this value.
    pub(crate) fn class(self) -> ClassId {
        match self {
            LazySlot::Constant { class, .. } | LazySlot::PropertyDefault { class, .. } => class,
        }
    }
}

/// Lazy values whose evaluation is in progress.
pub(crate) type InProgress = FxHashSet<LazySlot>;

/// Evaluation scope bound to one class.
pub(crate) struct ConstEvaluator<'a> {
    registry: &'a mut ClassRegistry,
    class: ClassId,
    in_progress: &'a mut InProgress,
}

impl<'a> ConstEvaluator<'a> {
    pub(crate) fn new(
        registry: &'a mut ClassRegistry,
        class: ClassId,
        in_progress: &'a mut InProgress,
    ) -> Self {
        Self {
            registry,
            class,
            in_progress,
        }
    }

    /// Force every constant and property default declared on the class.
    pub(crate) fn force_declared(&mut self) -> Result<(), ClassError> {
        let class = self.class;
        let entry = &self.registry.slot(class).entry;
        let (constants, properties) = (entry.constants.len(), entry.properties.len());

        for index in 0..constants {
            self.force(LazySlot::Constant { class, index })?;
        }
        for index in 0..properties {
            self.force(LazySlot::PropertyDefault { class, index })?;
        }
        Ok(())
    }

    /// Evaluate a lazy value once and memoize it.
    ///
    /// An absent property default forces to `null`. A failed evaluation
    /// leaves the value pending. Values of a class whose resolution failed
    /// are never read.
    fn force(&mut self, slot: LazySlot) -> Result<Value, ClassError> {
        if let Some(err) = self.registry.resolution_error(slot.class()) {
            return Err(err.clone());
        }
        let expr = match self.registry.lazy(slot) {
            None => return Ok(Value::Null),
            Some(LazyValue::Resolved(value)) => return Ok(value.clone()),
            Some(LazyValue::Pending(expr)) => Arc::clone(expr),
        };

        if !self.in_progress.insert(slot) {
            let (class, name) = self.registry.lazy_label(slot);
            return Err(ClassError::CircularConstant { class, name });
        }

        trace!(?slot, "evaluating deferred value");
        let result = {
            // Expressions resolve `self` against the declaring class.
            let mut scope = ConstEvaluator {
                registry: &mut *self.registry,
                class: slot.class(),
                in_progress: &mut *self.in_progress,
            };
            expr.evaluate(&mut scope)
        };
        self.in_progress.remove(&slot);

        let value = result?;
        if let Some(lazy) = self.registry.lazy_mut(slot) {
            lazy.set_resolved(value.clone());
        }
        Ok(value)
    }

    /// Find the declaring class of constant `name`, as seen from `class`:
    /// the class itself, then its parent chain, then its interfaces.
    ///
    /// Walks declared names only, so it works on classes that are not
    /// resolved yet.
    fn find_constant(
        &mut self,
        class: ClassId,
        name: &str,
        visited: &mut FxHashSet<ClassId>,
    ) -> Result<Option<LazySlot>, ClassError> {
        if !visited.insert(class) {
            return Ok(None);
        }

        let entry = &self.registry.slot(class).entry;
        if let Some(index) = entry.constants.get_index_of(name) {
            return Ok(Some(LazySlot::Constant { class, index }));
        }

        let referenced: Vec<_> = entry.referenced_names().cloned().collect();
        for reference in &referenced {
            let id = self.registry.lookup(reference)?;
            if let Some(found) = self.find_constant(id, name, visited)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn target(&mut self, class: &ClassRef) -> Result<ClassId, ClassError> {
        match class {
            ClassRef::SelfClass | ClassRef::Static => Ok(self.class),
            ClassRef::Parent => {
                let entry = &self.registry.slot(self.class).entry;
                let parent = entry
                    .parent
                    .clone()
                    .ok_or_else(|| ClassError::NoParentScope(entry.name.to_string()))?;
                self.registry.lookup(&parent)
            }
            ClassRef::Named(name) => self.registry.lookup(name),
        }
    }
}

impl ConstScope for ConstEvaluator<'_> {
    fn class_constant(&mut self, class: &ClassRef, name: &str) -> Result<Value, ClassError> {
        let target = self.target(class)?;
        let mut visited = FxHashSet::default();
        match self.find_constant(target, name, &mut visited)? {
            Some(slot) => self.force(slot),
            None => Err(ClassError::UndefinedConstant {
                class: self.registry.class_name(target),
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use classmodel_core::{
        BinaryOp, ClassEntry, ClassName, ConstantEntry, Expr, Modifiers, PropertyEntry,
    };

    use super::*;

    fn evaluate(
        registry: &mut ClassRegistry,
        class: ClassId,
        expr: Expr,
    ) -> Result<Value, ClassError> {
        let mut in_progress = InProgress::default();
        let mut scope = ConstEvaluator::new(registry, class, &mut in_progress);
        expr.evaluate(&mut scope)
    }

    #[test]
    fn forward_reference_within_class() {
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(
                ClassEntry::class("Config")
                    .with_constant(ConstantEntry::deferred(
                        "X",
                        Expr::binary(BinaryOp::Add, Expr::self_constant("Y"), Expr::literal(1)),
                    ))
                    .with_constant(ConstantEntry::new("Y", 1)),
            )
            .unwrap();

        let mut in_progress = InProgress::default();
        ConstEvaluator::new(&mut registry, id, &mut in_progress)
            .force_declared()
            .unwrap();
        assert!(in_progress.is_empty());

        let value = registry.entry(id).unwrap().find_constant("X").unwrap().value.value().cloned();
        assert_eq!(value, Some(Value::Int(2)));
    }

    #[test]
    fn self_reference_is_circular() {
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(
                ClassEntry::class("Loop")
                    .with_constant(ConstantEntry::deferred("A", Expr::self_constant("B")))
                    .with_constant(ConstantEntry::deferred("B", Expr::self_constant("A"))),
            )
            .unwrap();

        let err = evaluate(&mut registry, id, Expr::self_constant("A")).unwrap_err();
        assert!(err.is_circular_constant());
        // Nothing was memoized
        let entry = registry.entry(id).unwrap();
        assert!(!entry.find_constant("A").unwrap().value.is_resolved());
        assert!(!entry.find_constant("B").unwrap().value.is_resolved());
    }

    #[test]
    fn inherited_and_interface_constants() {
        let mut registry = ClassRegistry::new();
        registry
            .register(
                ClassEntry::interface("HasVersion").with_constant(ConstantEntry::new("VERSION", 3)),
            )
            .unwrap();
        registry
            .register(ClassEntry::class("Base").with_constant(ConstantEntry::new("LIMIT", 10)))
            .unwrap();
        let child = registry
            .register(
                ClassEntry::class("Child")
                    .with_parent("Base")
                    .with_interface("HasVersion"),
            )
            .unwrap();

        let limit = evaluate(&mut registry, child, Expr::self_constant("LIMIT")).unwrap();
        assert_eq!(limit, Value::Int(10));
        let parent_limit = evaluate(&mut registry, child, Expr::parent_constant("LIMIT")).unwrap();
        assert_eq!(parent_limit, Value::Int(10));
        let version = evaluate(&mut registry, child, Expr::self_constant("VERSION")).unwrap();
        assert_eq!(version, Value::Int(3));
    }

    #[test]
    fn parent_without_parent_class() {
        let mut registry = ClassRegistry::new();
        let id = registry.register(ClassEntry::class("Root")).unwrap();

        let err = evaluate(&mut registry, id, Expr::parent_constant("X")).unwrap_err();
        assert_eq!(err, ClassError::NoParentScope("Root".to_string()));
    }

    #[test]
    fn named_reference_uses_autoloader() {
        let mut registry = ClassRegistry::new();
        registry.set_autoloader(|name: &ClassName| {
            (name.key() == "limits").then(|| {
                ClassEntry::class("Limits").with_constant(ConstantEntry::new("MAX", 5))
            })
        });
        let id = registry.register(ClassEntry::class("User")).unwrap();

        let value = evaluate(&mut registry, id, Expr::class_constant("Limits", "MAX")).unwrap();
        assert_eq!(value, Value::Int(5));

        let err = evaluate(&mut registry, id, Expr::class_constant("Nowhere", "MAX")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn deferred_property_default() {
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(
                ClassEntry::class("Paging")
                    .with_constant(ConstantEntry::new("SIZE", 25))
                    .with_property(
                        PropertyEntry::new("perPage", Modifiers::STATIC)
                            .with_default_expr(Expr::self_constant("SIZE")),
                    )
                    .with_property(PropertyEntry::new("page", Modifiers::PUBLIC)),
            )
            .unwrap();

        let mut in_progress = InProgress::default();
        ConstEvaluator::new(&mut registry, id, &mut in_progress)
            .force_declared()
            .unwrap();

        let entry = registry.entry(id).unwrap();
        assert_eq!(entry.find_property("perPage").unwrap().default_value(), Some(&Value::Int(25)));
        assert!(entry.find_property("page").unwrap().default.is_none());
    }
}
