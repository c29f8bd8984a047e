//! Method entries.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{ClassName, Modifiers, Span};

/// Executable body of a method.
///
/// The class model only stores and forwards bodies; the execution engine
/// downcasts through [`Callable::as_any`] to its own representation.
pub trait Callable: fmt::Debug + Send + Sync {
    /// Access the concrete body type.
    fn as_any(&self) -> &dyn Any;
}

/// A declared method.
///
/// Held behind `Arc` so that a subclass inheriting the method shares the
/// exact entry of the class declaring it.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    /// Name as declared.
    pub name: String,
    /// Class declaring this method. Set when the method is added to a class.
    pub class: Option<ClassName>,
    /// Declaration modifiers.
    pub modifiers: Modifiers,
    /// Executable body.
    pub body: Arc<dyn Callable>,
    /// Declaration location.
    pub span: Span,
}

impl MethodEntry {
    /// Create a method with the given body.
    pub fn new(name: impl Into<String>, modifiers: Modifiers, body: Arc<dyn Callable>) -> Self {
        Self {
            name: name.into(),
            class: None,
            modifiers,
            body,
            span: Span::default(),
        }
    }

    /// Set the declaration location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Check if the method is static.
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// Check if the method is abstract.
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    /// Check if the method is final.
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    /// `Class::name` for diagnostics.
    pub fn qualified_name(&self) -> String {
        match &self.class {
            Some(class) => format!("{class}::{}", self.name),
            None => self.name.clone(),
        }
    }
}
