//! Error type for the class model.
//!
//! Every failure of registration, lookup, resolution and constant evaluation
//! is a [`ClassError`]. It is `Clone` because a class whose resolution failed
//! keeps its error and re-reports it on every later attempt.

use thiserror::Error;

/// Errors raised while registering, resolving or evaluating classes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassError {
    /// A class with this name is already registered.
    #[error("cannot declare class {0}, because the name is already in use")]
    DuplicateClass(String),

    /// A class name could not be bound, even after autoloading.
    #[error("class \"{0}\" not found")]
    ClassNotFound(String),

    /// A class transitively extends or implements itself.
    #[error("circular inheritance for '{name}' via {}", chain.join(" -> "))]
    InheritanceCycle {
        /// The class found twice on the resolution stack.
        name: String,
        /// Resolution stack from the first occurrence back to `name`.
        chain: Vec<String>,
    },

    /// A constant or property default depends on its own value.
    #[error("cannot declare self-referencing constant {class}::{name}")]
    CircularConstant {
        /// Class declaring the expression.
        class: String,
        /// Constant or property name.
        name: String,
    },

    /// An operation needing a resolved class was given an unresolved one.
    #[error("class {0} has not been resolved")]
    NotResolved(String),

    /// A constant fetch names a constant that no class in the chain declares.
    #[error("undefined constant {class}::{name}")]
    UndefinedConstant {
        /// Class the fetch was made on.
        class: String,
        /// Constant name.
        name: String,
    },

    /// `parent::` used in a class without a parent.
    #[error("cannot use \"parent\" when current class scope has no parent ({0})")]
    NoParentScope(String),

    /// The inheritance declaration breaks a structural rule.
    #[error("class {class} cannot inherit from {target}: {reason}")]
    InvalidInheritance {
        /// The declaring class.
        class: String,
        /// The parent, interface or method owner involved.
        target: String,
        /// Which rule was broken.
        reason: String,
    },

    /// A constant expression could not be evaluated.
    #[error("constant expression error: {0}")]
    Evaluation(String),
}

impl ClassError {
    /// Check if this is an inheritance cycle.
    pub fn is_inheritance_cycle(&self) -> bool {
        matches!(self, ClassError::InheritanceCycle { .. })
    }

    /// Check if this is a circular constant.
    pub fn is_circular_constant(&self) -> bool {
        matches!(self, ClassError::CircularConstant { .. })
    }

    /// Check if this is a missing class.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClassError::ClassNotFound(_))
    }
}
