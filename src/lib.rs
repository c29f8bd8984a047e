//! Class model for a PHP-compatible runtime.
//!
//! Turns parsed class declarations into resolved, linked class descriptors:
//! inheritance graph, merged method tables with override semantics, lazily
//! evaluated constants and property defaults, and lazily created static
//! storage.
//!
//! # Example
//!
//! ```
//! use classmodel::prelude::*;
//!
//! let mut runtime = Runtime::new();
//! runtime
//!     .declare(ClassEntry::class("Shape").with_constant(ConstantEntry::new("SIDES", 0)))
//!     .unwrap();
//! let square = runtime
//!     .declare(
//!         ClassEntry::class("Square")
//!             .with_parent("Shape")
//!             .with_constant(ConstantEntry::new("SIDES", 4)),
//!     )
//!     .unwrap();
//!
//! let registry = runtime.global_registry_mut();
//! let shape = registry.lookup(&"shape".into()).unwrap();
//! assert!(registry.is_instance_of(square, shape).unwrap());
//! assert_eq!(registry.constant(square, "SIDES").unwrap(), Value::Int(4));
//! ```

mod runtime;

pub use runtime::Runtime;

pub use classmodel_core::{
    BinaryOp, Callable, ClassEntry, ClassError, ClassId, ClassKind, ClassName, ClassRef,
    ConstExpr, ConstScope, ConstantEntry, Expr, LazyValue, MethodEntry, Modifiers,
    PropertyEntry, Span, Value, Visibility, DEFAULT_CONSTRUCTOR_NAME,
};
pub use classmodel_registry::{
    Autoloader, ClassRegistry, RegistryConfig, ResolvedClass, StaticStorage,
};

/// Commonly used types for declaring and querying classes.
pub mod prelude {
    pub use crate::Runtime;
    pub use classmodel_core::{
        Callable, ClassEntry, ClassError, ClassId, ClassKind, ClassName, ConstantEntry, Expr,
        MethodEntry, Modifiers, PropertyEntry, Value,
    };
    pub use classmodel_registry::{ClassRegistry, RegistryConfig, StaticStorage};
}
