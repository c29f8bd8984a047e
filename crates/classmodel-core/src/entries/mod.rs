//! Class descriptor entry types.
//!
//! - [`ClassEntry`] - declared shape of a class, interface or trait
//! - [`MethodEntry`] - a method with its opaque [`Callable`] body
//! - [`PropertyEntry`] - a declared property and its lazy default
//! - [`ConstantEntry`] - a class constant and its lazy value

mod class;
mod constant;
mod method;
mod property;

pub use class::ClassEntry;
pub use constant::ConstantEntry;
pub use method::{Callable, MethodEntry};
pub use property::PropertyEntry;

/// Fold a method name for case-insensitive lookup.
pub(crate) fn method_key(name: &str) -> String {
    name.to_ascii_lowercase()
}
