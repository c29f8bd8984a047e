//! Core types for the class model.
//!
//! This crate holds everything a class declaration is made of before and
//! after inheritance resolution:
//!
//! - [`ClassName`] - namespace-qualified, case-insensitive class identity
//! - [`Modifiers`], [`Visibility`] - declaration attribute bit-set
//! - [`ClassKind`] - class, interface or trait
//! - [`Value`] - the opaque runtime value stored in constants and properties
//! - [`LazyValue`], [`ConstExpr`], [`ConstScope`] - deferred constant expressions
//! - [`ClassEntry`] and its members - the declared shape of a class
//! - [`ClassError`] - every failure the class model can report
//!
//! Resolution itself (registry, resolver, static storage) lives in
//! `classmodel-registry`.

mod class_name;
mod error;
mod expr;
mod ids;
mod kind;
mod lazy;
mod modifiers;
mod span;
mod value;

pub mod entries;

pub use class_name::ClassName;
pub use entries::{Callable, ClassEntry, ConstantEntry, MethodEntry, PropertyEntry};
pub use error::ClassError;
pub use expr::{BinaryOp, ClassRef, ConstExpr, ConstScope, Expr};
pub use ids::ClassId;
pub use kind::ClassKind;
pub use lazy::LazyValue;
pub use modifiers::{Modifiers, Visibility};
pub use span::Span;
pub use value::Value;

/// Name of the method that acts as a class constructor unless configured otherwise.
pub const DEFAULT_CONSTRUCTOR_NAME: &str = "__construct";
