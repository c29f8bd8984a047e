//! Structural checks run while linking a class.
//!
//! Enabled through [`RegistryConfig::with_verification`](crate::RegistryConfig::with_verification).
//! Each check fails with `InvalidInheritance`.

use classmodel_core::{ClassError, ClassId, MethodEntry};

use crate::ClassRegistry;

fn invalid(class: &str, target: impl Into<String>, reason: impl Into<String>) -> ClassError {
    ClassError::InvalidInheritance {
        class: class.to_string(),
        target: target.into(),
        reason: reason.into(),
    }
}

/// Only classes extend, only classes are extended, final classes are not.
pub(crate) fn check_parent(
    registry: &ClassRegistry,
    class: ClassId,
    parent: ClassId,
) -> Result<(), ClassError> {
    let child = &registry.slot(class).entry;
    let base = &registry.slot(parent).entry;
    let name = child.name.as_str();

    if !child.kind.is_class() {
        return Err(invalid(
            name,
            base.name.as_str(),
            format!("{}s extend through their interface list", child.kind),
        ));
    }
    if !base.kind.is_class() {
        return Err(invalid(
            name,
            base.name.as_str(),
            format!("{} is {} {}", base.name, article(base.kind.keyword()), base.kind),
        ));
    }
    if base.is_final() {
        return Err(invalid(name, base.name.as_str(), "parent class is final"));
    }
    Ok(())
}

/// Implemented (or extended) interfaces must be interfaces.
pub(crate) fn check_interface(
    registry: &ClassRegistry,
    class: ClassId,
    interface: ClassId,
) -> Result<(), ClassError> {
    let entry = &registry.slot(interface).entry;
    if entry.kind.is_interface() {
        return Ok(());
    }
    Err(invalid(
        registry.slot(class).entry.name.as_str(),
        entry.name.as_str(),
        format!("{} is not an interface", entry.name),
    ))
}

/// A final method cannot be redeclared by a subclass.
pub(crate) fn check_override(
    registry: &ClassRegistry,
    class: ClassId,
    overridden: &MethodEntry,
) -> Result<(), ClassError> {
    if !overridden.is_final() {
        return Ok(());
    }
    Err(invalid(
        registry.slot(class).entry.name.as_str(),
        overridden.qualified_name(),
        "cannot override final method",
    ))
}

fn article(word: &str) -> &'static str {
    match word.as_bytes().first() {
        Some(b'a' | b'e' | b'i' | b'o' | b'u') => "an",
        _ => "a",
    }
}
