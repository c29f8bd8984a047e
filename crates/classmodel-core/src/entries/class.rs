//! Class descriptor entry.
//!
//! This module provides `ClassEntry`, the declared shape of a class,
//! interface or trait as handed over by the parser. Names of parents and
//! interfaces are stored unresolved; the registry links them later.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ClassKind, ClassName, Modifiers, Span};

use super::{ConstantEntry, MethodEntry, PropertyEntry, method_key};

/// Declared shape of a class-like type.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Fully qualified name.
    pub name: ClassName,
    /// Class, interface or trait.
    pub kind: ClassKind,
    /// Class modifiers (`abstract`, `final`, `readonly`).
    pub modifiers: Modifiers,
    /// Declaration location.
    pub span: Span,

    // === Inheritance (unresolved) ===
    /// Declared parent class name (single inheritance).
    pub parent: Option<ClassName>,
    /// Implemented interfaces, or extended interfaces for an interface, in declaration order.
    pub interfaces: Vec<ClassName>,

    // === Members ===
    /// Constants in declaration order.
    pub constants: IndexMap<String, ConstantEntry>,
    /// Properties in declaration order.
    pub properties: Vec<PropertyEntry>,
    /// Methods keyed by case-folded name, in declaration order.
    pub methods: IndexMap<String, Arc<MethodEntry>>,
}

impl ClassEntry {
    /// Create an empty entry of the given kind.
    pub fn new(name: impl Into<ClassName>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::empty(),
            span: Span::default(),
            parent: None,
            interfaces: Vec::new(),
            constants: IndexMap::new(),
            properties: Vec::new(),
            methods: IndexMap::new(),
        }
    }

    /// Create a class entry.
    pub fn class(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassKind::Class)
    }

    /// Create an interface entry.
    pub fn interface(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    // === Builder Methods ===

    /// Set the declared parent.
    pub fn with_parent(mut self, parent: impl Into<ClassName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add an implemented (or extended, for interfaces) interface.
    pub fn with_interface(mut self, interface: impl Into<ClassName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a constant. A later constant with the same name replaces the earlier one.
    pub fn with_constant(mut self, constant: ConstantEntry) -> Self {
        self.constants.insert(constant.name.clone(), constant);
        self
    }

    /// Add a property.
    pub fn with_property(mut self, property: PropertyEntry) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a method, recording this class as its declaring class.
    pub fn with_method(mut self, mut method: MethodEntry) -> Self {
        method.class = Some(self.name.clone());
        self.methods.insert(method_key(&method.name), Arc::new(method));
        self
    }

    /// Set class modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the declaration location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Mark as abstract.
    pub fn as_abstract(mut self) -> Self {
        self.modifiers |= Modifiers::ABSTRACT;
        self
    }

    /// Mark as final.
    pub fn as_final(mut self) -> Self {
        self.modifiers |= Modifiers::FINAL;
        self
    }

    // === Query Methods ===

    /// Check if the class is abstract. Interfaces always are.
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract() || self.kind.is_interface()
    }

    /// Check if the class is final.
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    /// Find a method declared on this class, ignoring case.
    pub fn find_method(&self, name: &str) -> Option<&Arc<MethodEntry>> {
        self.methods.get(&method_key(name))
    }

    /// Find a property declared on this class.
    pub fn find_property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Find a constant declared on this class.
    pub fn find_constant(&self, name: &str) -> Option<&ConstantEntry> {
        self.constants.get(name)
    }

    /// Static properties declared on this class, in declaration order.
    pub fn static_properties(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.properties.iter().filter(|p| p.is_static())
    }

    /// Names this class refers to by inheritance: parent first, then interfaces.
    pub fn referenced_names(&self) -> impl Iterator<Item = &ClassName> {
        self.parent.iter().chain(self.interfaces.iter())
    }
}

impl fmt::Display for ClassEntry {
    /// Declaration header, e.g. `abstract class App\Repo extends Base implements Countable`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.modifiers, self.kind, self.name)?;
        if let Some(parent) = &self.parent {
            write!(f, " extends {parent}")?;
        }
        if !self.interfaces.is_empty() {
            let keyword = if self.kind.is_interface() {
                "extends"
            } else {
                "implements"
            };
            let names: Vec<&str> = self.interfaces.iter().map(ClassName::as_str).collect();
            write!(f, " {keyword} {}", names.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::Callable;

    #[derive(Debug)]
    struct Body;

    impl Callable for Body {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn method(name: &str) -> MethodEntry {
        MethodEntry::new(name, Modifiers::PUBLIC, Arc::new(Body))
    }

    #[test]
    fn class_entry_with_parent_and_interfaces() {
        let entry = ClassEntry::class("App\\Sprite")
            .with_parent("App\\Entity")
            .with_interface("Drawable")
            .with_interface("Updatable");

        assert_eq!(entry.parent, Some(ClassName::new("app\\entity")));
        let names: Vec<&str> = entry.referenced_names().map(ClassName::as_str).collect();
        assert_eq!(names, vec!["App\\Entity", "Drawable", "Updatable"]);
    }

    #[test]
    fn method_lookup_ignores_case() {
        let entry = ClassEntry::class("Entity").with_method(method("Update"));

        let found = entry.find_method("UPDATE").unwrap();
        assert_eq!(found.name, "Update");
        assert_eq!(found.class, Some(ClassName::new("Entity")));
        assert!(entry.find_method("render").is_none());
    }

    #[test]
    fn static_properties_keep_order() {
        let entry = ClassEntry::class("Counter")
            .with_property(PropertyEntry::new("b", Modifiers::STATIC))
            .with_property(PropertyEntry::new("instance", Modifiers::PUBLIC))
            .with_property(PropertyEntry::new("a", Modifiers::STATIC));

        let names: Vec<&str> = entry.static_properties().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(entry.find_property("instance").is_some());
    }

    #[test]
    fn constants_by_name() {
        let entry = ClassEntry::class("Limits").with_constant(ConstantEntry::new("MAX", 10));
        assert!(entry.find_constant("MAX").is_some());
        assert!(entry.find_constant("max").is_none());
    }

    #[test]
    fn modifiers() {
        let entry = ClassEntry::class("Base").as_abstract();
        assert!(entry.is_abstract());
        assert!(!entry.is_final());
        assert!(ClassEntry::interface("Countable").is_abstract());
    }

    #[test]
    fn display_header() {
        let entry = ClassEntry::class("App\\Repo")
            .as_abstract()
            .with_parent("Base")
            .with_interface("Countable")
            .with_interface("IteratorAggregate");
        assert_eq!(
            entry.to_string(),
            "abstract class App\\Repo extends Base implements Countable, IteratorAggregate"
        );

        let iface = ClassEntry::interface("Stream").with_interface("Readable");
        assert_eq!(iface.to_string(), "interface Stream extends Readable");
    }
}
