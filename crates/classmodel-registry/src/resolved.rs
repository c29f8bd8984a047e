//! Links produced by resolving a class.

use std::sync::Arc;

use classmodel_core::{ClassId, MethodEntry};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Resolved inheritance data of a class.
///
/// Built once by the resolver and never modified afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedClass {
    /// Resolved parent class.
    pub parent: Option<ClassId>,
    /// Resolved interfaces, in declaration order.
    pub interfaces: Vec<ClassId>,
    /// Every class reachable through the parent chain and interfaces,
    /// including the class itself.
    pub ancestors: FxHashSet<ClassId>,
    /// Own methods overlaid on inherited ones, keyed by case-folded name.
    /// Inherited entries are shared with the declaring class.
    pub methods: IndexMap<String, Arc<MethodEntry>>,
    /// Merged-table entry for the configured constructor name.
    pub constructor: Option<Arc<MethodEntry>>,
}

impl ResolvedClass {
    /// O(1) ancestor membership.
    #[inline]
    pub fn has_ancestor(&self, candidate: ClassId) -> bool {
        self.ancestors.contains(&candidate)
    }

    /// Find a method in the merged table, ignoring case.
    pub fn find_method(&self, name: &str) -> Option<&Arc<MethodEntry>> {
        self.methods.get(&name.to_ascii_lowercase())
    }
}
