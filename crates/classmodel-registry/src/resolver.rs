//! Inheritance resolution.
//!
//! Links a registered class to its parent and interfaces, resolving them
//! first (depth-first), then builds the class's ancestor set and merged
//! method table and forces its constants and property defaults.
//!
//! ## Cycle Detection
//!
//! Ids being resolved are kept on the registry's resolution stack. Reaching
//! an id already on the stack means the class inherits from itself; the
//! error reports the chain from that id back to itself.
//!
//! ## Failure
//!
//! A class whose resolution fails is marked failed with the error. It is
//! never usable afterwards, and resolving it again returns the same error.

use std::sync::Arc;

use classmodel_core::{ClassError, ClassId, MethodEntry};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::constants::{ConstEvaluator, InProgress};
use crate::registry::ResolutionState;
use crate::{verify, ClassRegistry, ResolvedClass};

/// Depth-first resolver over a registry.
pub(crate) struct InheritanceResolver<'reg> {
    registry: &'reg mut ClassRegistry,
}

impl<'reg> InheritanceResolver<'reg> {
    pub(crate) fn new(registry: &'reg mut ClassRegistry) -> Self {
        Self { registry }
    }

    /// Resolve `id` and everything it inherits from.
    pub(crate) fn resolve(&mut self, id: ClassId) -> Result<(), ClassError> {
        match &self.registry.slot(id).state {
            ResolutionState::Resolved(_) => return Ok(()),
            ResolutionState::Failed(err) => return Err(err.clone()),
            ResolutionState::Unresolved => {}
        }

        if let Some(start) = self.registry.resolving.iter().position(|&c| c == id) {
            let mut chain: Vec<String> = self.registry.resolving[start..]
                .iter()
                .map(|&c| self.registry.class_name(c))
                .collect();
            chain.push(self.registry.class_name(id));
            return Err(ClassError::InheritanceCycle {
                name: self.registry.class_name(id),
                chain,
            });
        }

        debug!(class = %self.registry.slot(id).entry.name, "resolving class");
        self.registry.resolving.push(id);
        let result = self.link(id);
        self.registry.resolving.pop();

        match result {
            Ok(resolved) => {
                debug!(
                    class = %self.registry.slot(id).entry.name,
                    ancestors = resolved.ancestors.len(),
                    methods = resolved.methods.len(),
                    "resolved class"
                );
                self.registry.slot_mut(id).state = ResolutionState::Resolved(Box::new(resolved));
                Ok(())
            }
            Err(err) => {
                warn!(
                    class = %self.registry.slot(id).entry.name,
                    error = %err,
                    "class resolution failed"
                );
                self.registry.slot_mut(id).state = ResolutionState::Failed(err.clone());
                Err(err)
            }
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn link(&mut self, id: ClassId) -> Result<ResolvedClass, ClassError> {
        let verify = self.registry.config().verify_inheritance();
        let entry = &self.registry.slot(id).entry;
        let (parent_name, interface_names) = (entry.parent.clone(), entry.interfaces.clone());

        let mut ancestors = FxHashSet::default();
        ancestors.insert(id);
        let mut methods: IndexMap<String, Arc<MethodEntry>> = IndexMap::new();

        let parent = match parent_name {
            Some(name) => {
                let parent_id = self.registry.lookup(&name)?;
                self.resolve(parent_id)?;
                if verify {
                    verify::check_parent(self.registry, id, parent_id)?;
                }
                let resolved = self.registry.resolved(parent_id)?;
                ancestors.extend(resolved.ancestors.iter().copied());
                methods = resolved.methods.clone();
                Some(parent_id)
            }
            None => None,
        };
        let inherited = methods.len();

        let mut interfaces = Vec::with_capacity(interface_names.len());
        for name in &interface_names {
            let interface_id = self.registry.lookup(name)?;
            self.resolve(interface_id)?;
            if verify {
                verify::check_interface(self.registry, id, interface_id)?;
            }
            ancestors.extend(self.registry.resolved(interface_id)?.ancestors.iter().copied());
            interfaces.push(interface_id);
        }

        // Own methods replace inherited ones under the same folded name
        let own: Vec<_> = self
            .registry
            .slot(id)
            .entry
            .methods
            .iter()
            .map(|(key, method)| (key.clone(), Arc::clone(method)))
            .collect();
        for (key, method) in own {
            if verify {
                if let Some(overridden) = methods.get(&key) {
                    verify::check_override(self.registry, id, overridden)?;
                }
            }
            methods.insert(key, method);
        }
        trace!(inherited, total = methods.len(), "merged method table");

        let mut in_progress = InProgress::default();
        ConstEvaluator::new(self.registry, id, &mut in_progress).force_declared()?;

        let constructor = methods.get(&self.registry.config().constructor_key()).cloned();

        Ok(ResolvedClass {
            parent,
            interfaces,
            ancestors,
            methods,
            constructor,
        })
    }
}
