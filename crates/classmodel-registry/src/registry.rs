//! ClassRegistry - arena of class descriptors addressed by [`ClassId`].
//!
//! # Storage Model
//!
//! - **Slots**: every registered class lives in a `Vec` slot holding its
//!   declared [`ClassEntry`], its resolution state and, once touched, its
//!   [`StaticStorage`]. A slot is never removed, so a [`ClassId`] stays valid
//!   for the registry's lifetime.
//! - **Name index**: case-folded class name to id. A binding never changes.
//! - **Resolution stack**: ids whose resolution is in progress, used to
//!   detect inheritance cycles.
//!
//! # Thread Safety
//!
//! `ClassRegistry` is `Send` but not internally synchronized. Registration and
//! resolution take `&mut self`; queries on resolved classes take `&self`.
//! Hosts sharing one registry between threads wrap it in their own lock
//! (e.g. `Arc<RwLock<ClassRegistry>>`).
//!
//! # Example
//!
//! ```
//! use classmodel_core::ClassEntry;
//! use classmodel_registry::ClassRegistry;
//!
//! let mut registry = ClassRegistry::new();
//! registry.register(ClassEntry::class("Animal")).unwrap();
//! registry.register(ClassEntry::class("Dog").with_parent("Animal")).unwrap();
//!
//! let dog = registry.resolve(&"Dog".into()).unwrap();
//! let animal = registry.lookup(&"animal".into()).unwrap();
//! assert!(registry.is_instance_of(dog, animal).unwrap());
//! ```

use std::fmt;
use std::sync::Arc;

use classmodel_core::{
    ClassEntry, ClassError, ClassId, ClassName, ClassRef, ConstScope, LazyValue, MethodEntry, Value,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::constants::{ConstEvaluator, InProgress, LazySlot};
use crate::resolver::InheritanceResolver;
use crate::{Autoloader, RegistryConfig, ResolvedClass, StaticStorage};

/// Where a class is in its resolution lifecycle.
#[derive(Debug)]
pub(crate) enum ResolutionState {
    /// Registered, not linked yet (or currently being linked).
    Unresolved,
    /// Linked; immutable from now on.
    Resolved(Box<ResolvedClass>),
    /// Linking failed; the error is re-reported on every attempt.
    Failed(ClassError),
}

/// One registered class.
#[derive(Debug)]
pub(crate) struct ClassSlot {
    pub(crate) entry: ClassEntry,
    pub(crate) state: ResolutionState,
    pub(crate) statics: Option<StaticStorage>,
}

/// Registry of class descriptors and their resolution state.
///
/// Ids handed out by one registry must not be passed to another; methods
/// taking a [`ClassId`] panic on ids they did not issue.
#[derive(Default)]
pub struct ClassRegistry {
    config: RegistryConfig,
    slots: Vec<ClassSlot>,
    by_name: FxHashMap<String, ClassId>,
    autoloader: Option<Box<dyn Autoloader>>,
    /// Classes whose resolution is in progress, outermost first.
    pub(crate) resolving: Vec<ClassId>,
}

impl ClassRegistry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Install the hook consulted when a lookup misses.
    pub fn set_autoloader(&mut self, autoloader: impl Autoloader + 'static) {
        self.autoloader = Some(Box::new(autoloader));
    }

    /// Remove the autoload hook.
    pub fn clear_autoloader(&mut self) {
        self.autoloader = None;
    }

    // ==========================================================================
    // Registration & Lookup
    // ==========================================================================

    /// Register an unresolved class under its declared name.
    ///
    /// Returns an error if the name is already bound.
    pub fn register(&mut self, entry: ClassEntry) -> Result<ClassId, ClassError> {
        let key = entry.name.key().to_string();
        if self.by_name.contains_key(&key) {
            return Err(ClassError::DuplicateClass(entry.name.to_string()));
        }

        let id = ClassId::new(self.slots.len() as u32);
        debug!(
            class = %entry.name,
            kind = %entry.kind,
            span = %entry.span,
            %id,
            "registered class"
        );
        self.by_name.insert(key, id);
        self.slots.push(ClassSlot {
            entry,
            state: ResolutionState::Unresolved,
            statics: None,
        });
        Ok(id)
    }

    /// Get the id bound to a name, without autoloading.
    pub fn get_id(&self, name: &ClassName) -> Option<ClassId> {
        self.by_name.get(name.key()).copied()
    }

    /// Check if a name is bound, without autoloading.
    pub fn contains(&self, name: &ClassName) -> bool {
        self.by_name.contains_key(name.key())
    }

    /// Find the class bound to `name`.
    ///
    /// On a miss the autoload hook runs once; if the name is still unbound
    /// afterwards the lookup fails with `ClassNotFound`.
    pub fn lookup(&mut self, name: &ClassName) -> Result<ClassId, ClassError> {
        if let Some(id) = self.get_id(name) {
            return Ok(id);
        }

        if let Some(loader) = self.autoloader.as_mut() {
            trace!(class = %name, "autoloading class");
            if let Some(entry) = loader.autoload(name) {
                if let Err(err) = self.register(entry) {
                    warn!(class = %name, error = %err, "autoloaded class rejected");
                }
            }
        }

        self.get_id(name)
            .ok_or_else(|| ClassError::ClassNotFound(name.to_string()))
    }

    // ==========================================================================
    // Resolution
    // ==========================================================================

    /// Look up a class and resolve it if needed. Idempotent.
    pub fn resolve(&mut self, name: &ClassName) -> Result<ClassId, ClassError> {
        let id = self.lookup(name)?;
        self.resolve_id(id)?;
        Ok(id)
    }

    /// Resolve an already registered class. Idempotent.
    ///
    /// A class whose resolution failed before fails again with the same
    /// error, without retrying.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_id(&mut self, id: ClassId) -> Result<(), ClassError> {
        InheritanceResolver::new(self).resolve(id)
    }

    /// Resolve every registered class, collecting failures.
    ///
    /// Classes registered by the autoloader during this pass are resolved too.
    pub fn resolve_all(&mut self) -> Vec<(ClassId, ClassError)> {
        let mut errors = Vec::new();
        let mut index = 0;
        while index < self.slots.len() {
            let id = ClassId::new(index as u32);
            if let Err(err) = self.resolve_id(id) {
                errors.push((id, err));
            }
            index += 1;
        }
        errors
    }

    /// Check if a class has been resolved successfully.
    pub fn is_resolved(&self, id: ClassId) -> bool {
        matches!(self.slot(id).state, ResolutionState::Resolved(_))
    }

    /// The stored error of a class whose resolution failed.
    pub fn resolution_error(&self, id: ClassId) -> Option<&ClassError> {
        match &self.slot(id).state {
            ResolutionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Resolved links of a class.
    ///
    /// Fails with `NotResolved` for a class that was never resolved, and with
    /// the stored error for one whose resolution failed.
    pub fn resolved(&self, id: ClassId) -> Result<&ResolvedClass, ClassError> {
        match &self.slot(id).state {
            ResolutionState::Resolved(resolved) => Ok(resolved),
            ResolutionState::Failed(err) => Err(err.clone()),
            ResolutionState::Unresolved => Err(ClassError::NotResolved(self.class_name(id))),
        }
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    /// Declared shape of a class, resolved or not.
    pub fn entry(&self, id: ClassId) -> Option<&ClassEntry> {
        self.slots.get(id.index()).map(|slot| &slot.entry)
    }

    /// Iterate all registered classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassEntry)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (ClassId::new(index as u32), &slot.entry))
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no class is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` is `candidate` or has it as an ancestor.
    ///
    /// O(1). Never triggers resolution: an unresolved `id` is an error.
    pub fn is_instance_of(&self, id: ClassId, candidate: ClassId) -> Result<bool, ClassError> {
        Ok(self.resolved(id)?.has_ancestor(candidate))
    }

    /// Find a method in the merged table of a resolved class, ignoring case.
    pub fn find_method(
        &self,
        id: ClassId,
        name: &str,
    ) -> Result<Option<&Arc<MethodEntry>>, ClassError> {
        Ok(self.resolved(id)?.find_method(name))
    }

    /// Constructor of a resolved class, own or inherited.
    pub fn constructor(&self, id: ClassId) -> Result<Option<&Arc<MethodEntry>>, ClassError> {
        Ok(self.resolved(id)?.constructor.as_ref())
    }

    /// Value of `class::name`, evaluating it if still pending.
    ///
    /// The constant is searched on the class, then its parent chain, then its
    /// interfaces. A class whose resolution failed re-reports its error; an
    /// unresolved class is evaluated lazily without being resolved.
    pub fn constant(&mut self, id: ClassId, name: &str) -> Result<Value, ClassError> {
        if let Some(err) = self.resolution_error(id) {
            return Err(err.clone());
        }
        let mut in_progress = InProgress::default();
        ConstEvaluator::new(self, id, &mut in_progress).class_constant(&ClassRef::SelfClass, name)
    }

    // ==========================================================================
    // Static Storage
    // ==========================================================================

    /// Static property storage of a resolved class.
    ///
    /// Created on first call from the static properties declared on this
    /// class, in declaration order, each seeded with its resolved default or
    /// `null`. Later calls return the same storage.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn static_properties(&mut self, id: ClassId) -> Result<&mut StaticStorage, ClassError> {
        self.resolved(id)?;
        let ClassSlot { entry, statics, .. } = &mut self.slots[id.index()];
        Ok(statics.get_or_insert_with(|| seed_static_storage(entry)))
    }

    /// The class in `id`'s parent chain declaring static property `name`.
    ///
    /// A subclass that does not redeclare a static property shares the
    /// declaring ancestor's slot.
    pub fn find_static_owner(
        &self,
        id: ClassId,
        name: &str,
    ) -> Result<Option<ClassId>, ClassError> {
        let mut current = Some(id);
        while let Some(class) = current {
            let resolved = self.resolved(class)?;
            let declares = self
                .slot(class)
                .entry
                .find_property(name)
                .is_some_and(|p| p.is_static());
            if declares {
                return Ok(Some(class));
            }
            current = resolved.parent;
        }
        Ok(None)
    }

    /// Mutable access to the static property `name` as seen from `id`.
    pub fn static_property_mut(
        &mut self,
        id: ClassId,
        name: &str,
    ) -> Result<Option<&mut Value>, ClassError> {
        let Some(owner) = self.find_static_owner(id, name)? else {
            return Ok(None);
        };
        Ok(self.static_properties(owner)?.get_mut(name))
    }

    // ==========================================================================
    // Internal access
    // ==========================================================================

    pub(crate) fn slot(&self, id: ClassId) -> &ClassSlot {
        &self.slots[id.index()]
    }

    pub(crate) fn slot_mut(&mut self, id: ClassId) -> &mut ClassSlot {
        &mut self.slots[id.index()]
    }

    /// Declared name of a class, for diagnostics.
    pub(crate) fn class_name(&self, id: ClassId) -> String {
        self.slot(id).entry.name.to_string()
    }

    pub(crate) fn lazy(&self, slot: LazySlot) -> Option<&LazyValue> {
        match slot {
            LazySlot::Constant { class, index } => self
                .slot(class)
                .entry
                .constants
                .get_index(index)
                .map(|(_, c)| &c.value),
            LazySlot::PropertyDefault { class, index } => self
                .slot(class)
                .entry
                .properties
                .get(index)
                .and_then(|p| p.default.as_ref()),
        }
    }

    pub(crate) fn lazy_mut(&mut self, slot: LazySlot) -> Option<&mut LazyValue> {
        match slot {
            LazySlot::Constant { class, index } => self
                .slot_mut(class)
                .entry
                .constants
                .get_index_mut(index)
                .map(|(_, c)| &mut c.value),
            LazySlot::PropertyDefault { class, index } => self
                .slot_mut(class)
                .entry
                .properties
                .get_mut(index)
                .and_then(|p| p.default.as_mut()),
        }
    }

    /// `(class, member)` names of a lazy slot, for diagnostics.
    pub(crate) fn lazy_label(&self, slot: LazySlot) -> (String, String) {
        let entry = &self.slot(slot.class()).entry;
        let member = match slot {
            LazySlot::Constant { index, .. } => entry
                .constants
                .get_index(index)
                .map(|(name, _)| name.clone()),
            LazySlot::PropertyDefault { index, .. } => entry
                .properties
                .get(index)
                .map(|p| format!("${}", p.name)),
        };
        (entry.name.to_string(), member.unwrap_or_default())
    }
}

fn seed_static_storage(entry: &ClassEntry) -> StaticStorage {
    let mut storage = StaticStorage::new();
    for property in entry.static_properties() {
        let value = property.default_value().cloned().unwrap_or(Value::Null);
        storage.set(property.name.clone(), value);
    }
    trace!(class = %entry.name, properties = storage.len(), "created static storage");
    storage
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self
            .slots
            .iter()
            .filter(|s| matches!(s.state, ResolutionState::Resolved(_)))
            .count();
        f.debug_struct("ClassRegistry")
            .field("class_count", &self.slots.len())
            .field("resolved_count", &resolved)
            .field("has_autoloader", &self.autoloader.is_some())
            .field("config", &self.config)
            .finish()
    }
}
