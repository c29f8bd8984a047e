//! Execution context owning the class registry.
//!
//! A `Runtime` is what executing code sees: class statements are run through
//! [`Runtime::declare`], and everything else (instance-of tests, method
//! dispatch lookups, static property access) goes through the registry it
//! owns.

use classmodel_core::{ClassEntry, ClassError, ClassId};
use classmodel_registry::{Autoloader, ClassRegistry, RegistryConfig};
use tracing::debug;

/// Execution context that owns the global class registry.
#[derive(Debug, Default)]
pub struct Runtime {
    registry: ClassRegistry,
}

impl Runtime {
    /// Create a runtime with the default registry configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runtime whose registry uses `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: ClassRegistry::with_config(config),
        }
    }

    /// The registry of every class known to this runtime.
    pub fn global_registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Mutable access to the global registry.
    pub fn global_registry_mut(&mut self) -> &mut ClassRegistry {
        &mut self.registry
    }

    /// Install the hook consulted when a class name is not registered.
    pub fn set_autoloader(&mut self, autoloader: impl Autoloader + 'static) {
        self.registry.set_autoloader(autoloader);
    }

    /// Run a class declaration: register the class, then resolve it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateClass` if the name is taken, or the resolution
    /// error. A class that fails to resolve stays registered in the failed
    /// state, so declaring it again reports `DuplicateClass`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn declare(&mut self, entry: ClassEntry) -> Result<ClassId, ClassError> {
        debug!(class = %entry.name, "declaring class");
        let id = self.registry.register(entry)?;
        self.registry.resolve_id(id)?;
        Ok(id)
    }
}
