//! Class registry and inheritance resolution.
//!
//! [`ClassRegistry`] owns every class descriptor in an arena addressed by
//! [`ClassId`](classmodel_core::ClassId). Classes are registered unresolved and
//! linked on first use (or eagerly) by the inheritance resolver, which:
//!
//! 1. resolves the parent and interfaces through the registry, autoloading
//!    missing names and rejecting cycles via the in-progress stack
//! 2. builds the ancestor set used by [`ClassRegistry::is_instance_of`]
//! 3. merges the parent's method table under the class's own methods
//! 4. forces every lazy constant and property default
//!
//! Static property storage is created on first access and seeded from the
//! resolved defaults.

mod autoload;
mod config;
mod constants;
mod registry;
mod resolved;
mod resolver;
mod static_storage;
mod verify;

pub use autoload::Autoloader;
pub use config::RegistryConfig;
pub use registry::ClassRegistry;
pub use resolved::ResolvedClass;
pub use static_storage::StaticStorage;
