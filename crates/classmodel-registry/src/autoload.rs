//! Autoload hook invoked when a class name is not registered.

use classmodel_core::{ClassEntry, ClassName};

/// Supplies class declarations on demand.
///
/// Called at most once per failed lookup. Returning an entry registers it;
/// returning `None` (or an entry for a different name) leaves the lookup
/// failing with `ClassNotFound`.
pub trait Autoloader: Send + Sync {
    /// Produce the declaration for `name`, if this loader knows it.
    fn autoload(&mut self, name: &ClassName) -> Option<ClassEntry>;
}

impl<F> Autoloader for F
where
    F: FnMut(&ClassName) -> Option<ClassEntry> + Send + Sync,
{
    fn autoload(&mut self, name: &ClassName) -> Option<ClassEntry> {
        self(name)
    }
}
