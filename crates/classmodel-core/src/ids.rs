//! Stable identifiers for registered classes.

use std::fmt;

/// Index of a class descriptor inside the registry arena.
///
/// Ids are handed out in registration order and stay valid for the lifetime
/// of the registry that issued them; classes are never unloaded. An id from
/// one registry means nothing to another.
///
/// # Example
///
/// ```
/// use classmodel_core::ClassId;
///
/// let id = ClassId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// Create a class id from an arena index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_basics() {
        let id = ClassId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "class#42");
        assert!(ClassId::new(1) < ClassId::new(2));
    }
}
