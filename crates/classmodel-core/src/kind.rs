//! Class kinds.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// What a class-like declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ClassKind {
    #[default]
    Class = 0,
    Interface = 1,
    Trait = 2,
}

impl ClassKind {
    /// The declaration keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
        }
    }

    /// Check if this is a concrete or abstract class.
    #[inline]
    pub fn is_class(self) -> bool {
        self == ClassKind::Class
    }

    /// Check if this is an interface.
    #[inline]
    pub fn is_interface(self) -> bool {
        self == ClassKind::Interface
    }

    /// Check if this is a trait.
    #[inline]
    pub fn is_trait(self) -> bool {
        self == ClassKind::Trait
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
