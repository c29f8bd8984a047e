//! Declaration modifiers for classes, properties and methods.

use std::fmt;

use bitflags::bitflags;

/// Visibility of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

bitflags! {
    /// Attribute bit-set attached to a declaration.
    ///
    /// A member with no visibility bit is public.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 0x01;
        const PROTECTED = 0x02;
        const PRIVATE = 0x04;
        const STATIC = 0x08;
        const ABSTRACT = 0x10;
        const FINAL = 0x20;
        const READONLY = 0x40;
    }
}

impl Modifiers {
    /// Check for the `static` modifier.
    #[inline]
    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Check for the `abstract` modifier.
    #[inline]
    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    /// Check for the `final` modifier.
    #[inline]
    pub fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    /// Check for the `readonly` modifier.
    #[inline]
    pub fn is_readonly(self) -> bool {
        self.contains(Self::READONLY)
    }

    /// The declared visibility, public when none is set.
    ///
    /// The most restrictive bit wins if several are present.
    pub fn visibility(self) -> Visibility {
        if self.contains(Self::PRIVATE) {
            Visibility::Private
        } else if self.contains(Self::PROTECTED) {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }
}

impl From<Visibility> for Modifiers {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Modifiers::PUBLIC,
            Visibility::Protected => Modifiers::PROTECTED,
            Visibility::Private => Modifiers::PRIVATE,
        }
    }
}

impl fmt::Display for Modifiers {
    /// Source-order keywords followed by a trailing space, empty when no flag is set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_abstract() {
            f.write_str("abstract ")?;
        }
        if self.is_final() {
            f.write_str("final ")?;
        }
        if self.intersects(Self::PUBLIC | Self::PROTECTED | Self::PRIVATE) {
            write!(f, "{} ", self.visibility())?;
        }
        if self.is_static() {
            f.write_str("static ")?;
        }
        if self.is_readonly() {
            f.write_str("readonly ")?;
        }
        Ok(())
    }
}
