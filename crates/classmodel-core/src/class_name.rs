//! Class names.
//!
//! Namespace-qualified identity of a class, compared case-insensitively.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Namespace-qualified class name.
///
/// Keeps the spelling used at declaration for display, and compares by a
/// folded key: ASCII lowercase with any leading `\` removed. Class names are
/// case-insensitive, so `App\User`, `\app\user` and `APP\USER` are equal.
///
/// # Examples
///
/// ```
/// use classmodel_core::ClassName;
///
/// let name = ClassName::new("\\App\\Models\\User");
/// assert_eq!(name.to_string(), "App\\Models\\User");
/// assert_eq!(name.short_name(), "User");
/// assert_eq!(name.namespace(), Some("App\\Models"));
/// assert_eq!(name, ClassName::new("app\\models\\USER"));
/// ```
#[derive(Clone)]
pub struct ClassName {
    name: String,
    key: String,
}

impl ClassName {
    /// Namespace separator.
    pub const SEPARATOR: char = '\\';

    /// Create a class name from its written form.
    ///
    /// A leading `\` (fully-qualified reference) is normalized away.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = match name.strip_prefix(Self::SEPARATOR) {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        let key = name.to_ascii_lowercase();
        Self { name, key }
    }

    /// The name as declared.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The case-folded lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The name without its namespace.
    pub fn short_name(&self) -> &str {
        match self.name.rfind(Self::SEPARATOR) {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    /// The namespace part, if the name is not in the global namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rfind(Self::SEPARATOR).map(|pos| &self.name[..pos])
    }

    /// Check if this name is in the global namespace.
    pub fn is_global(&self) -> bool {
        !self.name.contains(Self::SEPARATOR)
    }

    /// Create a name for `short_name` inside this name's namespace.
    pub fn sibling(&self, short_name: &str) -> Self {
        match self.namespace() {
            Some(ns) => Self::new(format!("{ns}{}{short_name}", Self::SEPARATOR)),
            None => Self::new(short_name),
        }
    }
}

impl PartialEq for ClassName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClassName {}

impl Hash for ClassName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.name)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
