//! Registry configuration.

use classmodel_core::DEFAULT_CONSTRUCTOR_NAME;

/// Behavior switches for a [`ClassRegistry`](crate::ClassRegistry).
///
/// # Example
///
/// ```
/// use classmodel_registry::RegistryConfig;
///
/// let config = RegistryConfig::default()
///     .with_constructor_name("init")
///     .with_verification(false);
/// assert_eq!(config.constructor_name(), "init");
/// assert!(!config.verify_inheritance());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    constructor_name: String,
    verify_inheritance: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            constructor_name: DEFAULT_CONSTRUCTOR_NAME.to_string(),
            verify_inheritance: true,
        }
    }
}

impl RegistryConfig {
    /// Set the method name designating a constructor.
    pub fn with_constructor_name(mut self, name: impl Into<String>) -> Self {
        self.constructor_name = name.into();
        self
    }

    /// Enable or disable the structural checks run during resolution
    /// (final parents, kind of parents and interfaces, final method overrides).
    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify_inheritance = enabled;
        self
    }

    /// The method name designating a constructor.
    pub fn constructor_name(&self) -> &str {
        &self.constructor_name
    }

    /// Whether structural checks run during resolution.
    pub fn verify_inheritance(&self) -> bool {
        self.verify_inheritance
    }

    /// Case-folded constructor name, as used for method table keys.
    pub(crate) fn constructor_key(&self) -> String {
        self.constructor_name.to_ascii_lowercase()
    }
}
