//! Device-configuration qualifiers.
//!
//! Qualifier matching (which configuration a device picks at runtime) belongs to the
//! runtime and to the qualifier parser, not to the table. Here a configuration is an
//! opaque, totally ordered key: two values are stored under the same slot exactly when
//! their configurations are equal.

use std::{convert::Infallible, fmt, str::FromStr};

/// An opaque configuration-qualifier key such as `fr-rCA-hdpi-v21`.
///
/// The empty qualifier string is the default configuration. Ordering is the ordering of
/// the qualifier text, which sorts the default configuration first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigDescription {
    qualifiers: String,
}

impl ConfigDescription {
    /// Creates a configuration from its qualifier string.
    ///
    /// `"DEFAULT"` and the empty string both denote the default configuration.
    pub fn new(qualifiers: impl Into<String>) -> Self {
        let qualifiers = qualifiers.into();
        if qualifiers == "DEFAULT" {
            return ConfigDescription::default();
        }
        ConfigDescription { qualifiers }
    }

    /// The qualifier string, empty for the default configuration.
    #[must_use]
    pub fn qualifiers(&self) -> &str {
        &self.qualifiers
    }

    /// Returns true for the default (unqualified) configuration.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.qualifiers.is_empty()
    }
}

impl FromStr for ConfigDescription {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(ConfigDescription::new(text.trim()))
    }
}

impl From<&str> for ConfigDescription {
    fn from(text: &str) -> Self {
        ConfigDescription::new(text)
    }
}

impl fmt::Display for ConfigDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("DEFAULT")
        } else {
            f.write_str(&self.qualifiers)
        }
    }
}
