//! Table policy configuration
//!
//! This module provides configuration options for the policy decisions a
//! [`crate::ResourceTable`] makes while resources are added. The structural rules
//! (name validation, id agreement, no partial commits) always apply; these
//! switches only tune how permissive the table is about visibility changes and
//! repeated declarations.

/// Configuration for resource table policy
///
/// # Examples
///
/// ```rust
/// use restable::{ResourceTable, TableConfig};
///
/// let table = ResourceTable::with_config(TableConfig::strict());
/// assert!(table.config().protect_symbol_visibility);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TableConfig {
    /// Ignore requests that would move a defined symbol back to `Undefined`, or a
    /// `Public` symbol to `Private`. Off by default: the table overwrites symbols as asked.
    pub protect_symbol_visibility: bool,

    /// Use the strict collision resolver as the table's default resolver, so two strong
    /// declarations of the same key always conflict instead of the later one winning.
    pub strict_collisions: bool,

    /// Emit an `Info` diagnostic whenever an existing value is replaced by a collision.
    pub report_overrides: bool,
}

impl TableConfig {
    /// Creates the most permissive configuration
    ///
    /// Symbols are overwritten as requested and later declarations of the same kind win.
    /// Identical to [`TableConfig::default`].
    #[must_use]
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for compiling a single module
    ///
    /// Duplicate strong declarations are errors, public symbols cannot be downgraded and
    /// overrides are reported.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            protect_symbol_visibility: true,
            strict_collisions: true,
            report_overrides: true,
        }
    }
}
