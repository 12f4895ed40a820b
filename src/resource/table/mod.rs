//! The resource table: packages, types, entries and the operations that fill them.
//!
//! [`ResourceTable`] is the single mutable structure a resource compiler builds while it
//! reads resource definitions. Callers create [`Value`]s with text interned in the table's
//! [`StringPool`], then hand them to [`ResourceTable::add_resource`] together with the
//! resource name and the (configuration, product) key they apply to.
//!
//! # Add semantics
//!
//! Every add and symbol operation:
//!
//! 1. validates the entry name (alphanumerics plus `.`, `_`, `-`), unless the
//!    `_allow_mangled` variant is used
//! 2. resolves or creates the package, type and entry
//! 3. checks a supplied [`ResourceId`] against ids already recorded on each level
//! 4. stores the value, consulting the table's [`CollisionResolver`] if the key is taken
//! 5. records the supplied id, only once everything above succeeded
//!
//! Failures return `false` and are described in the caller's [`Diagnostics`]. Nothing is
//! stored on failure, although the package, type and entry may have been created empty.
//!
//! # Usage Examples
//!
//! ```rust
//! use restable::{ConfigDescription, Diagnostics, ResourceName, ResourceTable, Source, Value};
//!
//! let mut table = ResourceTable::new();
//! let diag = Diagnostics::new();
//! let name: ResourceName = "com.example:string/app_name".parse()?;
//!
//! let text = table.string_pool.intern("Example");
//! let value = Value::string(text, Source::new("res/values/strings.xml"));
//! assert!(table.add_resource(&name, None, &ConfigDescription::default(), "", value, &diag));
//!
//! let found = table.find_resource(&name).unwrap();
//! assert_eq!(found.entry.values().len(), 1);
//! # Ok::<(), restable::Error>(())
//! ```

mod collision;
mod entry;
mod ingest;
mod package;
mod symbol;
mod tabletype;

pub use collision::{
    resolve_value_collision, resolve_value_collision_strict, CollisionResolver, CollisionResult,
};
pub use entry::{ResourceConfigValue, ResourceEntry};
pub use ingest::PendingResource;
pub use package::{PackageType, ResourceTablePackage};
pub use symbol::{Symbol, SymbolState};
pub use tabletype::ResourceTableType;

use std::{fmt, sync::Arc};

use tracing::{debug, trace, warn};

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    file::InputFileRc,
    resource::{ConfigDescription, ResourceId, ResourceName, StringPool, Value},
    Error, Result, Source, TableConfig,
};

/// The located package, type and entry of a resource.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    /// Package holding the resource
    pub package: &'a ResourceTablePackage,
    /// Type bucket holding the resource
    pub resource_type: &'a ResourceTableType,
    /// The resource's entry
    pub entry: &'a ResourceEntry,
}

/// Returns the first character not allowed in an entry name.
fn find_invalid_entry_char(entry: &str) -> Option<char> {
    entry
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '.' | '_' | '-')))
}

/// Checks a supplied id against the ids recorded on a resource's package, type and entry.
fn check_id_parts(
    name: &ResourceName,
    id: ResourceId,
    recorded: (Option<u8>, Option<u8>, Option<u16>),
    source: &Source,
    diag: &Diagnostics,
) -> bool {
    let (package_id, type_id, entry_id) = recorded;

    let mismatch = if package_id.is_some_and(|existing| existing != id.package_id()) {
        Some(format!(
            "package '{}' already has ID 0x{:02x}",
            name.package,
            package_id.unwrap_or_default()
        ))
    } else if type_id.is_some_and(|existing| existing != id.type_id()) {
        Some(format!(
            "type '{}' already has ID 0x{:02x}",
            name.resource_type,
            type_id.unwrap_or_default()
        ))
    } else if entry_id.is_some_and(|existing| existing != id.entry_id()) {
        Some(format!(
            "resource already has ID {}",
            ResourceId::from_parts(
                package_id.unwrap_or_default(),
                type_id.unwrap_or_default(),
                entry_id.unwrap_or_default()
            )
        ))
    } else {
        None
    };

    match mismatch {
        Some(reason) => {
            diag.error(
                DiagnosticCategory::Identifier,
                source,
                format!("trying to add resource '{}' with ID {} but {}", name, id, reason),
            );
            false
        }
        None => true,
    }
}

/// In-memory table of every resource of a compilation.
///
/// The pool is declared first; values hold reference-counted handles into it, so the
/// order in which the table's fields are dropped does not matter.
pub struct ResourceTable {
    /// Pool interning the text of every value stored in this table
    pub string_pool: StringPool,
    packages: Vec<ResourceTablePackage>,
    config: TableConfig,
    resolver: Arc<dyn CollisionResolver>,
}

impl Default for ResourceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceTable {
    /// Creates an empty table with [`TableConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty table with the given options.
    ///
    /// The collision resolver is [`resolve_value_collision_strict`] when
    /// `config.strict_collisions` is set, [`resolve_value_collision`] otherwise.
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        let resolver: Arc<dyn CollisionResolver> = if config.strict_collisions {
            Arc::new(resolve_value_collision_strict)
        } else {
            Arc::new(resolve_value_collision)
        };

        ResourceTable {
            string_pool: StringPool::new(),
            packages: Vec::new(),
            config,
            resolver,
        }
    }

    /// The options this table was created with.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Replaces the collision resolver used by all later add operations.
    pub fn set_collision_resolver(&mut self, resolver: impl CollisionResolver + 'static) {
        self.resolver = Arc::new(resolver);
    }

    /// All packages, sorted by name.
    #[must_use]
    pub fn packages(&self) -> &[ResourceTablePackage] {
        &self.packages
    }

    /// Mutable iteration over all packages.
    pub fn packages_mut(&mut self) -> impl Iterator<Item = &mut ResourceTablePackage> {
        self.packages.iter_mut()
    }

    fn search_package(&self, name: &str) -> std::result::Result<usize, usize> {
        self.packages
            .binary_search_by(|package| package.name().cmp(name))
    }

    /// Finds the package called `name`.
    #[must_use]
    pub fn find_package(&self, name: &str) -> Option<&ResourceTablePackage> {
        self.search_package(name)
            .ok()
            .map(|index| &self.packages[index])
    }

    /// Mutable variant of [`ResourceTable::find_package`].
    pub fn find_package_mut(&mut self, name: &str) -> Option<&mut ResourceTablePackage> {
        match self.search_package(name) {
            Ok(index) => Some(&mut self.packages[index]),
            Err(_) => None,
        }
    }

    /// Finds the package whose assigned id is `id`.
    #[must_use]
    pub fn find_package_by_id(&self, id: u8) -> Option<&ResourceTablePackage> {
        self.packages.iter().find(|package| package.id == Some(id))
    }

    /// Returns the package called `name`, creating it if absent.
    pub fn find_or_create_package(&mut self, name: &str) -> &mut ResourceTablePackage {
        let index = match self.search_package(name) {
            Ok(index) => index,
            Err(index) => {
                trace!(package = name, "creating package");
                self.packages.insert(index, ResourceTablePackage::new(name));
                index
            }
        };
        &mut self.packages[index]
    }

    /// Returns the package called `name`, creating it if absent, and records `id`.
    ///
    /// # Arguments
    /// * `name` - Package name, may be empty
    /// * `id` - Package id to assign, or `None` to leave it as is
    ///
    /// # Errors
    /// Returns [`Error::PackageIdConflict`] if the package already has a different id.
    pub fn create_package(
        &mut self,
        name: &str,
        id: Option<u8>,
    ) -> Result<&mut ResourceTablePackage> {
        let package = self.find_or_create_package(name);

        if let Some(requested) = id {
            match package.id {
                Some(existing) if existing != requested => {
                    return Err(Error::PackageIdConflict {
                        name: name.to_string(),
                        existing,
                        requested,
                    });
                }
                Some(_) => {}
                None => {
                    debug!(package = name, id = requested, "assigning package id");
                    package.id = Some(requested);
                }
            }
        }

        Ok(package)
    }

    /// Finds a resource by exact name. Never creates anything.
    #[must_use]
    pub fn find_resource(&self, name: &ResourceName) -> Option<SearchResult<'_>> {
        let package = self.find_package(&name.package)?;
        let resource_type = package.find_type(name.resource_type)?;
        let entry = resource_type.find_entry(&name.entry)?;

        Some(SearchResult {
            package,
            resource_type,
            entry,
        })
    }

    /// Finds a resource's entry for modification. Never creates anything.
    pub fn find_entry_mut(&mut self, name: &ResourceName) -> Option<&mut ResourceEntry> {
        self.find_package_mut(&name.package)?
            .find_type_mut(name.resource_type)?
            .find_entry_mut(&name.entry)
    }

    /// Finds a resource by its assigned id.
    #[must_use]
    pub fn find_resource_by_id(&self, id: ResourceId) -> Option<SearchResult<'_>> {
        let package = self.find_package_by_id(id.package_id())?;
        let resource_type = package.find_type_by_id(id.type_id())?;
        let entry = resource_type.find_entry_by_id(id.entry_id())?;

        Some(SearchResult {
            package,
            resource_type,
            entry,
        })
    }

    /// Returns the names of public entries that lack a package, type or entry id.
    #[must_use]
    pub fn public_entries_without_id(&self) -> Vec<ResourceName> {
        let mut missing = Vec::new();
        for package in &self.packages {
            for resource_type in package.types() {
                for entry in resource_type.entries() {
                    let has_id =
                        package.id.is_some() && resource_type.id.is_some() && entry.id.is_some();
                    if entry.symbol.is_public() && !has_id {
                        missing.push(ResourceName::new(
                            package.name(),
                            resource_type.resource_type(),
                            entry.name(),
                        ));
                    }
                }
            }
        }
        missing
    }

    /// Adds `value` for `name` under (`config`, `product`).
    ///
    /// # Arguments
    /// * `name` - The resource name; the entry part must only contain alphanumerics, `.`,
    ///   `_` and `-`
    /// * `id` - Id to check and record; `None` or an invalid id leaves ids untouched
    /// * `config` - Configuration key of the slot
    /// * `product` - Product key of the slot, empty for all products
    /// * `value` - The value; its source is used in diagnostics
    /// * `diag` - Sink for errors and notes
    ///
    /// Returns `true` if the value was stored or deliberately discarded in favour of
    /// the existing one, `false` on a name, id or collision error.
    pub fn add_resource(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        diag: &Diagnostics,
    ) -> bool {
        self.add_resource_impl(name, id, config, product, value, true, diag)
    }

    /// Same as [`ResourceTable::add_resource`] without entry-name validation.
    ///
    /// Used for names mangled from other packages, which contain `$`.
    pub fn add_resource_allow_mangled(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        diag: &Diagnostics,
    ) -> bool {
        self.add_resource_impl(name, id, config, product, value, false, diag)
    }

    /// Adds a file-reference value pointing at `path` inside the package.
    ///
    /// `file` is an optional handle to the input the file is compiled from; the table
    /// stores it without opening it.
    pub fn add_file_reference(
        &mut self,
        name: &ResourceName,
        config: &ConfigDescription,
        source: &Source,
        path: &str,
        file: Option<InputFileRc>,
        diag: &Diagnostics,
    ) -> bool {
        let value = Value::file_reference(self.string_pool.intern(path), file, source.clone());
        self.add_resource_impl(name, None, config, "", value, true, diag)
    }

    /// Same as [`ResourceTable::add_file_reference`] without entry-name validation.
    pub fn add_file_reference_allow_mangled(
        &mut self,
        name: &ResourceName,
        config: &ConfigDescription,
        source: &Source,
        path: &str,
        file: Option<InputFileRc>,
        diag: &Diagnostics,
    ) -> bool {
        let value = Value::file_reference(self.string_pool.intern(path), file, source.clone());
        self.add_resource_impl(name, None, config, "", value, false, diag)
    }

    /// Sets the visibility of `name`, creating the resource if needed.
    ///
    /// A public symbol also makes the resource's type public. With
    /// [`TableConfig::protect_symbol_visibility`] set, a request that would make a
    /// defined symbol undefined, or a public symbol private, is ignored with a warning.
    pub fn set_symbol_state(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: Symbol,
        diag: &Diagnostics,
    ) -> bool {
        self.set_symbol_state_impl(name, id, symbol, true, diag)
    }

    /// Same as [`ResourceTable::set_symbol_state`] without entry-name validation.
    pub fn set_symbol_state_allow_mangled(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: Symbol,
        diag: &Diagnostics,
    ) -> bool {
        self.set_symbol_state_impl(name, id, symbol, false, diag)
    }

    fn validate_name(name: &ResourceName, source: &Source, diag: &Diagnostics) -> bool {
        match find_invalid_entry_char(&name.entry) {
            Some(invalid) => {
                diag.error(
                    DiagnosticCategory::Name,
                    source,
                    format!(
                        "resource '{}' has invalid entry name '{}'. Invalid character '{}'",
                        name, name.entry, invalid
                    ),
                );
                false
            }
            None => true,
        }
    }

    fn add_resource_impl(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        config: &ConfigDescription,
        product: &str,
        value: Value,
        validate: bool,
        diag: &Diagnostics,
    ) -> bool {
        if validate && !Self::validate_name(name, &value.source, diag) {
            return false;
        }

        let id = id.filter(ResourceId::is_valid);
        let resolver = Arc::clone(&self.resolver);
        let report_overrides = self.config.report_overrides;

        let package = self.find_or_create_package(&name.package);
        let package_id = package.id;
        let resource_type = package.find_or_create_type(name.resource_type);
        let type_id = resource_type.id;
        let entry = resource_type.find_or_create_entry(&name.entry);

        if let Some(id) = id {
            if !check_id_parts(name, id, (package_id, type_id, entry.id), &value.source, diag) {
                return false;
            }
        }

        let slot = entry.find_or_create_value(config, product);
        match slot.value.as_mut() {
            None => slot.value = Some(value),
            Some(existing) => match resolver.resolve(existing, &value) {
                CollisionResult::KeepOriginal => {
                    debug!(resource = %name, %config, "keeping existing value");
                }
                CollisionResult::TakeNew => {
                    debug!(resource = %name, %config, "replacing existing value");
                    if report_overrides {
                        diag.info(
                            DiagnosticCategory::Collision,
                            &value.source,
                            format!(
                                "resource '{}' with config '{}' overrides value defined at {}",
                                name, config, existing.source
                            ),
                        );
                    }
                    *existing = value;
                }
                CollisionResult::Conflict => {
                    debug!(resource = %name, %config, "conflicting values");
                    let product_note = if product.is_empty() {
                        String::new()
                    } else {
                        format!(" and product '{}'", product)
                    };
                    diag.error(
                        DiagnosticCategory::Collision,
                        &value.source,
                        format!(
                            "duplicate value for resource '{}' with config '{}'{}",
                            name, config, product_note
                        ),
                    );
                    diag.note(
                        DiagnosticCategory::Collision,
                        &existing.source,
                        "resource previously defined here",
                    );
                    return false;
                }
            },
        }

        if let Some(id) = id {
            debug!(resource = %name, %id, "assigning id");
            entry.id = Some(id.entry_id());
            resource_type.id = Some(id.type_id());
            package.id = Some(id.package_id());
        }

        true
    }

    fn set_symbol_state_impl(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: Symbol,
        validate: bool,
        diag: &Diagnostics,
    ) -> bool {
        if validate && !Self::validate_name(name, &symbol.source, diag) {
            return false;
        }

        let id = id.filter(ResourceId::is_valid);
        let protect = self.config.protect_symbol_visibility;

        let package = self.find_or_create_package(&name.package);
        let package_id = package.id;
        let resource_type = package.find_or_create_type(name.resource_type);
        let type_id = resource_type.id;
        let entry = resource_type.find_or_create_entry(&name.entry);

        if let Some(id) = id {
            if !check_id_parts(name, id, (package_id, type_id, entry.id), &symbol.source, diag) {
                return false;
            }
        }

        let current = entry.symbol.state;
        let downgrade = match symbol.state {
            SymbolState::Undefined => current != SymbolState::Undefined,
            SymbolState::Private => current == SymbolState::Public,
            SymbolState::Public => false,
        };

        let incoming_public = symbol.is_public();
        if protect && downgrade {
            warn!(
                resource = %name,
                ?current,
                requested = ?symbol.state,
                "ignoring visibility downgrade"
            );
            diag.warning(
                DiagnosticCategory::Symbol,
                &symbol.source,
                format!(
                    "ignoring {} declaration of resource '{}' already declared {} at {}",
                    <&'static str>::from(symbol.state),
                    name,
                    <&'static str>::from(current),
                    entry.symbol.source
                ),
            );
        } else {
            entry.symbol = symbol;
        }

        if let Some(id) = id {
            debug!(resource = %name, %id, "assigning id");
            entry.id = Some(id.entry_id());
            resource_type.id = Some(id.type_id());
        }

        if incoming_public && resource_type.symbol.state != SymbolState::Public {
            resource_type.symbol.state = SymbolState::Public;
        }

        if let Some(id) = id {
            package.id = Some(id.package_id());
        }

        true
    }
}

impl fmt::Debug for ResourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceTable")
            .field("string_pool", &self.string_pool)
            .field("packages", &self.packages)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
