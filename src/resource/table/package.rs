use strum::{EnumIter, IntoStaticStr};
use tracing::trace;

use crate::resource::{ResourceTableType, ResourceType};

/// What kind of package a table package will be built into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PackageType {
    /// The platform framework (`0x01`)
    System,
    /// A vendor overlay of the framework
    Vendor,
    /// A regular application
    #[default]
    App,
    /// A shared library whose package id is assigned at load time
    Dynamic,
}

/// A resource namespace: all type buckets sharing one package name.
///
/// Type buckets are sorted by [`ResourceType`] declaration order.
#[derive(Debug, Clone)]
pub struct ResourceTablePackage {
    name: String,
    /// Assigned package id, the high byte of the resource id
    pub id: Option<u8>,
    /// Kind of the package
    pub package_type: PackageType,
    types: Vec<ResourceTableType>,
}

impl ResourceTablePackage {
    /// Creates an empty package.
    pub fn new(name: impl Into<String>) -> Self {
        ResourceTablePackage {
            name: name.into(),
            id: None,
            package_type: PackageType::default(),
            types: Vec::new(),
        }
    }

    /// The package name; empty for the implicit current package.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, resource_type: ResourceType) -> Result<usize, usize> {
        self.types
            .binary_search_by(|bucket| bucket.resource_type().cmp(&resource_type))
    }

    /// Finds the bucket for `resource_type`.
    #[must_use]
    pub fn find_type(&self, resource_type: ResourceType) -> Option<&ResourceTableType> {
        self.search(resource_type)
            .ok()
            .map(|index| &self.types[index])
    }

    /// Mutable variant of [`ResourceTablePackage::find_type`].
    pub fn find_type_mut(&mut self, resource_type: ResourceType) -> Option<&mut ResourceTableType> {
        match self.search(resource_type) {
            Ok(index) => Some(&mut self.types[index]),
            Err(_) => None,
        }
    }

    /// Returns the bucket for `resource_type`, creating it if absent.
    pub fn find_or_create_type(&mut self, resource_type: ResourceType) -> &mut ResourceTableType {
        let index = match self.search(resource_type) {
            Ok(index) => index,
            Err(index) => {
                trace!(package = %self.name, %resource_type, "creating type");
                self.types.insert(index, ResourceTableType::new(resource_type));
                index
            }
        };
        &mut self.types[index]
    }

    /// Finds the bucket whose assigned id is `type_id`.
    #[must_use]
    pub fn find_type_by_id(&self, type_id: u8) -> Option<&ResourceTableType> {
        self.types.iter().find(|bucket| bucket.id == Some(type_id))
    }

    /// All type buckets, sorted by type.
    #[must_use]
    pub fn types(&self) -> &[ResourceTableType] {
        &self.types
    }

    /// Mutable iteration over all type buckets.
    pub fn types_mut(&mut self) -> impl Iterator<Item = &mut ResourceTableType> {
        self.types.iter_mut()
    }
}
