use tracing::trace;

use crate::resource::{ResourceEntry, ResourceType, Symbol};

/// All entries of one resource type within a package.
///
/// Entries are sorted by name.
#[derive(Debug, Clone)]
pub struct ResourceTableType {
    resource_type: ResourceType,
    /// Assigned type id, the second byte of the resource id
    pub id: Option<u8>,
    /// Visibility of the type; public as soon as one entry is public
    pub symbol: Symbol,
    entries: Vec<ResourceEntry>,
}

impl ResourceTableType {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new(resource_type: ResourceType) -> Self {
        ResourceTableType {
            resource_type,
            id: None,
            symbol: Symbol::default(),
            entries: Vec::new(),
        }
    }

    /// The type tag of this bucket.
    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    fn search(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.name().cmp(name))
    }

    /// Finds the entry called `name`.
    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<&ResourceEntry> {
        self.search(name).ok().map(|index| &self.entries[index])
    }

    /// Mutable variant of [`ResourceTableType::find_entry`].
    pub fn find_entry_mut(&mut self, name: &str) -> Option<&mut ResourceEntry> {
        match self.search(name) {
            Ok(index) => Some(&mut self.entries[index]),
            Err(_) => None,
        }
    }

    /// Returns the entry called `name`, creating it if absent.
    pub fn find_or_create_entry(&mut self, name: &str) -> &mut ResourceEntry {
        let index = match self.search(name) {
            Ok(index) => index,
            Err(index) => {
                trace!(
                    resource_type = %self.resource_type,
                    entry = name,
                    "creating entry"
                );
                self.entries.insert(index, ResourceEntry::new(name));
                index
            }
        };
        &mut self.entries[index]
    }

    /// Finds the entry whose assigned id is `entry_id`.
    #[must_use]
    pub fn find_entry_by_id(&self, entry_id: u16) -> Option<&ResourceEntry> {
        self.entries.iter().find(|entry| entry.id == Some(entry_id))
    }

    /// All entries, sorted by name.
    #[must_use]
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Mutable iteration over all entries.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut ResourceEntry> {
        self.entries.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_sorted_and_unique() {
        let mut bucket = ResourceTableType::new(ResourceType::String);
        bucket.find_or_create_entry("zeta");
        bucket.find_or_create_entry("alpha");
        bucket.find_or_create_entry("mid");
        bucket.find_or_create_entry("alpha");

        let names: Vec<&str> = bucket.entries().iter().map(ResourceEntry::name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        assert_eq!(bucket.resource_type(), ResourceType::String);
    }

    #[test]
    fn test_find_entry_does_not_create() {
        let mut bucket = ResourceTableType::new(ResourceType::Id);
        assert!(bucket.find_entry("missing").is_none());
        assert!(bucket.find_entry_mut("missing").is_none());
        assert!(bucket.entries().is_empty());
    }

    #[test]
    fn test_find_entry_by_id() {
        let mut bucket = ResourceTableType::new(ResourceType::Layout);
        bucket.find_or_create_entry("main").id = Some(3);
        bucket.find_or_create_entry("other");

        assert_eq!(bucket.find_entry_by_id(3).map(ResourceEntry::name), Some("main"));
        assert!(bucket.find_entry_by_id(0).is_none());
    }
}
