use std::{collections::BTreeMap, sync::Arc};

use super::{InputFile, InputFileRc, RegularFile};
use crate::Source;

/// A collection of regular files, keyed and iterated by path.
#[derive(Debug, Default)]
pub struct FileCollection {
    files: BTreeMap<String, Arc<RegularFile>>,
}

impl FileCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the file located at `path` and returns its handle.
    ///
    /// Registering the same path twice returns the handle created the first time.
    pub fn insert_file(&mut self, path: &str) -> InputFileRc {
        let file = self
            .files
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(RegularFile::new(Source::new(path))));
        Arc::clone(file) as InputFileRc
    }

    /// Returns the handle registered for `path`, if any.
    pub fn find_file(&self, path: &str) -> Option<InputFileRc> {
        self.files
            .get(path)
            .map(|file| Arc::clone(file) as InputFileRc)
    }

    /// Iterates over all registered files in path order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn InputFile> {
        self.files.values().map(|file| file.as_ref() as &dyn InputFile)
    }

    /// Returns the number of registered files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no files are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
