//! Disk-backed input files.
//!
//! [`RegularFile`] is the handle registered for a file on disk; it stores only the
//! source. Opening it produces a [`Physical`] backend that memory-maps the file, so
//! large drawables or raw assets are paged in on demand rather than read eagerly.

use super::{Backend, InputFile};
use crate::{Error::FileError, Error::OutOfBounds, Result, Source};

use memmap2::Mmap;
use std::{fs, path::Path};

/// Input file backed by a memory-mapped file on disk
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the file on disk
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;

        // The mapping is read-only; callers must not truncate inputs while a compilation runs.
        let mmap = unsafe { Mmap::map(&file) }.map_err(FileError)?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A regular file from the file system.
///
/// The handle only remembers where the file lives; the file is mapped when
/// [`InputFile::open_as_data`] is called.
#[derive(Debug, Clone)]
pub struct RegularFile {
    source: Source,
}

impl RegularFile {
    /// Creates a handle for the file at `source.path`.
    pub fn new(source: Source) -> Self {
        RegularFile { source }
    }
}

impl InputFile for RegularFile {
    fn source(&self) -> &Source {
        &self.source
    }

    fn open_as_data(&self) -> Result<Box<dyn Backend>> {
        Ok(Box::new(Physical::new(&self.source.path)?))
    }
}
