//! Backing-file handles for file-reference values.
//!
//! Resources such as layouts, drawables or raw assets are not stored in the table
//! itself: the table records a [`crate::resource::FileReference`] holding the file's
//! path inside the final package and, optionally, a handle to the input file it was
//! compiled from. This module provides that handle abstraction.
//!
//! The table never calls [`InputFile::open_as_data`]. Only collaborators that copy
//! or process the file contents (archive writers, XML compilers) do.
//!
//! # Key Components
//!
//! - [`InputFile`] - Opaque handle trait: a source plus on-demand access to the bytes
//! - [`Backend`] - Byte access to opened file contents
//! - [`RegularFile`] - A file on disk, memory-mapped when opened
//! - [`MemoryFile`] - A file whose contents are already in memory
//! - [`FileCollection`] - Path-keyed registry of regular files
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use restable::file::{FileCollection, InputFile};
//!
//! let mut files = FileCollection::new();
//! let icon = files.insert_file("res/drawable/icon.png");
//!
//! let data = icon.open_as_data()?;
//! println!("{} is {} bytes", icon.source(), data.len());
//! # Ok::<(), restable::Error>(())
//! ```

mod collection;
mod memory;
mod physical;

use std::{fmt, sync::Arc};

use crate::{Result, Source};

pub use collection::FileCollection;
pub use memory::{Memory, MemoryFile};
pub use physical::{Physical, RegularFile};

/// Backend for accessing the bytes of an opened input file.
///
/// This trait abstracts over different data sources (disk files through a memory map,
/// in-memory buffers) so that consumers can read file contents uniformly.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// # Arguments
    /// * `offset` - The byte offset to start reading from
    /// * `len` - The number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data.
    fn len(&self) -> usize;

    /// Returns true if the data is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An input file referenced by a file-reference value.
///
/// Implementations are cheap handles: creating one must not touch the filesystem.
pub trait InputFile: Send + Sync + fmt::Debug {
    /// The source this file was registered under.
    fn source(&self) -> &Source;

    /// Opens the file and returns its contents.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying file cannot be opened or mapped.
    fn open_as_data(&self) -> Result<Box<dyn Backend>>;
}

/// Shared handle to an input file, as stored inside file-reference values.
pub type InputFileRc = Arc<dyn InputFile>;
