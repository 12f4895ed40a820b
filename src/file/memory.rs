use std::sync::Arc;

use super::{Backend, InputFile};
use crate::{Error::OutOfBounds, Result, Source};

/// Opened file contents backed by memory
#[derive(Debug)]
pub struct Memory {
    data: Arc<[u8]>,
}

impl Memory {
    /// Create a new memory backend
    ///
    /// ## Arguments
    /// * 'data' - The data buffer to share
    pub fn new(data: Arc<[u8]>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
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
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// An input file whose contents are held in memory, e.g. a file extracted from an
/// already-compiled archive.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    source: Source,
    data: Arc<[u8]>,
}

impl MemoryFile {
    /// Creates an in-memory file registered under `source`.
    pub fn new(source: Source, data: impl Into<Arc<[u8]>>) -> Self {
        MemoryFile {
            source,
            data: data.into(),
        }
    }
}

impl InputFile for MemoryFile {
    fn source(&self) -> &Source {
        &self.source
    }

    fn open_as_data(&self) -> Result<Box<dyn Backend>> {
        Ok(Box::new(Memory::new(Arc::clone(&self.data))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory() {
        let mut data = vec![0xCC_u8; 1048];
        data[10] = 0xBB;
        data[11] = 0xBB;
        data[12] = 0xBB;

        let memory = Memory::new(data.into());

        assert_eq!(memory.len(), 1048);
        assert_eq!(memory.data()[0], 0xCC);
        assert_eq!(memory.data_slice(10, 3).unwrap(), &[0xBB, 0xBB, 0xBB]);
        assert!(memory.data_slice(u32::MAX as usize, u32::MAX as usize).is_err());
        assert!(memory.data_slice(0, 2048).is_err());
    }

    #[test]
    fn test_memory_file_shares_contents() {
        let file = MemoryFile::new(Source::new("res/raw/intro.ogg"), vec![1_u8, 2, 3]);

        let first = file.open_as_data().unwrap();
        let second = file.open_as_data().unwrap();
        assert_eq!(first.data(), second.data());
        assert!(!first.is_empty());
        assert_eq!(file.source().path, "res/raw/intro.ogg");
    }
}
