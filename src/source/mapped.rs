// src/source/mapped.rs
use crate::error::Result;
use crate::region::Region;
use memmap2::MmapMut;
use std::fs::OpenOptions;
use std::path::Path;

/// File-backed region source over a writable memory mapping.
///
/// Useful for pushing endianness-converted data straight into a file
/// through the copy engine, without an intermediate buffer.
pub struct MappedSource {
    map: MmapMut,
}

impl MappedSource {
    /// Create (or truncate) `path` at `len` bytes and map it writable.
    pub fn create(path: impl AsRef<Path>, len: u64) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(len)?;
        let map = unsafe { MmapMut::map_mut(&file)? };
        Ok(MappedSource { map })
    }

    /// Map an existing file writable at its current length.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let map = unsafe { MmapMut::map_mut(&file)? };
        Ok(MappedSource { map })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.map
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.map
    }

    /// View the mapping as a copy-engine region starting at `offset`.
    pub fn region(&mut self, offset: usize) -> Region {
        Region::raw(self.map.as_mut_ptr(), offset)
    }

    /// Flush dirty pages back to the file.
    pub fn flush(&self) -> Result<()> {
        self.map.flush()?;
        Ok(())
    }
}
