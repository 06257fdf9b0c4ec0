// src/region/registry.rs
use super::{RegionHandle, RegionPinner};
use crate::error::{AccessorError, Result};
use parking_lot::Mutex;
use std::ptr::NonNull;

/// Owned collection of managed byte buffers addressable by
/// [`RegionHandle`].
///
/// Buffers are boxed, so their addresses stay stable while the slot table
/// grows or other regions come and go. A pin count per slot keeps a buffer
/// alive for the duration of a transfer: [`remove`](Self::remove) refuses
/// to free a region that is currently pinned.
///
/// # Example
///
/// ```
/// use accessors_rs::region::RegionRegistry;
///
/// let registry = RegionRegistry::new();
/// let handle = registry.insert_from(&[1, 2, 3, 4]);
///
/// assert_eq!(registry.len(handle).unwrap(), 4);
/// assert_eq!(registry.snapshot(handle).unwrap(), vec![1, 2, 3, 4]);
///
/// registry.remove(handle).unwrap();
/// assert!(registry.snapshot(handle).is_err());
/// ```
#[derive(Default)]
pub struct RegionRegistry {
    slots: Mutex<Slots>,
}

#[derive(Default)]
struct Slots {
    entries: Vec<Option<Entry>>,
    free: Vec<u32>,
}

struct Entry {
    buf: Box<[u8]>,
    pins: u32,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zero-filled buffer of `len` bytes.
    pub fn insert(&self, len: usize) -> RegionHandle {
        self.insert_boxed(vec![0u8; len].into_boxed_slice())
    }

    /// Register a buffer initialized from `bytes`.
    pub fn insert_from(&self, bytes: &[u8]) -> RegionHandle {
        self.insert_boxed(bytes.to_vec().into_boxed_slice())
    }

    fn insert_boxed(&self, buf: Box<[u8]>) -> RegionHandle {
        let mut slots = self.slots.lock();
        let entry = Entry { buf, pins: 0 };
        match slots.free.pop() {
            Some(index) => {
                slots.entries[index as usize] = Some(entry);
                RegionHandle(index)
            }
            None => {
                slots.entries.push(Some(entry));
                RegionHandle(slots.entries.len() as u32 - 1)
            }
        }
    }

    /// Remove a region and return its buffer. Fails while the region is
    /// pinned by an in-flight transfer.
    pub fn remove(&self, handle: RegionHandle) -> Result<Box<[u8]>> {
        let mut guard = self.slots.lock();
        let slots = &mut *guard;
        let slot = slots
            .entries
            .get_mut(handle.0 as usize)
            .ok_or(AccessorError::RegionNotFound(handle))?;
        match slot {
            Some(entry) if entry.pins > 0 => Err(AccessorError::RegionPinned(handle)),
            Some(_) => {
                let entry = slot.take().expect("checked above");
                slots.free.push(handle.0);
                Ok(entry.buf)
            }
            None => Err(AccessorError::RegionNotFound(handle)),
        }
    }

    /// Byte length of a managed region.
    pub fn len(&self, handle: RegionHandle) -> Result<usize> {
        self.with_entry(handle, |entry| entry.buf.len())
    }

    pub fn is_empty(&self, handle: RegionHandle) -> Result<bool> {
        Ok(self.len(handle)? == 0)
    }

    /// Copy `bytes` into the region at `offset`.
    pub fn write(&self, handle: RegionHandle, offset: usize, bytes: &[u8]) -> Result<()> {
        let mut slots = self.slots.lock();
        let entry = entry_mut(&mut slots, handle)?;
        let end = check_range(entry.buf.len(), offset, bytes.len())?;
        entry.buf[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Copy of the region's current contents.
    pub fn snapshot(&self, handle: RegionHandle) -> Result<Vec<u8>> {
        self.with_entry(handle, |entry| entry.buf.to_vec())
    }

    /// Number of outstanding pins on a region.
    pub fn pin_count(&self, handle: RegionHandle) -> Result<u32> {
        self.with_entry(handle, |entry| entry.pins)
    }

    fn with_entry<T>(&self, handle: RegionHandle, f: impl FnOnce(&Entry) -> T) -> Result<T> {
        let slots = self.slots.lock();
        let entry = slots
            .entries
            .get(handle.0 as usize)
            .and_then(|slot| slot.as_ref())
            .ok_or(AccessorError::RegionNotFound(handle))?;
        Ok(f(entry))
    }
}

fn entry_mut<'a>(slots: &'a mut Slots, handle: RegionHandle) -> Result<&'a mut Entry> {
    slots
        .entries
        .get_mut(handle.0 as usize)
        .and_then(|slot| slot.as_mut())
        .ok_or(AccessorError::RegionNotFound(handle))
}

fn check_range(capacity: usize, offset: usize, len: usize) -> Result<usize> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(end),
        _ => Err(AccessorError::OutOfBounds {
            offset,
            len,
            capacity,
        }),
    }
}

impl RegionPinner for RegionRegistry {
    fn acquire(&self, handle: RegionHandle) -> Result<NonNull<u8>> {
        let mut slots = self.slots.lock();
        let entry = entry_mut(&mut slots, handle)?;
        entry.pins += 1;
        // The buffer is boxed: its address outlives the lock, and the pin
        // count keeps `remove` from freeing it.
        Ok(NonNull::new(entry.buf.as_mut_ptr()).expect("boxed slice pointer is non-null"))
    }

    fn release(&self, handle: RegionHandle, _base: NonNull<u8>) {
        let mut slots = self.slots.lock();
        if let Ok(entry) = entry_mut(&mut slots, handle) {
            debug_assert!(entry.pins > 0, "unbalanced release for {handle}");
            entry.pins = entry.pins.saturating_sub(1);
        }
    }
}
