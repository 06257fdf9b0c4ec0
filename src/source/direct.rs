// src/source/direct.rs
use crate::error::{AccessorError, Result};
use crate::region::Region;
use crate::types::Endianness;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use bytemuck::Pod;
use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Alignment of every [`DirectSource`] allocation; enough for the widest
/// element the copy engine moves.
const SOURCE_ALIGN: usize = 8;

/// Owned, 8-aligned heap region with bounds-checked typed accessors.
///
/// This is the raw-address counterpart of the managed registry: it hands
/// out [`Region`]s over memory the caller owns, and offers scalar get/put
/// in either byte order for callers that want to inspect or seed a region
/// without going through the copy engine.
///
/// # Example
///
/// ```
/// use accessors_rs::{DirectSource, Endianness};
///
/// let mut source = DirectSource::alloc(16).unwrap();
/// source.put_u32(0, 0xdead_beef, Endianness::Big).unwrap();
///
/// assert_eq!(source.get_u32(0, Endianness::Big).unwrap(), 0xdead_beef);
/// assert_eq!(source.get_u32(0, Endianness::Little).unwrap(), 0xefbe_adde);
/// assert_eq!(source.get_u8(0).unwrap(), 0xde);
/// ```
pub struct DirectSource {
    base: NonNull<u8>,
    len: usize,
}

// The allocation is uniquely owned; access is through &self/&mut self.
unsafe impl Send for DirectSource {}
unsafe impl Sync for DirectSource {}

impl DirectSource {
    /// Allocate a zero-filled region of `len` bytes.
    pub fn alloc(len: usize) -> Result<Self> {
        let layout = Layout::from_size_align(len.max(1), SOURCE_ALIGN)
            .map_err(|_| AccessorError::OutOfBounds {
                offset: 0,
                len,
                capacity: isize::MAX as usize,
            })?;
        // Zeroed so fresh regions never expose stale heap contents.
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let base = NonNull::new(ptr).ok_or_else(|| {
            AccessorError::Io(std::io::Error::new(
                std::io::ErrorKind::OutOfMemory,
                "direct source allocation failed",
            ))
        })?;
        Ok(DirectSource { base, len })
    }

    /// Allocate a region initialized from `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut source = Self::alloc(bytes.len())?;
        source.write_bytes(0, bytes)?;
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Base address of the allocation.
    pub fn as_ptr(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    /// View this source as a copy-engine region starting at `offset`.
    pub fn region(&self, offset: usize) -> Region {
        Region::raw(self.base.as_ptr(), offset)
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = check_range(self.len, offset, len)?;
        let full = unsafe { std::slice::from_raw_parts(self.base.as_ptr(), self.len) };
        Ok(&full[offset..end])
    }

    fn slice_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8]> {
        let end = check_range(self.len, offset, len)?;
        let full = unsafe { std::slice::from_raw_parts_mut(self.base.as_ptr(), self.len) };
        Ok(&mut full[offset..end])
    }

    /// Fill `len` bytes starting at `offset` with `value`.
    pub fn fill(&mut self, value: u8, offset: usize, len: usize) -> Result<()> {
        self.slice_mut(offset, len)?.fill(value);
        Ok(())
    }

    /// Copy `bytes` into the region at `offset`.
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.slice_mut(offset, bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Copy `out.len()` bytes starting at `offset` into `out`.
    pub fn read_bytes(&self, offset: usize, out: &mut [u8]) -> Result<()> {
        out.copy_from_slice(self.slice(offset, out.len())?);
        Ok(())
    }

    /// Store a slice of plain-old-data scalars at `offset` in native byte
    /// order.
    pub fn write_pod_slice<T: Pod>(&mut self, offset: usize, values: &[T]) -> Result<()> {
        self.write_bytes(offset, bytemuck::cast_slice(values))
    }

    pub fn get_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn put_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.slice_mut(offset, 1)?[0] = value;
        Ok(())
    }

    pub fn get_u16(&self, offset: usize, order: Endianness) -> Result<u16> {
        let bytes = self.slice(offset, 2)?;
        Ok(match order {
            Endianness::Little => LittleEndian::read_u16(bytes),
            Endianness::Big => BigEndian::read_u16(bytes),
        })
    }

    pub fn put_u16(&mut self, offset: usize, value: u16, order: Endianness) -> Result<()> {
        let bytes = self.slice_mut(offset, 2)?;
        match order {
            Endianness::Little => LittleEndian::write_u16(bytes, value),
            Endianness::Big => BigEndian::write_u16(bytes, value),
        }
        Ok(())
    }

    pub fn get_u32(&self, offset: usize, order: Endianness) -> Result<u32> {
        let bytes = self.slice(offset, 4)?;
        Ok(match order {
            Endianness::Little => LittleEndian::read_u32(bytes),
            Endianness::Big => BigEndian::read_u32(bytes),
        })
    }

    pub fn put_u32(&mut self, offset: usize, value: u32, order: Endianness) -> Result<()> {
        let bytes = self.slice_mut(offset, 4)?;
        match order {
            Endianness::Little => LittleEndian::write_u32(bytes, value),
            Endianness::Big => BigEndian::write_u32(bytes, value),
        }
        Ok(())
    }

    pub fn get_u64(&self, offset: usize, order: Endianness) -> Result<u64> {
        let bytes = self.slice(offset, 8)?;
        Ok(match order {
            Endianness::Little => LittleEndian::read_u64(bytes),
            Endianness::Big => BigEndian::read_u64(bytes),
        })
    }

    pub fn put_u64(&mut self, offset: usize, value: u64, order: Endianness) -> Result<()> {
        let bytes = self.slice_mut(offset, 8)?;
        match order {
            Endianness::Little => LittleEndian::write_u64(bytes, value),
            Endianness::Big => BigEndian::write_u64(bytes, value),
        }
        Ok(())
    }

    pub fn get_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.get_u8(offset)? as i8)
    }

    pub fn put_i8(&mut self, offset: usize, value: i8) -> Result<()> {
        self.put_u8(offset, value as u8)
    }

    pub fn get_i16(&self, offset: usize, order: Endianness) -> Result<i16> {
        Ok(self.get_u16(offset, order)? as i16)
    }

    pub fn put_i16(&mut self, offset: usize, value: i16, order: Endianness) -> Result<()> {
        self.put_u16(offset, value as u16, order)
    }

    pub fn get_i32(&self, offset: usize, order: Endianness) -> Result<i32> {
        Ok(self.get_u32(offset, order)? as i32)
    }

    pub fn put_i32(&mut self, offset: usize, value: i32, order: Endianness) -> Result<()> {
        self.put_u32(offset, value as u32, order)
    }

    pub fn get_i64(&self, offset: usize, order: Endianness) -> Result<i64> {
        Ok(self.get_u64(offset, order)? as i64)
    }

    pub fn put_i64(&mut self, offset: usize, value: i64, order: Endianness) -> Result<()> {
        self.put_u64(offset, value as u64, order)
    }

    /// Floats are moved as raw bit patterns; byte order applies to the
    /// bits, never to the numeric value.
    pub fn get_f32(&self, offset: usize, order: Endianness) -> Result<f32> {
        Ok(f32::from_bits(self.get_u32(offset, order)?))
    }

    pub fn put_f32(&mut self, offset: usize, value: f32, order: Endianness) -> Result<()> {
        self.put_u32(offset, value.to_bits(), order)
    }

    pub fn get_f64(&self, offset: usize, order: Endianness) -> Result<f64> {
        Ok(f64::from_bits(self.get_u64(offset, order)?))
    }

    pub fn put_f64(&mut self, offset: usize, value: f64, order: Endianness) -> Result<()> {
        self.put_u64(offset, value.to_bits(), order)
    }
}

impl Drop for DirectSource {
    fn drop(&mut self) {
        let layout = Layout::from_size_align(self.len.max(1), SOURCE_ALIGN)
            .expect("layout was validated at allocation");
        unsafe { alloc::dealloc(self.base.as_ptr(), layout) };
    }
}

impl std::fmt::Debug for DirectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectSource")
            .field("base", &self.base)
            .field("len", &self.len)
            .finish()
    }
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
