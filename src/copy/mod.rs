// src/copy/mod.rs
//! Dispatch entry point of the copy engine.
//!
//! [`copy_memory`] resolves both regions (pinning managed ones), then picks
//! either a straight byte copy or one of the swap kernels from the element
//! width and the endianness tags. Pins are RAII guards, so every exit path
//! releases them, in reverse acquisition order.

use crate::error::Result;
use crate::region::{PinGuard, Region, RegionBase, RegionPinner};
use crate::swap::kernels::{swap_copy_16, swap_copy_32, swap_copy_64};
use crate::types::{CopyStatus, Endianness};

/// Resolved base pointer for one region, holding its pin (if any) until the
/// transfer completes.
struct Resolved<'a, P: RegionPinner + ?Sized> {
    ptr: *mut u8,
    _pin: Option<PinGuard<'a, P>>,
}

fn resolve<'a, P: RegionPinner + ?Sized>(pinner: &'a P, region: Region) -> Result<Resolved<'a, P>> {
    match region.base() {
        RegionBase::Raw(ptr) => Ok(Resolved {
            ptr: ptr.wrapping_add(region.offset()),
            _pin: None,
        }),
        RegionBase::Managed(handle) => {
            let pin = PinGuard::acquire(pinner, handle)?;
            Ok(Resolved {
                ptr: pin.base().as_ptr().wrapping_add(region.offset()),
                _pin: Some(pin),
            })
        }
    }
}

/// Copy `count` elements of `element_width` bytes from `src` to `dst`,
/// reversing the byte order of each element when the endianness tags
/// differ.
///
/// Equal tags, or an element width of 1, degrade to a straight byte copy.
/// An element width outside {1, 2, 4, 8} yields
/// [`CopyStatus::InvalidDataSize`] without touching either region. A
/// failure from the pinning collaborator is propagated as `Err`, with every
/// previously acquired pin released.
///
/// # Safety
///
/// Both regions must name allocations of at least
/// `offset + element_width * count` bytes, aligned to the element width,
/// valid for the duration of the call, and the two spans must not overlap.
/// Managed bases must stay stable between acquire and release, which the
/// [`RegionPinner`] contract guarantees.
pub unsafe fn copy_memory<P: RegionPinner + ?Sized>(
    pinner: &P,
    src: Region,
    dst: Region,
    element_width: usize,
    count: usize,
    src_endian: Endianness,
    dst_endian: Endianness,
) -> Result<CopyStatus> {
    // Pins are acquired src-first and dropped dst-first at return.
    let src = resolve(pinner, src)?;
    let dst = resolve(pinner, dst)?;

    if src_endian == dst_endian || element_width == 1 {
        match element_width {
            1 | 2 | 4 | 8 => {
                std::ptr::copy_nonoverlapping(src.ptr, dst.ptr, element_width * count)
            }
            _ => return Ok(CopyStatus::InvalidDataSize),
        }
    } else {
        match element_width {
            2 => swap_copy_16(dst.ptr, src.ptr, count),
            4 => swap_copy_32(dst.ptr, src.ptr, count),
            8 => swap_copy_64(dst.ptr, src.ptr, count),
            _ => return Ok(CopyStatus::InvalidDataSize),
        }
    }

    Ok(CopyStatus::Ok)
}

/// Safe slice front end to [`copy_memory`] for raw byte spans.
///
/// Validates that both slices cover `element_width * count` bytes; slice
/// disjointness rules out overlap.
///
/// # Example
///
/// ```
/// use accessors_rs::{copy_slices, CopyStatus, Endianness};
///
/// let src = [0x01u8, 0x02, 0x03, 0x04];
/// let mut dst = [0u8; 4];
/// let status = copy_slices(
///     &mut dst,
///     &src,
///     2,
///     2,
///     Endianness::Little,
///     Endianness::Big,
/// )
/// .unwrap();
///
/// assert_eq!(status, CopyStatus::Ok);
/// assert_eq!(dst, [0x02, 0x01, 0x04, 0x03]);
/// ```
pub fn copy_slices(
    dst: &mut [u8],
    src: &[u8],
    element_width: usize,
    count: usize,
    src_endian: Endianness,
    dst_endian: Endianness,
) -> Result<CopyStatus> {
    use crate::error::AccessorError;
    use crate::region::NoPinner;

    let span = element_width
        .checked_mul(count)
        .ok_or(AccessorError::OutOfBounds {
            offset: 0,
            len: usize::MAX,
            capacity: src.len(),
        })?;
    if span > src.len() {
        return Err(AccessorError::OutOfBounds {
            offset: 0,
            len: span,
            capacity: src.len(),
        });
    }
    if span > dst.len() {
        return Err(AccessorError::OutOfBounds {
            offset: 0,
            len: span,
            capacity: dst.len(),
        });
    }

    unsafe {
        copy_memory(
            &NoPinner,
            Region::raw(src.as_ptr() as *mut u8, 0),
            Region::raw(dst.as_mut_ptr(), 0),
            element_width,
            count,
            src_endian,
            dst_endian,
        )
    }
}
