// src/swap/mod.rs
//! Byte-reversal primitives, block kernels and the in-place slice swap.

pub mod kernels;
pub mod primitives;

pub use primitives::{flip16, flip16_quad, flip32, flip32_dual, flip64};

use crate::error::{AccessorError, Result};
use bytemuck::Pod;

/// Reverse the byte order of every element of `data`, in place.
///
/// Elements of width 1 are left untouched; widths 2, 4 and 8 go through
/// the block kernels. Any other element width is rejected.
///
/// # Example
///
/// ```
/// use accessors_rs::swap::swap_slice_in_place;
///
/// let mut data: [u16; 3] = [0x0102, 0x0304, 0x0506];
/// swap_slice_in_place(&mut data).unwrap();
/// assert_eq!(data, [0x0201, 0x0403, 0x0605]);
/// ```
pub fn swap_slice_in_place<T: Pod>(data: &mut [T]) -> Result<()> {
    let width = std::mem::size_of::<T>();
    let n = data.len();
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(data);
    let ptr = bytes.as_mut_ptr();

    // Source and destination alias exactly: each element is loaded in full
    // before its reversed form is stored back, so the kernels are sound here.
    match width {
        1 => {}
        2 => unsafe { kernels::swap_copy_16(ptr, ptr, n) },
        4 => unsafe { kernels::swap_copy_32(ptr, ptr, n) },
        8 => unsafe { kernels::swap_copy_64(ptr, ptr, n) },
        other => return Err(AccessorError::InvalidDataSize(other)),
    }
    Ok(())
}
