// src/lib.rs
//! # accessors-rs
//!
//! A low-level memory-access bridge: endianness-swapping block copies
//! between memory regions, pinned managed-region dispatch, and System V
//! shared memory segments.
//!
//! ## Features
//!
//! - 🚀 **Near-memcpy throughput**: the swap kernels move 8 bytes per
//!   iteration with packed-lane byte reversal
//! - 🎯 **Exact semantics on any host**: byte permutation is confined to
//!   each element and driven purely by the region tags, never by the host
//!   byte order
//! - 📌 **Pinning discipline**: managed regions are pinned for exactly the
//!   duration of a transfer, released on every exit path
//! - 🔒 **Safe surfaces**: bounds-checked sources, slice front ends, and
//!   RAII shared-memory segments around the unsafe core
//!
//! ## Quick Start
//!
//! ### Swapping copies between byte spans
//!
//! ```rust
//! use accessors_rs::{copy_slices, CopyStatus, Endianness};
//!
//! let src = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06];
//! let mut dst = [0u8; 6];
//!
//! // Three 16-bit elements, little-endian source to big-endian target.
//! let status = copy_slices(
//!     &mut dst,
//!     &src,
//!     2,
//!     3,
//!     Endianness::Little,
//!     Endianness::Big,
//! )
//! .unwrap();
//!
//! assert_eq!(status, CopyStatus::Ok);
//! assert_eq!(dst, [0x02, 0x01, 0x04, 0x03, 0x06, 0x05]);
//! ```
//!
//! ### Managed regions under pinning
//!
//! ```rust
//! use accessors_rs::{copy_memory, CopyStatus, Endianness, Region, RegionRegistry};
//!
//! let registry = RegionRegistry::new();
//! let src = registry.insert_from(&[0xde, 0xad, 0xbe, 0xef]);
//! let dst = registry.insert(4);
//!
//! let status = unsafe {
//!     copy_memory(
//!         &registry,
//!         Region::managed(src, 0),
//!         Region::managed(dst, 0),
//!         4,
//!         1,
//!         Endianness::Little,
//!         Endianness::Big,
//!     )
//! }
//! .unwrap();
//!
//! assert_eq!(status, CopyStatus::Ok);
//! assert_eq!(registry.snapshot(dst).unwrap(), vec![0xef, 0xbe, 0xad, 0xde]);
//! ```

// Modules
pub mod copy;
pub mod error;
pub mod region;
pub mod source;
pub mod swap;
pub mod types;

#[cfg(unix)]
pub mod shm;

// Re-export commonly used types at the crate root for convenience
pub use error::{AccessorError, Result};

// Type exports
pub use types::{CopyStatus, Endianness, SUPPORTED_WIDTHS};

// Copy engine exports
pub use copy::{copy_memory, copy_slices};

// Region exports
pub use region::{NoPinner, PinGuard, Region, RegionBase, RegionHandle, RegionPinner, RegionRegistry};

// Source exports
pub use source::DirectSource;

#[cfg(feature = "mmap")]
pub use source::MappedSource;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use accessors_rs::prelude::*;
    //! ```

    pub use crate::copy::{copy_memory, copy_slices};
    pub use crate::error::{AccessorError, Result};
    pub use crate::region::{Region, RegionHandle, RegionPinner, RegionRegistry};
    pub use crate::source::DirectSource;
    pub use crate::types::{CopyStatus, Endianness};

    #[cfg(unix)]
    pub use crate::shm::ShmSegment;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
