// src/error.rs
use crate::region::RegionHandle;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid element width: {0} bytes (supported widths are 1, 2, 4 and 8)")]
    InvalidDataSize(usize),

    #[error("out of bounds: offset {offset} + {len} bytes exceeds region of {capacity} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("region not found: {0}")]
    RegionNotFound(RegionHandle),

    #[error("region {0} is pinned and cannot be removed")]
    RegionPinned(RegionHandle),

    #[error("{context}: {source}")]
    Os {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl AccessorError {
    /// OS error number carried by this error, if it originated in a syscall.
    pub fn errno(&self) -> Option<i32> {
        match self {
            AccessorError::Os { source, .. } => source.raw_os_error(),
            AccessorError::Io(source) => source.raw_os_error(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AccessorError>;
