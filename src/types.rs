// src/types.rs

/// Byte order tag attached to a memory region.
///
/// The copy engine only ever compares the source and destination tags for
/// equality; the host byte order never influences which kernel runs.
/// `NATIVE` exists for the typed accessor surface, where "whatever this
/// machine does" is a common default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// The byte order of the host.
    pub const NATIVE: Endianness = if cfg!(target_endian = "big") {
        Endianness::Big
    } else {
        Endianness::Little
    };

    /// Check whether this tag matches the host byte order.
    pub fn is_native(self) -> bool {
        self == Endianness::NATIVE
    }

    /// The opposite byte order.
    pub fn flipped(self) -> Endianness {
        match self {
            Endianness::Little => Endianness::Big,
            Endianness::Big => Endianness::Little,
        }
    }
}

/// Status code returned by the copy engine.
///
/// The numeric values are part of the boundary contract consumed by
/// bindings that see the status as a raw integer; they must not be
/// reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CopyStatus {
    Ok = 0,
    InvalidDataSize = 1,
}

impl CopyStatus {
    /// The raw integer value of this status.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(CopyStatus::Ok),
            1 => Some(CopyStatus::InvalidDataSize),
            _ => None,
        }
    }

    pub fn is_ok(self) -> bool {
        self == CopyStatus::Ok
    }
}

/// Element widths the copy engine accepts, in bytes.
pub const SUPPORTED_WIDTHS: [usize; 4] = [1, 2, 4, 8];
