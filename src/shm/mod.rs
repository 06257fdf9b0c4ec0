// src/shm/mod.rs
//! System V shared memory segments.
//!
//! Thin, safe wrappers over `ftok`/`shmget`/`shmat`/`shmdt`/`shmctl`
//! plus an RAII segment type. A segment attached here is just another
//! region source: [`ShmSegment::region`] plugs it into the copy engine.

use crate::error::{AccessorError, Result};
use crate::region::Region;
use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

/// Stable identifiers for the IPC constants the bridge exposes.
///
/// The ids are a boundary contract with bindings that look constants up by
/// number; the values they map to come from the host libc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum IpcConstant {
    Creat = 1,
    Rmid = 2,
}

impl IpcConstant {
    /// The host value of this constant.
    pub fn value(self) -> i32 {
        match self {
            IpcConstant::Creat => libc::IPC_CREAT,
            IpcConstant::Rmid => libc::IPC_RMID,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(IpcConstant::Creat),
            2 => Some(IpcConstant::Rmid),
            _ => None,
        }
    }
}

/// OS error number of the calling thread's last failed syscall.
pub fn last_errno() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Human-readable message for an OS error number (`strerror` equivalent).
pub fn errno_message(errno: i32) -> String {
    io::Error::from_raw_os_error(errno).to_string()
}

fn os_error(context: &'static str) -> AccessorError {
    AccessorError::Os {
        context,
        source: io::Error::last_os_error(),
    }
}

/// Derive a System V IPC key from a filesystem path and a project id.
///
/// The path must name an existing, accessible file.
pub fn ftok(path: impl AsRef<Path>, project_id: i32) -> Result<libc::key_t> {
    let bytes = path.as_ref().as_os_str().as_bytes();
    let cpath = CString::new(bytes).map_err(|_| AccessorError::Os {
        context: "ftok",
        source: io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"),
    })?;
    let key = unsafe { libc::ftok(cpath.as_ptr(), project_id) };
    if key == -1 {
        return Err(os_error("ftok"));
    }
    Ok(key)
}

fn shmget(key: libc::key_t, len: usize, flags: i32) -> Result<i32> {
    let shmid = unsafe { libc::shmget(key, len, flags) };
    if shmid == -1 {
        return Err(os_error("shmget"));
    }
    Ok(shmid)
}

fn shmat(shmid: i32, flags: i32) -> Result<NonNull<u8>> {
    let addr = unsafe { libc::shmat(shmid, std::ptr::null(), flags) };
    if addr as isize == -1 {
        return Err(os_error("shmat"));
    }
    NonNull::new(addr as *mut u8).ok_or_else(|| os_error("shmat"))
}

/// An attached System V shared memory segment.
///
/// Dropping the segment detaches it; segments created non-persistent also
/// remove the backing region (`IPC_RMID`) on drop, so a crashed process
/// does not leave garbage behind.
///
/// # Example
///
/// ```no_run
/// use accessors_rs::shm::ShmSegment;
///
/// let key = accessors_rs::shm::ftok("/tmp/some-existing-file", 7)?;
/// let seg = ShmSegment::create(key, 4096, 0o600, false)?;
/// let other = ShmSegment::attach(key, 4096, 0)?;
/// # Ok::<(), accessors_rs::AccessorError>(())
/// ```
pub struct ShmSegment {
    shmid: i32,
    base: NonNull<u8>,
    len: usize,
    destroy_on_drop: bool,
    attached: bool,
}

// The mapping stays valid until detach; cross-thread use is the point of
// shared memory. Concurrent byte-level access follows the engine's
// no-internal-synchronization model.
unsafe impl Send for ShmSegment {}

impl ShmSegment {
    /// Create a segment for `key` (adding `IPC_CREAT` to `flags`) and
    /// attach it. A non-`persistent` segment is removed when this handle
    /// drops; a persistent one outlives it.
    pub fn create(key: libc::key_t, len: usize, flags: i32, persistent: bool) -> Result<Self> {
        let shmid = shmget(key, len, flags | libc::IPC_CREAT)?;
        let base = shmat(shmid, 0)?;
        Ok(ShmSegment {
            shmid,
            base,
            len,
            destroy_on_drop: !persistent,
            attached: true,
        })
    }

    /// Attach an existing segment identified by `key`.
    pub fn attach(key: libc::key_t, len: usize, flags: i32) -> Result<Self> {
        let shmid = shmget(key, len, flags)?;
        let base = shmat(shmid, 0)?;
        Ok(ShmSegment {
            shmid,
            base,
            len,
            destroy_on_drop: false,
            attached: true,
        })
    }

    /// Attach an existing segment by its `shmid`.
    pub fn attach_id(shmid: i32, len: usize, flags: i32) -> Result<Self> {
        let base = shmat(shmid, flags)?;
        Ok(ShmSegment {
            shmid,
            base,
            len,
            destroy_on_drop: false,
            attached: true,
        })
    }

    /// [`create`](Self::create) with the key derived from a path via
    /// [`ftok`].
    pub fn create_at(
        path: impl AsRef<Path>,
        project_id: i32,
        len: usize,
        flags: i32,
        persistent: bool,
    ) -> Result<Self> {
        Self::create(ftok(path, project_id)?, len, flags, persistent)
    }

    /// [`attach`](Self::attach) with the key derived from a path via
    /// [`ftok`].
    pub fn attach_at(
        path: impl AsRef<Path>,
        project_id: i32,
        len: usize,
        flags: i32,
    ) -> Result<Self> {
        Self::attach(ftok(path, project_id)?, len, flags)
    }

    /// Segment identifier as returned by `shmget`.
    pub fn id(&self) -> i32 {
        self.shmid
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Base address of the attached mapping.
    pub fn as_ptr(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    /// View the segment as a copy-engine region starting at `offset`.
    pub fn region(&self, offset: usize) -> Region {
        Region::raw(self.base.as_ptr(), offset)
    }

    /// View the segment's bytes.
    ///
    /// # Safety
    ///
    /// Other processes attached to the segment may write concurrently;
    /// the caller must ensure no writer races this view.
    pub unsafe fn as_slice(&self) -> &[u8] {
        std::slice::from_raw_parts(self.base.as_ptr(), self.len)
    }

    /// Mutable view of the segment's bytes.
    ///
    /// # Safety
    ///
    /// Same aliasing caveat as [`as_slice`](Self::as_slice).
    pub unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        std::slice::from_raw_parts_mut(self.base.as_ptr(), self.len)
    }

    /// Detach the mapping. The segment itself keeps existing for other
    /// attachments.
    pub fn detach(&mut self) -> Result<()> {
        if self.attached {
            let rc = unsafe { libc::shmdt(self.base.as_ptr() as *const libc::c_void) };
            if rc == -1 {
                return Err(os_error("shmdt"));
            }
            self.attached = false;
        }
        Ok(())
    }

    /// Detach and remove the backing segment (`IPC_RMID`).
    pub fn destroy(mut self) -> Result<()> {
        self.detach()?;
        let rc = unsafe { libc::shmctl(self.shmid, libc::IPC_RMID, std::ptr::null_mut()) };
        self.destroy_on_drop = false;
        if rc == -1 {
            return Err(os_error("shmctl"));
        }
        Ok(())
    }
}

impl Drop for ShmSegment {
    fn drop(&mut self) {
        if self.attached {
            unsafe { libc::shmdt(self.base.as_ptr() as *const libc::c_void) };
            self.attached = false;
        }
        if self.destroy_on_drop {
            unsafe { libc::shmctl(self.shmid, libc::IPC_RMID, std::ptr::null_mut()) };
        }
    }
}

impl std::fmt::Debug for ShmSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShmSegment")
            .field("shmid", &self.shmid)
            .field("len", &self.len)
            .field("attached", &self.attached)
            .field("destroy_on_drop", &self.destroy_on_drop)
            .finish()
    }
}
