//! Kernel Capability ABI
//!
//! The user-space data structures of `capget(2)` and `capset(2)`, and the
//! raw system calls themselves.
//!
//! # Layout
//! ```text
//! header:  { version: u32, pid: c_int }
//! data:    [{ effective: u32, permitted: u32, inheritable: u32 }; CAP_U32S]
//!            data[0] holds caps 0..=31, data[1] caps 32..=63, ...
//! ```
//!
//! Both calls either transfer all words or fail without touching anything.

use log::trace;

use crate::errno::Errno;

/// Version 3 of the capability user-space data structure.
pub const LINUX_CAPABILITY_VERSION_3: u32 = 0x2008_0522;

/// Version tag that was never used and won't ever be. Asking the kernel
/// with it makes the kernel report its native version.
pub const INVALID_CAPABILITY_VERSION: u32 = 0;

/// Number of data elements (32-bit words per set) handed to the kernel.
///
/// The kernel transfers as many elements as its native version defines and
/// never more; extra elements stay zero on `capget` and are ignored on
/// `capset`.
pub const CAP_U32S: usize = 3;

/// Capability call header.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapUserHeader {
    /// Data structure version.
    pub version: u32,
    /// Task (thread) id; 0 is the calling task.
    pub pid: libc::c_int,
}

impl CapUserHeader {
    /// Header for a version 3 call on the given task.
    #[inline]
    pub const fn v3(pid: libc::c_int) -> Self {
        Self {
            version: LINUX_CAPABILITY_VERSION_3,
            pid,
        }
    }
}

/// One word of each of the three capability sets.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapUserData {
    /// Effective capabilities of this word.
    pub effective: u32,
    /// Permitted capabilities of this word.
    pub permitted: u32,
    /// Inheritable capabilities of this word.
    pub inheritable: u32,
}

/// Capability data as exchanged with the kernel.
pub type CapData = [CapUserData; CAP_U32S];

/// Query the capabilities of the task named in `header`.
///
/// With `data` set to `None` the kernel only validates the header. An
/// unknown version then succeeds with the native version written back into
/// the header; this is how the native version gets probed.
pub fn capget(header: &mut CapUserHeader, data: Option<&mut CapData>) -> Result<(), Errno> {
    let data_ptr = data.map_or(core::ptr::null_mut(), |d| d.as_mut_ptr());
    trace!(
        "capget(version={:#x}, pid={}, data={:?})",
        header.version,
        header.pid,
        data_ptr
    );

    // SAFETY:
    // - header is a valid, exclusively borrowed CapUserHeader
    // - data_ptr is either null (accepted by the kernel) or points to
    //   CAP_U32S elements, at least as many as any version writes
    let ret = unsafe {
        libc::syscall(
            libc::SYS_capget,
            header as *mut CapUserHeader,
            data_ptr,
        )
    };
    if ret != 0 {
        return Err(Errno::last());
    }
    Ok(())
}

/// Set the capabilities of the task named in `header`.
pub fn capset(header: &mut CapUserHeader, data: &CapData) -> Result<(), Errno> {
    trace!(
        "capset(version={:#x}, pid={}, data={:?})",
        header.version,
        header.pid,
        data
    );

    // SAFETY:
    // - header is a valid, exclusively borrowed CapUserHeader
    // - data points to CAP_U32S elements and is only read by the kernel
    let ret = unsafe {
        libc::syscall(
            libc::SYS_capset,
            header as *mut CapUserHeader,
            data.as_ptr(),
        )
    };
    if ret != 0 {
        return Err(Errno::last());
    }
    Ok(())
}
