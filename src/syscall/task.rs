//! Task Capability Get and Set
//!
//! Moves [`TaskCapabilities`] in and out of the kernel.
//!
//! # Threads
//! Capabilities belong to a single kernel task (thread). Task id 0 always
//! means the calling thread, so callers that run on green threads or task
//! executors must stay on the same OS thread between a get and a set.
//!
//! # Atomicity
//! [`set_effective`] and [`add_effective`] read, modify and write back.
//! Changes made by someone else in between are lost.

use std::borrow::Cow;

use log::debug;

use super::abi::{self, CapData, CapUserHeader};
use crate::cap::{CapabilitySet, TaskCapabilities};
use crate::errno;
use crate::error::{Error, Result};

/// Map a raw errno from a failed capability call into an [`Error`].
fn os_error(op: &str, tid: i32, code: i32) -> Error {
    debug!("{} for task {} failed with errno {}", op, tid, code);
    // A failed call always sets errno; 0 would mean libc lost it.
    let errno = errno::error(code).unwrap_or(Cow::Owned(errno::Errno::EINVAL));
    Error::Os(errno)
}

/// Spread the kernel's per-word structure into three sets of exactly
/// [`abi::CAP_U32S`] words each.
fn unpack(data: &CapData) -> TaskCapabilities {
    let set = |field: fn(&abi::CapUserData) -> u32| {
        CapabilitySet::from_words(data.iter().map(field).collect())
    };
    TaskCapabilities {
        effective: set(|d| d.effective),
        permitted: set(|d| d.permitted),
        inheritable: set(|d| d.inheritable),
    }
}

/// Fold three sets into the kernel's per-word structure.
///
/// Words a set doesn't have are zero; words beyond [`abi::CAP_U32S`] are
/// silently left out.
fn pack(caps: &TaskCapabilities) -> CapData {
    let word = |set: &CapabilitySet, idx: usize| set.words().get(idx).copied().unwrap_or(0);
    let mut data = CapData::default();
    for (idx, d) in data.iter_mut().enumerate() {
        d.effective = word(&caps.effective, idx);
        d.permitted = word(&caps.permitted, idx);
        d.inheritable = word(&caps.inheritable, idx);
    }
    data
}

/// Get the capability sets of a task.
///
/// # Arguments
/// * `tid` - Task (thread) id, 0 for the calling task
///
/// # Returns
/// * `Ok(TaskCapabilities)` - each set holding exactly [`abi::CAP_U32S`] words
/// * `Err(Error::Os)` - the kernel rejected the query, e.g. `EINVAL` for a
///   task that doesn't exist
pub fn of_task(tid: i32) -> Result<TaskCapabilities> {
    let mut header = CapUserHeader::v3(tid);
    let mut data = CapData::default();
    abi::capget(&mut header, Some(&mut data))
        .map_err(|errno| os_error("capget", tid, errno.raw()))?;
    Ok(unpack(&data))
}

/// Get the capability sets of the calling task.
pub fn of_this_task() -> Result<TaskCapabilities> {
    of_task(0)
}

/// Set the capability sets of a task.
///
/// Only [`abi::CAP_U32S`] words per set are handed to the kernel; capabilities
/// beyond that are ignored.
///
/// # Returns
/// * `Ok(())` - all three sets were applied
/// * `Err(Error::Os)` - nothing was applied, e.g. `EPERM` for another task
///   or when raising capabilities beyond the permitted set
pub fn set_for_task(tid: i32, caps: &TaskCapabilities) -> Result<()> {
    let mut header = CapUserHeader::v3(tid);
    let data = pack(caps);
    abi::capset(&mut header, &data).map_err(|errno| os_error("capset", tid, errno.raw()))
}

/// Set the capability sets of the calling task.
pub fn set_for_this_task(caps: &TaskCapabilities) -> Result<()> {
    set_for_task(0, caps)
}

/// Make exactly the given capabilities effective for the calling task.
///
/// Returns the capabilities from before the change.
pub fn set_effective<I: IntoIterator<Item = i32>>(capnos: I) -> Result<TaskCapabilities> {
    let before = of_this_task()?;
    let mut after = before.clone();
    after.effective = capnos.into_iter().collect();
    set_for_this_task(&after)?;
    Ok(before)
}

/// Add the given capabilities to the effective set of the calling task.
///
/// Returns the capabilities from before the change.
pub fn add_effective<I: IntoIterator<Item = i32>>(capnos: I) -> Result<TaskCapabilities> {
    let before = of_this_task()?;
    let mut after = before.clone();
    after.effective.add_all(capnos);
    set_for_this_task(&after)?;
    Ok(before)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::names::{CAP_NET_RAW, CAP_SYS_ADMIN};
    use crate::errno::Errno;
    use crate::syscall::abi::CAP_U32S;

    fn is_root() -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() == 0 }
    }

    /// Run a test body on its own thread so capability changes can't leak
    /// into other tests.
    fn on_own_thread<F: FnOnce() + Send + 'static>(f: F) {
        std::thread::spawn(f).join().expect("test thread panicked");
    }

    fn raw_socket() -> std::result::Result<(), Errno> {
        // SAFETY: plain socket creation; the fd is closed right away
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_RAW, 254) };
        if fd < 0 {
            return Err(Errno::last());
        }
        // SAFETY: fd was just returned by socket and is owned here
        unsafe { libc::close(fd) };
        Ok(())
    }

    #[test]
    fn test_pack_unpack() {
        let mut caps = TaskCapabilities::new();
        caps.effective.add(CAP_SYS_ADMIN);
        caps.permitted.add_all([CAP_SYS_ADMIN, 33, 200]);

        let data = pack(&caps);
        assert_eq!(data[0].effective, 1 << CAP_SYS_ADMIN);
        assert_eq!(data[0].permitted, 1 << CAP_SYS_ADMIN);
        assert_eq!(data[1].permitted, 1 << 1);
        assert_eq!(data[1].effective, 0);
        assert!(data.iter().all(|d| d.inheritable == 0));

        let back = unpack(&data);
        assert_eq!(back.effective.len(), CAP_U32S);
        assert!(back.effective.has(CAP_SYS_ADMIN));
        assert!(back.permitted.has(33));
        // Beyond the kernel's words.
        assert!(!back.permitted.has(200));
        assert_eq!(back.inheritable.words(), &[0; CAP_U32S]);
    }

    #[test]
    fn test_of_this_task() {
        let caps = of_this_task().expect("querying own capabilities");
        assert_eq!(caps.effective.len(), CAP_U32S);
        assert_eq!(caps.permitted.len(), CAP_U32S);
        assert_eq!(caps.inheritable.len(), CAP_U32S);
    }

    #[test]
    fn test_of_missing_task() {
        let err = of_task(-1).expect_err("task -1 doesn't exist");
        assert_eq!(err.errno(), Some(Errno::EINVAL));
    }

    #[test]
    fn test_set_for_missing_task() {
        let err = set_for_task(-1, &TaskCapabilities::new()).expect_err("task -1 doesn't exist");
        assert_eq!(err.errno(), Some(Errno::EPERM));
    }

    #[test]
    fn test_set_unchanged() {
        on_own_thread(|| {
            let caps = of_this_task().expect("querying own capabilities");
            set_for_this_task(&caps).expect("reapplying own capabilities");
            assert_eq!(of_this_task().expect("querying own capabilities"), caps);
        });
    }

    #[test]
    fn test_drop_and_regain() {
        if !is_root() {
            return;
        }
        on_own_thread(|| {
            let before = of_this_task().expect("querying own capabilities");
            if !before.permitted.has(CAP_NET_RAW) {
                return;
            }

            let mut powerless = before.clone();
            powerless.effective.clear();
            set_for_this_task(&powerless).expect("dropping effective capabilities");
            assert!(raw_socket().is_err());

            powerless.effective.add(CAP_NET_RAW);
            set_for_this_task(&powerless).expect("regaining CAP_NET_RAW");
            raw_socket().expect("raw socket with CAP_NET_RAW");
        });
    }

    #[test]
    fn test_set_and_add_effective() {
        if !is_root() {
            return;
        }
        on_own_thread(|| {
            let orig = of_this_task().expect("querying own capabilities");
            if !orig.permitted.has(CAP_NET_RAW) || !orig.permitted.has(CAP_SYS_ADMIN) {
                return;
            }

            let before = set_effective([CAP_NET_RAW]).expect("setting effective");
            assert_eq!(before.effective, orig.effective);
            let current = of_this_task().expect("querying own capabilities");
            assert!(current.effective.has(CAP_NET_RAW));
            assert!(!current.effective.has(CAP_SYS_ADMIN));

            let before = add_effective([CAP_SYS_ADMIN]).expect("adding effective");
            assert_eq!(before.effective, current.effective);
            let after = of_this_task().expect("querying own capabilities");
            assert!(after.effective.has(CAP_SYS_ADMIN));
            assert!(after.effective.has(CAP_NET_RAW));
        });
    }
}
