//! Capability Names
//!
//! Canonical `CAP_xxx` names for the capability numbers known to this
//! crate, and the ordering used when listing them.
//!
//! # Anonymous Capabilities
//! Kernels newer than this table may report capability numbers without a
//! known name. Those are shown as `CAP_<number>` and always sort after the
//! named ones.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Change file ownership and group.
pub const CAP_CHOWN: i32 = 0;
/// Bypass file read, write and execute permission checks.
pub const CAP_DAC_OVERRIDE: i32 = 1;
/// Bypass file read and directory search permission checks.
pub const CAP_DAC_READ_SEARCH: i32 = 2;
/// Bypass checks requiring the file owner's uid.
pub const CAP_FOWNER: i32 = 3;
/// Keep set-user-ID and set-group-ID bits when modifying files.
pub const CAP_FSETID: i32 = 4;
/// Bypass permission checks for sending signals.
pub const CAP_KILL: i32 = 5;
/// Manipulate process GIDs and supplementary groups.
pub const CAP_SETGID: i32 = 6;
/// Manipulate process UIDs.
pub const CAP_SETUID: i32 = 7;
/// Modify the capability bounding set and grant inheritable capabilities.
pub const CAP_SETPCAP: i32 = 8;
/// Set the immutable and append-only inode flags.
pub const CAP_LINUX_IMMUTABLE: i32 = 9;
/// Bind sockets to ports below 1024.
pub const CAP_NET_BIND_SERVICE: i32 = 10;
/// Broadcast and listen to multicast.
pub const CAP_NET_BROADCAST: i32 = 11;
/// Perform network administration.
pub const CAP_NET_ADMIN: i32 = 12;
/// Use RAW and PACKET sockets.
pub const CAP_NET_RAW: i32 = 13;
/// Lock memory.
pub const CAP_IPC_LOCK: i32 = 14;
/// Bypass permission checks on System V IPC objects.
pub const CAP_IPC_OWNER: i32 = 15;
/// Load and unload kernel modules.
pub const CAP_SYS_MODULE: i32 = 16;
/// Perform raw I/O port operations.
pub const CAP_SYS_RAWIO: i32 = 17;
/// Use chroot(2).
pub const CAP_SYS_CHROOT: i32 = 18;
/// Trace arbitrary processes.
pub const CAP_SYS_PTRACE: i32 = 19;
/// Use acct(2).
pub const CAP_SYS_PACCT: i32 = 20;
/// Perform a wide range of system administration.
pub const CAP_SYS_ADMIN: i32 = 21;
/// Use reboot(2) and kexec_load(2).
pub const CAP_SYS_BOOT: i32 = 22;
/// Raise nice values and change scheduling of any process.
pub const CAP_SYS_NICE: i32 = 23;
/// Override resource limits.
pub const CAP_SYS_RESOURCE: i32 = 24;
/// Set the system clock.
pub const CAP_SYS_TIME: i32 = 25;
/// Use vhangup(2) and privileged terminal ioctls.
pub const CAP_SYS_TTY_CONFIG: i32 = 26;
/// Create special files with mknod(2).
pub const CAP_MKNOD: i32 = 27;
/// Establish leases on arbitrary files.
pub const CAP_LEASE: i32 = 28;
/// Write records to the kernel audit log.
pub const CAP_AUDIT_WRITE: i32 = 29;
/// Configure kernel auditing.
pub const CAP_AUDIT_CONTROL: i32 = 30;
/// Set file capabilities.
pub const CAP_SETFCAP: i32 = 31;
/// Override Mandatory Access Control.
pub const CAP_MAC_OVERRIDE: i32 = 32;
/// Configure Mandatory Access Control.
pub const CAP_MAC_ADMIN: i32 = 33;
/// Perform privileged syslog(2) operations.
pub const CAP_SYSLOG: i32 = 34;
/// Trigger something that will wake up the system.
pub const CAP_WAKE_ALARM: i32 = 35;
/// Block system suspend.
pub const CAP_BLOCK_SUSPEND: i32 = 36;
/// Read the audit log via multicast netlink.
pub const CAP_AUDIT_READ: i32 = 37;
/// Use performance monitoring.
pub const CAP_PERFMON: i32 = 38;
/// Use privileged BPF operations.
pub const CAP_BPF: i32 = 39;
/// Use checkpoint/restore functionality.
pub const CAP_CHECKPOINT_RESTORE: i32 = 40;

/// Highest capability number this crate has a name for.
///
/// Only used as a fallback when the running kernel doesn't tell us its own
/// last capability.
pub const MAX_CAPABILITY_NUMBER: i32 = CAP_CHECKPOINT_RESTORE;

/// Names indexed by capability number.
static NAMES: [&str; MAX_CAPABILITY_NUMBER as usize + 1] = [
    "CAP_CHOWN",
    "CAP_DAC_OVERRIDE",
    "CAP_DAC_READ_SEARCH",
    "CAP_FOWNER",
    "CAP_FSETID",
    "CAP_KILL",
    "CAP_SETGID",
    "CAP_SETUID",
    "CAP_SETPCAP",
    "CAP_LINUX_IMMUTABLE",
    "CAP_NET_BIND_SERVICE",
    "CAP_NET_BROADCAST",
    "CAP_NET_ADMIN",
    "CAP_NET_RAW",
    "CAP_IPC_LOCK",
    "CAP_IPC_OWNER",
    "CAP_SYS_MODULE",
    "CAP_SYS_RAWIO",
    "CAP_SYS_CHROOT",
    "CAP_SYS_PTRACE",
    "CAP_SYS_PACCT",
    "CAP_SYS_ADMIN",
    "CAP_SYS_BOOT",
    "CAP_SYS_NICE",
    "CAP_SYS_RESOURCE",
    "CAP_SYS_TIME",
    "CAP_SYS_TTY_CONFIG",
    "CAP_MKNOD",
    "CAP_LEASE",
    "CAP_AUDIT_WRITE",
    "CAP_AUDIT_CONTROL",
    "CAP_SETFCAP",
    "CAP_MAC_OVERRIDE",
    "CAP_MAC_ADMIN",
    "CAP_SYSLOG",
    "CAP_WAKE_ALARM",
    "CAP_BLOCK_SUSPEND",
    "CAP_AUDIT_READ",
    "CAP_PERFMON",
    "CAP_BPF",
    "CAP_CHECKPOINT_RESTORE",
];

const PREFIX: &str = "CAP_";

/// Look up the canonical name of a capability number.
#[inline]
pub fn name_of(capno: i32) -> Option<&'static str> {
    usize::try_from(capno)
        .ok()
        .and_then(|idx| NAMES.get(idx))
        .copied()
}

/// Look up the number of a canonical (uppercase) capability name.
pub fn number_of(name: &str) -> Option<i32> {
    NAMES
        .iter()
        .position(|&known| known == name)
        .map(|idx| idx as i32)
}

/// Name of a capability number, falling back to `CAP_<number>` for
/// numbers without a known name.
pub fn display_name(capno: i32) -> Cow<'static, str> {
    match name_of(capno) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("{PREFIX}{capno}")),
    }
}

/// Returns true for names of the form `CAP_` followed only by digits.
pub fn is_anonymous(name: &str) -> bool {
    match name.strip_prefix(PREFIX) {
        Some(digits) => digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Order capability names lexicographically, except that anonymous names
/// come after all other names.
///
/// Within the same category this is a plain byte-wise comparison, so
/// `CAP_100` sorts before `CAP_99`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match (is_anonymous(a), is_anonymous(b)) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_capability_gaps() {
        for capno in 0..=MAX_CAPABILITY_NUMBER {
            let name = name_of(capno).expect("every known number has a name");
            assert!(name.starts_with(PREFIX));
            assert_eq!(number_of(name), Some(capno));
        }
        assert_eq!(name_of(MAX_CAPABILITY_NUMBER + 1), None);
        assert_eq!(name_of(-1), None);
    }

    #[test]
    fn test_well_known_numbers() {
        assert_eq!(name_of(CAP_SYS_ADMIN), Some("CAP_SYS_ADMIN"));
        assert_eq!(name_of(CAP_NET_RAW), Some("CAP_NET_RAW"));
        assert_eq!(number_of("CAP_BPF"), Some(39));
        assert_eq!(number_of("cap_bpf"), None);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name(CAP_CHOWN), "CAP_CHOWN");
        assert_eq!(display_name(666), "CAP_666");
    }

    #[test]
    fn test_anonymous_capabilities() {
        assert!(!is_anonymous("8BALL"));
        assert!(!is_anonymous("CAP_FOO_BAR"));
        assert!(!is_anonymous("CAP_8BALL"));
        assert!(is_anonymous("CAP_666"));
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("CAP_FOO_BAR", "CAP_ZOO"), Ordering::Less);
        assert_eq!(compare_names("CAP_FOO_BAR", "CAP_BAR"), Ordering::Greater);
        assert_eq!(compare_names("CAP_FOO_BAR", "CAP_42"), Ordering::Less);
        assert_eq!(compare_names("CAP_42", "CAP_FOO"), Ordering::Greater);
        assert_eq!(compare_names("CAP_42", "CAP_88"), Ordering::Less);
        assert_eq!(compare_names("CAP_42", "CAP_42"), Ordering::Equal);
        // Byte-wise, not numeric.
        assert_eq!(compare_names("CAP_100", "CAP_99"), Ordering::Less);
    }
}
