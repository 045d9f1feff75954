//! Kernel Capability Probes
//!
//! Process-wide facts about the running kernel, each probed once on first
//! use and then reused.

use log::{debug, warn};
use spin::Once;

use super::abi::{capget, CapUserHeader, INVALID_CAPABILITY_VERSION};
use crate::cap::names::MAX_CAPABILITY_NUMBER;

/// Where the kernel advertises its highest capability number.
pub const CAP_LAST_CAP_PATH: &str = "/proc/sys/kernel/cap_last_cap";

static NATIVE_VERSION: Once<u32> = Once::new();
static LAST_CAPABILITY: Once<i32> = Once::new();

/// Version of the capability data structure the running kernel natively
/// uses, or 0 if it couldn't be detected.
pub fn kernel_capability_version() -> u32 {
    *NATIVE_VERSION.call_once(probe_native_version)
}

/// Highest capability number supported by the running kernel.
///
/// Falls back to [`MAX_CAPABILITY_NUMBER`] when the kernel doesn't tell.
/// May be higher than the numbers this crate has names for.
pub fn last_capability() -> i32 {
    *LAST_CAPABILITY.call_once(probe_last_capability)
}

/// Ask with a version the kernel doesn't know and no data pointer; the
/// kernel then writes its own version into the header and returns success.
fn probe_native_version() -> u32 {
    let mut header = CapUserHeader {
        version: INVALID_CAPABILITY_VERSION,
        pid: 0,
    };
    let result = capget(&mut header, None);
    debug!(
        "native capability version {:#x} (probe result {:?})",
        header.version, result
    );
    header.version
}

fn probe_last_capability() -> i32 {
    let contents = match std::fs::read_to_string(CAP_LAST_CAP_PATH) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(
                "cannot read {}: {}, assuming last capability {}",
                CAP_LAST_CAP_PATH, err, MAX_CAPABILITY_NUMBER
            );
            return MAX_CAPABILITY_NUMBER;
        }
    };
    parse_last_capability(&contents)
}

/// Parse the contents of `cap_last_cap`; garbage and zero both mean "use
/// the built-in maximum".
fn parse_last_capability(contents: &str) -> i32 {
    match contents.trim().parse::<i32>() {
        Ok(last) if last > 0 => {
            debug!("kernel last capability {}", last);
            last
        }
        Ok(_) => {
            debug!(
                "kernel reports no last capability, assuming {}",
                MAX_CAPABILITY_NUMBER
            );
            MAX_CAPABILITY_NUMBER
        }
        Err(err) => {
            warn!(
                "invalid last capability {:?}: {}, assuming {}",
                contents, err, MAX_CAPABILITY_NUMBER
            );
            MAX_CAPABILITY_NUMBER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::names::CAP_SYS_ADMIN;
    use crate::syscall::abi::LINUX_CAPABILITY_VERSION_3;

    #[test]
    fn test_kernel_capability_version() {
        let version = kernel_capability_version();
        assert_ne!(version, 0);
        assert!(version >= LINUX_CAPABILITY_VERSION_3);
        // Memoized.
        assert_eq!(kernel_capability_version(), version);
    }

    #[test]
    fn test_last_capability() {
        let last = last_capability();
        assert!(last >= CAP_SYS_ADMIN);
        assert_eq!(last_capability(), last);
    }

    #[test]
    fn test_parse_last_capability() {
        assert_eq!(parse_last_capability("40\n"), 40);
        assert_eq!(parse_last_capability("63"), 63);
        assert_eq!(parse_last_capability("0\n"), MAX_CAPABILITY_NUMBER);
        assert_eq!(parse_last_capability(""), MAX_CAPABILITY_NUMBER);
        assert_eq!(parse_last_capability("forty"), MAX_CAPABILITY_NUMBER);
    }
}
