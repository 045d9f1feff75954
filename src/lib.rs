//! taskcaps - Linux Task Capabilities without libcap
//!
//! Gets and sets the effective, permitted and inheritable capability sets
//! of Linux tasks (threads) directly through `capget(2)` and `capset(2)`.
//!
//! # Features
//! - Capability sets that grow with the capabilities of newer kernels
//! - Capability names, including `CAP_<number>` for unknown ones
//! - Hexadecimal text form of capability sets
//! - Dropping and regaining effective capabilities
//!
//! # Dropping and Regaining Effective Capabilities
//! Capabilities are per thread. Stay on the same OS thread between getting
//! and setting them.
//!
//! ```no_run
//! use taskcaps::{names::CAP_SYS_ADMIN, of_this_task, set_for_this_task};
//!
//! # fn main() -> Result<(), taskcaps::Error> {
//! let orig = of_this_task()?;
//! let mut dropped = orig.clone();
//! dropped.effective.clear();
//! set_for_this_task(&dropped)?;
//!
//! dropped.effective.add(CAP_SYS_ADMIN);
//! set_for_this_task(&dropped)?;
//!
//! set_for_this_task(&orig)?;
//! # Ok(())
//! # }
//! ```

#![cfg(target_os = "linux")]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod cap;
pub mod errno;
pub mod error;
pub mod syscall;

pub use cap::{names, CapabilitySet, TaskCapabilities};
pub use errno::Errno;
pub use error::{Error, Result};
pub use syscall::{
    add_effective, kernel_capability_version, last_capability, of_task, of_this_task,
    set_effective, set_for_task, set_for_this_task,
};
