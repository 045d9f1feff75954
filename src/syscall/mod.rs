//! Kernel Capability Interface
//!
//! Gets and sets task capabilities through `capget(2)` and `capset(2)`.
//!
//! # Design
//! - Only version 3 of the capability data structure is spoken
//! - Kernel facts (native version, last capability) are probed once per
//!   process and memoized
//! - Kernel rejections are returned as errors, never retried
//!
//! # Calls
//! - [`of_task`] / [`of_this_task`] - query capability sets
//! - [`set_for_task`] / [`set_for_this_task`] - replace capability sets
//! - [`set_effective`] / [`add_effective`] - read-modify-write of the
//!   calling task's effective set

pub mod abi;
mod probe;
mod task;

pub use probe::{kernel_capability_version, last_capability, CAP_LAST_CAP_PATH};
pub use task::{
    add_effective, of_task, of_this_task, set_effective, set_for_task, set_for_this_task,
};
