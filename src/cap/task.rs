//! Task Capabilities
//!
//! The effective, permitted and inheritable capability sets of a task.
//!
//! # Design
//! - The three sets are independent values; no relation such as
//!   "effective is a subset of permitted" is enforced here, the kernel
//!   checks that when the sets get applied
//! - Cloning yields fully independent sets

use std::fmt;

use super::set::CapabilitySet;

/// Capability sets of a task.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskCapabilities {
    /// Capabilities currently in effect.
    pub effective: CapabilitySet,
    /// Capabilities the task may make effective.
    pub permitted: CapabilitySet,
    /// Capabilities preserved across `execve(2)`.
    pub inheritable: CapabilitySet,
}

impl TaskCapabilities {
    /// Create task capabilities with three empty sets.
    pub const fn new() -> Self {
        Self {
            effective: CapabilitySet::new(),
            permitted: CapabilitySet::new(),
            inheritable: CapabilitySet::new(),
        }
    }
}

impl fmt::Debug for TaskCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCapabilities")
            .field("effective", &self.effective.to_hex())
            .field("permitted", &self.permitted.to_hex())
            .field("inheritable", &self.inheritable.to_hex())
            .finish()
    }
}
