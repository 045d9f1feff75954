//! Capability Sets and Names
//!
//! Pure data: capability sets, the per-task triple of sets, and the
//! capability name table. Nothing here talks to the kernel.
//!
//! # Design
//! - A capability set is a growable sequence of 32-bit words
//! - Sets grow when capabilities get added and never shrink on their own
//! - Capability numbers are `i32`; negative numbers are a programming
//!   error and panic

pub mod names;
pub mod set;
pub mod task;

pub use names::{compare_names, MAX_CAPABILITY_NUMBER};
pub use set::CapabilitySet;
pub use task::TaskCapabilities;
