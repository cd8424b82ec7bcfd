//! # hostsys process
//!
//! Low-level host primitives behind the process control facade:
//! - Working directory query and change
//! - Argument vector construction
//! - Process spawning
//! - Blocking wait with exit/signal/stop decoding
//! - Self termination
//!
//! Spawn and wait are implemented for Unix only; on other platforms they
//! return [`hostsys_common::SystemError::Unsupported`].

pub mod argv;
pub mod directory;
pub mod execute;
pub mod terminate;
pub mod wait;

// Re-export main types
pub use argv::*;
pub use directory::*;
pub use execute::*;
pub use terminate::*;
pub use wait::*;
