//! # hostsys common
//!
//! Types shared by the hostsys crates: the error type every operation
//! returns, and the value model used to exchange arguments and results with
//! the calling environment.

pub mod errors;
pub mod value;

// Re-export commonly used items
pub use errors::{ErrorKind, SystemError, SystemResult};
pub use value::{CodepointDecoder, HostText, TextDecoder, Value};
