//! # hostsys module
//!
//! The Process Control Facade: five named operations over host values.
//!
//! | Operation        | Arguments        | Result          |
//! |------------------|------------------|-----------------|
//! | `system:exit`    | Number           | never returns   |
//! | `system:chdir`   | String           | none            |
//! | `system:dir`     | none             | String          |
//! | `system:execute` | String, List     | Number (pid)    |
//! | `system:wait`    | Number (pid)     | Number (status) |
//!
//! ```rust,no_run
//! use hostsys_common::Value;
//! use hostsys_module::ProcessControl;
//!
//! let control = ProcessControl::default();
//! let pid = control
//!     .invoke("system:execute", &[Value::from("true"), Value::List(vec![])])
//!     .unwrap()
//!     .unwrap();
//! let status = control.invoke("system:wait", &[pid]).unwrap();
//! assert_eq!(status, Some(Value::number(0)));
//! ```

pub mod config;
pub mod facade;
pub mod operations;

pub use config::{DirectoryConfig, FacadeConfig, LoggingConfig};
pub use facade::ProcessControl;
pub use operations::{find_operation, operations, OperationEntry};
