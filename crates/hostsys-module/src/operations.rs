//! The fixed `system:*` operation table.

use crate::facade::ProcessControl;
use hostsys_common::{SystemResult, Value};

pub const EXIT: &str = "system:exit";
pub const CHANGE_DIRECTORY: &str = "system:chdir";
pub const CURRENT_DIRECTORY: &str = "system:dir";
pub const EXECUTE: &str = "system:execute";
pub const WAIT: &str = "system:wait";

/// Signature shared by every table entry. Arity is checked before the call.
pub type OperationFn = fn(&ProcessControl, &[Value]) -> SystemResult<Option<Value>>;

/// One named operation exposed to the calling environment.
#[derive(Clone, Copy)]
pub struct OperationEntry {
    pub name: &'static str,
    pub documentation: &'static str,
    pub arity: usize,
    pub function: OperationFn,
}

impl std::fmt::Debug for OperationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationEntry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

static OPERATIONS: [OperationEntry; 5] = [
    OperationEntry {
        name: EXIT,
        documentation: "Ends the current process with the given exit code; never returns.",
        arity: 1,
        function: |control, args| match control.exit(&args[0]) {
            Err(e) => Err(e),
            Ok(never) => match never {},
        },
    },
    OperationEntry {
        name: CHANGE_DIRECTORY,
        documentation: "Changes the working directory to the given path.",
        arity: 1,
        function: |control, args| control.change_directory(&args[0]).map(|()| None),
    },
    OperationEntry {
        name: CURRENT_DIRECTORY,
        documentation: "Returns the current working directory.",
        arity: 0,
        function: |control, _| control.current_directory().map(Some),
    },
    OperationEntry {
        name: EXECUTE,
        documentation: "Starts a program with a list of string arguments and returns its process identifier.",
        arity: 2,
        function: |control, args| control.execute(&args[0], &args[1]).map(Some),
    },
    OperationEntry {
        name: WAIT,
        documentation: "Blocks until the process exits, is signaled or is stopped; returns the exit code or signal number.",
        arity: 1,
        function: |control, args| control.wait(&args[0]).map(Some),
    },
];

/// All operations, in registration order.
pub fn operations() -> &'static [OperationEntry] {
    &OPERATIONS
}

/// Looks up an operation by its full name.
pub fn find_operation(name: &str) -> Option<&'static OperationEntry> {
    OPERATIONS.iter().find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        let names: Vec<_> = operations().iter().map(|e| e.name).collect();
        assert_eq!(names, [EXIT, CHANGE_DIRECTORY, CURRENT_DIRECTORY, EXECUTE, WAIT]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_operation("system:wait").unwrap().arity, 1);
        assert_eq!(find_operation("system:execute").unwrap().arity, 2);
        assert_eq!(find_operation("system:dir").unwrap().arity, 0);
        assert!(find_operation("system:fork").is_none());
        assert!(find_operation("wait").is_none());
    }

    #[test]
    fn test_every_entry_documented() {
        assert!(operations().iter().all(|e| !e.documentation.is_empty()));
    }
}
