//! Process Control Facade.
//!
//! Converts host values into native arguments, runs the platform primitive
//! and builds the host result. Every operation validates its arguments before
//! committing to any OS call.

use crate::config::FacadeConfig;
use crate::operations::{self, find_operation};
use hostsys_common::{CodepointDecoder, HostText, SystemError, SystemResult, TextDecoder, Value};
use hostsys_process::{
    exit_code_from_number, get_working_directory, set_working_directory, spawn_process,
    terminate_self, wait_for_process, ArgumentVector, CapacityPolicy, DIRECTORY_QUERY_FAILED,
};
use std::convert::Infallible;
use std::path::Path;
use tracing::{debug, warn};

pub struct ProcessControl {
    decoder: Box<dyn TextDecoder + Send + Sync>,
    policy: CapacityPolicy,
}

impl ProcessControl {
    pub fn new(config: &FacadeConfig) -> Self {
        Self::with_decoder(config, CodepointDecoder)
    }

    /// Uses `decoder` for every host string this facade converts.
    pub fn with_decoder(
        config: &FacadeConfig,
        decoder: impl TextDecoder + Send + Sync + 'static,
    ) -> Self {
        Self {
            decoder: Box::new(decoder),
            policy: config.directory.capacity_policy(),
        }
    }

    /// Calls the operation `name` with `arguments` in call order.
    ///
    /// Returns `Ok(None)` for operations without a result.
    pub fn invoke(&self, name: &str, arguments: &[Value]) -> SystemResult<Option<Value>> {
        let entry = find_operation(name).ok_or_else(|| {
            SystemError::invalid_argument(name, "unknown operation")
        })?;

        if arguments.len() != entry.arity {
            return Err(SystemError::invalid_argument(
                name,
                format!("expected {} argument(s), got {}", entry.arity, arguments.len()),
            ));
        }

        debug!("Invoking {} with {} argument(s)", name, arguments.len());
        (entry.function)(self, arguments)
    }

    /// `system:exit`
    ///
    /// Only returns if `code` is not a number.
    pub fn exit(&self, code: &Value) -> SystemResult<Infallible> {
        let code = expect_number(operations::EXIT, code)?;
        terminate_self(exit_code_from_number(code))
    }

    /// `system:chdir`
    pub fn change_directory(&self, path: &Value) -> SystemResult<()> {
        let text = expect_string(operations::CHANGE_DIRECTORY, path)?;
        let path = self.decoder.decode(text)?;
        set_working_directory(Path::new(&path))
    }

    /// `system:dir`
    ///
    /// A directory whose name is not valid UTF-8 cannot be handed back as a
    /// host string and fails instead of being rewritten.
    pub fn current_directory(&self) -> SystemResult<Value> {
        let path = get_working_directory(self.policy)?;
        let path = path.into_os_string().into_string().map_err(|raw| {
            warn!("Working directory {:?} is not valid UTF-8", raw);
            SystemError::os_query_reason(
                DIRECTORY_QUERY_FAILED,
                "working directory is not valid UTF-8",
            )
        })?;
        Value::string(&path)
    }

    /// `system:execute`
    pub fn execute(&self, program: &Value, arguments: &Value) -> SystemResult<Value> {
        let program = expect_string(operations::EXECUTE, program)?;
        let arguments = expect_list(operations::EXECUTE, arguments)?;

        let argv = ArgumentVector::from_host(
            self.decoder.as_ref(),
            operations::EXECUTE,
            program,
            arguments,
        )?;
        let pid = spawn_process(argv)?;
        Ok(Value::number(pid))
    }

    /// `system:wait`
    pub fn wait(&self, pid: &Value) -> SystemResult<Value> {
        let pid = expect_number(operations::WAIT, pid)?;
        let status = wait_for_process(pid as i64)?;
        Ok(Value::number(status.code()))
    }
}

impl Default for ProcessControl {
    fn default() -> Self {
        Self::new(&FacadeConfig::default())
    }
}

fn mismatch(operation: &str, expected: &str, actual: &Value) -> SystemError {
    SystemError::type_error(
        operation,
        format!("expected {}, got {}", expected, actual.type_name()),
    )
}

fn expect_number(operation: &str, value: &Value) -> SystemResult<f64> {
    value
        .as_number()
        .ok_or_else(|| mismatch(operation, "Number", value))
}

fn expect_string<'a>(operation: &str, value: &'a Value) -> SystemResult<&'a HostText> {
    value
        .as_text()
        .ok_or_else(|| mismatch(operation, "String", value))
}

fn expect_list<'a>(operation: &str, value: &'a Value) -> SystemResult<&'a [Value]> {
    value
        .as_list()
        .ok_or_else(|| mismatch(operation, "List", value))
}
