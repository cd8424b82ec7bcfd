//! Argument vector construction.
//!
//! An [`ArgumentVector`] holds the program path at index 0 followed by the
//! decoded arguments. Elements are type-checked lazily while the vector is
//! built; a non-string element or a decode failure drops everything placed so
//! far, so a failed build never leaves allocations behind and never reaches
//! the OS.

use hostsys_common::{HostText, SystemError, SystemResult, TextDecoder, Value};
use std::process::Command;

/// Message carried by the type error raised for a non-string argument.
pub const EXPECTED_STRING_ARGUMENTS: &str = "expected a list of string arguments";

/// Program path plus arguments, ready to be handed to the OS exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
    elements: Vec<String>,
}

impl ArgumentVector {
    /// Builds a vector from native strings.
    pub fn new<I, S>(program: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut elements = vec![program.into()];
        elements.extend(arguments.into_iter().map(Into::into));
        Self { elements }
    }

    /// Builds a vector from host values.
    ///
    /// `operation` names the calling operation in type errors.
    pub fn from_host<D: TextDecoder + ?Sized>(
        decoder: &D,
        operation: &str,
        program: &HostText,
        arguments: &[Value],
    ) -> SystemResult<Self> {
        let program = decoder.decode(program)?;

        let mut elements = Vec::new();
        elements
            .try_reserve_exact(arguments.len() + 1)
            .map_err(|_| SystemError::allocation("building the argument vector"))?;
        elements.push(program);

        for (index, argument) in arguments.iter().enumerate() {
            match argument {
                Value::String(text) => elements.push(decoder.decode(text)?),
                other => {
                    return Err(SystemError::type_error(
                        operation,
                        format!(
                            "{} (element {} is a {})",
                            EXPECTED_STRING_ARGUMENTS,
                            index,
                            other.type_name()
                        ),
                    ));
                }
            }
        }

        Ok(Self { elements })
    }

    pub fn program(&self) -> &str {
        &self.elements[0]
    }

    /// Arguments after the program path.
    pub fn arguments(&self) -> &[String] {
        &self.elements[1..]
    }

    /// Number of elements, counting the program path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: the program path is element 0.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Builds a command inheriting the caller's environment and standard streams.
    pub(crate) fn to_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.arguments());
        command
    }
}
