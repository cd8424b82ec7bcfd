//! Blocking wait for a child's state change.
//!
//! The raw status word is decoded directly instead of through a typed signal
//! enum so that real-time and other unnamed signals still classify.

use hostsys_common::{SystemError, SystemResult};
use std::fmt;
use tracing::{debug, warn};

/// Why a waited-for process changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationStatus {
    /// Exited normally with this code.
    Exited(i32),
    /// Terminated by this signal.
    Signaled(i32),
    /// Stopped by this signal.
    Stopped(i32),
}

impl TerminationStatus {
    /// Classifies a raw status word from `waitpid(2)`.
    ///
    /// Checks run in priority order exited, signaled, stopped. Returns `None`
    /// for anything else (e.g. a continued notification).
    #[cfg(unix)]
    pub fn from_raw(status: i32) -> Option<Self> {
        use nix::libc;

        if libc::WIFEXITED(status) {
            Some(Self::Exited(libc::WEXITSTATUS(status)))
        } else if libc::WIFSIGNALED(status) {
            Some(Self::Signaled(libc::WTERMSIG(status)))
        } else if libc::WIFSTOPPED(status) {
            Some(Self::Stopped(libc::WSTOPSIG(status)))
        } else {
            None
        }
    }

    /// The single number reported to the caller: exit code or signal number.
    pub fn code(&self) -> i32 {
        match self {
            Self::Exited(code) => *code,
            Self::Signaled(signal) | Self::Stopped(signal) => *signal,
        }
    }
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {}", code),
            Self::Signaled(signal) => write!(f, "terminated by signal {}", signal),
            Self::Stopped(signal) => write!(f, "stopped by signal {}", signal),
        }
    }
}

/// Checks that `pid` can name a process, without touching the OS.
pub fn validate_pid(pid: i64) -> SystemResult<i32> {
    if pid <= 0 {
        return Err(SystemError::invalid_argument(
            "wait_for_process",
            format!("process identifier must be positive, got {}", pid),
        ));
    }

    i32::try_from(pid).map_err(|_| {
        SystemError::invalid_argument(
            "wait_for_process",
            format!("process identifier {} is out of range", pid),
        )
    })
}

/// Blocks until process `pid` exits, is killed or is stopped.
///
/// There is no timeout and no cancellation. A caller that needs bounded
/// waiting must signal the process from elsewhere and then wait.
#[cfg(unix)]
pub fn wait_for_process(pid: i64) -> SystemResult<TerminationStatus> {
    use nix::errno::Errno;
    use nix::libc;

    let raw_pid = validate_pid(pid)?;
    debug!("Waiting for process {}", raw_pid);

    let mut status: libc::c_int = 0;
    // SAFETY: `status` is a valid, writable c_int for the duration of the call.
    let waited = unsafe { libc::waitpid(raw_pid, &mut status, libc::WUNTRACED) };
    if let Err(errno) = Errno::result(waited) {
        warn!("waitpid({}) failed: {}", raw_pid, errno);
        return Err(SystemError::os_operation(
            format!("failed to wait for process {}", raw_pid),
            &std::io::Error::from(errno),
        ));
    }

    match TerminationStatus::from_raw(status) {
        Some(outcome) => {
            debug!("Process {} {}", raw_pid, outcome);
            Ok(outcome)
        }
        None => {
            warn!("Process {} reported unrecognized status {:#x}", raw_pid, status);
            Err(SystemError::os_operation_reason(
                format!("failed to wait for process {}", raw_pid),
                format!("illegal process status {:#x}", status),
            ))
        }
    }
}

/// Waiting for processes has no implementation on this platform.
#[cfg(not(unix))]
pub fn wait_for_process(pid: i64) -> SystemResult<TerminationStatus> {
    validate_pid(pid)?;
    warn!("Refusing to wait for process {}: unsupported platform", pid);
    Err(SystemError::unsupported("wait_for_process"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsys_common::ErrorKind;

    #[test]
    fn test_non_positive_pid_rejected() {
        for pid in [0, -1, -5, i64::MIN] {
            let err = wait_for_process(pid).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.to_string().contains(&pid.to_string()));
        }
    }

    #[test]
    fn test_out_of_range_pid_rejected() {
        let err = validate_pid(i64::from(i32::MAX) + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(validate_pid(42).unwrap(), 42);
    }

    #[test]
    fn test_codes() {
        assert_eq!(TerminationStatus::Exited(7).code(), 7);
        assert_eq!(TerminationStatus::Signaled(9).code(), 9);
        assert_eq!(TerminationStatus::Stopped(19).code(), 19);
        assert_eq!(TerminationStatus::Signaled(9).to_string(), "terminated by signal 9");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_raw_status_classification() {
        assert_eq!(TerminationStatus::from_raw(0), Some(TerminationStatus::Exited(0)));
        assert_eq!(TerminationStatus::from_raw(7 << 8), Some(TerminationStatus::Exited(7)));
        assert_eq!(TerminationStatus::from_raw(9), Some(TerminationStatus::Signaled(9)));
        // core dumped flag does not change the classification
        assert_eq!(TerminationStatus::from_raw(0x80 | 11), Some(TerminationStatus::Signaled(11)));
        // real-time signal
        assert_eq!(TerminationStatus::from_raw(40), Some(TerminationStatus::Signaled(40)));
        assert_eq!(
            TerminationStatus::from_raw((19 << 8) | 0x7f),
            Some(TerminationStatus::Stopped(19))
        );
        // continued
        assert_eq!(TerminationStatus::from_raw(0xffff), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_for_non_child_fails() {
        // pid 1 exists but is never our child
        let err = wait_for_process(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OsOperation);
        assert!(err.to_string().starts_with("failed to wait for process 1"));
    }
}
