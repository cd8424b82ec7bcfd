//! Working directory access.
//!
//! Reading the current directory goes through a "query with capacity"
//! primitive: the OS fills a caller-owned buffer or reports that the buffer is
//! too small. [`query_with_growth`] drives that primitive, doubling the buffer
//! until the answer fits or the capacity bound is reached.

use hostsys_common::{SystemError, SystemResult};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Initial buffer capacity for the working directory query, in buffer units.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Largest buffer the working directory query will grow to.
pub const DEFAULT_MAX_CAPACITY: usize = 1024 * 1024;

/// Growth limits for [`query_with_growth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
    pub initial: usize,
    pub max: usize,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL_CAPACITY,
            max: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Outcome of one query attempt.
#[derive(Debug)]
pub enum Probe {
    /// The answer fit; it occupies the first `n` units of the buffer.
    Complete(usize),
    /// The buffer was too small; retry with a larger one.
    TooSmall,
    /// The OS call failed for any other reason.
    Failed(io::Error),
}

/// An OS primitive that writes its answer into a caller-supplied buffer.
pub trait CapacityQuery {
    type Unit: Copy + Default;

    fn query(&mut self, buffer: &mut [Self::Unit]) -> Probe;

    /// Converts the filled prefix of the buffer into a path.
    fn finish(&self, filled: &[Self::Unit]) -> PathBuf;
}

/// Message of every failed working directory read.
pub const DIRECTORY_QUERY_FAILED: &str = "failed to read the current working directory";

/// Runs `query` with a buffer that doubles on every [`Probe::TooSmall`].
///
/// The buffer is released on every exit path. Growth past `policy.max` is
/// reported as an OS query failure.
pub fn query_with_growth<Q: CapacityQuery>(
    query: &mut Q,
    policy: CapacityPolicy,
) -> SystemResult<PathBuf> {
    let mut capacity = policy.initial.max(1);
    let mut buffer: Vec<Q::Unit> = Vec::new();

    loop {
        buffer
            .try_reserve_exact(capacity - buffer.len())
            .map_err(|_| SystemError::allocation("growing the working directory buffer"))?;
        buffer.resize(capacity, Q::Unit::default());

        match query.query(&mut buffer) {
            Probe::Complete(len) => return Ok(query.finish(&buffer[..len])),
            Probe::TooSmall => match capacity.checked_mul(2).filter(|next| *next <= policy.max) {
                Some(next) => {
                    debug!("Working directory does not fit in {} units, retrying with {}", capacity, next);
                    capacity = next;
                }
                None => {
                    warn!("Working directory query exceeded the {} unit bound", policy.max);
                    return Err(SystemError::os_query_reason(
                        DIRECTORY_QUERY_FAILED,
                        format!("path does not fit in {} units", policy.max),
                    ));
                }
            },
            Probe::Failed(err) => {
                warn!("Working directory query failed: {}", err);
                return Err(SystemError::os_query(DIRECTORY_QUERY_FAILED, &err));
            }
        }
    }
}

/// `getcwd(3)` as a capacity query.
#[cfg(unix)]
#[derive(Debug, Default)]
pub struct GetCwd;

#[cfg(unix)]
impl CapacityQuery for GetCwd {
    type Unit = u8;

    fn query(&mut self, buffer: &mut [u8]) -> Probe {
        use nix::errno::Errno;
        use nix::libc;

        // SAFETY: the pointer and length describe a live, writable buffer.
        let filled = unsafe { libc::getcwd(buffer.as_mut_ptr().cast(), buffer.len()) };
        if !filled.is_null() {
            let len = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
            return Probe::Complete(len);
        }

        match Errno::last() {
            Errno::ERANGE => Probe::TooSmall,
            errno => Probe::Failed(io::Error::from(errno)),
        }
    }

    fn finish(&self, filled: &[u8]) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        PathBuf::from(OsStr::from_bytes(filled))
    }
}

/// `GetCurrentDirectoryW` as a capacity query.
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct CurrentDirectoryW;

#[cfg(windows)]
impl CapacityQuery for CurrentDirectoryW {
    type Unit = u16;

    fn query(&mut self, buffer: &mut [u16]) -> Probe {
        use windows::Win32::System::Environment::GetCurrentDirectoryW;

        // Returns the length written (without NUL) or, if the buffer is too
        // small, the size required including the NUL.
        let written = unsafe { GetCurrentDirectoryW(Some(buffer)) } as usize;
        if written == 0 {
            Probe::Failed(io::Error::last_os_error())
        } else if written >= buffer.len() {
            Probe::TooSmall
        } else {
            Probe::Complete(written)
        }
    }

    fn finish(&self, filled: &[u16]) -> PathBuf {
        use std::ffi::OsString;
        use std::os::windows::ffi::OsStringExt;

        PathBuf::from(OsString::from_wide(filled))
    }
}

/// Returns the current working directory of the process.
pub fn get_working_directory(policy: CapacityPolicy) -> SystemResult<PathBuf> {
    #[cfg(unix)]
    {
        query_with_growth(&mut GetCwd, policy)
    }

    #[cfg(windows)]
    {
        query_with_growth(&mut CurrentDirectoryW, policy)
    }
}

/// Changes the current working directory of the process.
///
/// Relative paths are resolved against the current directory by the OS.
pub fn set_working_directory(path: &Path) -> SystemResult<()> {
    debug!("Changing working directory to '{}'", path.display());

    #[cfg(unix)]
    let result = nix::unistd::chdir(path).map_err(io::Error::from);

    #[cfg(windows)]
    let result = std::env::set_current_dir(path);

    result.map_err(|e| {
        warn!("Failed to change working directory to '{}': {}", path.display(), e);
        SystemError::os_query(
            format!("failed to change the working directory to '{}'", path.display()),
            &e,
        )
    })
}
