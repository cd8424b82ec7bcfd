//! Process spawning.
//!
//! Spawning uses the platform's structured process-creation API. If the new
//! program image cannot be started the standard library reports it here and
//! reaps the half-created child, so a failed spawn never leaves a process
//! behind. A successful spawn hands the child to the caller by identifier
//! only: nothing here waits for it or kills it.

use crate::argv::ArgumentVector;
use hostsys_common::{SystemError, SystemResult};
use tracing::{debug, warn};

/// Starts `argv.program()` with the given arguments and returns its process id.
///
/// The child inherits the caller's environment and standard streams. The
/// argument vector is consumed and released whether or not the spawn succeeds.
#[cfg(unix)]
pub fn spawn_process(argv: ArgumentVector) -> SystemResult<u32> {
    let mut command = argv.to_command();

    match command.spawn() {
        Ok(child) => {
            // Dropping the handle neither waits for nor signals the child.
            let pid = child.id();
            debug!("Spawned '{}' with {} argument(s) as pid {}", argv.program(), argv.arguments().len(), pid);
            Ok(pid)
        }
        Err(e) => {
            warn!("Failed to spawn '{}': {}", argv.program(), e);
            Err(SystemError::os_operation(
                format!("failed to execute '{}'", argv.program()),
                &e,
            ))
        }
    }
}

/// Process spawning has no implementation on this platform.
#[cfg(not(unix))]
pub fn spawn_process(argv: ArgumentVector) -> SystemResult<u32> {
    warn!("Refusing to spawn '{}': unsupported platform", argv.program());
    Err(SystemError::unsupported("spawn_process"))
}
