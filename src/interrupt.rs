//! SIGINT handling.
//!
//! Ctrl-C must not kill the process mid-write. A libc handler records
//! the signal in a process-wide flag; the pipeline polls the flag
//! between steps and unwinds through the normal error path, so temp
//! files are cleaned up and the run log is flushed before exit 130.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{PackmuleError, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_sigint(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the SIGINT handler. Call once, early in main.
#[cfg(unix)]
pub fn install_handler() {
    let handler = on_sigint as extern "C" fn(libc::c_int);
    // SAFETY: the handler only stores to a static AtomicBool, which is
    // async-signal-safe.
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
pub fn install_handler() {}

/// Has SIGINT been received?
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Error out if SIGINT has been received.
pub fn check() -> Result<()> {
    if interrupted() {
        Err(PackmuleError::Interrupted)
    } else {
        Ok(())
    }
}

/// Set the flag without a signal. Test hook.
pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Reset the flag. Test hook.
pub fn clear() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test for the whole flag lifecycle: the flag is process-wide,
    // and parallel tests poking it independently would race.
    #[test]
    fn flag_lifecycle() {
        clear();
        assert!(!interrupted());
        assert!(check().is_ok());

        mark_interrupted();
        assert!(interrupted());
        let err = check().unwrap_err();
        assert!(matches!(err, PackmuleError::Interrupted));
        assert_eq!(err.exit_code(), 130);

        clear();
        assert!(check().is_ok());
    }
}
