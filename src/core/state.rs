//! Process-wide run state.
//!
//! `SHUTDOWN` is set by Ctrl+C. Batch commands check it before starting each
//! sprite, so a file is either fully repaired or not touched at all.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup global Ctrl+C handler
///
/// First Ctrl+C: sprites already in flight finish, the rest are skipped.
/// Second Ctrl+C: exit immediately.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("error"; "interrupted, finishing sprites in progress...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering - worst case one more sprite starts before stopping
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
