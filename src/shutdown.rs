//! Graceful shutdown handling for run interruption.
//!
//! Handles Ctrl+C (SIGINT) so a simulation stops at the next whole-turn
//! boundary instead of mid-turn. Engines also poll the flag so an
//! in-flight subprocess is killed promptly.
//!
//! # Example
//!
//! ```ignore
//! use scrumsim::shutdown;
//!
//! shutdown::register_handler().ok();
//! if shutdown::requested() {
//!     println!("Shutdown requested, finishing up...");
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Global flag indicating shutdown has been requested.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// How many times Ctrl+C was pressed (for force-quit on repeats).
static INTERRUPT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Maximum number of interrupts before force-quitting.
const MAX_INTERRUPTS: usize = 3;

/// Register the Ctrl+C handler. Call once at program startup.
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        let count = INTERRUPT_COUNT.fetch_add(1, Ordering::SeqCst) + 1;

        if count >= MAX_INTERRUPTS {
            eprintln!("\nForce quit (received {} interrupts)", count);
            std::process::exit(130);
        }

        if count == 1 {
            eprintln!("\nInterrupt received. Finishing the current turn...");
            eprintln!(
                "(Press Ctrl+C {} more time(s) to force quit)",
                MAX_INTERRUPTS - count
            );
            SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
        } else {
            eprintln!(
                "(Press Ctrl+C {} more time(s) to force quit)",
                MAX_INTERRUPTS - count
            );
        }
    })
    .map_err(|e| format!("failed to register Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested.
pub fn requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Programmatically request shutdown. Useful for tests.
pub fn request() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Reset the shutdown state. Primarily for tests.
pub fn reset() {
    SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);
    INTERRUPT_COUNT.store(0, Ordering::SeqCst);
}

/// Get the number of interrupts received.
pub fn interrupt_count() -> usize {
    INTERRUPT_COUNT.load(Ordering::SeqCst)
}

static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that manipulate the global shutdown flag.
#[doc(hidden)]
pub fn test_lock() -> MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
