#![deny(missing_docs)]
//! Shared logging utilities for the extractor workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a per-thread run id that tags every line emitted while a chain is running,
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Thread-local storage for the id of the run currently executing.
    static RUN_ID: Cell<u64> = const { Cell::new(0) };
}

/// Retrieves the run id for the current thread.
/// Returns 0 outside of any run.
pub fn current_run() -> u64 {
    RUN_ID.with(|v| v.get())
}

/// Marks the current thread as executing run `id` until the guard is dropped.
///
/// Scopes nest: dropping a guard restores whatever id was active when it was
/// entered.
#[must_use = "the run id is cleared as soon as the guard is dropped"]
pub struct RunScope {
    previous: u64,
}

impl RunScope {
    /// Enters run `id` on the current thread.
    pub fn enter(id: u64) -> Self {
        let previous = RUN_ID.with(|v| v.replace(id));
        Self { previous }
    }
}

impl Drop for RunScope {
    fn drop(&mut self) {
        RUN_ID.with(|v| v.set(self.previous));
    }
}

/// Logs a trace-level message tagged with the current run id.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current run id.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current run id.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current run id.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current run id.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
