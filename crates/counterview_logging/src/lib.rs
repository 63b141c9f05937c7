#![deny(missing_docs)]
//! Shared logging utilities for the counterview workspace.
//!
//! This crate provides the `client_*` logging macros used across the codebase.
//! Every record is prefixed with the tag of the submission currently being
//! handled on this thread, so a request and its outcome can be matched in the
//! log even when several sessions write to the same file.

use std::cell::Cell;

thread_local! {
    /// Submission handled by the current thread, if any.
    static SUBMISSION: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Marks `submission_id` as the submission handled by the current thread.
pub fn set_submission(submission_id: u64) {
    SUBMISSION.with(|v| v.set(Some(submission_id)));
}

/// Clears the submission tag for the current thread.
pub fn clear_submission() {
    SUBMISSION.with(|v| v.set(None));
}

/// Returns the submission tagged on the current thread, if any.
pub fn current_submission() -> Option<u64> {
    SUBMISSION.with(|v| v.get())
}

/// Formats the prefix used by the logging macros.
///
/// Returns `"[sub N] "` while a submission is tagged, an empty string otherwise.
#[doc(hidden)]
pub fn submission_prefix() -> String {
    match current_submission() {
        Some(id) => format!("[sub {id}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message tagged with the current submission.
#[macro_export]
macro_rules! client_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current submission.
#[macro_export]
macro_rules! client_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current submission.
#[macro_export]
macro_rules! client_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current submission.
#[macro_export]
macro_rules! client_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current submission.
#[macro_export]
macro_rules! client_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
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
