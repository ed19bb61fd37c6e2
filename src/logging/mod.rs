//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use leafex::logging::init_logging;
//! use leafex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log one leaf being exported
///
/// # Example
///
/// ```no_run
/// use leafex::log_leaf_export;
/// use std::path::Path;
///
/// log_leaf_export!(0, "Arm", Path::new("art/Body/Arm.jpg"));
/// ```
#[macro_export]
macro_rules! log_leaf_export {
    ($index:expr, $name:expr, $path:expr) => {
        tracing::info!(
            index = $index,
            layer = %$name,
            path = %$path.display(),
            "Extract"
        );
    };
}

/// Log the end of a run
///
/// # Example
///
/// ```no_run
/// use leafex::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(3, 4, Duration::from_secs(2));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($successful:expr, $total:expr, $duration:expr) => {
        tracing::info!(
            successful = $successful,
            total = $total,
            duration_ms = $duration.as_millis() as u64,
            "Run finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use leafex::log_error_with_context;
/// use leafex::domain::LeafexError;
///
/// let error = LeafexError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::LeafexError;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_macros_expand() {
        // No subscriber is installed; this only exercises the expansions.
        log_leaf_export!(1, "Arm", Path::new("/art/Body/Arm.jpg"));
        log_run_complete!(2usize, 3usize, Duration::from_millis(40));
        let error = LeafexError::Encode("exit status 1".to_string());
        log_error_with_context!(&error, "Encoding failed");
    }

    #[test]
    fn test_error_macro_in_match_arm() {
        let outcome: Result<(), LeafexError> =
            Err(LeafexError::FileSystem("read-only volume".to_string()));
        match outcome {
            Ok(()) => {}
            Err(e) => log_error_with_context!(&e, "Failed to write run report"),
        }
    }
}
