//! Error types and handling infrastructure for rtouch.
//!
//! Gesture recognition itself never fails: malformed notifications are dropped and
//! degenerate interactions classify as no gesture. Errors only appear at the edges of
//! the crate, when traces are loaded and parsed or when configuration is read.
//!
//! The library uses `thiserror` for its error enum; the binary wraps everything in
//! `anyhow` for context.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rtouch operations.
#[derive(Error, Debug)]
pub enum TouchError {
    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A line of a recorded trace could not be understood
    #[error("Trace parse error at line {line}: {message}")]
    TraceParse { line: usize, message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for rtouch operations.
pub type Result<T> = std::result::Result<T, TouchError>;

impl TouchError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a TraceParse error for a 1-based line number
    pub fn trace_parse(line: usize, message: impl Into<String>) -> Self {
        Self::TraceParse {
            line,
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(feature = "config")]
impl From<toml::de::Error> for TouchError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/test/swipe.trace");

        let file_not_found = TouchError::FileNotFound { path };
        assert_eq!(
            file_not_found.to_string(),
            "File not found: /test/swipe.trace"
        );

        let parse = TouchError::trace_parse(7, "unknown notification kind 'hover'");
        assert_eq!(
            parse.to_string(),
            "Trace parse error at line 7: unknown notification kind 'hover'"
        );

        let config = TouchError::config("tap.time must be below tap.maxtime");
        assert_eq!(
            config.to_string(),
            "Configuration error: tap.time must be below tap.maxtime"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            TouchError::invalid_argument("--frame-ms must be positive"),
            TouchError::InvalidArgument { .. }
        ));
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        match TouchError::file_error("Failed to read swipe.trace", io_err) {
            TouchError::FileError { message, source } => {
                assert_eq!(message, "Failed to read swipe.trace");
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("Expected FileError variant, got {other:?}"),
        }
    }
}
