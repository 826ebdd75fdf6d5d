//! Error types for table computation.
//!
//! Only configuration problems are fatal to a run. Solver failures are
//! isolated to a single candidate branch, selection failures to a single
//! Reynolds target, and stall-detection failures to a single row; all of
//! those degrade the output table instead of aborting it.

use std::error::Error;
use std::fmt;
use std::io;

/// Fatal errors for a table computation run.
#[derive(Debug)]
pub enum TableError {
    /// Invalid sweep, Reynolds range, or candidate-radius parameters.
    /// Detected before any solver work begins.
    Config(String),
    /// Filesystem error while preparing or writing run artifacts.
    Io(io::Error),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            TableError::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TableError::Config(_) => None,
            TableError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        TableError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TableError::Config("step must not be zero".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: step must not be zero"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        let err = TableError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
    }
}
