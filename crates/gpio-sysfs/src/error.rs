//! Error types for the driver
//!
//! - [`BuilderError`] - Errors while building a [`LineConfig`](crate::config::LineConfig)
//! - [`Error`] - Runtime errors against the sysfs files
//!
//! ## Example
//!
//! ```
//! use gpio_sysfs::{Builder, BuilderError, LineNumber};
//!
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingLine)));
//!
//! let result = LineNumber::new(128); // three digits
//! assert!(result.is_err());
//! ```

use std::io;

use crate::config::{Attribute, LineNumber};

/// Highest line number accepted by the current hardware profile
///
/// Paths are built from at most two decimal digits.
pub const MAX_LINE_NUMBER: u16 = 99;

/// Errors that can occur while driving a line
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Opening, reading or writing a sysfs attribute failed
    #[error("{}: {source}", attribute_file(.line, .attribute))]
    Io {
        /// Line the attribute belongs to
        line: LineNumber,
        /// Attribute file that failed
        attribute: Attribute,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },
    /// The `value` file held something other than `0` or `1`
    #[error("gpio{line}/value: unexpected content {found:?}")]
    InvalidValue {
        /// Line that was read
        line: LineNumber,
        /// Raw byte found in the file
        found: u8,
    },
    /// Waiting on the value file descriptors failed
    #[error("poll on {lines} line(s) failed: {source}")]
    Poll {
        /// Number of lines in the wait set
        lines: usize,
        /// Errno reported by `poll(2)`
        #[source]
        source: nix::errno::Errno,
    },
    /// The sysfs root is empty or contains a NUL byte
    #[error("invalid sysfs root {0:?}")]
    InvalidRoot(String),
    /// An input-only operation was attempted on an output line (or vice versa)
    #[error("gpio{line} is configured as {actual}, operation needs {required}")]
    WrongDirection {
        /// Line that was used
        line: LineNumber,
        /// Direction the line was opened with
        actual: crate::config::Direction,
        /// Direction the operation needs
        required: crate::config::Direction,
    },
}

/// Attribute file relative to the sysfs root, as shown in diagnostics
fn attribute_file(line: &LineNumber, attribute: &Attribute) -> String {
    match attribute {
        Attribute::Export => attribute.to_string(),
        _ => format!("gpio{line}/{attribute}"),
    }
}

impl Error {
    pub(crate) fn io(line: LineNumber, attribute: Attribute, source: io::Error) -> Self {
        Error::Io {
            line,
            attribute,
            source,
        }
    }

    /// Line the error refers to, if any
    pub fn line(&self) -> Option<LineNumber> {
        match self {
            Error::Io { line, .. }
            | Error::InvalidValue { line, .. }
            | Error::WrongDirection { line, .. } => Some(*line),
            Error::Poll { .. } | Error::InvalidRoot(_) => None,
        }
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Errors that can occur when building a line configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// [`Builder::line()`](crate::config::Builder::line) was never called
    #[error("line number must be specified")]
    MissingLine,
    /// Line number does not fit the two-digit hardware profile
    #[error("invalid line number {0} (max {MAX_LINE_NUMBER})")]
    InvalidLineNumber(u16),
    /// Edge triggers only apply to inputs
    #[error("edge {0} requested on an output line")]
    EdgeOnOutput(crate::config::Edge),
}
