//! sysfs file interface
//!
//! [`SysfsInterface`] performs the individual attribute writes and reads
//! against a sysfs root. Every call opens, writes (or reads) and closes the
//! attribute file; nothing is cached between calls.
//!
//! ## Layout
//!
//! ```text
//! <root>/export              <- decimal line number
//! <root>/gpio<N>/direction   <- "in" | "out"
//! <root>/gpio<N>/edge        <- "none" | "rising" | "falling" | "both"
//! <root>/gpio<N>/value       <- "0" | "1"
//! ```

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{Attribute, Direction, Edge, LineNumber};
use crate::error::Error;

/// Root of the kernel GPIO class
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Build the path of an attribute file for a line
///
/// `Attribute::Export` ignores the line number and maps to `<root>/export`.
pub fn attribute_path(root: &Path, line: LineNumber, attribute: Attribute) -> PathBuf {
    match attribute {
        Attribute::Export => root.join(attribute.as_str()),
        _ => root
            .join(format!("gpio{}", line.get()))
            .join(attribute.as_str()),
    }
}

/// Handle on a sysfs GPIO root directory
#[derive(Clone, Debug)]
pub struct SysfsInterface {
    root: PathBuf,
}

impl Default for SysfsInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsInterface {
    /// Interface on `/sys/class/gpio`
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }

    /// Interface on an alternate root
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRoot` if the path is empty or contains a NUL byte.
    pub fn with_root(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        let raw = root.as_os_str().as_encoded_bytes();
        if raw.is_empty() || raw.contains(&0) {
            return Err(Error::InvalidRoot(root.display().to_string()));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, line: LineNumber, attribute: Attribute) -> PathBuf {
        attribute_path(&self.root, line, attribute)
    }

    /// Ask the kernel to expose `line`
    ///
    /// Exporting an already exported line is reported by the kernel as an
    /// I/O error and returned unchanged.
    pub fn export(&self, line: LineNumber) -> Result<(), Error> {
        self.write_attribute(line, Attribute::Export, line.to_string().as_bytes())
    }

    pub fn set_direction(&self, line: LineNumber, direction: Direction) -> Result<(), Error> {
        self.write_attribute(line, Attribute::Direction, direction.as_str().as_bytes())
    }

    pub fn set_edge(&self, line: LineNumber, edge: Edge) -> Result<(), Error> {
        self.write_attribute(line, Attribute::Edge, edge.as_str().as_bytes())
    }

    /// Read the current logic level
    pub fn read_value(&self, line: LineNumber) -> Result<bool, Error> {
        let mut file = self.open_value(line, false)?;
        read_level(&mut file, line)
    }

    /// Drive the logic level
    pub fn write_value(&self, line: LineNumber, level: bool) -> Result<(), Error> {
        self.write_attribute(line, Attribute::Value, level_payload(level))
    }

    /// Open the `value` file, read-only or read-write
    pub fn open_value(&self, line: LineNumber, writable: bool) -> Result<File, Error> {
        OpenOptions::new()
            .read(true)
            .write(writable)
            .open(self.path(line, Attribute::Value))
            .map_err(|e| Error::io(line, Attribute::Value, e))
    }

    fn write_attribute(
        &self,
        line: LineNumber,
        attribute: Attribute,
        payload: &[u8],
    ) -> Result<(), Error> {
        let path = self.path(line, attribute);
        log::trace!("write {:?} -> {}", String::from_utf8_lossy(payload), path.display());
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::io(line, attribute, e))?;
        file.write_all(payload)
            .map_err(|e| Error::io(line, attribute, e))
    }
}

pub(crate) fn level_payload(level: bool) -> &'static [u8] {
    if level { b"1" } else { b"0" }
}

/// Read one level byte from the current position of an open value file
pub(crate) fn read_level(file: &mut File, line: LineNumber) -> Result<bool, Error> {
    let mut byte = [0u8; 1];
    let read = file
        .read(&mut byte)
        .map_err(|e| Error::io(line, Attribute::Value, e))?;
    if read == 0 {
        return Err(Error::io(
            line,
            Attribute::Value,
            std::io::ErrorKind::UnexpectedEof.into(),
        ));
    }
    match byte[0] {
        b'0' => Ok(false),
        b'1' => Ok(true),
        found => Err(Error::InvalidValue { line, found }),
    }
}
