//! Driver for digital GPIO lines exposed through the Linux sysfs interface
//!
//! Each line is exported once, configured for a direction (and an edge
//! trigger for inputs), and then driven through its `value` file which stays
//! open for the lifetime of the [`GpioLine`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use gpio_sysfs::{Builder, Direction, Edge, GpioLine, SysfsInterface, wait_for_edge};
//!
//! let sysfs = SysfsInterface::new();
//! let config = Builder::new()
//!     .line(88)
//!     .direction(Direction::In)
//!     .edge(Edge::Rising)
//!     .build()?;
//! let mut button = GpioLine::open(&sysfs, config)?;
//! let level = wait_for_edge(&mut button)?;
//! ```

pub mod config;
pub mod error;
pub mod interface;
pub mod line;
pub mod poll;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use config::{Attribute, Builder, Direction, Edge, LineConfig, LineNumber};
pub use error::{BuilderError, Error, MAX_LINE_NUMBER};
pub use interface::{attribute_path, SysfsInterface, DEFAULT_SYSFS_ROOT};
pub use line::GpioLine;
pub use poll::{wait_any, wait_for_edge, Readiness};
