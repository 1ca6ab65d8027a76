//! Exported GPIO line with a held-open value file

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::os::fd::{AsFd, BorrowedFd};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::config::{Attribute, Direction, LineConfig};
use crate::error::Error;
use crate::interface::{level_payload, read_level, SysfsInterface};

/// A configured line
///
/// The `value` file is opened once in [`GpioLine::open`] and reused for
/// every read, write and wait until the line is dropped. Dropping does not
/// unexport the line.
#[derive(Debug)]
pub struct GpioLine {
    config: LineConfig,
    value: File,
}

impl GpioLine {
    /// Export and configure a line, then open its value file
    ///
    /// Steps run in order: export, direction, edge (inputs only), open.
    /// A failure midway leaves the earlier steps applied.
    pub fn open(interface: &SysfsInterface, config: LineConfig) -> Result<Self, Error> {
        let number = config.number;
        interface.export(number)?;
        interface.set_direction(number, config.direction)?;
        if config.direction == Direction::In {
            interface.set_edge(number, config.edge)?;
        }
        let value = interface.open_value(number, config.direction == Direction::Out)?;
        log::debug!(
            "gpio{} ready: direction={} edge={}",
            number,
            config.direction,
            config.edge
        );
        Ok(Self { config, value })
    }

    /// Read the current level from the start of the value file
    pub fn read(&mut self) -> Result<bool, Error> {
        self.value
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io(self.config.number, Attribute::Value, e))?;
        read_level(&mut self.value, self.config.number)
    }

    /// Drive the level of an output line
    pub fn write(&mut self, level: bool) -> Result<(), Error> {
        self.require(Direction::Out)?;
        let number = self.config.number;
        self.value
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.value.write_all(level_payload(level)))
            .map_err(|e| Error::io(number, Attribute::Value, e))
    }

    /// Drop an interrupt that is already pending on an input line
    ///
    /// The kernel flags a fresh value file as having an event; it is only
    /// cleared by reading the file again.
    pub fn discard_pending(&mut self) -> Result<bool, Error> {
        self.require(Direction::In)?;
        if crate::poll::pending(self)? {
            log::trace!("gpio{}: discarding pending edge", self.config.number);
        }
        self.read()
    }

    pub(crate) fn require(&self, required: Direction) -> Result<(), Error> {
        if self.config.direction != required {
            return Err(Error::WrongDirection {
                line: self.config.number,
                actual: self.config.direction,
                required,
            });
        }
        Ok(())
    }
}

impl AsFd for GpioLine {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.value.as_fd()
    }
}

impl ErrorType for GpioLine {
    type Error = Error;
}

impl InputPin for GpioLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read().map(|level| !level)
    }
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Edge;
    use crate::test_util::FakeSysfs;

    #[test]
    fn open_output_configures_and_writes() {
        let sysfs = FakeSysfs::new(&[89]);
        let mut led = GpioLine::open(&sysfs.interface(), LineConfig::output(89).unwrap()).unwrap();

        assert_eq!(sysfs.read("export"), "89");
        assert_eq!(sysfs.read("gpio89/direction"), "out");
        assert_eq!(sysfs.read("gpio89/edge"), "none");

        led.set_high().unwrap();
        assert!(sysfs.read("gpio89/value").starts_with('1'));
        led.set_low().unwrap();
        assert!(sysfs.read("gpio89/value").starts_with('0'));
    }

    #[test]
    fn open_input_sets_edge_and_reads() {
        let sysfs = FakeSysfs::new(&[88]);
        let mut button =
            GpioLine::open(&sysfs.interface(), LineConfig::input(88, Edge::Rising).unwrap())
                .unwrap();

        assert_eq!(sysfs.read("gpio88/edge"), "rising");
        assert!(button.is_low().unwrap());

        sysfs.set_value(88, "1\n");
        assert!(button.is_high().unwrap());
    }

    #[test]
    fn input_refuses_writes() {
        let sysfs = FakeSysfs::new(&[88]);
        let mut button =
            GpioLine::open(&sysfs.interface(), LineConfig::input(88, Edge::Rising).unwrap())
                .unwrap();

        let err = button.set_high().unwrap_err();
        assert!(matches!(
            err,
            Error::WrongDirection {
                required: Direction::Out,
                ..
            }
        ));
    }

    #[test]
    fn failed_direction_is_not_rolled_back() {
        let sysfs = FakeSysfs::new(&[]);
        let err = GpioLine::open(&sysfs.interface(), LineConfig::output(90).unwrap()).unwrap_err();

        // export went through before direction failed
        assert_eq!(sysfs.read("export"), "90");
        assert!(matches!(
            err,
            Error::Io {
                attribute: Attribute::Direction,
                ..
            }
        ));
    }
}
