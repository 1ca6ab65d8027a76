//! Blocking edge waits on value files
//!
//! The kernel reports an edge on a sysfs value file as `POLLPRI | POLLERR`.
//! The event stays flagged until the file is read again from offset 0, so
//! every wait here finishes by re-reading the lines that fired.

use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

use crate::config::Direction;
use crate::error::Error;
use crate::line::GpioLine;

/// Which lines of a [`wait_any`] call reported an edge, in argument order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Readiness {
    ready: Vec<bool>,
}

impl Readiness {
    pub fn from_flags(ready: Vec<bool>) -> Self {
        Self { ready }
    }

    pub fn is_ready(&self, index: usize) -> bool {
        self.ready.get(index).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.ready.iter().any(|&ready| ready)
    }

    /// Lowest index that fired
    pub fn first(&self) -> Option<usize> {
        self.ready.iter().position(|&ready| ready)
    }
}

fn fired(revents: Option<PollFlags>) -> bool {
    revents.is_some_and(|flags| flags.intersects(PollFlags::POLLPRI | PollFlags::POLLERR))
}

/// Errno for a descriptor that can no longer report edges
///
/// `POLLHUP` alongside an edge still counts as the edge.
fn broken(revents: Option<PollFlags>) -> Option<Errno> {
    let flags = revents?;
    if flags.contains(PollFlags::POLLNVAL) {
        Some(Errno::EBADF)
    } else if flags.contains(PollFlags::POLLHUP) && !fired(Some(flags)) {
        Some(Errno::EPIPE)
    } else {
        None
    }
}

fn poll_retrying(fds: &mut [PollFd<'_>], timeout: PollTimeout) -> Result<(), Error> {
    loop {
        match poll(fds, timeout) {
            Ok(_) => break,
            Err(Errno::EINTR) => continue,
            Err(source) => {
                return Err(Error::Poll {
                    lines: fds.len(),
                    source,
                });
            }
        }
    }
    match fds.iter().find_map(|fd| broken(fd.revents())) {
        Some(source) => Err(Error::Poll {
            lines: fds.len(),
            source,
        }),
        None => Ok(()),
    }
}

/// Check for an edge without blocking
pub(crate) fn pending(line: &GpioLine) -> Result<bool, Error> {
    let mut fds = [PollFd::new(line.as_fd(), PollFlags::POLLPRI)];
    poll_retrying(&mut fds, PollTimeout::ZERO)?;
    Ok(fired(fds[0].revents()))
}

/// Block until `line` reports one edge, then return its level
pub fn wait_for_edge(line: &mut GpioLine) -> Result<bool, Error> {
    line.require(Direction::In)?;
    loop {
        let edge = {
            let mut fds = [PollFd::new(line.as_fd(), PollFlags::POLLPRI)];
            poll_retrying(&mut fds, PollTimeout::NONE)?;
            fired(fds[0].revents())
        };
        if edge {
            return line.read();
        }
    }
}

/// Block until at least one of `lines` reports an edge
///
/// Every line that fired is acknowledged by a read before returning.
pub fn wait_any(lines: &mut [&mut GpioLine]) -> Result<Readiness, Error> {
    for line in lines.iter() {
        line.require(Direction::In)?;
    }
    loop {
        let ready: Vec<bool> = {
            let mut fds: Vec<PollFd<'_>> = lines
                .iter()
                .map(|line| PollFd::new(line.as_fd(), PollFlags::POLLPRI))
                .collect();
            poll_retrying(&mut fds, PollTimeout::NONE)?;
            fds.iter().map(|fd| fired(fd.revents())).collect()
        };
        if !ready.iter().any(|&r| r) {
            continue;
        }
        for (line, _) in lines.iter_mut().zip(&ready).filter(|(_, r)| **r) {
            line.read()?;
        }
        return Ok(Readiness::from_flags(ready));
    }
}
