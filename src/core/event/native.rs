use crate::common::time::Timeout;
use crate::core::event::event::Events;
use crate::core::event::item::{Endpoint, PollItem};
use crate::core::net::socket::Socket;
use libc::{c_short, nfds_t, pollfd, POLLERR, POLLHUP, POLLIN, POLLNVAL, POLLOUT};
use std::fmt;
use std::io;

#[cfg(feature = "priority")]
use libc::POLLPRI;

/// The batched wait primitive the poller drives.
///
/// An implementation waits over every item at once, writes the observed
/// readiness into each item's `revents` and returns how many items are
/// ready. Interruption by a signal must come back as
/// `io::ErrorKind::Interrupted`.
pub trait NativeWait<S> {
    fn wait(&mut self, items: &mut [PollItem<S>], timeout: Timeout) -> io::Result<usize>;
}

/// `poll(2)` over the whole entry store.
///
/// Socket entries are polled through their signalling descriptor. Readiness a
/// socket already holds in user space is merged in and turns the call into a
/// non-blocking poll, because the descriptor will not fire for it.
#[derive(Default)]
pub struct SysPoll {
    fds: Vec<pollfd>,
}

impl SysPoll {
    pub fn new() -> Self {
        Self { fds: Vec::new() }
    }
}

impl fmt::Debug for SysPoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysPoll")
            .field("capacity", &self.fds.capacity())
            .finish()
    }
}

impl<S: Socket> NativeWait<S> for SysPoll {
    fn wait(&mut self, items: &mut [PollItem<S>], timeout: Timeout) -> io::Result<usize> {
        self.fds.clear();
        self.fds.reserve(items.len());

        let mut buffered = false;
        for item in items.iter_mut() {
            let fd = match &item.endpoint {
                Endpoint::Socket(s) => {
                    item.revents = s.pending() & item.events;
                    buffered |= !item.revents.is_empty();
                    s.poll_fd()
                }
                Endpoint::Fd(fd) => {
                    item.revents = Events::NONE;
                    *fd
                }
            };
            self.fds.push(pollfd {
                fd,
                events: to_poll_bits(item.events),
                revents: 0,
            });
        }

        let timeout_ms = if buffered { 0 } else { timeout.as_poll_millis() };
        let rc = unsafe { libc::poll(self.fds.as_mut_ptr(), self.fds.len() as nfds_t, timeout_ms) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut ready = 0;
        for (item, pfd) in items.iter_mut().zip(self.fds.iter()) {
            item.revents |= from_poll_bits(pfd.revents) & (item.events | Events::ERROR);
            if !item.revents.is_empty() {
                ready += 1;
            }
        }
        Ok(ready)
    }
}

fn to_poll_bits(events: Events) -> c_short {
    let mut bits: c_short = 0;
    if events.is_readable() {
        bits |= POLLIN;
    }
    if events.is_writable() {
        bits |= POLLOUT;
    }
    #[cfg(feature = "priority")]
    if events.is_priority() {
        bits |= POLLPRI;
    }
    bits
}

fn from_poll_bits(bits: c_short) -> Events {
    let mut events = Events::NONE;
    if bits & POLLIN != 0 {
        events |= Events::READABLE;
    }
    if bits & POLLOUT != 0 {
        events |= Events::WRITABLE;
    }
    #[cfg(feature = "priority")]
    if bits & POLLPRI != 0 {
        events |= Events::PRIORITY;
    }
    if bits & (POLLERR | POLLHUP | POLLNVAL) != 0 {
        events |= Events::ERROR;
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::socket::SocketHandle;
    use std::io::Write;
    use std::os::unix::io::AsRawFd;
    use std::os::unix::net::UnixStream;

    #[test]
    fn test_bit_translation() {
        assert_eq!(to_poll_bits(Events::READABLE), POLLIN);
        assert_eq!(to_poll_bits(Events::READABLE | Events::WRITABLE), POLLIN | POLLOUT);
        assert_eq!(to_poll_bits(Events::ERROR), 0);
        assert_eq!(from_poll_bits(POLLHUP), Events::ERROR);
        assert_eq!(
            from_poll_bits(POLLIN | POLLOUT),
            Events::READABLE | Events::WRITABLE
        );
    }

    #[test]
    fn test_immediate_poll_nothing_ready() {
        let (a, _b) = UnixStream::pair().unwrap();
        let mut items: Vec<PollItem<SocketHandle>> =
            vec![PollItem::fd(a.as_raw_fd(), Events::READABLE)];

        let n = SysPoll::new().wait(&mut items, Timeout::Immediate).unwrap();
        assert_eq!(n, 0);
        assert!(items[0].revents.is_empty());
    }

    #[test]
    fn test_reports_only_requested_conditions() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.write_all(b"x").unwrap();

        // Readable and writable both hold for `a`, only writable was asked for.
        let mut items = vec![PollItem::socket(SocketHandle::of(&a), Events::WRITABLE)];
        let n = SysPoll::new().wait(&mut items, Timeout::Immediate).unwrap();
        assert_eq!(n, 1);
        assert_eq!(items[0].revents, Events::WRITABLE);
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Buffered(i32);

    impl Socket for Buffered {
        fn poll_fd(&self) -> i32 {
            self.0
        }

        fn pending(&self) -> Events {
            Events::READABLE
        }
    }

    #[test]
    fn test_buffered_socket_readiness_skips_blocking() {
        let (a, _b) = UnixStream::pair().unwrap();
        let mut items = vec![PollItem::socket(Buffered(a.as_raw_fd()), Events::READABLE)];

        // Would block forever if the buffered readiness were ignored.
        let n = SysPoll::new().wait(&mut items, Timeout::Forever).unwrap();
        assert_eq!(n, 1);
        assert_eq!(items[0].revents, Events::READABLE);
    }

    #[test]
    fn test_closed_descriptor_reports_error() {
        let (a, b) = UnixStream::pair().unwrap();
        let fd = a.as_raw_fd();
        drop(b);
        let mut items: Vec<PollItem<SocketHandle>> = vec![PollItem::fd(fd, Events::WRITABLE)];

        let n = SysPoll::new().wait(&mut items, Timeout::Immediate).unwrap();
        assert_eq!(n, 1);
        assert!(items[0].revents.is_error() || items[0].revents.is_writable());
    }
}
