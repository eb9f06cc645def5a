use crate::core::event::event::Events;
use std::fmt;
use std::hash::Hash;
use std::os::unix::io::{AsRawFd, RawFd};

/// A messaging socket as the poller sees it.
///
/// The poller never owns the socket. It only needs an identity it can hash
/// and compare, the descriptor that signals activity on the socket, and any
/// readiness the socket has already buffered internally (messages queued in
/// user space do not show up on the descriptor).
pub trait Socket: Eq + Hash + Clone + fmt::Debug {
    fn poll_fd(&self) -> RawFd;

    fn pending(&self) -> Events {
        Events::NONE
    }
}

/// Borrowed handle to a socket identified by its descriptor.
///
/// Two `SocketHandle`s are the same socket when they wrap the same
/// descriptor. Registering a handle is distinct from registering the bare
/// descriptor: the two live in separate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketHandle {
    fd: RawFd,
}

impl SocketHandle {
    pub fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    pub fn of<T: AsRawFd>(source: &T) -> Self {
        Self::new(source.as_raw_fd())
    }
}

impl Socket for SocketHandle {
    fn poll_fd(&self) -> RawFd {
        self.fd
    }
}

impl AsRawFd for SocketHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl fmt::Display for SocketHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "socket({})", self.fd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::os::unix::net::UnixStream;

    #[test]
    fn test_identity_follows_descriptor() {
        let (a, b) = UnixStream::pair().unwrap();
        let ha = SocketHandle::of(&a);
        let hb = SocketHandle::of(&b);

        assert_eq!(ha, SocketHandle::new(a.as_raw_fd()));
        assert_ne!(ha, hb);

        let set: HashSet<_> = [ha, ha, hb].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_no_pending_by_default() {
        let handle = SocketHandle::new(3);
        assert_eq!(handle.poll_fd(), 3);
        assert!(handle.pending().is_empty());
        assert_eq!(handle.to_string(), "socket(3)");
    }
}
