use crate::core::event::event::Events;
use std::fmt;
use std::os::unix::io::RawFd;

/// What a poll entry watches: a messaging socket or a bare descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint<S> {
    Socket(S),
    Fd(RawFd),
}

impl<S> Endpoint<S> {
    pub fn as_fd(&self) -> Option<RawFd> {
        match self {
            Endpoint::Socket(_) => None,
            Endpoint::Fd(fd) => Some(*fd),
        }
    }
}

impl<S: fmt::Display> fmt::Display for Endpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Socket(s) => write!(f, "{}", s),
            Endpoint::Fd(fd) => write!(f, "fd {}", fd),
        }
    }
}

/// One slot of the entry store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollItem<S> {
    pub endpoint: Endpoint<S>,
    pub events: Events,
    pub revents: Events,
}

impl<S> PollItem<S> {
    pub fn new(endpoint: Endpoint<S>, events: Events) -> Self {
        Self {
            endpoint,
            events,
            revents: Events::NONE,
        }
    }

    pub fn socket(socket: S, events: Events) -> Self {
        Self::new(Endpoint::Socket(socket), events)
    }

    pub fn fd(fd: RawFd, events: Events) -> Self {
        Self::new(Endpoint::Fd(fd), events)
    }

    pub fn is_ready(&self) -> bool {
        !self.revents.is_empty()
    }
}
