use crate::common::error::{PollError, Result};
use crate::common::logger::Logger;
use crate::common::time::Timeout;
use crate::core::event::event::Events;
use crate::core::event::item::{Endpoint, PollItem};
use crate::core::event::native::{NativeWait, SysPoll};
use crate::core::event::store::{DuplicatePolicy, EntryStore};
use crate::core::net::socket::{Socket, SocketHandle};
use std::io;
use std::os::unix::io::RawFd;

/// Readiness multiplexer over messaging sockets and raw descriptors.
///
/// Not internally synchronized: one thread drives an instance at a time.
/// The poller borrows identities only; it never closes a descriptor or
/// destroys a socket, including on drop.
///
/// Observed events read `Events::NONE` until a `wait` has run over the entry.
#[derive(Debug)]
pub struct Poller<S = SocketHandle, W = SysPoll> {
    store: EntryStore<S>,
    waiter: W,
}

impl<S: Socket> Poller<S, SysPoll> {
    pub fn new() -> Self {
        Self::with_waiter(SysPoll::new())
    }

    pub fn with_capacity(capacity: usize, policy: DuplicatePolicy) -> Self {
        Self::with_waiter_and_capacity(SysPoll::new(), capacity, policy)
    }
}

impl<S: Socket> Default for Poller<S, SysPoll> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Socket, W: NativeWait<S>> Poller<S, W> {
    pub fn with_waiter(waiter: W) -> Self {
        Self {
            store: EntryStore::new(),
            waiter,
        }
    }

    pub fn with_waiter_and_capacity(waiter: W, capacity: usize, policy: DuplicatePolicy) -> Self {
        Self {
            store: EntryStore::with_capacity(capacity, policy),
            waiter,
        }
    }

    /// Watches `endpoint` for readability.
    pub fn add(&mut self, endpoint: Endpoint<S>) -> Result<()> {
        self.add_with(endpoint, Events::READABLE)
    }

    pub fn add_with(&mut self, endpoint: Endpoint<S>, events: Events) -> Result<()> {
        self.add_item(PollItem::new(endpoint, events))
    }

    pub fn add_socket(&mut self, socket: S, events: Events) -> Result<()> {
        self.add_with(Endpoint::Socket(socket), events)
    }

    pub fn add_fd(&mut self, fd: RawFd, events: Events) -> Result<()> {
        self.add_with(Endpoint::Fd(fd), events)
    }

    /// Registers a prepared item. Its `revents` are kept as given until the
    /// next wait.
    pub fn add_item(&mut self, item: PollItem<S>) -> Result<()> {
        self.store.insert(item).map(|_| ())
    }

    pub fn has(&self, endpoint: &Endpoint<S>) -> bool {
        self.store.contains(endpoint)
    }

    /// Stops watching `endpoint`. Removing something never added is fine.
    pub fn remove(&mut self, endpoint: &Endpoint<S>) -> Result<()> {
        self.store.remove(endpoint).map(|_| ())
    }

    /// Replaces the conditions watched for `endpoint`.
    pub fn check_for(&mut self, endpoint: &Endpoint<S>, events: Events) -> Result<()> {
        self.store.set_events(endpoint, events)
    }

    /// Conditions currently watched for `endpoint`.
    pub fn requested(&self, endpoint: &Endpoint<S>) -> Result<Events> {
        self.store.requested(endpoint)
    }

    /// Conditions observed for `endpoint` by the last wait.
    pub fn events(&self, endpoint: &Endpoint<S>) -> Result<Events> {
        self.store.revents(endpoint)
    }

    /// Blocks until something registered is ready or `timeout` runs out.
    ///
    /// Returns `false` on timeout and when a signal interrupted the wait, so a
    /// caller can simply loop.
    pub fn wait(&mut self, timeout: Timeout) -> Result<bool> {
        match self.waiter.wait(self.store.items_mut(), timeout) {
            Ok(ready) => Ok(ready > 0),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                Logger::debug("Poll interrupted by signal");
                Ok(false)
            }
            Err(e) => {
                Logger::error(&format!(
                    "Poll over {} entries failed: {}",
                    self.store.len(),
                    e
                ));
                Err(PollError::WaitError(e))
            }
        }
    }

    /// Endpoints with non-empty observed events, in store order.
    pub fn ready(&self) -> impl Iterator<Item = (&Endpoint<S>, Events)> + '_ {
        self.store
            .items()
            .iter()
            .filter(|item| item.is_ready())
            .map(|item| (&item.endpoint, item.revents))
    }

    pub fn items(&self) -> &[PollItem<S>] {
        self.store.items()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn waiter(&self) -> &W {
        &self.waiter
    }
}
