use crate::common::error::{PollError, Result};
use crate::common::logger::Logger;
use crate::core::event::event::Events;
use crate::core::event::item::{Endpoint, PollItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::os::unix::io::RawFd;

/// What `add` does when the endpoint is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Overwrite the requested events of the existing entry.
    #[default]
    Replace,
    /// Fail with `AlreadyRegistered`.
    Reject,
}

/// Contiguous poll entries plus the two identity indices into them.
///
/// Every live entry is reachable from exactly one index, and every index
/// value is a valid position whose entry carries that same identity. Removal
/// swaps the last entry into the freed slot, so positions are only stable
/// until the next `remove`.
#[derive(Debug)]
pub struct EntryStore<S> {
    items: Vec<PollItem<S>>,
    sockets: HashMap<S, usize>,
    fds: HashMap<RawFd, usize>,
    policy: DuplicatePolicy,
}

impl<S> EntryStore<S>
where
    S: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::with_capacity(0, DuplicatePolicy::default())
    }

    pub fn with_capacity(capacity: usize, policy: DuplicatePolicy) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            sockets: HashMap::with_capacity(capacity),
            fds: HashMap::with_capacity(capacity),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PollItem<S>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [PollItem<S>] {
        &mut self.items
    }

    /// Current position of `endpoint`, if registered.
    pub fn position(&self, endpoint: &Endpoint<S>) -> Option<usize> {
        match endpoint {
            Endpoint::Socket(s) => self.sockets.get(s).copied(),
            Endpoint::Fd(fd) => self.fds.get(fd).copied(),
        }
    }

    pub fn contains(&self, endpoint: &Endpoint<S>) -> bool {
        self.position(endpoint).is_some()
    }

    pub fn get(&self, endpoint: &Endpoint<S>) -> Option<&PollItem<S>> {
        self.position(endpoint).map(|p| &self.items[p])
    }

    pub fn insert(&mut self, item: PollItem<S>) -> Result<usize> {
        if let Some(p) = self.position(&item.endpoint) {
            return match self.policy {
                DuplicatePolicy::Reject => Err(PollError::AlreadyRegistered(format!(
                    "{} is already represented within this poller",
                    describe(&item.endpoint)
                ))),
                DuplicatePolicy::Replace => {
                    Logger::debug(&format!(
                        "Re-registering {} at position {} with {}",
                        describe(&item.endpoint),
                        p,
                        item.events
                    ));
                    let slot = &mut self.items[p];
                    slot.events = item.events;
                    slot.revents = Events::NONE;
                    Ok(p)
                }
            };
        }

        let p = self.items.len();
        match &item.endpoint {
            Endpoint::Socket(s) => {
                self.sockets.insert(s.clone(), p);
            }
            Endpoint::Fd(fd) => {
                self.fds.insert(*fd, p);
            }
        }
        self.items.push(item);
        Ok(p)
    }

    /// Removes `endpoint` and returns its entry. Unknown endpoints are a no-op.
    pub fn remove(&mut self, endpoint: &Endpoint<S>) -> Result<Option<PollItem<S>>> {
        let p = match endpoint {
            Endpoint::Socket(s) => self.sockets.remove(s),
            Endpoint::Fd(fd) => self.fds.remove(fd),
        };
        let Some(p) = p else {
            return Ok(None);
        };

        let removed = self.items.swap_remove(p);
        if p < self.items.len() {
            self.reindex(p)?;
        }
        Ok(Some(removed))
    }

    /// Points the index of the entry now at `p` back at `p`.
    fn reindex(&mut self, p: usize) -> Result<()> {
        let found = match &self.items[p].endpoint {
            Endpoint::Socket(s) => self.sockets.get_mut(s),
            Endpoint::Fd(fd) => self.fds.get_mut(fd),
        };

        match found {
            Some(slot) => {
                *slot = p;
                Ok(())
            }
            None => {
                let msg = match &self.items[p].endpoint {
                    Endpoint::Socket(_) => "unable to reindex socket in poller".to_string(),
                    Endpoint::Fd(fd) => {
                        format!("unable to reindex file descriptor {} in poller", fd)
                    }
                };
                Logger::error(&msg);
                Err(PollError::Corrupted(msg))
            }
        }
    }

    pub fn set_events(&mut self, endpoint: &Endpoint<S>, events: Events) -> Result<()> {
        let p = self.require(endpoint)?;
        self.items[p].events = events;
        Ok(())
    }

    pub fn requested(&self, endpoint: &Endpoint<S>) -> Result<Events> {
        let p = self.require(endpoint)?;
        Ok(self.items[p].events)
    }

    pub fn revents(&self, endpoint: &Endpoint<S>) -> Result<Events> {
        let p = self.require(endpoint)?;
        Ok(self.items[p].revents)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.sockets.clear();
        self.fds.clear();
    }

    fn require(&self, endpoint: &Endpoint<S>) -> Result<usize> {
        self.position(endpoint).ok_or_else(|| {
            PollError::NotRegistered(format!(
                "{} is not represented within this poller",
                describe(endpoint)
            ))
        })
    }
}

impl<S> Default for EntryStore<S>
where
    S: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

fn describe<S: Debug>(endpoint: &Endpoint<S>) -> String {
    match endpoint {
        Endpoint::Socket(s) => format!("socket {:?}", s),
        Endpoint::Fd(fd) => format!("file descriptor {}", fd),
    }
}
