use crate::application::config::models::Config;
use crate::common::error::{PollError, Result};
use crate::common::logger::Logger;
use crate::common::time::Timeout;
use crate::core::event::event::Events;
use crate::core::event::item::Endpoint;
use crate::core::event::poller::Poller;
use crate::core::event::waker::Waker;
use crate::core::net::fd::FileDescriptor;
use crate::core::net::socket::SocketHandle;
use std::collections::HashMap;
use std::io::Write;
use std::os::unix::io::{AsRawFd, RawFd};
use std::sync::Arc;

/// Totals gathered over one `run`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchSummary {
    /// Waits that reported at least one ready endpoint
    pub wakeups: usize,

    /// Waits that ended without anything ready
    pub idle_waits: usize,

    /// Bytes drained per descriptor
    pub bytes: HashMap<RawFd, usize>,

    /// Descriptors dropped after EOF, an error condition, or once nothing is left to watch
    pub closed: Vec<RawFd>,

    /// Whether the run ended through the stop handle
    pub stopped: bool,
}

/// Watches the configured descriptors and reports their readiness
pub struct WatchManager {
    /// Poller over the watched descriptors and the stop waker
    poller: Poller,

    /// Wake-up pipe shared with stop handles
    waker: Arc<Waker>,

    /// Borrowed views of the watched descriptors
    descriptors: HashMap<RawFd, FileDescriptor>,

    timeout: Timeout,
    read_chunk: usize,
}

impl WatchManager {
    /// Create a watch manager from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut poller: Poller = config.poller.build();
        let events = config.watch.events()?;

        let waker = Arc::new(Waker::new()?);
        poller.add(waker.endpoint())?;

        let descriptors = Self::watch_descriptors(
            &mut poller,
            waker.as_raw_fd(),
            &config.watch.descriptors,
            events,
        )?;

        Ok(Self {
            poller,
            waker,
            descriptors,
            timeout: config.poller.timeout(),
            read_chunk: config.watch.read_chunk,
        })
    }

    fn watch_descriptors(
        poller: &mut Poller,
        stop: RawFd,
        fds: &[RawFd],
        events: Events,
    ) -> Result<HashMap<RawFd, FileDescriptor>> {
        let mut descriptors = HashMap::new();
        for &fd in fds {
            if fd == stop {
                return Err(PollError::ConfigError(format!(
                    "Descriptor {} is the stop pipe of this watcher",
                    fd
                )));
            }
            poller.add_fd(fd, events)?;
            descriptors.insert(fd, FileDescriptor::new(fd));
        }
        Ok(descriptors)
    }

    /// Handle that ends `run` from another thread.
    pub fn stop_handle(&self) -> Arc<Waker> {
        Arc::clone(&self.waker)
    }

    pub fn print_watch_info(&self) {
        let mut fds: Vec<_> = self.descriptors.keys().copied().collect();
        fds.sort_unstable();
        for fd in fds {
            let events = self
                .poller
                .requested(&Endpoint::Fd(fd))
                .unwrap_or(Events::NONE);
            Logger::info(&format!("Watching fd {} for {}", fd, events));
        }
    }

    /// Run until every descriptor is closed or the stop handle fires
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<WatchSummary> {
        let mut summary = WatchSummary::default();
        let mut buf = vec![0u8; self.read_chunk];
        let stop = self.waker.endpoint();

        while !self.descriptors.is_empty() {
            if !self.poller.wait(self.timeout)? {
                summary.idle_waits += 1;
                continue;
            }
            summary.wakeups += 1;

            // Collect first; handling removes entries and reorders the store.
            let ready: Vec<(Endpoint<SocketHandle>, Events)> = self
                .poller
                .ready()
                .map(|(endpoint, events)| (endpoint.clone(), events))
                .collect();

            for (endpoint, events) in ready {
                if endpoint == stop {
                    self.waker.drain()?;
                    summary.stopped = true;
                    Logger::info("Stop requested");
                    return Ok(summary);
                }

                if let Some(fd) = endpoint.as_fd() {
                    writeln!(out, "fd {}: {}", fd, events)?;
                    self.handle_ready(fd, events, &mut buf, &mut summary)?;
                }
            }
        }

        Ok(summary)
    }

    fn handle_ready(
        &mut self,
        fd: RawFd,
        events: Events,
        buf: &mut [u8],
        summary: &mut WatchSummary,
    ) -> Result<()> {
        let endpoint = Endpoint::Fd(fd);

        if events.is_readable() {
            let read = match self.descriptors.get(&fd) {
                Some(desc) => desc.read(buf)?,
                None => return Ok(()),
            };
            match read {
                Some(0) => return self.close_descriptor(fd, summary),
                Some(n) => *summary.bytes.entry(fd).or_insert(0) += n,
                None => {}
            }
        } else if events.is_error() {
            Logger::warn(&format!("fd {} reported an error condition", fd));
            return self.close_descriptor(fd, summary);
        }

        // Writability is level-triggered; report it once and stop asking.
        if events.is_writable() {
            let remaining = self.poller.requested(&endpoint)? & !Events::WRITABLE;
            if remaining.is_empty() {
                return self.close_descriptor(fd, summary);
            }
            self.poller.check_for(&endpoint, remaining)?;
        }

        Ok(())
    }

    fn close_descriptor(&mut self, fd: RawFd, summary: &mut WatchSummary) -> Result<()> {
        Logger::debug(&format!("Closing watch on fd {}", fd));
        self.poller.remove(&Endpoint::Fd(fd))?;
        self.descriptors.remove(&fd);
        summary.closed.push(fd);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_pipe_cannot_be_watched() {
        let mut poller: Poller = Poller::new();
        poller.add(Endpoint::Fd(7)).unwrap();

        let err = WatchManager::watch_descriptors(&mut poller, 7, &[3, 7], Events::READABLE)
            .unwrap_err();
        assert!(matches!(err, PollError::ConfigError(_)));
        assert_eq!(poller.requested(&Endpoint::Fd(7)).unwrap(), Events::READABLE);
    }

    #[test]
    fn test_watch_descriptors_registers_each() {
        let mut poller: Poller = Poller::new();
        let descriptors =
            WatchManager::watch_descriptors(&mut poller, 9, &[3, 4], Events::WRITABLE).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(poller.len(), 2);
        assert_eq!(poller.requested(&Endpoint::Fd(4)).unwrap(), Events::WRITABLE);
    }
}
