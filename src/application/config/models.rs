use crate::common::constants::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_READ_CHUNK, STDIN_FD, WAIT_FOREVER,
};
use crate::common::error::{PollError, Result};
use crate::common::time::Timeout;
use crate::core::event::event::Events;
use crate::core::event::poller::Poller;
use crate::core::event::store::DuplicatePolicy;
use crate::core::net::socket::Socket;
use serde::{Deserialize, Serialize};
use std::os::unix::io::RawFd;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Poller construction settings
    #[serde(default)]
    pub poller: PollerConfig,

    /// Descriptors watched by the command-line tool
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Poller construction settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollerConfig {
    /// Entries reserved up front
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Behaviour when an endpoint is added twice
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Wait timeout in milliseconds; -1 waits forever, 0 polls
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: i64,
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

fn default_timeout_ms() -> i64 {
    WAIT_FOREVER
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            duplicate_policy: DuplicatePolicy::default(),
            default_timeout_ms: default_timeout_ms(),
        }
    }
}

impl PollerConfig {
    pub fn timeout(&self) -> Timeout {
        Timeout::from_millis(self.default_timeout_ms)
    }

    pub fn build<S: Socket>(&self) -> Poller<S> {
        Poller::with_capacity(self.initial_capacity, self.duplicate_policy)
    }
}

/// Descriptor watch list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    /// Descriptors to register
    #[serde(default = "default_descriptors")]
    pub descriptors: Vec<RawFd>,

    /// Condition names to watch on every descriptor
    #[serde(default = "default_events")]
    pub events: Vec<String>,

    /// Bytes drained per readable descriptor per wake-up
    #[serde(default = "default_read_chunk")]
    pub read_chunk: usize,
}

fn default_descriptors() -> Vec<RawFd> {
    vec![STDIN_FD]
}

fn default_events() -> Vec<String> {
    vec!["readable".to_string()]
}

fn default_read_chunk() -> usize {
    DEFAULT_READ_CHUNK
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            descriptors: default_descriptors(),
            events: default_events(),
            read_chunk: default_read_chunk(),
        }
    }
}

impl WatchConfig {
    /// Combined mask of the configured condition names.
    pub fn events(&self) -> Result<Events> {
        self.events.iter().try_fold(Events::NONE, |acc, name| {
            Events::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| PollError::ConfigError(format!("Unknown event '{}'", name)))
        })
    }
}
