use crate::application::config::models::{Config, PollerConfig, WatchConfig};
use crate::common::error::{PollError, Result};
use std::collections::HashSet;

/// Validate configuration for correctness and consistency
pub fn validate_config(config: &Config) -> Result<()> {
    validate_poller(&config.poller)?;
    validate_watch(&config.watch)?;
    Ok(())
}

fn validate_poller(poller: &PollerConfig) -> Result<()> {
    if poller.initial_capacity == 0 {
        return Err(PollError::ConfigError(
            "poller.initial_capacity must be greater than 0".to_string(),
        ));
    }

    if poller.default_timeout_ms < -1 {
        return Err(PollError::ConfigError(format!(
            "poller.default_timeout_ms must be -1 or greater, got {}",
            poller.default_timeout_ms
        )));
    }

    Ok(())
}

fn validate_watch(watch: &WatchConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for fd in &watch.descriptors {
        if *fd < 0 {
            return Err(PollError::ConfigError(format!(
                "watch.descriptors: invalid descriptor {}",
                fd
            )));
        }
        if !seen.insert(*fd) {
            return Err(PollError::ConfigError(format!(
                "watch.descriptors: descriptor {} listed more than once",
                fd
            )));
        }
    }

    if watch.events()?.is_empty() {
        return Err(PollError::ConfigError(
            "watch.events must name at least one condition".to_string(),
        ));
    }

    if watch.read_chunk == 0 {
        return Err(PollError::ConfigError(
            "watch.read_chunk must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
