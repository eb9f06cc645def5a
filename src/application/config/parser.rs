use crate::application::config::models::Config;
use crate::common::error::{PollError, Result};
use std::fs;

/// Parse configuration from TOML file
pub fn parse_config_file(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        PollError::ConfigError(format!("Failed to read config file '{}': {}", path, e))
    })?;

    parse_config(&content)
}

/// Parse configuration from TOML string
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content)
        .map_err(|e| PollError::ConfigError(format!("Failed to parse TOML config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::store::DuplicatePolicy;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.poller.default_timeout_ms, -1);
        assert_eq!(config.watch.descriptors, vec![0]);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [poller]
            initial_capacity = 64
            duplicate_policy = "reject"
            default_timeout_ms = 250

            [watch]
            descriptors = [0, 5]
            events = ["readable", "error"]
            read_chunk = 512
        "#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.poller.initial_capacity, 64);
        assert_eq!(config.poller.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.poller.default_timeout_ms, 250);
        assert_eq!(config.watch.descriptors, vec![0, 5]);
        assert_eq!(config.watch.read_chunk, 512);
    }

    #[test]
    fn test_parse_unknown_policy() {
        let toml = r#"
            [poller]
            duplicate_policy = "merge"
        "#;
        assert!(parse_config(toml).is_err());
    }
}
