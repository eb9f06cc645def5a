pub mod config;
pub mod watcher;
