pub mod watch_manager;

pub use watch_manager::{WatchManager, WatchSummary};
