pub mod models;
pub mod parser;
pub mod validator;
pub mod loader;

pub use models::{Config, PollerConfig, WatchConfig};
pub use loader::ConfigLoader;
