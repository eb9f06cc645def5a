pub mod constants;
pub mod error;
pub mod logger;
pub mod time;

pub use error::{PollError, Result};
pub use time::Timeout;
