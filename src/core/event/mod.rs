pub mod event;
pub mod item;
pub mod store;
pub mod native;
pub mod poller;
pub mod waker;

pub use event::Events;
pub use item::{Endpoint, PollItem};
pub use store::{DuplicatePolicy, EntryStore};
pub use native::{NativeWait, SysPoll};
pub use poller::Poller;
pub use waker::Waker;
