//! Readiness multiplexing over messaging sockets and raw file descriptors.
//!
//! A [`Poller`] keeps every registered endpoint in one contiguous array so a
//! single `poll(2)` call services all of them, and resolves endpoints back to
//! array positions through a socket index and a descriptor index.

pub mod application;
pub mod common;
pub mod core;

pub use crate::common::{PollError, Result, Timeout};
pub use crate::core::event::{Endpoint, Events, NativeWait, PollItem, Poller, SysPoll, Waker};
pub use crate::core::net::{FileDescriptor, Socket, SocketHandle};
