pub mod fd;
pub mod socket;

pub use fd::FileDescriptor;
pub use socket::{Socket, SocketHandle};
