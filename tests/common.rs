// Shared helpers for the integration tests

use pollset::{Endpoint, FileDescriptor, SocketHandle};
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixStream;

/// Connected socket pair with both ends non-blocking.
#[allow(dead_code)]
pub fn socket_pair() -> (UnixStream, UnixStream) {
    let (a, b) = UnixStream::pair().expect("Failed to create socket pair");
    a.set_nonblocking(true).unwrap();
    b.set_nonblocking(true).unwrap();
    (a, b)
}

/// Pipe as `(read, write)` with a non-blocking read end.
#[allow(dead_code)] // Used in poller_tests.rs and watch_tests.rs
pub fn pipe() -> (FileDescriptor, FileDescriptor) {
    let (r, w) = FileDescriptor::pipe().expect("Failed to create pipe");
    r.set_non_blocking().unwrap();
    (r, w)
}

#[allow(dead_code)]
pub fn socket_endpoint(stream: &UnixStream) -> Endpoint<SocketHandle> {
    Endpoint::Socket(SocketHandle::of(stream))
}

#[allow(dead_code)]
pub fn fd_endpoint(fd: &FileDescriptor) -> Endpoint<SocketHandle> {
    Endpoint::Fd(fd.as_raw_fd())
}
