use crate::common::error::{PollError, Result};
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// A raw descriptor that is closed on drop only when owned.
#[derive(Debug)]
pub struct FileDescriptor {
    fd: RawFd,
    owned: bool,
}

impl FileDescriptor {
    pub fn new(fd: RawFd) -> Self {
        Self { fd, owned: false }
    }

    pub fn from_raw(fd: RawFd) -> Self {
        Self { fd, owned: true }
    }

    /// Creates a close-on-exec pipe, returning `(read, write)` ends.
    pub fn pipe() -> Result<(Self, Self)> {
        let mut fds: [libc::c_int; 2] = [-1; 2];
        if unsafe { libc::pipe(fds.as_mut_ptr()) } < 0 {
            return Err(PollError::IoError(io::Error::last_os_error()));
        }

        let read = Self::from_raw(fds[0]);
        let write = Self::from_raw(fds[1]);
        read.set_cloexec()?;
        write.set_cloexec()?;
        Ok((read, write))
    }

    pub fn set_non_blocking(&self) -> Result<()> {
        unsafe {
            let flags = libc::fcntl(self.fd, libc::F_GETFL);
            if flags < 0 {
                return Err(PollError::IoError(io::Error::last_os_error()));
            }

            if libc::fcntl(self.fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
                return Err(PollError::IoError(io::Error::last_os_error()));
            }
        }
        Ok(())
    }

    fn set_cloexec(&self) -> Result<()> {
        unsafe {
            let flags = libc::fcntl(self.fd, libc::F_GETFD);
            if flags < 0 || libc::fcntl(self.fd, libc::F_SETFD, flags | libc::FD_CLOEXEC) < 0 {
                return Err(PollError::IoError(io::Error::last_os_error()));
            }
        }
        Ok(())
    }

    /// Single non-blocking read. `Ok(None)` means it would block.
    pub fn read(&self, buf: &mut [u8]) -> Result<Option<usize>> {
        let n = unsafe { libc::read(self.fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
        if n < 0 {
            let err = io::Error::last_os_error();
            return match err.kind() {
                io::ErrorKind::WouldBlock => Ok(None),
                _ => Err(PollError::IoError(err)),
            };
        }
        Ok(Some(n as usize))
    }

    /// Single non-blocking write. `Ok(None)` means it would block.
    pub fn write(&self, buf: &[u8]) -> Result<Option<usize>> {
        let n = unsafe { libc::write(self.fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
        if n < 0 {
            let err = io::Error::last_os_error();
            return match err.kind() {
                io::ErrorKind::WouldBlock => Ok(None),
                _ => Err(PollError::IoError(err)),
            };
        }
        Ok(Some(n as usize))
    }
}

impl AsRawFd for FileDescriptor {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for FileDescriptor {
    fn drop(&mut self) {
        if self.owned && self.fd >= 0 {
            unsafe {
                libc::close(self.fd);
            }
        }
    }
}
