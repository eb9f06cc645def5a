use crate::common::error::Result;
use crate::core::event::item::Endpoint;
use crate::core::net::fd::FileDescriptor;
use std::os::unix::io::{AsRawFd, RawFd};

/// Self-pipe used to cut a blocking wait short.
///
/// Register `endpoint()` for readability; `wake()` from any thread makes the
/// wait return, and `drain()` re-arms it.
#[derive(Debug)]
pub struct Waker {
    read: FileDescriptor,
    write: FileDescriptor,
}

impl Waker {
    pub fn new() -> Result<Self> {
        let (read, write) = FileDescriptor::pipe()?;
        read.set_non_blocking()?;
        write.set_non_blocking()?;
        Ok(Self { read, write })
    }

    pub fn endpoint<S>(&self) -> Endpoint<S> {
        Endpoint::Fd(self.read.as_raw_fd())
    }

    /// Would-block on a full pipe is ignored; the reader is already woken.
    pub fn wake(&self) -> Result<()> {
        self.write.write(&[1u8])?;
        Ok(())
    }

    /// Consumes pending wake-ups. Returns how many bytes were drained.
    pub fn drain(&self) -> Result<usize> {
        let mut buf = [0u8; 64];
        let mut total = 0;
        while let Some(n) = self.read.read(&mut buf)? {
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }
}

impl AsRawFd for Waker {
    fn as_raw_fd(&self) -> RawFd {
        self.read.as_raw_fd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_then_drain() {
        let waker = Waker::new().unwrap();
        assert_eq!(waker.drain().unwrap(), 0);

        waker.wake().unwrap();
        waker.wake().unwrap();
        assert_eq!(waker.drain().unwrap(), 2);
        assert_eq!(waker.drain().unwrap(), 0);
    }

    #[test]
    fn test_endpoint_is_read_end() {
        let waker = Waker::new().unwrap();
        let ep: Endpoint<u32> = waker.endpoint();
        assert_eq!(ep, Endpoint::Fd(waker.as_raw_fd()));
    }
}
