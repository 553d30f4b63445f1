//! Byte-stream transport seam driven by the parser and the senders.
//!
//! The codec never owns a socket; it drives anything implementing
//! [`Transport`]. The production implementation is [`PollStream`], which
//! bounds each read with `poll(2)` so the parser can enforce its
//! per-instruction deadline without an unbounded blocking read.

use std::io;
use std::time::Duration;

/// Outcome of one bounded-wait read attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReadEvent {
    /// The given number of bytes were read into the buffer.
    Data(usize),
    /// No bytes became available within the wait.
    WouldBlock,
    /// The peer closed the stream.
    Closed,
}

/// A reliable byte stream with bounded-wait reads.
///
/// `recv` may return fewer bytes than the buffer holds and may be called
/// again; `send` has write-all semantics. Neither retries on failure.
pub trait Transport {
    /// Reads available bytes, waiting at most `wait` for data to arrive.
    fn recv(&mut self, buf: &mut [u8], wait: Duration) -> io::Result<ReadEvent>;

    /// Writes all of `bytes` to the stream.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn recv(&mut self, buf: &mut [u8], wait: Duration) -> io::Result<ReadEvent> {
        (**self).recv(buf, wait)
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).send(bytes)
    }
}

#[cfg(unix)]
mod poll_stream {
    use std::io::{self, Read, Write};
    use std::os::fd::AsFd;
    use std::time::Duration;

    use nix::poll::{PollFd, PollFlags, PollTimeout, poll};

    use super::{ReadEvent, Transport};

    /// [`Transport`] over any Unix stream, using `poll(2)` for the bounded
    /// read wait (TCP streams, Unix sockets, pipes).
    #[derive(Debug)]
    pub struct PollStream<S> {
        /// The wrapped stream.
        stream: S,
    }

    impl<S: AsFd + Read + Write> PollStream<S> {
        /// Wraps a stream.
        pub fn new(stream: S) -> Self {
            Self { stream }
        }

        /// Consumes the adapter, returning the underlying stream.
        pub fn into_inner(self) -> S {
            self.stream
        }
    }

    impl<S: AsFd + Read + Write> Transport for PollStream<S> {
        fn recv(&mut self, buf: &mut [u8], wait: Duration) -> io::Result<ReadEvent> {
            // Waits beyond u16::MAX ms are clamped; the parser re-polls.
            let millis = u16::try_from(wait.as_millis()).unwrap_or(u16::MAX);
            let timeout = PollTimeout::from(millis);
            loop {
                let mut fds = [PollFd::new(self.stream.as_fd(), PollFlags::POLLIN)];
                match poll(&mut fds, timeout) {
                    Ok(0) => return Ok(ReadEvent::WouldBlock),
                    Ok(_) => break,
                    // EINTR: retry with the full wait; the parser's deadline
                    // still bounds overall progress.
                    Err(nix::errno::Errno::EINTR) => continue,
                    Err(e) => return Err(io::Error::from(e)),
                }
            }
            match self.stream.read(buf) {
                Ok(0) => Ok(ReadEvent::Closed),
                Ok(n) => Ok(ReadEvent::Data(n)),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(ReadEvent::WouldBlock),
                Err(e) => Err(e),
            }
        }

        fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
            self.stream.write_all(bytes)?;
            self.stream.flush()
        }
    }
}

#[cfg(unix)]
pub use poll_stream::PollStream;
