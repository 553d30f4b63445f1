//! Wire protocol for vantage viewer↔gateway communication.
//!
//! Instructions are transmitted as text frames: each element (the opcode
//! and every argument) is sent as its escaped byte length in decimal, a
//! literal `.`, the escaped bytes, then a separator — `,` between elements
//! and `;` terminating the instruction. The format is suitable for any
//! reliable byte stream (TCP, Unix socket, pipe).
//!
//! The crate provides:
//!
//! - [`escape`]/[`unescape`] for the reserved delimiter bytes,
//! - [`encode_instruction`] and the incremental [`Parser`],
//! - typed senders for the outbound vocabulary ([`send_sync`],
//!   [`send_copy`], [`send_png`], ...),
//! - the [`Transport`] seam the parser drives, with a poll-backed
//!   implementation for Unix streams ([`PollStream`]).

mod codec;
mod escape;
mod instruction;
mod send;
mod transport;

pub use codec::{INSTRUCTION_TIMEOUT, MAX_ELEMENT_LEN, Parser, encode_instruction};
pub use escape::{escape, unescape};
pub use instruction::{
    ArgumentFault, BadArgument, CompositeMode, Instruction, ReservedMask, Timestamp, timestamp_now,
};
pub use send::{
    send_args, send_clipboard, send_copy, send_cursor, send_error, send_name, send_png, send_size,
    send_sync,
};
#[cfg(unix)]
pub use transport::PollStream;
pub use transport::{ReadEvent, Transport};

/// Alias for `Result<T, vantage_proto::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the protocol codec.
///
/// Every variant is terminal for the session that produced it: once the
/// codec reports a failure the stream position is unknown and the
/// connection must be torn down by the owning loop.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An underlying read or write failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The peer closed the stream mid-instruction.
    #[error("stream closed before the instruction completed")]
    Closed,

    /// An instruction did not complete within the deadline.
    #[error("instruction incomplete after {0} ms")]
    Timeout(u64),

    /// The byte stream violated the instruction grammar.
    #[error("protocol violation: {0}")]
    Malformed(String),
}
