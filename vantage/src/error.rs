//! Error types for session operations.

use vantage_proto::BadArgument;

use crate::layers::LayerError;

/// Alias for `Result<T, vantage::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the session layer.
///
/// Only [`Error::Protocol`] is terminal for the session; the owning loop
/// consults [`Error::is_fatal`] to decide between logging and teardown.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A codec-level failure: transport error, timeout, closed stream, or
    /// grammar violation. Always terminal.
    #[error(transparent)]
    Protocol(#[from] vantage_proto::Error),

    /// One dispatched instruction carried an argument that failed to
    /// decode. The instruction is dropped; the session continues.
    #[error("{opcode}: {source}")]
    Argument {
        /// Opcode of the offending instruction.
        opcode: String,
        /// Which argument failed and why.
        #[source]
        source: BadArgument,
    },

    /// A layer-allocator contract violation — a caller bug, surfaced
    /// immediately rather than silently ignored.
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// A backend handler signalled failure. The session is marked for
    /// shutdown but the transport is left to the owning loop.
    #[error("handler for {opcode} failed: {source}")]
    Handler {
        /// What invoked the handler: the dispatched opcode, or `"idle"`
        /// for the idle-loop message pump.
        opcode: String,
        /// The handler's failure signal.
        #[source]
        source: crate::handlers::HandlerError,
    },
}

impl Error {
    /// Returns whether this failure must tear the session down.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}
