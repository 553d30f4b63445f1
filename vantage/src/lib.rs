//! Client-session core for a remote-desktop gateway.
//!
//! `vantage` sits between a protocol-specific backend driver (a VNC or RDP
//! client, say) and a front-end viewer, translating backend events into
//! the compact text-framed instruction stream implemented by
//! [`vantage_proto`] and routing inbound viewer instructions to
//! backend-supplied handlers.
//!
//! A [`Session`] owns one transport, one incremental parser, one
//! [`LayerAllocator`] naming the session's drawable surfaces, and one
//! [`EventHandler`] — the backend's capability set. The read/dispatch loop
//! is synchronous: one thread per session, blocking only at the
//! transport's bounded read, with cooperative stop via
//! [`Session::stop`].
//!
//! # Example
//!
//! ```no_run
//! use std::net::TcpStream;
//!
//! use vantage::{EventHandler, Session};
//! use vantage_proto::PollStream;
//!
//! struct Backend;
//! impl EventHandler for Backend {}
//!
//! let stream = TcpStream::connect("127.0.0.1:4822").expect("connect");
//! let mut session = Session::new(PollStream::new(stream), Backend);
//! session.run().expect("session failed");
//! ```

mod error;
pub mod handlers;
mod layers;
mod session;

pub use error::{Error, Result};
pub use handlers::{EventHandler, HandlerError, HandlerResult, NoopHandler};
pub use layers::{DEFAULT_LAYER, LayerAllocator, LayerError, LayerId};
pub use session::{Context, Session, SessionBuilder, State};
pub use vantage_proto::{CompositeMode, Instruction, Timestamp, timestamp_now};
