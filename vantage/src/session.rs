//! Client session record, opcode dispatch, and the read/dispatch loop.
//!
//! One session is read, parsed, and dispatched by exactly one thread of
//! execution; the only blocking point is the transport's bounded read.
//! Independent sessions run concurrently with no shared state.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};
use vantage_proto::{Instruction, Parser, Timestamp, Transport, timestamp_now};

use crate::error::{Error, Result};
use crate::handlers::{EventHandler, HandlerResult};
use crate::layers::{LayerAllocator, LayerId};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum State {
    /// Reading, dispatching, and responding.
    #[default]
    Running,
    /// A stop has been requested; the loop must stop issuing reads and
    /// writes once it observes this.
    Stopping,
}

/// Outbound surface handed to handlers during dispatch.
///
/// Borrows the session's transport, layer allocator, and last-sent
/// timestamp so a handler can emit display updates and manage buffers
/// without owning the session.
pub struct Context<'a> {
    /// The session's transport.
    transport: &'a mut dyn Transport,
    /// The session's layer allocator.
    layers: &'a mut LayerAllocator,
    /// Updated whenever a `sync` is sent through this context.
    last_sent: &'a mut Timestamp,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("layers", &self.layers)
            .field("last_sent", &self.last_sent)
            .finish_non_exhaustive()
    }
}

impl Context<'_> {
    /// Allocates a pooled buffer (invisible surface).
    pub fn alloc_buffer(&mut self) -> LayerId {
        self.layers.alloc_buffer()
    }

    /// Registers a caller-indexed visible layer.
    pub fn alloc_layer(&mut self, index: LayerId) -> Result<LayerId> {
        Ok(self.layers.alloc_layer(index)?)
    }

    /// Returns a buffer to the pool.
    pub fn free_buffer(&mut self, id: LayerId) -> Result<()> {
        Ok(self.layers.free_buffer(id)?)
    }

    /// Sends a `name` instruction.
    pub fn send_name(&mut self, name: &str) -> Result<()> {
        Ok(vantage_proto::send_name(&mut *self.transport, name)?)
    }

    /// Sends an `args` instruction.
    pub fn send_args(&mut self, names: &[&str]) -> Result<()> {
        Ok(vantage_proto::send_args(&mut *self.transport, names)?)
    }

    /// Sends a `size` instruction.
    pub fn send_size(&mut self, width: u32, height: u32) -> Result<()> {
        Ok(vantage_proto::send_size(&mut *self.transport, width, height)?)
    }

    /// Sends an `error` instruction.
    pub fn send_error(&mut self, message: &str) -> Result<()> {
        Ok(vantage_proto::send_error(&mut *self.transport, message)?)
    }

    /// Sends a `clipboard` instruction.
    pub fn send_clipboard(&mut self, data: &str) -> Result<()> {
        Ok(vantage_proto::send_clipboard(&mut *self.transport, data)?)
    }

    /// Sends a `copy` instruction.
    #[allow(clippy::too_many_arguments)]
    pub fn send_copy(
        &mut self,
        src_layer: LayerId,
        src_x: i32,
        src_y: i32,
        width: u32,
        height: u32,
        mode: vantage_proto::CompositeMode,
        dst_layer: LayerId,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<()> {
        Ok(vantage_proto::send_copy(
            &mut *self.transport,
            src_layer,
            src_x,
            src_y,
            width,
            height,
            mode,
            dst_layer,
            dst_x,
            dst_y,
        )?)
    }

    /// Sends a `png` instruction blitting pre-encoded image bytes.
    pub fn send_png(
        &mut self,
        mode: vantage_proto::CompositeMode,
        layer: LayerId,
        x: i32,
        y: i32,
        image: &[u8],
    ) -> Result<()> {
        Ok(vantage_proto::send_png(
            &mut *self.transport,
            mode,
            layer,
            x,
            y,
            image,
        )?)
    }

    /// Sends a `cursor` instruction.
    pub fn send_cursor(&mut self, hotspot_x: i32, hotspot_y: i32, image: &[u8]) -> Result<()> {
        Ok(vantage_proto::send_cursor(
            &mut *self.transport,
            hotspot_x,
            hotspot_y,
            image,
        )?)
    }

    /// Sends a `sync` instruction and records it as the last sent.
    pub fn send_sync(&mut self, timestamp: Timestamp) -> Result<()> {
        vantage_proto::send_sync(&mut *self.transport, timestamp)?;
        *self.last_sent = timestamp;
        Ok(())
    }

    /// Sends a `sync` stamped with the current time.
    pub fn sync_now(&mut self) -> Result<Timestamp> {
        let now = timestamp_now();
        self.send_sync(now)?;
        Ok(now)
    }
}

/// Configuration for a [`Session`].
#[derive(Debug, Clone, Copy)]
#[must_use = "a SessionBuilder does nothing until .build() is called"]
pub struct SessionBuilder {
    /// Per-instruction parse deadline.
    timeout: Duration,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            timeout: vantage_proto::INSTRUCTION_TIMEOUT,
        }
    }
}

impl SessionBuilder {
    /// Overrides the per-instruction timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a running session over `transport` with `handler` installed.
    pub fn build<T: Transport, H: EventHandler>(self, transport: T, handler: H) -> Session<T, H> {
        let now = timestamp_now();
        Session {
            transport,
            parser: Parser::with_timeout(self.timeout),
            state: State::Running,
            layers: LayerAllocator::new(),
            handler,
            last_received: now,
            last_sent: now,
            tore_down: false,
        }
    }
}

/// A proxy client session: one transport, one parser, one layer
/// allocator, one handler table.
#[derive(Debug)]
pub struct Session<T: Transport, H: EventHandler> {
    /// Byte stream to the viewer.
    transport: T,
    /// Incremental instruction parser for this stream.
    parser: Parser,
    /// Running/stopping flag observed by the loop and handlers.
    state: State,
    /// Identifier space for this session's drawable surfaces.
    layers: LayerAllocator,
    /// Backend capability set.
    handler: H,
    /// Receipt time of the last `sync` from the viewer (ms).
    last_received: Timestamp,
    /// Timestamp of the last `sync` sent to the viewer (ms).
    last_sent: Timestamp,
    /// Whether the teardown handler has already run.
    tore_down: bool,
}

impl<T: Transport, H: EventHandler> Session<T, H> {
    /// Starts configuring a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Creates a session with default configuration.
    pub fn new(transport: T, handler: H) -> Self {
        Self::builder().build(transport, handler)
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns whether the session is still running.
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Requests a cooperative stop; the loop observes it before its next
    /// read or write. An in-flight bounded read is not interrupted.
    pub fn stop(&mut self) {
        self.state = State::Stopping;
    }

    /// Receipt time of the last `sync` from the viewer.
    pub const fn last_received(&self) -> Timestamp {
        self.last_received
    }

    /// Timestamp of the last `sync` sent to the viewer.
    pub const fn last_sent(&self) -> Timestamp {
        self.last_sent
    }

    /// The session's layer allocator.
    pub const fn layers(&self) -> &LayerAllocator {
        &self.layers
    }

    /// The installed handler.
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// The installed handler, mutably.
    pub const fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// The underlying transport.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// An outbound context for use outside dispatch (handshake, periodic
    /// sync).
    pub fn context(&mut self) -> Context<'_> {
        Context {
            transport: &mut self.transport,
            layers: &mut self.layers,
            last_sent: &mut self.last_sent,
        }
    }

    /// Reads one full instruction (bounded by the instruction deadline)
    /// and dispatches it.
    pub fn step(&mut self) -> Result<()> {
        let instruction = self.parser.read_instruction(&mut self.transport)?;
        self.dispatch(instruction)
    }

    /// Routes one parsed instruction to the backend.
    ///
    /// Fixed opcode mapping, applied before any backend involvement:
    /// `sync` updates the last-received timestamp and pumps the backend;
    /// `mouse`, `key`, and `clipboard` decode their arguments and invoke
    /// the matching capability; `disconnect` flips the session to
    /// stopping; anything else is ignored with a warning. Argument decode
    /// failures are local to the instruction — the session continues.
    pub fn dispatch(&mut self, instruction: Instruction) -> Result<()> {
        debug!(opcode = %instruction.opcode, argc = instruction.args.len(), "dispatch");
        match instruction.opcode.as_str() {
            "sync" => {
                self.last_received = arg(&instruction, 0)?;
                self.pump("sync")
            }
            "mouse" => {
                let x = arg(&instruction, 0)?;
                let y = arg(&instruction, 1)?;
                let mask = arg(&instruction, 2)?;
                let (handler, mut ctx) = self.split();
                let result = handler.mouse(&mut ctx, x, y, mask);
                self.observe("mouse", result)
            }
            "key" => {
                let keysym = arg(&instruction, 0)?;
                let pressed: i64 = arg(&instruction, 1)?;
                let (handler, mut ctx) = self.split();
                let result = handler.key(&mut ctx, keysym, pressed != 0);
                self.observe("key", result)
            }
            "clipboard" => {
                let Some(text) = instruction.arg(0) else {
                    return Err(Error::Argument {
                        opcode: instruction.opcode.clone(),
                        source: vantage_proto::BadArgument {
                            index: 0,
                            reason: vantage_proto::ArgumentFault::Missing,
                        },
                    });
                };
                let (handler, mut ctx) = self.split();
                let result = handler.clipboard(&mut ctx, text);
                self.observe("clipboard", result)
            }
            "disconnect" => {
                debug!("viewer requested disconnect");
                self.state = State::Stopping;
                Ok(())
            }
            _ => {
                warn!(opcode = %instruction.opcode, "instruction outside the fixed vocabulary");
                let (handler, mut ctx) = self.split();
                let result = handler.instruction(&mut ctx, &instruction);
                let opcode = instruction.opcode.clone();
                self.observe(&opcode, result)
            }
        }
    }

    /// Runs the read/dispatch loop until the session stops or a fatal
    /// failure occurs, then tears down exactly once.
    ///
    /// Non-fatal dispatch failures are logged and the loop continues; a
    /// clean disconnect at an instruction boundary ends the loop without
    /// error. The teardown handler runs on every exit path.
    pub fn run(&mut self) -> Result<()> {
        let result = self.run_loop();
        self.teardown();
        result
    }

    /// The loop body of [`run`](Self::run).
    fn run_loop(&mut self) -> Result<()> {
        while self.is_running() {
            match self.parser.poll(&mut self.transport) {
                Ok(Some(instruction)) => {
                    let opcode = instruction.opcode.clone();
                    match self.dispatch(instruction) {
                        Ok(()) => {}
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => {
                            warn!(opcode = %opcode, error = %e, "dispatch failed; session continues");
                            if !self.is_running() {
                                return Err(e);
                            }
                        }
                    }
                }
                Ok(None) => self.pump("idle")?,
                Err(vantage_proto::Error::Closed) if self.parser.is_idle() => {
                    debug!("viewer disconnected cleanly");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Invokes the backend message pump; `trigger` names what prompted it
    /// (`"sync"` receipt or an `"idle"` loop pass) for failure reports.
    fn pump(&mut self, trigger: &str) -> Result<()> {
        let (handler, mut ctx) = self.split();
        let result = handler.handle_messages(&mut ctx);
        self.observe(trigger, result)
    }

    /// Runs the teardown handler if it has not run yet and marks the
    /// session stopping.
    pub fn teardown(&mut self) {
        self.state = State::Stopping;
        if !self.tore_down {
            self.tore_down = true;
            self.handler.teardown();
        }
    }

    /// Splits the session into its handler and an outbound context.
    fn split(&mut self) -> (&mut H, Context<'_>) {
        (
            &mut self.handler,
            Context {
                transport: &mut self.transport,
                layers: &mut self.layers,
                last_sent: &mut self.last_sent,
            },
        )
    }

    /// Converts a handler result, flipping the session to stopping on
    /// failure.
    fn observe(&mut self, opcode: &str, result: HandlerResult) -> Result<()> {
        result.map_err(|source| {
            self.state = State::Stopping;
            Error::Handler {
                opcode: opcode.to_owned(),
                source,
            }
        })
    }
}

impl<T: Transport, H: EventHandler> Drop for Session<T, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Decodes a required integer argument, mapping failures to the non-fatal
/// [`Error::Argument`].
fn arg<N: TryFrom<i64>>(instruction: &Instruction, index: usize) -> Result<N> {
    let value = instruction
        .arg_int(index)
        .map_err(|source| Error::Argument {
            opcode: instruction.opcode.clone(),
            source,
        })?;
    N::try_from(value).map_err(|_| Error::Argument {
        opcode: instruction.opcode.clone(),
        source: vantage_proto::BadArgument {
            index,
            reason: vantage_proto::ArgumentFault::NotAnInteger(value.to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use vantage_proto::{ReadEvent, encode_instruction};

    use super::*;
    use crate::handlers::{HandlerError, NoopHandler};

    /// Scripted transport: queued inbound chunks, captured outbound bytes,
    /// `Closed` once the chunks drain.
    #[derive(Debug, Default)]
    struct ScriptedTransport {
        chunks: VecDeque<Vec<u8>>,
        sent: Vec<u8>,
    }

    impl ScriptedTransport {
        fn with_instructions(frames: &[(&str, &[&str])]) -> Self {
            let mut chunks = VecDeque::new();
            for (opcode, args) in frames {
                let mut frame = Vec::new();
                encode_instruction(&mut frame, opcode, args).unwrap();
                chunks.push_back(frame);
            }
            Self {
                chunks,
                sent: Vec::new(),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn recv(&mut self, buf: &mut [u8], _wait: Duration) -> io::Result<ReadEvent> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(ReadEvent::Data(chunk.len()))
                }
                None => Ok(ReadEvent::Closed),
            }
        }

        fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
            self.sent.extend_from_slice(bytes);
            Ok(())
        }
    }

    /// Handler that records every event it sees.
    #[derive(Debug, Default)]
    struct Recording {
        events: Vec<String>,
        fail_on_key: bool,
        teardowns: usize,
    }

    impl EventHandler for Recording {
        fn handle_messages(&mut self, _ctx: &mut Context<'_>) -> crate::handlers::HandlerResult {
            self.events.push("pump".to_owned());
            Ok(())
        }

        fn mouse(
            &mut self,
            _ctx: &mut Context<'_>,
            x: i32,
            y: i32,
            button_mask: i32,
        ) -> crate::handlers::HandlerResult {
            self.events.push(format!("mouse {x} {y} {button_mask}"));
            Ok(())
        }

        fn key(
            &mut self,
            _ctx: &mut Context<'_>,
            keysym: i32,
            pressed: bool,
        ) -> crate::handlers::HandlerResult {
            if self.fail_on_key {
                return Err(HandlerError("backend lost".to_owned()));
            }
            self.events.push(format!("key {keysym} {pressed}"));
            Ok(())
        }

        fn clipboard(
            &mut self,
            _ctx: &mut Context<'_>,
            text: &str,
        ) -> crate::handlers::HandlerResult {
            self.events.push(format!("clipboard {text}"));
            Ok(())
        }

        fn teardown(&mut self) {
            self.teardowns += 1;
        }
    }

    #[test]
    fn dispatches_events_to_the_handler() {
        let transport = ScriptedTransport::with_instructions(&[
            ("mouse", &["100", "200", "1"]),
            ("key", &["65", "1"]),
            ("clipboard", &["hello"]),
        ]);
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        assert_eq!(
            session.handler().events,
            vec!["mouse 100 200 1", "key 65 true", "clipboard hello"]
        );
        assert_eq!(session.handler().teardowns, 1);
    }

    #[test]
    fn sync_updates_last_received_and_pumps() {
        let transport = ScriptedTransport::with_instructions(&[("sync", &["12345"])]);
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        assert_eq!(session.last_received(), 12345);
        assert_eq!(session.handler().events, vec!["pump"]);
    }

    #[test]
    fn disconnect_flips_state_to_stopping() {
        let transport = ScriptedTransport::with_instructions(&[
            ("disconnect", &[]),
            // Never reached: the loop observes the stop first.
            ("mouse", &["1", "2", "0"]),
        ]);
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        assert_eq!(session.state(), State::Stopping);
        assert!(session.handler().events.is_empty());
    }

    #[test]
    fn bad_numeric_arguments_do_not_end_the_session() {
        let transport = ScriptedTransport::with_instructions(&[
            ("mouse", &["not-a-number", "0", "0"]),
            ("key", &["65", "0"]),
        ]);
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        // The malformed mouse event is dropped; the key event still lands.
        assert_eq!(session.handler().events, vec!["key 65 false"]);
    }

    #[test]
    fn dispatch_reports_argument_errors_as_non_fatal() {
        let transport = ScriptedTransport::default();
        let mut session = Session::new(transport, NoopHandler);
        let err = session
            .dispatch(Instruction::new("key", vec!["x".into(), "1".into()]))
            .unwrap_err();
        assert!(matches!(err, Error::Argument { .. }));
        assert!(!err.is_fatal());
        assert!(session.is_running());
    }

    #[test]
    fn clipboard_without_payload_is_an_argument_error() {
        let transport = ScriptedTransport::with_instructions(&[
            ("clipboard", &[]),
            ("clipboard", &["still here"]),
        ]);
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        // The payload-less instruction is dropped like any other bad
        // argument; the handler never sees an invented empty string.
        assert_eq!(session.handler().events, vec!["clipboard still here"]);

        let err = session
            .dispatch(Instruction::new("clipboard", vec![]))
            .unwrap_err();
        assert!(matches!(err, Error::Argument { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn idle_pump_failure_is_labelled_idle() {
        /// Transport that never produces bytes.
        #[derive(Debug)]
        struct Stalled;

        impl Transport for Stalled {
            fn recv(&mut self, _buf: &mut [u8], _wait: Duration) -> io::Result<ReadEvent> {
                Ok(ReadEvent::WouldBlock)
            }

            fn send(&mut self, _bytes: &[u8]) -> io::Result<()> {
                Ok(())
            }
        }

        /// Handler whose message pump always fails.
        #[derive(Debug)]
        struct FailingPump;

        impl EventHandler for FailingPump {
            fn handle_messages(&mut self, _ctx: &mut Context<'_>) -> crate::handlers::HandlerResult {
                Err(HandlerError("backend gone".to_owned()))
            }
        }

        let mut session = Session::new(Stalled, FailingPump);
        let err = session.run().unwrap_err();
        match err {
            Error::Handler { opcode, .. } => assert_eq!(opcode, "idle"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.state(), State::Stopping);
    }

    #[test]
    fn sync_pump_failure_is_labelled_sync() {
        /// Handler whose message pump always fails.
        #[derive(Debug)]
        struct FailingPump;

        impl EventHandler for FailingPump {
            fn handle_messages(&mut self, _ctx: &mut Context<'_>) -> crate::handlers::HandlerResult {
                Err(HandlerError("backend gone".to_owned()))
            }
        }

        let transport = ScriptedTransport::with_instructions(&[("sync", &["1"])]);
        let mut session = Session::new(transport, FailingPump);
        let err = session.run().unwrap_err();
        match err {
            Error::Handler { opcode, .. } => assert_eq!(opcode, "sync"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_opcodes_are_ignored() {
        let transport = ScriptedTransport::with_instructions(&[
            ("blink", &["twice"]),
            ("key", &["32", "1"]),
        ]);
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        assert_eq!(session.handler().events, vec!["key 32 true"]);
    }

    #[test]
    fn catch_all_receives_unrecognized_instructions() {
        /// Records everything outside the fixed vocabulary.
        #[derive(Debug, Default)]
        struct CatchAll {
            seen: Vec<String>,
        }

        impl EventHandler for CatchAll {
            fn instruction(
                &mut self,
                _ctx: &mut Context<'_>,
                instruction: &Instruction,
            ) -> crate::handlers::HandlerResult {
                self.seen
                    .push(format!("{} {}", instruction.opcode, instruction.args.join(",")));
                Ok(())
            }
        }

        let transport = ScriptedTransport::with_instructions(&[
            ("connect", &["vnc", "localhost"]),
            ("key", &["65", "1"]),
        ]);
        let mut session = Session::new(transport, CatchAll::default());
        session.run().unwrap();
        // The fixed vocabulary is dispatched to its own slot, not here.
        assert_eq!(session.handler().seen, vec!["connect vnc,localhost"]);
    }

    #[test]
    fn handler_failure_stops_the_session() {
        let transport = ScriptedTransport::with_instructions(&[
            ("key", &["65", "1"]),
            ("clipboard", &["never seen"]),
        ]);
        let handler = Recording {
            fail_on_key: true,
            ..Recording::default()
        };
        let mut session = Session::new(transport, handler);
        let err = session.run().unwrap_err();
        assert!(matches!(err, Error::Handler { .. }));
        assert_eq!(session.state(), State::Stopping);
        assert_eq!(session.handler().teardowns, 1);
    }

    #[test]
    fn teardown_runs_exactly_once_across_run_and_drop() {
        let transport = ScriptedTransport::default();
        let mut session = Session::new(transport, Recording::default());
        session.run().unwrap();
        session.teardown();
        assert_eq!(session.handler().teardowns, 1);
    }

    #[test]
    fn context_sync_updates_last_sent() {
        let transport = ScriptedTransport::default();
        let mut session = Session::new(transport, NoopHandler);
        session.context().send_sync(777).unwrap();
        assert_eq!(session.last_sent(), 777);
        assert_eq!(session.transport_mut().sent, b"4.sync,3.777;");
    }

    #[test]
    fn context_manages_session_layers() {
        let transport = ScriptedTransport::default();
        let mut session = Session::new(transport, NoopHandler);
        let mut ctx = session.context();
        let buffer = ctx.alloc_buffer();
        assert_eq!(buffer, -1);
        ctx.alloc_layer(1).unwrap();
        ctx.free_buffer(buffer).unwrap();
        assert!(session.layers().is_live(1));
        assert!(!session.layers().is_live(buffer));
    }

    #[test]
    fn handlers_can_reply_through_the_context() {
        /// Echoes clipboard text back to the viewer.
        #[derive(Debug, Default)]
        struct Echo;

        impl EventHandler for Echo {
            fn clipboard(
                &mut self,
                ctx: &mut Context<'_>,
                text: &str,
            ) -> crate::handlers::HandlerResult {
                ctx.send_clipboard(text)?;
                Ok(())
            }
        }

        let transport = ScriptedTransport::with_instructions(&[("clipboard", &["mirror"])]);
        let mut session = Session::new(transport, Echo);
        session.run().unwrap();
        assert_eq!(session.transport_mut().sent, b"9.clipboard,6.mirror;");
    }
}
