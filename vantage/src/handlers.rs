//! Backend capability trait invoked by the dispatcher.
//!
//! A backend driver (VNC, RDP, ...) implements [`EventHandler`] for the
//! events it cares about; every method has a no-op default, so an absent
//! capability is simply not overridden — never an error. Handlers receive
//! a [`Context`](crate::session::Context) giving them the outbound sender
//! vocabulary and the session's layer allocator.

use std::io;

use crate::session::Context;

/// Mouse button bits carried in the pointer-event button mask.
pub mod button {
    /// Left button.
    pub const LEFT: i32 = 0x01;
    /// Middle button.
    pub const MIDDLE: i32 = 0x02;
    /// Right button.
    pub const RIGHT: i32 = 0x04;
    /// Scroll wheel up.
    pub const SCROLL_UP: i32 = 0x08;
    /// Scroll wheel down.
    pub const SCROLL_DOWN: i32 = 0x10;
}

/// A failure signalled by a backend handler.
///
/// Marks the session for shutdown; closing the transport stays the
/// responsibility of the owning loop.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<io::Error> for HandlerError {
    fn from(e: io::Error) -> Self {
        Self(e.to_string())
    }
}

impl From<vantage_proto::Error> for HandlerError {
    fn from(e: vantage_proto::Error) -> Self {
        Self(e.to_string())
    }
}

impl From<crate::error::Error> for HandlerError {
    fn from(e: crate::error::Error) -> Self {
        Self(e.to_string())
    }
}

/// Result type returned by every handler slot.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Optional backend callbacks, dispatched per instruction.
pub trait EventHandler {
    /// Called when the session is otherwise idle (and on `sync` receipt)
    /// to let the backend drain its own upstream protocol and emit any
    /// pending display updates.
    fn handle_messages(&mut self, ctx: &mut Context<'_>) -> HandlerResult {
        let _ = ctx;
        Ok(())
    }

    /// Pointer moved or a button changed; `button_mask` is the bitwise OR
    /// of the [`button`] constants currently held.
    fn mouse(&mut self, ctx: &mut Context<'_>, x: i32, y: i32, button_mask: i32) -> HandlerResult {
        let _ = (ctx, x, y, button_mask);
        Ok(())
    }

    /// Key pressed (`pressed == true`) or released, identified by X11
    /// keysym.
    fn key(&mut self, ctx: &mut Context<'_>, keysym: i32, pressed: bool) -> HandlerResult {
        let _ = (ctx, keysym, pressed);
        Ok(())
    }

    /// The viewer set new clipboard contents; `text` is already unescaped.
    fn clipboard(&mut self, ctx: &mut Context<'_>, text: &str) -> HandlerResult {
        let _ = (ctx, text);
        Ok(())
    }

    /// Catch-all for instructions outside the fixed dispatch vocabulary.
    ///
    /// The default ignores the instruction — an unrecognized opcode is not
    /// an error.
    fn instruction(
        &mut self,
        ctx: &mut Context<'_>,
        instruction: &vantage_proto::Instruction,
    ) -> HandlerResult {
        let _ = (ctx, instruction);
        Ok(())
    }

    /// The session is being torn down; release backend resources. Called
    /// exactly once, after the last dispatch.
    fn teardown(&mut self) {}
}

/// A handler with every capability left at its no-op default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl EventHandler for NoopHandler {}
