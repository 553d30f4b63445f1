//! Typed senders for the outbound instruction vocabulary.
//!
//! Thin builders over [`encode_instruction`]: free-text fields are escaped
//! by the encoder, numeric fields are formatted as decimal text (reserved
//! bytes cannot occur in them), and image payloads are base64-transcoded
//! for the text wire. Every sender returns the underlying write result;
//! none retries.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::Result;
use crate::codec::encode_instruction;
use crate::instruction::{CompositeMode, Timestamp};
use crate::transport::Transport;

/// Encodes one instruction and sends the frame through `transport`.
fn send_raw<T: Transport + ?Sized>(transport: &mut T, opcode: &str, args: &[&str]) -> Result<()> {
    let mut frame = Vec::new();
    encode_instruction(&mut frame, opcode, args)?;
    transport.send(&frame)?;
    Ok(())
}

/// Sends an `args` instruction listing the argument names the backend
/// expects during the connect handshake.
pub fn send_args<T: Transport + ?Sized>(transport: &mut T, names: &[&str]) -> Result<()> {
    send_raw(transport, "args", names)
}

/// Sends a `name` instruction carrying the session's human-readable name.
pub fn send_name<T: Transport + ?Sized>(transport: &mut T, name: &str) -> Result<()> {
    send_raw(transport, "name", &[name])
}

/// Sends a `size` instruction announcing the display dimensions.
pub fn send_size<T: Transport + ?Sized>(transport: &mut T, width: u32, height: u32) -> Result<()> {
    send_raw(
        transport,
        "size",
        &[&width.to_string(), &height.to_string()],
    )
}

/// Sends a `sync` instruction carrying a millisecond timestamp.
pub fn send_sync<T: Transport + ?Sized>(transport: &mut T, timestamp: Timestamp) -> Result<()> {
    send_raw(transport, "sync", &[&timestamp.to_string()])
}

/// Sends an `error` instruction with a human-readable description.
pub fn send_error<T: Transport + ?Sized>(transport: &mut T, message: &str) -> Result<()> {
    send_raw(transport, "error", &[message])
}

/// Sends a `clipboard` instruction carrying clipboard text.
pub fn send_clipboard<T: Transport + ?Sized>(transport: &mut T, data: &str) -> Result<()> {
    send_raw(transport, "clipboard", &[data])
}

/// Sends a `copy` instruction: composite a source rectangle onto a
/// destination layer at the given point.
#[allow(clippy::too_many_arguments)]
pub fn send_copy<T: Transport + ?Sized>(
    transport: &mut T,
    src_layer: i32,
    src_x: i32,
    src_y: i32,
    width: u32,
    height: u32,
    mode: CompositeMode,
    dst_layer: i32,
    dst_x: i32,
    dst_y: i32,
) -> Result<()> {
    send_raw(
        transport,
        "copy",
        &[
            &src_layer.to_string(),
            &src_x.to_string(),
            &src_y.to_string(),
            &width.to_string(),
            &height.to_string(),
            &mode.to_string(),
            &dst_layer.to_string(),
            &dst_x.to_string(),
            &dst_y.to_string(),
        ],
    )
}

/// Sends a `png` instruction blitting pre-encoded image bytes onto a layer.
///
/// The codec never inspects pixel content; `image` is an opaque
/// already-encoded blob produced by the graphics collaborator.
pub fn send_png<T: Transport + ?Sized>(
    transport: &mut T,
    mode: CompositeMode,
    layer: i32,
    x: i32,
    y: i32,
    image: &[u8],
) -> Result<()> {
    send_raw(
        transport,
        "png",
        &[
            &mode.to_string(),
            &layer.to_string(),
            &x.to_string(),
            &y.to_string(),
            &BASE64.encode(image),
        ],
    )
}

/// Sends a `cursor` instruction defining the pointer image and hotspot.
pub fn send_cursor<T: Transport + ?Sized>(
    transport: &mut T,
    hotspot_x: i32,
    hotspot_y: i32,
    image: &[u8],
) -> Result<()> {
    send_raw(
        transport,
        "cursor",
        &[
            &hotspot_x.to_string(),
            &hotspot_y.to_string(),
            &BASE64.encode(image),
        ],
    )
}
