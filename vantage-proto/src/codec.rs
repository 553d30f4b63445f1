//! Instruction framing: encoder and incremental parser.
//!
//! An instruction is transmitted as `opcode (',' element)* ';'` where every
//! element, opcode included, is `decimal-length '.' escaped-bytes`. Lengths
//! count the escaped byte form, so the parser never scans argument text for
//! delimiters — it counts the declared bytes and then expects the separator
//! literally.

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::escape::{escape, unescape};
use crate::instruction::Instruction;
use crate::transport::{ReadEvent, Transport};
use crate::{Error, Result};

/// How long an instruction may remain incomplete before the session is
/// treated as failed.
pub const INSTRUCTION_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Maximum declared length of a single element (8 MiB).
///
/// A hostile length prefix must not be able to force unbounded buffering.
pub const MAX_ELEMENT_LEN: usize = 8 * 1024 * 1024;

/// Upper bound on a single bounded wait inside [`Parser::poll`], so the
/// caller can observe a cooperative stop between attempts.
const POLL_WAIT: Duration = Duration::from_millis(500);

/// Read-buffer size per transport attempt.
const READ_CHUNK: usize = 8192;

/// Encodes one instruction and writes it to `w`.
///
/// Each element is escaped, length-prefixed on the escaped form, and joined
/// with `,`; the instruction is terminated with `;`. The frame is written
/// with a single `write_all`; write failures propagate unmodified and
/// nothing is retried here.
pub fn encode_instruction<W: Write>(w: &mut W, opcode: &str, args: &[&str]) -> Result<()> {
    let mut frame = String::with_capacity(16 + opcode.len() + args.len() * 8);
    push_element(&mut frame, opcode);
    for arg in args {
        frame.push(',');
        push_element(&mut frame, arg);
    }
    frame.push(';');
    w.write_all(frame.as_bytes())?;
    Ok(())
}

/// Appends `len '.' escaped-bytes` for one element.
fn push_element(frame: &mut String, text: &str) {
    let escaped = escape(text);
    frame.push_str(&escaped.len().to_string());
    frame.push('.');
    frame.push_str(&escaped);
}

/// Incremental instruction parser for one stream session.
///
/// Bytes are accumulated across [`feed`](Self::feed) calls and complete
/// elements are consumed as soon as their declared byte count and separator
/// have arrived. A per-instruction deadline is armed when the first byte of
/// a new instruction is seen and cleared only when the instruction
/// completes; an instruction still incomplete at the deadline is a
/// [`Error::Timeout`], after which the session must be treated as closed.
#[derive(Debug)]
pub struct Parser {
    /// Unconsumed bytes, starting at the current element boundary.
    buf: Vec<u8>,
    /// Completed (unescaped) elements of the instruction in progress.
    elements: Vec<String>,
    /// Absolute completion deadline for the instruction in progress.
    deadline: Option<Instant>,
    /// Per-instruction completion bound.
    timeout: Duration,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser with the protocol-default [`INSTRUCTION_TIMEOUT`].
    pub fn new() -> Self {
        Self::with_timeout(INSTRUCTION_TIMEOUT)
    }

    /// Creates a parser with a caller-chosen per-instruction timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            buf: Vec::new(),
            elements: Vec::new(),
            deadline: None,
            timeout,
        }
    }

    /// Returns whether the parser sits at an instruction boundary with no
    /// partial input buffered.
    ///
    /// End-of-stream in this state is a clean disconnect; mid-instruction
    /// it is a truncation failure.
    pub fn is_idle(&self) -> bool {
        self.buf.is_empty() && self.elements.is_empty()
    }

    /// Appends raw bytes received from the transport.
    ///
    /// Arms the instruction deadline if these are the first bytes of a new
    /// instruction. An already-armed deadline is never reset.
    pub fn feed(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.buf.extend_from_slice(bytes);
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.timeout);
        }
    }

    /// Consumes as many complete elements as the buffer holds and returns
    /// the next full instruction, if any.
    ///
    /// Trailing bytes beyond the terminating `;` belong to the following
    /// instruction and are retained; if any are present the deadline for
    /// that instruction is armed immediately.
    pub fn next_instruction(&mut self) -> Result<Option<Instruction>> {
        let mut pos = 0;
        loop {
            match self.parse_element(pos)? {
                None => {
                    // Incomplete element: drop consumed bytes, keep state.
                    self.buf.drain(..pos);
                    return Ok(None);
                }
                Some((element, terminated, next_pos)) => {
                    self.elements.push(element);
                    pos = next_pos;
                    if terminated {
                        self.buf.drain(..pos);
                        self.deadline = if self.buf.is_empty() {
                            None
                        } else {
                            Some(Instant::now() + self.timeout)
                        };
                        let mut elements = std::mem::take(&mut self.elements);
                        let opcode = elements.remove(0);
                        if opcode.is_empty() {
                            return Err(Error::Malformed("empty opcode".into()));
                        }
                        trace!(opcode = %opcode, argc = elements.len(), "parsed instruction");
                        return Ok(Some(Instruction::new(opcode, elements)));
                    }
                }
            }
        }
    }

    /// Attempts to parse one `length '.' bytes separator` element at `pos`.
    ///
    /// Returns `Ok(None)` when more bytes are needed, otherwise the
    /// unescaped element text, whether its separator was the terminating
    /// `;`, and the position just past the separator.
    fn parse_element(&self, pos: usize) -> Result<Option<(String, bool, usize)>> {
        let buf = &self.buf[pos..];

        // Decimal length prefix.
        let mut len: usize = 0;
        let mut digits = 0;
        for (i, &b) in buf.iter().enumerate() {
            match b {
                b'0'..=b'9' => {
                    len = len * 10 + usize::from(b - b'0');
                    digits += 1;
                    if len > MAX_ELEMENT_LEN {
                        return Err(Error::Malformed(format!(
                            "element length {len} exceeds {MAX_ELEMENT_LEN}"
                        )));
                    }
                }
                b'.' if digits > 0 => {
                    let body = i + 1;
                    // Declared bytes plus the separator after them.
                    let Some(&sep) = buf.get(body + len) else {
                        return Ok(None);
                    };
                    let text = std::str::from_utf8(&buf[body..body + len]).map_err(|_| {
                        Error::Malformed("element text is not valid UTF-8".into())
                    })?;
                    let terminated = match sep {
                        b',' => false,
                        b';' => true,
                        other => {
                            return Err(Error::Malformed(format!(
                                "expected ',' or ';' after element, found {:?}",
                                other as char
                            )));
                        }
                    };
                    return Ok(Some((unescape(text), terminated, pos + body + len + 1)));
                }
                _ => {
                    return Err(Error::Malformed(format!(
                        "invalid byte {:?} in element length",
                        b as char
                    )));
                }
            }
        }
        // Ran out of bytes while still reading the length prefix.
        Ok(None)
    }

    /// Performs one bounded read-and-parse pass against `transport`.
    ///
    /// Returns `Ok(Some(_))` when a full instruction is available,
    /// `Ok(None)` when more bytes are still awaited and the deadline has
    /// not passed. [`Error::Timeout`] and [`Error::Closed`] are terminal;
    /// so is any grammar violation.
    pub fn poll<T: Transport>(&mut self, transport: &mut T) -> Result<Option<Instruction>> {
        if let Some(instruction) = self.next_instruction()? {
            return Ok(Some(instruction));
        }

        let wait = match self.deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(self.expire());
                }
                remaining.min(POLL_WAIT)
            }
            None => POLL_WAIT,
        };

        let mut chunk = [0u8; READ_CHUNK];
        match transport.recv(&mut chunk, wait)? {
            ReadEvent::Data(n) => {
                self.feed(&chunk[..n]);
                if let Some(instruction) = self.next_instruction()? {
                    return Ok(Some(instruction));
                }
            }
            ReadEvent::WouldBlock => {}
            ReadEvent::Closed => return Err(Error::Closed),
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(self.expire()),
            _ => Ok(None),
        }
    }

    /// Drives [`poll`](Self::poll) until an instruction arrives or a
    /// terminal failure occurs. Blocks, bounded by the instruction deadline
    /// once one is armed.
    pub fn read_instruction<T: Transport>(&mut self, transport: &mut T) -> Result<Instruction> {
        loop {
            if let Some(instruction) = self.poll(transport)? {
                return Ok(instruction);
            }
        }
    }

    /// Builds the timeout error for an expired deadline.
    #[allow(clippy::cast_possible_truncation)]
    fn expire(&self) -> Error {
        Error::Timeout(self.timeout.as_millis() as u64)
    }
}
