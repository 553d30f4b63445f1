//! Instruction, composite-mode, and timestamp types.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, as carried by `sync` instructions.
pub type Timestamp = i64;

/// Returns the current [`Timestamp`].
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}

/// A single parsed instruction: an opcode plus its ordered arguments.
///
/// Arguments are stored unescaped; the parser removes wire escaping as each
/// element completes, so handlers never see escaped text. The codec is
/// arity-agnostic — argument counts are a per-opcode protocol convention
/// enforced by the dispatch layer, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The opcode naming the instruction's kind.
    pub opcode: String,
    /// Ordered argument list, already unescaped.
    pub args: Vec<String>,
}

impl Instruction {
    /// Creates an instruction from an opcode and arguments.
    pub fn new(opcode: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            opcode: opcode.into(),
            args,
        }
    }

    /// Returns argument `index` as text, or `None` if absent.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Decodes argument `index` as a decimal integer.
    ///
    /// Returns the offending text on failure so the dispatch layer can
    /// report which argument was malformed without aborting the session.
    pub fn arg_int(&self, index: usize) -> Result<i64, BadArgument> {
        let text = self.args.get(index).ok_or(BadArgument {
            index,
            reason: ArgumentFault::Missing,
        })?;
        text.parse().map_err(|_| BadArgument {
            index,
            reason: ArgumentFault::NotAnInteger(text.clone()),
        })
    }
}

/// Why a positional argument could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgumentFault {
    /// The instruction carried fewer arguments than the opcode requires.
    Missing,
    /// The argument text was not a well-formed decimal integer.
    NotAnInteger(String),
}

impl fmt::Display for ArgumentFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::NotAnInteger(text) => write!(f, "not an integer: {text:?}"),
        }
    }
}

/// A positional argument that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("argument {index}: {reason}")]
pub struct BadArgument {
    /// Zero-based argument position.
    pub index: usize,
    /// What went wrong.
    pub reason: ArgumentFault,
}

/// Composite modes used by drawing instructions.
///
/// Each mode is a 4-bit channel mask over, from most to least significant
/// bit: source where destination is transparent, source where destination
/// is opaque, destination where source is transparent, destination where
/// source is opaque. Only the 12 masks below are defined; the remaining
/// four combinations are reserved and rejected on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum CompositeMode {
    /// Destination where source is opaque (`0001`).
    ReverseIn = 0x1,
    /// Destination where source is transparent (`0010`).
    ReverseOut = 0x2,
    /// Destination only (`0011`).
    Dest = 0x3,
    /// Source where destination is opaque (`0100`).
    In = 0x4,
    /// Source atop destination (`0110`).
    Atop = 0x6,
    /// Source where destination is transparent (`1000`).
    Out = 0x8,
    /// Destination atop source (`1001`).
    ReverseAtop = 0x9,
    /// Source or destination where exactly one is opaque (`1010`).
    Xor = 0xA,
    /// Destination over source (`1011`).
    ReverseOver = 0xB,
    /// Source only (`1100`).
    Src = 0xC,
    /// Source over destination (`1110`).
    Over = 0xE,
    /// Source plus destination (`1111`).
    Plus = 0xF,
}

impl CompositeMode {
    /// The 4-bit wire encoding of this mode.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mask())
    }
}

/// A composite-mode value outside the 12 defined channel masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("composite mask {0:#06b} is reserved or out of range")]
pub struct ReservedMask(pub u8);

impl TryFrom<u8> for CompositeMode {
    type Error = ReservedMask;

    fn try_from(mask: u8) -> Result<Self, Self::Error> {
        match mask {
            0x1 => Ok(Self::ReverseIn),
            0x2 => Ok(Self::ReverseOut),
            0x3 => Ok(Self::Dest),
            0x4 => Ok(Self::In),
            0x6 => Ok(Self::Atop),
            0x8 => Ok(Self::Out),
            0x9 => Ok(Self::ReverseAtop),
            0xA => Ok(Self::Xor),
            0xB => Ok(Self::ReverseOver),
            0xC => Ok(Self::Src),
            0xE => Ok(Self::Over),
            0xF => Ok(Self::Plus),
            other => Err(ReservedMask(other)),
        }
    }
}
