//! Reserved-byte escaping for instruction element text.
//!
//! The framing layer length-prefixes every element, so delimiter collisions
//! cannot confuse the parser; escaping is the secondary safety net that
//! keeps element text unambiguous if it is ever logged or re-tokenized.

use std::borrow::Cow;

/// The escape character.
const ESCAPE: char = '\\';

/// Returns whether `c` must be escaped inside element text.
const fn is_reserved(c: char) -> bool {
    matches!(c, ',' | ';' | '\\')
}

/// Escapes element text for transmission.
///
/// Every `,`, `;`, and `\` is prefixed with `\`; all other bytes pass
/// through untouched. Returns `Cow::Borrowed` when the input contains no
/// reserved characters, which is the common case for opcodes and numeric
/// arguments.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(is_reserved) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if is_reserved(c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Reverses [`escape`].
///
/// The result is never longer than the input. A lone trailing `\` with
/// nothing after it is kept as a literal backslash rather than rejected;
/// length-prefixed framing means such input can only come from a peer that
/// escaped incorrectly, and dropping the byte would be worse than keeping it.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ESCAPE),
            }
        } else {
            out.push(c);
        }
    }
    out
}
