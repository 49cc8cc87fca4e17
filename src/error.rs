use std::fmt::{self, Display};
use std::io;

use crate::model::InputPosition;

/// Classifies what went wrong, so callers can branch on failures without
/// string-matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A strict accessor was called for a kind that isn't active, or an
    /// unsupported conversion was attempted.
    TypeMismatch,
    /// `Object::at` was called with a key that isn't present.
    KeyNotFound,
    /// `Array::at` was called with an index at or past the end.
    IndexOutOfRange,
    /// The parser hit a token that isn't valid where it appeared.
    UnexpectedToken,
    /// A string literal ran off the end of the input.
    UnterminatedString,
    /// A backslash escape (including `\uXXXX` and surrogate pairs) was malformed.
    InvalidEscape,
    /// A number literal was malformed or outside 64-bit signed range, or a
    /// non-finite float was handed to the writer.
    InvalidNumber,
    /// The input ended in the middle of a value.
    UnexpectedEndOfInput,
    /// Nesting went past the configured maximum depth.
    DepthExceeded,
    /// The caller-supplied sink failed during writing.
    Io,
}

/// Error type for every fallible operation in the crate.
///
/// Parser errors carry the input position they were detected at; the position
/// is also baked into the message for display.
#[derive(Debug, Clone)]
pub struct JsonError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<InputPosition>,
}

impl JsonError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, pos: Option<InputPosition>) -> Self {
        let message = message.into();
        let message = if let Some(p) = pos {
            format!("{} at idx={}, row={}, col={}", message, p.index, p.row, p.column)
        } else {
            message
        };
        Self { kind, message, position: pos }
    }

    pub fn simple(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, None)
    }
}

impl Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for JsonError {}

impl From<io::Error> for JsonError {
    fn from(err: io::Error) -> Self {
        Self::simple(ErrorKind::Io, format!("write to sink failed: {}", err))
    }
}
