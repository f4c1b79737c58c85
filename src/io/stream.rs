//! The minimal token stream contract that every codec in this crate is written against.
//!
//! Transports (an in-memory token buffer, the length-delimited binary encoding, or anything else)
//! implement [TokenReader] and [TokenWriter]; the codecs never touch bytes directly.

use std::fmt::Display;

use crate::error::Result;
use crate::scalar::Coordinates;

/// The kind of the next token in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An explicit null.
    Null,

    /// The start of an array.
    ArrayStart,

    /// The end of the innermost open array.
    ArrayEnd,

    /// A value-bearing token, i.e. a coordinate tuple.
    Value,

    /// There are no more tokens.
    EndOfInput,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Null => write!(f, "null"),
            TokenKind::ArrayStart => write!(f, "array start"),
            TokenKind::ArrayEnd => write!(f, "array end"),
            TokenKind::Value => write!(f, "value"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A sequential source of tokens.
pub trait TokenReader {
    /// Peek at the kind of the next token without consuming it.
    ///
    /// Takes `&mut self` because a streaming transport may need to pull bytes to find out.
    fn current_token_kind(&mut self) -> Result<TokenKind>;

    /// Consume a null token.
    fn read_null(&mut self) -> Result<()>;

    /// Consume an array start marker.
    fn read_array_start(&mut self) -> Result<()>;

    /// Consume an array end marker.
    fn read_array_end(&mut self) -> Result<()>;

    /// Consume a coordinate tuple.
    fn read_coordinates(&mut self) -> Result<Coordinates>;
}

/// A sequential sink of tokens.
pub trait TokenWriter {
    fn write_null(&mut self) -> Result<()>;

    fn write_array_start(&mut self) -> Result<()>;

    fn write_array_end(&mut self) -> Result<()>;

    fn write_coordinates(&mut self, coords: &Coordinates) -> Result<()>;
}
