use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::io::stream::TokenKind;

/// Bytes taken by an array length prefix.
pub(crate) const LENGTH_PREFIX_BYTES: u64 = 4;

/// The element tags of the binary encoding.
///
/// Null, array start and array end reuse the BSON type bytes; a coordinate tuple is a single
/// element rather than a nested array of doubles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ElementTag {
    /// Closes the innermost open array
    ArrayEnd = 0x00,
    /// A coordinate tuple: a u8 arity, then that many f64 values
    Coordinates = 0x01,
    /// Opens an array: followed by a u32 body length
    ArrayStart = 0x04,
    /// An explicit null
    Null = 0x0A,
}

impl From<ElementTag> for TokenKind {
    fn from(value: ElementTag) -> Self {
        match value {
            ElementTag::ArrayEnd => TokenKind::ArrayEnd,
            ElementTag::Coordinates => TokenKind::Value,
            ElementTag::ArrayStart => TokenKind::ArrayStart,
            ElementTag::Null => TokenKind::Null,
        }
    }
}
