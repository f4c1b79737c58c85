use std::io::Cursor;

use crate::codec::{ElementCodec, MultiLineStringCodec};
use crate::error::{CodecError, Result};
use crate::io::binary::{BinaryReader, BinaryWriter};
use crate::io::stream::{TokenKind, TokenReader};
use crate::options::DecodeOptions;
use crate::scalar::MultiLineStringCoordinates;

/// Encode a MultiLineString coordinates payload, or its absence, to bytes.
pub fn to_bytes(value: Option<&MultiLineStringCoordinates>) -> Result<Vec<u8>> {
    let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
    MultiLineStringCodec::default().encode_value(&mut writer, value)?;
    Ok(writer.finish()?.into_inner())
}

/// Decode a MultiLineString coordinates payload from bytes.
///
/// The buffer must hold exactly one payload; trailing bytes are rejected.
pub fn from_bytes(buf: &[u8]) -> Result<Option<MultiLineStringCoordinates>> {
    from_bytes_with_options(buf, DecodeOptions::default())
}

/// Decode a MultiLineString coordinates payload from bytes with the given options.
pub fn from_bytes_with_options(
    buf: &[u8],
    options: DecodeOptions,
) -> Result<Option<MultiLineStringCoordinates>> {
    let mut reader = BinaryReader::with_options(buf, options);
    let value = MultiLineStringCodec::default().decode(&mut reader)?;
    match reader.current_token_kind()? {
        TokenKind::EndOfInput => Ok(value),
        kind => Err(CodecError::MalformedStream(format!(
            "unexpected {kind} after the end of the payload at byte {}",
            reader.position() - 1
        ))),
    }
}
