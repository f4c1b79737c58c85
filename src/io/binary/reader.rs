use std::io::{ErrorKind, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use num_enum::TryFromPrimitive;

use crate::datatypes::Dimension;
use crate::error::{CodecError, Result};
use crate::io::binary::common::ElementTag;
use crate::io::stream::{TokenKind, TokenReader};
use crate::options::DecodeOptions;
use crate::scalar::Coordinates;

/// The peeked state of the reader.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Peeked {
    Tag(ElementTag),
    EndOfInput,
}

/// Reads tokens from the length-delimited binary encoding.
///
/// Only ever holds one element tag of lookahead, so arbitrarily large payloads can be decoded
/// straight from a file or socket. Every array length prefix is checked against the bytes actually
/// consumed when its end marker is read.
#[derive(Debug)]
pub struct BinaryReader<R> {
    reader: R,
    options: DecodeOptions,

    /// Bytes consumed from `reader` so far
    position: u64,

    /// A tag that has been read from `reader` but whose token has not been consumed yet
    peeked: Option<Peeked>,

    /// The position at which each currently open array must end
    array_ends: Vec<u64>,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            reader,
            options,
            position: 0,
            peeked: None,
            array_ends: vec![],
        }
    }

    /// The number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The number of arrays opened but not yet closed.
    pub fn depth(&self) -> usize {
        self.array_ends.len()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_u8(&mut self) -> Result<u8> {
        let value = self.reader.read_u8().map_err(premature_end)?;
        self.position += 1;
        Ok(value)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let value = self
            .reader
            .read_u32::<LittleEndian>()
            .map_err(premature_end)?;
        self.position += 4;
        Ok(value)
    }

    fn read_f64(&mut self) -> Result<f64> {
        let value = self
            .reader
            .read_f64::<LittleEndian>()
            .map_err(premature_end)?;
        self.position += 8;
        Ok(value)
    }

    fn peek(&mut self) -> Result<Peeked> {
        if let Some(peeked) = self.peeked {
            return Ok(peeked);
        }

        let peeked = match self.reader.read_u8() {
            Ok(byte) => {
                self.position += 1;
                let tag = ElementTag::try_from_primitive(byte).map_err(|_| {
                    CodecError::MalformedStream(format!(
                        "unknown element tag {byte:#04x} at byte {}",
                        self.position - 1
                    ))
                })?;
                if let Some(end) = self.array_ends.last() {
                    if self.position > *end {
                        return Err(CodecError::MalformedStream(format!(
                            "element at byte {} overruns its enclosing array ending at byte {end}",
                            self.position - 1
                        )));
                    }
                }
                Peeked::Tag(tag)
            }
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => Peeked::EndOfInput,
            Err(err) => return Err(err.into()),
        };
        self.peeked = Some(peeked);
        Ok(peeked)
    }

    /// Consume the peeked tag if it is `expected`.
    fn expect_marker(&mut self, expected: ElementTag) -> Result<()> {
        match self.peek()? {
            Peeked::Tag(tag) if tag == expected => {
                self.peeked = None;
                Ok(())
            }
            Peeked::Tag(tag) => Err(CodecError::MalformedStream(format!(
                "expected {}, found {} at byte {}",
                TokenKind::from(expected),
                TokenKind::from(tag),
                self.position - 1
            ))),
            Peeked::EndOfInput => Err(CodecError::MalformedStream(format!(
                "expected {}, found end of input",
                TokenKind::from(expected)
            ))),
        }
    }
}

fn premature_end(err: std::io::Error) -> CodecError {
    if err.kind() == ErrorKind::UnexpectedEof {
        CodecError::MalformedStream("premature end of input".to_string())
    } else {
        err.into()
    }
}

impl<R: Read> TokenReader for BinaryReader<R> {
    fn current_token_kind(&mut self) -> Result<TokenKind> {
        match self.peek()? {
            Peeked::Tag(tag) => Ok(tag.into()),
            Peeked::EndOfInput => Ok(TokenKind::EndOfInput),
        }
    }

    fn read_null(&mut self) -> Result<()> {
        self.expect_marker(ElementTag::Null)
    }

    fn read_array_start(&mut self) -> Result<()> {
        self.expect_marker(ElementTag::ArrayStart)?;
        if self.array_ends.len() >= self.options.max_depth {
            log::warn!(
                "rejecting binary stream nested deeper than {}",
                self.options.max_depth
            );
            return Err(CodecError::MalformedStream(format!(
                "array nesting exceeds maximum depth of {}",
                self.options.max_depth
            )));
        }

        let body_length = self.read_u32()?;
        if body_length == 0 {
            return Err(CodecError::MalformedStream(format!(
                "array at byte {} has a zero body length",
                self.position - 5
            )));
        }

        let end = self.position + u64::from(body_length);
        if let Some(enclosing_end) = self.array_ends.last() {
            if end > *enclosing_end {
                return Err(CodecError::MalformedStream(format!(
                    "array ending at byte {end} overruns its enclosing array ending at byte {enclosing_end}"
                )));
            }
        }
        self.array_ends.push(end);
        Ok(())
    }

    fn read_array_end(&mut self) -> Result<()> {
        self.expect_marker(ElementTag::ArrayEnd)?;
        let end = self.array_ends.pop().ok_or_else(|| {
            CodecError::MalformedStream("array end without a matching array start".to_string())
        })?;
        if self.position != end {
            let message = format!(
                "array length prefix says it ends at byte {end}, but it ended at byte {}",
                self.position
            );
            log::warn!("{message}");
            return Err(CodecError::MalformedStream(message));
        }
        Ok(())
    }

    fn read_coordinates(&mut self) -> Result<Coordinates> {
        match self.peek()? {
            Peeked::Tag(ElementTag::Coordinates) => self.peeked = None,
            Peeked::Tag(tag) => {
                return Err(CodecError::TypeMismatch(format!(
                    "expected coordinates, found {} at byte {}",
                    TokenKind::from(tag),
                    self.position - 1
                )))
            }
            Peeked::EndOfInput => {
                return Err(CodecError::MalformedStream(
                    "expected coordinates, found end of input".to_string(),
                ))
            }
        }

        let arity = self.read_u8()?;
        let dim = Dimension::from_size(arity.into()).ok_or_else(|| {
            CodecError::TypeMismatch(format!(
                "coordinate tuple at byte {} has {arity} values, expected 2 or 3",
                self.position - 2
            ))
        })?;
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        let coords = match dim {
            Dimension::XY => Coordinates::xy(x, y),
            Dimension::XYZ => Coordinates::xyz(x, y, self.read_f64()?),
        };

        if let Some(end) = self.array_ends.last() {
            if self.position > *end {
                return Err(CodecError::MalformedStream(format!(
                    "coordinates overrun their enclosing array ending at byte {end}"
                )));
            }
        }
        Ok(coords)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::io::binary::BinaryWriter;
    use crate::io::stream::TokenWriter;

    fn encode(f: impl FnOnce(&mut BinaryWriter<Cursor<Vec<u8>>>)) -> Vec<u8> {
        let mut writer = BinaryWriter::new(Cursor::new(Vec::new()));
        f(&mut writer);
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn reads_back_written_tokens() {
        let buf = encode(|w| {
            w.write_array_start().unwrap();
            w.write_coordinates(&Coordinates::xyz(1., 2., 3.)).unwrap();
            w.write_null().unwrap();
            w.write_array_end().unwrap();
        });

        let mut reader = BinaryReader::new(buf.as_slice());
        assert_eq!(reader.current_token_kind().unwrap(), TokenKind::ArrayStart);
        reader.read_array_start().unwrap();
        assert_eq!(reader.depth(), 1);
        assert_eq!(reader.current_token_kind().unwrap(), TokenKind::Value);
        assert_eq!(
            reader.read_coordinates().unwrap(),
            Coordinates::xyz(1., 2., 3.)
        );
        reader.read_null().unwrap();
        reader.read_array_end().unwrap();
        assert_eq!(reader.current_token_kind().unwrap(), TokenKind::EndOfInput);
        assert_eq!(reader.position(), buf.len() as u64);
    }

    #[test]
    fn unknown_tag() {
        let buf = [0x7Fu8];
        let mut reader = BinaryReader::new(buf.as_slice());
        assert!(matches!(
            reader.current_token_kind().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn truncated_length_prefix() {
        let buf = [0x04u8, 1, 0];
        let mut reader = BinaryReader::new(buf.as_slice());
        assert!(matches!(
            reader.read_array_start().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn truncated_coordinates() {
        let mut buf = vec![0x01u8, 2];
        buf.extend_from_slice(&1.0f64.to_le_bytes());
        let mut reader = BinaryReader::new(buf.as_slice());
        assert!(matches!(
            reader.read_coordinates().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn bad_arity_is_type_mismatch() {
        let mut buf = vec![0x01u8, 4];
        buf.extend(std::iter::repeat(0).take(32));
        let mut reader = BinaryReader::new(buf.as_slice());
        assert!(matches!(
            reader.read_coordinates().unwrap_err(),
            CodecError::TypeMismatch(_)
        ));
    }

    #[test]
    fn length_prefix_mismatch() {
        // Claims a 3 byte body, but the end tag comes right away
        let buf = [0x04u8, 3, 0, 0, 0, 0x00];
        let mut reader = BinaryReader::new(buf.as_slice());
        reader.read_array_start().unwrap();
        assert!(matches!(
            reader.read_array_end().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn element_overrunning_array() {
        // Claims a 1 byte body (only room for the end tag) but contains a null first
        let buf = [0x04u8, 1, 0, 0, 0, 0x0A, 0x00];
        let mut reader = BinaryReader::new(buf.as_slice());
        reader.read_array_start().unwrap();
        reader.current_token_kind().unwrap();
        reader.read_null().unwrap();
        assert!(matches!(
            reader.current_token_kind().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn nested_array_overrunning_parent() {
        let buf = [0x04u8, 6, 0, 0, 0, 0x04, 9, 0, 0, 0, 0x00, 0x00];
        let mut reader = BinaryReader::new(buf.as_slice());
        reader.read_array_start().unwrap();
        assert!(matches!(
            reader.read_array_start().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }

    #[test]
    fn max_depth() {
        let buf = encode(|w| {
            for _ in 0..3 {
                w.write_array_start().unwrap();
            }
            for _ in 0..3 {
                w.write_array_end().unwrap();
            }
        });
        let mut reader = BinaryReader::with_options(
            buf.as_slice(),
            DecodeOptions::default().with_max_depth(2),
        );
        reader.read_array_start().unwrap();
        reader.read_array_start().unwrap();
        assert!(matches!(
            reader.read_array_start().unwrap_err(),
            CodecError::MalformedStream(_)
        ));
    }
}
