use crate::codec::{ElementCodec, HasCodec};
use crate::error::{CodecError, Result};
use crate::io::stream::{TokenKind, TokenReader, TokenWriter};
use crate::scalar::Coordinates;

/// The leaf codec: a single coordinate tuple.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateCodec;

impl ElementCodec for CoordinateCodec {
    type Value = Coordinates;

    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value> {
        match reader.current_token_kind()? {
            TokenKind::Value => reader.read_coordinates(),
            TokenKind::EndOfInput => Err(CodecError::MalformedStream(
                "expected a coordinate tuple, found end of input".to_string(),
            )),
            // Coordinates are never null
            other => Err(CodecError::TypeMismatch(format!(
                "expected a coordinate tuple, found {other}"
            ))),
        }
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()> {
        writer.write_coordinates(value)
    }
}

impl HasCodec for Coordinates {
    type Codec = CoordinateCodec;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::memory::{Token, TokenBuffer};

    #[test]
    fn nested_array_is_type_mismatch() {
        let mut buffer = TokenBuffer::from_tokens(vec![Token::ArrayStart, Token::ArrayEnd]);
        let err = CoordinateCodec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch(_)));
    }

    #[test]
    fn null_is_type_mismatch() {
        let mut buffer = TokenBuffer::from_tokens(vec![Token::Null]);
        let err = CoordinateCodec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch(_)));
    }

    #[test]
    fn end_of_input_is_malformed() {
        let mut buffer = TokenBuffer::new();
        let err = CoordinateCodec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
    }

    #[test]
    fn writes_a_single_token() {
        let mut buffer = TokenBuffer::new();
        CoordinateCodec
            .encode(&mut buffer, &Coordinates::xyz(1., 2., 3.))
            .unwrap();
        assert_eq!(
            buffer.tokens(),
            &[Token::Coordinates(Coordinates::xyz(1., 2., 3.))]
        );
    }
}
