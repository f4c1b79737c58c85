use crate::codec::{resolve_codec, ArrayCodec, ElementCodec, HasCodec, LineStringCodec};
use crate::error::Result;
use crate::io::stream::{TokenKind, TokenReader, TokenWriter};
use crate::scalar::{LineStringCoordinates, MultiLineStringCoordinates};

/// The top-level codec for the `coordinates` payload of a MultiLineString.
///
/// An absent value (`None`) is written as a single null token and is distinct from an empty
/// multi-line-string, which is written as an empty array. Only this level may be null.
///
/// ```
/// use geojson_bson::codec::{ElementCodec, MultiLineStringCodec};
/// use geojson_bson::io::memory::{Token, TokenBuffer};
///
/// let codec = MultiLineStringCodec::default();
/// let mut buffer = TokenBuffer::new();
/// codec.encode(&mut buffer, &None).unwrap();
/// assert_eq!(buffer.tokens(), &[Token::Null]);
/// assert_eq!(codec.decode(&mut buffer).unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct MultiLineStringCodec<C = LineStringCodec> {
    line_strings: ArrayCodec<C>,
}

impl<C: ElementCodec<Value = LineStringCoordinates>> MultiLineStringCodec<C> {
    /// Create a new codec delegating each line string to `line_string_codec`.
    pub fn new(line_string_codec: C) -> Self {
        Self {
            line_strings: ArrayCodec::new(line_string_codec),
        }
    }
}

impl<C: ElementCodec<Value = LineStringCoordinates>> MultiLineStringCodec<C> {
    /// Encode a borrowed value, without first building an owned `Option`.
    pub fn encode_value(
        &self,
        writer: &mut dyn TokenWriter,
        value: Option<&MultiLineStringCoordinates>,
    ) -> Result<()> {
        match value {
            Some(value) => self
                .line_strings
                .encode_collection(writer, value.line_strings()),
            None => {
                log::debug!("encoding null multi-line-string");
                writer.write_null()
            }
        }
    }
}

impl Default for MultiLineStringCodec {
    fn default() -> Self {
        Self::new(resolve_codec::<LineStringCoordinates>())
    }
}

impl<C: ElementCodec<Value = LineStringCoordinates>> ElementCodec for MultiLineStringCodec<C> {
    type Value = Option<MultiLineStringCoordinates>;

    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value> {
        if reader.current_token_kind()? == TokenKind::Null {
            reader.read_null()?;
            log::debug!("decoded null multi-line-string");
            return Ok(None);
        }

        let line_strings = self.line_strings.decode_collection(reader)?;
        Ok(Some(MultiLineStringCoordinates::new(line_strings)))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()> {
        self.encode_value(writer, value.as_ref())
    }
}

impl HasCodec for Option<MultiLineStringCoordinates> {
    type Codec = MultiLineStringCodec;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CodecError;
    use crate::io::memory::{Token, TokenBuffer};
    use crate::scalar::Coordinates;
    use crate::test::multilinestring::{all, ml_three_then_empty, ml_trailing_empty};

    fn encode(value: &Option<MultiLineStringCoordinates>) -> TokenBuffer {
        let mut buffer = TokenBuffer::new();
        MultiLineStringCodec::default()
            .encode(&mut buffer, value)
            .unwrap();
        buffer
    }

    fn decode(buffer: &mut TokenBuffer) -> Result<Option<MultiLineStringCoordinates>> {
        MultiLineStringCodec::default().decode(buffer)
    }

    #[test]
    fn round_trip_fixtures() {
        for value in all() {
            let mut buffer = encode(&value);
            assert_eq!(decode(&mut buffer).unwrap(), value);
            assert_eq!(buffer.remaining(), 0);
        }
    }

    #[test]
    fn concrete_token_sequence() {
        let value = Some(ml_trailing_empty());
        let mut buffer = encode(&value);
        assert_eq!(
            buffer.tokens(),
            &[
                Token::ArrayStart,
                Token::ArrayStart,
                Token::Coordinates(Coordinates::xy(1., 2.)),
                Token::Coordinates(Coordinates::xy(3., 4.)),
                Token::ArrayEnd,
                Token::ArrayStart,
                Token::ArrayEnd,
                Token::ArrayEnd,
            ]
        );
        assert_eq!(decode(&mut buffer).unwrap(), value);
    }

    #[test]
    fn null_and_empty_are_distinct() {
        let null = encode(&None);
        let empty = encode(&Some(MultiLineStringCoordinates::default()));
        assert_eq!(null.tokens(), &[Token::Null]);
        assert_eq!(empty.tokens(), &[Token::ArrayStart, Token::ArrayEnd]);

        assert_eq!(decode(&mut null.clone()).unwrap(), None);
        assert_eq!(
            decode(&mut empty.clone()).unwrap(),
            Some(MultiLineStringCoordinates::default())
        );
    }

    #[test]
    fn order_is_preserved() {
        let line_strings: Vec<LineStringCoordinates> = [3., 1., 2.]
            .into_iter()
            .map(|x| vec![Coordinates::xy(x, 0.)].into())
            .collect();
        let value = Some(MultiLineStringCoordinates::new(line_strings.clone()));
        let decoded = decode(&mut encode(&value)).unwrap().unwrap();
        assert_eq!(decoded.line_strings(), line_strings.as_slice());
    }

    #[test]
    fn empty_inner_line_string_after_populated_one() {
        let value = ml_three_then_empty();
        let decoded = decode(&mut encode(&Some(value.clone()))).unwrap().unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.line_strings()[0].len(), 3);
        assert!(decoded.line_strings()[1].is_empty());
        assert_eq!(decoded, value);
    }

    #[test]
    fn truncated_input_is_malformed() {
        let mut buffer = TokenBuffer::from_tokens(vec![
            Token::ArrayStart,
            Token::ArrayStart,
            Token::Coordinates(Coordinates::xy(1., 2.)),
            Token::ArrayEnd,
        ]);
        let err = decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
    }

    #[test]
    fn nested_array_in_coordinate_position_is_type_mismatch() {
        let mut buffer = TokenBuffer::from_tokens(vec![
            Token::ArrayStart,
            Token::ArrayStart,
            Token::ArrayStart,
            Token::Coordinates(Coordinates::xy(1., 2.)),
            Token::ArrayEnd,
            Token::ArrayEnd,
            Token::ArrayEnd,
        ]);
        let err = decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch(_)));
    }

    #[test]
    fn coordinate_in_line_string_position_is_malformed() {
        let mut buffer = TokenBuffer::from_tokens(vec![
            Token::ArrayStart,
            Token::Coordinates(Coordinates::xy(1., 2.)),
            Token::ArrayEnd,
        ]);
        let err = decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
    }
}
