use crate::codec::ElementCodec;
use crate::error::{CodecError, Result};
use crate::io::stream::{TokenKind, TokenReader, TokenWriter};

/// Encodes a sequence of values as an array, delegating each element to an inner codec.
///
/// The traversal knows nothing about the shape of its elements beyond the [ElementCodec]
/// contract, so the same loop serves every nesting level.
#[derive(Debug, Clone, Default)]
pub struct ArrayCodec<C> {
    element_codec: C,
}

impl<C: ElementCodec> ArrayCodec<C> {
    pub fn new(element_codec: C) -> Self {
        Self { element_codec }
    }

    pub fn element_codec(&self) -> &C {
        &self.element_codec
    }

    /// Decode an array into a vector, preserving element order.
    ///
    /// An empty array yields an empty vector. Input that ends before the array is closed is
    /// rejected with [CodecError::MalformedStream]; no partial result is ever returned.
    pub fn decode_collection(&self, reader: &mut dyn TokenReader) -> Result<Vec<C::Value>> {
        reader.read_array_start()?;

        let mut values = vec![];
        loop {
            match reader.current_token_kind()? {
                TokenKind::ArrayEnd => {
                    reader.read_array_end()?;
                    break;
                }
                TokenKind::EndOfInput => {
                    return Err(CodecError::MalformedStream(format!(
                        "input ended inside an array after {} element(s)",
                        values.len()
                    )));
                }
                _ => values.push(self.element_codec.decode(reader)?),
            }
        }

        log::trace!("decoded array of {} element(s)", values.len());
        Ok(values)
    }

    /// Encode `values` as an array. An empty slice is still written as an (empty) array.
    pub fn encode_collection(
        &self,
        writer: &mut dyn TokenWriter,
        values: &[C::Value],
    ) -> Result<()> {
        writer.write_array_start()?;
        for value in values {
            self.element_codec.encode(writer, value)?;
        }
        writer.write_array_end()?;

        log::trace!("encoded array of {} element(s)", values.len());
        Ok(())
    }
}

impl<C: ElementCodec> ElementCodec for ArrayCodec<C> {
    type Value = Vec<C::Value>;

    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value> {
        self.decode_collection(reader)
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()> {
        self.encode_collection(writer, value)
    }
}
