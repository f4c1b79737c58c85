use crate::codec::{resolve_codec, ArrayCodec, CoordinateCodec, ElementCodec, HasCodec};
use crate::error::Result;
use crate::io::stream::{TokenReader, TokenWriter};
use crate::scalar::{Coordinates, LineStringCoordinates};

/// Encodes a [LineStringCoordinates] as an array of coordinate tuples.
#[derive(Debug, Clone)]
pub struct LineStringCodec<C = CoordinateCodec> {
    coords: ArrayCodec<C>,
}

impl<C: ElementCodec<Value = Coordinates>> LineStringCodec<C> {
    /// Create a new codec delegating each coordinate to `coord_codec`.
    pub fn new(coord_codec: C) -> Self {
        Self {
            coords: ArrayCodec::new(coord_codec),
        }
    }
}

impl Default for LineStringCodec {
    fn default() -> Self {
        Self::new(resolve_codec::<Coordinates>())
    }
}

impl<C: ElementCodec<Value = Coordinates>> ElementCodec for LineStringCodec<C> {
    type Value = LineStringCoordinates;

    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value> {
        Ok(LineStringCoordinates::new(
            self.coords.decode_collection(reader)?,
        ))
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()> {
        self.coords.encode_collection(writer, value.coords())
    }
}

impl HasCodec for LineStringCoordinates {
    type Codec = LineStringCodec;
}
