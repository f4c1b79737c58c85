//! Codecs converting between token streams and coordinate values.
//!
//! Every level of nesting is handled by an [ElementCodec]. Composite codecs never hardcode the
//! codec of their elements: it is injected at construction, and the [Default] constructors pick
//! it up through [resolve_codec]. The collection loop itself lives once, in [ArrayCodec], and is
//! reused for the line strings of a multi-line-string as well as for the coordinates of each line
//! string.

mod array;
mod coord;
mod linestring;
mod multilinestring;
mod registry;

use std::sync::Arc;

pub use array::ArrayCodec;
pub use coord::CoordinateCodec;
pub use linestring::LineStringCodec;
pub use multilinestring::MultiLineStringCodec;
pub use registry::{CodecRegistry, CodecRegistryBuilder, SharedCodec};

use crate::error::Result;
use crate::io::stream::{TokenReader, TokenWriter};

/// Encodes and decodes exactly one value of a given shape.
///
/// `decode` consumes exactly one element's worth of tokens, which may itself be a nested array,
/// and never consumes the end marker of the array enclosing it. `encode` emits exactly one
/// element's worth of tokens. Neither keeps any state between calls.
pub trait ElementCodec {
    /// The in-memory value this codec produces and consumes.
    type Value;

    /// Decode one value from `reader`.
    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value>;

    /// Encode `value` to `writer`.
    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()>;
}

impl<C: ElementCodec + ?Sized> ElementCodec for &C {
    type Value = C::Value;

    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value> {
        (**self).decode(reader)
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()> {
        (**self).encode(writer, value)
    }
}

impl<C: ElementCodec + ?Sized> ElementCodec for Arc<C> {
    type Value = C::Value;

    fn decode(&self, reader: &mut dyn TokenReader) -> Result<Self::Value> {
        (**self).decode(reader)
    }

    fn encode(&self, writer: &mut dyn TokenWriter, value: &Self::Value) -> Result<()> {
        (**self).encode(writer, value)
    }
}

/// A type with a statically known default codec.
pub trait HasCodec: Sized {
    type Codec: ElementCodec<Value = Self> + Default;
}

/// Look up the default codec for `T`.
///
/// This is a pure function of the type: every call returns a codec with the same behavior.
pub fn resolve_codec<T: HasCodec>() -> T::Codec {
    T::Codec::default()
}

impl<T: HasCodec> HasCodec for Vec<T> {
    type Codec = ArrayCodec<T::Codec>;
}
