//! A length-delimited, self-describing binary encoding of token streams.
//!
//! Every element starts with a one byte [ElementTag]. Arrays carry a little-endian u32 length
//! prefix counting the bytes after the prefix up to and including their end tag, so a reader can
//! validate structure without buffering, and a coordinate tuple is a u8 arity followed by that
//! many little-endian f64 values.

mod api;
mod common;
mod reader;
mod writer;

pub use api::{from_bytes, from_bytes_with_options, to_bytes};
pub use common::ElementTag;
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
