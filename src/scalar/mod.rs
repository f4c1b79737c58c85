//! Owned coordinate values produced by decoding and consumed by encoding.

mod coord;
mod linestring;
mod multilinestring;

pub use coord::Coordinates;
pub use linestring::LineStringCoordinates;
pub use multilinestring::MultiLineStringCoordinates;
