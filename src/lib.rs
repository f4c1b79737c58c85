//! Streaming binary codecs for the coordinates payload of GeoJSON MultiLineString geometries.
//!
//! A MultiLineString's `coordinates` member is an array of line strings, each an array of
//! coordinate tuples. This crate converts between that nested value
//! ([MultiLineStringCoordinates](scalar::MultiLineStringCoordinates)) and a token stream, using
//! one generic array traversal ([ArrayCodec](codec::ArrayCodec)) at every nesting level. An absent
//! value is kept distinct from an empty one.
//!
//! ```
//! use geojson_bson::io::binary::{from_bytes, to_bytes};
//! use geojson_bson::scalar::{LineStringCoordinates, MultiLineStringCoordinates};
//!
//! let value = MultiLineStringCoordinates::new(vec![
//!     vec![(1., 2.).into(), (3., 4.).into()].into(),
//!     LineStringCoordinates::default(),
//! ]);
//! let buf = to_bytes(Some(&value)).unwrap();
//! assert_eq!(from_bytes(&buf).unwrap(), Some(value));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod codec;
pub mod datatypes;
pub mod error;
pub mod io;
pub mod options;
pub mod scalar;
