//! Options controlling how token streams are read.

use serde::{Deserialize, Serialize};

/// The default ceiling on array nesting.
///
/// A multi-line-string only needs two levels of arrays (three counting the coordinate tuple), so
/// anything deeper than this is treated as hostile input.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Options for decoding a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// The maximum number of arrays that may be open at once.
    pub max_depth: usize,
}

impl DecodeOptions {
    /// Set the maximum array nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
