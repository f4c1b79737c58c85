//! Token stream transports.

pub mod binary;
pub mod memory;
pub mod stream;
