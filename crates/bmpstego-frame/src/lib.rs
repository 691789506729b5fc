//! Self-describing frame embedding for bitmap carriers.
//!
//! This is the core of bmpstego. Every hidden file is written into the
//! least-significant bits of the carrier's pixel bytes as one frame:
//! - A short magic marker (`#*` by default) so a reader can tell a frame is present
//! - A 4-byte little-endian extension length, then the extension text
//! - A 4-byte little-endian secret length, then the secret bytes
//!
//! Each frame byte occupies eight carrier bytes, most significant bit first.
//! Fields are streamed one at a time, so memory use does not grow with the
//! size of the secret.

pub mod capacity;
pub mod codec;
pub mod config;
pub mod error;
pub mod reader;
pub mod stream;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use capacity::{check_capacity, required_bytes, CapacityLedger};
pub use codec::{
    decode_byte, decode_u32, encode_byte, encode_u32, BYTE_SPAN, LENGTH_FIELD_SIZE, U32_SPAN,
};
pub use config::{FrameConfig, DEFAULT_EXTENSION, DEFAULT_MAGIC, MAX_EXTENSION_LEN};
pub use error::{FrameError, Result};
pub use reader::{FramePreamble, FrameReader, SecretReader};
pub use stream::{LsbReader, LsbWriter};
pub use writer::{EmbedReport, FrameWriter};
