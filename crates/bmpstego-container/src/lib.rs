//! Carrier access for uncompressed 24-bit bitmaps.
//!
//! This crate only knows enough about the bitmap layout to do three things:
//! - Move the fixed 54-byte header from a source to a destination unchanged
//! - Step over that header when reading a carrier back
//! - Derive the usable payload size from the width and height fields
//!
//! It is deliberately not a bitmap parser. Compression mode, color depth and
//! row padding are never inspected; carriers are expected to be uncompressed
//! 24 bits per pixel with rows that need no alignment padding.

pub mod carrier;
pub mod error;
pub mod header;

pub use carrier::{copy_header, read_header, skip_header};
pub use error::{ContainerError, Result};
pub use header::{BmpHeader, BYTES_PER_PIXEL, HEADER_SIZE, HEIGHT_OFFSET, SIGNATURE, WIDTH_OFFSET};
