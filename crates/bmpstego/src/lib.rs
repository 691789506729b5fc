//! Hide files inside uncompressed bitmaps with LSB steganography.
//!
//! bmpstego embeds a secret file, together with its extension, in the
//! least-significant bits of a 24-bit bitmap's pixel bytes and recovers it
//! byte for byte.
//!
//! # Crate Structure
//!
//! - [`container`]: Bitmap header access and payload capacity
//! - [`frame`]: Bit codec, capacity planning and the embed/extract pipelines
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! use bmpstego::frame::{FrameReader, FrameWriter};
//!
//! let secret = File::open("notes.txt")?;
//! let len = secret.metadata()?.len();
//! let mut writer = FrameWriter::new(File::open("cover.bmp")?, File::create("stego.bmp")?);
//! writer.embed(".txt", secret, len)?;
//!
//! let reader = FrameReader::new(File::open("stego.bmp")?).read_preamble()?;
//! let out = File::create(reader.preamble().output_path("recovered".as_ref()))?;
//! reader.copy_to(out)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Re-export container types.
pub mod container {
    pub use bmpstego_container::*;
}

/// Re-export frame types.
pub mod frame {
    pub use bmpstego_frame::*;
}
