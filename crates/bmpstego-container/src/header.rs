use std::io::Write;

use bytes::{Buf, Bytes};

use crate::error::{ContainerError, Result};

/// Size of the bitmap file header plus the info header.
pub const HEADER_SIZE: usize = 54;

/// Expected first two bytes of a bitmap file.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// Offset of the 4-byte little-endian pixel width.
pub const WIDTH_OFFSET: usize = 18;

/// Offset of the 4-byte little-endian pixel height.
pub const HEIGHT_OFFSET: usize = 22;

/// One byte per color channel, three channels.
pub const BYTES_PER_PIXEL: u64 = 3;

const DIMENSIONS_END: usize = HEIGHT_OFFSET + 4;

/// The raw header of a bitmap carrier.
///
/// Bytes are kept verbatim so they can be written back unchanged. Only the
/// width and height fields are ever interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpHeader {
    raw: Bytes,
}

impl BmpHeader {
    /// Wrap raw header bytes.
    ///
    /// Fails if the bytes are too short to contain the dimension fields.
    pub fn from_bytes(raw: impl Into<Bytes>) -> Result<Self> {
        let raw = raw.into();
        if raw.len() < DIMENSIONS_END {
            return Err(ContainerError::HeaderTooSmall {
                size: raw.len(),
                min: DIMENSIONS_END,
            });
        }
        Ok(Self { raw })
    }

    /// The header exactly as read from the carrier.
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_ref()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn signature(&self) -> [u8; 2] {
        [self.raw[0], self.raw[1]]
    }

    /// Whether the header starts with the `BM` magic.
    pub fn has_signature(&self) -> bool {
        self.signature() == SIGNATURE
    }

    /// Pixel width as stored in the header.
    pub fn width(&self) -> i32 {
        let mut field = &self.raw[WIDTH_OFFSET..];
        field.get_i32_le()
    }

    /// Pixel height as stored in the header. Negative for top-down bitmaps.
    pub fn height(&self) -> i32 {
        let mut field = &self.raw[HEIGHT_OFFSET..];
        field.get_i32_le()
    }

    /// Number of payload bytes available after the header.
    ///
    /// Assumes three bytes per pixel and no row padding.
    pub fn payload_capacity(&self) -> u64 {
        u64::from(self.width().unsigned_abs())
            * u64::from(self.height().unsigned_abs())
            * BYTES_PER_PIXEL
    }

    /// Write the header unchanged to `dst`.
    pub fn write_to<W: Write + ?Sized>(&self, dst: &mut W) -> Result<()> {
        dst.write_all(self.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_header(width: i32, height: i32) -> Vec<u8> {
    use bytes::BufMut;

    let mut raw = Vec::with_capacity(HEADER_SIZE);
    raw.put_slice(&SIGNATURE);
    raw.put_u32_le(0); // file size, never read
    raw.put_u32_le(0);
    raw.put_u32_le(HEADER_SIZE as u32);
    raw.put_u32_le(40);
    raw.put_i32_le(width);
    raw.put_i32_le(height);
    raw.put_u16_le(1);
    raw.put_u16_le(24);
    raw.resize(HEADER_SIZE, 0);
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dimensions_at_fixed_offsets() {
        let header = BmpHeader::from_bytes(test_header(100, 80)).unwrap();

        assert_eq!(header.len(), HEADER_SIZE);
        assert_eq!(header.width(), 100);
        assert_eq!(header.height(), 80);
        assert!(header.has_signature());
    }

    #[test]
    fn capacity_is_three_bytes_per_pixel() {
        let header = BmpHeader::from_bytes(test_header(100, 100)).unwrap();
        assert_eq!(header.payload_capacity(), 30_000);
    }

    #[test]
    fn top_down_height_counts_by_magnitude() {
        let header = BmpHeader::from_bytes(test_header(10, -10)).unwrap();
        assert_eq!(header.height(), -10);
        assert_eq!(header.payload_capacity(), 300);
    }

    #[test]
    fn capacity_does_not_overflow_for_large_dimensions() {
        let header = BmpHeader::from_bytes(test_header(i32::MAX, i32::MAX)).unwrap();
        let side = u64::from(i32::MAX.unsigned_abs());
        assert_eq!(header.payload_capacity(), side * side * 3);
    }

    #[test]
    fn rejects_header_without_dimension_fields() {
        let err = BmpHeader::from_bytes(vec![0u8; 20]).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::HeaderTooSmall { size: 20, min: 26 }
        ));
    }

    #[test]
    fn missing_signature_is_reported_not_rejected() {
        let mut raw = test_header(2, 2);
        raw[0] = b'X';
        let header = BmpHeader::from_bytes(raw).unwrap();
        assert!(!header.has_signature());
        assert_eq!(header.signature(), [b'X', b'M']);
    }

    #[test]
    fn write_to_emits_bytes_verbatim() {
        let raw = test_header(3, 4);
        let header = BmpHeader::from_bytes(raw.clone()).unwrap();

        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(out, raw);
    }
}
