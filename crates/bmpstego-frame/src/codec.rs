/// Carrier bytes consumed by one hidden byte.
pub const BYTE_SPAN: usize = 8;

/// Size of each length field on the wire.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Carrier bytes consumed by one hidden `u32`.
pub const U32_SPAN: usize = LENGTH_FIELD_SIZE * BYTE_SPAN;

/// Hide `value` in the least-significant bits of eight carrier bytes.
///
/// `carrier[0]` receives the most significant bit and `carrier[7]` the least.
/// Only bit 0 of each carrier byte changes.
///
/// ```text
/// value   1 0 1 1 0 0 1 0
///         │ │ │ │ │ │ │ └─> carrier[7] & 0x01
///         │ │ │ │ │ │ └───> carrier[6] & 0x01
///         └─┴─┴─┴─┴─┴─────> carrier[0..6]
/// ```
pub fn encode_byte(value: u8, carrier: &mut [u8; BYTE_SPAN]) {
    for (i, slot) in carrier.iter_mut().enumerate() {
        let bit = (value >> (7 - i)) & 1;
        *slot = (*slot & 0xFE) | bit;
    }
}

/// Recover a byte from the least-significant bits of eight carrier bytes.
pub fn decode_byte(carrier: &[u8; BYTE_SPAN]) -> u8 {
    carrier
        .iter()
        .fold(0u8, |acc, byte| (acc << 1) | (byte & 1))
}

/// Hide `value` in 32 carrier bytes, least significant byte first.
pub fn encode_u32(value: u32, carrier: &mut [u8; U32_SPAN]) {
    for (k, byte) in value.to_le_bytes().into_iter().enumerate() {
        let span = k * BYTE_SPAN..(k + 1) * BYTE_SPAN;
        let mut window: [u8; BYTE_SPAN] = std::array::from_fn(|i| carrier[span.start + i]);
        encode_byte(byte, &mut window);
        carrier[span].copy_from_slice(&window);
    }
}

/// Recover a `u32` hidden by [`encode_u32`].
pub fn decode_u32(carrier: &[u8; U32_SPAN]) -> u32 {
    let bytes: [u8; LENGTH_FIELD_SIZE] = std::array::from_fn(|k| {
        let window: [u8; BYTE_SPAN] = std::array::from_fn(|i| carrier[k * BYTE_SPAN + i]);
        decode_byte(&window)
    });
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_byte_places_msb_first() {
        let mut carrier = [0u8; BYTE_SPAN];
        encode_byte(0b1011_0010, &mut carrier);
        assert_eq!(carrier, [1, 0, 1, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn decode_byte_reads_msb_first() {
        let carrier = [0xFF, 0x00, 0x01, 0xFE, 0x03, 0x02, 0x11, 0x10];
        assert_eq!(decode_byte(&carrier), 0b1010_1010);
    }

    #[test]
    fn byte_roundtrip_ignores_original_lsbs() {
        for initial in [[0x00u8; BYTE_SPAN], [0xFF; BYTE_SPAN], [0x5A; BYTE_SPAN]] {
            for value in 0..=u8::MAX {
                let mut carrier = initial;
                encode_byte(value, &mut carrier);
                assert_eq!(decode_byte(&carrier), value);
            }
        }
    }

    #[test]
    fn encode_byte_only_touches_lsb() {
        let original = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        let mut carrier = original;
        encode_byte(0xA5, &mut carrier);

        for (before, after) in original.iter().zip(carrier.iter()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }

    #[test]
    fn encode_u32_is_little_endian() {
        let mut carrier = [0u8; U32_SPAN];
        encode_u32(0x0403_0201, &mut carrier);

        let windows: Vec<u8> = carrier
            .chunks_exact(BYTE_SPAN)
            .map(|w| decode_byte(w.try_into().unwrap()))
            .collect();
        assert_eq!(windows, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn u32_roundtrip() {
        let mut carrier = [0xAAu8; U32_SPAN];
        for value in [0, 1, 4, 0x7FFF_FFFF, 0x8000_0000, u32::MAX] {
            encode_u32(value, &mut carrier);
            assert_eq!(decode_u32(&carrier), value);
        }
    }

    #[test]
    fn encode_u32_only_touches_lsb() {
        let mut original = [0u8; U32_SPAN];
        for (i, byte) in original.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37);
        }
        let mut carrier = original;
        encode_u32(0xDEAD_BEEF, &mut carrier);

        for (before, after) in original.iter().zip(carrier.iter()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }
}
