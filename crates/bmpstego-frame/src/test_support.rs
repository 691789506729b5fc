use bytes::BufMut;

/// Build a 24-bit bitmap with a 54-byte header and patterned pixel bytes.
pub(crate) fn bitmap(width: i32, height: i32) -> Vec<u8> {
    let pixels = (width.unsigned_abs() * height.unsigned_abs() * 3) as usize;
    let mut raw = Vec::with_capacity(54 + pixels);
    raw.put_slice(b"BM");
    raw.put_u32_le((54 + pixels) as u32);
    raw.put_u32_le(0);
    raw.put_u32_le(54);
    raw.put_u32_le(40);
    raw.put_i32_le(width);
    raw.put_i32_le(height);
    raw.put_u16_le(1);
    raw.put_u16_le(24);
    raw.resize(54, 0);
    raw.extend((0..pixels).map(|i| (i * 31 % 256) as u8));
    raw
}
