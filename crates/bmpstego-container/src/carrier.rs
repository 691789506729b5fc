use std::io::{ErrorKind, Read, Write};

use tracing::{debug, warn};

use crate::error::{ContainerError, Result};
use crate::header::BmpHeader;

/// Read exactly `header_size` bytes from the start of a carrier.
///
/// Fails with [`ContainerError::TruncatedHeader`] if the stream ends early.
pub fn read_header<R: Read + ?Sized>(src: &mut R, header_size: usize) -> Result<BmpHeader> {
    let mut raw = vec![0u8; header_size];
    let mut filled = 0usize;
    while filled < header_size {
        match src.read(&mut raw[filled..]) {
            Ok(0) => {
                return Err(ContainerError::TruncatedHeader {
                    expected: header_size,
                    actual: filled,
                })
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ContainerError::Io(err)),
        }
    }

    let header = BmpHeader::from_bytes(raw)?;
    if !header.has_signature() {
        warn!(signature = ?header.signature(), "carrier header has no BM signature");
    }
    debug!(
        width = header.width(),
        height = header.height(),
        capacity = header.payload_capacity(),
        "read bitmap header"
    );
    Ok(header)
}

/// Copy the header from `src` to `dst` unchanged.
pub fn copy_header<R, W>(src: &mut R, dst: &mut W, header_size: usize) -> Result<BmpHeader>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let header = read_header(src, header_size)?;
    header.write_to(dst)?;
    Ok(header)
}

/// Advance `src` past the header.
///
/// The header is consumed by reading so non-seekable streams work too.
pub fn skip_header<R: Read + ?Sized>(src: &mut R, header_size: usize) -> Result<BmpHeader> {
    read_header(src, header_size)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::header::{test_header, HEADER_SIZE};

    fn carrier(width: i32, height: i32) -> Vec<u8> {
        let mut bytes = test_header(width, height);
        let pixels = (width * height * 3) as usize;
        bytes.extend((0..pixels).map(|i| (i % 251) as u8));
        bytes
    }

    #[test]
    fn read_header_leaves_stream_at_pixels() {
        let bytes = carrier(4, 4);
        let mut src = Cursor::new(bytes.clone());

        let header = read_header(&mut src, HEADER_SIZE).unwrap();

        assert_eq!(header.as_bytes(), &bytes[..HEADER_SIZE]);
        assert_eq!(src.position(), HEADER_SIZE as u64);
    }

    #[test]
    fn truncated_header_is_reported() {
        let bytes = carrier(4, 4);
        let mut src = Cursor::new(bytes[..30].to_vec());

        let err = read_header(&mut src, HEADER_SIZE).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::TruncatedHeader {
                expected: HEADER_SIZE,
                actual: 30
            }
        ));
    }

    #[test]
    fn copy_header_writes_only_the_header() {
        let bytes = carrier(2, 2);
        let mut src = Cursor::new(bytes.clone());
        let mut dst = Vec::new();

        let header = copy_header(&mut src, &mut dst, HEADER_SIZE).unwrap();

        assert_eq!(dst, &bytes[..HEADER_SIZE]);
        assert_eq!(header.payload_capacity(), 12);
    }

    #[test]
    fn skip_header_then_pixels_follow() {
        let bytes = carrier(2, 2);
        let mut src = Cursor::new(bytes.clone());

        skip_header(&mut src, HEADER_SIZE).unwrap();
        let mut rest = Vec::new();
        src.read_to_end(&mut rest).unwrap();

        assert_eq!(rest, &bytes[HEADER_SIZE..]);
    }

    #[test]
    fn interrupted_read_retries() {
        let bytes = carrier(2, 2);
        let mut src = InterruptedOnce {
            interrupted: false,
            inner: Cursor::new(bytes),
        };

        let header = read_header(&mut src, HEADER_SIZE).unwrap();
        assert_eq!(header.width(), 2);
    }

    struct InterruptedOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            // one byte at a time to exercise partial fills
            let n = buf.len().min(1);
            self.inner.read(&mut buf[..n])
        }
    }
}
