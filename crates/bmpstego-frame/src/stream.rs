//! Bit-grouped carrier streams.
//!
//! Every frame field goes through the same two types. [`LsbWriter`] pulls
//! carrier bytes from a source, hides data in them and pushes them to a
//! destination. [`LsbReader`] pulls carrier bytes and recovers the data.
//! Both only move forward.

use std::io::{self, ErrorKind, Read, Write};

use crate::codec::{decode_byte, decode_u32, encode_byte, encode_u32, BYTE_SPAN, U32_SPAN};
use crate::error::{FrameError, Result};

const CHUNK_SIZE: usize = 8 * 1024;

/// Hides bytes in the LSBs of a carrier while copying it to a destination.
pub struct LsbWriter<R, W> {
    carrier: R,
    dest: W,
    consumed: u64,
}

impl<R: Read, W: Write> LsbWriter<R, W> {
    pub fn new(carrier: R, dest: W) -> Self {
        Self {
            carrier,
            dest,
            consumed: 0,
        }
    }

    /// Hide one byte in the next eight carrier bytes.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        let mut window = [0u8; BYTE_SPAN];
        fill_window(&mut self.carrier, &mut window)?;
        encode_byte(value, &mut window);
        self.dest.write_all(&window)?;
        self.consumed += BYTE_SPAN as u64;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Hide a little-endian `u32` in the next 32 carrier bytes.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        let mut window = [0u8; U32_SPAN];
        fill_window(&mut self.carrier, &mut window)?;
        encode_u32(value, &mut window);
        self.dest.write_all(&window)?;
        self.consumed += U32_SPAN as u64;
        Ok(())
    }

    /// Stream exactly `len` bytes from `source` into the carrier.
    ///
    /// Fails with [`FrameError::SecretTruncated`] if `source` ends first.
    /// Bytes past `len` are never read.
    pub fn write_from<S: Read>(&mut self, mut source: S, len: u64) -> Result<u64> {
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut remaining = len;
        while remaining > 0 {
            let want = remaining.min(CHUNK_SIZE as u64) as usize;
            let read = match source.read(&mut chunk[..want]) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::SecretTruncated {
                    expected: len,
                    actual: len - remaining,
                });
            }

            self.write_bytes(&chunk[..read])?;
            remaining -= read as u64;
        }
        Ok(len)
    }

    /// Copy the untouched rest of the carrier and flush the destination.
    ///
    /// Returns the number of trailing bytes copied.
    pub fn finish(&mut self) -> Result<u64> {
        let tail = io::copy(&mut self.carrier, &mut self.dest)?;
        self.dest.flush()?;
        Ok(tail)
    }

    /// Carrier bytes consumed by hidden data so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn into_inner(self) -> (R, W) {
        (self.carrier, self.dest)
    }
}

/// Recovers bytes hidden in the LSBs of a carrier.
pub struct LsbReader<R> {
    carrier: R,
    consumed: u64,
}

impl<R: Read> LsbReader<R> {
    pub fn new(carrier: R) -> Self {
        Self {
            carrier,
            consumed: 0,
        }
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let mut window = [0u8; BYTE_SPAN];
        fill_window(&mut self.carrier, &mut window)?;
        self.consumed += BYTE_SPAN as u64;
        Ok(decode_byte(&window))
    }

    /// Fill `buf` with hidden bytes.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut window = [0u8; U32_SPAN];
        fill_window(&mut self.carrier, &mut window)?;
        self.consumed += U32_SPAN as u64;
        Ok(decode_u32(&window))
    }

    /// Recover exactly `len` bytes and write them to `out` as they are decoded.
    pub fn copy_to<W: Write>(&mut self, out: &mut W, len: u64) -> Result<u64> {
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(CHUNK_SIZE as u64) as usize;
            self.read_bytes(&mut chunk[..n])?;
            out.write_all(&chunk[..n])?;
            remaining -= n as u64;
        }
        out.flush()?;
        Ok(len)
    }

    /// Carrier bytes consumed so far, header excluded.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

fn fill_window<R: Read>(carrier: &mut R, window: &mut [u8]) -> Result<()> {
    carrier.read_exact(window).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => FrameError::CarrierExhausted,
        _ => FrameError::Io(err),
    })
}
