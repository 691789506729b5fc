use std::io::{BufReader, BufWriter, Read, Write};

use bmpstego_container::{read_header, BmpHeader};
use tracing::{debug, info};

use crate::capacity::{check_capacity, CapacityLedger};
use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::stream::LsbWriter;

/// Summary of a completed embed.
#[derive(Debug, Clone)]
pub struct EmbedReport {
    pub header: BmpHeader,
    pub ledger: CapacityLedger,
    pub extension: String,
    pub secret_len: u64,
    /// Carrier bytes that now hold frame bits.
    pub frame_bytes: u64,
    /// Carrier bytes copied through untouched after the frame.
    pub tail_bytes: u64,
}

/// Embeds one frame while copying a carrier bitmap to a destination.
///
/// The destination receives nothing until the capacity check has passed.
pub struct FrameWriter<R, W> {
    carrier: R,
    dest: W,
    config: FrameConfig,
}

impl<R: Read, W: Write> FrameWriter<R, W> {
    /// Create a new frame writer with default configuration.
    pub fn new(carrier: R, dest: W) -> Self {
        Self::with_config(carrier, dest, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(carrier: R, dest: W, config: FrameConfig) -> Self {
        Self {
            carrier,
            dest,
            config,
        }
    }

    /// Hide `secret_len` bytes read from `secret`, tagged with `extension`.
    ///
    /// Writes, in order: the carrier header, the magic marker, the extension
    /// length and text, the secret length and bytes, then every remaining
    /// carrier byte unchanged.
    pub fn embed<S: Read>(
        &mut self,
        extension: &str,
        secret: S,
        secret_len: u64,
    ) -> Result<EmbedReport> {
        self.config.check_extension(extension)?;
        let secret_len_field = u32::try_from(secret_len).map_err(|_| FrameError::PayloadTooLarge {
            size: secret_len,
            max: u64::from(u32::MAX),
        })?;

        let mut carrier = BufReader::new(&mut self.carrier);
        let header = read_header(&mut carrier, self.config.header_size)?;
        let ledger = check_capacity(&self.config, &header, extension.len(), secret_len)?;

        let mut dest = BufWriter::new(&mut self.dest);
        header.write_to(&mut dest)?;

        let mut lsb = LsbWriter::new(carrier, dest);
        lsb.write_bytes(&self.config.magic)?;
        debug!(magic = ?self.config.magic, "wrote magic marker");

        lsb.write_u32(extension.len() as u32)?;
        lsb.write_bytes(extension.as_bytes())?;
        debug!(extension, "wrote extension");

        lsb.write_u32(secret_len_field)?;
        lsb.write_from(secret, secret_len)?;
        debug!(secret_len, "wrote secret");

        let frame_bytes = lsb.consumed();
        let tail_bytes = lsb.finish()?;
        info!(
            secret_len,
            frame_bytes,
            tail_bytes,
            spare = ledger.spare(),
            "embedded frame"
        );

        Ok(EmbedReport {
            header,
            ledger,
            extension: extension.to_string(),
            secret_len,
            frame_bytes,
            tail_bytes,
        })
    }

    /// Borrow the destination.
    pub fn dest_ref(&self) -> &W {
        &self.dest
    }

    /// Consume the writer and return the carrier and destination.
    pub fn into_inner(self) -> (R, W) {
        (self.carrier, self.dest)
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
