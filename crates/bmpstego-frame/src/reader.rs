use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bmpstego_container::{skip_header, BmpHeader};
use tracing::{debug, info};

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::stream::LsbReader;

/// Everything a frame declares before the secret bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePreamble {
    pub header: BmpHeader,
    pub extension: String,
    pub secret_len: u64,
}

impl FramePreamble {
    /// Output path for the recovered secret: `base` followed by the extension.
    pub fn output_path(&self, base: &Path) -> PathBuf {
        let mut name = base.as_os_str().to_os_string();
        name.push(&self.extension);
        PathBuf::from(name)
    }
}

/// Reads one frame back out of a carrier bitmap.
///
/// Reading happens in two stages. [`FrameReader::read_preamble`] verifies the
/// magic and decodes the extension and secret length; only the returned
/// [`SecretReader`] can then stream the secret out.
pub struct FrameReader<R> {
    carrier: R,
    config: FrameConfig,
}

impl<R: Read> FrameReader<R> {
    /// Create a new frame reader with default configuration.
    pub fn new(carrier: R) -> Self {
        Self::with_config(carrier, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(carrier: R, config: FrameConfig) -> Self {
        Self { carrier, config }
    }

    /// Skip the header and decode the frame up to the secret bytes.
    pub fn read_preamble(self) -> Result<SecretReader<R>> {
        let Self { carrier, config } = self;

        let mut carrier = BufReader::new(carrier);
        let header = skip_header(&mut carrier, config.header_size)?;
        let mut lsb = LsbReader::new(carrier);

        let mut magic = vec![0u8; config.magic.len()];
        lsb.read_bytes(&mut magic)?;
        if magic != config.magic.as_ref() {
            return Err(FrameError::InvalidMagic {
                expected: String::from_utf8_lossy(&config.magic).into_owned(),
                found: String::from_utf8_lossy(&magic).into_owned(),
            });
        }
        debug!("magic marker verified");

        let extension_len = usize::try_from(lsb.read_u32()?).unwrap_or(usize::MAX);
        if extension_len > config.max_extension_len {
            return Err(FrameError::ExtensionTooLong {
                len: extension_len,
                max: config.max_extension_len,
            });
        }
        let mut extension = vec![0u8; extension_len];
        lsb.read_bytes(&mut extension)?;
        let extension = String::from_utf8(extension)
            .map_err(|_| FrameError::InvalidExtension("not valid UTF-8".to_string()))?;
        config.check_extension(&extension)?;
        debug!(extension = %extension, "read extension");

        let secret_len = u64::from(lsb.read_u32()?);
        debug!(secret_len, "read secret length");

        Ok(SecretReader {
            lsb,
            preamble: FramePreamble {
                header,
                extension,
                secret_len,
            },
        })
    }
}

/// A carrier positioned at the first secret byte of a verified frame.
pub struct SecretReader<R> {
    lsb: LsbReader<BufReader<R>>,
    preamble: FramePreamble,
}

impl<R: Read> SecretReader<R> {
    pub fn preamble(&self) -> &FramePreamble {
        &self.preamble
    }

    /// Stream the secret into `out`, decoding as it goes.
    ///
    /// Exactly the declared number of bytes is consumed from the carrier.
    pub fn copy_to<W: Write>(mut self, out: W) -> Result<u64> {
        let mut out = BufWriter::new(out);
        let written = self.lsb.copy_to(&mut out, self.preamble.secret_len)?;
        info!(
            secret_len = written,
            extension = %self.preamble.extension,
            carrier_bytes = self.lsb.consumed(),
            "extracted frame"
        );
        Ok(written)
    }

    /// Drop the carrier and keep only what the preamble declared.
    pub fn into_preamble(self) -> FramePreamble {
        self.preamble
    }
}
