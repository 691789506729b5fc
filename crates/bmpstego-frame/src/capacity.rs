use bmpstego_container::BmpHeader;
use tracing::debug;

use crate::codec::{BYTE_SPAN, LENGTH_FIELD_SIZE};
use crate::config::FrameConfig;
use crate::error::{FrameError, Result};

/// Carrier bytes needed to embed a frame, header included.
///
/// Every frame byte costs [`BYTE_SPAN`] carrier bytes. The two length fields
/// are always [`LENGTH_FIELD_SIZE`] bytes each whatever values they hold.
pub fn required_bytes(magic_len: u64, extension_len: u64, secret_len: u64, header_size: u64) -> u64 {
    let frame_len = magic_len
        .saturating_add(2 * LENGTH_FIELD_SIZE as u64)
        .saturating_add(extension_len)
        .saturating_add(secret_len);
    frame_len.saturating_mul(BYTE_SPAN as u64).saturating_add(header_size)
}

/// Required against available carrier bytes for one encode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityLedger {
    pub required: u64,
    pub available: u64,
}

impl CapacityLedger {
    /// Ledger for a frame with the given extension and secret lengths.
    pub fn plan(config: &FrameConfig, header: &BmpHeader, extension_len: usize, secret_len: u64) -> Self {
        Self {
            required: required_bytes(
                config.magic.len() as u64,
                extension_len as u64,
                secret_len,
                config.header_size as u64,
            ),
            available: header.payload_capacity(),
        }
    }

    pub fn fits(&self) -> bool {
        self.required <= self.available
    }

    /// Carrier bytes left over after the frame.
    pub fn spare(&self) -> u64 {
        self.available.saturating_sub(self.required)
    }

    /// Largest secret that still fits, for the same magic and extension.
    pub fn max_secret_len(&self, secret_len: u64) -> u64 {
        let fixed = self
            .required
            .saturating_sub(secret_len.saturating_mul(BYTE_SPAN as u64));
        self.available.saturating_sub(fixed) / BYTE_SPAN as u64
    }
}

/// Plan the frame and fail if the carrier is too small.
///
/// Must run before anything is written to the destination.
pub fn check_capacity(
    config: &FrameConfig,
    header: &BmpHeader,
    extension_len: usize,
    secret_len: u64,
) -> Result<CapacityLedger> {
    let ledger = CapacityLedger::plan(config, header, extension_len, secret_len);
    debug!(
        required = ledger.required,
        available = ledger.available,
        "checked carrier capacity"
    );
    if !ledger.fits() {
        return Err(FrameError::InsufficientCapacity {
            required: ledger.required,
            available: ledger.available,
        });
    }
    Ok(ledger)
}
