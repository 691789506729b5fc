use bmpstego_container::ContainerError;

/// Errors that can occur while embedding or extracting a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The carrier does not start with the expected magic marker.
    #[error("invalid frame magic (expected {expected:?}, found {found:?})")]
    InvalidMagic { expected: String, found: String },

    /// The extension is longer than the frame allows.
    #[error("extension too long ({len} bytes, max {max})")]
    ExtensionTooLong { len: usize, max: usize },

    /// The decoded extension cannot be used as part of a file name.
    #[error("invalid extension: {0}")]
    InvalidExtension(String),

    /// The secret does not fit in a 4-byte length field.
    #[error("secret too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    /// The carrier cannot hold the framed payload.
    #[error("insufficient carrier capacity ({required} bytes required, {available} available)")]
    InsufficientCapacity { required: u64, available: u64 },

    /// The secret source ended before its declared length.
    #[error("secret ended early ({actual} of {expected} bytes)")]
    SecretTruncated { expected: u64, actual: u64 },

    /// The carrier ended before the frame was complete.
    #[error("carrier exhausted (incomplete frame)")]
    CarrierExhausted,

    /// Header access failed.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// An I/O error occurred while reading or writing carrier bytes.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
