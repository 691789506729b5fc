/// Errors that can occur while accessing a bitmap carrier.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// The carrier ended before a complete header could be read.
    #[error("truncated bitmap header ({actual} bytes, expected {expected})")]
    TruncatedHeader { expected: usize, actual: usize },

    /// The configured header size cannot hold the width and height fields.
    #[error("header size {size} too small for dimension fields (need at least {min})")]
    HeaderTooSmall { size: usize, min: usize },

    /// An I/O error occurred on the carrier or destination stream.
    #[error("carrier I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContainerError>;
