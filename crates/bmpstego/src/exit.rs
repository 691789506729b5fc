use std::fmt;
use std::io;

use bmpstego_container::ContainerError;
use bmpstego_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const CAPACITY_EXCEEDED: i32 = 61;
pub const USAGE: i32 = 64;
pub const NOT_FOUND: i32 = 66;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn container_error(context: &str, err: ContainerError) -> CliError {
    match err {
        ContainerError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::Container(err) => container_error(context, err),
        FrameError::InsufficientCapacity { .. } => {
            CliError::new(CAPACITY_EXCEEDED, format!("{context}: {err}"))
        }
        FrameError::SecretTruncated { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
        FrameError::InvalidMagic { .. }
        | FrameError::ExtensionTooLong { .. }
        | FrameError::InvalidExtension(_)
        | FrameError::PayloadTooLarge { .. }
        | FrameError::CarrierExhausted => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_maps_to_its_own_code() {
        let err = frame_error(
            "encode failed",
            FrameError::InsufficientCapacity {
                required: 10,
                available: 5,
            },
        );
        assert_eq!(err.code, CAPACITY_EXCEEDED);
        assert!(err.message.starts_with("encode failed: insufficient carrier capacity"));
    }

    #[test]
    fn format_errors_are_data_invalid() {
        let magic = FrameError::InvalidMagic {
            expected: "#*".to_string(),
            found: "zz".to_string(),
        };
        assert_eq!(frame_error("decode failed", magic).code, DATA_INVALID);

        let header = FrameError::Container(ContainerError::TruncatedHeader {
            expected: 54,
            actual: 3,
        });
        assert_eq!(frame_error("decode failed", header).code, DATA_INVALID);
    }

    #[test]
    fn io_kinds_map_to_open_codes() {
        let missing = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, NOT_FOUND);

        let denied = frame_error(
            "write",
            FrameError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        );
        assert_eq!(denied.code, PERMISSION_DENIED);

        let full = io_error("write", io::Error::other("no space left on device"));
        assert_eq!(full.code, FAILURE);
    }
}
