use bmpstego_container::HEADER_SIZE;
use bytes::Bytes;

use crate::error::{FrameError, Result};

/// Default magic marker written at the start of every frame.
pub const DEFAULT_MAGIC: &[u8] = b"#*";

/// Longest extension a frame may carry, leading dot included.
///
/// Encoder and decoder must agree on this value; it is part of the wire
/// contract even though nothing on the wire records it.
pub const MAX_EXTENSION_LEN: usize = 9;

/// Extension used when the secret file name has none.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Configuration shared by [`FrameWriter`](crate::FrameWriter) and
/// [`FrameReader`](crate::FrameReader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    /// Carrier header size in bytes, copied or skipped verbatim. Default: 54.
    pub header_size: usize,
    /// Marker identifying an embedded frame. Default: `#*`.
    pub magic: Bytes,
    /// Maximum extension length in bytes. Default: 9.
    pub max_extension_len: usize,
    /// Fallback extension for secrets without one. Default: `.txt`.
    pub default_extension: String,
}

impl FrameConfig {
    /// Default configuration with a custom magic marker.
    pub fn with_magic(magic: impl Into<Bytes>) -> Self {
        Self {
            magic: magic.into(),
            ..Self::default()
        }
    }

    /// Resolve the extension to embed for a secret file name.
    ///
    /// Returns the text from the last `.` of the final path component,
    /// dot included, or the configured fallback.
    pub fn extension_for(&self, file_name: &str) -> String {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name);
        match base.rfind('.') {
            Some(idx) if idx + 1 < base.len() => base[idx..].to_string(),
            _ => self.default_extension.clone(),
        }
    }

    /// Check that an extension may travel in a frame.
    ///
    /// The decoder appends the extension to a file name, so both sides reject
    /// text over the cap or containing a path separator or NUL.
    pub fn check_extension(&self, extension: &str) -> Result<()> {
        if extension.len() > self.max_extension_len {
            return Err(FrameError::ExtensionTooLong {
                len: extension.len(),
                max: self.max_extension_len,
            });
        }
        if extension.contains(['/', '\\', '\0']) {
            return Err(FrameError::InvalidExtension(format!(
                "{extension:?} contains a path separator or NUL"
            )));
        }
        Ok(())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            header_size: HEADER_SIZE,
            magic: Bytes::from_static(DEFAULT_MAGIC),
            max_extension_len: MAX_EXTENSION_LEN,
            default_extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_contract() {
        let config = FrameConfig::default();
        assert_eq!(config.header_size, 54);
        assert_eq!(config.magic.as_ref(), b"#*");
        assert_eq!(config.max_extension_len, 9);
        assert_eq!(config.default_extension, ".txt");
    }

    #[test]
    fn extension_includes_leading_dot() {
        let config = FrameConfig::default();
        assert_eq!(config.extension_for("notes.txt"), ".txt");
        assert_eq!(config.extension_for("archive.tar.gz"), ".gz");
        assert_eq!(config.extension_for("dir.d/script.sh"), ".sh");
    }

    #[test]
    fn extension_falls_back_when_missing() {
        let config = FrameConfig::default();
        assert_eq!(config.extension_for("README"), ".txt");
        assert_eq!(config.extension_for("trailing."), ".txt");
        assert_eq!(config.extension_for("some.dir/README"), ".txt");
    }

    #[test]
    fn check_extension_rejects_unsafe_text() {
        let config = FrameConfig::default();
        assert!(config.check_extension(".tar").is_ok());
        assert!(config.check_extension("").is_ok());
        for bad in ["/x", ".a\\b", ".nul\0"] {
            assert!(matches!(
                config.check_extension(bad),
                Err(FrameError::InvalidExtension(_))
            ));
        }
        assert!(matches!(
            config.check_extension(".verylongext"),
            Err(FrameError::ExtensionTooLong { len: 12, max: 9 })
        ));
    }

    #[test]
    fn with_magic_keeps_other_defaults() {
        let config = FrameConfig::with_magic("STEG");
        assert_eq!(config.magic.as_ref(), b"STEG");
        assert_eq!(config.header_size, 54);
    }
}
