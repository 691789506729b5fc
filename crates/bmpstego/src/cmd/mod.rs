use clap::{Args, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use bmpstego_frame::FrameConfig;
use tracing::warn;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod capacity;
pub mod decode;
pub mod encode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hide a secret file inside a bitmap.
    #[command(short_flag = 'e')]
    Encode(EncodeArgs),
    /// Recover a hidden file from a bitmap.
    #[command(short_flag = 'd')]
    Decode(DecodeArgs),
    /// Report how much a bitmap can hold.
    Capacity(CapacityArgs),
    /// Show what a stego bitmap declares without extracting it.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: &FrameConfig) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format, config),
        Command::Decode(args) => decode::run(args, format, config),
        Command::Capacity(args) => capacity::run(args, format, config),
        Command::Inspect(args) => inspect::run(args, format, config),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Cover bitmap (.bmp).
    pub source: PathBuf,
    /// File to hide.
    pub secret: PathBuf,
    /// Where to write the stego bitmap (.bmp).
    pub stego: PathBuf,
    /// Extension to record instead of the secret file's own.
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Stego bitmap to read.
    pub stego: PathBuf,
    /// Output path without extension; the recorded extension is appended.
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Cover bitmap (.bmp).
    pub source: PathBuf,
    /// Check whether this file would fit.
    #[arg(long, value_name = "FILE")]
    pub secret: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Stego bitmap to inspect.
    pub stego: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Reject image paths that do not end in `.bmp`.
pub(crate) fn require_bmp(path: &Path, role: &str) -> CliResult<()> {
    let is_bmp = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("bmp"))
        .unwrap_or(false);
    if !is_bmp {
        return Err(CliError::new(
            USAGE,
            format!("{role} must be a .bmp file: {}", path.display()),
        ));
    }
    Ok(())
}

/// Refuse to write `output` over `input`.
///
/// Creating the output truncates it, which would destroy the input while it
/// is still being read.
pub(crate) fn reject_same_file(input: &Path, output: &Path, role: &str) -> CliResult<()> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        return Err(CliError::new(
            USAGE,
            format!("{role} would overwrite its input: {}", output.display()),
        ));
    }
    Ok(())
}

/// Extension to record for a secret, dot included.
pub(crate) fn secret_extension(path: &Path, config: &FrameConfig) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    config.extension_for(&name)
}

/// Remove an output left incomplete by a failed run.
pub(crate) fn discard_partial(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %err, "failed removing partial output");
    }
}
